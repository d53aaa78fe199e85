//! The execution engine: one routine per operation, dispatched from a single `match`.
//! The engine owns the generator state used by `rng`. Everything else an instruction
//! touches belongs to the host and is reached through `Host`.

use crate::battle::{BallItem, Effectiveness};
use crate::bytecode::{sign_extend16, Operation, Word};
use crate::catalog::Catalog;
use crate::error::EngineError;
use crate::host::Host;
use crate::lcg::{Lcg, DEFAULT_SEED};
use crate::register::{
  register_index, RegisterAccess, RegisterIndex, RegisterName,
  ATTACKER_TYPE, DEFENDER_HP, DEFENDER_TYPE
};

/// A missing operand reads as zero.
fn operand(operands: &[Word], n: usize) -> Word {
  operands.get(n).copied().unwrap_or(0)
}

fn modify<R, F>(registers: &mut R, index: RegisterIndex, f: F)
  where R: RegisterAccess + ?Sized,
        F: FnOnce(i32) -> i32
{
  let value = registers.get(index);
  registers.set(index, f(value));
}

#[derive(Clone, Debug)]
pub struct Engine {
  rng: Lcg,
}

impl Default for Engine {
  fn default() -> Engine {
    Engine::with_seed(DEFAULT_SEED)
  }
}

impl Engine {

  pub fn new() -> Engine {
    Engine::default()
  }

  /// An engine whose `rng` sequence starts from `seed` instead of `DEFAULT_SEED`.
  pub fn with_seed(seed: i32) -> Engine {
    Engine { rng: Lcg::new(seed) }
  }

  pub fn rng_state(&self) -> i32 {
    self.rng.state()
  }

  /**
    Executes `operation` on the decoded `operands`.

    Operands come in the order the catalog's bit patterns define: the target register
    first, then the second register, the raw 16 bit immediate, or the resolved branch
    target. Every operation is total. Arithmetic wraps, and register operands only use
    their low five bits.
  */
  pub fn execute(&mut self, operation: Operation, operands: &[Word], host: &mut Host<'_>) {
    #[cfg(feature = "trace_computation")]
    tracing::trace!(%operation, ?operands, "execute");

    let target    = register_index(operand(operands, 0));
    let second    = operand(operands, 1);
    let registers = &mut *host.registers;

    match operation {

      Operation::Move => {
        let damage = registers.get(register_index(second));
        modify(registers, target, |hp| hp.wrapping_sub(damage));
      }

      | Operation::Heal
      | Operation::Buff => {
        modify(registers, target, |value| value.wrapping_add(sign_extend16(second)));
      }

      Operation::Debuff => {
        modify(registers, target, |value| value.wrapping_sub(sign_extend16(second)));
      }

      // The destination operand is ignored; the type slots are fixed.
      Operation::SetTypeP1 => registers.set(ATTACKER_TYPE, sign_extend16(second)),
      Operation::SetTypeP2 => registers.set(DEFENDER_TYPE, sign_extend16(second)),

      Operation::Inspect => {
        let text = format!(
          "Let's look at the stat here ({}): {}\n",
          RegisterName(target),
          registers.get(target)
        );
        host.console.write(&text);
      }

      Operation::ZeroHp => registers.set(target, 0),

      Operation::SetStatus => {
        modify(registers, target, |status| status | sign_extend16(second));
      }

      Operation::ResetStatus => {
        modify(registers, target, |status| status & !sign_extend16(second));
      }

      Operation::TempPower => {
        let stat = registers.get(register_index(second));
        registers.set(target, stat);
      }

      Operation::TypeEff => {
        let attacker = registers.get(ATTACKER_TYPE);
        let defender = registers.get(register_index(second));
        let effectiveness = Effectiveness::of(attacker, defender);
        modify(registers, target, |power| effectiveness.apply(power));
      }

      Operation::Crit => modify(registers, target, |power| power.wrapping_mul(2)),

      Operation::Ball => {
        let bonus = BallItem::bonus_for(registers.get(register_index(second)));
        modify(registers, target, |chance| chance.wrapping_add(bonus));
      }

      Operation::Catch => {
        let chance = registers.get(target);
        let hp     = registers.get(DEFENDER_HP);
        if chance > hp {
          tracing::debug!(chance, hp, target = second, "catch succeeded, branching");
          host.branch.request_branch(second);
        }
      }

      // The immediate field is ignored.
      Operation::Rng => {
        let value = self.rng.next_value();
        registers.set(target, value);
      }

      Operation::SetI => registers.set(target, sign_extend16(second)),

    }
  }

  /**
    Finds the descriptor matching `word`, extracts its operands and executes it. This is
    a convenience for hosts whose decoder is the catalog itself. A word no descriptor
    matches is a decode failure and changes nothing.
  */
  pub fn execute_word(
    &mut self,
    catalog : &Catalog,
    word    : Word,
    host    : &mut Host<'_>
  ) -> Result<Operation, EngineError>
  {
    let descriptor = catalog.match_word(word).ok_or(EngineError::UnrecognizedWord(word))?;
    let operands = descriptor.pattern.extract(word);
    self.execute(descriptor.operation, &operands, host);
    Ok(descriptor.operation)
  }
}
