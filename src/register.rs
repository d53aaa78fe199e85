//! The register file the instruction set operates on, the fixed slots of the
//! two-combatant convention, and the names `inspect` prints.

use std::fmt::{Display, Formatter};

use prettytable::Table;

use crate::bytecode::Word;
use crate::TABLE_DISPLAY_FORMAT;

/// A register number in `[0, REGISTER_COUNT)`.
pub type RegisterIndex = usize;

pub const REGISTER_COUNT: usize = 32;

/// `$t1`, the defender's HP, compared against by `catch`.
pub const DEFENDER_HP: RegisterIndex = 9;
/// `$t6`, the attacker's element type, written by `settypep1`.
pub const ATTACKER_TYPE: RegisterIndex = 14;
/// `$t7`, the defender's element type, written by `settypep2`.
pub const DEFENDER_TYPE: RegisterIndex = 15;

// Registers 8 through 19 have conventional names.
const FIRST_NAMED: RegisterIndex = 8;
const NAMED_REGISTERS: [&str; 12] = [
  "$t0", "$t1", "$t2", "$t3", "$t4", "$t5", "$t6", "$t7",
  "$s0", "$s1", "$s2", "$s3",
];

/// Converts a decoded register operand to an index. Register fields are five bits
/// wide, so only the low five bits are meaningful.
pub fn register_index(operand: Word) -> RegisterIndex {
  (operand & 0x1F) as RegisterIndex
}

/// The name `inspect` uses for a register: `$t0`..`$t7`, `$s0`..`$s3`, or `$r<index>`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct RegisterName(pub RegisterIndex);

impl Display for RegisterName {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self.0.checked_sub(FIRST_NAMED).and_then(|i| NAMED_REGISTERS.get(i)) {
      Some(name) => write!(f, "{}", name),
      None       => write!(f, "$r{}", self.0)
    }
  }
}

/// Read/write access to the host's register file. Hosts guarantee indices are in range.
pub trait RegisterAccess {
  fn get(&self, index: RegisterIndex) -> i32;
  fn set(&mut self, index: RegisterIndex, value: i32);
}

/// A plain 32-entry register file, for hosts that do not bring their own.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct RegisterFile {
  registers: [i32; REGISTER_COUNT],
}

impl RegisterFile {
  pub fn new() -> RegisterFile {
    RegisterFile::default()
  }

  pub fn values(&self) -> &[i32; REGISTER_COUNT] {
    &self.registers
  }

  pub fn reset(&mut self) {
    self.registers = [0; REGISTER_COUNT];
  }
}

impl RegisterAccess for RegisterFile {
  fn get(&self, index: RegisterIndex) -> i32 {
    self.registers[index]
  }

  fn set(&mut self, index: RegisterIndex, value: i32) {
    self.registers[index] = value;
  }
}

impl Display for RegisterFile {
  /// Only nonzero registers and the named ones are listed.
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Register", ubl->"Contents"]);

    for (i, value) in self.registers.iter().enumerate() {
      let named = i >= FIRST_NAMED && i < FIRST_NAMED + NAMED_REGISTERS.len();
      if named || *value != 0 {
        table.add_row(row![r->format!("{} =", RegisterName(i)), value]);
      }
    }

    write!(f, "{}", table)
  }
}
