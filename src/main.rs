//! A demonstration host: prints the catalog, or encodes a short battle with the catalog's
//! bit patterns and runs it one word at a time.

use std::collections::HashMap;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use pokeasm::lcg::DEFAULT_SEED;
use pokeasm::{
  BranchLatch, EngineError, Engine, Host, Operation, RegisterFile, StdoutConsole, Word, CATALOG
};

#[derive(Parser, Debug)]
#[command(name = "pokeasm", version, about = "PokemonAssembly instruction set demo host")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Print every instruction in the catalog.
  Catalog,
  /// Run the built-in battle program.
  Battle {
    /// Initial state of the `rng` generator.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: i32,
    /// Stop after this many instructions.
    #[arg(long, default_value_t = 1000)]
    step_limit: usize,
  },
}

#[derive(Error, Debug)]
enum DemoError {
  #[error("unknown label `{0}`")]
  UnknownLabel(&'static str),

  #[error(transparent)]
  Engine(#[from] EngineError),

  #[error("step limit of {0} instructions reached")]
  StepLimit(usize),
}

/// One line of the demo program. Label targets are instruction indices.
enum Line {
  Op(Operation, &'static [Word]),
  Catch(Word, &'static str),
  Label(&'static str),
}

const T0: Word = 8;
const T1: Word = 9;
const T2: Word = 10;
const T3: Word = 11;
const T6: Word = 14;
const T7: Word = 15;
const S0: Word = 16;
const S1: Word = 17;
const S2: Word = 18;
const S3: Word = 19;

const BATTLE: &[Line] = &[
  Line::Op(Operation::SetI,        &[T0, 120]),    // our HP
  Line::Op(Operation::SetI,        &[T1, 90]),     // wild HP
  Line::Op(Operation::SetI,        &[T2, 28]),     // our attack
  Line::Op(Operation::SetTypeP1,   &[T6, 2]),      // Water
  Line::Op(Operation::SetTypeP2,   &[T7, 1]),      // Fire
  Line::Op(Operation::TempPower,   &[S2, T2]),
  Line::Op(Operation::TypeEff,     &[S2, T7]),
  Line::Op(Operation::Move,        &[T1, S2]),
  Line::Op(Operation::Inspect,     &[T1]),
  Line::Op(Operation::SetStatus,   &[S0, 0b0001]), // paralyzed
  Line::Op(Operation::SetI,        &[S3, 20]),
  Line::Op(Operation::SetI,        &[S1, 3]),      // Ultra Ball
  Line::Op(Operation::Ball,        &[S3, S1]),
  Line::Catch(S3, "caught"),
  Line::Op(Operation::Inspect,     &[S3]),
  Line::Op(Operation::Crit,        &[S2]),
  Line::Op(Operation::Move,        &[T1, S2]),
  Line::Op(Operation::ZeroHp,      &[T1]),
  Line::Catch(S3, "caught"),
  Line::Op(Operation::Heal,        &[T0, 0xFF9C]), // never reached
  Line::Label("caught"),
  Line::Op(Operation::Inspect,     &[T1]),
  Line::Op(Operation::ResetStatus, &[S0, 0b0001]),
  Line::Op(Operation::Rng,         &[T3]),
  Line::Op(Operation::Inspect,     &[T3]),
];

/// Resolves labels and encodes every line with its catalog descriptor.
fn assemble(program: &[Line]) -> Result<Vec<Word>, DemoError> {
  let mut labels: HashMap<&'static str, Word> = HashMap::new();
  let mut address: Word = 0;
  for line in program {
    match line {
      Line::Label(name) => { labels.insert(*name, address); }
      _                 => address += 1
    }
  }

  let mut words = vec![];
  for line in program {
    let (operation, operands) = match line {
      Line::Op(operation, operands) => (*operation, operands.to_vec()),
      Line::Catch(register, label) => {
        let target = labels.get(label).copied().ok_or(DemoError::UnknownLabel(*label))?;
        (Operation::Catch, vec![*register, target])
      }
      Line::Label(_) => continue,
    };
    // Every operation has a descriptor in the shared catalog.
    if let Some(descriptor) = CATALOG.get(operation) {
      words.push(descriptor.encode(&operands));
    }
  }
  Ok(words)
}

fn battle(seed: i32, step_limit: usize) -> Result<(), DemoError> {
  let words = assemble(BATTLE)?;

  let mut engine    = Engine::with_seed(seed);
  let mut registers = RegisterFile::new();
  let mut branch    = BranchLatch::new();
  let mut console   = StdoutConsole;

  let mut pc: usize = 0;
  let mut steps: usize = 0;
  while pc < words.len() {
    if steps == step_limit {
      return Err(DemoError::StepLimit(step_limit));
    }
    let mut host = Host::new(&mut registers, &mut branch, &mut console);
    engine.execute_word(&CATALOG, words[pc], &mut host)?;
    pc = match branch.take() {
      Some(target) => target as usize,
      None         => pc + 1
    };
    steps += 1;
  }

  tracing::info!(steps, "battle finished");
  println!("{}", registers);
  Ok(())
}

fn main() -> Result<(), DemoError> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  match cli.command {
    Command::Catalog => {
      println!("{}", *CATALOG);
      Ok(())
    }
    Command::Battle { seed, step_limit } => battle(seed, step_limit),
  }
}
