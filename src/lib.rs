/*!
  PokemonAssembly: a small instruction set that extends a MIPS-style simulator with
  opcodes modelled on a two-combatant battle.

  The crate supplies two things to a host simulator. The `catalog` describes every
  instruction (mnemonic, description, format and bit pattern) so the host can assemble
  and decode it. The `engine` executes a decoded instruction against the host's register
  file, requesting a branch or writing to the console where the instruction calls for it.
  Fetching, decoding and label resolution stay with the host.
*/

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

pub mod battle;
pub mod bytecode;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod host;
pub mod lcg;
pub mod register;

use prettytable::format as TableFormat;

pub use bytecode::{sign_extend16, BitPattern, EncodingKey, Format, Operation, Word};
pub use catalog::{Catalog, Definition, Descriptor, CATALOG};
pub use engine::Engine;
pub use error::{CatalogError, EngineError, PatternError};
pub use host::{BranchLatch, BranchResolver, ConsoleSink, Host, StdoutConsole};
pub use register::{RegisterAccess, RegisterFile, RegisterIndex, RegisterName};

lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}
