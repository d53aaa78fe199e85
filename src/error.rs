//! Error types. Instruction execution itself never fails; everything here is a
//! configuration problem in a catalog or a word the catalog does not recognize.

use thiserror::Error;

use crate::bytecode::{EncodingKey, Operation, Word};

/// Problems reading a bit-pattern template.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum PatternError {
  #[error("malformed bit pattern `{template}`")]
  Syntax { template: String },

  #[error("bit pattern `{template}` describes {bits} bits, expected 32")]
  Width { template: String, bits: usize },

  /// The same field letter appears in two separate runs.
  #[error("field `{letter}` in bit pattern `{template}` is not contiguous")]
  SplitField { template: String, letter: char },
}

/// Violations of the catalog invariants, detected once when the catalog is built.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum CatalogError {
  #[error("{operation}: {source}")]
  Pattern {
    operation: Operation,
    #[source]
    source: PatternError,
  },

  #[error("{operation} is R_FORMAT but its bit pattern does not fix the funct bits")]
  MissingFunct { operation: Operation },

  #[error("{operation} is defined more than once")]
  DuplicateOperation { operation: Operation },

  #[error("{duplicate} reuses encoding key {key} already taken by {existing}")]
  DuplicateKey {
    key: EncodingKey,
    existing: Operation,
    duplicate: Operation,
  },

  #[error("bit patterns of {first} and {second} overlap")]
  AmbiguousPatterns { first: Operation, second: Operation },
}

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum EngineError {
  #[error("no instruction matches word {0:#010x}")]
  UnrecognizedWord(Word),
}
