/*!
  The instruction catalog: one descriptor per instruction, in a fixed order, built once
  and read-only afterwards. Hosts use it to recognize mnemonics when assembling and bit
  patterns when decoding.

  A catalog is only ever handed out after it has been validated. Two descriptors may not
  share an operation or an encoding key, and no instruction word may match more than one
  bit pattern. A violation is a configuration error, so the shared `CATALOG` refuses to
  initialize rather than let any instruction run against an ambiguous table.
*/

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use bimap::BiMap;
use prettytable::Table;

use crate::bytecode::{opcode_of, BitPattern, EncodingKey, Format, Operation, Word};
use crate::error::CatalogError;
use crate::TABLE_DISPLAY_FORMAT;

pub const LANGUAGE_NAME: &str = "PokemonAssembly";
pub const LANGUAGE_DESCRIPTION: &str =
  "Assembly language replicating simple Pokemon mechanics in MARS.";

/// The static, unvalidated form of a descriptor.
#[derive(Clone, Copy, Debug)]
pub struct Definition {
  pub operation   : Operation,
  pub syntax      : &'static str,
  pub description : &'static str,
  pub format      : Format,
  pub template    : &'static str,
}

pub const DEFINITIONS: &[Definition] = &[
  Definition {
    operation   : Operation::Move,
    syntax      : "move $t1, $t2",
    description : "Apply damage: R[$t1] = R[$t1] - R[$t2]",
    format      : Format::R,
    template    : "000000 fffff sssss ddddd 00000 000001",
  },
  Definition {
    operation   : Operation::Heal,
    syntax      : "heal $t0, -100",
    description : "Heal immediate: R[$t0] += imm",
    format      : Format::I,
    template    : "001000 fffff 00000 ssssssssssssssss",
  },
  Definition {
    operation   : Operation::SetTypeP1,
    syntax      : "settypep1 $t6, -100",
    description : "Set attacker type code: R[$t6] = imm",
    format      : Format::I,
    template    : "001001 fffff 00000 ssssssssssssssss",
  },
  Definition {
    operation   : Operation::SetTypeP2,
    syntax      : "settypep2 $t7, -100",
    description : "Set defender type code: R[$t7] = imm",
    format      : Format::I,
    template    : "101001 fffff 00000 ssssssssssssssss",
  },
  Definition {
    operation   : Operation::Buff,
    syntax      : "buff $s2, -100",
    description : "Increase temporary power: R[$s2] += imm",
    format      : Format::I,
    template    : "001010 fffff 00000 ssssssssssssssss",
  },
  Definition {
    operation   : Operation::Debuff,
    syntax      : "debuff $s2, -100",
    description : "Decrease temporary power: R[$s2] -= imm",
    format      : Format::I,
    template    : "001011 fffff 00000 ssssssssssssssss",
  },
  Definition {
    operation   : Operation::Inspect,
    syntax      : "inspect $t0",
    description : "Print register (stat) value to the console",
    format      : Format::R,
    template    : "000000 fffff sssss ddddd 00000 000010",
  },
  Definition {
    operation   : Operation::ZeroHp,
    syntax      : "zerohp $t0",
    description : "Set HP to zero (fainted): R[$t0] = 0",
    format      : Format::R,
    template    : "000000 fffff sssss ddddd 00000 000011",
  },
  Definition {
    operation   : Operation::SetStatus,
    syntax      : "setstatus $s0, -100",
    description : "Apply status bits: R[$s0] |= imm",
    format      : Format::I,
    template    : "001100 fffff 00000 ssssssssssssssss",
  },
  Definition {
    operation   : Operation::ResetStatus,
    syntax      : "resetstatus $s0, -100",
    description : "Clear status bits: R[$s0] &= ~imm",
    format      : Format::I,
    template    : "001101 fffff 00000 ssssssssssssssss",
  },
  Definition {
    operation   : Operation::TempPower,
    syntax      : "temppower $s2, $t2",
    description : "Load Pokemon stat into temporary power register: R[$s2] = R[$t2]",
    format      : Format::R,
    template    : "000000 fffff sssss ddddd 00000 000100",
  },
  Definition {
    operation   : Operation::TypeEff,
    syntax      : "typeeff $s2, $t7",
    description : "Apply a simple type effectiveness multiplier based on attacker ($t6) vs defender ($t7).",
    format      : Format::R,
    template    : "000000 fffff sssss ddddd 00000 000101",
  },
  Definition {
    operation   : Operation::Crit,
    syntax      : "crit $s2",
    description : "Critical hit: doubles temporary power (R[$s2] *= 2).",
    format      : Format::R,
    template    : "000000 fffff sssss ddddd 00000 000110",
  },
  Definition {
    operation   : Operation::Ball,
    syntax      : "ball $s3, $s1",
    description : "Use an item to modify catch chance. Items: 1 = Poke Ball (+1), 2 = Great Ball (+3), 3 = Ultra Ball (+5).",
    format      : Format::R,
    template    : "000000 fffff sssss ddddd 00000 000111",
  },
  Definition {
    operation   : Operation::Catch,
    syntax      : "catch $s3, label",
    description : "Attempt a capture: if R[$s3] > defender HP ($t1), branch to label (success).",
    format      : Format::IBranch,
    template    : "000100 fffff 00000 ssssssssssssssss",
  },
  Definition {
    operation   : Operation::Rng,
    syntax      : "rng $s3, -100",
    description : "Generate a deterministic random value (0-32767) in R[$s3].",
    format      : Format::I,
    template    : "001110 fffff 00000 ssssssssssssssss",
  },
  Definition {
    operation   : Operation::SetI,
    syntax      : "seti $t0, -100",
    description : "Load an immediate value into a register.",
    format      : Format::I,
    template    : "001111 fffff ttttt ssssssssssssssss",
  },
];

#[derive(Clone, Debug)]
pub struct Descriptor {
  pub operation   : Operation,
  /// An example of the textual form. Not used when executing.
  pub syntax      : &'static str,
  pub description : &'static str,
  pub format      : Format,
  pub pattern     : BitPattern,
}

impl Descriptor {
  pub fn mnemonic(&self) -> &'static str {
    self.operation.mnemonic()
  }

  pub fn key(&self) -> EncodingKey {
    EncodingKey {
      format : self.format,
      opcode : opcode_of(self.pattern.value()),
      funct  : match self.format {
        Format::R => self.pattern.funct(),
        _         => None
      }
    }
  }

  /// Encodes the instruction with the given operands. See `BitPattern::encode`.
  pub fn encode(&self, operands: &[Word]) -> Word {
    self.pattern.encode(operands)
  }
}

pub struct Catalog {
  name        : &'static str,
  description : &'static str,
  descriptors : Vec<Descriptor>,
  keys        : BiMap<Operation, EncodingKey>,
}

impl Catalog {

  /// Builds the PokemonAssembly catalog. Prefer the shared `CATALOG`.
  pub fn build() -> Result<Catalog, CatalogError> {
    Catalog::from_definitions(LANGUAGE_NAME, LANGUAGE_DESCRIPTION, DEFINITIONS)
  }

  /// Validates `definitions` and builds a catalog from them, preserving their order.
  pub fn from_definitions(
    name        : &'static str,
    description : &'static str,
    definitions : &[Definition]
  ) -> Result<Catalog, CatalogError>
  {
    let mut descriptors: Vec<Descriptor> = Vec::with_capacity(definitions.len());
    let mut keys: BiMap<Operation, EncodingKey> = BiMap::new();

    for definition in definitions {
      let operation = definition.operation;
      let pattern =
        BitPattern::parse(definition.template)
          .map_err(|source| CatalogError::Pattern { operation, source })?;

      let descriptor = Descriptor {
        operation,
        syntax      : definition.syntax,
        description : definition.description,
        format      : definition.format,
        pattern
      };

      if descriptor.format == Format::R && descriptor.pattern.funct().is_none() {
        return Err(CatalogError::MissingFunct { operation });
      }

      if keys.contains_left(&operation) {
        return Err(CatalogError::DuplicateOperation { operation });
      }

      if let Err((duplicate, key)) = keys.insert_no_overwrite(operation, descriptor.key()) {
        let existing = keys.get_by_right(&key).copied().unwrap_or(duplicate);
        return Err(CatalogError::DuplicateKey { key, existing, duplicate });
      }

      if let Some(earlier) = descriptors.iter().find(|d| d.pattern.overlaps(&descriptor.pattern)) {
        return Err(CatalogError::AmbiguousPatterns {
          first  : earlier.operation,
          second : operation
        });
      }

      descriptors.push(descriptor);
    }

    tracing::debug!(name, descriptors = descriptors.len(), "built instruction catalog");
    Ok(Catalog { name, description, descriptors, keys })
  }

  pub fn name(&self) -> &'static str {
    self.name
  }

  pub fn description(&self) -> &'static str {
    self.description
  }

  pub fn descriptors(&self) -> &[Descriptor] {
    &self.descriptors
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Descriptor> {
    self.descriptors.iter()
  }

  pub fn len(&self) -> usize {
    self.descriptors.len()
  }

  pub fn is_empty(&self) -> bool {
    self.descriptors.is_empty()
  }

  pub fn get(&self, operation: Operation) -> Option<&Descriptor> {
    self.descriptors.iter().find(|d| d.operation == operation)
  }

  pub fn by_mnemonic(&self, mnemonic: &str) -> Option<&Descriptor> {
    Operation::from_str(mnemonic).ok().and_then(|operation| self.get(operation))
  }

  pub fn by_key(&self, key: &EncodingKey) -> Option<&Descriptor> {
    self.keys.get_by_right(key).and_then(|operation| self.get(*operation))
  }

  /// The descriptor whose bit pattern matches `word`. Patterns never overlap, so there
  /// is at most one.
  pub fn match_word(&self, word: Word) -> Option<&Descriptor> {
    self.descriptors.iter().find(|d| d.pattern.matches(word))
  }
}

impl<'a> IntoIterator for &'a Catalog {
  type Item = &'a Descriptor;
  type IntoIter = std::slice::Iter<'a, Descriptor>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl Display for Catalog {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(
      row![ub->"Mnemonic", ub->"Format", ub->"Opcode", ub->"Funct", ub->"Bit Pattern", ub->"Description"]
    );

    for descriptor in &self.descriptors {
      let key = descriptor.key();
      let funct = match key.funct {
        Some(funct) => format!("{:06b}", funct),
        None        => "-".to_string()
      };
      table.add_row(row![
        descriptor.mnemonic(),
        descriptor.format,
        format!("{:06b}", key.opcode),
        funct,
        descriptor.pattern,
        descriptor.description
      ]);
    }

    write!(f, "{}: {}\n{}", self.name, self.description, table)
  }
}

lazy_static! {
  /// The PokemonAssembly catalog, built and validated on first use.
  pub static ref CATALOG: Catalog =
    match Catalog::build() {
      Ok(catalog) => catalog,
      Err(e) => panic!("instruction catalog is inconsistent: {}", e)
    };
}


#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator;

  use super::*;

  fn key(format: Format, opcode: u8, funct: Option<u8>) -> EncodingKey {
    EncodingKey { format, opcode, funct }
  }

  #[test]
  fn catalog_lists_every_operation_in_order() {
    let operations: Vec<Operation> = CATALOG.iter().map(|d| d.operation).collect();
    let expected: Vec<Operation> = Operation::iter().collect();
    assert_eq!(operations, expected);
    assert_eq!(CATALOG.len(), 17);
    assert_eq!(CATALOG.name(), "PokemonAssembly");
  }

  #[test]
  fn encoding_keys_match_the_instruction_table() {
    use Format::*;
    use Operation::*;

    let table = [
      (Move,        key(R, 0b000000, Some(0b000001))),
      (Heal,        key(I, 0b001000, None)),
      (SetTypeP1,   key(I, 0b001001, None)),
      (SetTypeP2,   key(I, 0b101001, None)),
      (Buff,        key(I, 0b001010, None)),
      (Debuff,      key(I, 0b001011, None)),
      (Inspect,     key(R, 0b000000, Some(0b000010))),
      (ZeroHp,      key(R, 0b000000, Some(0b000011))),
      (SetStatus,   key(I, 0b001100, None)),
      (ResetStatus, key(I, 0b001101, None)),
      (TempPower,   key(R, 0b000000, Some(0b000100))),
      (TypeEff,     key(R, 0b000000, Some(0b000101))),
      (Crit,        key(R, 0b000000, Some(0b000110))),
      (Ball,        key(R, 0b000000, Some(0b000111))),
      (Catch,       key(IBranch, 0b000100, None)),
      (Rng,         key(I, 0b001110, None)),
      (SetI,        key(I, 0b001111, None)),
    ];

    for (operation, expected) in table.iter() {
      let descriptor = CATALOG.get(*operation).unwrap();
      assert_eq!(descriptor.key(), *expected, "{}", operation);
      assert_eq!(CATALOG.by_key(expected).map(|d| d.operation), Some(*operation));
    }
  }

  #[test]
  fn patterns_are_pairwise_disjoint() {
    let descriptors = CATALOG.descriptors();
    for (i, a) in descriptors.iter().enumerate() {
      for b in &descriptors[i + 1..] {
        assert!(!a.pattern.overlaps(&b.pattern), "{} overlaps {}", a.operation, b.operation);
      }
    }
  }

  #[test]
  fn encoded_words_match_their_own_descriptor() {
    for descriptor in &*CATALOG {
      let word = descriptor.encode(&[18, 0xFFFF, 7]);
      let matched = CATALOG.match_word(word).map(|d| d.operation);
      assert_eq!(matched, Some(descriptor.operation));
    }
  }

  #[test]
  fn unknown_words_match_nothing() {
    // Opcode 0 with an unused funct code, and an unused opcode.
    assert!(CATALOG.match_word(0b000000_00000_00000_00000_00000_111111).is_none());
    assert!(CATALOG.match_word(0b111111 << 26).is_none());
    // R_FORMAT with a nonzero shift amount.
    assert!(CATALOG.match_word(0b000000_00000_00000_00000_00001_000001).is_none());
  }

  #[test]
  fn lookup_by_mnemonic() {
    assert_eq!(CATALOG.by_mnemonic("typeeff").map(|d| d.format), Some(Format::R));
    assert_eq!(CATALOG.by_mnemonic("catch").map(|d| d.format), Some(Format::IBranch));
    assert!(CATALOG.by_mnemonic("lw").is_none());
  }

  #[test]
  fn duplicate_keys_are_rejected() {
    let mut definitions = DEFINITIONS[..3].to_vec();
    definitions.push(Definition { operation: Operation::Crit, ..DEFINITIONS[0] });
    let result = Catalog::from_definitions("test", "test", &definitions);
    assert_eq!(
      result.err(),
      Some(CatalogError::DuplicateKey {
        key       : key(Format::R, 0, Some(1)),
        existing  : Operation::Move,
        duplicate : Operation::Crit
      })
    );
  }

  #[test]
  fn duplicate_operations_are_rejected() {
    let definitions = [DEFINITIONS[1], Definition { template: DEFINITIONS[4].template, ..DEFINITIONS[1] }];
    let result = Catalog::from_definitions("test", "test", &definitions);
    assert_eq!(result.err(), Some(CatalogError::DuplicateOperation { operation: Operation::Heal }));
  }

  #[test]
  fn overlapping_patterns_are_rejected() {
    // An I_FORMAT instruction on opcode zero shadows every R_FORMAT instruction.
    let shadow = Definition {
      operation : Operation::Rng,
      format    : Format::I,
      template  : "000000 fffff 00000 ssssssssssssssss",
      ..DEFINITIONS[15]
    };
    let definitions = [DEFINITIONS[0], shadow];
    let result = Catalog::from_definitions("test", "test", &definitions);
    assert_eq!(
      result.err(),
      Some(CatalogError::AmbiguousPatterns { first: Operation::Move, second: Operation::Rng })
    );
  }

  #[test]
  fn r_format_needs_a_funct() {
    let definitions = [Definition { template: "000000 fffff sssss dddddddddddddddd", ..DEFINITIONS[0] }];
    let result = Catalog::from_definitions("test", "test", &definitions);
    assert_eq!(result.err(), Some(CatalogError::MissingFunct { operation: Operation::Move }));
  }

  #[test]
  fn bad_templates_are_rejected() {
    let definitions = [Definition { template: "000000 fffff", ..DEFINITIONS[0] }];
    let result = Catalog::from_definitions("test", "test", &definitions);
    assert!(matches!(result.err(), Some(CatalogError::Pattern { operation: Operation::Move, .. })));
  }

  #[test]
  fn display_lists_every_mnemonic() {
    let text = CATALOG.to_string();
    assert!(text.starts_with("PokemonAssembly: "));
    for descriptor in &*CATALOG {
      assert!(text.contains(descriptor.mnemonic()));
    }
  }
}
