/*!
  Bit-pattern templates describe where the fixed bits and the operand fields of an
  instruction sit within its 32 bit word. A template is read most significant bit first:

  ```text
  000000 fffff sssss ddddd 00000 000001
  ```

  `0` and `1` are fixed bits. A run of one letter is a field. The letters `f`, `s` and `t`
  hold the first, second and third operand, in that order. Any other letter marks a field
  that carries no operand and is ignored when decoding. Spaces only group bits for the
  reader.

  The catalog turns each template into a mask/value pair for recognizing words, and the
  field list tells a host which bits to fill from, or extract into, the operand list.
*/

use std::fmt::{Display, Formatter};

use nom::{
  branch::alt,
  character::complete::{one_of, space0, space1},
  combinator::{all_consuming, map},
  multi::{many1, separated_nonempty_list},
  sequence::delimited,
  IResult,
};

use super::binary::{Word, FUNCT_MASK, OPCODE_SHIFT};
use crate::error::PatternError;

const FIELD_LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";
const WORD_BITS: usize = 32;

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
enum TemplateBit {
  Fixed(bool),
  Field(char),
}

fn template_bit(input: &str) -> IResult<&str, TemplateBit> {
  alt((
    map(one_of("01"), |c: char| TemplateBit::Fixed(c == '1')),
    map(one_of(FIELD_LETTERS), TemplateBit::Field),
  ))(input)
}

fn template_groups(input: &str) -> IResult<&str, Vec<Vec<TemplateBit>>> {
  all_consuming(
    delimited(
      space0,
      separated_nonempty_list(space1, many1(template_bit)),
      space0
    )
  )(input)
}

/// Which operand, if any, a field carries.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum FieldSlot {
  Operand(usize),
  Unused,
}

impl FieldSlot {
  fn for_letter(letter: char) -> FieldSlot {
    match letter {
      'f' => FieldSlot::Operand(0),
      's' => FieldSlot::Operand(1),
      't' => FieldSlot::Operand(2),
      _   => FieldSlot::Unused
    }
  }
}

/// A contiguous run of bits holding one operand. `shift` is the position of its least
/// significant bit.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct Field {
  pub letter : char,
  pub slot   : FieldSlot,
  pub shift  : u32,
  pub width  : u32,
}

impl Field {
  pub fn low_mask(&self) -> Word {
    match self.width >= 32 {
      true  => Word::max_value(),
      false => (1 << self.width) - 1
    }
  }

  pub fn read(&self, word: Word) -> Word {
    (word >> self.shift) & self.low_mask()
  }

  pub fn place(&self, operand: Word) -> Word {
    (operand & self.low_mask()) << self.shift
  }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct BitPattern {
  template : String,
  mask     : Word,
  value    : Word,
  fields   : Vec<Field>,
}

impl BitPattern {

  pub fn parse(template: &str) -> Result<BitPattern, PatternError> {
    let groups = match template_groups(template) {
      Ok((_rest, groups)) => groups,
      Err(_e) => {
        return Err(PatternError::Syntax { template: template.to_string() });
      }
    };

    let bits: Vec<TemplateBit> = groups.into_iter().flatten().collect();
    if bits.len() != WORD_BITS {
      return Err(PatternError::Width { template: template.to_string(), bits: bits.len() });
    }

    let mut mask  : Word = 0;
    let mut value : Word = 0;
    let mut fields: Vec<Field> = vec![];
    let mut previous: Option<TemplateBit> = None;

    for (i, bit) in bits.iter().enumerate() {
      let position = (WORD_BITS - 1 - i) as u32;
      match *bit {

        TemplateBit::Fixed(set) => {
          mask |= 1 << position;
          if set {
            value |= 1 << position;
          }
        }

        TemplateBit::Field(letter) => {
          if previous == Some(TemplateBit::Field(letter)) {
            // Extends the run we are in. `fields` is nonempty because `previous` was a field.
            if let Some(field) = fields.last_mut() {
              field.shift  = position;
              field.width += 1;
            }
          } else if fields.iter().any(|field| field.letter == letter) {
            return Err(PatternError::SplitField { template: template.to_string(), letter });
          } else {
            fields.push(Field {
              letter,
              slot  : FieldSlot::for_letter(letter),
              shift : position,
              width : 1
            });
          }
        }

      }
      previous = Some(*bit);
    }

    Ok(BitPattern { template: template.to_string(), mask, value, fields })
  }

  pub fn template(&self) -> &str {
    &self.template
  }

  /// The bits fixed by the template.
  pub fn mask(&self) -> Word {
    self.mask
  }

  /// The values of the fixed bits. Bits outside `mask` are zero.
  pub fn value(&self) -> Word {
    self.value
  }

  pub fn fields(&self) -> &[Field] {
    &self.fields
  }

  /// The number of operand slots a decoded operand list has for this pattern.
  pub fn operand_count(&self) -> usize {
    self.fields
        .iter()
        .filter_map(|field| match field.slot {
          FieldSlot::Operand(n) => Some(n + 1),
          FieldSlot::Unused     => None
        })
        .max()
        .unwrap_or(0)
  }

  /// The major opcode, if the template fixes all six opcode bits.
  pub fn opcode(&self) -> Option<u8> {
    match (self.mask >> OPCODE_SHIFT) == 0x3F {
      true  => Some((self.value >> OPCODE_SHIFT) as u8),
      false => None
    }
  }

  /// The funct code, if the template fixes all six funct bits.
  pub fn funct(&self) -> Option<u8> {
    match self.mask & FUNCT_MASK == FUNCT_MASK {
      true  => Some((self.value & FUNCT_MASK) as u8),
      false => None
    }
  }

  pub fn matches(&self, word: Word) -> bool {
    word & self.mask == self.value
  }

  /// Whether some word would match both patterns.
  pub fn overlaps(&self, other: &BitPattern) -> bool {
    (self.value ^ other.value) & self.mask & other.mask == 0
  }

  /**
    Reads the operand fields out of `word`, in slot order. Fields that carry no operand
    are skipped, and 16 bit fields come back as raw unsigned patterns.

    It is the caller's responsibility to check `matches` first.
  */
  pub fn extract(&self, word: Word) -> Vec<Word> {
    let mut operands = vec![0; self.operand_count()];
    for field in &self.fields {
      if let FieldSlot::Operand(n) = field.slot {
        operands[n] = field.read(word);
      }
    }
    operands
  }

  /// Fills the operand fields from `operands`, truncating each to its field width.
  /// Missing operands encode as zero.
  pub fn encode(&self, operands: &[Word]) -> Word {
    self.fields
        .iter()
        .fold(self.value, |word, field| {
          match field.slot {
            FieldSlot::Operand(n) => word | field.place(operands.get(n).copied().unwrap_or(0)),
            FieldSlot::Unused     => word
          }
        })
  }
}

impl Display for BitPattern {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.template)
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  const R_TEMPLATE: &str = "000000 fffff sssss ddddd 00000 000101";
  const I_TEMPLATE: &str = "001111 fffff ttttt ssssssssssssssss";

  #[test]
  fn r_format_mask_and_value() {
    let pattern = BitPattern::parse(R_TEMPLATE).unwrap();
    assert_eq!(pattern.mask(), 0xFC00_07FF);
    assert_eq!(pattern.value(), 0b000101);
    assert_eq!(pattern.opcode(), Some(0));
    assert_eq!(pattern.funct(), Some(0b000101));
    assert_eq!(pattern.operand_count(), 2);
  }

  #[test]
  fn fields_are_located_msb_first() {
    let pattern = BitPattern::parse(I_TEMPLATE).unwrap();
    let fields = pattern.fields();
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[0], Field { letter: 'f', slot: FieldSlot::Operand(0), shift: 21, width: 5 });
    assert_eq!(fields[1], Field { letter: 't', slot: FieldSlot::Operand(2), shift: 16, width: 5 });
    assert_eq!(fields[2], Field { letter: 's', slot: FieldSlot::Operand(1), shift: 0, width: 16 });
    assert_eq!(pattern.funct(), None);
    assert_eq!(pattern.opcode(), Some(0b001111));
  }

  #[test]
  fn unused_letters_carry_no_operand() {
    let pattern = BitPattern::parse(R_TEMPLATE).unwrap();
    let d = pattern.fields().iter().find(|field| field.letter == 'd').unwrap();
    assert_eq!(d.slot, FieldSlot::Unused);
    // The `d` bits are neither fixed nor extracted.
    let word = pattern.encode(&[18, 15]) | (0b10101 << 11);
    assert!(pattern.matches(word));
    assert_eq!(pattern.extract(word), vec![18, 15]);
  }

  #[test]
  fn encode_truncates_immediates() {
    let pattern = BitPattern::parse(I_TEMPLATE).unwrap();
    let word = pattern.encode(&[8, (-100i32) as Word]);
    assert_eq!(word >> 26, 0b001111);
    assert_eq!(pattern.extract(word), vec![8, 0xFF9C, 0]);
  }

  #[test]
  fn wrong_width_is_rejected() {
    assert_eq!(
      BitPattern::parse("000000 fffff"),
      Err(PatternError::Width { template: "000000 fffff".to_string(), bits: 11 })
    );
  }

  #[test]
  fn syntax_errors_are_rejected() {
    assert!(matches!(
      BitPattern::parse("000000 FFFFF sssss ddddd 00000 000101"),
      Err(PatternError::Syntax { .. })
    ));
    assert!(matches!(BitPattern::parse(""), Err(PatternError::Syntax { .. })));
  }

  #[test]
  fn split_fields_are_rejected() {
    let template = "000000 fffff sssss fffff 00000 000101";
    assert_eq!(
      BitPattern::parse(template),
      Err(PatternError::SplitField { template: template.to_string(), letter: 'f' })
    );
  }

  #[test]
  fn overlap_detection() {
    let a = BitPattern::parse("000000 fffff sssss ddddd 00000 000101").unwrap();
    let b = BitPattern::parse("000000 fffff sssss ddddd 00000 000110").unwrap();
    let c = BitPattern::parse("000000 fffff sssss dddddddddd 000101").unwrap();
    assert!(!a.overlaps(&b));
    assert!(a.overlaps(&c));
    assert!(c.overlaps(&a));
  }
}
