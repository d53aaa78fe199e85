/*!
  Bit-level helpers shared by the templates and the execution routines.
*/

// If you change this you must also change `BitPattern::parse`, which assumes 32 bit words.
pub type Word = u32;

pub const OPCODE_SHIFT: u32 = 26;
pub const FUNCT_MASK: Word = 0x3F;

/// The six-bit major opcode of an instruction word.
pub fn opcode_of(word: Word) -> u8 {
  ((word >> OPCODE_SHIFT) & 0x3F) as u8
}

/// The six-bit funct code of an instruction word. Only meaningful for R_FORMAT.
pub fn funct_of(word: Word) -> u8 {
  (word & FUNCT_MASK) as u8
}

/**
  Takes the low 16 bits of `raw` and widens them to `i32`, treating bit 15 as the sign
  bit. The upper 16 bits of the input are ignored.
*/
pub fn sign_extend16(raw: Word) -> i32 {
  ((raw << 16) as i32) >> 16
}
