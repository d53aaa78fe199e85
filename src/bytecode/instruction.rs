use std::fmt::{Display, Formatter};

use strum_macros::{Display as StrumDisplay, EnumIter, EnumString, IntoStaticStr};

/**
  Operations of the instruction set.

  The enum is only a tag. The encoding of each operation lives in its catalog descriptor,
  and its behavior lives in `Engine::execute`. Variants are listed in catalog order, and
  the `strum` serialization of each variant is its assembly mnemonic.
*/
#[derive(
  StrumDisplay, IntoStaticStr, EnumString, EnumIter,
  Clone,        Copy,          Eq, PartialEq,  Debug,  Hash
)]
pub enum Operation {
  #[strum(serialize = "move")]        Move,        // move rd, rs
  #[strum(serialize = "heal")]        Heal,        // heal rd, imm
  #[strum(serialize = "settypep1")]   SetTypeP1,   // settypep1 rd, imm
  #[strum(serialize = "settypep2")]   SetTypeP2,   // settypep2 rd, imm
  #[strum(serialize = "buff")]        Buff,        // buff rd, imm
  #[strum(serialize = "debuff")]      Debuff,      // debuff rd, imm
  #[strum(serialize = "inspect")]     Inspect,     // inspect rs
  #[strum(serialize = "zerohp")]      ZeroHp,      // zerohp rd
  #[strum(serialize = "setstatus")]   SetStatus,   // setstatus rd, imm
  #[strum(serialize = "resetstatus")] ResetStatus, // resetstatus rd, imm
  #[strum(serialize = "temppower")]   TempPower,   // temppower rd, rs
  #[strum(serialize = "typeeff")]     TypeEff,     // typeeff rd, rs
  #[strum(serialize = "crit")]        Crit,        // crit rd
  #[strum(serialize = "ball")]        Ball,        // ball rd, rs
  #[strum(serialize = "catch")]       Catch,       // catch rd, label
  #[strum(serialize = "rng")]         Rng,         // rng rd
  #[strum(serialize = "seti")]        SetI,        // seti rd, imm
}

impl Operation {
  pub fn mnemonic(&self) -> &'static str {
    Into::<&'static str>::into(*self)
  }
}

#[derive(StrumDisplay, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum Format {
  /// Two source registers and a destination, no immediate.
  #[strum(serialize = "R_FORMAT")]        R,
  /// One register and a 16 bit immediate.
  #[strum(serialize = "I_FORMAT")]        I,
  /// One register and a 16 bit label offset.
  #[strum(serialize = "I_BRANCH_FORMAT")] IBranch,
}

/// The fixed part of an encoding that tells one instruction apart from every other.
/// `funct` is present only for R_FORMAT.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct EncodingKey {
  pub format : Format,
  pub opcode : u8,
  pub funct  : Option<u8>,
}

impl Display for EncodingKey {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self.funct {
      Some(funct) => write!(f, "{} {:06b}/{:06b}", self.format, self.opcode, funct),
      None        => write!(f, "{} {:06b}", self.format, self.opcode),
    }
  }
}
