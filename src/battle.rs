/*!
  The battle tables behind `typeeff` and `ball`.

  Only four element types exist, and only seven ordered pairings have an effect. Every
  other pairing is neutral, including a type against itself and any code that is not a
  known type. The same holds for items: an unknown item code gives no bonus.
*/

use std::convert::TryFrom;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::Display as StrumDisplay;

/// Element type codes as they are stored in `$t6` and `$t7`.
#[derive(
  StrumDisplay, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,             Eq, PartialEq, Debug, Hash
)]
#[repr(i32)]
pub enum ElementType {
  Fire     = 1,
  Water    = 2,
  Electric = 3,
  Grass    = 4,
}

#[derive(StrumDisplay, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum Effectiveness {
  #[strum(serialize = "super effective")]      Super,
  #[strum(serialize = "not very effective")]   NotVery,
  #[strum(serialize = "neutral")]              Neutral,
}

impl Effectiveness {
  /// Looks up the pairing of two raw type codes.
  pub fn of(attacker: i32, defender: i32) -> Effectiveness {
    match (ElementType::try_from(attacker), ElementType::try_from(defender)) {
      (Ok(attacker), Ok(defender)) => Effectiveness::between(attacker, defender),
      _                            => Effectiveness::Neutral
    }
  }

  pub fn between(attacker: ElementType, defender: ElementType) -> Effectiveness {
    use ElementType::*;

    match (attacker, defender) {
      | (Fire, Grass)
      | (Water, Fire)
      | (Grass, Water)
      | (Electric, Water) => Effectiveness::Super,

      | (Fire, Water)
      | (Water, Grass)
      | (Grass, Fire)     => Effectiveness::NotVery,

      _                   => Effectiveness::Neutral
    }
  }

  /// Doubling wraps. Halving truncates toward zero.
  pub fn apply(&self, power: i32) -> i32 {
    match self {
      Effectiveness::Super   => power.wrapping_mul(2),
      Effectiveness::NotVery => power / 2,
      Effectiveness::Neutral => power
    }
  }
}

/// Item codes `ball` understands.
#[derive(
  StrumDisplay, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,             Eq, PartialEq, Debug, Hash
)]
#[repr(i32)]
pub enum BallItem {
  #[strum(serialize = "Poke Ball")]  PokeBall  = 1,
  #[strum(serialize = "Great Ball")] GreatBall = 2,
  #[strum(serialize = "Ultra Ball")] UltraBall = 3,
}

impl BallItem {
  pub fn bonus(&self) -> i32 {
    match self {
      BallItem::PokeBall  => 1,
      BallItem::GreatBall => 3,
      BallItem::UltraBall => 5,
    }
  }

  /// The catch-chance bonus for a raw item code.
  pub fn bonus_for(code: i32) -> i32 {
    BallItem::try_from(code).map(|item| item.bonus()).unwrap_or(0)
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn effectiveness_matrix_is_exactly_the_listed_pairs() {
    let mut super_effective = vec![];
    let mut not_very_effective = vec![];
    for attacker in -1..=6 {
      for defender in -1..=6 {
        match Effectiveness::of(attacker, defender) {
          Effectiveness::Super   => super_effective.push((attacker, defender)),
          Effectiveness::NotVery => not_very_effective.push((attacker, defender)),
          Effectiveness::Neutral => {}
        }
      }
    }
    assert_eq!(super_effective, vec![(1, 4), (2, 1), (3, 2), (4, 2)]);
    assert_eq!(not_very_effective, vec![(1, 2), (2, 4), (4, 1)]);
  }

  #[test]
  fn apply_doubles_and_halves() {
    assert_eq!(Effectiveness::Super.apply(10), 20);
    assert_eq!(Effectiveness::NotVery.apply(10), 5);
    assert_eq!(Effectiveness::NotVery.apply(-7), -3);
    assert_eq!(Effectiveness::Neutral.apply(10), 10);
    assert_eq!(Effectiveness::Super.apply(i32::max_value()), -2);
  }

  #[test]
  fn ball_bonuses() {
    assert_eq!(BallItem::bonus_for(1), 1);
    assert_eq!(BallItem::bonus_for(2), 3);
    assert_eq!(BallItem::bonus_for(3), 5);
    assert_eq!(BallItem::bonus_for(0), 0);
    assert_eq!(BallItem::bonus_for(99), 0);
    assert_eq!(BallItem::bonus_for(-2), 0);
  }

  #[test]
  fn names() {
    assert_eq!(BallItem::UltraBall.to_string(), "Ultra Ball");
    assert_eq!(ElementType::Electric.to_string(), "Electric");
    assert_eq!(Effectiveness::of(1, 4).to_string(), "super effective");
  }
}
