//! The linear congruential generator behind `rng`.

pub const DEFAULT_SEED: i32 = 0x1234567;

const MULTIPLIER: i32 = 1103515245;
const INCREMENT: i32 = 12345;
const STATE_MASK: i32 = 0x7FFF_FFFF;

/// A single 31 bit state word. The sequence is fully determined by the seed.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct Lcg {
  state: i32,
}

impl Default for Lcg {
  fn default() -> Lcg {
    Lcg::new(DEFAULT_SEED)
  }
}

impl Lcg {
  pub fn new(seed: i32) -> Lcg {
    Lcg { state: seed }
  }

  pub fn state(&self) -> i32 {
    self.state
  }

  /// Advances the state and returns a value in `[0, 32767]`.
  pub fn next_value(&mut self) -> i32 {
    self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT) & STATE_MASK;
    (self.state >> 1) & 0x7FFF
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn first_values_from_default_seed() {
    let mut lcg = Lcg::default();
    assert_eq!(lcg.next_value(), 3978);
    assert_eq!(lcg.state(), 265559828);
    assert_eq!(lcg.next_value(), 16862);
    assert_eq!(lcg.next_value(), 28377);
  }

  #[test]
  fn same_seed_same_sequence() {
    let mut a = Lcg::new(DEFAULT_SEED);
    let mut b = Lcg::new(DEFAULT_SEED);
    for _ in 0..1000 {
      assert_eq!(a.next_value(), b.next_value());
    }
  }

  #[test]
  fn values_stay_in_range() {
    let mut lcg = Lcg::new(-1);
    for _ in 0..10_000 {
      let value = lcg.next_value();
      assert!(value >= 0 && value <= 32767);
      assert!(lcg.state() >= 0);
    }
  }
}
