//! The capabilities an instruction needs from the simulator besides registers: a way
//! to request a branch and a console to print to.

use crate::bytecode::Word;
use crate::register::RegisterAccess;

/// Performs a jump to a target the host's decoder already resolved. Not calling it
/// means execution falls through.
pub trait BranchResolver {
  fn request_branch(&mut self, target: Word);
}

/// Append-only console output.
pub trait ConsoleSink {
  fn write(&mut self, text: &str);
}

/// Captures console output, mostly for tests.
impl ConsoleSink for String {
  fn write(&mut self, text: &str) {
    self.push_str(text);
  }
}

#[derive(Clone, Copy, Default, Debug)]
pub struct StdoutConsole;

impl ConsoleSink for StdoutConsole {
  fn write(&mut self, text: &str) {
    print!("{}", text);
  }
}

/// Remembers the last requested branch target until the host takes it.
#[derive(Clone, Copy, Default, Eq, PartialEq, Debug)]
pub struct BranchLatch {
  target: Option<Word>,
}

impl BranchLatch {
  pub fn new() -> BranchLatch {
    BranchLatch::default()
  }

  pub fn peek(&self) -> Option<Word> {
    self.target
  }

  pub fn take(&mut self) -> Option<Word> {
    self.target.take()
  }
}

impl BranchResolver for BranchLatch {
  fn request_branch(&mut self, target: Word) {
    self.target = Some(target);
  }
}

/// Everything an execution routine may touch, borrowed from the host for one dispatch.
pub struct Host<'h> {
  pub registers : &'h mut dyn RegisterAccess,
  pub branch    : &'h mut dyn BranchResolver,
  pub console   : &'h mut dyn ConsoleSink,
}

impl<'h> Host<'h> {
  pub fn new(
    registers : &'h mut dyn RegisterAccess,
    branch    : &'h mut dyn BranchResolver,
    console   : &'h mut dyn ConsoleSink,
  ) -> Host<'h> {
    Host { registers, branch, console }
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn latch_holds_target_until_taken() {
    let mut latch = BranchLatch::new();
    assert_eq!(latch.peek(), None);
    latch.request_branch(12);
    assert_eq!(latch.peek(), Some(12));
    assert_eq!(latch.take(), Some(12));
    assert_eq!(latch.take(), None);
  }

  #[test]
  fn string_sink_preserves_order() {
    let mut console = String::new();
    console.write("first\n");
    ConsoleSink::write(&mut console, "second\n");
    assert_eq!(console, "first\nsecond\n");
  }
}
