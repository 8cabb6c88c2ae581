/// Identifier of a simulated process. Supplied by the user, never generated.
pub type Pid = i32;

/// An address (or a length) inside the simulated address space.
pub type Address = usize;

/// A span of unowned addresses `[start, start + size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeRange {
  pub start: Address,
  pub size: usize,
}

impl FreeRange {
  pub fn new(
    start: Address,
    size: usize,
  ) -> Self {
    Self { start, size }
  }

  /// One past the last address of the range.
  pub fn end(&self) -> Address {
    self.start + self.size
  }
}

/// A span of addresses owned by a single process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocatedBlock {
  pub start: Address,
  pub size: usize,
  pub owner: Pid,
}

impl AllocatedBlock {
  pub fn new(
    start: Address,
    size: usize,
    owner: Pid,
  ) -> Self {
    Self { start, size, owner }
  }

  pub fn end(&self) -> Address {
    self.start + self.size
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_end() {
    assert_eq!(FreeRange::new(10, 5).end(), 15);
    assert_eq!(AllocatedBlock::new(0, 64, 7).end(), 64);
  }
}
