use log::{debug, trace};

use crate::block::{Address, FreeRange};

/// The free list of the simulated address space.
///
/// Ranges are kept in list order, head first. `release` pushes at the head,
/// so the list is newest-freed-first rather than address ordered, and the
/// first-fit scan follows that order.
///
/// ```text
///   head
///    │
///    ▼
///   ┌──────────┐   ┌──────────┐   ┌──────────┐
///   │ 300..400 │──▶│  0..100  │──▶│ 600..1024│
///   └──────────┘   └──────────┘   └──────────┘
///    freed last                    initial tail
/// ```
#[derive(Debug, Clone)]
pub struct AddressSpace {
  size: usize,
  ranges: Vec<FreeRange>,
}

impl AddressSpace {
  /// Creates an address space of `size` units with a single free range
  /// covering all of it.
  pub fn new(size: usize) -> Self {
    let ranges = if size > 0 { vec![FreeRange::new(0, size)] } else { Vec::new() };
    Self { size, ranges }
  }

  pub fn size(&self) -> usize {
    self.size
  }

  /// Free ranges in list order.
  pub fn ranges(&self) -> &[FreeRange] {
    &self.ranges
  }

  pub fn free_total(&self) -> usize {
    self.ranges.iter().map(|range| range.size).sum()
  }

  /// Returns the start of the first range, in list order, holding at least
  /// `size` units.
  pub fn find_fit(
    &self,
    size: usize,
  ) -> Option<Address> {
    let found = self.ranges.iter().find(|range| range.size >= size);
    trace!(
      "first-fit scan for {} units over {} ranges: {:?}",
      size,
      self.ranges.len(),
      found
    );
    found.map(|range| range.start)
  }

  /// Consumes the low `size` units of the free range starting at `address`.
  ///
  /// Returns `false` and leaves the list untouched when no range starts at
  /// `address` or the range is too small.
  #[must_use]
  pub fn reserve(
    &mut self,
    address: Address,
    size: usize,
  ) -> bool {
    let Some(index) = self
      .ranges
      .iter()
      .position(|range| range.start == address && range.size >= size)
    else {
      return false;
    };

    let range = &mut self.ranges[index];
    range.start += size;
    range.size -= size;
    debug!("split free range at {}: {} units taken, {} left", address, size, range.size);

    if range.size == 0 {
      self.ranges.remove(index);
    }
    true
  }

  /// Returns `[address, address + size)` to the free list and coalesces.
  pub fn release(
    &mut self,
    address: Address,
    size: usize,
  ) {
    self.ranges.insert(0, FreeRange::new(address, size));
    self.coalesce();
  }

  /// Merges every pair of address-contiguous ranges until none is left.
  /// The lower range absorbs the upper one and keeps its list position.
  fn coalesce(&mut self) {
    while let Some((lower, upper)) = self.adjacent_pair() {
      let absorbed = self.ranges[upper];
      let target = &mut self.ranges[lower];
      target.size += absorbed.size;
      debug!(
        "merged free range {}..{} into {}..{}",
        absorbed.start,
        absorbed.end(),
        target.start,
        target.end()
      );
      self.ranges.remove(upper);
    }
  }

  fn adjacent_pair(&self) -> Option<(usize, usize)> {
    self.ranges.iter().enumerate().find_map(|(lower, a)| {
      self
        .ranges
        .iter()
        .position(|b| a.end() == b.start)
        .map(|upper| (lower, upper))
    })
  }
}
