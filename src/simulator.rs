use std::fmt;

use log::{debug, info, warn};

use crate::{
  address_space::AddressSpace,
  block::{Address, FreeRange, Pid},
  error::SimError,
  process_table::ProcessTable,
  queue::{AdmissionQueue, Request},
};

/// Default number of addressable units.
pub const MEMORY_SIZE: usize = 65536;

/// Outcome of a request that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allocation {
  /// Placed at this start address.
  Granted(Address),
  /// Did not fit; appended to the admission queue.
  Pending,
}

/// The single queued request retried after a free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Retry {
  pub request: Request,
  pub outcome: Allocation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeReport {
  pub pid: Pid,
  pub address: Address,
  pub size: usize,
  pub retry: Option<Retry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminateReport {
  pub pid: Pid,
  pub freed: Vec<FreeReport>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
  Free,
  Process(Pid),
}

/// A free range or an allocated block, as seen in the memory map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
  pub start: Address,
  pub size: usize,
  pub owner: Owner,
}

impl Segment {
  pub fn end(&self) -> Address {
    self.start + self.size
  }
}

/// A broken bookkeeping guarantee, found by [`Simulator::check_invariants`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
  EmptySegment { start: Address },
  Gap { start: Address, end: Address },
  Overlap { start: Address },
  OutOfBounds { end: Address },
  Uncoalesced { start: Address },
}

impl fmt::Display for InvariantViolation {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      InvariantViolation::EmptySegment { start } => write!(f, "empty segment at {}", start),
      InvariantViolation::Gap { start, end } => write!(f, "addresses {}..{} are unaccounted for", start, end),
      InvariantViolation::Overlap { start } => write!(f, "segment at {} overlaps its predecessor", start),
      InvariantViolation::OutOfBounds { end } => write!(f, "segments extend to {}, past the address space", end),
      InvariantViolation::Uncoalesced { start } => {
        write!(f, "free ranges meeting at {} were not merged", start)
      }
    }
  }
}

impl std::error::Error for InvariantViolation {}

/// One simulation session: the free list, the process table and the
/// admission queue, mutated only through the methods below.
///
/// Every method validates before it mutates, so an `Err` leaves the
/// session exactly as it was.
#[derive(Debug, Clone)]
pub struct Simulator {
  space: AddressSpace,
  processes: ProcessTable,
  queue: AdmissionQueue,
}

impl Default for Simulator {
  fn default() -> Self {
    Self::new(MEMORY_SIZE)
  }
}

impl Simulator {
  pub fn new(memory_size: usize) -> Self {
    info!("address space initialised with {} units", memory_size);
    Self {
      space: AddressSpace::new(memory_size),
      processes: ProcessTable::new(),
      queue: AdmissionQueue::new(),
    }
  }

  pub fn memory_size(&self) -> usize {
    self.space.size()
  }

  pub fn space(&self) -> &AddressSpace {
    &self.space
  }

  pub fn processes(&self) -> &ProcessTable {
    &self.processes
  }

  pub fn queue(&self) -> &AdmissionQueue {
    &self.queue
  }

  /// Free ranges in first-fit scan order.
  pub fn free_ranges(&self) -> &[FreeRange] {
    self.space.ranges()
  }

  /// Requests waiting for memory, oldest first.
  pub fn waiting(&self) -> impl Iterator<Item = &Request> {
    self.queue.iter()
  }

  /// Registers an empty process. Duplicate ids are accepted and shadow the
  /// older entry in lookups.
  pub fn create_process(
    &mut self,
    pid: Pid,
  ) {
    if self.processes.find(pid).is_some() {
      warn!("process {} already exists, the new entry shadows it", pid);
    }
    self.processes.create(pid);
  }

  pub fn allocate(
    &mut self,
    pid: Pid,
    size: i64,
  ) -> Result<Allocation, SimError> {
    let units = match usize::try_from(size) {
      Ok(units) if units > 0 => units,
      _ => return Err(SimError::InvalidSize(size)),
    };

    let allocation = self.place(pid, units);
    self.debug_check();
    Ok(allocation)
  }

  /// Frees the block of `pid` starting at `address`, then gives exactly one
  /// waiting request a chance to be placed.
  pub fn free(
    &mut self,
    pid: Pid,
    address: Address,
  ) -> Result<FreeReport, SimError> {
    let size = self.processes.remove_block(pid, address)?;
    self.space.release(address, size);
    debug!("process {} released {} units at {}", pid, size, address);

    let retry = self.retry_waiting();
    self.debug_check();
    Ok(FreeReport {
      pid,
      address,
      size,
      retry,
    })
  }

  /// Frees every block of `pid` and removes it from the table.
  ///
  /// Each free retries one waiting request, so a process holding k blocks
  /// may admit up to k of them. A retry that lands in the process being
  /// terminated is freed again before the process goes away. A queued
  /// request of `pid` served after its last block was freed registers a
  /// new process under the same id, which survives.
  pub fn terminate_process(
    &mut self,
    pid: Pid,
  ) -> Result<TerminateReport, SimError> {
    let key = self.processes.lookup(pid).ok_or(SimError::ProcessNotFound(pid))?;
    let mut freed = Vec::new();

    loop {
      let starts: Vec<Address> = match self.processes.get(key) {
        Some(process) => process.blocks().iter().map(|block| block.start).collect(),
        None => break,
      };
      if starts.is_empty() {
        break;
      }
      for start in starts {
        freed.push(self.free(pid, start)?);
      }
    }

    self.processes.deregister(key);
    info!("process {} terminated, {} blocks freed", pid, freed.len());
    self.debug_check();
    Ok(TerminateReport { pid, freed })
  }

  /// Free ranges and allocated blocks ordered by address.
  pub fn memory_map(&self) -> Vec<Segment> {
    let free = self.space.ranges().iter().map(|range| Segment {
      start: range.start,
      size: range.size,
      owner: Owner::Free,
    });
    let allocated = self.processes.iter().flat_map(|process| {
      process.blocks().iter().map(|block| Segment {
        start: block.start,
        size: block.size,
        owner: Owner::Process(block.owner),
      })
    });

    let mut segments: Vec<Segment> = free.chain(allocated).collect();
    segments.sort_by_key(|segment| segment.start);
    segments
  }

  /// Checks that free ranges and allocated blocks tile the address space
  /// exactly and that no two free ranges touch.
  pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
    let mut cursor = 0;
    for segment in self.memory_map() {
      if segment.size == 0 {
        return Err(InvariantViolation::EmptySegment { start: segment.start });
      }
      if segment.start > cursor {
        return Err(InvariantViolation::Gap {
          start: cursor,
          end: segment.start,
        });
      }
      if segment.start < cursor {
        return Err(InvariantViolation::Overlap { start: segment.start });
      }
      cursor = segment.end();
    }

    let size = self.memory_size();
    if cursor < size {
      return Err(InvariantViolation::Gap { start: cursor, end: size });
    }
    if cursor > size {
      return Err(InvariantViolation::OutOfBounds { end: cursor });
    }

    let mut free = self.space.ranges().to_vec();
    free.sort_by_key(|range| range.start);
    match free.windows(2).find(|pair| pair[0].end() == pair[1].start) {
      Some(pair) => Err(InvariantViolation::Uncoalesced { start: pair[1].start }),
      None => Ok(()),
    }
  }

  /// First-fit placement; requests that do not fit go to the back of the
  /// queue.
  fn place(
    &mut self,
    pid: Pid,
    size: usize,
  ) -> Allocation {
    if let Some(address) = self.space.find_fit(size) {
      if self.space.reserve(address, size) {
        let key = self.processes.get_or_create(pid);
        self.processes.add_block(key, address, size);
        info!("allocated {} units to process {} at {}", size, pid, address);
        return Allocation::Granted(address);
      }
    }

    if size > self.memory_size() {
      warn!(
        "process {} asked for {} units, more than the whole address space; it will wait forever",
        pid, size
      );
    }
    self.queue.enqueue(pid, size);
    Allocation::Pending
  }

  fn retry_waiting(&mut self) -> Option<Retry> {
    let request = self.queue.dequeue()?;
    info!("retrying {} units for waiting process {}", request.size, request.pid);
    let outcome = self.place(request.pid, request.size);
    Some(Retry { request, outcome })
  }

  fn debug_check(&self) {
    debug_assert_eq!(self.check_invariants(), Ok(()));
  }
}
