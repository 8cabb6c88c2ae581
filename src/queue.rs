use std::collections::VecDeque;

use log::debug;

use crate::block::Pid;

/// An allocation request that could not be placed when it arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
  pub pid: Pid,
  pub size: usize,
}

/// Strict FIFO of deferred requests. No priorities, no dedup.
#[derive(Debug, Clone, Default)]
pub struct AdmissionQueue {
  entries: VecDeque<Request>,
}

impl AdmissionQueue {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn enqueue(
    &mut self,
    pid: Pid,
    size: usize,
  ) {
    self.entries.push_back(Request { pid, size });
    debug!("queued {} units for process {} ({} waiting)", size, pid, self.entries.len());
  }

  /// Removes and returns the oldest request.
  pub fn dequeue(&mut self) -> Option<Request> {
    let request = self.entries.pop_front()?;
    debug!("dequeued {} units for process {}", request.size, request.pid);
    Some(request)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Waiting requests, oldest first.
  pub fn iter(&self) -> impl Iterator<Item = &Request> {
    self.entries.iter()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_fifo_order_with_repeats() {
    let mut queue = AdmissionQueue::new();
    queue.enqueue(1, 500);
    queue.enqueue(2, 10);
    queue.enqueue(1, 500);

    assert_eq!(queue.len(), 3);
    assert_eq!(queue.dequeue(), Some(Request { pid: 1, size: 500 }));
    assert_eq!(queue.dequeue(), Some(Request { pid: 2, size: 10 }));
    assert_eq!(queue.dequeue(), Some(Request { pid: 1, size: 500 }));
    assert_eq!(queue.dequeue(), None);
    assert!(queue.is_empty());
  }
}
