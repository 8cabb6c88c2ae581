use std::fmt;

use crate::block::{Address, Pid};

/// Failures reported by the simulator. None of them changes any state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
  /// A request for zero or a negative number of units.
  InvalidSize(i64),
  /// No registered process has this id.
  ProcessNotFound(Pid),
  /// The process exists but owns no block starting at `address`.
  BlockNotFound { pid: Pid, address: Address },
}

impl fmt::Display for SimError {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      SimError::InvalidSize(size) => write!(f, "Invalid size {}: must be greater than zero.", size),
      SimError::ProcessNotFound(pid) => write!(f, "Process {} not found.", pid),
      SimError::BlockNotFound { pid, address } => {
        write!(f, "Address {} not allocated to process {}.", address, pid)
      }
    }
  }
}

impl std::error::Error for SimError {}
