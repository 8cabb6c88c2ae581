//! Read-only views of a [`Simulator`] for the shell.
//!
//! ```text
//!   Memory Status:
//!   ---------------------------------------------------
//!   | Start Address | End Address   | Status          |
//!   ---------------------------------------------------
//!   |             0 |            49 | Process 2       |
//!   |            50 |            99 | Free            |
//!   ---------------------------------------------------
//! ```

use std::fmt;

use crate::simulator::{Owner, Simulator};

const RULE: &str = "---------------------------------------------------";
const QUEUE_RULE: &str = "---------------";

/// Address-ordered table of every free range and allocated block.
/// End addresses are inclusive.
pub struct MemoryReport<'a> {
  sim: &'a Simulator,
}

impl<'a> MemoryReport<'a> {
  pub fn new(sim: &'a Simulator) -> Self {
    Self { sim }
  }
}

impl fmt::Display for MemoryReport<'_> {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    writeln!(f, "Memory Status:")?;
    writeln!(f, "{}", RULE)?;
    writeln!(f, "| Start Address | End Address   | Status          |")?;
    writeln!(f, "{}", RULE)?;

    for segment in self.sim.memory_map() {
      let status = match segment.owner {
        Owner::Free => "Free".to_string(),
        Owner::Process(pid) => format!("Process {}", pid),
      };
      writeln!(
        f,
        "| {:>13} | {:>13} | {:<15} |",
        segment.start,
        segment.end() - 1,
        status
      )?;
    }

    writeln!(f, "{}", RULE)
  }
}

/// The admission queue, oldest request first.
pub struct QueueReport<'a> {
  sim: &'a Simulator,
}

impl<'a> QueueReport<'a> {
  pub fn new(sim: &'a Simulator) -> Self {
    Self { sim }
  }
}

impl fmt::Display for QueueReport<'_> {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    writeln!(f, "Process Queue:")?;
    writeln!(f, "{}", QUEUE_RULE)?;
    for request in self.sim.waiting() {
      writeln!(f, "Process {} ({} units)", request.pid, request.size)?;
    }
    writeln!(f, "{}", QUEUE_RULE)
  }
}
