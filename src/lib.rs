//! # rmemsim - A First-Fit Memory Allocation Simulator
//!
//! This crate simulates a **single-level, variable-partition allocator**
//! over an abstract address space `0..N`. No real memory is managed: the
//! addresses are bookkeeping only, which makes it a small playground for
//! first-fit placement, free-space coalescing and demand queuing.
//!
//! ## Overview
//!
//! ```text
//!   Address Space (N = 100):
//!
//!   0          30                   70                100
//!   ┌──────────┬────────────────────┬──────────────────┐
//!   │ Process 1│       Free         │    Process 2     │
//!   └──────────┴────────────────────┴──────────────────┘
//!
//!   Free list (list order, newest first):   [30..70]
//!   Process table:  2 -> [70..100]   1 -> [0..30]
//!   Admission queue (FIFO):  (3, 50) -> (4, 10)
//! ```
//!
//! Free ranges plus allocated blocks always tile `0..N` exactly.
//!
//! ## Crate Structure
//!
//! ```text
//!   rmemsim
//!   ├── block          - FreeRange / AllocatedBlock value types
//!   ├── address_space  - free list: first-fit, split, coalesce
//!   ├── process_table  - live processes and their blocks
//!   ├── queue          - FIFO of requests that did not fit
//!   ├── simulator      - Simulator session tying the three together
//!   ├── error          - SimError
//!   ├── command        - text command parser
//!   ├── report         - memory map and queue printers
//!   ├── shell          - read-eval-print loop
//!   ├── config         - startup options (clap)
//!   └── logging        - stderr backend for `log`
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use rmemsim::{Allocation, Simulator};
//!
//! let mut sim = Simulator::new(100);
//!
//! assert_eq!(sim.allocate(1, 60), Ok(Allocation::Granted(0)));
//! // 40 units left: the request waits in the admission queue.
//! assert_eq!(sim.allocate(2, 50), Ok(Allocation::Pending));
//!
//! // Freeing retries the oldest waiting request once.
//! let report = sim.free(1, 0).unwrap();
//! assert_eq!(report.retry.map(|retry| retry.outcome), Some(Allocation::Granted(0)));
//! ```
//!
//! ## How It Works
//!
//! Allocation scans the free list **in list order** and takes the first
//! range that is large enough. The low part of the range is handed out and
//! the range shrinks:
//!
//! ```text
//!   allocate(p, 20) on [40..100]:
//!
//!   before   ┌──────────────────────────────┐
//!            │ free 40..100                 │
//!            └──────────────────────────────┘
//!   after    ┌─────────┬────────────────────┐
//!            │ p 40..60│ free 60..100       │
//!            └─────────┴────────────────────┘
//! ```
//!
//! Freeing pushes the range at the **head** of the list and merges every
//! pair of address-contiguous ranges, wherever they sit in the list:
//!
//! ```text
//!   free(p, 40):   head -> [40..60] -> [0..40] -> [60..100]
//!   coalesce:      head -> [0..100]
//! ```
//!
//! A request that finds no fitting range is appended to the admission
//! queue. Every successful free then dequeues **exactly one** request and
//! retries it; if it still does not fit it goes to the back of the queue.
//!
//! ## Limitations
//!
//! - **Single-threaded**: a `Simulator` is driven by one caller at a time
//! - **No persistence**: state lives as long as the `Simulator` value
//! - **Oversized requests wait forever**: a request larger than the whole
//!   space is queued like any other and never admitted

pub mod address_space;
pub mod block;
pub mod command;
pub mod config;
pub mod error;
pub mod logging;
pub mod process_table;
pub mod queue;
pub mod report;
pub mod shell;
pub mod simulator;

pub use block::{Address, AllocatedBlock, FreeRange, Pid};
pub use command::{Command, ParseError};
pub use config::Config;
pub use error::SimError;
pub use queue::Request;
pub use report::{MemoryReport, QueueReport};
pub use shell::Shell;
pub use simulator::{
  Allocation, FreeReport, InvariantViolation, MEMORY_SIZE, Owner, Retry, Segment, Simulator, TerminateReport,
};
