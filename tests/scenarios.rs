//! End-to-end scenarios driven through the public `Simulator` API and the
//! shell.

use std::io::Cursor;

use rmemsim::{Allocation, FreeRange, Owner, Segment, Shell, SimError, Simulator};

#[test]
fn test_waiting_request_admitted_after_free() {
  let mut sim = Simulator::new(100);

  assert_eq!(sim.allocate(1, 60), Ok(Allocation::Granted(0)));
  assert_eq!(sim.allocate(2, 50), Ok(Allocation::Pending));
  assert_eq!(sim.queue().len(), 1);

  let report = sim.free(1, 0).expect("process 1 owns address 0");
  assert_eq!(report.size, 60);
  assert_eq!(
    report.retry.map(|retry| retry.outcome),
    Some(Allocation::Granted(0))
  );

  assert_eq!(
    sim.memory_map(),
    vec![
      Segment {
        start: 0,
        size: 50,
        owner: Owner::Process(2),
      },
      Segment {
        start: 50,
        size: 50,
        owner: Owner::Free,
      },
    ]
  );
  assert!(sim.processes().find(1).is_none());
  assert!(sim.queue().is_empty());
}

#[test]
fn test_create_then_terminate_without_memory() {
  let mut sim = Simulator::new(100);

  sim.create_process(5);
  assert!(sim.processes().find(5).is_some());

  let report = sim.terminate_process(5).expect("process 5 was created");
  assert!(report.freed.is_empty());
  assert!(sim.processes().is_empty());
  assert_eq!(sim.free_ranges(), &[FreeRange::new(0, 100)]);
}

#[test]
fn test_free_for_unknown_process() {
  let mut sim = Simulator::new(100);
  sim.allocate(1, 10).expect("valid size");
  let before = sim.memory_map();

  assert_eq!(sim.free(3, 10), Err(SimError::ProcessNotFound(3)));
  assert_eq!(sim.memory_map(), before);
}

#[test]
fn test_negative_size_rejected() {
  let mut sim = Simulator::new(100);

  assert_eq!(sim.allocate(1, -5), Err(SimError::InvalidSize(-5)));
  assert!(sim.queue().is_empty());
  assert!(sim.processes().is_empty());
  assert_eq!(sim.free_ranges(), &[FreeRange::new(0, 100)]);
}

#[test]
fn test_first_fit_prefers_list_order_over_address_order() {
  let mut sim = Simulator::new(100);
  sim.allocate(1, 10).expect("valid size");
  sim.allocate(2, 10).expect("valid size");
  sim.allocate(3, 30).expect("valid size");
  sim.allocate(4, 10).expect("valid size");

  // Free list after these frees, head first: [20..50], [0..10], [60..100].
  sim.free(1, 0).expect("block at 0");
  sim.free(3, 20).expect("block at 20");
  assert_eq!(
    sim.free_ranges(),
    &[FreeRange::new(20, 30), FreeRange::new(0, 10), FreeRange::new(60, 40)]
  );

  // Both [20..50] and [0..10] fit 5 units; the head of the list wins.
  assert_eq!(sim.allocate(5, 5), Ok(Allocation::Granted(20)));
}

#[test]
fn test_later_small_request_does_not_overtake() {
  let mut sim = Simulator::new(100);
  sim.allocate(1, 20).expect("valid size");
  sim.allocate(2, 80).expect("valid size");
  sim.allocate(3, 50).expect("valid size");
  sim.allocate(4, 10).expect("valid size");

  // 20 units come back: 4 would fit, but 3 is first in line.
  let report = sim.free(1, 0).expect("block at 0");
  let retry = report.retry.expect("queue was not empty");
  assert_eq!(retry.request.pid, 3);
  assert_eq!(retry.outcome, Allocation::Pending);
  assert!(sim.processes().find(4).is_none());
}

#[test]
fn test_shell_session() {
  let script = "\
create 5
allocate 1 65536
allocate 2 100
show queue
free 1 0
show memory
terminate 5
terminate 5
exit
";
  let mut sim = Simulator::default();
  let mut output = Vec::new();

  Shell::new(false)
    .run(&mut sim, Cursor::new(script), &mut output)
    .expect("in-memory I/O");
  let out = String::from_utf8(output).expect("utf-8 output");

  assert!(out.starts_with("Welcome to Memory Management Simulator!\n"));
  assert!(out.contains("Allocated 65536 bytes to process 1 at address 0."));
  assert!(out.contains("Process 2 (100 units)"));
  assert!(out.contains("Process 2 is no longer waiting and is being allocated memory."));
  assert!(out.contains("|             0 |            99 | Process 2       |"));
  assert!(out.contains("|           100 |         65535 | Free            |"));
  assert!(out.contains("Process 5 terminated."));
  assert!(out.contains("Process 5 not found."));
  assert!(out.ends_with("Exiting simulator.\n"));
}
