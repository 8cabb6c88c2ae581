use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rmemsim::{Allocation, Simulator};

/// Allocates `count` blocks of mixed sizes, then frees every other one and
/// refills the holes, so the free list stays fragmented.
fn churn(count: usize) {
  let mut sim = Simulator::default();
  let mut granted = Vec::with_capacity(count);

  for i in 0..count {
    let pid = (i % 16) as i32;
    let size = 16 + (i * 37) % 240;
    if let Ok(Allocation::Granted(address)) = sim.allocate(pid, size as i64) {
      granted.push((pid, address));
    }
  }
  for &(pid, address) in granted.iter().step_by(2) {
    let _ = sim.free(pid, address);
  }
  for i in 0..count / 2 {
    let _ = sim.allocate((i % 16) as i32, 8 + (i % 64) as i64);
  }

  black_box(sim.free_ranges().len());
}

fn bench_churn(c: &mut Criterion) {
  let mut group = c.benchmark_group("churn");
  for count in [64, 256, 1024] {
    group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
      b.iter(|| churn(black_box(count)))
    });
  }
  group.finish();
}

criterion_group!(benches, bench_churn);
criterion_main!(benches);
