use core::hint::black_box;
use core::time::Duration;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use frostid::{BasicFrostGenerator, IdGenStatus, LockFrostGenerator, MachineId, TimeSource};

struct FixedMockTime {
    millis: u64,
}

impl TimeSource<u64> for FixedMockTime {
    fn current_millis(&self) -> u64 {
        self.millis
    }
}

// Number of IDs generated per benchmark iteration. A fresh generator per
// iteration keeps every poll on the `Ready` hot path: one rollover, then
// sequence increments up to the field's capacity.
const TOTAL_IDS: usize = 4096;

fn machine() -> MachineId {
    MachineId::new(0, 0).expect("valid machine id")
}

fn bench_basic_generator(c: &mut Criterion) {
    let mut group = c.benchmark_group("basic");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            let generator = BasicFrostGenerator::with_time_source(
                machine(),
                Duration::ZERO,
                FixedMockTime { millis: 1 },
            );
            for _ in 0..TOTAL_IDS {
                match generator.poll_id() {
                    IdGenStatus::Ready { id } => {
                        black_box(id);
                    }
                    IdGenStatus::Pending { .. } => unreachable!(),
                }
            }
        })
    });

    group.finish();
}

fn bench_lock_generator(c: &mut Criterion) {
    let mut group = c.benchmark_group("lock");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            let generator = LockFrostGenerator::with_time_source(
                machine(),
                Duration::ZERO,
                FixedMockTime { millis: 1 },
            );
            for _ in 0..TOTAL_IDS {
                match generator.try_poll_id().expect("not poisoned") {
                    IdGenStatus::Ready { id } => {
                        black_box(id);
                    }
                    IdGenStatus::Pending { .. } => unreachable!(),
                }
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_basic_generator, bench_lock_generator);
criterion_main!(benches);
