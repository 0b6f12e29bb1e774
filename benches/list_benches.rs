use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mola_adlist::linked_list::prelude::*;
use rand::Rng;
use rand::seq::SliceRandom;
use std::hint::black_box;
use std::sync::{Arc, Barrier};
use std::thread;

const SAMPLE_SIZE: usize = 10_000;

// Enum to define the workload mix
enum Workload {
    PushHeavy, // 80% pushes, 20% pops
    PopHeavy,  // 20% pushes, 80% pops
    Mixed,     // 50% pushes, 50% pops
}

impl Workload {
    fn push_ratio(&self) -> u32 {
        match self {
            Workload::PushHeavy => 80,
            Workload::PopHeavy => 20,
            Workload::Mixed => 50,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Workload::PushHeavy => "push_heavy",
            Workload::PopHeavy => "pop_heavy",
            Workload::Mixed => "mixed",
        }
    }
}

fn filled(len: usize) -> (List<u64>, NodePool<u64>) {
    let mut pool = NodePool::try_with_capacity(len).unwrap();
    let mut list = List::new();
    for v in 0..len as u64 {
        list.add_tail(&mut pool, v).unwrap();
    }
    (list, pool)
}

// --- Single-threaded operations ---

fn append_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");
    group.throughput(Throughput::Elements(SAMPLE_SIZE as u64));

    group.bench_function(BenchmarkId::new("add_tail", SAMPLE_SIZE), |b| {
        b.iter(|| {
            let mut list = OwnedList::new();
            for v in 0..SAMPLE_SIZE as u64 {
                list.add_tail(v).unwrap();
            }
            black_box(list.len())
        });
    });

    group.bench_function(BenchmarkId::new("add_head_reserved", SAMPLE_SIZE), |b| {
        b.iter(|| {
            let mut list = OwnedList::try_with_capacity(SAMPLE_SIZE, Hooks::new()).unwrap();
            for v in 0..SAMPLE_SIZE as u64 {
                list.add_head(v).unwrap();
            }
            black_box(list.len())
        });
    });

    group.finish();
}

fn traversal_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal");
    let (list, pool) = filled(SAMPLE_SIZE);
    group.throughput(Throughput::Elements(SAMPLE_SIZE as u64));

    group.bench_function(BenchmarkId::new("iter", SAMPLE_SIZE), |b| {
        b.iter(|| black_box(list.iter(&pool).sum::<u64>()));
    });

    group.bench_function(BenchmarkId::new("cursor_from_tail", SAMPLE_SIZE), |b| {
        b.iter(|| {
            let mut cursor = list.cursor(&pool, Direction::FromTail);
            let mut count = 0usize;
            while let Some(node) = cursor.next(&pool) {
                count += black_box(node).index() & 1;
            }
            count
        });
    });

    group.bench_function(BenchmarkId::new("index_negative", SAMPLE_SIZE), |b| {
        let mut positions: Vec<isize> = (1..=SAMPLE_SIZE as isize).map(|i| -i).collect();
        positions.shuffle(&mut rand::rng());
        let mut next = positions.iter().cycle();
        b.iter(|| black_box(list.index(&pool, *next.next().unwrap())));
    });

    group.finish();
}

fn rotate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("rotate");
    let (mut list, mut pool) = filled(SAMPLE_SIZE);

    group.bench_function("tail_to_head", |b| {
        b.iter(|| list.rotate(&mut pool));
    });
    group.bench_function("head_to_tail", |b| {
        b.iter(|| list.rotate_head_to_tail(&mut pool));
    });

    group.finish();
}

fn join_and_dup_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("join_dup");

    group.bench_function(BenchmarkId::new("join", SAMPLE_SIZE), |b| {
        b.iter_with_setup(
            || {
                let mut pool = NodePool::try_with_capacity(2 * SAMPLE_SIZE).unwrap();
                let mut left = List::new();
                let mut right = List::new();
                for v in 0..SAMPLE_SIZE as u64 {
                    left.add_tail(&mut pool, v).unwrap();
                    right.add_tail(&mut pool, v).unwrap();
                }
                (left, right, pool)
            },
            |(mut left, mut right, mut pool)| {
                left.join(&mut pool, &mut right);
                black_box(left.len())
            },
        );
    });

    group.throughput(Throughput::Elements(SAMPLE_SIZE as u64));
    group.bench_function(BenchmarkId::new("dup", SAMPLE_SIZE), |b| {
        let (list, pool) = filled(SAMPLE_SIZE);
        let owned = {
            let mut owned = OwnedList::new();
            for v in list.iter(&pool) {
                owned.add_tail(*v).unwrap();
            }
            owned
        };
        b.iter(|| black_box(owned.dup().unwrap().len()));
    });

    group.finish();
}

// --- Benchmark for LockedList under contention ---

fn locked_list_benchmark(c: &mut Criterion, threads: usize, workload: Workload) {
    let mut group = c.benchmark_group(format!("LockedList_{}_threads", threads));
    let push_ratio = workload.push_ratio();
    group.throughput(Throughput::Elements(SAMPLE_SIZE as u64));

    group.bench_function(BenchmarkId::new(workload.name(), SAMPLE_SIZE), |b| {
        b.iter_with_setup(
            || {
                let shared = LockedList::new();
                shared.with(|list| {
                    for v in 0..SAMPLE_SIZE as u64 {
                        list.add_tail(v).unwrap();
                    }
                });
                (Arc::new(shared), Arc::new(Barrier::new(threads)))
            },
            |(shared, barrier)| {
                thread::scope(|s| {
                    for _ in 0..threads {
                        let shared = Arc::clone(&shared);
                        let barrier = Arc::clone(&barrier);

                        s.spawn(move || {
                            let mut rng = rand::rng();
                            barrier.wait();
                            for i in 0..SAMPLE_SIZE / threads {
                                if rng.random_range(0..100) < push_ratio {
                                    shared.lock().add_head(i as u64).unwrap();
                                } else {
                                    black_box(shared.lock().pop_tail());
                                }
                            }
                        });
                    }
                });
            },
        );
    });

    group.finish();
}

fn locked_list_small_pressure(c: &mut Criterion) {
    locked_list_benchmark(c, 2, Workload::Mixed);
    locked_list_benchmark(c, 2, Workload::PopHeavy);
    locked_list_benchmark(c, 2, Workload::PushHeavy);
}

fn locked_list_high_pressure(c: &mut Criterion) {
    locked_list_benchmark(c, 8, Workload::Mixed);
    locked_list_benchmark(c, 8, Workload::PopHeavy);
    locked_list_benchmark(c, 8, Workload::PushHeavy);
}

criterion_group!(
    benches,
    append_benchmark,
    traversal_benchmark,
    rotate_benchmark,
    join_and_dup_benchmark,
    locked_list_small_pressure,
    locked_list_high_pressure
);
criterion_main!(benches);
