//! Criterion benchmark for single-producer/single-consumer throughput.
//!
//! Run: cargo bench --bench bench_inbox

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::sync::Arc;
use std::thread;

use ringmesh::Inbox;

const CAPACITY: usize = 1024;

fn spsc_spin(events: u64) -> u64 {
    let inbox = Inbox::<u64>::new(CAPACITY, "bench").unwrap();

    let consumer_inbox = Arc::clone(&inbox);
    let consumer = thread::spawn(move || {
        let mut count = 0u64;
        while count < events {
            black_box(consumer_inbox.read_spin());
            count += 1;
        }
    });

    for i in 0..events {
        inbox.write_spin(i);
    }
    consumer.join().unwrap();
    events
}

fn spsc_try(events: u64) -> u64 {
    let inbox = Inbox::<u64>::new(CAPACITY, "bench-try").unwrap();

    let consumer_inbox = Arc::clone(&inbox);
    let consumer = thread::spawn(move || {
        let mut count = 0u64;
        while count < events {
            if let Some(value) = consumer_inbox.try_read() {
                black_box(value);
                count += 1;
            } else {
                std::hint::spin_loop();
            }
        }
    });

    for i in 0..events {
        while !inbox.try_write(i) {
            std::hint::spin_loop();
        }
    }
    consumer.join().unwrap();
    events
}

fn bench_spsc(c: &mut Criterion) {
    let mut group = c.benchmark_group("spsc");
    for events in [10_000u64, 100_000] {
        group.throughput(Throughput::Elements(events));
        group.bench_with_input(BenchmarkId::new("spin", events), &events, |b, &events| {
            b.iter(|| spsc_spin(events));
        });
        group.bench_with_input(BenchmarkId::new("try", events), &events, |b, &events| {
            b.iter(|| spsc_try(events));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_spsc);
criterion_main!(benches);
