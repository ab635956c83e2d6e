use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rask_buffer::{BlockingBuffer, Buffer, FifoBuffer, PriorityBuffer};
use std::hint::black_box;
use std::thread;

fn bench_fifo_push_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("fifo_push_pop");

    for &size in [1000usize, 10000, 100000].iter() {
        group.throughput(Throughput::Elements(size as u64 * 2)); // Both push and pop
        group.bench_with_input(BenchmarkId::new("unbounded", size), &size, |b, &size| {
            b.iter(|| {
                let mut buffer = FifoBuffer::unbounded();
                for i in 0..size {
                    buffer.add(black_box(i)).expect("unbounded add");
                }
                while let Ok(item) = buffer.remove() {
                    black_box(item);
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("circular", size), &size, |b, &size| {
            b.iter(|| {
                let mut buffer =
                    FifoBuffer::circular(1024).expect("Failed to create circular buffer");
                for i in 0..size {
                    buffer.add(black_box(i)).expect("circular add");
                }
                while let Ok(item) = buffer.remove() {
                    black_box(item);
                }
            });
        });
    }
    group.finish();
}

fn bench_remove_item(c: &mut Criterion) {
    let mut group = c.benchmark_group("fifo_remove_item");

    for &size in [100usize, 1000, 10000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut buffer =
                    FifoBuffer::bounded(size).expect("Failed to create bounded buffer");
                buffer.add_all((0..size).collect()).expect("bounded add_all");
                // Alternate between the head and tail halves.
                for i in 0..size / 2 {
                    let target = if i % 2 == 0 { i } else { size - i };
                    black_box(buffer.remove_item(&target));
                }
            });
        });
    }
    group.finish();
}

fn bench_priority_push_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("priority_push_pop");

    for &size in [1000usize, 10000, 100000].iter() {
        group.throughput(Throughput::Elements(size as u64 * 2));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut buffer = PriorityBuffer::with_order(false);
                for i in 0..size {
                    // Scatter insertion order
                    buffer.add(black_box((i * 7919) % size)).expect("priority add");
                }
                while let Ok(item) = buffer.remove() {
                    black_box(item);
                }
            });
        });
    }
    group.finish();
}

fn bench_blocking_handoff(c: &mut Criterion) {
    let mut group = c.benchmark_group("blocking_handoff");

    for &producers in [1usize, 2, 4].iter() {
        let per_producer = 10000usize;
        group.throughput(Throughput::Elements((producers * per_producer) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(producers),
            &producers,
            |b, &producers| {
                b.iter(|| {
                    let buffer = BlockingBuffer::new(FifoBuffer::unbounded());
                    let handles: Vec<_> = (0..producers)
                        .map(|_| {
                            let buffer = buffer.clone();
                            thread::spawn(move || {
                                for i in 0..per_producer {
                                    buffer.add(i).expect("blocking add");
                                }
                            })
                        })
                        .collect();

                    for _ in 0..producers * per_producer {
                        black_box(buffer.remove().expect("blocking remove"));
                    }
                    for handle in handles {
                        handle.join().expect("producer thread panicked");
                    }
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_fifo_push_pop,
    bench_remove_item,
    bench_priority_push_pop,
    bench_blocking_handoff
);
criterion_main!(benches);
