// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use toast_queue::{Notification, NotificationQueue};

fn queue_ops_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue_ops");

    group.bench_function("add_dismiss_100", |b| {
        b.iter(|| {
            let mut queue = NotificationQueue::new();
            let keys: Vec<_> = (0..100)
                .map(|i| queue.add(Notification::new(format!("toast-{i}"))).unwrap())
                .collect();
            for key in keys {
                queue.dismiss(black_box(key));
            }
        });
    });

    group.bench_function("snapshot_100", |b| {
        let mut queue = NotificationQueue::new();
        for i in 0..100 {
            queue.add(Notification::new(format!("toast-{i}"))).unwrap();
        }
        b.iter(|| {
            let _ = black_box(queue.snapshot());
        });
    });

    group.finish();
}

criterion_group!(benches, queue_ops_benchmark);
criterion_main!(benches);
