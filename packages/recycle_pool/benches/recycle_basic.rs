//! Basic benchmarks for the `recycle_pool` crate.
#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use recycle_pool::{Poolable, RecyclePool};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

struct TestItem {
    payload: Vec<u8>,
}

impl Poolable for TestItem {
    fn reset(&mut self) {
        self.payload.clear();
    }
}

fn new_pool(initial_size: usize) -> RecyclePool<TestItem> {
    RecyclePool::new(initial_size, || {
        Ok(TestItem {
            payload: Vec::with_capacity(1024),
        })
    })
    .expect("test factory is infallible")
}

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("recycle_basic");

    group.bench_function("build_empty", |b| {
        b.iter(|| black_box(new_pool(0)));
    });

    group.bench_function("acquire_release_reuse", |b| {
        let mut pool = new_pool(1);

        b.iter(|| {
            let item = pool.acquire().expect("reuse cannot fail");
            pool.release(black_box(item));
        });
    });

    group.bench_function("acquire_release_fabricate", |b| {
        // Every iteration drains first, so each acquire pays the fabrication path.
        let mut pool = new_pool(0);

        b.iter(|| {
            pool.drain();
            let item = pool.acquire().expect("test factory is infallible");
            pool.release(black_box(item));
        });
    });

    group.finish();
}
