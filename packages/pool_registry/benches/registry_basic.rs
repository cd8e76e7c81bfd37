//! Basic benchmarks for the `pool_registry` crate.
#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use pool_registry::PoolRegistry;
use recycle_pool::Poolable;

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

fn test_item() -> Result<TestItem, recycle_pool::FabricationError> {
    Ok(TestItem {
        payload: Vec::with_capacity(1024),
    })
}

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry_basic");

    group.bench_function("get_return_hot", |b| {
        let registry = PoolRegistry::new();
        registry
            .create_pool("bench", 1, test_item)
            .expect("test factory is infallible");

        b.iter(|| {
            let item = registry
                .get_object("bench", test_item)
                .expect("reuse cannot fail");
            registry
                .return_object("bench", black_box(item))
                .expect("the pool exists and the type matches");
        });
    });

    group.bench_function("create_destroy", |b| {
        let registry = PoolRegistry::new();

        b.iter(|| {
            registry
                .create_pool("bench", 4, test_item)
                .expect("the key is absent on every iteration");
            registry
                .destroy_pool("bench")
                .expect("the pool was just created");
        });
    });

    group.finish();
}
