//! AdCounterManager 性能基准测试

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use regionportal::ads::{AdCounter, AdCounterManager, CounterSink, MountId};
use std::sync::Arc;
use tokio::time::Duration;

/// 空 sink，只用于测试计数性能
struct NoopSink;

#[async_trait::async_trait]
impl CounterSink for NoopSink {
    async fn flush_counters(&self, _updates: Vec<(AdCounter, u64)>) -> anyhow::Result<()> {
        Ok(())
    }
}

fn create_manager() -> AdCounterManager {
    AdCounterManager::new(
        Arc::new(NoopSink) as Arc<dyn CounterSink>,
        Duration::from_secs(3600), // 长间隔，避免自动刷盘
        usize::MAX,                // 高阈值，避免阈值刷盘
        Duration::from_secs(1800),
    )
}

fn bench_record_click(c: &mut Criterion) {
    let manager = create_manager();

    c.bench_function("record_click/single_ad", |b| {
        b.iter(|| {
            manager.record_click(42);
        });
    });
}

/// 同一挂载的重复曝光只做去重查询
fn bench_record_view_deduplicated(c: &mut Criterion) {
    let manager = create_manager();
    let mount = MountId::from("bench-mount".to_string());
    manager.record_view(7, &mount);

    c.bench_function("record_view/same_mount", |b| {
        b.iter(|| {
            manager.record_view(7, &mount);
        });
    });
}

fn bench_record_view_new_mounts(c: &mut Criterion) {
    let manager = create_manager();
    let mounts: Vec<MountId> = (0..10_000).map(|_| MountId::new()).collect();
    let mut idx = 0;

    c.bench_function("record_view/new_mounts", |b| {
        b.iter(|| {
            manager.record_view((idx % 50) as i32, &mounts[idx % mounts.len()]);
            idx += 1;
        });
    });
}

fn bench_concurrent_clicks(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("record_click/concurrent");

    for num_tasks in [2, 4, 8] {
        group.throughput(Throughput::Elements(1000));
        group.bench_with_input(
            BenchmarkId::new("tasks", num_tasks),
            &num_tasks,
            |b, &num_tasks| {
                b.to_async(&rt).iter(|| async {
                    let manager = create_manager();
                    let mut handles = vec![];

                    for t in 0..num_tasks {
                        let mgr = manager.clone();
                        handles.push(tokio::spawn(async move {
                            for _ in 0..1000 / num_tasks {
                                mgr.record_click(t);
                            }
                        }));
                    }

                    for handle in handles {
                        handle.await.unwrap();
                    }
                });
            },
        );
    }
    group.finish();
}

fn bench_flush(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("flush/1000_ads", |b| {
        b.to_async(&rt).iter(|| async {
            let manager = create_manager();
            for id in 0..1000 {
                manager.record_click(id);
            }
            manager.flush().await;
        });
    });
}

criterion_group!(
    benches,
    bench_record_click,
    bench_record_view_deduplicated,
    bench_record_view_new_mounts,
    bench_concurrent_clicks,
    bench_flush
);
criterion_main!(benches);
