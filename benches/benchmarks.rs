use casebook::{FileStore, Patch, Record, RecordStore};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use std::hint::black_box;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Serialize, Deserialize)]
struct Row {
    id: String,
    owner: String,
    value: i64,
}

impl Record for Row {
    fn id(&self) -> &str {
        &self.id
    }
}

fn bench_dir(name: &str, size: usize) -> PathBuf {
    std::env::temp_dir().join(format!("casebook_bench_{}_{}", name, size))
}

fn seeded(name: &str, size: usize) -> (PathBuf, FileStore<Row>) {
    let dir = bench_dir(name, size);
    let _ = std::fs::remove_dir_all(&dir);
    let store = FileStore::<Row>::open(&dir, "rows.json");
    let rows: Vec<Row> = (0..size)
        .map(|i| Row {
            id: format!("r{i}"),
            owner: format!("u{}", i % 10),
            value: i as i64,
        })
        .collect();
    store.write_all(&rows).unwrap();
    (dir, store)
}

fn bench_read_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_all");
    for size in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("file", size), &size, |b, &size| {
            let (dir, store) = seeded("read", size);
            b.iter(|| black_box(store.read_all().unwrap()));
            let _ = std::fs::remove_dir_all(&dir);
        });
    }
}

fn bench_find_many(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_many");
    for size in [100, 1000] {
        group.bench_with_input(BenchmarkId::new("file", size), &size, |b, &size| {
            let (dir, store) = seeded("find", size);
            b.iter(|| black_box(store.find_many(&|r: &Row| r.owner == "u3").unwrap()));
            let _ = std::fs::remove_dir_all(&dir);
        });
    }
}

fn bench_create_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_delete");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(8));
    for size in [100, 1000] {
        group.bench_with_input(BenchmarkId::new("file", size), &size, |b, &size| {
            let (dir, store) = seeded("create", size);
            b.iter(|| {
                store
                    .create(Row {
                        id: "fresh".into(),
                        owner: "bench".into(),
                        value: -1,
                    })
                    .unwrap();
                store.delete(&|r: &Row| r.id == "fresh").unwrap();
            });
            let _ = std::fs::remove_dir_all(&dir);
        });
    }
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");
    for size in [100, 1000] {
        group.bench_with_input(BenchmarkId::new("file", size), &size, |b, &size| {
            let (dir, store) = seeded("update", size);
            let target = format!("r{}", size / 2);
            let patch = Patch::new().set("value", 42);
            b.iter(|| store.update(&|r: &Row| r.id == target, &patch).unwrap());
            let _ = std::fs::remove_dir_all(&dir);
        });
    }
}

criterion_group!(
    benches,
    bench_read_all,
    bench_find_many,
    bench_create_delete,
    bench_update,
);
criterion_main!(benches);
