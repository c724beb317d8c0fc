use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use osrb_tree::{OSRBTreeMap, OSRBTreeSet};
use std::collections::{BTreeMap, BTreeSet};

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for a deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

// ─── Map benchmarks ─────────────────────────────────────────────────────────

fn bench_map_insert_ordered(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_insert_ordered");

    group.bench_function(BenchmarkId::new("OSRBTreeMap", N), |b| {
        b.iter(|| {
            let mut map = OSRBTreeMap::new();
            for i in 0..N as i64 {
                map.insert(i, i);
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for i in 0..N as i64 {
                map.insert(i, i);
            }
            map
        });
    });

    group.finish();
}

fn bench_map_insert_reverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_insert_reverse");

    group.bench_function(BenchmarkId::new("OSRBTreeMap", N), |b| {
        b.iter(|| {
            let mut map = OSRBTreeMap::new();
            for i in (0..N as i64).rev() {
                map.insert(i, i);
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for i in (0..N as i64).rev() {
                map.insert(i, i);
            }
            map
        });
    });

    group.finish();
}

fn bench_map_insert_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("map_insert_random");

    group.bench_function(BenchmarkId::new("OSRBTreeMap", N), |b| {
        b.iter(|| {
            let mut map = OSRBTreeMap::new();
            for &k in &keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for &k in &keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.finish();
}

fn bench_map_get_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let os_map: OSRBTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("map_get_random");

    group.bench_function(BenchmarkId::new("OSRBTreeMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for k in &keys {
                if let Ok(&v) = os_map.get(k) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for k in &keys {
                if let Some(&v) = bt_map.get(k) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.finish();
}

fn bench_map_remove_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let os_map: OSRBTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("map_remove_random");

    group.bench_function(BenchmarkId::new("OSRBTreeMap", N), |b| {
        b.iter_batched(
            || os_map.clone(),
            |mut map| {
                for k in &keys {
                    map.remove(k);
                }
                map
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter_batched(
            || bt_map.clone(),
            |mut map| {
                for k in &keys {
                    map.remove(k);
                }
                map
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_map_iterate(c: &mut Criterion) {
    let keys = ordered_keys(N);
    let os_map: OSRBTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("map_iterate");

    group.bench_function(BenchmarkId::new("OSRBTreeMap", N), |b| {
        b.iter(|| os_map.iter().map(|(_, &v)| v).sum::<i64>());
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| bt_map.iter().map(|(_, &v)| v).sum::<i64>());
    });

    group.finish();
}

// ─── Order-statistic benchmarks ─────────────────────────────────────────────

// BTreeMap has no rank/select; the baseline pays the linear iterator walk.

fn bench_map_select(c: &mut Criterion) {
    let keys = random_keys(N);
    let os_map: OSRBTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let len = os_map.len();

    let mut group = c.benchmark_group("map_select");

    group.bench_function(BenchmarkId::new("OSRBTreeMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for rank in (0..len).step_by(64) {
                let (_, &v) = os_map.select(rank).expect("rank in range");
                sum = sum.wrapping_add(v);
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap::iter().nth", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for rank in (0..len).step_by(64) {
                let (_, &v) = bt_map.iter().nth(rank).expect("rank in range");
                sum = sum.wrapping_add(v);
            }
            sum
        });
    });

    group.finish();
}

fn bench_map_rank(c: &mut Criterion) {
    let keys = random_keys(N);
    let os_map: OSRBTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("map_rank");

    group.bench_function(BenchmarkId::new("OSRBTreeMap", N), |b| {
        b.iter(|| {
            let mut sum = 0usize;
            for k in keys.iter().step_by(64) {
                sum = sum.wrapping_add(os_map.rank(k));
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap::range().count", N), |b| {
        b.iter(|| {
            let mut sum = 0usize;
            for k in keys.iter().step_by(64) {
                sum = sum.wrapping_add(bt_map.range(..*k).count());
            }
            sum
        });
    });

    group.finish();
}

// ─── Set benchmarks ─────────────────────────────────────────────────────────

fn bench_set_insert_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("set_insert_random");

    group.bench_function(BenchmarkId::new("OSRBTreeSet", N), |b| {
        b.iter(|| {
            let mut set = OSRBTreeSet::new();
            for &k in &keys {
                set.insert(k);
            }
            set
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for &k in &keys {
                set.insert(k);
            }
            set
        });
    });

    group.finish();
}

fn bench_set_contains(c: &mut Criterion) {
    let keys = random_keys(N);
    let os_set: OSRBTreeSet<i64> = keys.iter().copied().collect();
    let bt_set: BTreeSet<i64> = keys.iter().copied().collect();

    let mut group = c.benchmark_group("set_contains");

    group.bench_function(BenchmarkId::new("OSRBTreeSet", N), |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for k in &keys {
                if os_set.contains(k) {
                    hits += 1;
                }
            }
            hits
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for k in &keys {
                if bt_set.contains(k) {
                    hits += 1;
                }
            }
            hits
        });
    });

    group.finish();
}

fn bench_from_sorted(c: &mut Criterion) {
    let keys = ordered_keys(N);
    let mut group = c.benchmark_group("from_sorted");

    group.bench_function(BenchmarkId::new("OSRBTreeSet::from_sorted_iter", N), |b| {
        b.iter(|| OSRBTreeSet::from_sorted_iter(keys.iter().copied()));
    });

    group.bench_function(BenchmarkId::new("OSRBTreeSet::collect", N), |b| {
        b.iter(|| keys.iter().copied().collect::<OSRBTreeSet<i64>>());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_map_insert_ordered,
    bench_map_insert_reverse,
    bench_map_insert_random,
    bench_map_get_random,
    bench_map_remove_random,
    bench_map_iterate,
    bench_map_select,
    bench_map_rank,
    bench_set_insert_random,
    bench_set_contains,
    bench_from_sorted,
);
criterion_main!(benches);
