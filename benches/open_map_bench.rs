use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use probe_map::OpenAddressingMap;
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn filled(seed: u64, n: usize) -> (OpenAddressingMap<String, u64>, Vec<String>) {
    let mut m = OpenAddressingMap::new();
    let keys: Vec<_> = lcg(seed).take(n).map(key).collect();
    for (i, k) in keys.iter().enumerate() {
        m.insert(k.clone(), i as u64);
    }
    (m, keys)
}

// Starts from the default 4 slots, so this includes every doubling.
fn bench_insert_with_growth(c: &mut Criterion) {
    c.bench_function("open_map_insert_10k", |b| {
        let keys: Vec<_> = lcg(1).take(10_000).map(key).collect();
        b.iter_batched(
            || keys.clone(),
            |keys| {
                let mut m = OpenAddressingMap::new();
                for (i, k) in keys.into_iter().enumerate() {
                    m.insert(k, i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("open_map_get_hit", |b| {
        let (m, keys) = filled(7, 20_000);
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.get(k.as_str()).unwrap());
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("open_map_get_miss", |b| {
        let (m, _) = filled(11, 10_000);
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            // generate keys unlikely in map
            let k = key(miss.next().unwrap());
            black_box(m.contains_key(k.as_str()));
        })
    });
}

// Remove then re-insert: tombstones build up until the next doubling
// clears them.
fn bench_remove_insert_churn(c: &mut Criterion) {
    c.bench_function("open_map_remove_insert_churn", |b| {
        let (mut m, keys) = filled(13, 5_000);
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            let v = m.remove(k.as_str()).unwrap();
            m.insert(k.clone(), black_box(v));
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert_with_growth, bench_get_hit, bench_get_miss, bench_remove_insert_churn
}
criterion_main!(benches);
