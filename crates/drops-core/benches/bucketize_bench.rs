use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use drops_core::{ChartDataModel, DropEvent};

const CATEGORIES: [&str; 5] = ["afk", "ban", "idle", "kick", "timeout"];

fn gen_events(n: usize) -> Vec<DropEvent> {
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
    (0..n)
        .map(|i| {
            let secs = (i as i64 * 7919) % (7 * 24 * 3600);
            DropEvent::new(start + Duration::seconds(secs), CATEGORIES[i % CATEGORIES.len()])
        })
        .collect()
}

fn bench_bucketize(c: &mut Criterion) {
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
    let end = start + Duration::days(7);
    let mut group = c.benchmark_group("bucketize");
    for &n in &[10_000usize, 200_000usize] {
        let events = gen_events(n);
        group.bench_function(format!("hourly_{n}"), |b| {
            b.iter(|| {
                let m = ChartDataModel::bucketize("7d", start, end, Duration::hours(1), black_box(&events));
                black_box(m)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_bucketize);
criterion_main!(benches);
