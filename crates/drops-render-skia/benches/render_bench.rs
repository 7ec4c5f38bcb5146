use std::rc::Rc;

use anyhow::Result;
use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, black_box, Criterion};
use drops_core::{CategoryMetadata, ChartDataModel, DropEvent, StaticRegistry, ThemeMode, Viewport};
use drops_render_skia::{Composite, RasterCanvas, SkiaDrawRoutine, SkiaOrchestrator, VectorCanvas};

const CATEGORIES: [(&str, &str); 4] = [("afk", "#f5a623"), ("ban", "#d0021b"), ("idle", "#4a90e2"), ("quit", "#7ed321")];

fn build(buckets: i64) -> Result<SkiaOrchestrator> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut registry = StaticRegistry::new();
    for (id, color) in CATEGORIES {
        registry.insert(id, CategoryMetadata::new(id.to_uppercase(), color, "#222222"));
    }
    let events: Vec<DropEvent> = (0..buckets * 20)
        .map(|i| DropEvent::new(start + Duration::minutes(i * 3), CATEGORIES[(i % 7 % 4) as usize].0))
        .collect();
    let data = ChartDataModel::bucketize("bench", start, start + Duration::hours(buckets), Duration::hours(1), &events)?;

    let mut orch = SkiaOrchestrator::new(SkiaDrawRoutine::default(), Rc::new(registry));
    orch.mount_vector(VectorCanvas::new());
    orch.mount_raster(RasterCanvas::new());
    orch.set_size(Viewport::new(1200, 500));
    orch.set_data(data)?;
    Ok(orch)
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_and_compose");
    for &n in &[48i64, 720i64] {
        group.bench_function(format!("buckets_{n}"), |b| {
            let mut orch = build(n).expect("bench fixture");
            let mut out = Composite::new(1200, 500).expect("composite");
            let mut theme = ThemeMode::Dark;
            b.iter(|| -> Result<()> {
                theme = theme.toggled();
                orch.set_theme(theme);
                black_box(orch.evaluate());
                let layout = *orch.layout();
                if let Some((_, vector, raster)) = orch.surfaces_mut() {
                    out.compose(vector, raster, &layout, theme)?;
                }
                black_box(out.argb()?);
                Ok(())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
