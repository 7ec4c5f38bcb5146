// File: crates/drops-render-skia/tests/common/mod.rs
// Purpose: Shared fixtures: a small registry, a four-bucket log and a mounted orchestrator.

#![allow(dead_code)]

use std::rc::Rc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use drops_core::{CategoryMetadata, ChartDataModel, DropEvent, StaticRegistry, Viewport};
use drops_render_skia::{RasterCanvas, SkiaDrawRoutine, SkiaOrchestrator, VectorCanvas};

pub const WIDTH: i32 = 480;
pub const HEIGHT: i32 = 240;

pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
}

pub fn registry() -> StaticRegistry {
    StaticRegistry::new()
        .with("afk", CategoryMetadata::new("AFK", "#f5a623", "#b37400"))
        .with("ban", CategoryMetadata::new("Banned", "#d0021b", "#8b0012"))
}

/// Four hourly buckets: afk 3 / ban 1, afk 1, empty, ban 2.
pub fn sample_data() -> ChartDataModel {
    let at = |m: i64| start() + Duration::minutes(m);
    let events = vec![
        DropEvent::new(at(1), "afk"),
        DropEvent::new(at(2), "afk"),
        DropEvent::new(at(3), "afk"),
        DropEvent::new(at(4), "ban"),
        DropEvent::new(at(65), "afk"),
        DropEvent::new(at(190), "ban"),
        DropEvent::new(at(200), "ban"),
    ];
    ChartDataModel::bucketize("Last 4 hours", start(), start() + Duration::hours(4), Duration::hours(1), &events)
        .unwrap()
}

pub fn orchestrator_with(registry: StaticRegistry, data: ChartDataModel) -> SkiaOrchestrator {
    let mut orch = SkiaOrchestrator::new(SkiaDrawRoutine::default(), Rc::new(registry));
    orch.mount_vector(VectorCanvas::new());
    orch.mount_raster(RasterCanvas::new());
    orch.set_size(Viewport::new(WIDTH, HEIGHT));
    orch.set_data(data).unwrap();
    orch
}

pub fn orchestrator() -> SkiaOrchestrator {
    orchestrator_with(registry(), sample_data())
}

/// `0xAARRGGBB` from CSS-style hex.
pub fn argb(hex: u32) -> u32 {
    0xFF00_0000 | hex
}
