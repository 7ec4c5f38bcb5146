// File: crates/drops-render-skia/tests/failure.rs
// Purpose: Drawing failures from the Skia routine surface as the error panel, and retry recovers.

mod common;

use chrono::Duration;
use drops_core::{CategoryMetadata, ChartDataModel, ChartView, Evaluation, LogBucket, ThemeMode};
use drops_render_skia::{retry_button, Composite};

use common::{argb, orchestrator, orchestrator_with, registry, sample_data, start, HEIGHT, WIDTH};

#[test]
fn invalid_color_fails_with_message() {
    let reg = registry().with("afk", CategoryMetadata::new("AFK", "not-a-color", "#000"));
    let mut orch = orchestrator_with(reg, sample_data());
    assert_eq!(orch.evaluate(), Evaluation::Failed);
    assert_eq!(
        orch.state().error_message.as_deref(),
        Some("invalid color `not-a-color` for category `afk`")
    );

    let ChartView::Error(panel) = orch.view() else { panic!("expected error panel") };
    assert_eq!(panel.message, "Render Error: invalid color `not-a-color` for category `afk`");
    assert_eq!(panel.retry_label, "Retry");
    assert_eq!(panel.rect.width(), WIDTH);

    let mut out = Composite::new(WIDTH, HEIGHT).unwrap();
    out.error_panel(&panel, ThemeMode::Dark);
    let px = out.argb().unwrap();
    assert_eq!(px[0], argb(0x1e1012));
    let b = retry_button(panel.rect);
    let mid = ((b.top + b.bottom) / 2 * WIDTH + b.left + 3) as usize;
    assert_eq!(px[mid], argb(0x40a0ff));
}

#[test]
fn inverted_period_is_reported() {
    let t = start();
    let data = ChartDataModel::new(
        "broken",
        t,
        t - Duration::hours(1),
        1.0,
        vec!["afk".into()],
        vec![LogBucket::new(t).with("afk", 1.0)],
    );
    let mut orch = orchestrator_with(registry(), data);
    assert_eq!(orch.evaluate(), Evaluation::Failed);
    let msg = orch.state().error_message.clone().unwrap();
    assert!(msg.starts_with("period `broken` ends at"), "{msg}");
}

#[test]
fn non_finite_maximum_fails() {
    let mut data = sample_data();
    data.max_drops = f64::NAN;
    let mut orch = orchestrator_with(registry(), data);
    assert_eq!(orch.evaluate(), Evaluation::Failed);
    assert_eq!(orch.state().error_message.as_deref(), Some("invalid max drops value NaN"));
}

#[test]
fn retry_counts_then_recovers() {
    let mut bad = sample_data();
    bad.max_drops = -1.0;
    let mut orch = orchestrator_with(registry(), bad);
    assert_eq!(orch.evaluate(), Evaluation::Failed);

    assert!(orch.retry());
    assert_eq!(orch.evaluate(), Evaluation::Failed);
    assert_eq!(orch.state().retry_label(), "Retry (1)");

    assert!(orch.retry());
    orch.set_data(sample_data()).unwrap();
    assert_eq!(orch.evaluate(), Evaluation::Rendered);
    assert!(matches!(orch.view(), ChartView::Chart { .. }));
    assert_eq!(orch.state().retry_count, 0);
}

#[test]
fn unmounted_raster_skips_silently() {
    let mut orch = orchestrator();
    assert!(orch.unmount_raster().is_some());
    assert!(matches!(orch.evaluate(), Evaluation::Skipped(_)));
    assert!(!orch.state().is_failed());
}
