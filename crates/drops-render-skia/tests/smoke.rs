// File: crates/drops-render-skia/tests/smoke.rs
// Purpose: End-to-end draw through the orchestrator: surface sizes, stacked bar pixels, axis labels, composition.

mod common;

use common::{argb, orchestrator, HEIGHT, WIDTH};
use drops_core::{Evaluation, ThemeMode};
use drops_render_skia::{Composite, VectorOp};

#[test]
fn draws_both_surfaces_aligned() {
    let mut orch = orchestrator();
    assert_eq!(orch.evaluate(), Evaluation::Rendered);
    assert_eq!(orch.evaluate(), Evaluation::Unchanged);

    let layout = *orch.layout();
    let (legend, vector, raster) = orch.surfaces_mut().expect("surfaces mounted");
    assert!(raster.is_allocated());
    assert_eq!(raster.size(), layout.raster_size());
    assert_eq!(vector.size(), (WIDTH, HEIGHT));
    assert!(!vector.is_blank());
    assert_eq!(legend.ids().collect::<Vec<_>>(), vec!["ban", "afk"]);

    let title = vector
        .ops()
        .iter()
        .any(|op| matches!(op, VectorOp::Text { text, .. } if text == "Last 4 hours"));
    assert!(title, "period title missing from the vector layer");
}

#[test]
fn composite_stacks_bars_inside_margins() {
    let mut orch = orchestrator();
    assert_eq!(orch.evaluate(), Evaluation::Rendered);
    let layout = *orch.layout();
    let (_, vector, raster) = orch.surfaces_mut().unwrap();

    let mut out = Composite::new(WIDTH, HEIGHT).unwrap();
    out.compose(vector, raster, &layout, ThemeMode::Dark).unwrap();
    let px = out.argb().unwrap();
    assert_eq!(px.len(), (WIDTH * HEIGHT) as usize);

    let at = |x: i32, y: i32| px[(y * WIDTH + x) as usize];
    // Top-left corner is margin: plain dark background.
    assert_eq!(at(0, 0), argb(0x121214));

    // First bucket: afk (3) at the bottom, ban (1) stacked above it.
    let (rw, rh) = layout.raster_size();
    let cx = layout.raster.rect.left + rw / 8;
    let top = layout.raster.rect.top;
    assert_eq!(at(cx, top + rh - 10), argb(0xf5a623));
    assert_eq!(at(cx, top + rh / 8), argb(0xd0021b));

    let png = out.png().unwrap();
    assert_eq!(&png[..4], b"\x89PNG");
}

#[test]
fn theme_change_repaints() {
    let mut orch = orchestrator();
    assert_eq!(orch.evaluate(), Evaluation::Rendered);
    orch.set_theme(ThemeMode::Light);
    assert_eq!(orch.evaluate(), Evaluation::Rendered);
    assert_eq!(orch.draw_count(), 2);

    let layout = *orch.layout();
    let (_, vector, raster) = orch.surfaces_mut().unwrap();
    let mut out = Composite::new(WIDTH, HEIGHT).unwrap();
    out.compose(vector, raster, &layout, ThemeMode::Light).unwrap();
    assert_eq!(out.argb().unwrap()[0], argb(0xfafafc));
}

#[test]
fn x_axis_labels_follow_span() {
    let mut orch = orchestrator();
    orch.evaluate();
    let (_, vector, _) = orch.surfaces_mut().unwrap();
    let svg = vector.to_svg();
    assert!(svg.contains(">00:00</text>"), "{svg}");
    assert!(svg.contains(">04:00</text>"), "{svg}");
    assert!(svg.contains(r#"text-anchor="end">4</text>"#), "{svg}");
}
