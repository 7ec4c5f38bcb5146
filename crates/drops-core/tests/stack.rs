// File: crates/drops-core/tests/stack.rs
// Purpose: Layer layout: raster inset by margins, z-order, and legend placement.

use drops_core::stack::z_order;
use drops_core::{Layer, Margins, StackLayout, SurfaceStack, Viewport, MARGINS};

#[test]
fn raster_is_viewport_minus_margins() {
    for (w, h) in [(960, 400), (320, 200), (1920, 1080), (73, 61)] {
        let layout = StackLayout::compute(Viewport::new(w, h), MARGINS);
        assert_eq!(
            layout.raster_size(),
            (w - (MARGINS.left + MARGINS.right) as i32, h - (MARGINS.top + MARGINS.bottom) as i32)
        );
        assert_eq!(layout.raster.rect.left, MARGINS.left as i32);
        assert_eq!(layout.raster.rect.top, MARGINS.top as i32);
        assert_eq!(layout.vector.rect.width(), w);
        assert_eq!(layout.vector.rect.height(), h);
    }
}

#[test]
fn layers_stack_raster_vector_legend() {
    let layout = StackLayout::compute(Viewport::new(800, 300), MARGINS);
    let order: Vec<Layer> = layout.paint_order().iter().map(|l| l.layer).collect();
    assert_eq!(order, vec![Layer::Raster, Layer::Vector, Layer::Legend]);
    assert_eq!(layout.legend.z_index, z_order::LEGEND);
    assert!(layout.raster.z_index < layout.vector.z_index);
}

#[test]
fn legend_floats_near_top_hidden_and_inert() {
    let m = Margins::new(10, 10, 20, 30, 4);
    let layout = StackLayout::compute(Viewport::new(400, 200), m);
    assert_eq!(layout.legend.rect.left, 34);
    assert_eq!(layout.legend.rect.top, 14);
    assert!(!layout.legend.pointer_events);
    assert_eq!(layout.legend.initial_opacity, 0.0);
}

#[test]
fn relayout_tracks_viewport_and_margins() {
    let mut stack: SurfaceStack<(), ()> = SurfaceStack::new(MARGINS);
    assert!(stack.relayout(Viewport::new(500, 250), MARGINS));
    assert!(!stack.relayout(Viewport::new(500, 250), MARGINS));
    let m = Margins::new(0, 0, 0, 0, 0);
    assert!(stack.relayout(Viewport::new(500, 250), m));
    assert_eq!(stack.layout().raster_size(), (500, 250));
    assert!(!stack.is_complete());
}
