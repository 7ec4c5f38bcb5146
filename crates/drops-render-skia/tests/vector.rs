// File: crates/drops-render-skia/tests/vector.rs
// Purpose: Vector display list: reset semantics and SVG export.

use drops_render_skia::{TextAnchor, VectorCanvas, VectorOp};
use skia_safe::{Color, Rect};

#[test]
fn reset_drops_previous_content() {
    let mut v = VectorCanvas::new();
    v.reset(100, 50);
    v.line((0.0, 0.0), (10.0, 0.0), Color::BLACK, 1.0);
    assert_eq!(v.ops().len(), 1);
    v.reset(200, 80);
    assert!(v.is_blank());
    assert_eq!(v.size(), (200, 80));
}

#[test]
fn svg_export() {
    let mut v = VectorCanvas::new();
    v.reset(120, 60);
    v.line((1.0, 2.0), (3.0, 4.0), Color::from_argb(128, 255, 0, 0), 1.5);
    v.rect(Rect::from_xywh(5.0, 6.0, 7.0, 8.0), Some(Color::WHITE), None);
    v.text((10.0, 20.0), "Tom & <Jerry>", 12.0, Color::BLACK, TextAnchor::Middle);

    let svg = v.to_svg();
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="120" height="60""#));
    assert!(svg.contains(r##"stroke="#ff0000" stroke-opacity="0.50"##), "{svg}");
    assert!(svg.contains(r##"<rect x="5" y="6" width="7" height="8" fill="#ffffff" stroke="none"/>"##), "{svg}");
    assert!(svg.contains(r#"text-anchor="middle">Tom &amp; &lt;Jerry&gt;</text>"#), "{svg}");
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(matches!(v.ops()[2], VectorOp::Text { anchor: TextAnchor::Middle, .. }));
}
