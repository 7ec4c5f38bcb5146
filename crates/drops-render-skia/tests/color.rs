// File: crates/drops-render-skia/tests/color.rs
// Purpose: Category color strings from the registry parse into Skia colors.

use drops_render_skia::parse_css_color;
use skia_safe::Color;

#[test]
fn hex_forms() {
    assert_eq!(parse_css_color("#f5a623"), Some(Color::from_argb(255, 0xf5, 0xa6, 0x23)));
    assert_eq!(parse_css_color("#FFF"), Some(Color::WHITE));
    assert_eq!(parse_css_color("#0000ff80"), Some(Color::from_argb(0x80, 0, 0, 255)));
    assert_eq!(parse_css_color("#f008"), Some(Color::from_argb(0x88, 255, 0, 0)));
    assert_eq!(parse_css_color("  #000000 "), Some(Color::BLACK));
}

#[test]
fn functional_forms() {
    assert_eq!(parse_css_color("rgb(10, 20, 30)"), Some(Color::from_argb(255, 10, 20, 30)));
    assert_eq!(parse_css_color("RGBA(10,20,30,0.5)"), Some(Color::from_argb(128, 10, 20, 30)));
    assert_eq!(parse_css_color("rgb(100% 0% 0% / 50%)"), Some(Color::from_argb(128, 255, 0, 0)));
}

#[test]
fn names_and_garbage() {
    assert_eq!(parse_css_color("green"), Some(Color::from_argb(255, 0, 128, 0)));
    assert_eq!(parse_css_color("Grey"), Some(Color::from_argb(255, 128, 128, 128)));
    assert_eq!(parse_css_color("transparent").map(|c| c.a()), Some(0));
    for bad in ["", "#12", "#ggg", "rgb(1,2)", "rgb(a,b,c)", "chartreuse-ish"] {
        assert_eq!(parse_css_color(bad), None, "{bad:?}");
    }
}
