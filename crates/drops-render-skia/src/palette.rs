// File: crates/drops-render-skia/src/palette.rs
// Summary: Light/Dark palettes for chart chrome (background, grid, axes, legend, error panel).

use drops_core::ThemeMode;
use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub name: &'static str,
    pub background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub tick: skia::Color,
    pub legend_background: skia::Color,
    pub legend_text: skia::Color,
    pub panel_background: skia::Color,
    pub panel_text: skia::Color,
    pub button_fill: skia::Color,
    pub button_text: skia::Color,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            grid: skia::Color::from_argb(255, 40, 40, 45),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            tick: skia::Color::from_argb(255, 150, 150, 160),
            legend_background: skia::Color::from_argb(220, 28, 28, 32),
            legend_text: skia::Color::from_argb(255, 235, 235, 245),
            panel_background: skia::Color::from_argb(255, 30, 16, 18),
            panel_text: skia::Color::from_argb(255, 255, 190, 190),
            button_fill: skia::Color::from_argb(255, 64, 160, 255),
            button_text: skia::Color::from_argb(255, 255, 255, 255),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 250, 250, 252),
            grid: skia::Color::from_argb(255, 230, 230, 235),
            axis_line: skia::Color::from_argb(255, 60, 60, 70),
            axis_label: skia::Color::from_argb(255, 20, 20, 30),
            tick: skia::Color::from_argb(255, 100, 100, 110),
            legend_background: skia::Color::from_argb(230, 255, 255, 255),
            legend_text: skia::Color::from_argb(255, 20, 20, 30),
            panel_background: skia::Color::from_argb(255, 253, 236, 236),
            panel_text: skia::Color::from_argb(255, 150, 20, 30),
            button_fill: skia::Color::from_argb(255, 32, 120, 200),
            button_text: skia::Color::from_argb(255, 255, 255, 255),
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }
}

/// Scale a color's alpha by `opacity` in `[0, 1]`.
pub fn with_opacity(color: skia::Color, opacity: f32) -> skia::Color {
    let a = (color.a() as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
    color.with_a(a)
}
