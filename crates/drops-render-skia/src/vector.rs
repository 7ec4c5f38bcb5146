// File: crates/drops-render-skia/src/vector.rs
// Summary: Vector draw target: a resolution-independent display list of lines, rects and text, replayable on Skia or exported as SVG.

use std::fmt::Write as _;

use skia_safe as skia;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Clone, Debug, PartialEq)]
pub enum VectorOp {
    Line { from: (f32, f32), to: (f32, f32), color: skia::Color, width: f32 },
    Rect { rect: skia::Rect, fill: Option<skia::Color>, stroke: Option<skia::Color> },
    Text { at: (f32, f32), text: String, size: f32, color: skia::Color, anchor: TextAnchor },
}

/// Axis/label layer in full bounding-box coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VectorCanvas {
    width: i32,
    height: i32,
    ops: Vec<VectorOp>,
}

impl VectorCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all content and resize; every draw starts here.
    pub fn reset(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
        self.ops.clear();
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn ops(&self) -> &[VectorOp] {
        &self.ops
    }

    pub fn is_blank(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), color: skia::Color, width: f32) {
        self.ops.push(VectorOp::Line { from, to, color, width });
    }

    pub fn rect(&mut self, rect: skia::Rect, fill: Option<skia::Color>, stroke: Option<skia::Color>) {
        self.ops.push(VectorOp::Rect { rect, fill, stroke });
    }

    pub fn text(&mut self, at: (f32, f32), text: impl Into<String>, size: f32, color: skia::Color, anchor: TextAnchor) {
        self.ops.push(VectorOp::Text { at, text: text.into(), size, color, anchor });
    }

    /// Paint the display list onto `canvas` (1 unit = 1 pixel at the current matrix).
    pub fn replay(&self, canvas: &skia::Canvas) {
        let mut stroke = skia::Paint::default();
        stroke.set_anti_alias(true);
        stroke.set_style(skia::paint::Style::Stroke);
        let mut fill = skia::Paint::default();
        fill.set_anti_alias(true);
        fill.set_style(skia::paint::Style::Fill);

        for op in &self.ops {
            match op {
                VectorOp::Line { from, to, color, width } => {
                    stroke.set_color(*color);
                    stroke.set_stroke_width(*width);
                    canvas.draw_line(*from, *to, &stroke);
                }
                VectorOp::Rect { rect, fill: f, stroke: s } => {
                    if let Some(c) = f {
                        fill.set_color(*c);
                        canvas.draw_rect(*rect, &fill);
                    }
                    if let Some(c) = s {
                        stroke.set_color(*c);
                        stroke.set_stroke_width(1.0);
                        canvas.draw_rect(*rect, &stroke);
                    }
                }
                VectorOp::Text { at, text, size, color, anchor } => {
                    let mut font = skia::Font::default();
                    font.set_size(*size);
                    fill.set_color(*color);
                    let (w, _) = font.measure_str(text, Some(&fill));
                    let x = match anchor {
                        TextAnchor::Start => at.0,
                        TextAnchor::Middle => at.0 - w * 0.5,
                        TextAnchor::End => at.0 - w,
                    };
                    canvas.draw_str(text, (x, at.1), &font, &fill);
                }
            }
        }
    }

    /// Standalone SVG document of the layer.
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        for op in &self.ops {
            let _ = match op {
                VectorOp::Line { from, to, color, width } => writeln!(
                    out,
                    r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-opacity="{}" stroke-width="{}"/>"#,
                    from.0, from.1, to.0, to.1, hex(*color), opacity(*color), width
                ),
                VectorOp::Rect { rect, fill, stroke } => writeln!(
                    out,
                    r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="{}"/>"#,
                    rect.left,
                    rect.top,
                    rect.width(),
                    rect.height(),
                    (*fill).map_or_else(|| "none".to_string(), hex),
                    (*stroke).map_or_else(|| "none".to_string(), hex)
                ),
                VectorOp::Text { at, text, size, color, anchor } => writeln!(
                    out,
                    r#"  <text x="{}" y="{}" font-size="{}px" fill="{}" text-anchor="{}">{}</text>"#,
                    at.0,
                    at.1,
                    size,
                    hex(*color),
                    match anchor {
                        TextAnchor::Start => "start",
                        TextAnchor::Middle => "middle",
                        TextAnchor::End => "end",
                    },
                    escape(text)
                ),
            };
        }
        out.push_str("</svg>\n");
        out
    }
}

fn hex(c: skia::Color) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r(), c.g(), c.b())
}

fn opacity(c: skia::Color) -> f32 {
    c.a() as f32 / 255.0
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
