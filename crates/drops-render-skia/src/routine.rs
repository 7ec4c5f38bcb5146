// File: crates/drops-render-skia/src/routine.rs
// Summary: The Skia drawing routine: stacked per-bucket bars on the raster surface, axes and labels on the vector layer.

use chrono::Duration;
use drops_core::grid::{linspace, value_ticks};
use drops_core::{
    ChartDataModel, DrawError, DrawRequest, DrawRoutine, LegendOverlay, StackLayout, TimeScale, ValueScale,
};
use skia_safe as skia;
use tracing::trace;

use crate::color::parse_css_color;
use crate::hover::HoverTracker;
use crate::palette::Palette;
use crate::raster::RasterCanvas;
use crate::vector::{TextAnchor, VectorCanvas};

pub struct SkiaDrawRoutine {
    /// Label font size in pixels.
    pub text_size: f32,
    /// Fraction of each bucket's width left empty between bars.
    pub bar_gap: f32,
    /// Approximate number of value-axis intervals.
    pub y_tick_target: usize,
    hover: Option<HoverTracker>,
}

impl Default for SkiaDrawRoutine {
    fn default() -> Self {
        Self { text_size: 12.0, bar_gap: 0.2, y_tick_target: 5, hover: None }
    }
}

impl SkiaDrawRoutine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text_size(mut self, size: f32) -> Self {
        self.text_size = size.max(1.0);
        self
    }

    pub fn with_bar_gap(mut self, gap: f32) -> Self {
        self.bar_gap = gap.clamp(0.0, 0.9);
        self
    }

    pub fn with_y_tick_target(mut self, target: usize) -> Self {
        self.y_tick_target = target.max(1);
        self
    }

    /// Hover writer bound to the legend of the most recent draw.
    pub fn hover(&self) -> Option<&HoverTracker> {
        self.hover.as_ref()
    }
}

/// Resolved paint colors for one series, in stacking order.
struct SeriesPaint<'a> {
    id: &'a str,
    fill: skia::Color,
    border: skia::Color,
}

impl DrawRoutine for SkiaDrawRoutine {
    type Vector = VectorCanvas;
    type Raster = RasterCanvas;

    fn draw(&mut self, req: DrawRequest<'_, VectorCanvas, RasterCanvas>) -> Result<(), DrawError> {
        let layout = req.layout();
        let DrawRequest { legend, vector, raster, reporter, theme, data, .. } = req;

        if !(data.max_drops.is_finite() && data.max_drops >= 0.0) {
            return Err(DrawError::new(format!("invalid max drops value {}", data.max_drops)));
        }
        if data.end_date <= data.start_date {
            reporter.report(format!(
                "period `{}` ends at {} before it starts at {}",
                data.selected_period,
                data.end_date.to_rfc3339(),
                data.start_date.to_rfc3339()
            ));
            return Ok(());
        }
        let series = resolve_series(data, legend)?;

        // Stale readouts belong to the previous paint.
        legend.slots().clear_all();
        self.hover = Some(HoverTracker::new(legend));

        let palette = Palette::for_mode(theme);
        let (rw, rh) = layout.raster_size();
        let ts = TimeScale::new(0.0, rw as f32, data.start_date, data.end_date);
        let vs = ValueScale::new(0.0, rh as f32, data.max_drops);
        let ticks = value_ticks(vs.vmax, self.y_tick_target);

        let canvas = raster.prepare(rw, rh)?;
        canvas.clear(palette.background);
        draw_grid(canvas, &ticks, &vs, rw as f32, palette.grid);
        draw_buckets(canvas, data, &series, &ts, &vs, self.bar_gap);

        vector.reset(layout.viewport.width, layout.viewport.height);
        draw_axes(vector, &layout, data, &ts, &vs, &ticks, &palette, self.text_size);

        trace!(buckets = data.log.len(), series = series.len(), ops = vector.ops().len(), "chart painted");
        Ok(())
    }
}

fn resolve_series<'a>(data: &'a ChartDataModel, legend: &LegendOverlay) -> Result<Vec<SeriesPaint<'a>>, DrawError> {
    data.categories_sorted
        .iter()
        .map(|id| {
            let row = legend
                .row(id)
                .ok_or_else(|| DrawError::new(format!("category `{id}` is missing from the legend")))?;
            let fill = parse_css_color(&row.color)
                .ok_or_else(|| DrawError::new(format!("invalid color `{}` for category `{id}`", row.color)))?;
            let border = parse_css_color(&row.border)
                .ok_or_else(|| DrawError::new(format!("invalid border color `{}` for category `{id}`", row.border)))?;
            Ok(SeriesPaint { id: id.as_str(), fill, border })
        })
        .collect()
}

// ---- helpers ----------------------------------------------------------------

fn draw_grid(canvas: &skia::Canvas, ticks: &[f64], vs: &ValueScale, width: f32, color: skia::Color) {
    let mut paint = skia::Paint::default();
    paint.set_color(color);
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);

    for &v in ticks.iter().skip(1) {
        let y = vs.to_px(v);
        canvas.draw_line((0.0, y), (width, y), &paint);
    }
}

fn draw_buckets(
    canvas: &skia::Canvas,
    data: &ChartDataModel,
    series: &[SeriesPaint<'_>],
    ts: &TimeScale,
    vs: &ValueScale,
    gap: f32,
) {
    let mut body = skia::Paint::default();
    body.set_anti_alias(true);
    body.set_style(skia::paint::Style::Fill);

    let mut edge = skia::Paint::default();
    edge.set_anti_alias(true);
    edge.set_style(skia::paint::Style::Stroke);
    edge.set_stroke_width(1.0);

    let slot = ts.width_of(data.bucket_width()).max(1.0);
    let bar = (slot * (1.0 - gap)).max(1.0);
    let pad = (slot - bar) * 0.5;

    for bucket in &data.log {
        let x = ts.to_px(bucket.time) + pad;
        let mut base = 0.0f64;
        for s in series {
            let v = bucket.count(s.id);
            if v <= 0.0 {
                continue;
            }
            let top = vs.to_px(base + v);
            let bottom = vs.to_px(base);
            let rect = skia::Rect::from_ltrb(x, top, x + bar, bottom);
            body.set_color(s.fill);
            canvas.draw_rect(rect, &body);
            // Borders only read on bars wide enough to show a fill.
            if bar >= 3.0 {
                edge.set_color(s.border);
                canvas.draw_rect(rect, &edge);
            }
            base += v;
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_axes(
    vector: &mut VectorCanvas,
    layout: &StackLayout,
    data: &ChartDataModel,
    ts: &TimeScale,
    vs: &ValueScale,
    ticks: &[f64],
    palette: &Palette,
    text_size: f32,
) {
    let r = layout.raster.rect;
    let axis = layout.margins.axis as f32;
    let (l, t, rt, b) = (r.left as f32, r.top as f32, r.right as f32, r.bottom as f32);
    let y_axis_x = l - axis;
    let x_axis_y = b + axis;

    vector.line((y_axis_x, t), (y_axis_x, b), palette.axis_line, 1.5);
    vector.line((l, x_axis_y), (rt, x_axis_y), palette.axis_line, 1.5);

    for &v in ticks {
        let y = t + vs.to_px(v);
        vector.line((y_axis_x - 4.0, y), (y_axis_x, y), palette.tick, 1.0);
        vector.text(
            (y_axis_x - 6.0, y + text_size * 0.35),
            format!("{v:.0}"),
            text_size,
            palette.axis_label,
            TextAnchor::End,
        );
    }

    let span_ms = (data.end_date - data.start_date).num_milliseconds() as f64;
    let count = ((r.width() / 110).clamp(2, 12)) as usize;
    let fmt = ts.label_format();
    for frac in linspace(0.0, 1.0, count) {
        let at = data.start_date + Duration::milliseconds((frac * span_ms).round() as i64);
        let x = l + ts.to_px(at);
        vector.line((x, x_axis_y), (x, x_axis_y + 4.0), palette.tick, 1.0);
        vector.text(
            (x, x_axis_y + 6.0 + text_size),
            at.format(fmt).to_string(),
            text_size,
            palette.axis_label,
            TextAnchor::Middle,
        );
    }

    vector.text(
        (l, (t - 8.0).max(text_size)),
        data.selected_period.clone(),
        text_size,
        palette.axis_label,
        TextAnchor::Start,
    );
}
