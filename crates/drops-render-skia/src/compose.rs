// File: crates/drops-render-skia/src/compose.rs
// Summary: Flatten the surface stack (raster, vector, legend) or the error panel into one CPU image for PNG export or window blits.

use anyhow::{anyhow, Result};
use drops_core::{ErrorPanel, LegendOverlay, RectI32, StackLayout, ThemeMode};
use skia_safe as skia;

use crate::color::parse_css_color;
use crate::palette::{with_opacity, Palette};
use crate::raster::RasterCanvas;
use crate::vector::VectorCanvas;

const LEGEND_TEXT: f32 = 12.0;
const LEGEND_ROW: f32 = 18.0;
const LEGEND_PAD: f32 = 8.0;
const SWATCH: f32 = 10.0;

pub struct Composite {
    surface: skia::Surface,
    width: i32,
    height: i32,
}

impl Composite {
    pub fn new(width: i32, height: i32) -> Result<Self> {
        let surface = skia::surfaces::raster_n32_premul((width.max(1), height.max(1)))
            .ok_or_else(|| anyhow!("failed to create {width}x{height} composite surface"))?;
        Ok(Self { surface, width: width.max(1), height: height.max(1) })
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// Reallocate when the window size changed.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<()> {
        if (width.max(1), height.max(1)) != (self.width, self.height) {
            *self = Self::new(width, height)?;
        }
        Ok(())
    }

    /// Plain background, for frames where nothing was drawn.
    pub fn clear(&mut self, theme: ThemeMode) {
        self.surface.canvas().clear(Palette::for_mode(theme).background);
    }

    /// Paint the layers in z-order: raster inset at the margins, then the vector layer on top.
    pub fn compose(
        &mut self,
        vector: &VectorCanvas,
        raster: &mut RasterCanvas,
        layout: &StackLayout,
        theme: ThemeMode,
    ) -> Result<()> {
        let palette = Palette::for_mode(theme);
        let image = raster
            .snapshot()
            .ok_or_else(|| anyhow!("raster surface has not been painted"))?;
        let canvas = self.surface.canvas();
        canvas.clear(palette.background);
        let r = layout.raster.rect;
        canvas.draw_image(&image, (r.left as f32, r.top as f32), None);
        vector.replay(canvas);
        Ok(())
    }

    /// Legend box in the top-left of the legend layer, faded by its current opacity.
    pub fn draw_legend(&mut self, legend: &LegendOverlay, layout: &StackLayout, theme: ThemeMode) {
        let opacity = legend.opacity().get();
        if !legend.opacity().is_visible() || legend.is_empty() || layout.legend.rect.is_degenerate() {
            return;
        }
        let palette = Palette::for_mode(theme);
        let canvas = self.surface.canvas();

        let mut font = skia::Font::default();
        font.set_size(LEGEND_TEXT);
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);

        let rows: Vec<(String, String)> =
            legend.rows().iter().map(|row| (row.label.clone(), row.slot().text())).collect();
        let label_w = rows.iter().map(|(l, _)| font.measure_str(l, None).0).fold(0.0f32, f32::max);
        let value_w = rows.iter().map(|(_, v)| font.measure_str(v, None).0).fold(24.0f32, f32::max);

        let area = layout.legend.rect;
        let w = (LEGEND_PAD * 3.0 + SWATCH + label_w + value_w + 6.0).min(area.width() as f32);
        let h = (LEGEND_PAD * 2.0 + LEGEND_ROW * rows.len() as f32).min(area.height() as f32);
        let (x0, y0) = (area.left as f32, area.top as f32);

        canvas.save();
        canvas.clip_rect(skia::Rect::from_xywh(x0, y0, w, h), None, true);
        paint.set_color(with_opacity(palette.legend_background, opacity));
        canvas.draw_rect(skia::Rect::from_xywh(x0, y0, w, h), &paint);

        for (i, row) in legend.rows().iter().enumerate() {
            let y = y0 + LEGEND_PAD + LEGEND_ROW * i as f32;
            let swatch = skia::Rect::from_xywh(x0 + LEGEND_PAD, y + (LEGEND_ROW - SWATCH) * 0.5, SWATCH, SWATCH);
            if let Some(c) = parse_css_color(&row.color) {
                paint.set_style(skia::paint::Style::Fill);
                paint.set_color(with_opacity(c, opacity));
                canvas.draw_rect(swatch, &paint);
            }
            if let Some(c) = parse_css_color(&row.border) {
                paint.set_style(skia::paint::Style::Stroke);
                paint.set_stroke_width(1.0);
                paint.set_color(with_opacity(c, opacity));
                canvas.draw_rect(swatch, &paint);
            }
            paint.set_style(skia::paint::Style::Fill);
            paint.set_color(with_opacity(palette.legend_text, opacity));
            let baseline = y + LEGEND_ROW * 0.5 + LEGEND_TEXT * 0.35;
            canvas.draw_str(&rows[i].0, (x0 + LEGEND_PAD * 2.0 + SWATCH, baseline), &font, &paint);
            let (vw, _) = font.measure_str(&rows[i].1, None);
            canvas.draw_str(&rows[i].1, (x0 + w - LEGEND_PAD - vw, baseline), &font, &paint);
        }
        canvas.restore();
    }

    /// Replace the chart with the failure message and a retry button.
    pub fn error_panel(&mut self, panel: &ErrorPanel, theme: ThemeMode) {
        let palette = Palette::for_mode(theme);
        let canvas = self.surface.canvas();
        canvas.clear(palette.panel_background);

        let mut font = skia::Font::default();
        font.set_size(14.0);
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);

        let cx = (panel.rect.left + panel.rect.right) as f32 * 0.5;
        let cy = (panel.rect.top + panel.rect.bottom) as f32 * 0.5;
        paint.set_color(palette.panel_text);
        let (mw, _) = font.measure_str(&panel.message, None);
        canvas.draw_str(&panel.message, (cx - mw * 0.5, cy - 12.0), &font, &paint);

        let button = retry_button(panel.rect);
        let rect = skia::Rect::from_ltrb(
            button.left as f32,
            button.top as f32,
            button.right as f32,
            button.bottom as f32,
        );
        paint.set_color(palette.button_fill);
        canvas.draw_round_rect(rect, 4.0, 4.0, &paint);
        paint.set_color(palette.button_text);
        let (bw, _) = font.measure_str(&panel.retry_label, None);
        canvas.draw_str(&panel.retry_label, (rect.center_x() - bw * 0.5, rect.center_y() + 5.0), &font, &paint);
    }

    pub fn png(&mut self) -> Result<Vec<u8>> {
        let image = self.surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Pixels as `0xAARRGGBB`, row-major, for softbuffer-style blits.
    pub fn argb(&mut self) -> Result<Vec<u32>> {
        let info = skia::ImageInfo::new(
            (self.width, self.height),
            skia::ColorType::BGRA8888,
            skia::AlphaType::Premul,
            None,
        );
        let row_bytes = self.width as usize * 4;
        let mut bytes = vec![0u8; row_bytes * self.height as usize];
        if !self.surface.read_pixels(&info, &mut bytes, row_bytes, (0, 0)) {
            return Err(anyhow!("reading {}x{} composite pixels failed", self.width, self.height));
        }
        Ok(bytes
            .chunks_exact(4)
            .map(|px| u32::from_le_bytes([px[0], px[1], px[2], px[3]]))
            .collect())
    }
}

/// Retry button placement within an error panel; also used for hit-testing clicks.
pub fn retry_button(panel: RectI32) -> RectI32 {
    let cx = (panel.left + panel.right) / 2;
    let cy = (panel.top + panel.bottom) / 2;
    RectI32::from_ltwh(cx - 50, cy + 4, 100, 28)
}
