// File: crates/drops-core/src/scale.rs
// Summary: Time (X) and drop-count (Y) scale transforms in raster-local pixels.

use chrono::{DateTime, Duration, Utc};

/// Horizontal scale mapping `[start, end]` onto `[left_px, right_px]`.
#[derive(Clone, Copy, Debug)]
pub struct TimeScale {
    pub left_px: f32,
    pub right_px: f32,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeScale {
    pub fn new(left_px: f32, right_px: f32, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { left_px, right_px, start, end }
    }

    fn span_ms(&self) -> f64 {
        ((self.end - self.start).num_milliseconds() as f64).max(1.0)
    }

    #[inline]
    pub fn to_px(&self, t: DateTime<Utc>) -> f32 {
        let frac = (t - self.start).num_milliseconds() as f64 / self.span_ms();
        self.left_px + frac as f32 * (self.right_px - self.left_px)
    }

    #[inline]
    pub fn from_px(&self, px: f32) -> DateTime<Utc> {
        let width = (self.right_px - self.left_px).max(1e-6);
        let frac = ((px - self.left_px) / width) as f64;
        self.start + Duration::milliseconds((frac * self.span_ms()).round() as i64)
    }

    /// Pixel width covered by `d`.
    pub fn width_of(&self, d: Duration) -> f32 {
        (d.num_milliseconds() as f64 / self.span_ms()) as f32 * (self.right_px - self.left_px)
    }

    /// strftime pattern suited to the visible span.
    pub fn label_format(&self) -> &'static str {
        let span = self.end - self.start;
        if span <= Duration::days(2) {
            "%H:%M"
        } else if span <= Duration::days(120) {
            "%b %d"
        } else {
            "%b %Y"
        }
    }
}

/// Vertical linear scale mapping `[0, vmax]` to `[bottom_px, top_px]`.
#[derive(Clone, Copy, Debug)]
pub struct ValueScale {
    pub top_px: f32,
    pub bottom_px: f32,
    pub vmax: f64,
}

impl ValueScale {
    /// Non-positive or non-finite maxima fall back to 1 so an all-zero log still has an axis.
    pub fn new(top_px: f32, bottom_px: f32, vmax: f64) -> Self {
        let vmax = if vmax.is_finite() && vmax > 0.0 { vmax } else { 1.0 };
        Self { top_px, bottom_px, vmax }
    }

    #[inline]
    pub fn to_px(&self, v: f64) -> f32 {
        self.bottom_px - (v / self.vmax) as f32 * (self.bottom_px - self.top_px)
    }
}
