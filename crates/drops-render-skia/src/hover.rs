// File: crates/drops-render-skia/src/hover.rs
// Summary: Pointer hover → per-category legend readouts, written out of band into the legend value slots.

use drops_core::{ChartDataModel, LegendOpacity, LegendOverlay, LegendSlots, StackLayout, TimeScale};
use tracing::trace;

/// Writes the hovered bucket's counts into the legend. Bound to one legend
/// instance; a rebuilt legend needs a fresh tracker.
#[derive(Clone, Debug)]
pub struct HoverTracker {
    slots: LegendSlots,
    opacity: LegendOpacity,
}

impl HoverTracker {
    pub fn new(legend: &LegendOverlay) -> Self {
        Self { slots: legend.slots(), opacity: legend.opacity().clone() }
    }

    /// Pointer at `(x, y)` in bounding-box coordinates. Returns the hovered
    /// bucket index, or `None` (and clears the readouts) outside the bars.
    pub fn pointer_moved(&self, data: &ChartDataModel, layout: &StackLayout, x: f64, y: f64) -> Option<usize> {
        let r = layout.raster.rect;
        if !r.contains(x, y) {
            self.pointer_left();
            return None;
        }
        let Some(index) = bucket_at(data, layout, (x - r.left as f64) as f32) else {
            self.pointer_left();
            return None;
        };
        let bucket = &data.log[index];
        for id in &data.categories_sorted {
            self.slots.write(id, bucket.count(id));
        }
        self.opacity.set(1.0);
        trace!(index, time = %bucket.time, "hover");
        Some(index)
    }

    pub fn pointer_left(&self) {
        self.slots.clear_all();
        self.opacity.set(0.0);
    }
}

/// Index of the bucket whose `[time, time + width)` span covers raster-local `px`.
pub fn bucket_at(data: &ChartDataModel, layout: &StackLayout, px: f32) -> Option<usize> {
    if data.log.is_empty() || data.end_date <= data.start_date {
        return None;
    }
    let (rw, _) = layout.raster_size();
    let ts = TimeScale::new(0.0, rw as f32, data.start_date, data.end_date);
    let t = ts.from_px(px);
    let after = data.log.partition_point(|b| b.time <= t);
    let index = after.checked_sub(1)?;
    (t < data.log[index].time + data.bucket_width()).then_some(index)
}
