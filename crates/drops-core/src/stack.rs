// File: crates/drops-core/src/stack.rs
// Summary: Surface stack: layout of the legend, vector and raster layers over one bounding box, and ownership of the mounted surfaces.

use crate::geometry::RectI32;
use crate::legend::LegendOverlay;
use crate::types::{Margins, Viewport};

/// Paint order of the three layers; higher draws on top.
pub mod z_order {
    /// Per-bucket bars.
    pub const RASTER: i32 = 0;
    /// Axis lines, ticks and labels.
    pub const VECTOR: i32 = 10;
    /// Floating legend.
    pub const LEGEND: i32 = 20;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    Legend,
    Vector,
    Raster,
}

/// Absolute position of one layer within the shared bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerBox {
    pub layer: Layer,
    pub rect: RectI32,
    pub z_index: i32,
    pub pointer_events: bool,
    pub initial_opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackLayout {
    pub viewport: Viewport,
    pub margins: Margins,
    pub legend: LayerBox,
    pub vector: LayerBox,
    pub raster: LayerBox,
}

impl StackLayout {
    /// Lay out all three layers at once. The raster rect depends only on the
    /// viewport and the margins, so it stays aligned with the vector box.
    pub fn compute(viewport: Viewport, margins: Margins) -> Self {
        let left = margins.left as i32;
        let top = margins.top as i32;
        let axis = margins.axis as i32;
        let (inner_w, inner_h) = viewport.inner(&margins);

        let vector = RectI32::from_ltwh(0, 0, viewport.width, viewport.height);
        let raster = RectI32::from_ltwh(left, top, inner_w, inner_h);
        let legend = RectI32::from_ltwh(
            left + axis,
            top + axis,
            (inner_w - 2 * axis).max(0),
            (inner_h - 2 * axis).max(0),
        );

        Self {
            viewport,
            margins,
            legend: LayerBox {
                layer: Layer::Legend,
                rect: legend,
                z_index: z_order::LEGEND,
                pointer_events: false,
                initial_opacity: 0.0,
            },
            vector: LayerBox {
                layer: Layer::Vector,
                rect: vector,
                z_index: z_order::VECTOR,
                pointer_events: true,
                initial_opacity: 1.0,
            },
            raster: LayerBox {
                layer: Layer::Raster,
                rect: raster,
                z_index: z_order::RASTER,
                pointer_events: true,
                initial_opacity: 1.0,
            },
        }
    }

    /// Raster width/height: viewport minus left+right / top+bottom margins.
    pub const fn raster_size(&self) -> (i32, i32) {
        (self.raster.rect.width(), self.raster.rect.height())
    }

    /// Layers in paint order (bottom first).
    pub fn paint_order(&self) -> [LayerBox; 3] {
        let mut layers = [self.legend, self.vector, self.raster];
        layers.sort_by_key(|l| l.z_index);
        layers
    }
}

impl Default for StackLayout {
    fn default() -> Self {
        Self::compute(Viewport::default(), Margins::default())
    }
}

/// Owner of the three drawing surfaces. The orchestrator borrows them as opaque
/// draw targets; nothing else writes to them.
pub struct SurfaceStack<V, R> {
    legend: Option<LegendOverlay>,
    vector: Option<V>,
    raster: Option<R>,
    layout: StackLayout,
}

impl<V, R> SurfaceStack<V, R> {
    pub fn new(margins: Margins) -> Self {
        Self {
            legend: None,
            vector: None,
            raster: None,
            layout: StackLayout::compute(Viewport::default(), margins),
        }
    }

    /// Recompute the layout; a no-op when nothing changed.
    pub fn relayout(&mut self, viewport: Viewport, margins: Margins) -> bool {
        if self.layout.viewport == viewport && self.layout.margins == margins {
            return false;
        }
        self.layout = StackLayout::compute(viewport, margins);
        true
    }

    pub fn layout(&self) -> &StackLayout {
        &self.layout
    }

    pub fn mount_vector(&mut self, surface: V) -> Option<V> {
        self.vector.replace(surface)
    }

    pub fn mount_raster(&mut self, surface: R) -> Option<R> {
        self.raster.replace(surface)
    }

    pub fn set_legend(&mut self, legend: LegendOverlay) -> Option<LegendOverlay> {
        self.legend.replace(legend)
    }

    pub fn unmount_vector(&mut self) -> Option<V> {
        self.vector.take()
    }

    pub fn unmount_raster(&mut self) -> Option<R> {
        self.raster.take()
    }

    pub fn legend(&self) -> Option<&LegendOverlay> {
        self.legend.as_ref()
    }

    pub fn vector(&self) -> Option<&V> {
        self.vector.as_ref()
    }

    pub fn raster(&self) -> Option<&R> {
        self.raster.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.legend.is_some() && self.vector.is_some() && self.raster.is_some()
    }

    /// Borrow all three surfaces together, if mounted.
    pub fn targets_mut(&mut self) -> Option<(&LegendOverlay, &mut V, &mut R)> {
        match (&self.legend, &mut self.vector, &mut self.raster) {
            (Some(l), Some(v), Some(r)) => Some((l, v, r)),
            _ => None,
        }
    }
}
