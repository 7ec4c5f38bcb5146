// File: crates/drops-core/src/types.rs
// Summary: Shared types and constants (viewport size, structural margins).

/// Default viewport width in pixels.
pub const DEFAULT_WIDTH: i32 = 960;
/// Default viewport height in pixels.
pub const DEFAULT_HEIGHT: i32 = 400;

/// Inset of the raster surface relative to the vector surface, in pixels.
/// `axis` is the gap between the raster edge and the drawn axis lines.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Margins {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
    pub axis: u32,
}

/// The fixed margins every chart is laid out with.
pub const MARGINS: Margins = Margins::new(24, 16, 36, 56, 6);

impl Margins {
    /// Create new margins (non-negative by type).
    pub const fn new(top: u32, right: u32, bottom: u32, left: u32, axis: u32) -> Self {
        Self { top, right, bottom, left, axis }
    }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }
}

impl Default for Margins {
    fn default() -> Self {
        MARGINS
    }
}

/// Current size of the drawing region, as reported by the viewport tracker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// A viewport with a non-positive side suppresses rendering.
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Raster size left after subtracting `margins`; may be non-positive.
    pub const fn inner(&self, margins: &Margins) -> (i32, i32) {
        (
            self.width - margins.hsum() as i32,
            self.height - margins.vsum() as i32,
        )
    }
}
