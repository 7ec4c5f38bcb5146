// File: crates/drops-render-skia/src/lib.rs
// Summary: Skia-backed drawing routine for the drops chart and its supporting surfaces.

pub mod palette;
pub mod color;
pub mod raster;
pub mod vector;
pub mod routine;
pub mod hover;
pub mod compose;

pub use palette::Palette;
pub use color::parse_css_color;
pub use raster::RasterCanvas;
pub use vector::{TextAnchor, VectorCanvas, VectorOp};
pub use routine::SkiaDrawRoutine;
pub use hover::HoverTracker;
pub use compose::{retry_button, Composite};

/// Orchestrator wired to the Skia routine.
pub type SkiaOrchestrator = drops_core::RenderOrchestrator<SkiaDrawRoutine>;
