// File: crates/drops-core/src/lib.rs
// Summary: Core library entry point; exports the data model, legend, surface stack and render orchestrator.

pub mod types;
pub mod geometry;
pub mod error;
pub mod theme;
pub mod model;
pub mod category;
pub mod legend;
pub mod stack;
pub mod scale;
pub mod grid;
pub mod orchestrator;

pub use types::{Margins, Viewport, MARGINS, DEFAULT_WIDTH, DEFAULT_HEIGHT};
pub use geometry::RectI32;
pub use error::{ConfigError, DataError, DrawError, UNKNOWN_ERROR};
pub use theme::ThemeMode;
pub use model::{CategoryId, ChartDataModel, DropEvent, LogBucket};
pub use category::{CategoryMetadata, CategoryRegistry, StaticRegistry};
pub use legend::{LegendOpacity, LegendOverlay, LegendRow, LegendSlots, ValueSlot};
pub use stack::{Layer, LayerBox, StackLayout, SurfaceStack};
pub use scale::{TimeScale, ValueScale};
pub use orchestrator::{
    ChartView, DrawRequest, DrawRoutine, ErrorPanel, ErrorReporter, Evaluation, Phase,
    RenderOrchestrator, RenderState, SkipReason,
};
