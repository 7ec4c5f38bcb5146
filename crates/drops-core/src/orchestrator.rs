// File: crates/drops-core/src/orchestrator.rs
// Summary: Render orchestrator: reconciles data/size/theme into one draw per settled change and owns the error/retry state.
// Notes:
// - Setters only record inputs; `evaluate` is the update-cycle tick. Several
//   changes between two ticks coalesce into at most one draw.
// - A draw is attempted when the (data, size, theme) tuple differs by value from
//   the last attempted one, after a retry cleared the error, or after a surface
//   was (re)mounted. Surfaces are repainted wholesale on every attempt.
// - Drawing failures never escape: an `Err`, a message sent through the
//   `ErrorReporter`, or a panic inside the routine all become `RenderState`.

use std::any::Any;
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use tracing::{debug, error, info, trace, warn};

use crate::category::CategoryRegistry;
use crate::error::{ConfigError, DrawError};
use crate::geometry::RectI32;
use crate::legend::LegendOverlay;
use crate::model::ChartDataModel;
use crate::stack::{StackLayout, SurfaceStack};
use crate::theme::ThemeMode;
use crate::types::{Margins, Viewport, MARGINS};

/// The external drawing routine. It receives a fully assembled request and
/// either paints both surfaces or fails with a descriptive message.
pub trait DrawRoutine {
    type Vector;
    type Raster;

    fn draw(&mut self, request: DrawRequest<'_, Self::Vector, Self::Raster>) -> Result<(), DrawError>;
}

/// Everything one draw needs. Targets are borrowed for the duration of the call only.
pub struct DrawRequest<'a, V, R> {
    /// Legend whose value slots the routine may write out of band.
    pub legend: &'a LegendOverlay,
    pub vector: &'a mut V,
    pub raster: &'a mut R,
    pub reporter: &'a ErrorReporter,
    pub size: Viewport,
    pub margins: Margins,
    pub theme: ThemeMode,
    pub data: &'a ChartDataModel,
}

impl<V, R> DrawRequest<'_, V, R> {
    pub fn layout(&self) -> StackLayout {
        StackLayout::compute(self.size, self.margins)
    }

    pub fn dark(&self) -> bool {
        self.theme.is_dark()
    }
}

/// Error callback handed to the routine. The first report wins.
#[derive(Debug, Default)]
pub struct ErrorReporter {
    message: RefCell<Option<String>>,
}

impl ErrorReporter {
    pub fn report(&self, message: impl Into<String>) {
        let mut slot = self.message.borrow_mut();
        if slot.is_none() {
            *slot = Some(message.into());
        }
    }

    fn take(&self) -> Option<String> {
        self.message.borrow_mut().take()
    }
}

/// User-facing failure state, owned by the orchestrator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderState {
    pub error_message: Option<String>,
    pub retry_count: u32,
}

impl RenderState {
    pub fn is_failed(&self) -> bool {
        self.error_message.is_some()
    }

    /// `"Retry"` before any retry, `"Retry (N)"` afterwards.
    pub fn retry_label(&self) -> String {
        match self.retry_count {
            0 => "Retry".to_string(),
            n => format!("Retry ({n})"),
        }
    }

    pub fn error_text(&self) -> Option<String> {
        self.error_message.as_ref().map(|m| format!("Render Error: {m}"))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Rendering,
    Rendered,
    Failed,
}

/// Why `evaluate` did not attempt a draw. None of these are user-visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    NoData,
    MissingSurface,
    EmptyViewport,
    EmptyLog,
    /// Viewport smaller than the margins.
    DegenerateRaster,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Evaluation {
    Skipped(SkipReason),
    /// Inputs match the last attempt; nothing drawn.
    Unchanged,
    Rendered,
    Failed,
}

/// Full-area overlay that replaces the chart after a drawing failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorPanel {
    pub message: String,
    pub retry_label: String,
    pub rect: RectI32,
}

/// What the caller should show.
#[derive(Debug)]
pub enum ChartView<'a> {
    Chart { layout: &'a StackLayout, legend: Option<&'a LegendOverlay> },
    Error(ErrorPanel),
}

struct DrawKey {
    data: Rc<ChartDataModel>,
    size: Viewport,
    theme: ThemeMode,
}

impl DrawKey {
    fn matches(&self, data: &Rc<ChartDataModel>, size: Viewport, theme: ThemeMode) -> bool {
        self.size == size
            && self.theme == theme
            && (Rc::ptr_eq(&self.data, data) || *self.data == **data)
    }
}

pub struct RenderOrchestrator<D: DrawRoutine> {
    routine: D,
    registry: Rc<dyn CategoryRegistry>,
    margins: Margins,
    stack: SurfaceStack<D::Vector, D::Raster>,
    data: Option<Rc<ChartDataModel>>,
    size: Viewport,
    theme: ThemeMode,
    state: RenderState,
    phase: Phase,
    last: Option<DrawKey>,
    draws: u64,
}

impl<D: DrawRoutine> RenderOrchestrator<D> {
    pub fn new(routine: D, registry: Rc<dyn CategoryRegistry>) -> Self {
        Self {
            routine,
            registry,
            margins: MARGINS,
            stack: SurfaceStack::new(MARGINS),
            data: None,
            size: Viewport::default(),
            theme: ThemeMode::default(),
            state: RenderState::default(),
            phase: Phase::Idle,
            last: None,
            draws: 0,
        }
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.set_margins(margins);
        self
    }

    // ---- inputs -------------------------------------------------------------

    /// Accept a new data snapshot. The legend is rebuilt when the category list
    /// changed; an unknown category is a configuration error and leaves the
    /// previous data in place.
    pub fn set_data(&mut self, data: impl Into<Rc<ChartDataModel>>) -> Result<(), ConfigError> {
        let data = data.into();
        let stale = self
            .stack
            .legend()
            .map_or(true, |l| !l.matches(&data.categories_sorted));
        if stale {
            let legend = LegendOverlay::build(&data.categories_sorted, self.registry.as_ref())
                .inspect_err(|e| error!(error = %e, "rejecting chart data"))?;
            debug!(rows = legend.rows().len(), "legend rebuilt");
            self.stack.set_legend(legend);
        }
        self.data = Some(data);
        Ok(())
    }

    pub fn set_size(&mut self, size: Viewport) {
        self.size = size;
        self.stack.relayout(size, self.margins);
    }

    pub fn set_theme(&mut self, theme: ThemeMode) {
        self.theme = theme;
    }

    pub fn set_margins(&mut self, margins: Margins) {
        if self.margins != margins {
            self.margins = margins;
            self.stack.relayout(self.size, margins);
            self.last = None;
        }
    }

    /// Mount the vector target; a fresh surface always gets painted on the next tick.
    pub fn mount_vector(&mut self, surface: D::Vector) -> Option<D::Vector> {
        self.last = None;
        self.stack.mount_vector(surface)
    }

    pub fn mount_raster(&mut self, surface: D::Raster) -> Option<D::Raster> {
        self.last = None;
        self.stack.mount_raster(surface)
    }

    pub fn unmount_vector(&mut self) -> Option<D::Vector> {
        self.stack.unmount_vector()
    }

    pub fn unmount_raster(&mut self) -> Option<D::Raster> {
        self.stack.unmount_raster()
    }

    /// User-initiated retry from the error panel: clears the error, bumps the
    /// counter, and makes the next `evaluate` draw again with unchanged inputs.
    /// Returns false when there is no error to retry.
    pub fn retry(&mut self) -> bool {
        if !self.state.is_failed() {
            return false;
        }
        self.state.error_message = None;
        self.state.retry_count = self.state.retry_count.saturating_add(1);
        self.last = None;
        self.phase = Phase::Idle;
        info!(retry_count = self.state.retry_count, "render retry requested");
        true
    }

    // ---- update cycle -------------------------------------------------------

    /// Run one update cycle: draw at most once if a tracked input changed.
    pub fn evaluate(&mut self) -> Evaluation {
        let Some(data) = self.data.clone() else {
            return skip(SkipReason::NoData);
        };
        if !self.stack.is_complete() {
            return skip(SkipReason::MissingSurface);
        }
        if self.size.is_empty() {
            return skip(SkipReason::EmptyViewport);
        }
        if !data.has_log() {
            return skip(SkipReason::EmptyLog);
        }
        if self.stack.layout().raster.rect.is_degenerate() {
            return skip(SkipReason::DegenerateRaster);
        }
        if self
            .last
            .as_ref()
            .is_some_and(|k| k.matches(&data, self.size, self.theme))
        {
            trace!("inputs unchanged; no draw");
            return Evaluation::Unchanged;
        }

        let (size, margins, theme) = (self.size, self.margins, self.theme);
        let Some((legend, vector, raster)) = self.stack.targets_mut() else {
            return skip(SkipReason::MissingSurface);
        };
        self.phase = Phase::Rendering;
        self.draws += 1;
        debug!(
            draw = self.draws,
            width = size.width,
            height = size.height,
            theme = theme.name(),
            buckets = data.log.len(),
            "drawing chart"
        );

        let reporter = ErrorReporter::default();
        let request = DrawRequest {
            legend,
            vector,
            raster,
            reporter: &reporter,
            size,
            margins,
            theme,
            data: &data,
        };
        let routine = &mut self.routine;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| routine.draw(request)));

        let failure = match outcome {
            Ok(Ok(())) => reporter.take(),
            Ok(Err(e)) => Some(reporter.take().unwrap_or_else(|| e.into_message())),
            Err(payload) => Some(reporter.take().unwrap_or_else(|| panic_message(payload.as_ref()))),
        };
        self.last = Some(DrawKey { data, size, theme });

        match failure {
            None => {
                self.state.error_message = None;
                self.state.retry_count = 0;
                self.phase = Phase::Rendered;
                Evaluation::Rendered
            }
            Some(message) => {
                let message = DrawError::new(message).into_message();
                warn!(error = %message, retry_count = self.state.retry_count, "chart render failed");
                self.state.error_message = Some(message);
                self.phase = Phase::Failed;
                Evaluation::Failed
            }
        }
    }

    // ---- outputs ------------------------------------------------------------

    pub fn view(&self) -> ChartView<'_> {
        match self.state.error_text() {
            Some(message) => ChartView::Error(ErrorPanel {
                message,
                retry_label: self.state.retry_label(),
                rect: self.stack.layout().vector.rect,
            }),
            None => ChartView::Chart {
                layout: self.stack.layout(),
                legend: self.stack.legend(),
            },
        }
    }

    pub fn state(&self) -> &RenderState { &self.state }
    pub fn phase(&self) -> Phase { self.phase }
    /// Number of draw attempts made so far.
    pub fn draw_count(&self) -> u64 { self.draws }
    pub fn data(&self) -> Option<&ChartDataModel> { self.data.as_deref() }
    pub fn size(&self) -> Viewport { self.size }
    pub fn theme(&self) -> ThemeMode { self.theme }
    pub fn margins(&self) -> Margins { self.margins }
    pub fn layout(&self) -> &StackLayout { self.stack.layout() }
    pub fn legend(&self) -> Option<&LegendOverlay> { self.stack.legend() }
    pub fn stack(&self) -> &SurfaceStack<D::Vector, D::Raster> { &self.stack }

    /// Mounted surfaces for composition after a draw. Mutating them does not
    /// schedule a redraw.
    pub fn surfaces_mut(&mut self) -> Option<(&LegendOverlay, &mut D::Vector, &mut D::Raster)> {
        self.stack.targets_mut()
    }

    pub fn routine(&self) -> &D { &self.routine }
    pub fn routine_mut(&mut self) -> &mut D { &mut self.routine }
}

fn skip(reason: SkipReason) -> Evaluation {
    debug!(?reason, "draw preconditions not met");
    Evaluation::Skipped(reason)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        String::new()
    }
}
