// File: crates/drops-window-demo/src/main.rs
// Summary: Windowed demo that draws the drops chart through the orchestrator and blits the composite via winit + softbuffer.
// Keys: T toggles the theme, R retries after a failure. Clicking the Retry button also retries.

use std::num::NonZeroU32;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use chrono::Utc;
use drops_core::{ChartView, Evaluation, StaticRegistry, ThemeMode, Viewport, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use drops_demo::{build_data, init_tracing, load_events_csv, sample_events, sample_registry};
use drops_render_skia::{retry_button, Composite, RasterCanvas, SkiaDrawRoutine, SkiaOrchestrator, VectorCanvas};
use tracing::{debug, error, info};
use winit::event::{ElementState, Event, KeyboardInput, MouseButton, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

struct App {
    orch: SkiaOrchestrator,
    out: Composite,
    theme: ThemeMode,
    cursor: Option<(f64, f64)>,
}

impl App {
    fn resize(&mut self, width: i32, height: i32) -> Result<()> {
        self.orch.set_size(Viewport::new(width, height));
        self.out.resize(width, height)
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.orch.set_theme(self.theme);
        info!(theme = self.theme.name(), "theme toggled");
    }

    fn retry(&mut self) {
        if self.orch.retry() {
            info!(label = %self.orch.state().retry_label(), "retrying");
        }
    }

    /// Route pointer movement to the hover tracker of the last draw.
    fn hover(&mut self, pos: Option<(f64, f64)>) {
        self.cursor = pos;
        let layout = *self.orch.layout();
        let (Some(hover), Some(data)) = (self.orch.routine().hover(), self.orch.data()) else {
            return;
        };
        match pos {
            Some((x, y)) => {
                hover.pointer_moved(data, &layout, x, y);
            }
            None => hover.pointer_left(),
        }
    }

    fn click(&mut self) {
        let Some((x, y)) = self.cursor else { return };
        let on_button = matches!(self.orch.view(), ChartView::Error(p) if retry_button(p.rect).contains(x, y));
        if on_button {
            self.retry();
        }
    }

    /// One update-cycle tick followed by composition of whatever should be visible.
    fn frame(&mut self) -> Result<Vec<u32>> {
        let outcome = self.orch.evaluate();
        debug!(?outcome, "tick");
        let layout = *self.orch.layout();
        if let ChartView::Error(panel) = self.orch.view() {
            self.out.error_panel(&panel, self.theme);
            return self.out.argb();
        }
        match (outcome, self.orch.surfaces_mut()) {
            (Evaluation::Skipped(_), _) | (_, None) => self.out.clear(self.theme),
            (_, Some((legend, vector, raster))) => {
                self.out.compose(vector, raster, &layout, self.theme)?;
                self.out.draw_legend(legend, &layout, self.theme);
            }
        }
        self.out.argb()
    }

    fn title(&self) -> String {
        let mut title = String::from("Player drops");
        if let Some(legend) = self.orch.legend().filter(|l| l.opacity().is_visible()) {
            let readout: Vec<String> = legend
                .rows()
                .iter()
                .map(|r| format!("{} {}", r.label, r.slot().text()))
                .collect();
            title.push_str(" | ");
            title.push_str(&readout.join(", "));
        }
        title
    }
}

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();
    let (period, events) = match args.first() {
        Some(p) => (
            p.file_stem().and_then(|s| s.to_str()).unwrap_or("drops").to_string(),
            load_events_csv(p)?,
        ),
        None => ("Last 24 hours".to_string(), sample_events(Utc::now())),
    };
    let registry = match args.get(1) {
        Some(p) => StaticRegistry::from_csv_path(p).with_context(|| format!("loading {}", p.display()))?,
        None => sample_registry(),
    };

    let mut orch = SkiaOrchestrator::new(
        SkiaDrawRoutine::new().with_bar_gap(0.15).with_y_tick_target(6),
        Rc::new(registry),
    );
    orch.mount_vector(VectorCanvas::new());
    orch.mount_raster(RasterCanvas::new());
    orch.set_data(build_data(&period, &events)?).context("chart data rejected")?;

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("Player drops")
        .with_inner_size(winit::dpi::LogicalSize::new(DEFAULT_WIDTH as f64, DEFAULT_HEIGHT as f64))
        .build(&event_loop)
        .context("build window")?;
    let context = unsafe { softbuffer::Context::new(&window) }.context("softbuffer context")?;
    let mut surface = unsafe { softbuffer::Surface::new(&context, &window) }.context("softbuffer surface")?;

    let size = window.inner_size();
    let mut app = App {
        orch,
        out: Composite::new(size.width as i32, size.height as i32)?,
        theme: ThemeMode::Dark,
        cursor: None,
    };
    app.resize(size.width as i32, size.height as i32)?;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;
        match event {
            Event::WindowEvent { event, .. } => {
                match event {
                    WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
                    WindowEvent::Resized(new_size) => {
                        if let Err(e) = app.resize(new_size.width as i32, new_size.height as i32) {
                            error!(error = %e, "resize failed");
                        }
                    }
                    WindowEvent::CursorMoved { position, .. } => app.hover(Some((position.x, position.y))),
                    WindowEvent::CursorLeft { .. } => app.hover(None),
                    WindowEvent::MouseInput { state: ElementState::Pressed, button: MouseButton::Left, .. } => {
                        app.click()
                    }
                    WindowEvent::KeyboardInput {
                        input: KeyboardInput { state: ElementState::Pressed, virtual_keycode: Some(key), .. },
                        ..
                    } => match key {
                        VirtualKeyCode::T => app.toggle_theme(),
                        VirtualKeyCode::R => app.retry(),
                        VirtualKeyCode::Escape => *control_flow = ControlFlow::Exit,
                        _ => {}
                    },
                    _ => return,
                }
                window.set_title(&app.title());
                window.request_redraw();
            }
            Event::RedrawRequested(_) => {
                let size = window.inner_size();
                let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
                    return;
                };
                if let Err(e) = surface.resize(w, h) {
                    error!(error = %e, "softbuffer resize failed");
                    return;
                }
                let pixels = match app.frame() {
                    Ok(px) => px,
                    Err(e) => {
                        error!(error = %e, "frame composition failed");
                        return;
                    }
                };
                let mut buffer = match surface.buffer_mut() {
                    Ok(b) => b,
                    Err(e) => {
                        error!(error = %e, "softbuffer buffer unavailable");
                        return;
                    }
                };
                let n = buffer.len().min(pixels.len());
                // softbuffer wants 0RGB; the alpha byte is ignored.
                buffer[..n].copy_from_slice(&pixels[..n]);
                if let Err(e) = buffer.present() {
                    error!(error = %e, "present failed");
                }
            }
            _ => {}
        }
    })
}
