// File: crates/drops-demo/src/main.rs
// Summary: Headless demo: load (or synthesize) a drop log, draw it through the orchestrator, write PNG/SVG and a hover readout.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use drops_core::{ChartView, Evaluation, StaticRegistry, ThemeMode, Viewport, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use drops_demo::{build_data, init_tracing, load_events_csv, out_path, sample_events, sample_registry};
use drops_render_skia::{Composite, RasterCanvas, SkiaDrawRoutine, SkiaOrchestrator, VectorCanvas};
use tracing::{info, warn};

fn main() -> Result<()> {
    init_tracing();

    // Args: [events.csv] [categories.csv] [--light]
    let mut dark = true;
    let mut paths: Vec<PathBuf> = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--light" => dark = false,
            "--dark" => dark = true,
            _ => paths.push(PathBuf::from(arg)),
        }
    }
    let theme = ThemeMode::from_dark_flag(dark);

    let (period, events) = match paths.first() {
        Some(p) => (period_name(p), load_events_csv(p)?),
        None => {
            info!("no drop log given; using a synthesized day of drops");
            ("Last 24 hours".to_string(), sample_events(Utc::now()))
        }
    };
    let registry = match paths.get(1) {
        Some(p) => StaticRegistry::from_csv_path(p)
            .with_context(|| format!("loading categories from {}", p.display()))?,
        None => sample_registry(),
    };
    let data = build_data(&period, &events)?;

    let mut orch = SkiaOrchestrator::new(SkiaDrawRoutine::new().with_text_size(13.0), Rc::new(registry));
    orch.mount_vector(VectorCanvas::new());
    orch.mount_raster(RasterCanvas::new());
    orch.set_size(Viewport::new(DEFAULT_WIDTH, DEFAULT_HEIGHT));
    orch.set_theme(theme);
    orch.set_data(data).context("chart data rejected")?;

    let outcome = orch.evaluate();
    info!(?outcome, theme = theme.name(), "evaluated");
    let mut out = Composite::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)?;

    if let ChartView::Error(panel) = orch.view() {
        out.error_panel(&panel, theme);
        let png = out_path(&period, "error", "png");
        std::fs::write(&png, out.png()?).with_context(|| format!("writing {}", png.display()))?;
        warn!(path = %png.display(), "wrote error panel");
        bail!("{}", panel.message);
    }
    if let Evaluation::Skipped(reason) = outcome {
        bail!("nothing drawn: {reason:?}");
    }

    // Hover the middle bucket so the legend shows a readout.
    let layout = *orch.layout();
    if let (Some(hover), Some(data)) = (orch.routine().hover(), orch.data()) {
        let r = layout.raster.rect;
        let x = (r.left + r.right) as f64 * 0.5;
        let y = (r.top + r.bottom) as f64 * 0.5;
        if let Some(index) = hover.pointer_moved(data, &layout, x, y) {
            info!(bucket = index, time = %data.log[index].time, "hovered");
        }
    }
    if let Some(legend) = orch.legend() {
        for row in legend.rows() {
            info!(category = %row.id, label = %row.label, value = %row.slot().text(), "legend");
        }
    }

    let Some((legend, vector, raster)) = orch.surfaces_mut() else {
        bail!("surfaces were unmounted");
    };
    out.compose(vector, raster, &layout, theme)?;
    out.draw_legend(legend, &layout, theme);

    let png = out_path(&period, "", "png");
    std::fs::write(&png, out.png()?).with_context(|| format!("writing {}", png.display()))?;
    println!("Wrote {}", png.display());
    let svg = out_path(&period, "axes", "svg");
    std::fs::write(&svg, vector.to_svg()).with_context(|| format!("writing {}", svg.display()))?;
    println!("Wrote {}", svg.display());
    Ok(())
}

fn period_name(path: &Path) -> String {
    path.file_stem().and_then(|s| s.to_str()).unwrap_or("drops").to_string()
}
