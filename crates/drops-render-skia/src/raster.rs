// File: crates/drops-render-skia/src/raster.rs
// Summary: Raster draw target backed by a Skia CPU surface, reallocated when the inset size changes.

use anyhow::Result;
use drops_core::DrawError;
use skia_safe as skia;

#[derive(Default)]
pub struct RasterCanvas {
    surface: Option<skia::Surface>,
    width: i32,
    height: i32,
}

impl RasterCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canvas sized `width x height`; the caller repaints it wholesale.
    pub fn prepare(&mut self, width: i32, height: i32) -> Result<&skia::Canvas, DrawError> {
        if width <= 0 || height <= 0 {
            return Err(DrawError::new(format!("raster surface {width}x{height} is empty")));
        }
        if self.surface.is_none() || self.width != width || self.height != height {
            let surface = skia::surfaces::raster_n32_premul((width, height))
                .ok_or_else(|| DrawError::new(format!("failed to create {width}x{height} raster surface")))?;
            self.surface = Some(surface);
            self.width = width;
            self.height = height;
        }
        match self.surface.as_mut() {
            Some(surface) => Ok(surface.canvas()),
            None => Err(DrawError::new("raster surface unavailable")),
        }
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn is_allocated(&self) -> bool {
        self.surface.is_some()
    }

    pub fn snapshot(&mut self) -> Option<skia::Image> {
        self.surface.as_mut().map(|s| s.image_snapshot())
    }

    /// Encode the current raster content as PNG.
    pub fn encode_png(&mut self) -> Result<Vec<u8>> {
        let image = self
            .snapshot()
            .ok_or_else(|| anyhow::anyhow!("raster surface has not been painted"))?;
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }
}
