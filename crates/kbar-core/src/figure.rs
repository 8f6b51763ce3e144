// File: crates/kbar-core/src/figure.rs
// Summary: Figure/axes handles returned by `plot` (pixels, panel geometry, titles).

use std::io::Cursor;
use std::path::Path;

use crate::error::{PlotError, PlotResult};
use crate::layout::RectI32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelRole {
    Price,
    Volume,
    Extra(usize),
}

/// One panel of a rendered figure.
#[derive(Clone, Debug, PartialEq)]
pub struct Axes {
    pub role: PanelRole,
    /// Panel number as addressed by overlays (0 = price, 1 = volume, ...).
    pub panel: usize,
    pub rect: RectI32,
    pub y_range: (f64, f64),
    pub ylabel: Option<String>,
    /// Rendered x tick labels, left to right.
    pub xticklabels: Vec<String>,
}

/// Rendered chart: RGBA8 pixels plus the axes that were laid out.
#[derive(Clone, Debug)]
pub struct Figure {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    axes: Vec<Axes>,
    suptitle: Option<String>,
}

impl Figure {
    pub(crate) fn new(width: u32, height: u32, pixels: Vec<u8>, axes: Vec<Axes>, suptitle: Option<String>) -> Self {
        Self { width, height, pixels, axes, suptitle }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Unpremultiplied RGBA8, row-major, `width * 4` bytes per row.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn axes(&self) -> &[Axes] {
        &self.axes
    }

    pub fn axes_for(&self, role: PanelRole) -> Option<&Axes> {
        self.axes.iter().find(|a| a.role == role)
    }

    pub fn suptitle(&self) -> Option<&str> {
        self.suptitle.as_deref()
    }

    pub fn to_png_bytes(&self) -> PlotResult<Vec<u8>> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
            .ok_or_else(|| PlotError::Encode("pixel buffer does not match figure size".into()))?;
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png)
            .map_err(|e| PlotError::Encode(e.to_string()))?;
        Ok(out.into_inner())
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> PlotResult<()> {
        let bytes = self.to_png_bytes()?;
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, bytes)?;
        Ok(())
    }
}
