use std::sync::Arc;

use crate::{
    color::Rgba8,
    error::{PixmergeError, PixmergeResult},
};

/// Maximum gap (in pixels) between adjacent images.
pub const GAP_MAX: u32 = 100;

/// One decoded input image, order-preserved from submission.
///
/// Pixels are premultiplied RGBA8, row-major, tightly packed. Assets are
/// immutable once constructed and shared cheaply via [`Arc`].
#[derive(Clone, Debug)]
pub struct ImageAsset {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl ImageAsset {
    pub fn from_rgba8_premul(
        name: impl Into<String>,
        width: u32,
        height: u32,
        rgba8_premul: Vec<u8>,
    ) -> PixmergeResult<Self> {
        if width == 0 || height == 0 {
            return Err(PixmergeError::invalid_input(
                "image width/height must be > 0",
            ));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| PixmergeError::invalid_input("image pixel count overflow"))?;
        if rgba8_premul.len() != expected {
            return Err(PixmergeError::invalid_input(format!(
                "pixel buffer length {} does not match {}x{} rgba8",
                rgba8_premul.len(),
                width,
                height
            )));
        }
        Ok(Self {
            name: name.into(),
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    pub fn extent(&self) -> Extent {
        Extent {
            width: self.width,
            height: self.height,
        }
    }
}

/// Dimension-only view of an asset; the planner never touches pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    Horizontal,
    Vertical,
    Grid2,
}

impl std::str::FromStr for LayoutMode {
    type Err = PixmergeError;

    fn from_str(s: &str) -> PixmergeResult<Self> {
        match s {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            "grid2" => Ok(Self::Grid2),
            other => Err(PixmergeError::invalid_config(format!(
                "unknown layout mode '{other}' (expected horizontal, vertical, or grid2)"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MergeConfig {
    pub mode: LayoutMode,
    /// Uniform spacing between adjacent images, clamped to `[0, GAP_MAX]`.
    pub gap: u32,
    /// Fill color for the canvas; filled fully opaque regardless of alpha.
    pub background: Rgba8,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            mode: LayoutMode::Horizontal,
            gap: 0,
            background: crate::color::DEFAULT_BACKGROUND,
        }
    }
}

/// Top-left origin of one asset within the output canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Placement {
    pub index: usize,
    pub x: u32,
    pub y: u32,
}

/// Computed geometry for one merge: canvas size plus per-asset coordinates,
/// ordered and aligned with the input asset list. Never mutated after
/// creation; consumed once by the compositor.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LayoutPlan {
    pub output_width: u32,
    pub output_height: u32,
    pub placements: Vec<Placement>,
}

impl LayoutPlan {
    /// Checks the plan's invariants against the extents it was computed from:
    /// one placement per asset, every bounding box inside the canvas.
    pub fn validate(&self, extents: &[Extent]) -> PixmergeResult<()> {
        if self.placements.len() != extents.len() {
            return Err(PixmergeError::invalid_input(format!(
                "plan has {} placements for {} assets",
                self.placements.len(),
                extents.len()
            )));
        }
        for p in &self.placements {
            let e = extents.get(p.index).ok_or_else(|| {
                PixmergeError::invalid_input(format!("placement references asset {}", p.index))
            })?;
            let in_bounds = u64::from(p.x) + u64::from(e.width) <= u64::from(self.output_width)
                && u64::from(p.y) + u64::from(e.height) <= u64::from(self.output_height);
            if !in_bounds {
                return Err(PixmergeError::invalid_input(format!(
                    "placement {} at ({},{}) escapes {}x{} canvas",
                    p.index, p.x, p.y, self.output_width, self.output_height
                )));
            }
        }
        Ok(())
    }
}

/// The rendered output: premultiplied RGBA8 buffer plus encoded PNG bytes.
///
/// The background fill is fully opaque, so the premultiplied buffer is
/// byte-identical to straight alpha and the PNG encodes it directly.
#[derive(Clone, Debug)]
pub struct Composite {
    pub width: u32,
    pub height: u32,
    pub rgba8: Vec<u8>,
    png: Vec<u8>,
}

impl Composite {
    pub(crate) fn new(width: u32, height: u32, rgba8: Vec<u8>, png: Vec<u8>) -> Self {
        Self {
            width,
            height,
            rgba8,
            png,
        }
    }

    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }
}
