//! Raw config parsing: the merge engine's inputs arrive as user-typed
//! strings (mode, gap, background). Malformed gap/color values recover to
//! safe defaults rather than failing the merge; an unknown mode is an error.

use crate::{
    color,
    error::PixmergeResult,
    model::{GAP_MAX, LayoutMode, MergeConfig},
};

/// Parses a raw gap string: empty or non-numeric input falls back to 0,
/// anything else is clamped to `[0, GAP_MAX]`.
pub fn parse_gap(raw: &str) -> u32 {
    let raw = raw.trim();
    match raw.parse::<i64>() {
        Ok(n) => n.clamp(0, i64::from(GAP_MAX)) as u32,
        Err(_) => {
            if !raw.is_empty() {
                tracing::warn!(raw, "gap is not an integer, falling back to 0");
            }
            0
        }
    }
}

impl MergeConfig {
    /// Builds a config from raw collaborator strings.
    ///
    /// Gap and background recover locally: a malformed value falls back to
    /// its default with a warning. The mode must be one of the three
    /// enumerated strings.
    pub fn from_raw(mode: &str, gap: &str, background: &str) -> PixmergeResult<Self> {
        let mode: LayoutMode = mode.parse()?;
        let gap = parse_gap(gap);
        let background = match color::parse_color(background) {
            Ok(c) => c,
            Err(err) => {
                tracing::warn!(%err, "falling back to default background");
                color::DEFAULT_BACKGROUND
            }
        };
        Ok(Self {
            mode,
            gap,
            background,
        })
    }
}
