//! Layout planning: pure geometry, no pixels.
//!
//! [`plan`] maps an ordered list of image extents plus a [`MergeConfig`] to a
//! [`LayoutPlan`]: the output canvas size and one top-left coordinate per
//! asset. No scaling happens anywhere; the largest image in a row/column
//! dictates that row/column's extent and smaller images leave
//! background-colored padding.

use crate::{
    error::{PixmergeError, PixmergeResult},
    model::{Extent, GAP_MAX, LayoutMode, LayoutPlan, MergeConfig, Placement},
};

/// Computes placement geometry for a merge.
///
/// Fails when fewer than two extents are supplied. Gap is clamped to
/// `[0, GAP_MAX]` again here; the config collaborator normally does this but
/// the planner must not misbehave on unclamped input.
pub fn plan(extents: &[Extent], config: &MergeConfig) -> PixmergeResult<LayoutPlan> {
    if extents.len() < 2 {
        return Err(PixmergeError::invalid_input(
            "at least 2 images are required to merge",
        ));
    }
    let gap = u64::from(config.gap.min(GAP_MAX));

    match config.mode {
        LayoutMode::Horizontal => plan_row(extents, gap),
        LayoutMode::Vertical => plan_column(extents, gap),
        LayoutMode::Grid2 => plan_grid2(extents, gap),
    }
}

/// All images share the top edge; x accumulates left-to-right.
fn plan_row(extents: &[Extent], gap: u64) -> PixmergeResult<LayoutPlan> {
    let mut placements = Vec::with_capacity(extents.len());
    let mut x = 0u64;
    let mut max_h = 0u64;

    for (index, e) in extents.iter().enumerate() {
        placements.push(Placement {
            index,
            x: to_coord(x)?,
            y: 0,
        });
        x += u64::from(e.width) + gap;
        max_h = max_h.max(u64::from(e.height));
    }

    // the trailing accumulation added one gap too many
    LayoutPlan::checked(x - gap, max_h, placements)
}

/// All images share the left edge; y accumulates top-to-bottom.
fn plan_column(extents: &[Extent], gap: u64) -> PixmergeResult<LayoutPlan> {
    let mut placements = Vec::with_capacity(extents.len());
    let mut y = 0u64;
    let mut max_w = 0u64;

    for (index, e) in extents.iter().enumerate() {
        placements.push(Placement {
            index,
            x: 0,
            y: to_coord(y)?,
        });
        y += u64::from(e.height) + gap;
        max_w = max_w.max(u64::from(e.width));
    }

    LayoutPlan::checked(max_w, y - gap, placements)
}

/// Fixed 2-column grid. Column width is the max width of the images in that
/// column, row height the max height in that row; each image sits at its
/// cell's top-left corner (not centered).
fn plan_grid2(extents: &[Extent], gap: u64) -> PixmergeResult<LayoutPlan> {
    const COLS: usize = 2;
    let rows = extents.len().div_ceil(COLS);

    let mut col_w = [0u64; COLS];
    let mut row_h = vec![0u64; rows];
    for (i, e) in extents.iter().enumerate() {
        col_w[i % COLS] = col_w[i % COLS].max(u64::from(e.width));
        row_h[i / COLS] = row_h[i / COLS].max(u64::from(e.height));
    }

    let mut placements = Vec::with_capacity(extents.len());
    let mut y = 0u64;
    for (r, &h) in row_h.iter().enumerate() {
        let mut x = 0u64;
        for (c, &w) in col_w.iter().enumerate() {
            let i = r * COLS + c;
            if i >= extents.len() {
                break;
            }
            placements.push(Placement {
                index: i,
                x: to_coord(x)?,
                y: to_coord(y)?,
            });
            x += w + gap;
        }
        y += h + gap;
    }

    let out_w = col_w[0] + col_w[1] + gap;
    let out_h = row_h.iter().sum::<u64>() + gap * (rows as u64 - 1);
    LayoutPlan::checked(out_w, out_h, placements)
}

impl LayoutPlan {
    fn checked(width: u64, height: u64, placements: Vec<Placement>) -> PixmergeResult<Self> {
        Ok(Self {
            output_width: to_coord(width)?,
            output_height: to_coord(height)?,
            placements,
        })
    }
}

fn to_coord(v: u64) -> PixmergeResult<u32> {
    u32::try_from(v)
        .map_err(|_| PixmergeError::invalid_input("merged canvas geometry exceeds u32 range"))
}
