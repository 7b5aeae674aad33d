use crate::{
    compose,
    error::PixmergeResult,
    layout,
    model::{Composite, ImageAsset, MergeConfig},
};

/// Plan + render in one call.
///
/// This is the primary "one-shot" API for producing a composite from a list
/// of decoded assets. The merge is a single synchronous computation over
/// already-materialized pixel data: plan geometry first, then rasterize.
#[tracing::instrument(skip(assets), fields(n = assets.len(), mode = ?config.mode))]
pub fn merge_images(assets: &[ImageAsset], config: &MergeConfig) -> PixmergeResult<Composite> {
    let extents: Vec<_> = assets.iter().map(ImageAsset::extent).collect();
    let plan = layout::plan(&extents, config)?;
    tracing::debug!(
        width = plan.output_width,
        height = plan.output_height,
        "layout planned"
    );
    compose::render(assets, &plan, config.background)
}
