//! Session state for one merge workflow.
//!
//! The asset list accumulates across upload batches and is owned by an
//! explicit [`MergeSession`] value rather than ambient state. Export is
//! gated: the held composite is only downloadable while it still matches the
//! current asset list, so any change to the list (new batch, clear) discards
//! it.

use crate::{
    decode::{self, DecodeReport},
    error::PixmergeResult,
    model::{Composite, ImageAsset, MergeConfig},
    pipeline,
};

/// Fixed download filename for the exported composite.
pub const EXPORT_FILENAME: &str = "merged.png";
/// Fixed MIME type of the exported bytes.
pub const EXPORT_MIME: &str = "image/png";

/// The exported composite: fixed filename and MIME plus the PNG bytes.
#[derive(Clone, Copy, Debug)]
pub struct Export<'a> {
    pub filename: &'static str,
    pub mime: &'static str,
    pub bytes: &'a [u8],
}

#[derive(Debug, Default)]
pub struct MergeSession {
    assets: Vec<ImageAsset>,
    composite: Option<Composite>,
}

impl MergeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assets(&self) -> &[ImageAsset] {
        &self.assets
    }

    /// Decodes a batch of files and appends the decodable subset in
    /// submission order. Failures are reported per file and do not disturb
    /// the already-accumulated list. Any held composite is discarded.
    pub fn add_files<'a, I>(&mut self, files: I) -> DecodeReport
    where
        I: IntoIterator<Item = (&'a str, &'a [u8])>,
    {
        let report = decode::decode_batch(files);
        if !report.decoded.is_empty() {
            self.assets.extend(report.decoded.iter().cloned());
            self.composite = None;
        }
        report
    }

    /// Appends pre-decoded assets; the held composite is discarded.
    pub fn add_assets(&mut self, assets: impl IntoIterator<Item = ImageAsset>) {
        let before = self.assets.len();
        self.assets.extend(assets);
        if self.assets.len() != before {
            self.composite = None;
        }
    }

    /// Merges the current asset list.
    ///
    /// Fails with [`crate::PixmergeError::InvalidInput`] when fewer than two assets
    /// are held; a failed merge leaves the session untouched (the previous
    /// composite, if still valid, stays exportable).
    pub fn merge(&mut self, config: &MergeConfig) -> PixmergeResult<&Composite> {
        let composite = pipeline::merge_images(&self.assets, config)?;
        Ok(self.composite.insert(composite))
    }

    /// The downloadable export, if a composite matching the current asset
    /// list is held.
    pub fn export(&self) -> Option<Export<'_>> {
        self.composite.as_ref().map(|c| Export {
            filename: EXPORT_FILENAME,
            mime: EXPORT_MIME,
            bytes: c.png_bytes(),
        })
    }

    /// Empties the asset list, discards the composite, disables export.
    pub fn clear(&mut self) {
        self.assets.clear();
        self.composite = None;
    }
}
