#![forbid(unsafe_code)]

pub mod color;
pub mod compose;
pub mod config;
pub mod decode;
pub mod error;
pub mod layout;
pub mod model;
pub mod pipeline;
pub mod session;

pub use color::{DEFAULT_BACKGROUND, Rgba8, parse_color};
pub use compose::render;
pub use decode::{DecodeFailure, DecodeReport, decode_batch, decode_image};
pub use error::{PixmergeError, PixmergeResult};
pub use layout::plan;
pub use model::{
    Composite, Extent, GAP_MAX, ImageAsset, LayoutMode, LayoutPlan, MergeConfig, Placement,
};
pub use pipeline::merge_images;
pub use session::{EXPORT_FILENAME, EXPORT_MIME, Export, MergeSession};
