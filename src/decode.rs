use crate::{
    error::{PixmergeError, PixmergeResult},
    model::ImageAsset,
};

/// Decodes one file's bytes into an [`ImageAsset`].
///
/// Any format the `image` crate recognizes is accepted; pixels are converted
/// to RGBA8 and premultiplied at ingest.
pub fn decode_image(name: &str, bytes: &[u8]) -> PixmergeResult<ImageAsset> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| PixmergeError::decode(format!("'{name}': {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    ImageAsset::from_rgba8_premul(name, width, height, rgba8_premul)
}

/// One file that failed to decode, paired with its error.
#[derive(Debug)]
pub struct DecodeFailure {
    pub name: String,
    pub error: PixmergeError,
}

/// Per-file outcome of a batch decode. One bad file does not fail the batch:
/// the caller sees the decodable subset (submission order preserved) next to
/// the failures and decides whether to proceed.
#[derive(Debug, Default)]
pub struct DecodeReport {
    pub decoded: Vec<ImageAsset>,
    pub failures: Vec<DecodeFailure>,
}

impl DecodeReport {
    pub fn all_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

pub fn decode_batch<'a, I>(files: I) -> DecodeReport
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    let mut report = DecodeReport::default();
    for (name, bytes) in files {
        match decode_image(name, bytes) {
            Ok(asset) => report.decoded.push(asset),
            Err(error) => {
                tracing::warn!(name, %error, "skipping undecodable file");
                report.failures.push(DecodeFailure {
                    name: name.to_string(),
                    error,
                });
            }
        }
    }
    report
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 255 {
            continue;
        }
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}
