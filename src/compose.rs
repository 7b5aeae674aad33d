//! CPU compositing: fill the canvas, blit each asset at its planned
//! coordinate, encode to PNG.
//!
//! Pixel contract: sources are premultiplied RGBA8 and blitting is
//! source-over. The background fill is forced fully opaque, so the finished
//! buffer has alpha 255 everywhere and premultiplied equals straight alpha;
//! the PNG encoder consumes it directly.

use image::{ExtendedColorType, ImageEncoder, codecs::png::PngEncoder};

use crate::{
    color::Rgba8,
    error::{PixmergeError, PixmergeResult},
    model::{Composite, ImageAsset, LayoutPlan},
};

type PremulRgba8 = [u8; 4];

/// Rasterizes a plan over its assets.
///
/// Assets and placements must be aligned (index i placed by placement i);
/// the zero-dimension and bounds checks are defensive only, the planner
/// guarantees both.
pub fn render(
    assets: &[ImageAsset],
    plan: &LayoutPlan,
    background: Rgba8,
) -> PixmergeResult<Composite> {
    if plan.output_width == 0 || plan.output_height == 0 {
        return Err(PixmergeError::render("plan has zero output dimensions"));
    }
    if plan.placements.len() != assets.len() {
        return Err(PixmergeError::render(format!(
            "plan has {} placements for {} assets",
            plan.placements.len(),
            assets.len()
        )));
    }

    let len = (plan.output_width as usize)
        .checked_mul(plan.output_height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| PixmergeError::render("output buffer size overflow"))?;

    // solid, fully opaque fill; asset alpha composites over it
    let bg = [background[0], background[1], background[2], 255];
    let mut buf = vec![0u8; len];
    for px in buf.chunks_exact_mut(4) {
        px.copy_from_slice(&bg);
    }

    for p in &plan.placements {
        let asset = &assets[p.index];
        blit_over(&mut buf, plan.output_width, plan.output_height, asset, p.x, p.y)?;
    }

    let png = encode_png(&buf, plan.output_width, plan.output_height)?;
    Ok(Composite::new(
        plan.output_width,
        plan.output_height,
        buf,
        png,
    ))
}

/// Source-over blit of one asset's premultiplied pixels at (x, y).
fn blit_over(
    dst: &mut [u8],
    dst_w: u32,
    dst_h: u32,
    asset: &ImageAsset,
    x: u32,
    y: u32,
) -> PixmergeResult<()> {
    let fits = u64::from(x) + u64::from(asset.width) <= u64::from(dst_w)
        && u64::from(y) + u64::from(asset.height) <= u64::from(dst_h);
    if !fits {
        return Err(PixmergeError::render(format!(
            "asset '{}' at ({x},{y}) escapes {dst_w}x{dst_h} canvas",
            asset.name
        )));
    }

    let src = asset.rgba8_premul.as_slice();
    let src_stride = asset.width as usize * 4;
    let dst_stride = dst_w as usize * 4;

    for row in 0..asset.height as usize {
        let s = &src[row * src_stride..(row + 1) * src_stride];
        let start = (y as usize + row) * dst_stride + x as usize * 4;
        let d = &mut dst[start..start + src_stride];
        for (dp, sp) in d.chunks_exact_mut(4).zip(s.chunks_exact(4)) {
            let out = over(
                [dp[0], dp[1], dp[2], dp[3]],
                [sp[0], sp[1], sp[2], sp[3]],
            );
            dp.copy_from_slice(&out);
        }
    }
    Ok(())
}

fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 255 {
        return src;
    }
    if src[3] == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn encode_png(rgba8: &[u8], width: u32, height: u32) -> PixmergeResult<Vec<u8>> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(rgba8, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| PixmergeError::render(format!("png encode: {e}")))?;
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Placement;

    fn solid(name: &str, width: u32, height: u32, px: PremulRgba8) -> ImageAsset {
        let data = px.repeat((width * height) as usize);
        ImageAsset::from_rgba8_premul(name, width, height, data).unwrap()
    }

    fn pixel(c: &Composite, x: u32, y: u32) -> PremulRgba8 {
        let i = ((y * c.width + x) * 4) as usize;
        [c.rgba8[i], c.rgba8[i + 1], c.rgba8[i + 2], c.rgba8[i + 3]]
    }

    fn two_by_two_plan() -> LayoutPlan {
        LayoutPlan {
            output_width: 5,
            output_height: 2,
            placements: vec![
                Placement { index: 0, x: 0, y: 0 },
                Placement { index: 1, x: 3, y: 0 },
            ],
        }
    }

    #[test]
    fn fills_background_and_blits_at_offsets() {
        let assets = [
            solid("red", 2, 2, [255, 0, 0, 255]),
            solid("blue", 2, 2, [0, 0, 255, 255]),
        ];
        let c = render(&assets, &two_by_two_plan(), [0, 255, 0, 255]).unwrap();

        assert_eq!((c.width, c.height), (5, 2));
        assert_eq!(pixel(&c, 0, 0), [255, 0, 0, 255]);
        assert_eq!(pixel(&c, 1, 1), [255, 0, 0, 255]);
        assert_eq!(pixel(&c, 2, 0), [0, 255, 0, 255]); // gap column is background
        assert_eq!(pixel(&c, 3, 0), [0, 0, 255, 255]);
        assert_eq!(pixel(&c, 4, 1), [0, 0, 255, 255]);
    }

    #[test]
    fn background_alpha_is_forced_opaque() {
        let assets = [
            solid("a", 1, 1, [10, 10, 10, 255]),
            solid("b", 1, 1, [20, 20, 20, 255]),
        ];
        let plan = LayoutPlan {
            output_width: 3,
            output_height: 1,
            placements: vec![
                Placement { index: 0, x: 0, y: 0 },
                Placement { index: 1, x: 2, y: 0 },
            ],
        };
        let c = render(&assets, &plan, [0, 0, 0, 0]).unwrap();
        assert_eq!(pixel(&c, 1, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn translucent_source_composites_over_background() {
        // premultiplied half-opaque red over opaque white
        let assets = [
            solid("half-red", 1, 1, [128, 0, 0, 128]),
            solid("opaque", 1, 1, [0, 0, 0, 255]),
        ];
        let plan = LayoutPlan {
            output_width: 2,
            output_height: 1,
            placements: vec![
                Placement { index: 0, x: 0, y: 0 },
                Placement { index: 1, x: 1, y: 0 },
            ],
        };
        let c = render(&assets, &plan, [255, 255, 255, 255]).unwrap();

        let px = pixel(&c, 0, 0);
        assert_eq!(px[3], 255); // opaque dst stays opaque
        assert_eq!(px[0], 255); // full red survives over white
        assert!(px[1] > 0 && px[1] < 255); // white shows through at half strength
    }

    #[test]
    fn rejects_zero_dimension_plan() {
        let assets = [
            solid("a", 1, 1, [0, 0, 0, 255]),
            solid("b", 1, 1, [0, 0, 0, 255]),
        ];
        let plan = LayoutPlan {
            output_width: 0,
            output_height: 4,
            placements: vec![],
        };
        assert!(matches!(
            render(&assets, &plan, [0, 0, 0, 255]),
            Err(PixmergeError::Render(_))
        ));
    }

    #[test]
    fn rejects_out_of_bounds_placement() {
        let assets = [
            solid("a", 2, 2, [0, 0, 0, 255]),
            solid("b", 2, 2, [0, 0, 0, 255]),
        ];
        let plan = LayoutPlan {
            output_width: 3,
            output_height: 2,
            placements: vec![
                Placement { index: 0, x: 0, y: 0 },
                Placement { index: 1, x: 2, y: 0 },
            ],
        };
        assert!(render(&assets, &plan, [0, 0, 0, 255]).is_err());
    }

    #[test]
    fn png_bytes_decode_back_to_the_buffer() {
        let assets = [
            solid("red", 2, 2, [255, 0, 0, 255]),
            solid("blue", 2, 2, [0, 0, 255, 255]),
        ];
        let c = render(&assets, &two_by_two_plan(), [0, 255, 0, 255]).unwrap();

        let decoded = image::load_from_memory(c.png_bytes()).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (5, 2));
        assert_eq!(decoded.into_raw(), c.rgba8);
    }
}
