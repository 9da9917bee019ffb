// SPDX-License-Identifier: MPL-2.0
//! Live filter previews.
//!
//! The confirmed photo is decoded once and downscaled to [`MAX_PREVIEW_EDGE`].
//! Selecting a filter renders its CSS expression onto that copy with the same
//! colour matrices browsers use for `filter:`. Nothing rendered here is ever
//! uploaded; persistence goes through the photo service.

use crate::domain::filter::{CssFilterError, FilterDescriptor, FilterId, PreviewOp};
use iced::widget::image;
use image_rs::{imageops::FilterType, DynamicImage, GenericImageView, RgbaImage};
use std::sync::Arc;

/// Longest edge of the decoded working copy.
pub const MAX_PREVIEW_EDGE: u32 = 1280;

/// Vignette band as a fraction of the shorter edge.
const VIGNETTE_SPREAD: f32 = 0.12;
/// Darkness at the very edge of the vignette.
const VIGNETTE_STRENGTH: f32 = 0.5;

#[derive(Debug, Clone, thiserror::Error)]
pub enum PreviewError {
    #[error("failed to decode photo: {0}")]
    Decode(String),
    #[error(transparent)]
    Filter(#[from] CssFilterError),
    #[error("preview worker failed: {0}")]
    Worker(String),
}

/// A displayable image with its pixel size.
#[derive(Debug, Clone)]
pub struct PreviewImage {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

impl PreviewImage {
    #[must_use]
    pub fn from_dynamic(dynamic: &DynamicImage) -> Self {
        let (width, height) = dynamic.dimensions();
        let pixels = dynamic.to_rgba8().into_vec();
        Self {
            handle: image::Handle::from_rgba(width, height, pixels),
            width,
            height,
        }
    }
}

/// Decodes photo bytes into the working copy used for previews.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, PreviewError> {
    let decoded =
        image_rs::load_from_memory(bytes).map_err(|err| PreviewError::Decode(err.to_string()))?;
    let (width, height) = decoded.dimensions();
    if width.max(height) > MAX_PREVIEW_EDGE {
        Ok(decoded.resize(MAX_PREVIEW_EDGE, MAX_PREVIEW_EDGE, FilterType::Triangle))
    } else {
        Ok(decoded)
    }
}

/// Renders `descriptor` onto a copy of `source`.
pub fn render(source: &DynamicImage, descriptor: &FilterDescriptor) -> Result<DynamicImage, PreviewError> {
    let ops = descriptor.preview_ops()?;
    let mut pixels = source.to_rgba8();

    for op in ops {
        pixels = match op {
            PreviewOp::Blur(radius) if radius > 0.0 => image_rs::imageops::blur(&pixels, radius),
            PreviewOp::Blur(_) => pixels,
            other => {
                apply_pixelwise(&mut pixels, other);
                pixels
            }
        };
    }

    if descriptor.vignette {
        vignette(&mut pixels);
    }

    Ok(DynamicImage::ImageRgba8(pixels))
}

/// Decodes on the blocking pool.
pub async fn decode_async(bytes: Vec<u8>) -> Result<Arc<DynamicImage>, PreviewError> {
    tokio::task::spawn_blocking(move || decode(&bytes).map(Arc::new))
        .await
        .map_err(|err| PreviewError::Worker(err.to_string()))?
}

/// Renders `filter` on the blocking pool.
pub async fn render_async(
    source: Arc<DynamicImage>,
    filter: FilterId,
) -> Result<PreviewImage, PreviewError> {
    tokio::task::spawn_blocking(move || {
        render(&source, filter.descriptor()).map(|rendered| PreviewImage::from_dynamic(&rendered))
    })
    .await
    .map_err(|err| PreviewError::Worker(err.to_string()))?
}

// =============================================================================
// Pixel operations
// =============================================================================

type Matrix = [[f32; 3]; 3];

fn apply_pixelwise(pixels: &mut RgbaImage, op: PreviewOp) {
    match op {
        PreviewOp::Brightness(amount) => map_channels(pixels, |c| c * amount),
        PreviewOp::Contrast(amount) => map_channels(pixels, |c| (c - 0.5) * amount + 0.5),
        PreviewOp::Grayscale(amount) => apply_matrix(pixels, &grayscale_matrix(amount)),
        PreviewOp::Sepia(amount) => apply_matrix(pixels, &sepia_matrix(amount)),
        PreviewOp::Saturate(amount) => apply_matrix(pixels, &saturate_matrix(amount)),
        PreviewOp::HueRotate(degrees) => apply_matrix(pixels, &hue_rotate_matrix(degrees)),
        PreviewOp::Blur(_) => {}
    }
}

fn map_channels(pixels: &mut RgbaImage, f: impl Fn(f32) -> f32) {
    for pixel in pixels.pixels_mut() {
        for channel in pixel.0.iter_mut().take(3) {
            *channel = to_u8(f(f32::from(*channel) / 255.0));
        }
    }
}

fn apply_matrix(pixels: &mut RgbaImage, m: &Matrix) {
    for pixel in pixels.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        let (r, g, b) = (
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        );
        pixel.0[0] = to_u8(m[0][0] * r + m[0][1] * g + m[0][2] * b);
        pixel.0[1] = to_u8(m[1][0] * r + m[1][1] * g + m[1][2] * b);
        pixel.0[2] = to_u8(m[2][0] * r + m[2][1] * g + m[2][2] * b);
    }
}

fn to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn grayscale_matrix(amount: f32) -> Matrix {
    let k = 1.0 - amount.clamp(0.0, 1.0);
    [
        [0.2126 + 0.7874 * k, 0.7152 - 0.7152 * k, 0.0722 - 0.0722 * k],
        [0.2126 - 0.2126 * k, 0.7152 + 0.2848 * k, 0.0722 - 0.0722 * k],
        [0.2126 - 0.2126 * k, 0.7152 - 0.7152 * k, 0.0722 + 0.9278 * k],
    ]
}

fn sepia_matrix(amount: f32) -> Matrix {
    let k = 1.0 - amount.clamp(0.0, 1.0);
    [
        [0.393 + 0.607 * k, 0.769 - 0.769 * k, 0.189 - 0.189 * k],
        [0.349 - 0.349 * k, 0.686 + 0.314 * k, 0.168 - 0.168 * k],
        [0.272 - 0.272 * k, 0.534 - 0.534 * k, 0.131 + 0.869 * k],
    ]
}

fn saturate_matrix(s: f32) -> Matrix {
    let s = s.max(0.0);
    [
        [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
    ]
}

fn hue_rotate_matrix(degrees: f32) -> Matrix {
    let (sin, cos) = degrees.to_radians().sin_cos();
    [
        [
            0.213 + cos * 0.787 - sin * 0.213,
            0.715 - cos * 0.715 - sin * 0.715,
            0.072 - cos * 0.072 + sin * 0.928,
        ],
        [
            0.213 - cos * 0.213 + sin * 0.143,
            0.715 + cos * 0.285 + sin * 0.140,
            0.072 - cos * 0.072 - sin * 0.283,
        ],
        [
            0.213 - cos * 0.213 - sin * 0.787,
            0.715 - cos * 0.715 + sin * 0.715,
            0.072 + cos * 0.928 + sin * 0.072,
        ],
    ]
}

/// Darkens a band along every edge, like an inset box shadow.
fn vignette(pixels: &mut RgbaImage) {
    let (width, height) = pixels.dimensions();
    let spread = (width.min(height) as f32 * VIGNETTE_SPREAD).max(1.0);

    for (x, y, pixel) in pixels.enumerate_pixels_mut() {
        let edge = x.min(y).min(width - 1 - x).min(height - 1 - y) as f32;
        if edge >= spread {
            continue;
        }
        let falloff = 1.0 - edge / spread;
        let keep = 1.0 - VIGNETTE_STRENGTH * falloff * falloff;
        for channel in pixel.0.iter_mut().take(3) {
            *channel = to_u8(f32::from(*channel) / 255.0 * keep);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{ImageBuffer, Rgba};

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> DynamicImage {
        DynamicImage::ImageRgba8(ImageBuffer::from_pixel(width, height, Rgba(rgba)))
    }

    #[test]
    fn grayscale_equalizes_channels() {
        let rendered = render(&solid(4, 4, [200, 40, 90, 255]), FilterId::Grayscale.descriptor())
            .expect("render");
        let [r, g, b, a] = rendered.to_rgba8().get_pixel(1, 1).0;
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert_eq!(a, 255);
    }

    #[test]
    fn original_leaves_pixels_untouched() {
        let source = solid(3, 3, [10, 20, 30, 255]);
        let rendered = render(&source, FilterId::Original.descriptor()).expect("render");
        assert_eq!(rendered.to_rgba8(), source.to_rgba8());
    }

    #[test]
    fn sepia_warms_a_neutral_gray() {
        let rendered = render(&solid(2, 2, [128, 128, 128, 255]), FilterId::Sepia.descriptor())
            .expect("render");
        let [r, _, b, _] = rendered.to_rgba8().get_pixel(0, 0).0;
        assert!(r > b, "sepia should push red above blue, got r={r} b={b}");
    }

    #[test]
    fn brightness_and_contrast_are_clamped() {
        let mut pixels = solid(1, 1, [250, 5, 128, 255]).to_rgba8();
        apply_pixelwise(&mut pixels, PreviewOp::Brightness(2.0));
        assert_eq!(pixels.get_pixel(0, 0).0[0], 255);
        apply_pixelwise(&mut pixels, PreviewOp::Contrast(0.0));
        assert_eq!(pixels.get_pixel(0, 0).0[0], 128);
    }

    #[test]
    fn hue_rotate_full_turn_is_identity() {
        let mut pixels = solid(1, 1, [180, 60, 30, 255]).to_rgba8();
        apply_pixelwise(&mut pixels, PreviewOp::HueRotate(360.0));
        let [r, g, b, _] = pixels.get_pixel(0, 0).0;
        assert!(r.abs_diff(180) <= 1 && g.abs_diff(60) <= 1 && b.abs_diff(30) <= 1);
    }

    #[test]
    fn forever_darkens_edges_more_than_center() {
        let rendered = render(&solid(50, 50, [200, 200, 200, 255]), FilterId::Forever.descriptor())
            .expect("render")
            .to_rgba8();
        let edge = rendered.get_pixel(0, 25).0[0];
        let center = rendered.get_pixel(25, 25).0[0];
        assert!(edge < center, "edge {edge} should be darker than center {center}");
    }

    #[test]
    fn decode_downscales_large_photos() {
        let large = solid(MAX_PREVIEW_EDGE * 2, 10, [0, 0, 0, 255]);
        let mut bytes = std::io::Cursor::new(Vec::new());
        large
            .write_to(&mut bytes, image_rs::ImageFormat::Png)
            .expect("encode");
        let decoded = decode(bytes.get_ref()).expect("decode");
        assert_eq!(decoded.width(), MAX_PREVIEW_EDGE);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(decode(b"not an image"), Err(PreviewError::Decode(_))));
    }
}
