use std::io::Write;

use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, Frame, ImageEncoder, RgbaImage};
use log::debug;

use crate::error::{Error, Result};

const JPEG_QUALITY: u8 = 90;
/// NeuQuant の速度 (1 = 最高品質, 30 = 最速)
const GIF_QUANTIZE_SPEED: i32 = 10;

/// Encodings the raster renderer can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    Png,
    Jpeg,
    Gif,
}

impl RasterFormat {
    /// `png`, `jpeg` / `jpg`, `gif` in any case
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(RasterFormat::Png),
            "jpg" | "jpeg" => Ok(RasterFormat::Jpeg),
            "gif" => Ok(RasterFormat::Gif),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Decodes avatar bytes, center-crops them to a square and scales the
/// square to `size`×`size` with Catmull-Rom.
pub fn prepare_avatar(bytes: &[u8], size: u32) -> Result<RgbaImage> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| Error::AvatarFetchFailed(format!("cannot decode avatar: {e}")))?;
    debug!("avatar {}x{} -> {size}", decoded.width(), decoded.height());
    let square = crop_square(&decoded);
    Ok(square
        .resize_exact(size.max(1), size.max(1), FilterType::CatmullRom)
        .to_rgba8())
}

/// Largest centered square
pub fn crop_square(img: &DynamicImage) -> DynamicImage {
    let (w, h) = (img.width(), img.height());
    let side = w.min(h);
    img.crop_imm((w - side) / 2, (h - side) / 2, side, side)
}

pub fn encode_image<W: Write>(writer: W, img: &RgbaImage, format: RasterFormat) -> Result<()> {
    let (width, height) = img.dimensions();
    match format {
        RasterFormat::Png => {
            PngEncoder::new(writer).write_image(img.as_raw(), width, height, ExtendedColorType::Rgba8)?;
        }
        RasterFormat::Jpeg => {
            // JPEG はアルファを持てない
            let rgb = DynamicImage::ImageRgba8(img.clone()).to_rgb8();
            JpegEncoder::new_with_quality(writer, JPEG_QUALITY).encode_image(&rgb)?;
        }
        RasterFormat::Gif => {
            let mut encoder = GifEncoder::new_with_speed(writer, GIF_QUANTIZE_SPEED);
            encoder.encode_frame(Frame::new(img.clone()))?;
        }
    }
    Ok(())
}

/// `encode_image` with the format given by name
pub fn encode_image_named<W: Write>(writer: W, img: &RgbaImage, format: &str) -> Result<()> {
    encode_image(writer, img, RasterFormat::from_name(format)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};

    fn sample(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        })
    }

    #[test]
    fn format_names() {
        assert_eq!(RasterFormat::from_name("PNG").unwrap(), RasterFormat::Png);
        assert_eq!(RasterFormat::from_name("jpg").unwrap(), RasterFormat::Jpeg);
        assert_eq!(RasterFormat::from_name(" gif ").unwrap(), RasterFormat::Gif);
        assert!(matches!(
            RasterFormat::from_name("bmp"),
            Err(Error::UnsupportedFormat(name)) if name == "bmp"
        ));
    }

    #[test]
    fn encodes_each_format_with_its_signature() {
        let img = sample(8, 4);
        for (format, expected) in [
            (RasterFormat::Png, ImageFormat::Png),
            (RasterFormat::Jpeg, ImageFormat::Jpeg),
            (RasterFormat::Gif, ImageFormat::Gif),
        ] {
            let mut out = Vec::new();
            encode_image(&mut out, &img, format).unwrap();
            assert_eq!(image::guess_format(&out).unwrap(), expected);
            let back = image::load_from_memory(&out).unwrap();
            assert_eq!((back.width(), back.height()), (8, 4));
        }
    }

    #[test]
    fn unknown_format_name_is_rejected() {
        let mut out = Vec::new();
        assert!(encode_image_named(&mut out, &sample(2, 2), "tiff").is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn avatar_is_cropped_to_the_center_square() {
        // 左 1/4 を緑にした横長画像。中央の正方形に緑は入らない
        let wide = RgbaImage::from_fn(40, 20, |x, _| {
            if x < 10 {
                Rgba([0, 255, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });
        let square = crop_square(&DynamicImage::ImageRgba8(wide));
        assert_eq!((square.width(), square.height()), (20, 20));
        assert!(square.to_rgba8().pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn prepared_avatar_has_the_requested_size() {
        let mut png = Vec::new();
        encode_image(&mut png, &sample(30, 50), RasterFormat::Png).unwrap();
        let avatar = prepare_avatar(&png, 64).unwrap();
        assert_eq!(avatar.dimensions(), (64, 64));
    }

    #[test]
    fn undecodable_avatar_is_a_fetch_failure() {
        assert!(matches!(
            prepare_avatar(b"not an image", 64),
            Err(Error::AvatarFetchFailed(_))
        ));
    }
}
