//! Decoding collaborators built on the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Every input shape the
//! engine accepts (file path, encoded bytes, raw buffer) funnels into an
//! [`OwnedImage`] single-channel luma buffer before matching starts.

use crate::image::pyramid::OwnedImage;
use crate::image::ImageView;
use crate::util::{NccMatchError, NccMatchResult};
use std::path::Path;

/// Creates a borrowed view from a grayscale image buffer.
pub fn view_from_gray_image(img: &image::GrayImage) -> NccMatchResult<ImageView<'_>> {
    ImageView::from_slice(img.as_raw(), img.width() as usize, img.height() as usize)
}

/// Creates an owned image from a grayscale image buffer.
pub fn owned_from_gray_image(img: &image::GrayImage) -> NccMatchResult<OwnedImage> {
    OwnedImage::new(
        img.as_raw().clone(),
        img.width() as usize,
        img.height() as usize,
    )
}

/// Converts any decoded image to an owned grayscale buffer.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> NccMatchResult<OwnedImage> {
    owned_from_gray_image(&img.to_luma8())
}

/// Loads an image from disk and converts it to grayscale.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> NccMatchResult<OwnedImage> {
    let img = image::open(path).map_err(|err| NccMatchError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}

/// Decodes in-memory encoded bytes (PNG, JPEG, BMP) to grayscale.
pub fn decode_gray_image(bytes: &[u8]) -> NccMatchResult<OwnedImage> {
    let img = image::load_from_memory(bytes).map_err(|err| NccMatchError::ImageDecode {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}

/// Returns `(width, height)` for an image file without matching it.
pub fn image_size<P: AsRef<Path>>(path: P) -> NccMatchResult<(u32, u32)> {
    let img = image::open(path).map_err(|err| NccMatchError::ImageIo {
        reason: err.to_string(),
    })?;
    Ok((img.width(), img.height()))
}

/// Returns `(width, height)` for in-memory encoded bytes.
pub fn image_size_bytes(bytes: &[u8]) -> NccMatchResult<(u32, u32)> {
    let img = image::load_from_memory(bytes).map_err(|err| NccMatchError::ImageDecode {
        reason: err.to_string(),
    })?;
    Ok((img.width(), img.height()))
}
