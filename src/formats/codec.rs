//! Raster codec boundary
//!
//! Compressed formats (png, jpeg, bmp, ...) are handled entirely by the
//! `image` crate. This module only converts between its buffers and
//! [`Canvas`]. Only RGB is exchanged; decoded pixels are opaque.

use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use log::debug;

use crate::engine::{Canvas, Pixel};
use crate::error::{CollageError, Result};

/// Decode any image file the `image` crate understands
pub fn decode_image(path: &Path) -> Result<Canvas> {
    if !path.exists() {
        return Err(CollageError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let decoded = image::open(path)?.to_rgb8();
    let (width, height) = decoded.dimensions();
    debug!("Decoded {}x{} image from {}", width, height, path.display());

    Ok(Canvas::from_fn(height as usize, width as usize, |row, col| {
        let Rgb([r, g, b]) = *decoded.get_pixel(col as u32, row as u32);
        Pixel::rgb(r, g, b)
    }))
}

/// Encode `canvas` as `format` (a file extension such as `png` or `jpg`)
///
/// # Errors
/// * `UnsupportedFormat` - if `format` is not an extension the codec knows
/// * `Codec` - if encoding or writing fails
pub fn encode_image(canvas: &Canvas, path: &Path, format: &str) -> Result<()> {
    let image_format = ImageFormat::from_extension(format).ok_or_else(|| {
        CollageError::UnsupportedFormat {
            format: format.to_string(),
        }
    })?;

    let mut buffer = RgbImage::new(canvas.width() as u32, canvas.height() as u32);
    for (row, pixels) in canvas.rows().enumerate() {
        for (col, pixel) in pixels.iter().enumerate() {
            buffer.put_pixel(col as u32, row as u32, Rgb(pixel.channels()));
        }
    }
    buffer.save_with_format(path, image_format)?;
    debug!("Encoded {:?} image to {}", image_format, path.display());
    Ok(())
}
