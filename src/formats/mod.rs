//! File formats
//!
//! Text formats for projects (`C1` collage files) and single canvases (`P3`
//! plain images), plus the raster codec boundary for png/jpeg/bmp.
//!
//! Both text formats are whitespace separated tokens. Lines starting with `#`
//! are comments and are dropped before tokenizing.

pub mod codec;
pub mod collage;
pub mod ppm;

use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use crate::engine::{Canvas, Pixel};
use crate::error::{CollageError, Result};

pub use codec::{decode_image, encode_image};
pub use collage::{parse_collage, read_collage, save_collage, write_collage};
pub use ppm::{parse_ppm, read_ppm, save_ppm, write_ppm};

/// Read a whole text file
///
/// A missing file is `FileNotFound` and non-UTF-8 content is `MalformedFile`.
pub(crate) fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CollageError::FileNotFound {
            path: path.to_path_buf(),
        },
        io::ErrorKind::InvalidData => {
            CollageError::malformed(format!("{} is not UTF-8 text", path.display()))
        }
        _ => CollageError::Io(e),
    })
}

/// Fail with `UnsupportedFormat` unless `path` ends in `.{extension}`
pub(crate) fn require_extension(path: &Path, extension: &str) -> Result<()> {
    let matches = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext == extension);
    if !matches {
        return Err(CollageError::UnsupportedFormat {
            format: format!("{} (expected a .{} file)", path.display(), extension),
        });
    }
    Ok(())
}

/// Load a sub-image: `.ppm` through the plain reader, anything else through
/// the raster codec
pub fn load_image(path: &Path) -> Result<Canvas> {
    let is_ppm = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("ppm"));
    if is_ppm {
        read_ppm(path)
    } else {
        decode_image(path)
    }
}

/// Write a rendered canvas as `format` (`ppm`, `png`, `jpg`, ...)
pub fn export_image(canvas: &Canvas, max_value: u8, path: &Path, format: &str) -> Result<()> {
    if format.eq_ignore_ascii_case("ppm") {
        require_extension(path, "ppm")?;
        save_ppm(canvas, max_value, path)
    } else {
        encode_image(canvas, path, format)
    }
}

// ============================================================================
// Tokenizer
// ============================================================================

/// Token cursor over comment-stripped text
pub(crate) struct Tokens<'a> {
    tokens: Vec<&'a str>,
    position: usize,
}

impl<'a> Tokens<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        let tokens = text
            .lines()
            .filter(|line| !line.starts_with('#'))
            .flat_map(str::split_whitespace)
            .collect();
        Self {
            tokens,
            position: 0,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Next raw token; `what` names it in the truncation error
    pub(crate) fn word(&mut self, what: &str) -> Result<&'a str> {
        let token = self
            .tokens
            .get(self.position)
            .copied()
            .ok_or_else(|| {
                CollageError::malformed(format!("unexpected end of file, expected {}", what))
            })?;
        self.position += 1;
        Ok(token)
    }

    /// Next token parsed as a number
    pub(crate) fn number<T: FromStr>(&mut self, what: &str) -> Result<T> {
        let token = self.word(what)?;
        token
            .parse()
            .map_err(|_| CollageError::malformed(format!("expected {}, found '{}'", what, token)))
    }

    /// Expect the magic token that opens a file
    pub(crate) fn magic(&mut self, expected: &str) -> Result<()> {
        let token = self.word("file header")?;
        if token != expected {
            return Err(CollageError::malformed(format!(
                "file should begin with {}, found '{}'",
                expected, token
            )));
        }
        Ok(())
    }

    /// `<width> <height>` header line
    pub(crate) fn dimensions(&mut self) -> Result<(usize, usize)> {
        let width = self.number("width")?;
        let height = self.number("height")?;
        Ok((width, height))
    }

    /// Channel maximum header line, `1..=255`
    pub(crate) fn max_value(&mut self) -> Result<u8> {
        let max: i64 = self.number("max channel value")?;
        match u8::try_from(max) {
            Ok(max) if max > 0 => Ok(max),
            _ => Err(CollageError::malformed(format!(
                "max channel value {} must be between 1 and 255",
                max
            ))),
        }
    }

    /// `height * width` RGB triples, row-major; alpha is set to 255
    pub(crate) fn canvas(&mut self, height: usize, width: usize, max_value: u8) -> Result<Canvas> {
        let count = height
            .checked_mul(width)
            .ok_or_else(|| {
                CollageError::malformed(format!("{}x{} image is too large", width, height))
            })?;
        let mut pixels = Vec::with_capacity(count.min(self.tokens.len() / 3));
        for _ in 0..count {
            let mut rgb = [0u8; 3];
            for channel in rgb.iter_mut() {
                let value: i64 = self.number("channel value")?;
                *channel = match u8::try_from(value) {
                    Ok(v) if v <= max_value => v,
                    _ => {
                        return Err(CollageError::malformed(format!(
                            "channel value {} outside 0..={}",
                            value, max_value
                        )))
                    }
                };
            }
            pixels.push(Pixel::rgb(rgb[0], rgb[1], rgb[2]));
        }
        Canvas::from_pixels(height, width, pixels)
    }
}

/// Write `canvas` as one `R G B` line per pixel, channels capped at `max_value`
pub(crate) fn write_pixels<W: io::Write>(
    canvas: &Canvas,
    max_value: u8,
    writer: &mut W,
) -> io::Result<()> {
    for pixel in canvas.pixels() {
        let [r, g, b] = pixel.channels().map(|c| c.min(max_value));
        writeln!(writer, "{} {} {}", r, g, b)?;
    }
    Ok(())
}
