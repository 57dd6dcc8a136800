//! Plain image format (`P3`)
//!
//! ```text
//! P3
//! <width> <height>
//! <max channel value>
//! <R> <G> <B>        one line per pixel, row-major
//! ```
//!
//! Alpha is not stored; loaded pixels are opaque.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use super::{read_text, write_pixels, Tokens};
use crate::engine::Canvas;
use crate::error::Result;

const MAGIC: &str = "P3";

/// Parse plain image text
///
/// Channel values are kept as written; they must not exceed the file's own
/// maximum.
pub fn parse_ppm(text: &str) -> Result<Canvas> {
    let mut tokens = Tokens::new(text);
    tokens.magic(MAGIC)?;
    let (width, height) = tokens.dimensions()?;
    let max_value = tokens.max_value()?;
    tokens.canvas(height, width, max_value)
}

/// Load a plain image file
pub fn read_ppm(path: &Path) -> Result<Canvas> {
    let canvas = parse_ppm(&read_text(path)?)?;
    debug!(
        "Loaded {}x{} image from {}",
        canvas.width(),
        canvas.height(),
        path.display()
    );
    Ok(canvas)
}

/// Write `canvas` in plain image format
pub fn write_ppm<W: Write>(canvas: &Canvas, max_value: u8, writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", MAGIC)?;
    writeln!(writer, "{} {}", canvas.width(), canvas.height())?;
    writeln!(writer, "{}", max_value)?;
    write_pixels(canvas, max_value, writer)?;
    Ok(())
}

/// Save `canvas` to a plain image file
pub fn save_ppm(canvas: &Canvas, max_value: u8, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_ppm(canvas, max_value, &mut writer)?;
    writer.flush()?;
    debug!("Saved image to {}", path.display());
    Ok(())
}
