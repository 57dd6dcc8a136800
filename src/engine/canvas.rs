//! Canvas Management
//!
//! A row-major `height x width` grid of pixels. Layers own one each, sub-images
//! placed onto layers are canvases too, and a render produces one.

use super::pixel::Pixel;
use crate::error::{CollageError, Result};

/// Rectangular pixel grid with bounds-checked access
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    height: usize,
    width: usize,
    pixels: Vec<Pixel>,
}

impl Canvas {
    /// Create a canvas filled with opaque black
    pub fn new(height: usize, width: usize) -> Self {
        Self::filled(height, width, Pixel::BLACK)
    }

    /// Create a canvas with every pixel set to `pixel`
    pub fn filled(height: usize, width: usize, pixel: Pixel) -> Self {
        Self {
            height,
            width,
            pixels: vec![pixel; height * width],
        }
    }

    /// Wrap row-major pixel data
    ///
    /// # Errors
    /// * `InvalidDimensions` - if `pixels.len() != height * width`
    pub fn from_pixels(height: usize, width: usize, pixels: Vec<Pixel>) -> Result<Self> {
        if pixels.len() != height * width {
            return Err(CollageError::InvalidDimensions {
                reason: format!(
                    "expected {} pixels for {}x{}, got {}",
                    height * width,
                    height,
                    width,
                    pixels.len()
                ),
            });
        }
        Ok(Self {
            height,
            width,
            pixels,
        })
    }

    /// Build a canvas by evaluating `f(row, col)` for every position
    pub fn from_fn(height: usize, width: usize, mut f: impl FnMut(usize, usize) -> Pixel) -> Self {
        let mut pixels = Vec::with_capacity(height * width);
        for row in 0..height {
            for col in 0..width {
                pixels.push(f(row, col));
            }
        }
        Self {
            height,
            width,
            pixels,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> Result<usize> {
        if !self.contains(row, col) {
            return Err(CollageError::PixelOutOfRange {
                row,
                col,
                height: self.height,
                width: self.width,
            });
        }
        Ok(row * self.width + col)
    }

    /// Read the pixel at (`row`, `col`)
    ///
    /// # Errors
    /// * `PixelOutOfRange` - if the position lies outside the grid
    pub fn pixel(&self, row: usize, col: usize) -> Result<Pixel> {
        let offset = self.offset(row, col)?;
        Ok(self.pixels[offset])
    }

    /// Like [`Canvas::pixel`] but `None` outside the grid
    pub fn get(&self, row: usize, col: usize) -> Option<Pixel> {
        self.offset(row, col).ok().map(|offset| self.pixels[offset])
    }

    /// Overwrite the pixel at (`row`, `col`)
    pub fn set_pixel(&mut self, row: usize, col: usize, pixel: Pixel) -> Result<()> {
        let offset = self.offset(row, col)?;
        self.pixels[offset] = pixel;
        Ok(())
    }

    /// Row-major pixel slice
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> {
        // chunks() panics on zero, and a zero-width canvas has no pixels anyway
        self.pixels.chunks(self.width.max(1))
    }

    /// New canvas of the same size with `f(row, col, pixel)` applied everywhere
    pub fn map(&self, mut f: impl FnMut(usize, usize, Pixel) -> Pixel) -> Canvas {
        let width = self.width.max(1);
        let pixels = self
            .pixels
            .iter()
            .enumerate()
            .map(|(i, &pixel)| f(i / width, i % width, pixel))
            .collect();
        Canvas {
            height: self.height,
            width: self.width,
            pixels,
        }
    }

    /// Paste `image` with its top-left corner at column `x`, row `y`
    ///
    /// Pixels that land outside this canvas are dropped. Returns the number of
    /// pixels written.
    pub fn paste(&mut self, image: &Canvas, x: usize, y: usize) -> usize {
        let mut written = 0;
        for (i, src_row) in image.rows().enumerate() {
            let row = match y.checked_add(i) {
                Some(row) if row < self.height => row,
                _ => break,
            };
            for (j, &pixel) in src_row.iter().enumerate() {
                let col = match x.checked_add(j) {
                    Some(col) if col < self.width => col,
                    _ => break,
                };
                self.pixels[row * self.width + col] = pixel;
                written += 1;
            }
        }
        written
    }
}
