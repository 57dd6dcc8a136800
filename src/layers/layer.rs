//! Layer - a named canvas with a blend filter
//!
//! A layer keeps two canvases: the pixels placed onto it, and the pixels it
//! showed after its filter last ran. Placing images only touches the first;
//! [`Layer::recompute`] is the only thing that writes the second.

use crate::engine::{Canvas, Pixel};
use crate::error::Result;
use crate::filters::Filter;

/// Named canvas plus blend filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    name: String,
    filter: Filter,
    canvas: Canvas,
    rendered: Canvas,
}

impl Layer {
    /// Create an opaque black layer
    pub fn new(name: impl Into<String>, filter: Filter, height: usize, width: usize) -> Self {
        Self::from_canvas(name, filter, Canvas::new(height, width))
    }

    /// Create a layer around existing pixels
    pub fn from_canvas(name: impl Into<String>, filter: Filter, canvas: Canvas) -> Self {
        Self {
            name: name.into(),
            filter,
            rendered: canvas.clone(),
            canvas,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Replace the filter; takes effect on the next recompute
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Pixels placed onto this layer
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Output of the most recent recompute
    pub fn rendered(&self) -> &Canvas {
        &self.rendered
    }

    /// Read a placed pixel
    ///
    /// # Errors
    /// * `PixelOutOfRange` - if (`row`, `col`) is outside the layer
    pub fn pixel(&self, row: usize, col: usize) -> Result<Pixel> {
        self.canvas.pixel(row, col)
    }

    /// Overwrite this layer's pixels with `image` at column `x`, row `y`
    ///
    /// Parts of `image` outside the layer are clipped. Offsets are validated
    /// by [`Project::add_image`](super::Project::add_image), not here.
    /// Returns the number of pixels written.
    pub fn add_image(&mut self, image: &Canvas, x: usize, y: usize) -> usize {
        self.canvas.paste(image, x, y)
    }

    /// Run the filter against `below` and keep the result as the rendered canvas
    ///
    /// `below` must be the layers under this one, bottom-most first.
    pub fn recompute(&mut self, below: &[Layer], max_value: u8) {
        let rendered = self.filter.apply(below, self, max_value);
        self.rendered = rendered;
    }
}
