//! Project Container
//!
//! Owns the z-ordered layer stack and a name index over it, and flattens the
//! stack into a single canvas.

use std::collections::HashMap;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::layer::Layer;
use crate::engine::Canvas;
use crate::error::{CollageError, Result};
use crate::filters::Filter;

/// Name of the layer every new project starts with
pub const BACKGROUND_LAYER: &str = "background";

/// Largest number of pixels a project canvas may hold (16384 x 16384)
pub const MAX_PIXELS: usize = 1 << 28;

/// Layered image project
///
/// `layers` is the z-order (index 0 is the bottom). `index` maps each layer
/// name to its position in `layers` and is rewritten on every reorder, so
/// both views always cover the same layers.
#[derive(Debug, Clone)]
pub struct Project {
    height: usize,
    width: usize,
    max_value: u8,
    layers: Vec<Layer>,
    index: HashMap<String, usize>,
}

impl Project {
    /// Create a project holding a single `background` layer
    ///
    /// # Errors
    /// * `InvalidDimensions` - if `height` or `width` is negative, the canvas
    ///   would exceed [`MAX_PIXELS`], or `max_value` is outside `1..=255`
    pub fn new(height: i64, width: i64, max_value: i64) -> Result<Self> {
        let (height, width) = match (usize::try_from(height), usize::try_from(width)) {
            (Ok(h), Ok(w)) => (h, w),
            _ => {
                return Err(CollageError::InvalidDimensions {
                    reason: format!(
                        "height {} and width {} must not be negative",
                        height, width
                    ),
                })
            }
        };
        validate_size(height, width)?;
        let max_value = validate_max_value(max_value)?;

        let mut project = Self::empty(height, width, max_value);
        project.add_layer(BACKGROUND_LAYER, Filter::Normal)?;

        info!("Created {}x{} project (max value {})", height, width, max_value);
        Ok(project)
    }

    /// Rebuild a project from an ordered stack, bottom layer first
    ///
    /// # Errors
    /// * `InvalidDimensions` - if the stack is empty, the size exceeds
    ///   [`MAX_PIXELS`], or a layer's canvas is not `height x width`
    /// * `DuplicateLayer` - if two layers share a name
    pub fn from_layers(
        height: usize,
        width: usize,
        max_value: u8,
        layers: Vec<Layer>,
    ) -> Result<Self> {
        validate_size(height, width)?;
        if layers.is_empty() {
            return Err(CollageError::InvalidDimensions {
                reason: "a project needs at least one layer".to_string(),
            });
        }
        let max_value = validate_max_value(max_value as i64)?;

        let mut project = Self::empty(height, width, max_value);
        for layer in layers {
            let canvas = layer.canvas();
            if canvas.height() != height || canvas.width() != width {
                return Err(CollageError::InvalidDimensions {
                    reason: format!(
                        "layer '{}' is {}x{}, project is {}x{}",
                        layer.name(),
                        canvas.height(),
                        canvas.width(),
                        height,
                        width
                    ),
                });
            }
            project.push_layer(layer)?;
        }
        Ok(project)
    }

    fn empty(height: usize, width: usize, max_value: u8) -> Self {
        Self {
            height,
            width,
            max_value,
            layers: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn push_layer(&mut self, layer: Layer) -> Result<()> {
        if self.index.contains_key(layer.name()) {
            return Err(CollageError::DuplicateLayer {
                name: layer.name().to_string(),
            });
        }
        self.index.insert(layer.name().to_string(), self.layers.len());
        self.layers.push(layer);
        Ok(())
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn max_value(&self) -> u8 {
        self.max_value
    }

    /// Layers bottom to top
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Layer names bottom to top
    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(Layer::name).collect()
    }

    /// Position of the named layer in the z-order
    pub fn layer_position(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| CollageError::UnknownLayer {
                name: name.to_string(),
            })
    }

    /// Look up a layer by name
    pub fn layer(&self, name: &str) -> Result<&Layer> {
        let position = self.layer_position(name)?;
        Ok(&self.layers[position])
    }

    /// Look up a layer by z-order position
    pub fn layer_at(&self, index: usize) -> Result<&Layer> {
        self.layers.get(index).ok_or(CollageError::IndexOutOfRange {
            index,
            len: self.layers.len(),
        })
    }

    /// Add a new opaque black layer on top of the stack
    ///
    /// # Errors
    /// * `DuplicateLayer` - if the name is taken; the project is unchanged
    pub fn add_layer(&mut self, name: &str, filter: Filter) -> Result<()> {
        self.push_layer(Layer::new(name, filter, self.height, self.width))?;
        debug!("Added layer '{}' with filter {}", name, filter);
        Ok(())
    }

    /// Replace the filter of the named layer
    pub fn set_filter(&mut self, name: &str, filter: Filter) -> Result<()> {
        let position = self.layer_position(name)?;
        self.layers[position].set_filter(filter);
        debug!("Layer '{}' filter set to {}", name, filter);
        Ok(())
    }

    /// Exchange two positions in the z-order
    ///
    /// Swapping a position with itself leaves the order unchanged.
    ///
    /// # Errors
    /// * `IndexOutOfRange` - if either index is past the top layer
    pub fn swap_layers(&mut self, i: usize, j: usize) -> Result<()> {
        let len = self.layers.len();
        for index in [i, j] {
            if index >= len {
                return Err(CollageError::IndexOutOfRange { index, len });
            }
        }
        self.layers.swap(i, j);
        for position in [i, j] {
            let name = self.layers[position].name().to_string();
            self.index.insert(name, position);
        }
        Ok(())
    }

    /// Exchange the z-order positions of two named layers
    ///
    /// # Errors
    /// * `UnknownLayer` - if either name is absent
    /// * `NoOpSwap` - if both names refer to the same position
    pub fn swap_layers_by_name(&mut self, a: &str, b: &str) -> Result<()> {
        let i = self.layer_position(a)?;
        let j = self.layer_position(b)?;
        if i == j {
            return Err(CollageError::NoOpSwap {
                a: a.to_string(),
                b: b.to_string(),
            });
        }
        self.swap_layers(i, j)
    }

    /// Place `image` on the named layer with its corner at column `x`, row `y`
    ///
    /// Offsets equal to the width or height are accepted and clip the whole
    /// image away; only offsets past them are rejected. Returns the number of
    /// pixels written.
    ///
    /// # Errors
    /// * `OutOfRange` - if `x` or `y` is negative or past the project edge
    /// * `UnknownLayer` - if the layer does not exist
    pub fn add_image(&mut self, x: i64, y: i64, image: &Canvas, layer: &str) -> Result<usize> {
        if x < 0 || y < 0 || x > self.width as i64 || y > self.height as i64 {
            return Err(CollageError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let position = self.layer_position(layer)?;
        let written = self.layers[position].add_image(image, x as usize, y as usize);
        debug!(
            "Placed {}x{} image on '{}' at ({}, {}), {} pixels written",
            image.height(),
            image.width(),
            layer,
            x,
            y,
            written
        );
        Ok(written)
    }

    /// Flatten the stack into one canvas
    ///
    /// Each layer, bottom to top, recomputes against the layers beneath it and
    /// its output overwrites the whole result. The returned canvas is therefore
    /// the top layer's filtered output; this is overwrite, not alpha
    /// compositing.
    pub fn render(&mut self) -> Canvas {
        let mut output = Canvas::new(self.height, self.width);
        for position in 0..self.layers.len() {
            let (below, rest) = self.layers.split_at_mut(position);
            let layer = &mut rest[0];
            layer.recompute(below, self.max_value);
            output = layer.rendered().clone();
        }
        debug!("Rendered {} layers", self.layers.len());
        output
    }

    /// Snapshot of dimensions and layer order
    pub fn summary(&self) -> ProjectSummary {
        ProjectSummary {
            height: self.height,
            width: self.width,
            max_value: self.max_value,
            layers: self
                .layers
                .iter()
                .map(|layer| LayerSummary {
                    name: layer.name().to_string(),
                    filter: layer.filter(),
                })
                .collect(),
        }
    }
}

fn validate_size(height: usize, width: usize) -> Result<()> {
    match height.checked_mul(width) {
        Some(pixels) if pixels <= MAX_PIXELS => Ok(()),
        _ => Err(CollageError::InvalidDimensions {
            reason: format!(
                "{}x{} exceeds the limit of {} pixels",
                height, width, MAX_PIXELS
            ),
        }),
    }
}

fn validate_max_value(max_value: i64) -> Result<u8> {
    match u8::try_from(max_value) {
        Ok(max) if max > 0 => Ok(max),
        _ => Err(CollageError::InvalidDimensions {
            reason: format!("max value {} must be between 1 and 255", max_value),
        }),
    }
}

/// Summary of project state for quick inspection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub height: usize,
    pub width: usize,
    pub max_value: u8,
    /// Bottom to top
    pub layers: Vec<LayerSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSummary {
    pub name: String,
    pub filter: Filter,
}
