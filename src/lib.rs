//! Collage - Layered Image Compositor
//!
//! Collage keeps an ordered stack of named layers. Each layer owns a canvas
//! and a blend filter, and a render flattens the stack into one image.
//!
//! # Architecture
//!
//! - `engine`: pixels and canvases
//! - `filters`: the blend filter set (tone adjustments and anchored blends)
//! - `layers`: layers, the project stack, and the open-project workspace
//! - `formats`: collage project files, plain `P3` images, raster codecs
//! - `cli`: interactive command session

pub mod cli;
pub mod engine;
pub mod error;
pub mod filters;
pub mod formats;
pub mod layers;

pub use engine::{Canvas, Pixel};
pub use error::{CollageError, Result};
pub use filters::Filter;
pub use layers::{Layer, Project, Workspace};
