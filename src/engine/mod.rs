//! Pixel Engine
//!
//! Core value types shared by filters, layers, and file formats.

pub mod canvas;
pub mod pixel;

pub use canvas::Canvas;
pub use pixel::{clamp_channel, Pixel, CHANNEL_MAX};
