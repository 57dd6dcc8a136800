//! Blend Filters
//!
//! The closed set of filters a layer can carry. Tone filters adjust a layer
//! by its own brightness; anchored blends combine it with the base layer.

mod blend;
mod filter;

pub use blend::{BlendOp, Channel, Metric, ToneOp};
pub use filter::Filter;

/// Comma separated list of every filter name
pub fn filter_names() -> String {
    Filter::ALL
        .iter()
        .map(Filter::name)
        .collect::<Vec<_>>()
        .join(", ")
}
