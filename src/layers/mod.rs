//! Layer Model Module
//!
//! Implements the layered image model:
//! - Layer: named canvas plus blend filter
//! - Project: z-ordered layer stack and flattening
//! - Workspace: the currently open project, if any

mod layer;
mod project;
mod workspace;

pub use layer::Layer;
pub use project::{LayerSummary, Project, ProjectSummary, BACKGROUND_LAYER, MAX_PIXELS};
pub use workspace::Workspace;
