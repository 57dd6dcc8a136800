//! CLI Module
//!
//! Command-line interface for the Collage image processor.

pub mod commands;
pub mod session;
pub mod view;

use clap::Parser;
use std::path::PathBuf;

pub use commands::{Command, CommandError, TokenReader};
pub use session::Session;
pub use view::{TextView, View};

/// Collage - layered image compositor
///
/// Reads commands (new-project, load-project, save-project, save-image,
/// set-filter, add-layer, add-image-to-layer, ...) from standard input or a
/// script file. Enter q to quit.
#[derive(Parser, Debug)]
#[command(name = "collage")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Read commands from this file instead of standard input
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Do not print the welcome banner
    #[arg(short, long)]
    pub quiet: bool,
}
