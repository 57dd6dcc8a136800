//! Collage CLI - Layered Image Compositor
//!
//! Interactive command loop over the Collage image processor.

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;

use collage::cli::{Cli, Session, TextView};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!("Collage v{}", env!("CARGO_PKG_VERSION"));

    let input: Box<dyn BufRead> = match &cli.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let mut session = Session::new(input, TextView::new(io::stdout()));
    session
        .run(!cli.quiet)
        .context("Failed to read commands")?;

    Ok(())
}
