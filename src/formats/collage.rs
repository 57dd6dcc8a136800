//! Collage project format (`C1`)
//!
//! ```text
//! C1
//! <width> <height>
//! <max channel value>
//! <layer name> <filter name>
//! <R> <G> <B>        width * height lines, row-major
//! ...                repeated per layer, bottom layer first
//! ```
//!
//! Layers store their placed pixels, not their filtered output, so loading a
//! file and rendering it gives the same image as rendering before saving.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::{debug, info};

use super::{read_text, require_extension, write_pixels, Tokens};
use crate::error::{CollageError, Result};
use crate::filters::Filter;
use crate::layers::{Layer, Project};

const MAGIC: &str = "C1";

/// File extension required when saving projects
pub const EXTENSION: &str = "collage";

/// Parse collage text into a project
///
/// # Errors
/// * `MalformedFile` - bad magic token, truncated or out-of-range pixel data,
///   unknown filter name, duplicate layer name, or no layers at all
pub fn parse_collage(text: &str) -> Result<Project> {
    let mut tokens = Tokens::new(text);
    tokens.magic(MAGIC)?;
    let (width, height) = tokens.dimensions()?;
    let max_value = tokens.max_value()?;

    let mut layers = Vec::new();
    while !tokens.is_empty() {
        let name = tokens.word("layer name")?;
        let filter_name = tokens.word("filter name")?;
        let filter: Filter = filter_name.parse().map_err(|_| {
            CollageError::malformed(format!(
                "unknown filter '{}' on layer '{}'",
                filter_name, name
            ))
        })?;
        let canvas = tokens.canvas(height, width, max_value)?;
        layers.push(Layer::from_canvas(name, filter, canvas));
    }

    Project::from_layers(height, width, max_value, layers).map_err(|e| match e {
        CollageError::DuplicateLayer { name } => {
            CollageError::malformed(format!("layer '{}' appears twice", name))
        }
        CollageError::InvalidDimensions { reason } => CollageError::malformed(reason),
        other => other,
    })
}

/// Load a project file
pub fn read_collage(path: &Path) -> Result<Project> {
    let project = parse_collage(&read_text(path)?)?;
    info!(
        "Loaded project {} ({} layers)",
        path.display(),
        project.layer_count()
    );
    Ok(project)
}

/// Write `project` in collage format
pub fn write_collage<W: Write>(project: &Project, writer: &mut W) -> Result<()> {
    let max_value = project.max_value();
    writeln!(writer, "{}", MAGIC)?;
    writeln!(writer, "{} {}", project.width(), project.height())?;
    writeln!(writer, "{}", max_value)?;
    for layer in project.layers() {
        writeln!(writer, "{} {}", layer.name(), layer.filter())?;
        write_pixels(layer.canvas(), max_value, writer)?;
    }
    Ok(())
}

/// Save `project` to a `.collage` file
pub fn save_collage(project: &Project, path: &Path) -> Result<()> {
    require_extension(path, EXTENSION)?;
    let mut writer = BufWriter::new(File::create(path)?);
    write_collage(project, &mut writer)?;
    writer.flush()?;
    debug!("Saved {} layers to {}", project.layer_count(), path.display());
    Ok(())
}
