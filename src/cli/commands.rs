//! Command parsing and execution
//!
//! Commands are read as whitespace separated tokens, so a command and its
//! arguments may span several lines.

use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::path::PathBuf;

use log::{debug, info};
use thiserror::Error;

use crate::error::{CollageError, Result};
use crate::filters::Filter;
use crate::layers::Workspace;

/// Failure to turn input into a command
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Invalid command entered: {0}. Please try again.")]
    UnknownCommand(String),

    #[error("Expected a number for {what}, got '{got}'")]
    NotANumber { what: &'static str, got: String },

    #[error("Input ended in the middle of a command")]
    EndOfInput,

    #[error(transparent)]
    Collage(#[from] CollageError),

    #[error("Failed to read input: {0}")]
    Input(#[from] io::Error),
}

// ============================================================================
// Token reader
// ============================================================================

/// Pulls whitespace separated tokens from a line reader on demand
pub struct TokenReader<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// Next token, or `None` at end of input
    pub fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }

    fn argument(&mut self) -> std::result::Result<String, CommandError> {
        self.next_token()?.ok_or(CommandError::EndOfInput)
    }

    fn number(&mut self, what: &'static str) -> std::result::Result<i64, CommandError> {
        let token = self.argument()?;
        token
            .parse()
            .map_err(|_| CommandError::NotANumber { what, got: token })
    }
}

// ============================================================================
// Commands
// ============================================================================

/// One interactive command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NewProject {
        height: i64,
        width: i64,
        max_value: i64,
    },
    LoadProject {
        path: PathBuf,
    },
    SaveProject {
        path: PathBuf,
    },
    SaveImage {
        path: PathBuf,
        format: String,
    },
    SetFilter {
        filter: Filter,
        layer: String,
    },
    AddLayer {
        name: String,
    },
    AddImageToLayer {
        x: i64,
        y: i64,
        image: PathBuf,
        layer: String,
    },
    SwapLayers {
        a: String,
        b: String,
    },
    ListLayers,
    Info,
    Quit,
}

impl Command {
    /// Command words, in the order they are listed to users
    pub const NAMES: [&'static str; 10] = [
        "new-project",
        "load-project",
        "save-project",
        "save-image",
        "set-filter",
        "add-layer",
        "add-image-to-layer",
        "swap-layers",
        "list-layers",
        "info",
    ];

    /// Read the next command; end of input before a command word is `Quit`
    pub fn read<R: BufRead>(
        tokens: &mut TokenReader<R>,
    ) -> std::result::Result<Command, CommandError> {
        let word = match tokens.next_token()? {
            Some(word) => word,
            None => return Ok(Command::Quit),
        };

        let command = match word.as_str() {
            "q" | "Q" => Command::Quit,
            "new-project" => Command::NewProject {
                height: tokens.number("height")?,
                width: tokens.number("width")?,
                max_value: tokens.number("max value")?,
            },
            "load-project" => Command::LoadProject {
                path: tokens.argument()?.into(),
            },
            "save-project" => Command::SaveProject {
                path: tokens.argument()?.into(),
            },
            "save-image" => Command::SaveImage {
                path: tokens.argument()?.into(),
                format: tokens.argument()?,
            },
            "set-filter" => {
                let filter_name = tokens.argument()?;
                let layer = tokens.argument()?;
                Command::SetFilter {
                    filter: filter_name.parse()?,
                    layer,
                }
            }
            "add-layer" => Command::AddLayer {
                name: tokens.argument()?,
            },
            "add-image-to-layer" => Command::AddImageToLayer {
                x: tokens.number("x")?,
                y: tokens.number("y")?,
                image: tokens.argument()?.into(),
                layer: tokens.argument()?,
            },
            "swap-layers" => Command::SwapLayers {
                a: tokens.argument()?,
                b: tokens.argument()?,
            },
            "list-layers" => Command::ListLayers,
            "info" => Command::Info,
            _ => return Err(CommandError::UnknownCommand(word)),
        };
        debug!("Parsed command: {:?}", command);
        Ok(command)
    }

    /// Run the command against `workspace` and describe the outcome
    pub fn execute(&self, workspace: &mut Workspace) -> Result<String> {
        match self {
            Command::NewProject {
                height,
                width,
                max_value,
            } => {
                workspace.new_project(*height, *width, *max_value)?;
                Ok(format!("New project created: {}x{}", height, width))
            }
            Command::LoadProject { path } => {
                workspace.load_project(path)?;
                Ok(format!("Project loaded: {}", path.display()))
            }
            Command::SaveProject { path } => {
                workspace.save_project(path)?;
                Ok(format!("Project saved: {}", path.display()))
            }
            Command::SaveImage { path, format } => {
                workspace.save_image(path, format)?;
                Ok(format!("Image saved: {}", path.display()))
            }
            Command::SetFilter { filter, layer } => {
                workspace.project_mut()?.set_filter(layer, *filter)?;
                Ok(format!("Layer '{}' now uses filter {}", layer, filter))
            }
            Command::AddLayer { name } => {
                workspace.project_mut()?.add_layer(name, Filter::Normal)?;
                info!("Added layer '{}'", name);
                Ok(format!("Layer '{}' added", name))
            }
            Command::AddImageToLayer { x, y, image, layer } => {
                let written = workspace.add_image_to_layer(*x, *y, image, layer)?;
                Ok(format!(
                    "Image {} placed on '{}' ({} pixels)",
                    image.display(),
                    layer,
                    written
                ))
            }
            Command::SwapLayers { a, b } => {
                workspace.project_mut()?.swap_layers_by_name(a, b)?;
                Ok(format!("Swapped layers '{}' and '{}'", a, b))
            }
            Command::ListLayers => {
                let project = workspace.project()?;
                Ok(project.layer_names().join(", "))
            }
            Command::Info => {
                let summary = workspace.project()?.summary();
                Ok(serde_json::to_string_pretty(&summary)?)
            }
            Command::Quit => Ok("Goodbye".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{Metric, ToneOp};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn reader(input: &str) -> TokenReader<Cursor<Vec<u8>>> {
        TokenReader::new(Cursor::new(input.as_bytes().to_vec()))
    }

    #[test]
    fn test_tokens_span_lines() {
        let mut tokens = reader("new-project\n 3\n\n4 255\n");
        assert_eq!(
            Command::read(&mut tokens).unwrap(),
            Command::NewProject {
                height: 3,
                width: 4,
                max_value: 255
            }
        );
        assert_eq!(Command::read(&mut tokens).unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_set_filter() {
        let mut tokens = reader("set-filter darken-value sky");
        assert_eq!(
            Command::read(&mut tokens).unwrap(),
            Command::SetFilter {
                filter: Filter::SelfAdjust {
                    op: ToneOp::Darken,
                    metric: Metric::Value
                },
                layer: "sky".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_filter_consumes_layer() {
        let mut tokens = reader("set-filter sepia sky q");
        assert!(matches!(
            Command::read(&mut tokens),
            Err(CommandError::Collage(CollageError::UnknownFilter { .. }))
        ));
        assert_eq!(Command::read(&mut tokens).unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Command::read(&mut reader("paint")),
            Err(CommandError::UnknownCommand(word)) if word == "paint"
        ));
        assert!(matches!(
            Command::read(&mut reader("new-project ten 3 255")),
            Err(CommandError::NotANumber { what: "height", .. })
        ));
        assert!(matches!(
            Command::read(&mut reader("add-image-to-layer 1 2 img.ppm")),
            Err(CommandError::EndOfInput)
        ));
    }

    #[test]
    fn test_execute_requires_project() {
        let mut workspace = Workspace::new();
        let err = Command::AddLayer {
            name: "a".to_string(),
        }
        .execute(&mut workspace)
        .unwrap_err();
        assert!(matches!(err, CollageError::NoActiveProject));
    }

    #[test]
    fn test_execute_layer_commands() {
        let mut workspace = Workspace::new();
        Command::NewProject {
            height: 2,
            width: 2,
            max_value: 255,
        }
        .execute(&mut workspace)
        .unwrap();
        Command::AddLayer {
            name: "top".to_string(),
        }
        .execute(&mut workspace)
        .unwrap();
        Command::SwapLayers {
            a: "top".to_string(),
            b: "background".to_string(),
        }
        .execute(&mut workspace)
        .unwrap();

        let listing = Command::ListLayers.execute(&mut workspace).unwrap();
        assert_eq!(listing, "top, background");

        let info = Command::Info.execute(&mut workspace).unwrap();
        let json: serde_json::Value = serde_json::from_str(&info).unwrap();
        assert_eq!(json["layers"][1]["name"], "background");
    }
}
