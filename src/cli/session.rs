//! Interactive command session
//!
//! Reads commands until `q`, `Q`, or end of input. Every failure is shown to
//! the user and the loop carries on.

use std::io::{self, BufRead};

use log::{info, warn};

use super::commands::{Command, CommandError, TokenReader};
use super::view::View;
use crate::error::CollageError;
use crate::filters::filter_names;
use crate::layers::Workspace;

pub struct Session<R, V> {
    tokens: TokenReader<R>,
    view: V,
    workspace: Workspace,
}

impl<R: BufRead, V: View> Session<R, V> {
    pub fn new(input: R, view: V) -> Self {
        Self {
            tokens: TokenReader::new(input),
            view,
            workspace: Workspace::new(),
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Process commands until the user quits or input runs out
    ///
    /// Only failures to read the input itself are returned.
    pub fn run(&mut self, show_banner: bool) -> io::Result<()> {
        if show_banner {
            self.welcome();
        }

        loop {
            match Command::read(&mut self.tokens) {
                Ok(Command::Quit) => {
                    self.say("Goodbye");
                    break;
                }
                Ok(command) => match command.execute(&mut self.workspace) {
                    Ok(message) => self.say(&message),
                    Err(e) => self.report(&e),
                },
                Err(CommandError::Input(e)) => return Err(e),
                Err(CommandError::EndOfInput) => {
                    self.say("Input ended in the middle of a command");
                    break;
                }
                Err(CommandError::Collage(e)) => self.report(&e),
                Err(e) => self.say(&e.to_string()),
            }
        }

        info!("Session finished");
        Ok(())
    }

    fn welcome(&mut self) {
        self.say("Welcome to the Collage image processor!");
        self.say("Press q to quit.");
        self.say(&format!("Commands: {}", Command::NAMES.join(", ")));
        self.say(&format!("Filters: {}", filter_names()));
    }

    fn report(&mut self, error: &CollageError) {
        self.say(&format!("Error: {}", error));
        if let Some(hint) = error.recovery_suggestion() {
            self.say(&hint);
        }
    }

    fn say(&mut self, message: &str) {
        if let Err(e) = self.view.render_message(message) {
            warn!("Failed to render message: {}", e);
        }
    }
}
