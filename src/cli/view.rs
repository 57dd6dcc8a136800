//! Message output for the command session

use std::io::{self, Write};

/// Sink for status and error messages
///
/// Failures are reported back to the caller but never change what the
/// session does next.
pub trait View {
    fn render_message(&mut self, message: &str) -> io::Result<()>;
}

/// Writes each message as a line of text
pub struct TextView<W: Write> {
    out: W,
}

impl<W: Write> TextView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> View for TextView<W> {
    fn render_message(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{}", message)?;
        self.out.flush()
    }
}
