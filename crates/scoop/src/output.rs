//! Output sinks.
//!
//! A sink receives each finished line of debugger output. Any
//! `Fn(&str) + Send + Sync` closure is a sink; [`StderrSink`] and
//! [`FileSink`] cover the usual destinations.

use std::borrow::Cow;
use std::fs::OpenOptions;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::coloring::{Decorator, SyntaxHighlighter};

/// Destination for formatted output.
pub trait OutputSink: Send + Sync {
    /// Writes one formatted block of output.
    fn write(&self, text: &str) -> io::Result<()>;
}

impl<F> OutputSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn write(&self, text: &str) -> io::Result<()> {
        self(text);
        Ok(())
    }
}

/// Writes to standard error, decorating when stderr is a terminal.
#[derive(Clone)]
pub struct StderrSink {
    color: Option<bool>,
    decorator: Arc<dyn Decorator>,
}

impl StderrSink {
    /// A sink that colors output only when stderr is a terminal.
    #[must_use]
    pub fn new() -> Self {
        Self {
            color: None,
            decorator: Arc::new(SyntaxHighlighter),
        }
    }

    /// Forces decoration on or off; `None` detects a terminal.
    #[must_use]
    pub fn with_color(mut self, color: Option<bool>) -> Self {
        self.color = color;
        self
    }

    /// Replaces the decorator.
    #[must_use]
    pub fn with_decorator(mut self, decorator: impl Decorator + 'static) -> Self {
        self.decorator = Arc::new(decorator);
        self
    }

    fn should_color(&self) -> bool {
        self.color.unwrap_or_else(|| io::stderr().is_terminal())
    }

    fn prepare<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if self.should_color() {
            Cow::Owned(self.decorator.decorate(text))
        } else {
            Cow::Borrowed(text)
        }
    }
}

impl Default for StderrSink {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StderrSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StderrSink")
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}

impl OutputSink for StderrSink {
    fn write(&self, text: &str) -> io::Result<()> {
        let text = self.prepare(text);
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "{text}")?;
        stderr.flush()
    }
}

/// Appends each block of output, plus a newline, to a file.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// A sink appending to `path`, created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file written to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputSink for FileSink {
    fn write(&self, text: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{text}")
    }
}

/// Writes `text` to `sink`, never failing.
///
/// A failed write is retried once with every non-ASCII character replaced by
/// `?`. A second failure is logged and the text dropped.
pub(crate) fn write_out(sink: &dyn OutputSink, text: &str) {
    let Err(err) = sink.write(text) else {
        return;
    };
    debug!(target: "scoop::output", error = %err, "output sink failed; retrying with replacement");

    let replaced = replace_non_ascii(text);
    if let Err(err) = sink.write(&replaced) {
        debug!(target: "scoop::output", error = %err, "output sink failed again; dropping output");
    }
}

fn replace_non_ascii(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii() { c } else { '?' })
        .collect()
}
