//! `scoop` - print debugging that labels each value with the expression
//! that produced it.
//!
//! ```
//! use scoop::ic;
//!
//! fn area(w: u32, h: u32) -> u32 {
//!     ic!(w, h);
//!     ic!(w * h)
//! }
//!
//! assert_eq!(area(3, 4), 12);
//! ```
//!
//! prints
//!
//! ```text
//! ic| w: 3, h: 4
//! ic| w * h: 12
//! ```
//!
//! The label is recovered at runtime: the caller location reported by
//! `#[track_caller]` is mapped back to the call in the source file, and the
//! text of each argument is cut out of the syntax tree. When the source is
//! not available the values are printed without labels.
//!
//! # Entry points
//!
//! - [`ic!`] and [`ic_format!`], using the process-wide [`IC`] debugger
//! - [`ic()`](fn@ic), taking a tuple of values
//! - [`Debugger::ic`] and [`Debugger::format`] on any debugger instance
//! - [`Debugger::emit_at`] and [`Debugger::format_at`] for callers that
//!   build a [`CallSite`] themselves
//!
//! Every entry point returns what it was given, so calls can wrap
//! expressions in place.
//!
//! # Logging
//!
//! Diagnostics go through `tracing` under the `scoop::*` targets. The only
//! event above `debug` is a one-time warning per call site whose source
//! could not be recovered.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

/// Values passed to the debugger.
pub mod args;
/// Names bound to debugger entry points.
pub mod bindings;
/// Runtime call positions.
pub mod callsite;
/// Syntax highlighting for terminal output.
pub mod coloring;
/// Debugger configuration.
pub mod config;
mod debugger;
/// Errors.
pub mod error;
/// Argument text extraction.
pub mod extract;
/// Output layout.
pub mod layout;
/// Output sinks.
pub mod output;
/// Value rendering.
pub mod render;
/// Call disambiguation.
pub mod resolve;
/// Source text lookup.
pub mod source;

pub use args::{Arg, Args};
pub use bindings::{Binding, FrameBindings, SourceBindings, Spellings};
pub use callsite::CallSite;
pub use coloring::{Decorator, NoDecoration, SyntaxHighlighter};
pub use config::{Config, ConfigureOutput, NoSourcePolicy, Prefix};
pub use debugger::Debugger;
pub use error::{Result, ScoopError};
pub use output::{FileSink, OutputSink, StderrSink};
pub use render::{ArgToString, RendererRegistry, TypeTag};
pub use source::{FsSources, MemorySources, SourceFile, SourceProvider};

use once_cell::sync::Lazy;

/// The process-wide debugger used by [`ic!`], [`ic_format!`] and [`ic()`](fn@ic).
pub static IC: Lazy<Debugger> = Lazy::new(Debugger::new);

/// Prints a tuple of values with their source text using [`IC`] and
/// returns the values: `()` for `()`, `x` for `(x,)`, the tuple otherwise.
///
/// ```
/// let (a, b) = scoop::ic((1, "one"));
/// assert_eq!((a, b), (1, "one"));
/// ```
#[track_caller]
pub fn ic<A: Args>(args: A) -> A::Output {
    IC.ic(args)
}

/// Prints each value with the expression that produced it and evaluates to
/// the values.
///
/// With no arguments, prints the file, line and function instead.
///
/// ```
/// use scoop::ic;
///
/// let x = 2;
/// let doubled = ic!(x * 2);
/// let (a, b) = ic!(x, doubled);
/// ic!();
/// assert_eq!((a, b), (2, 4));
/// ```
#[macro_export]
macro_rules! ic {
    () => {
        $crate::IC.ic(())
    };
    ($($value:expr),+ $(,)?) => {
        $crate::IC.ic(($($value,)+))
    };
}

/// Like [`ic!`], but returns the text instead of printing it. The values
/// are borrowed.
///
/// ```
/// use scoop::ic_format;
///
/// let name = String::from("scoop");
/// let text = ic_format!(name);
/// assert!(text.ends_with("\"scoop\""));
/// assert_eq!(name, "scoop");
/// ```
#[macro_export]
macro_rules! ic_format {
    () => {
        $crate::IC.format(())
    };
    ($($value:expr),+ $(,)?) => {
        $crate::IC.format(($(&$value,)+))
    };
}
