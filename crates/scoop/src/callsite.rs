//! The runtime position a debugger call was made from.

use std::fmt;
use std::panic::Location;

/// Where a debugger entry point was invoked.
///
/// Lines and columns are 1-based, as reported by [`Location`]; columns count
/// characters. A column of `0` means only the line is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite {
    /// Source file, as recorded by the compiler.
    pub file: &'static str,
    /// 1-based line.
    pub line: u32,
    /// 1-based character column, or `0` when unknown.
    pub column: u32,
    /// `module_path!()` of the caller, when the caller supplied it.
    pub module_path: Option<&'static str>,
}

impl CallSite {
    /// The location of the caller of the enclosing `#[track_caller]` function.
    #[track_caller]
    #[must_use]
    pub fn caller() -> Self {
        Self::from_location(Location::caller())
    }

    /// Builds a call site from a compiler-provided location.
    #[must_use]
    pub fn from_location(location: &Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
            module_path: None,
        }
    }

    /// A call site for which only the line is known.
    #[must_use]
    pub fn line_only(file: &'static str, line: u32) -> Self {
        Self {
            file,
            line,
            column: 0,
            module_path: None,
        }
    }

    /// Attaches the caller's module path.
    #[must_use]
    pub fn with_module_path(mut self, module_path: &'static str) -> Self {
        self.module_path = Some(module_path);
        self
    }

    /// Returns `true` if the column is known.
    #[must_use]
    pub fn has_column(&self) -> bool {
        self.column > 0
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_column() {
            write!(f, "{}:{}:{}", self.file, self.line, self.column)
        } else {
            write!(f, "{}:{}", self.file, self.line)
        }
    }
}
