//! Source location.
//!
//! Maps a [`CallSite`] to the source text around it: the whole file, its
//! syntax tree, the innermost function body containing the call, and the
//! byte offset the call site points at.

mod fs;
mod memory;

pub use fs::FsSources;
pub use memory::MemorySources;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use scoop_syntax::ast::FnDef;
use scoop_syntax::{parse, LineCol, LineIndex, Parse, SyntaxNode, TextRange, TextSize};
use smol_str::SmolStr;
use tracing::trace;

use crate::callsite::CallSite;
use crate::error::{Result, ScoopError};

/// Source text of one file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Where the text was read from.
    pub path: PathBuf,
    /// The file contents.
    pub text: Arc<str>,
}

/// Supplies source text for the file names compilers record in caller
/// locations.
pub trait SourceProvider: Send + Sync {
    /// Loads `file`.
    ///
    /// # Errors
    ///
    /// `NotFound` when the provider has no text for `file`; any other error
    /// when reading failed.
    fn load(&self, file: &str) -> io::Result<SourceFile>;
}

/// A call site resolved to its surrounding source.
#[derive(Debug)]
pub struct Located {
    /// The call site that was located.
    pub site: CallSite,
    /// The source file.
    pub file: SourceFile,
    /// Line index of the file.
    pub index: LineIndex,
    /// Parse of the whole file.
    pub parse: Parse,
    /// The innermost function body containing the call, or the file root.
    pub block: SyntaxNode,
    /// 1-based line the block starts on.
    pub start_line: u32,
    /// Byte offset the block starts at.
    pub start_offset: TextSize,
    /// Byte offset the call site points at.
    pub offset: TextSize,
    /// Display name of the enclosing function: `name` or `Type::name`.
    pub function: Option<SmolStr>,
}

impl Located {
    /// The file text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.file.text
    }

    /// The syntax tree root.
    #[must_use]
    pub fn root(&self) -> SyntaxNode {
        self.parse.syntax()
    }

    /// Line and column of a byte offset.
    #[must_use]
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        self.index.line_col(&self.file.text, offset)
    }

    /// Range of the enclosing block.
    #[must_use]
    pub fn block_range(&self) -> TextRange {
        self.block.text_range()
    }

    /// Returns `true` if a parse error lies inside the enclosing block.
    #[must_use]
    pub fn block_has_errors(&self) -> bool {
        let range = self.block_range();
        self.parse
            .errors()
            .iter()
            .any(|err| range.contains_range(err.range) || err.range.start() == range.end())
    }
}

/// Finds call sites in source text.
pub struct Locator<'a> {
    sources: &'a dyn SourceProvider,
}

impl<'a> Locator<'a> {
    /// A locator reading from `sources`.
    #[must_use]
    pub fn new(sources: &'a dyn SourceProvider) -> Self {
        Self { sources }
    }

    /// Loads and parses the file of `site` and finds the enclosing block.
    ///
    /// # Errors
    ///
    /// [`ScoopError::NoSourceAvailable`] when the file is missing or the line
    /// is past its end; [`ScoopError::Io`] for other read failures.
    pub fn locate(&self, site: &CallSite) -> Result<Located> {
        let file = self.sources.load(site.file).map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                ScoopError::no_source(site.file, site.line, "source file not found")
            } else {
                ScoopError::Io {
                    path: PathBuf::from(site.file),
                    source: err,
                }
            }
        })?;

        let index = LineIndex::new(&file.text);
        let line_count = u32::try_from(index.line_count()).unwrap_or(u32::MAX);
        if site.line == 0 || site.line > line_count {
            return Err(ScoopError::no_source(
                site.file,
                site.line,
                format!("line is past the end of the file ({line_count} lines)"),
            ));
        }
        let offset = index
            .offset(&file.text, site.line, site.column.max(1))
            .ok_or_else(|| ScoopError::no_source(site.file, site.line, "line not in file"))?;

        let parse = parse(&file.text);
        let root = parse.syntax();
        let enclosing = root
            .descendants()
            .filter_map(FnDef::cast)
            .filter(|def| {
                def.body()
                    .is_some_and(|body| body.text_range().contains(offset))
            })
            .last();

        let (block, function) = match enclosing {
            Some(def) => {
                let function = display_name(&def);
                let body = def.body().unwrap_or_else(|| root.clone());
                (body, function)
            }
            None => (root.clone(), None),
        };
        let start_offset = block.text_range().start();
        let start_line = index.line_of(start_offset);

        trace!(
            target: "scoop::source",
            site = %site,
            start_line,
            function = function.as_deref().unwrap_or("<none>"),
            "located call site"
        );

        Ok(Located {
            site: *site,
            file,
            index,
            parse,
            block,
            start_line,
            start_offset,
            offset,
            function,
        })
    }
}

fn display_name(def: &FnDef) -> Option<SmolStr> {
    let name = def.name()?;
    match def.parent_impl().and_then(|imp| imp.self_type_name()) {
        Some(ty) => Some(SmolStr::new(format!("{ty}::{name}"))),
        None => Some(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILE: &str = "src/app.rs";
    const TEXT: &str = r#"use scoop::ic;

struct Engine;

impl Engine {
    fn start(&self) {
        ic!(self.rpm());
    }
}

fn main() {
    let x = 1;
    ic!(x);
}
"#;

    fn sources() -> MemorySources {
        MemorySources::new().with_file(FILE, TEXT)
    }

    fn site(line: u32, column: u32) -> CallSite {
        CallSite {
            file: FILE,
            line,
            column,
            module_path: None,
        }
    }

    #[test]
    fn locates_method_body() {
        let sources = sources();
        let located = Locator::new(&sources).locate(&site(7, 9)).unwrap();
        assert_eq!(located.function.as_deref(), Some("Engine::start"));
        assert_eq!(located.start_line, 6);
        assert_eq!(&located.text()[usize::from(located.offset)..][..3], "ic!");
        assert!(!located.block_has_errors());
    }

    #[test]
    fn locates_free_function() {
        let sources = sources();
        let located = Locator::new(&sources).locate(&site(13, 5)).unwrap();
        assert_eq!(located.function.as_deref(), Some("main"));
        assert_eq!(located.start_line, 11);
        assert_eq!(located.line_col(located.offset), LineCol { line: 13, col: 5 });
    }

    #[test]
    fn top_level_site_uses_whole_file() {
        let sources = sources();
        let located = Locator::new(&sources).locate(&site(1, 1)).unwrap();
        assert_eq!(located.function, None);
        assert_eq!(located.start_line, 1);
        assert_eq!(located.block_range().len(), TextSize::of(TEXT));
    }

    #[test]
    fn missing_file_and_stale_line() {
        let sources = sources();
        let locator = Locator::new(&sources);
        let missing = CallSite::line_only("src/gone.rs", 3);
        assert!(matches!(
            locator.locate(&missing),
            Err(ScoopError::NoSourceAvailable { .. })
        ));
        assert!(matches!(
            locator.locate(&site(400, 1)),
            Err(ScoopError::NoSourceAvailable { line: 400, .. })
        ));
    }

    #[test]
    fn other_io_errors_propagate() {
        struct Denied;
        impl SourceProvider for Denied {
            fn load(&self, _file: &str) -> io::Result<SourceFile> {
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
            }
        }
        let err = Locator::new(&Denied).locate(&site(1, 1)).unwrap_err();
        assert!(matches!(err, ScoopError::Io { .. }));
    }
}
