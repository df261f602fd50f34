use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::trace;

use super::{SourceFile, SourceProvider};

/// Reads source files from disk.
///
/// Relative file names (as recorded by the compiler, relative to the
/// directory it was invoked in) are tried against the current directory and
/// each of its ancestors, then against the ancestors of `CARGO_MANIFEST_DIR`.
/// Files are read once and cached by name.
#[derive(Debug)]
pub struct FsSources {
    roots: Vec<PathBuf>,
    cache: Mutex<FxHashMap<String, SourceFile>>,
}

impl FsSources {
    /// A provider searching the default roots.
    #[must_use]
    pub fn new() -> Self {
        Self::with_roots(default_roots())
    }

    /// A provider searching `roots`, in order.
    #[must_use]
    pub fn with_roots(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            cache: Mutex::new(FxHashMap::default()),
        }
    }

    /// The directories relative names are resolved against.
    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Drops every cached file.
    pub fn clear(&self) {
        self.cache.lock().clear();
    }

    fn candidates(&self, file: &str) -> Vec<PathBuf> {
        let path = Path::new(file);
        if path.is_absolute() {
            return vec![path.to_path_buf()];
        }
        self.roots.iter().map(|root| root.join(path)).collect()
    }
}

impl Default for FsSources {
    fn default() -> Self {
        Self::new()
    }
}

fn default_roots() -> Vec<PathBuf> {
    let mut roots: Vec<PathBuf> = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        roots.extend(cwd.ancestors().map(Path::to_path_buf));
    }
    if let Some(manifest_dir) = std::env::var_os("CARGO_MANIFEST_DIR") {
        for dir in Path::new(&manifest_dir).ancestors() {
            if !roots.iter().any(|root| root == dir) {
                roots.push(dir.to_path_buf());
            }
        }
    }
    roots
}

impl SourceProvider for FsSources {
    fn load(&self, file: &str) -> io::Result<SourceFile> {
        if let Some(cached) = self.cache.lock().get(file) {
            return Ok(cached.clone());
        }

        for path in self.candidates(file) {
            match fs::read_to_string(&path) {
                Ok(text) => {
                    trace!(target: "scoop::source", file, path = %path.display(), "read source file");
                    let source = SourceFile {
                        path,
                        text: Arc::from(text),
                    };
                    self.cache.lock().insert(file.to_string(), source.clone());
                    return Ok(source);
                }
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => return Err(err),
            }
        }

        Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{file} not found under any source root"),
        ))
    }
}
