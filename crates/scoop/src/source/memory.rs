use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::{SourceFile, SourceProvider};

/// Source text held in memory, keyed by file name.
#[derive(Debug, Default)]
pub struct MemorySources {
    files: RwLock<FxHashMap<String, Arc<str>>>,
}

impl MemorySources {
    /// An empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `text` under `file`.
    #[must_use]
    pub fn with_file(self, file: impl Into<String>, text: impl Into<Arc<str>>) -> Self {
        self.insert(file, text);
        self
    }

    /// Adds or replaces the text of `file`.
    pub fn insert(&self, file: impl Into<String>, text: impl Into<Arc<str>>) {
        self.files.write().insert(file.into(), text.into());
    }

    /// Removes `file`.
    pub fn remove(&self, file: &str) -> bool {
        self.files.write().remove(file).is_some()
    }
}

impl SourceProvider for MemorySources {
    fn load(&self, file: &str) -> io::Result<SourceFile> {
        let text = self
            .files
            .read()
            .get(file)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no source for {file}")))?;
        Ok(SourceFile {
            path: PathBuf::from(file),
            text,
        })
    }
}
