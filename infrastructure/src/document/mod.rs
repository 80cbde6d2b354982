//! Document sources: a markdown file on disk or standard input

use md2wechat_application::{DocumentError, DocumentSource};
use std::io::Read;
use std::path::{Path, PathBuf};

/// A markdown file read fresh on every request
#[derive(Debug, Clone)]
pub struct FileDocument {
    path: PathBuf,
}

impl FileDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSource for FileDocument {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn read_text(&self) -> Result<String, DocumentError> {
        std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DocumentError::NotFound(self.name()),
            _ => DocumentError::Io(format!("{}: {}", self.name(), e)),
        })
    }
}

/// Markdown piped through standard input, read once
#[derive(Debug, Default)]
pub struct StdinDocument {
    cached: std::sync::OnceLock<String>,
}

impl StdinDocument {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentSource for StdinDocument {
    fn name(&self) -> String {
        "<stdin>".to_string()
    }

    fn read_text(&self) -> Result<String, DocumentError> {
        if let Some(text) = self.cached.get() {
            return Ok(text.clone());
        }
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| DocumentError::Io(format!("<stdin>: {}", e)))?;
        Ok(self.cached.get_or_init(|| text).clone())
    }
}
