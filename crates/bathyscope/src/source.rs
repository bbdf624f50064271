//! Text sources that loads read from.

use std::future::Future;
use std::path::{Path, PathBuf};

use bathyscope_core::{BathyscopeError, Result};

/// Something that can asynchronously produce the text of one dataset.
pub trait TextSource {
    /// Human-readable name used in logs and errors.
    fn describe(&self) -> String;

    /// Reads the whole text.
    fn read_text(&self) -> impl Future<Output = Result<String>>;
}

/// A file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Creates a source for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a source for `relative` resolved against `base`.
    pub fn in_dir(base: impl AsRef<Path>, relative: impl AsRef<Path>) -> Self {
        Self::new(base.as_ref().join(relative))
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TextSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn read_text(&self) -> Result<String> {
        std::fs::read_to_string(&self.path).map_err(|e| BathyscopeError::SourceUnavailable {
            path: self.describe(),
            reason: e.to_string(),
        })
    }
}

/// User-supplied text, e.g. pasted or picked in a UI.
#[derive(Debug, Clone)]
pub struct InlineSource {
    label: String,
    text: String,
}

impl InlineSource {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

impl TextSource for InlineSource {
    fn describe(&self) -> String {
        self.label.clone()
    }

    async fn read_text(&self) -> Result<String> {
        Ok(self.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pollster::FutureExt;

    #[test]
    fn test_missing_file_is_unavailable() {
        let source = FileSource::new("/nonexistent/bathyscope/track.csv");
        let err = source.read_text().block_on().unwrap_err();
        assert!(matches!(err, BathyscopeError::SourceUnavailable { .. }));
        assert!(err.to_string().contains("track.csv"));
    }

    #[test]
    fn test_in_dir_joins_paths() {
        let source = FileSource::in_dir("data", "points.csv");
        assert_eq!(source.path(), Path::new("data/points.csv"));
    }

    #[test]
    fn test_inline_source() {
        let source = InlineSource::new("pasted", "x,y,z,flag\n1,2,3,0\n");
        assert_eq!(source.describe(), "pasted");
        assert_eq!(source.read_text().block_on().unwrap(), "x,y,z,flag\n1,2,3,0\n");
    }
}
