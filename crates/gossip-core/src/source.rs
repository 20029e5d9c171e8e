//! Snapshot sources.
//!
//! A source hands back the raw bytes of the current snapshot. Sources are
//! read-only and are called once per collection; they never cache.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error)]
pub enum SourceError {
    /// The snapshot could not be read. Missing files, permission errors
    /// and short reads all land here.
    #[error("snapshot {source_name} unavailable: {error}")]
    Unavailable {
        source_name: String,
        #[source]
        error: io::Error,
    },
}

/// Supplies the current snapshot bytes.
pub trait SnapshotSource: Send + Sync {
    /// Fetch the snapshot as it exists right now.
    fn fetch(&self) -> Result<Vec<u8>, SourceError>;

    /// Human-readable name for logs.
    fn describe(&self) -> String;
}

impl<S: SnapshotSource + ?Sized> SnapshotSource for std::sync::Arc<S> {
    fn fetch(&self) -> Result<Vec<u8>, SourceError> {
        (**self).fetch()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Reads the snapshot from a file on every fetch.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotSource for FileSource {
    fn fetch(&self) -> Result<Vec<u8>, SourceError> {
        let bytes = std::fs::read(&self.path).map_err(|error| SourceError::Unavailable {
            source_name: self.describe(),
            error,
        })?;
        trace!(path = %self.path.display(), bytes = bytes.len(), "snapshot read");
        Ok(bytes)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// A fixed in-memory snapshot, or a fixed failure.
#[derive(Debug, Clone)]
pub struct StaticSource {
    contents: Result<Vec<u8>, io::ErrorKind>,
}

impl StaticSource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            contents: Ok(bytes.into()),
        }
    }

    /// A source whose every fetch fails with the given I/O error kind.
    pub fn failing(kind: io::ErrorKind) -> Self {
        Self { contents: Err(kind) }
    }
}

impl SnapshotSource for StaticSource {
    fn fetch(&self) -> Result<Vec<u8>, SourceError> {
        match &self.contents {
            Ok(bytes) => Ok(bytes.clone()),
            Err(kind) => Err(SourceError::Unavailable {
                source_name: self.describe(),
                error: io::Error::from(*kind),
            }),
        }
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn file_source_reads_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[]").unwrap();

        let source = FileSource::new(file.path());
        assert_eq!(source.fetch().unwrap(), b"[]");
    }

    #[test]
    fn file_source_sees_updates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[]").unwrap();
        let source = FileSource::new(file.path());
        assert_eq!(source.fetch().unwrap(), b"[]");

        std::fs::write(file.path(), b"[null]").unwrap();
        assert_eq!(source.fetch().unwrap(), b"[null]");
    }

    #[test]
    fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("missing.json"));

        let err = source.fetch().unwrap_err();
        let SourceError::Unavailable { error, .. } = &err;
        assert_eq!(error.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn static_source_round_trips_bytes() {
        let source = StaticSource::new("[1]");
        assert_eq!(source.fetch().unwrap(), b"[1]");
        assert_eq!(source.fetch().unwrap(), b"[1]");
    }

    #[test]
    fn failing_static_source() {
        let source = StaticSource::failing(io::ErrorKind::PermissionDenied);
        assert!(source.fetch().is_err());
    }
}
