use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

const FILE_SCHEME: &str = "file://";

/// Opaque handle to an image owned by the media store or the gallery
///
/// Usually a `file://` URI. Bare paths are accepted too; any other scheme is
/// carried along but cannot be opened locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ImageReference(String);

impl ImageReference {
    /// Wrap a URI or path as-is
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// Build a `file://` reference for a local path
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self(format!("{}{}", FILE_SCHEME, path.as_ref().display()))
    }

    /// The reference exactly as stored
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Local filesystem path, if the reference points at one
    pub fn to_path(&self) -> Option<PathBuf> {
        if let Some(rest) = self.0.strip_prefix(FILE_SCHEME) {
            return (!rest.is_empty()).then(|| PathBuf::from(rest));
        }
        if self.0.is_empty() || self.0.contains("://") {
            return None;
        }
        Some(PathBuf::from(&self.0))
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
