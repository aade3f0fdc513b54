use crate::acquisition::MediaStore;
use crate::error::ScanError;
use crate::models::ImageReference;
use chrono::Local;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Serialize)]
struct EntryMetadata<'a> {
    title: &'a str,
    description: &'a str,
    created_at: String,
}

/// Media store backed by a directory
///
/// Each entry is an empty image file plus a JSON sidecar holding its title
/// and description.
#[derive(Debug, Clone)]
pub struct FsMediaStore {
    root: PathBuf,
    created: usize,
}

impl FsMediaStore {
    /// Store entries under `root`, created on first use
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            created: 0,
        }
    }

    /// Store root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Entries created by this store
    pub fn created(&self) -> usize {
        self.created
    }
}

impl MediaStore for FsMediaStore {
    fn create_entry(&mut self, title: &str, description: &str) -> Result<ImageReference, ScanError> {
        fs::create_dir_all(&self.root).map_err(ScanError::acquisition)?;

        let now = Local::now();
        let path = self.root.join(format!(
            "IMG_{}_{}_{}.png",
            now.format("%Y%m%d_%H%M%S"),
            std::process::id(),
            self.created
        ));
        fs::File::create(&path).map_err(ScanError::acquisition)?;

        let metadata = EntryMetadata {
            title,
            description,
            created_at: now.to_rfc3339(),
        };
        let json = serde_json::to_vec_pretty(&metadata).map_err(ScanError::acquisition)?;
        fs::write(path.with_extension("json"), json).map_err(ScanError::acquisition)?;

        self.created += 1;
        debug!(path = %path.display(), "created media entry");
        Ok(ImageReference::from_path(path))
    }
}
