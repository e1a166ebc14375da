//! JSON file profile source.
//!
//! Reads a saved leaderboard payload from disk. Useful for offline runs
//! and for replaying a snapshot of the API.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use studyjam_core::RawProfile;
use tokio::fs;

use crate::source::{profiles_from_payload, ProfileSource, Result};

/// Profile source backed by a JSON file.
pub struct FileProfileSource {
    path: PathBuf,
}

impl FileProfileSource {
    /// Create a source reading `path` on every fetch.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// File being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ProfileSource for FileProfileSource {
    async fn fetch(&self) -> Result<Vec<RawProfile>> {
        let content = fs::read_to_string(&self.path).await?;
        let payload: serde_json::Value = serde_json::from_str(&content)?;
        profiles_from_payload(payload, &self.path.display().to_string())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
