//! Temp-file writer finalized by rename.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Open temp file for one image.
pub struct ImageWriter {
    file: File,
    temp_path: PathBuf,
}

impl ImageWriter {
    /// Create a new temp file at `temp_path`. Overwrites if the path already exists.
    pub fn create(temp_path: &Path) -> io::Result<Self> {
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(temp_path)?;
        Ok(Self {
            file,
            temp_path: temp_path.to_path_buf(),
        })
    }

    pub fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        self.file.write_all(data)
    }

    /// Path to the current temp file.
    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Closes and deletes the temp file, for a write that failed midway.
    pub fn abort(self) {
        let Self { file, temp_path } = self;
        drop(file);
        if let Err(e) = std::fs::remove_file(&temp_path) {
            tracing::debug!(path = %temp_path.display(), "could not remove temp file: {}", e);
        }
    }

    /// Syncs, closes and renames the temp file to `final_path`. On failure the
    /// temp file is removed.
    pub fn finalize(self, final_path: &Path) -> io::Result<()> {
        let Self { file, temp_path } = self;
        let synced = file.sync_all();
        drop(file);
        let result = synced.and_then(|()| std::fs::rename(&temp_path, final_path));
        if result.is_err() {
            let _ = std::fs::remove_file(&temp_path);
        }
        result
    }
}
