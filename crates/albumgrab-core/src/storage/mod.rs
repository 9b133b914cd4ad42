//! Output files: destination directory setup and atomic image writes.
//!
//! Each image is written to `<name>.part`, synced, then renamed to its final
//! name, so an interrupted run never leaves a truncated file under a real name.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

mod writer;

pub use writer::ImageWriter;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `a_1_de_3.jpg` → `a_1_de_3.jpg.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Creates the destination directory (and parents) if absent.
pub fn ensure_dest_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create destination {}", dir.display()))?;
    Ok(())
}

/// Writes `bytes` to `dir/file_name` through a temp file and returns the final path.
/// An existing file with the same name is replaced.
pub fn write_image(dir: &Path, file_name: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
    let final_path = dir.join(file_name);
    let mut writer = ImageWriter::create(&temp_path(&final_path))?;
    if let Err(e) = writer.write_all(bytes) {
        writer.abort();
        return Err(e);
    }
    writer.finalize(&final_path)?;
    Ok(final_path)
}
