//! Sequential output filenames: `<prefix>_<ordinal>_de_<total><ext>`.

use super::{sanitize_filename_for_linux, sanitize_fragment, NAME_MAX};
use crate::storage::TEMP_SUFFIX;

/// Longest output name: the temp file (`<name>.part`) must fit in NAME_MAX too.
pub const MAX_IMAGE_NAME: usize = NAME_MAX - TEMP_SUFFIX.len();

/// Prefix used when the configured one sanitizes to nothing.
pub const DEFAULT_PREFIX: &str = "image";

/// Filename for the thumbnail at `ordinal` (1-based document position) out of
/// `total` enumerated thumbnails. `extension` carries its leading dot.
///
/// The ordinal is the thumbnail's position, not a success counter, and `total`
/// is fixed for the run, so skipped items never shift later names. The prefix
/// is shortened so the whole name stays within [`MAX_IMAGE_NAME`].
pub fn image_filename(prefix: &str, ordinal: usize, total: usize, extension: &str) -> String {
    let extension = sanitize_filename_for_linux(extension.trim_start_matches('.'));
    let suffix = if extension.is_empty() {
        format!("_{ordinal}_de_{total}")
    } else {
        format!("_{ordinal}_de_{total}.{extension}")
    };
    let prefix = sanitize_fragment(prefix, MAX_IMAGE_NAME.saturating_sub(suffix.len()));
    let prefix = if prefix.is_empty() {
        DEFAULT_PREFIX
    } else {
        prefix.as_str()
    };
    format!("{prefix}{suffix}")
}
