//! URL normalization and output filename derivation.
//!
//! Normalizes the shapes a resolved image URL can take (absolute,
//! protocol-relative, relative) and derives the sequential output filename.

mod naming;
mod normalize;
mod path;
mod sanitize;

pub use naming::{image_filename, DEFAULT_PREFIX, MAX_IMAGE_NAME};
pub use normalize::{normalize_image_url, UrlError};
pub use path::{extension_from_url, DEFAULT_EXTENSION};
pub use sanitize::{sanitize_filename_for_linux, sanitize_fragment, NAME_MAX};
