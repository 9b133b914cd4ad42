//! Decoding of inline `data:image/...` payloads.

use super::InlineError;
use crate::resolver::InlineImage;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;

/// Standard alphabet, tolerant of missing `=` padding (common in page-generated payloads).
const INLINE_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decodes the payload after the first comma into raw bytes. Pure: the same
/// payload always yields the same bytes.
pub fn decode_inline(inline: &InlineImage) -> Result<Vec<u8>, InlineError> {
    if !inline.is_base64() {
        return Err(InlineError::UnsupportedEncoding {
            header: inline.header.clone(),
        });
    }
    // Attribute values can be wrapped over several lines.
    let compact: String = inline
        .data
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    Ok(INLINE_BASE64.decode(compact)?)
}
