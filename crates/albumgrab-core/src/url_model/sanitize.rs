//! Linux-safe filename sanitization for output prefixes and extensions.

/// Longest filename a Linux filesystem accepts, in bytes.
pub const NAME_MAX: usize = 255;

/// Sanitizes a whole filename for Linux, capped at [`NAME_MAX`] bytes.
pub fn sanitize_filename_for_linux(name: &str) -> String {
    sanitize_fragment(name, NAME_MAX)
}

/// Sanitizes a filename fragment (e.g. a user-chosen prefix) that must fit in
/// `max_bytes`, leaving room for whatever the caller appends.
///
/// - NUL, `/`, `\`, whitespace and control characters become `_`
/// - runs of `_` collapse to one
/// - leading/trailing spaces, dots and underscores are dropped
/// - the result is cut on a char boundary at `max_bytes`
pub fn sanitize_fragment(name: &str, max_bytes: usize) -> String {
    let mut out = String::with_capacity(name.len().min(max_bytes));
    for c in name.chars() {
        let c = if c == '/' || c == '\\' || c.is_control() || c.is_whitespace() {
            '_'
        } else {
            c
        };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }

    let edge = |c: char| c == '.' || c == '_';
    let mut cut = out.trim_matches(edge);
    if cut.len() > max_bytes {
        let mut take = max_bytes;
        while !cut.is_char_boundary(take) {
            take -= 1;
        }
        cut = cut[..take].trim_end_matches(edge);
    }
    cut.to_string()
}
