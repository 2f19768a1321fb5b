//! Binary content detection.

/// Number of leading bytes checked for null bytes. Matches how git
/// classifies binary files; binary formats almost always have nulls in
/// their headers.
const BINARY_CHECK_BYTES: usize = 8000;

/// Returns `true` if the first [`BINARY_CHECK_BYTES`] of `content`
/// contain a null byte.
///
/// Traversal only opens recognized text extensions, but a binary file
/// renamed to `.txt` must not flood the report with noise - the scanner
/// uses this to skip such content silently.
#[must_use]
pub fn is_binary_content(content: &str) -> bool {
    is_binary_bytes(content.as_bytes())
}

/// Byte-slice variant of [`is_binary_content`].
#[must_use]
pub fn is_binary_bytes(bytes: &[u8]) -> bool {
    let check_len = bytes.len().min(BINARY_CHECK_BYTES);
    bytes[..check_len].contains(&0)
}
