//! Functions for common string operations.

use memchr::{memchr, memchr3};

/// Splits the string at the first occurrence of the byte.
///
/// The byte is included in neither string.
#[must_use]
pub(crate) fn find_split_hole(s: &str, needle: u8) -> Option<(&str, &str)> {
    debug_assert!(needle.is_ascii());
    let pos = memchr(needle, s.as_bytes())?;
    Some((&s[..pos], &s[(pos + 1)..]))
}

/// Splits the string at the first occurrence of any of the three bytes.
///
/// The found byte is included in the second string.
#[must_use]
pub(crate) fn find_split3(s: &str, needle1: u8, needle2: u8, needle3: u8) -> Option<(&str, &str)> {
    let pos = memchr3(needle1, needle2, needle3, s.as_bytes())?;
    Some(s.split_at(pos))
}
