//! Percent decoding.

use std::borrow::Cow;

use memchr::memchr;

/// Decodes `%XX` triplets and returns the result as UTF-8.
///
/// Triplets that are not followed by two hex digits are kept verbatim.
/// Decoded byte sequences that are not valid UTF-8 are replaced with
/// `U+FFFD`.
///
/// # Examples
///
/// ```
/// use uriplus::percent_decode::unquote;
///
/// assert_eq!(unquote("a%20b%2Fc"), "a b/c");
/// assert_eq!(unquote("100%"), "100%");
/// assert_eq!(unquote("%CE%B1"), "\u{03B1}");
/// ```
#[must_use]
pub fn unquote(s: &str) -> Cow<'_, str> {
    if memchr(b'%', s.as_bytes()).is_none() {
        return Cow::Borrowed(s);
    }
    let decoded = decode_bytes(s.as_bytes());
    match String::from_utf8_lossy(&decoded) {
        Cow::Borrowed(v) => Cow::Owned(v.to_owned()),
        Cow::Owned(v) => Cow::Owned(v),
    }
}

/// Decodes a form field: `+` becomes a space, then triplets are decoded.
#[must_use]
pub fn unquote_plus(s: &str) -> Cow<'_, str> {
    if memchr(b'+', s.as_bytes()).is_none() {
        return unquote(s);
    }
    Cow::Owned(unquote(&s.replace('+', " ")).into_owned())
}

/// Decodes all well-formed triplets in the byte string.
fn decode_bytes(mut rest: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(rest.len());
    while let Some(pos) = memchr(b'%', rest) {
        out.extend_from_slice(&rest[..pos]);
        rest = &rest[pos..];
        match take_xdigits2(&rest[1..]) {
            Some(byte) => {
                out.push(byte);
                rest = &rest[3..];
            }
            None => {
                out.push(b'%');
                rest = &rest[1..];
            }
        }
    }
    out.extend_from_slice(rest);
    out
}

/// Decodes the two leading hex digits, if both are present.
fn take_xdigits2(s: &[u8]) -> Option<u8> {
    /// Converts a hex digit into its value.
    fn hexdigit(b: u8) -> Option<u8> {
        (b as char).to_digit(16).map(|v| v as u8)
    }
    match s {
        [hi, lo, ..] => Some((hexdigit(*hi)? << 4) | hexdigit(*lo)?),
        _ => None,
    }
}
