//! Percent encoding.

use core::fmt::{self, Write as _};

use crate::charset::{CharacterSet, UNRESERVED};

/// A proxy to percent-encode a string.
///
/// Unreserved characters (`A-Za-z0-9-._~`) and the ASCII characters listed
/// in `safe` are written as is. Every other character, including `%` itself,
/// is written as uppercase `%XX` triplets of its UTF-8 bytes.
///
/// # Examples
///
/// ```
/// use uriplus::percent_encode::PercentEncoded;
///
/// let raw = "alpha/\u{03B1}?#";
/// assert_eq!(PercentEncoded::new(raw, "").to_string(), "alpha%2F%CE%B1%3F%23");
/// assert_eq!(PercentEncoded::new(raw, "/?").to_string(), "alpha/%CE%B1?%23");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PercentEncoded<T> {
    /// Raw string before being encoded.
    raw: T,
    /// Characters that pass through in addition to unreserved ones.
    safe: CharacterSet,
}

impl<T: fmt::Display> PercentEncoded<T> {
    /// Creates an encoding proxy that keeps `safe` characters unencoded.
    ///
    /// Non-ASCII characters in `safe` are ignored.
    pub fn new(raw: T, safe: &str) -> Self {
        Self {
            raw,
            safe: safe_set(safe),
        }
    }
}

impl<T: fmt::Display> fmt::Display for PercentEncoded<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        /// Filter that encodes a character before written if necessary.
        struct Filter<'a, 'b> {
            /// Characters written as is.
            safe: CharacterSet,
            /// Writer.
            writer: &'a mut fmt::Formatter<'b>,
        }
        impl fmt::Write for Filter<'_, '_> {
            fn write_str(&mut self, s: &str) -> fmt::Result {
                s.chars().try_for_each(|c| self.write_char(c))
            }
            fn write_char(&mut self, c: char) -> fmt::Result {
                if self.safe.contains(c) {
                    self.writer.write_char(c)
                } else {
                    write_pct_encoded_char(&mut self.writer, c)
                }
            }
        }
        let mut filter = Filter {
            safe: self.safe,
            writer: f,
        };
        write!(filter, "{}", self.raw)
    }
}

/// Builds the set of characters written without encoding.
fn safe_set(safe: &str) -> CharacterSet {
    let extra: Vec<u8> = safe.bytes().filter(u8::is_ascii).collect();
    UNRESERVED.or(&CharacterSet::new(&extra))
}

/// Percent-encodes the given character and writes it.
#[inline]
fn write_pct_encoded_char<W: fmt::Write>(writer: &mut W, c: char) -> fmt::Result {
    let mut buf = [0_u8; 4];
    let buf = c.encode_utf8(&mut buf);
    buf.bytes().try_for_each(|b| write!(writer, "%{:02X}", b))
}

/// Percent-encodes a string, keeping unreserved and `safe` characters.
#[must_use]
pub fn quote(raw: &str, safe: &str) -> String {
    PercentEncoded::new(raw, safe).to_string()
}
