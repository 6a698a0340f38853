//! Character classes from [RFC 3986].
//!
//! Every set here is an ASCII-only table built at compile time by union of
//! smaller sets. Percent-encoding is modelled at the character level: the
//! `%` sign and the hex digits are plain members of [`PERCENT_ENCODING`], so
//! the sets answer "may this character appear" rather than "is this a
//! well-formed triplet".
//!
//! [RFC 3986]: https://www.rfc-editor.org/rfc/rfc3986

use core::fmt;

/// An immutable set of ASCII characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharacterSet {
    /// Bit `n` is set iff the ASCII character `n` is a member.
    bits: u128,
}

impl CharacterSet {
    /// Creates a set containing exactly the given ASCII characters.
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a constant) if any byte is not ASCII.
    #[must_use]
    pub const fn new(mut bytes: &[u8]) -> Self {
        let mut bits = 0_u128;
        while let [cur, rest @ ..] = bytes {
            assert!(cur.is_ascii(), "character sets only hold ASCII");
            bits |= 1 << *cur;
            bytes = rest;
        }
        Self { bits }
    }

    /// Returns the union of `self` and `other`.
    #[must_use]
    pub const fn or(self, other: &CharacterSet) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Returns `true` if the character is a member of the set.
    #[inline]
    #[must_use]
    pub const fn contains(&self, c: char) -> bool {
        let c = c as u32;
        c < 128 && (self.bits >> c) & 1 == 1
    }

    /// Returns `true` if every member of `self` is also a member of `other`.
    #[must_use]
    pub const fn is_subset(&self, other: &CharacterSet) -> bool {
        self.bits & !other.bits == 0
    }

    /// Returns the number of members.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns `true` if the set has no members.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Iterates over the members in ASCII order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        (0_u8..128)
            .filter(move |&b| (self.bits >> b) & 1 == 1)
            .map(char::from)
    }
}

impl fmt::Debug for CharacterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CharacterSet")
            .field(&self.chars().collect::<String>())
            .finish()
    }
}

/// Shorthand for [`CharacterSet::new`] in constant definitions.
const fn gen(bytes: &[u8]) -> CharacterSet {
    CharacterSet::new(bytes)
}

/// HEXDIG = DIGIT / "A" / "B" / "C" / "D" / "E" / "F" (case-insensitive)
pub const HEXDIGITS: &CharacterSet = &DIGITS.or(&gen(b"ABCDEFabcdef"));

/// DIGIT = 0-9
pub const DIGITS: &CharacterSet = &gen(b"0123456789");

/// ALPHA = A-Z / a-z
pub const LETTERS: &CharacterSet = &gen(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz");

/// gen-delims = ":" / "/" / "?" / "#" / "[" / "]" / "@"
pub const GENERIC_DELIMITERS: &CharacterSet = &gen(b":/?#[]@");

/// sub-delims = "!" / "$" / "&" / "'" / "(" / ")" / "*" / "+" / "," / ";" / "="
pub const SPECIFIC_DELIMITERS: &CharacterSet = &gen(b"!$&'()*+,;=");

/// pct-encoded characters: `%` and HEXDIG.
pub const PERCENT_ENCODING: &CharacterSet = &HEXDIGITS.or(&gen(b"%"));

/// unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"
pub const UNRESERVED: &CharacterSet = &LETTERS.or(DIGITS).or(&gen(b"-._~"));

/// reserved = gen-delims / sub-delims
pub const RESERVED: &CharacterSet = &GENERIC_DELIMITERS.or(SPECIFIC_DELIMITERS);

/// pchar = unreserved / pct-encoded / sub-delims / ":" / "@"
pub const P_CHARS: &CharacterSet = &UNRESERVED
    .or(PERCENT_ENCODING)
    .or(SPECIFIC_DELIMITERS)
    .or(&gen(b":@"));

/// Every character that may appear anywhere in a URI.
pub const ALL: &CharacterSet = &GENERIC_DELIMITERS
    .or(SPECIFIC_DELIMITERS)
    .or(PERCENT_ENCODING)
    .or(UNRESERVED);

/// segment = *pchar
pub const SEGMENT: &CharacterSet = P_CHARS;

/// scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
pub const SCHEME: &CharacterSet = &LETTERS.or(DIGITS).or(&gen(b"+-."));

/// userinfo = *( unreserved / pct-encoded / sub-delims / ":" )
pub const USERINFO: &CharacterSet = &UNRESERVED
    .or(PERCENT_ENCODING)
    .or(SPECIFIC_DELIMITERS)
    .or(&gen(b":"));

/// Host characters: reg-name plus the IP-literal brackets and colons.
pub const HOST: &CharacterSet = &DIGITS
    .or(HEXDIGITS)
    .or(UNRESERVED)
    .or(PERCENT_ENCODING)
    .or(SPECIFIC_DELIMITERS)
    .or(&gen(b".-:[]"));

/// port = *DIGIT
pub const PORT: &CharacterSet = DIGITS;

/// path = *( pchar / "/" )
pub const PATH: &CharacterSet = &SEGMENT.or(&gen(b"/"));

/// query = *( pchar / "/" / "?" )
pub const QUERY: &CharacterSet = &P_CHARS.or(&gen(b"/?"));

/// fragment = *( pchar / "/" / "?" )
pub const FRAGMENT: &CharacterSet = QUERY;

/// Returns `true` if any of the candidates uses a character outside `set`.
///
/// Empty candidates are skipped, so they never count as a violation.
/// This detects violations; callers negate it to confirm validity.
///
/// # Examples
///
/// ```
/// use uriplus::charset::{invalid_check, SCHEME};
///
/// assert!(!invalid_check(SCHEME, ["http", "", "svn+ssh"]));
/// assert!(invalid_check(SCHEME, ["http", "not a scheme"]));
/// ```
pub fn invalid_check<I, S>(set: &CharacterSet, candidates: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    candidates
        .into_iter()
        .any(|s| s.as_ref().chars().any(|c| !set.contains(c)))
}
