//! Error type shared by all the value types.

use core::fmt;

/// Error returned by fallible parsing, indexing and mutation.
#[derive(Debug, Clone)]
pub struct Error {
    /// Inner error representation.
    repr: ErrorRepr,
}

impl Error {
    /// Returns the error kind.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match &self.repr {
            ErrorRepr::MalformedQuery(_) => ErrorKind::MalformedQuery,
            ErrorRepr::SinglePairRequired(_) => ErrorKind::SinglePairRequired,
            ErrorRepr::ValueCountMismatch { .. } => ErrorKind::ValueCountMismatch,
            ErrorRepr::IndexOutOfRange { .. } | ErrorRepr::ZeroStep => ErrorKind::IndexOutOfRange,
            ErrorRepr::SliceLengthMismatch { .. } => ErrorKind::IndexOutOfRange,
            ErrorRepr::InvalidForceCase(_) => ErrorKind::InvalidForceCase,
            ErrorRepr::InvalidPattern(_) => ErrorKind::InvalidPattern,
            ErrorRepr::InvalidIpv6Netloc => ErrorKind::InvalidIpv6Netloc,
            ErrorRepr::InvalidSplitFields(_) => ErrorKind::InvalidSplitFields,
            ErrorRepr::InvalidPort(_) => ErrorKind::InvalidPort,
            ErrorRepr::NotFound => ErrorKind::NotFound,
        }
    }

    /// Creates an error for a query field that breaks the form grammar.
    pub(crate) fn malformed_query(field: &str) -> Self {
        ErrorRepr::MalformedQuery(field.to_owned()).into()
    }

    /// Creates an error for a string that did not parse to a single pair.
    pub(crate) fn single_pair_required(item: &str) -> Self {
        ErrorRepr::SinglePairRequired(item.to_owned()).into()
    }

    /// Creates an error for an index beyond the bounds.
    pub(crate) fn out_of_range(index: isize, len: usize) -> Self {
        ErrorRepr::IndexOutOfRange { index, len }.into()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            ErrorRepr::MalformedQuery(field) => write!(f, "bad query field: {:?}", field),
            ErrorRepr::SinglePairRequired(item) => {
                write!(f, "expected exactly one key-value pair, got {:?}", item)
            }
            ErrorRepr::ValueCountMismatch { given, expected } => write!(
                f,
                "expected 1 or {} values, got {}",
                expected, given
            ),
            ErrorRepr::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range for length {}", index, len)
            }
            ErrorRepr::ZeroStep => f.write_str("slice step cannot be zero"),
            ErrorRepr::SliceLengthMismatch { given, expected } => write!(
                f,
                "attempt to assign sequence of size {} to extended slice of size {}",
                given, expected
            ),
            ErrorRepr::InvalidForceCase(s) => write!(
                f,
                "invalid case {:?}: expected \"upper\", \"lower\" or \"preserve\"",
                s
            ),
            ErrorRepr::InvalidPattern(e) => write!(f, "invalid pattern: {}", e),
            ErrorRepr::InvalidIpv6Netloc => f.write_str("invalid IPv6 URL"),
            ErrorRepr::InvalidSplitFields(n) => {
                write!(f, "expected 1 to 5 split fields, got {}", n)
            }
            ErrorRepr::InvalidPort(port) => write!(f, "port out of range: {:?}", port),
            ErrorRepr::NotFound => f.write_str("value not found"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.repr {
            ErrorRepr::InvalidPattern(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ErrorRepr> for Error {
    #[inline]
    fn from(repr: ErrorRepr) -> Self {
        Self { repr }
    }
}

impl From<regex::Error> for Error {
    #[inline]
    fn from(e: regex::Error) -> Self {
        ErrorRepr::InvalidPattern(e).into()
    }
}

/// Internal representation of `Error`.
#[derive(Debug, Clone)]
pub(crate) enum ErrorRepr {
    /// A query field without `=`, or an empty field, under strict parsing.
    MalformedQuery(String),
    /// A string that should have parsed to exactly one pair.
    SinglePairRequired(String),
    /// `set_values` got a value count that is neither 1 nor the match count.
    ValueCountMismatch {
        /// Number of values given.
        given: usize,
        /// Number of entries with the key.
        expected: usize,
    },
    /// Index outside the bounds, even after wrapping a negative one.
    IndexOutOfRange {
        /// Requested index.
        index: isize,
        /// Length of the sequence.
        len: usize,
    },
    /// Slice with a step of zero.
    ZeroStep,
    /// Extended slice assignment with a different number of items.
    SliceLengthMismatch {
        /// Number of items given.
        given: usize,
        /// Number of positions selected by the slice.
        expected: usize,
    },
    /// Unknown force-case literal.
    InvalidForceCase(String),
    /// Regular expression compilation failure.
    InvalidPattern(regex::Error),
    /// Netloc with unbalanced square brackets.
    InvalidIpv6Netloc,
    /// Wrong number of positional split fields.
    InvalidSplitFields(usize),
    /// Numeric port that does not fit in 16 bits.
    InvalidPort(String),
    /// Searched value is absent.
    NotFound,
}

/// Error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Query string that breaks the strict form grammar.
    MalformedQuery,
    /// String argument that does not parse to exactly one key-value pair.
    SinglePairRequired,
    /// Number of values is neither 1 nor the number of matching entries.
    ValueCountMismatch,
    /// Index or slice outside the bounds.
    IndexOutOfRange,
    /// Unknown force-case literal.
    InvalidForceCase,
    /// Regular expression that fails to compile.
    InvalidPattern,
    /// Authority with unbalanced IPv6 brackets.
    InvalidIpv6Netloc,
    /// Split fields of a wrong count.
    InvalidSplitFields,
    /// Port number outside `0..=65535`.
    InvalidPort,
    /// Searched value is absent.
    NotFound,
}
