//! Splitting URI strings into their five components and joining them back.

use core::fmt;

use crate::charset::SCHEME;
use crate::error::{Error, ErrorRepr};
use crate::parser::str::{find_split3, find_split_hole};

/// Schemes whose URIs are rendered with `//` even when the netloc is empty.
const USES_NETLOC: &[&str] = &[
    "", "ftp", "http", "gopher", "nntp", "telnet", "imap", "wais", "file", "mms", "https",
    "shttp", "snews", "prospero", "rtsp", "rtsps", "rtspu", "rsync", "svn", "svn+ssh", "sftp",
    "nfs", "git", "git+ssh", "ws", "wss", "itms-services",
];

/// The five components of a URI: `scheme://netloc/path?query#fragment`.
///
/// No component carries its delimiter.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SplitResult {
    /// Scheme, without the trailing `:`.
    pub scheme: String,
    /// Network location (authority), without the leading `//`.
    pub netloc: String,
    /// Path.
    pub path: String,
    /// Query, without the leading `?`.
    pub query: String,
    /// Fragment, without the leading `#`.
    pub fragment: String,
}

impl SplitResult {
    /// Creates a split result from its five components.
    pub fn new(
        scheme: impl Into<String>,
        netloc: impl Into<String>,
        path: impl Into<String>,
        query: impl Into<String>,
        fragment: impl Into<String>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            netloc: netloc.into(),
            path: path.into(),
            query: query.into(),
            fragment: fragment.into(),
        }
    }

    /// Creates a split result from 1 to 5 positional fields.
    ///
    /// Missing trailing fields are empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use uriplus::split::SplitResult;
    ///
    /// let split = SplitResult::from_fields(&["https", "example.com"])?;
    /// assert_eq!(split.unsplit(), "https://example.com");
    /// assert!(SplitResult::from_fields::<&str>(&[]).is_err());
    /// # Ok::<_, uriplus::Error>(())
    /// ```
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self, Error> {
        if fields.is_empty() || fields.len() > 5 {
            return Err(ErrorRepr::InvalidSplitFields(fields.len()).into());
        }
        let field = |i: usize| fields.get(i).map_or("", AsRef::as_ref);
        Ok(Self::new(field(0), field(1), field(2), field(3), field(4)))
    }

    /// Returns the components as a tuple in `(scheme, netloc, path, query, fragment)` order.
    #[must_use]
    pub fn as_tuple(&self) -> (&str, &str, &str, &str, &str) {
        (
            &self.scheme,
            &self.netloc,
            &self.path,
            &self.query,
            &self.fragment,
        )
    }

    /// Joins the components into a URI string.
    ///
    /// `//` is written when the netloc is non-empty, or when the scheme is
    /// one that conventionally has an authority and the path does not
    /// already start with `//`. A relative path after a netloc gets a `/`.
    /// Empty query and fragment are omitted together with their delimiter.
    #[must_use]
    pub fn unsplit(&self) -> String {
        let mut out = String::new();
        if !self.scheme.is_empty() {
            out.push_str(&self.scheme);
            out.push(':');
        }
        let with_netloc = !self.netloc.is_empty()
            || (!self.scheme.is_empty()
                && USES_NETLOC.contains(&self.scheme.as_str())
                && !self.path.starts_with("//"));
        if with_netloc {
            out.push_str("//");
            out.push_str(&self.netloc);
            if !self.path.is_empty() && !self.path.starts_with('/') {
                out.push('/');
            }
        }
        out.push_str(&self.path);
        if !self.query.is_empty() {
            out.push('?');
            out.push_str(&self.query);
        }
        if !self.fragment.is_empty() {
            out.push('#');
            out.push_str(&self.fragment);
        }
        out
    }
}

impl fmt::Display for SplitResult {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.unsplit())
    }
}

/// Strips surrounding whitespace, `<...>` wrapping and a `URL:` prefix.
///
/// # Examples
///
/// ```
/// use uriplus::split::unwrap;
///
/// assert_eq!(unwrap("  <URL:http://example.com/> "), "http://example.com/");
/// ```
#[must_use]
pub fn unwrap(s: &str) -> &str {
    let mut s = s.trim();
    if let Some(inner) = s.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
        s = inner.trim();
    }
    if let Some(rest) = s.strip_prefix("URL:") {
        s = rest.trim();
    }
    s
}

/// Splits a URI string into its five components.
///
/// `default_scheme` is used when the string does not start with a scheme.
/// The scheme is lowercased. Leading control characters and spaces are
/// removed, as are tabs and newlines anywhere in the input.
///
/// # Errors
///
/// Fails if the netloc contains an unbalanced `[` or `]`.
///
/// # Examples
///
/// ```
/// use uriplus::split::split;
///
/// let split = split("HTTP://user@example.com:8080/a/b?q=1#frag", "")?;
/// assert_eq!(
///     split.as_tuple(),
///     ("http", "user@example.com:8080", "/a/b", "q=1", "frag")
/// );
/// # Ok::<_, uriplus::Error>(())
/// ```
pub fn split(s: &str, default_scheme: &str) -> Result<SplitResult, Error> {
    let cleaned: String = s
        .trim_start_matches(|c: char| c <= ' ')
        .chars()
        .filter(|c| !matches!(c, '\t' | '\r' | '\n'))
        .collect();
    let mut rest = cleaned.as_str();

    let mut result = SplitResult {
        scheme: default_scheme
            .trim_matches(|c: char| c <= ' ')
            .chars()
            .filter(|c| !matches!(c, '\t' | '\r' | '\n'))
            .collect(),
        ..SplitResult::default()
    };

    if let Some((scheme, after)) = find_split_hole(rest, b':') {
        let starts_with_letter = scheme
            .chars()
            .next()
            .map_or(false, |c| c.is_ascii_alphabetic());
        if starts_with_letter && scheme.chars().all(|c| SCHEME.contains(c)) {
            result.scheme = scheme.to_ascii_lowercase();
            rest = after;
        }
    }

    if let Some(after_slashes) = rest.strip_prefix("//") {
        let (netloc, after) = find_split3(after_slashes, b'/', b'?', b'#').unwrap_or((after_slashes, ""));
        if netloc.contains('[') != netloc.contains(']') {
            return Err(ErrorRepr::InvalidIpv6Netloc.into());
        }
        result.netloc = netloc.to_owned();
        rest = after;
    }

    if let Some((before, fragment)) = find_split_hole(rest, b'#') {
        result.fragment = fragment.to_owned();
        rest = before;
    }
    if let Some((before, query)) = find_split_hole(rest, b'?') {
        result.query = query.to_owned();
        rest = before;
    }
    result.path = rest.to_owned();

    Ok(result)
}
