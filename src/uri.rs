//! URI value type.
//!
//! A [`Uri`] owns its components: scheme, user info, host and port as plain
//! values, and the path, query and fragment as [`Path`] and [`Query`]
//! values that can be edited in place.

use core::fmt;
use core::ops::{Div, Range};
use core::str::FromStr;

use crate::charset::{invalid_check, FRAGMENT, HOST, PATH, QUERY, SCHEME, USERINFO};
use crate::error::{Error, ErrorRepr};
use crate::path::{IntoSegments, Path, PathOptions};
use crate::pattern::Pattern;
use crate::percent_decode::unquote;
use crate::percent_encode::quote;
use crate::query::{Query, QueryOptions};
use crate::split::{split, unwrap, SplitResult};

/// Configuration carried by a [`Uri`].
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct UriOptions {
    /// Scheme used when the parsed string has none.
    pub default_scheme: String,
    /// Percent-decode components when parsing.
    pub unquote: bool,
    /// Percent-encode by default when encoding.
    pub requote: bool,
    /// Characters kept unencoded when percent-encoding.
    pub quote_safe: String,
}

impl UriOptions {
    /// Sets the scheme used when the parsed string has none.
    #[must_use]
    pub fn default_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.default_scheme = scheme.into();
        self
    }

    /// Sets whether components are percent-decoded when parsing.
    #[must_use]
    pub fn unquote(mut self, unquote: bool) -> Self {
        self.unquote = unquote;
        self
    }

    /// Sets whether encoding percent-encodes by default.
    #[must_use]
    pub fn requote(mut self, requote: bool) -> Self {
        self.requote = requote;
        self
    }

    /// Sets the characters kept unencoded.
    #[must_use]
    pub fn quote_safe(mut self, quote_safe: impl Into<String>) -> Self {
        self.quote_safe = quote_safe.into();
        self
    }
}

/// A match found by [`Uri::search`].
///
/// Owns the encoded string that was searched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    /// The searched string.
    haystack: String,
    /// Byte range of the match.
    range: Range<usize>,
}

impl SearchMatch {
    /// Returns the matched text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.haystack[self.range.clone()]
    }

    /// Returns the byte offset of the start of the match.
    #[inline]
    #[must_use]
    pub fn start(&self) -> usize {
        self.range.start
    }

    /// Returns the byte offset of the end of the match.
    #[inline]
    #[must_use]
    pub fn end(&self) -> usize {
        self.range.end
    }

    /// Returns the byte range of the match.
    #[inline]
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Returns the whole searched string.
    #[inline]
    #[must_use]
    pub fn haystack(&self) -> &str {
        &self.haystack
    }
}

/// A URI split into editable components.
///
/// # Examples
///
/// ```
/// use uriplus::Uri;
///
/// let mut uri = Uri::parse("http://www.example.com/index.html")?;
/// assert_eq!(uri.scheme, "http");
/// assert_eq!(uri.host, "www.example.com");
/// assert_eq!(uri.to_string(), "http://www.example.com/index.html");
///
/// uri.set_authority("user:pw@example.org:8080")?;
/// uri.path_append("docs");
/// uri.query_mut().append("lang=en")?;
/// assert_eq!(uri.to_string(), "http://user:pw@example.org:8080/index.html/docs?lang=en");
/// # Ok::<_, uriplus::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Uri {
    /// Scheme, without the trailing `:`.
    pub scheme: String,
    /// User information, without the trailing `@`.
    pub user_info: String,
    /// Host.
    pub host: String,
    /// Port; `Some(0)` is kept but not rendered.
    pub port: Option<u16>,
    /// Path, relative to the authority.
    pub path: Option<Path>,
    /// Query.
    pub query: Option<Query>,
    /// Fragment, handled as a query.
    pub fragment: Option<Query>,
    /// Configuration.
    options: UriOptions,
}

/// Returns `true` for a non-empty string of ASCII digits.
fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

impl Uri {
    /// Parses a URI string with default options.
    ///
    /// # Errors
    ///
    /// Fails if the authority has unbalanced brackets or a port above
    /// 65535, or the query or fragment does not follow the form grammar.
    #[inline]
    pub fn parse(s: &str) -> Result<Self, Error> {
        Self::parse_with(s, UriOptions::default())
    }

    /// Parses a URI string.
    ///
    /// The string is trimmed and unwrapped from `<URL:...>` before being
    /// split. The leading `/` of the path is not stored in the [`Path`].
    ///
    /// # Errors
    ///
    /// Fails if the authority has unbalanced brackets or a port above
    /// 65535, or the query or fragment does not follow the form grammar.
    pub fn parse_with(s: &str, options: UriOptions) -> Result<Self, Error> {
        let parsed = split(unwrap(s), &options.default_scheme)?;
        Self::from_split(parsed, options)
    }

    /// Builds a URI from split components.
    ///
    /// # Errors
    ///
    /// Fails if the query or fragment does not follow the form grammar, or
    /// if the port is out of range.
    pub fn from_split(parsed: SplitResult, options: UriOptions) -> Result<Self, Error> {
        let decode = options.unquote;
        let scheme = if decode {
            unquote(&parsed.scheme).into_owned()
        } else {
            parsed.scheme
        };
        let path = Path::from_parts_with(
            parsed.path.trim_start_matches('/'),
            PathOptions::default().unquote(decode),
        );
        let query = Query::parse_with(&parsed.query, QueryOptions::default().unquote(decode))?;
        let fragment =
            Query::parse_with(&parsed.fragment, QueryOptions::default().unquote(decode))?;

        let mut uri = Self {
            scheme,
            user_info: String::new(),
            host: String::new(),
            port: None,
            path: Some(path),
            query: Some(query),
            fragment: Some(fragment),
            options,
        };
        if decode {
            uri.set_authority(&unquote(&parsed.netloc))?;
        } else {
            uri.set_authority(&parsed.netloc)?;
        }
        Ok(uri)
    }

    /// Builds a URI from 1 to 5 positional split fields.
    ///
    /// # Errors
    ///
    /// Fails for 0 or more than 5 fields, or if the query or fragment does
    /// not follow the form grammar.
    pub fn from_fields<S: AsRef<str>>(fields: &[S], options: UriOptions) -> Result<Self, Error> {
        Self::from_split(SplitResult::from_fields(fields)?, options)
    }

    /// Parses the encoded form of another URI.
    ///
    /// # Errors
    ///
    /// Fails if the encoded form does not parse back.
    pub fn from_uri(other: &Uri, options: UriOptions) -> Result<Self, Error> {
        Self::parse_with(&other.to_string(), options)
    }

    /// Returns the configuration.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &UriOptions {
        &self.options
    }

    /// Returns the configuration for modification.
    #[inline]
    pub fn options_mut(&mut self) -> &mut UriOptions {
        &mut self.options
    }

    /// Returns the query, creating an empty one if there is none.
    pub fn query_mut(&mut self) -> &mut Query {
        self.query.get_or_insert_with(Query::new)
    }

    /// Returns the path, creating an empty one if there is none.
    pub fn path_mut(&mut self) -> &mut Path {
        self.path.get_or_insert_with(Path::new)
    }

    /// Returns the fragment, creating an empty one if there is none.
    pub fn fragment_mut(&mut self) -> &mut Query {
        self.fragment.get_or_insert_with(Query::new)
    }

    /// Returns the authority: `user_info@host:port`.
    ///
    /// The user info and `@` are omitted if the user info is empty, and the
    /// port if it is absent or zero.
    #[must_use]
    pub fn authority(&self) -> String {
        let mut authority = String::new();
        if !self.user_info.is_empty() {
            authority.push_str(&self.user_info);
            authority.push('@');
        }
        authority.push_str(&self.host);
        if let Some(port) = self.port.filter(|&p| p > 0) {
            authority.push(':');
            authority.push_str(&port.to_string());
        }
        authority
    }

    /// Sets the user info, host and port from an authority string.
    ///
    /// The user info ends at the first `@`. The port follows the last `:`;
    /// text after it that is not a number stays part of the host, so IPv6
    /// literals are kept whole. A negative port is dropped.
    ///
    /// # Errors
    ///
    /// Fails if the port is a number above 65535. Nothing is changed then.
    ///
    /// # Examples
    ///
    /// ```
    /// use uriplus::{ErrorKind, Uri};
    ///
    /// let mut uri = Uri::parse("http://example.com")?;
    /// uri.set_authority("[::1]:8080")?;
    /// assert_eq!((uri.host.as_str(), uri.port), ("[::1]", Some(8080)));
    /// uri.set_authority("[::1]")?;
    /// assert_eq!((uri.host.as_str(), uri.port), ("[::1]", None));
    /// assert_eq!(uri.set_authority("h:70000").unwrap_err().kind(), ErrorKind::InvalidPort);
    /// # Ok::<_, uriplus::Error>(())
    /// ```
    pub fn set_authority(&mut self, authority: &str) -> Result<(), Error> {
        let (user_info, host_port) = authority.split_once('@').unwrap_or(("", authority));
        let (host, port) = match host_port.rsplit_once(':') {
            Some((host, "")) => (host, None),
            Some((host, port)) if is_digits(port) => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| ErrorRepr::InvalidPort(port.to_owned()))?;
                (host, Some(port))
            }
            Some((host, port)) if port.strip_prefix('-').map_or(false, is_digits) => (host, None),
            _ => (host_port, None),
        };
        self.user_info = user_info.to_owned();
        self.host = host.to_owned();
        self.port = port;
        Ok(())
    }

    /// Returns the user name: the user info up to its first `:`.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        if self.user_info.is_empty() {
            return None;
        }
        Some(
            self.user_info
                .split_once(':')
                .map_or(self.user_info.as_str(), |(user, _)| user),
        )
    }

    /// Returns the password: the user info after its first `:`.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.user_info.split_once(':').map(|(_, password)| password)
    }

    /// Sets or removes the user name, keeping the password.
    pub fn set_username(&mut self, username: Option<&str>) {
        let password = self.password().map(|p| format!(":{}", p));
        self.user_info = format!(
            "{}{}",
            username.unwrap_or(""),
            password.as_deref().unwrap_or("")
        );
    }

    /// Sets or removes the password, keeping the user name.
    pub fn set_password(&mut self, password: Option<&str>) {
        let username = self.username().unwrap_or("").to_owned();
        self.user_info = match password {
            Some(password) => format!("{}:{}", username, password),
            None => username,
        };
    }

    /// Returns the components `(scheme, authority, path, query, fragment)`.
    ///
    /// `quote` and `quote_safe` default to the instance options when `None`
    /// and are applied to every component.
    #[must_use]
    pub fn tupled(
        &self,
        quote: Option<bool>,
        quote_safe: Option<&str>,
    ) -> (String, String, String, String, String) {
        let do_quote = quote.unwrap_or(self.options.requote);
        let safe = quote_safe.unwrap_or(&self.options.quote_safe);
        let plain_or_quoted = |s: String| {
            if do_quote {
                self::quote(&s, safe)
            } else {
                s
            }
        };
        (
            plain_or_quoted(self.scheme.clone()),
            plain_or_quoted(self.authority()),
            self.path
                .as_ref()
                .map_or_else(String::new, |p| p.encode(Some(do_quote), Some(safe))),
            self.query
                .as_ref()
                .map_or_else(String::new, |q| q.encode(Some(do_quote), Some(safe), None)),
            self.fragment
                .as_ref()
                .map_or_else(String::new, |f| f.encode(Some(do_quote), Some(safe), None)),
        )
    }

    /// Returns the components as a [`SplitResult`].
    #[must_use]
    pub fn splitted(&self, quote: Option<bool>, quote_safe: Option<&str>) -> SplitResult {
        let (scheme, netloc, path, query, fragment) = self.tupled(quote, quote_safe);
        SplitResult {
            scheme,
            netloc,
            path,
            query,
            fragment,
        }
    }

    /// Applies the final whole-string pass: quote, or unquote.
    fn finish(&self, joined: String, quote: Option<bool>, quote_safe: Option<&str>) -> String {
        if quote.unwrap_or(self.options.requote) {
            self::quote(&joined, quote_safe.unwrap_or(&self.options.quote_safe))
        } else {
            unquote(&joined).into_owned()
        }
    }

    /// Encodes the URI as a string.
    ///
    /// Components are rendered with the instance options, joined, and the
    /// joined string is then quoted or unquoted according to `quote`. With
    /// `requote` set and `quote` not `Some(false)`, components are therefore
    /// quoted twice.
    ///
    /// # Examples
    ///
    /// ```
    /// use uriplus::{Uri, UriOptions};
    ///
    /// let uri = Uri::parse("http://h/a b")?;
    /// assert_eq!(uri.encode(None, None), "http://h/a b");
    /// assert_eq!(uri.encode(Some(true), Some(":/")), "http://h/a%20b");
    ///
    /// let requoting = Uri::parse_with("http://h/a b", UriOptions::default().requote(true))?;
    /// assert_eq!(requoting.encode(None, Some(":/")), "http://h/a%2520b");
    /// # Ok::<_, uriplus::Error>(())
    /// ```
    #[must_use]
    pub fn encode(&self, quote: Option<bool>, quote_safe: Option<&str>) -> String {
        let joined = self.splitted(None, None).unsplit();
        self.finish(joined, quote, quote_safe)
    }

    /// Encodes the scheme, authority and path only.
    #[must_use]
    pub fn stripped(&self, quote: Option<bool>, quote_safe: Option<&str>) -> String {
        let (scheme, netloc, path, _, _) = self.tupled(quote, quote_safe);
        let joined = SplitResult::new(scheme, netloc, path, "", "").unsplit();
        self.finish(joined, quote, quote_safe)
    }

    /// Encodes the scheme and authority only.
    #[must_use]
    pub fn root(&self, quote: Option<bool>, quote_safe: Option<&str>) -> String {
        let (scheme, netloc, _, _, _) = self.tupled(quote, quote_safe);
        let joined = SplitResult::new(scheme, netloc, "", "", "").unsplit();
        self.finish(joined, quote, quote_safe)
    }

    /// Returns `true` if every component only uses allowed characters.
    ///
    /// The host is checked against the path and query character sets as
    /// well, which rejects bracketed IP literals. A URI without a path is
    /// invalid, and so is one without authority whose path starts with an
    /// empty segment.
    #[must_use]
    pub fn validate(&self) -> bool {
        if invalid_check(SCHEME, [&self.scheme])
            || invalid_check(USERINFO, [&self.user_info])
            || invalid_check(HOST, [&self.host])
        {
            return false;
        }

        let path = match &self.path {
            Some(path) => path,
            None => return false,
        };
        if !path.validate(false) || invalid_check(PATH, [&self.host]) {
            return false;
        }

        match &self.query {
            Some(query) if !query.validate(false) => return false,
            _ => {
                if invalid_check(QUERY, [&self.host]) {
                    return false;
                }
            }
        }

        let fragment = self
            .fragment
            .as_ref()
            .map_or_else(String::new, Query::to_string);
        if invalid_check(FRAGMENT, [fragment]) {
            return false;
        }

        !(self.authority().is_empty() && path.segments().first().map_or(false, String::is_empty))
    }

    /// Returns `true` if the scheme is empty, or there is no path or an empty one.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scheme.is_empty() || self.path.as_ref().map_or(true, Path::is_empty)
    }

    /// Returns the length of the encoded form.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.to_string().len()
    }

    /// Returns `true` if the encoded form contains `needle`.
    #[inline]
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.to_string().contains(needle)
    }

    /// Returns an iterator over the five components rendered with the instance options.
    pub fn iter(&self) -> core::array::IntoIter<String, 5> {
        let (scheme, netloc, path, query, fragment) = self.tupled(None, None);
        [scheme, netloc, path, query, fragment].into_iter()
    }

    /// Searches the encoded form with the pattern.
    ///
    /// # Errors
    ///
    /// Fails if a string pattern does not compile.
    pub fn search<P: Pattern>(
        &self,
        pattern: P,
        quote: Option<bool>,
        quote_safe: Option<&str>,
    ) -> Result<Option<SearchMatch>, Error> {
        let re = pattern.to_regex()?;
        let haystack = self.encode(quote, quote_safe);
        let range = re.find(&haystack).map(|m| m.range());
        Ok(range.map(|range| SearchMatch { haystack, range }))
    }

    /// Appends to the path, creating it if there is none.
    pub fn path_append(&mut self, parts: impl IntoSegments) {
        self.path_mut().append(parts);
    }

    /// Returns a copy with an empty part and then `parts` appended.
    ///
    /// Empty parts vanish when a path is built, so the result equals that of
    /// the `/` operator and keeps a single `/` between the path and the parts.
    #[must_use]
    pub fn join_separated(&self, parts: impl IntoSegments) -> Self {
        let mut uri = self.clone();
        let path = uri.path_mut();
        path.append("");
        path.append(parts);
        uri
    }
}

impl PartialEq for Uri {
    /// Compares the components only.
    fn eq(&self, other: &Self) -> bool {
        self.scheme == other.scheme
            && self.user_info == other.user_info
            && self.host == other.host
            && self.port == other.port
            && self.path == other.path
            && self.query == other.query
            && self.fragment == other.fragment
    }
}

impl Eq for Uri {}

impl fmt::Display for Uri {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode(None, None))
    }
}

impl FromStr for Uri {
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Uri {
    type Error = Error;

    #[inline]
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<SplitResult> for Uri {
    type Error = Error;

    #[inline]
    fn try_from(parsed: SplitResult) -> Result<Self, Self::Error> {
        Self::from_split(parsed, UriOptions::default())
    }
}

impl<T: IntoSegments> Div<T> for &Uri {
    type Output = Uri;

    fn div(self, rhs: T) -> Uri {
        let mut uri = self.clone();
        uri.path_append(rhs);
        uri
    }
}

impl<T: IntoSegments> Div<T> for Uri {
    type Output = Uri;

    #[inline]
    fn div(mut self, rhs: T) -> Uri {
        self.path_append(rhs);
        self
    }
}

impl_serde! {
    expecting: "a URI string",
    ty: Uri,
}
