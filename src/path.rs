//! URI path as a sequence of segments.
//!
//! Paths are normalized POSIX-style when built: repeated `/` collapse, `.`
//! segments are dropped, and an absolute path starts with a `"/"` root
//! segment. Everything else is kept as given.

use core::convert::Infallible;
use core::fmt;
use core::ops::{Div, Index, Range};
use core::slice::SliceIndex;
use core::str::FromStr;
use std::borrow::Cow;
use std::hash::{Hash, Hasher};
use std::path::Path as FsPath;

use regex::Match;

use crate::charset::{invalid_check, PATH, SEGMENT};
use crate::error::{Error, ErrorRepr};
use crate::index::{element_index, insertion_index, Slice};
use crate::pattern::Pattern;
use crate::percent_decode::unquote;
use crate::percent_encode::quote;

/// The root segment of an absolute path.
const ROOT: &str = "/";

/// Configuration carried by a [`Path`].
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathOptions {
    /// Percent-decode segments when building from strings.
    pub unquote: bool,
    /// Percent-encode segments by default when encoding.
    pub requote: bool,
    /// Characters kept unencoded when percent-encoding, in addition to `/`.
    pub quote_safe: String,
}

impl PathOptions {
    /// Sets whether segments built from strings are percent-decoded.
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

/// A single piece of input collected by [`IntoSegments`].
#[derive(Debug, Clone)]
enum Part {
    /// A path string, split on `/` when building.
    Raw(String),
    /// Segments of an existing path, taken as they are.
    Segments(Vec<String>),
}

/// Flattened input for building a path.
///
/// Only obtainable through [`IntoSegments`].
#[derive(Default, Debug, Clone)]
pub struct PathParts {
    /// Collected pieces, in order.
    parts: Vec<Part>,
}

impl PathParts {
    /// Adds a path string.
    fn push_raw(&mut self, s: impl Into<String>) {
        self.parts.push(Part::Raw(s.into()));
    }

    /// Joins the pieces into segments.
    ///
    /// An absolute piece restarts the path from its root, as POSIX path
    /// joining does.
    fn build(self, decode: bool) -> Vec<String> {
        let mut segments: Vec<String> = Vec::new();
        for part in self.parts {
            match part {
                Part::Raw(s) => {
                    if s.starts_with('/') {
                        segments.clear();
                        segments.push(ROOT.to_owned());
                    }
                    for seg in s.split('/').filter(|seg| !seg.is_empty() && *seg != ".") {
                        let seg = if decode {
                            unquote(seg).into_owned()
                        } else {
                            seg.to_owned()
                        };
                        segments.push(seg);
                    }
                }
                Part::Segments(segs) => {
                    if segs.first().map_or(false, |s| s == ROOT) {
                        segments.clear();
                    }
                    segments.extend(segs);
                }
            }
        }
        segments
    }
}

/// Values that can be turned into path segments.
///
/// Strings are split on `/`; nested collections are flattened in order.
pub trait IntoSegments {
    /// Adds `self` to the collected parts.
    fn push_parts(self, parts: &mut PathParts);
}

impl IntoSegments for &str {
    #[inline]
    fn push_parts(self, parts: &mut PathParts) {
        parts.push_raw(self);
    }
}

impl IntoSegments for &&str {
    #[inline]
    fn push_parts(self, parts: &mut PathParts) {
        parts.push_raw(*self);
    }
}

impl IntoSegments for String {
    #[inline]
    fn push_parts(self, parts: &mut PathParts) {
        parts.push_raw(self);
    }
}

impl IntoSegments for &String {
    #[inline]
    fn push_parts(self, parts: &mut PathParts) {
        parts.push_raw(self.as_str());
    }
}

impl IntoSegments for Cow<'_, str> {
    #[inline]
    fn push_parts(self, parts: &mut PathParts) {
        parts.push_raw(self);
    }
}

impl IntoSegments for &FsPath {
    #[inline]
    fn push_parts(self, parts: &mut PathParts) {
        parts.push_raw(self.to_string_lossy());
    }
}

impl IntoSegments for Path {
    #[inline]
    fn push_parts(self, parts: &mut PathParts) {
        parts.parts.push(Part::Segments(self.segments));
    }
}

impl IntoSegments for &Path {
    #[inline]
    fn push_parts(self, parts: &mut PathParts) {
        parts.parts.push(Part::Segments(self.segments.clone()));
    }
}

impl<T: IntoSegments> IntoSegments for Vec<T> {
    fn push_parts(self, parts: &mut PathParts) {
        self.into_iter().for_each(|v| v.push_parts(parts));
    }
}

impl<T: IntoSegments, const N: usize> IntoSegments for [T; N] {
    fn push_parts(self, parts: &mut PathParts) {
        self.into_iter().for_each(|v| v.push_parts(parts));
    }
}

impl<'a, T> IntoSegments for &'a [T]
where
    &'a T: IntoSegments,
{
    fn push_parts(self, parts: &mut PathParts) {
        self.iter().for_each(|v| v.push_parts(parts));
    }
}

/// Returns `true` if the segments start with the root segment.
fn is_rooted(segments: &[String]) -> bool {
    segments.first().map_or(false, |s| s == ROOT)
}

/// A URI path: an ordered sequence of segments.
///
/// # Examples
///
/// ```
/// use uriplus::Path;
///
/// let mut path = Path::from("/a/b/./c//d");
/// assert_eq!(path.segments(), ["/", "a", "b", "c", "d"]);
///
/// path.append("/e/f");
/// assert_eq!(path.to_string(), "/a/b/c/d/e/f");
///
/// let joined = &path / "g";
/// assert_eq!(joined.to_string(), "/a/b/c/d/e/f/g");
/// ```
#[derive(Default, Debug, Clone)]
pub struct Path {
    /// Segments; the first is [`ROOT`] for an absolute path.
    segments: Vec<String>,
    /// Configuration.
    options: PathOptions,
}

impl Path {
    /// Creates an empty path with default options.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a path with default options.
    #[inline]
    pub fn from_parts(parts: impl IntoSegments) -> Self {
        Self::from_parts_with(parts, PathOptions::default())
    }

    /// Builds a path from strings, paths, or collections of them.
    ///
    /// # Examples
    ///
    /// ```
    /// use uriplus::{Path, PathOptions};
    ///
    /// let path = Path::from_parts(vec![vec!["a", "b/c"], vec!["d"]]);
    /// assert_eq!(path.to_string(), "a/b/c/d");
    ///
    /// let decoded = Path::from_parts_with("a%20b/c", PathOptions::default().unquote(true));
    /// assert_eq!(decoded.segments(), ["a b", "c"]);
    /// ```
    pub fn from_parts_with(parts: impl IntoSegments, options: PathOptions) -> Self {
        let segments = Self::collect(parts, options.unquote);
        Self { segments, options }
    }

    /// Flattens and joins the input into segments.
    fn collect(value: impl IntoSegments, decode: bool) -> Vec<String> {
        let mut parts = PathParts::default();
        value.push_parts(&mut parts);
        parts.build(decode)
    }

    /// Builds a new path from the parts, keeping the options of `self`.
    #[must_use]
    pub fn copy_with(&self, parts: impl IntoSegments) -> Self {
        Self::from_parts_with(parts, self.options.clone())
    }

    /// Returns the configuration.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &PathOptions {
        &self.options
    }

    /// Returns the configuration for modification.
    #[inline]
    pub fn options_mut(&mut self) -> &mut PathOptions {
        &mut self.options
    }

    /// Returns the segments.
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns an iterator over the segments.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator + '_ {
        self.segments.iter().map(String::as_str)
    }

    /// Returns the number of segments, the root included.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if there are no segments.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns `true` if the path starts with the root segment.
    #[inline]
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        is_rooted(&self.segments)
    }

    /// Returns the segment at the index; negative indices count from the end.
    ///
    /// # Errors
    ///
    /// Fails if the index is out of range.
    pub fn get(&self, index: isize) -> Result<&str, Error> {
        Ok(self.segments[element_index(index, self.len())?].as_str())
    }

    /// Returns the selected segments.
    ///
    /// # Errors
    ///
    /// Fails if the slice is out of range or has a zero step.
    pub fn get_slice(&self, slice: &Slice) -> Result<Vec<&str>, Error> {
        Ok(slice
            .indices(self.len())?
            .into_iter()
            .map(|i| self.segments[i].as_str())
            .collect())
    }

    /// Replaces segments in the range with the given ones.
    ///
    /// A root segment is kept only when replacing from the start, and then
    /// replaces an existing root. Relative segments inserted before the
    /// root of an absolute path land after it instead.
    fn splice_segments(&mut self, mut range: Range<usize>, mut segs: Vec<String>) {
        let mut rooted = is_rooted(&segs);
        if rooted && range.start != 0 {
            segs.remove(0);
            rooted = false;
        }
        if !rooted && range == (0..0) && self.is_absolute() {
            range = 1..1;
        }
        let inserted = segs.len();
        self.segments.splice(range, segs);
        if rooted && self.segments.get(inserted).map_or(false, |s| s == ROOT) {
            self.segments.remove(inserted);
        }
    }

    /// Replaces the segment at the index with the segments of `value`.
    ///
    /// # Errors
    ///
    /// Fails if the index is out of range.
    pub fn set(&mut self, index: isize, value: impl IntoSegments) -> Result<(), Error> {
        let pos = element_index(index, self.len())?;
        let segs = Self::collect(value, self.options.unquote);
        self.splice_segments(pos..pos + 1, segs);
        Ok(())
    }

    /// Replaces the selected segments with the segments of `value`.
    ///
    /// A slice with a step other than `1` needs exactly as many new segments
    /// as it selects.
    ///
    /// # Errors
    ///
    /// Fails if the slice is out of range, or the segment counts of a
    /// stepped slice differ.
    pub fn set_slice(&mut self, slice: &Slice, value: impl IntoSegments) -> Result<(), Error> {
        let mut segs = Self::collect(value, self.options.unquote);
        if let Some(range) = slice.splice_range(self.len())? {
            self.splice_segments(range, segs);
            return Ok(());
        }
        let indices = slice.indices(self.len())?;
        if is_rooted(&segs) {
            segs.remove(0);
        }
        if indices.len() != segs.len() {
            return Err(ErrorRepr::SliceLengthMismatch {
                given: segs.len(),
                expected: indices.len(),
            }
            .into());
        }
        for (i, seg) in indices.into_iter().zip(segs) {
            self.segments[i] = seg;
        }
        Ok(())
    }

    /// Removes and returns the segment at the index.
    ///
    /// # Errors
    ///
    /// Fails if the index is out of range.
    pub fn remove_at(&mut self, index: isize) -> Result<String, Error> {
        let pos = element_index(index, self.len())?;
        Ok(self.segments.remove(pos))
    }

    /// Removes the selected segments.
    ///
    /// # Errors
    ///
    /// Fails if the slice is out of range or has a zero step.
    pub fn del_slice(&mut self, slice: &Slice) -> Result<(), Error> {
        if let Some(range) = slice.splice_range(self.len())? {
            self.segments.drain(range);
            return Ok(());
        }
        let mut indices = slice.indices(self.len())?;
        indices.sort_unstable();
        for i in indices.into_iter().rev() {
            self.segments.remove(i);
        }
        Ok(())
    }

    /// Appends the segments of `value`.
    ///
    /// The root of an absolute `value` is dropped, so appending never
    /// discards the existing segments.
    pub fn append(&mut self, value: impl IntoSegments) {
        let mut segs = Self::collect(value, self.options.unquote);
        if is_rooted(&segs) {
            segs.remove(0);
        }
        self.segments.extend(segs);
    }

    /// Appends an empty segment, rendered as a doubled `/`.
    #[cfg(test)]
    pub(crate) fn push_empty_segment(&mut self) {
        self.segments.push(String::new());
    }

    /// Inserts the segments of `value` before the index.
    ///
    /// Indices past either end clamp to that end.
    pub fn insert(&mut self, index: isize, value: impl IntoSegments) {
        let pos = insertion_index(index, self.len());
        let segs = Self::collect(value, self.options.unquote);
        self.splice_segments(pos..pos, segs);
    }

    /// Removes the first segment equal to `value`.
    ///
    /// # Errors
    ///
    /// Fails if no segment is equal to `value`.
    pub fn remove(&mut self, value: &str) -> Result<(), Error> {
        let pos = self
            .segments
            .iter()
            .position(|s| s == value)
            .ok_or(ErrorRepr::NotFound)?;
        self.segments.remove(pos);
        Ok(())
    }

    /// Counts the segments equal to `value`.
    #[must_use]
    pub fn count(&self, value: &str) -> usize {
        self.iter().filter(|s| *s == value).count()
    }

    /// Resolves optional search bounds into a clamped range.
    fn search_range(&self, start: Option<isize>, stop: Option<isize>) -> Range<usize> {
        let len = self.len();
        let start = start.map_or(0, |s| insertion_index(s, len));
        let stop = stop.map_or(len, |s| insertion_index(s, len));
        start..stop.max(start)
    }

    /// Returns the position of the first segment equal to `value` within `start..stop`.
    ///
    /// # Errors
    ///
    /// Fails if there is no such segment.
    pub fn index(&self, value: &str, start: Option<isize>, stop: Option<isize>) -> Result<usize, Error> {
        self.search_range(start, stop)
            .find(|&i| self.segments[i] == value)
            .ok_or_else(|| ErrorRepr::NotFound.into())
    }

    /// Returns the position of the last segment equal to `value` within `start..stop`.
    ///
    /// # Errors
    ///
    /// Fails if there is no such segment.
    pub fn rindex(&self, value: &str, start: Option<isize>, stop: Option<isize>) -> Result<usize, Error> {
        self.search_range(start, stop)
            .rev()
            .find(|&i| self.segments[i] == value)
            .ok_or_else(|| ErrorRepr::NotFound.into())
    }

    /// Returns `true` if every segment of `value` is present.
    pub fn contains(&self, value: impl IntoSegments) -> bool {
        Self::collect(value, self.options.unquote)
            .iter()
            .all(|seg| self.segments.contains(seg))
    }

    /// Returns the segment following `value`.
    ///
    /// The first occurrence of `value` is used, or the last one with `last`.
    #[must_use]
    pub fn seg_after(&self, value: &str, last: bool) -> Option<&str> {
        let pos = self.find(value, last)?;
        self.segments.get(pos + 1).map(String::as_str)
    }

    /// Returns the segment preceding `value`.
    ///
    /// The first occurrence of `value` is used, or the last one with `last`.
    #[must_use]
    pub fn seg_before(&self, value: &str, last: bool) -> Option<&str> {
        let pos = self.find(value, last)?;
        pos.checked_sub(1)
            .and_then(|p| self.segments.get(p))
            .map(String::as_str)
    }

    /// Finds the first or last occurrence of the segment.
    fn find(&self, value: &str, last: bool) -> Option<usize> {
        if last {
            self.segments.iter().rposition(|s| s == value)
        } else {
            self.segments.iter().position(|s| s == value)
        }
    }

    /// Searches every segment with the pattern.
    ///
    /// Returns the match of each segment that matched, or of every segment
    /// (`None` where nothing matched) with `include_all`.
    ///
    /// # Errors
    ///
    /// Fails if a string pattern does not compile.
    pub fn seg_search<P: Pattern>(
        &self,
        pattern: P,
        include_all: bool,
    ) -> Result<Vec<Option<Match<'_>>>, Error> {
        let re = pattern.to_regex()?;
        Ok(self
            .iter()
            .map(|seg| re.find(seg))
            .filter(|m| include_all || m.is_some())
            .collect())
    }

    /// Renders the path, percent-encoding segments if requested.
    ///
    /// `quote` and `quote_safe` default to the instance options when `None`.
    /// `/` is always safe, and the root is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use uriplus::Path;
    ///
    /// let path = Path::from("/a b/c~d");
    /// assert_eq!(path.encode(None, None), "/a b/c~d");
    /// assert_eq!(path.encode(Some(true), None), "/a%20b/c~d");
    /// assert_eq!(path.encode(Some(true), Some(" ")), "/a b/c~d");
    /// ```
    #[must_use]
    pub fn encode(&self, quote: Option<bool>, quote_safe: Option<&str>) -> String {
        let do_quote = quote.unwrap_or(self.options.requote);
        let safe = format!("{}/", quote_safe.unwrap_or(&self.options.quote_safe));
        let (root, rest) = match self.segments.split_first() {
            Some((first, rest)) if first == ROOT => (ROOT, rest),
            _ => ("", self.segments.as_slice()),
        };
        let rest: Vec<Cow<'_, str>> = rest
            .iter()
            .map(|seg| {
                if do_quote {
                    Cow::Owned(self::quote(seg, &safe))
                } else {
                    Cow::Borrowed(seg.as_str())
                }
            })
            .collect();
        format!("{}{}", root, rest.join("/"))
    }

    /// Returns `true` if the path only uses characters allowed in a path.
    ///
    /// With `encoded`, the percent-encoded form is checked; otherwise every
    /// raw segment is checked against the segment character set. The root
    /// segment `/` is not a segment character, so the raw check fails for
    /// every absolute path.
    #[must_use]
    pub fn validate(&self, encoded: bool) -> bool {
        if encoded {
            !invalid_check(PATH, [self.encode(Some(true), None)])
        } else {
            !invalid_check(SEGMENT, &self.segments)
        }
    }
}

impl PartialEq for Path {
    /// Compares the segments only.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments
    }
}

impl Eq for Path {}

impl Hash for Path {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.segments.hash(state);
    }
}

impl fmt::Display for Path {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode(None, None))
    }
}

impl FromStr for Path {
    type Err = Infallible;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_parts(s))
    }
}

impl From<&str> for Path {
    #[inline]
    fn from(s: &str) -> Self {
        Self::from_parts(s)
    }
}

impl From<String> for Path {
    #[inline]
    fn from(s: String) -> Self {
        Self::from_parts(s)
    }
}

impl<I: SliceIndex<[String]>> Index<I> for Path {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        &self.segments[index]
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a String;
    type IntoIter = core::slice::Iter<'a, String>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl IntoIterator for Path {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

impl<T: IntoSegments> Div<T> for &Path {
    type Output = Path;

    fn div(self, rhs: T) -> Path {
        let mut path = self.clone();
        path.append(rhs);
        path
    }
}

impl<T: IntoSegments> Div<T> for Path {
    type Output = Path;

    #[inline]
    fn div(mut self, rhs: T) -> Path {
        self.append(rhs);
        self
    }
}

impl_serde! {
    expecting: "a URI path string",
    ty: Path,
}
