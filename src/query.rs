//! URI query as an ordered list of key-value pairs.
//!
//! A [`Query`] is not a map: keys may repeat, and the order of the entries is
//! preserved through parsing, mutation and encoding.

use core::fmt;
use core::ops::{Shl, Shr};
use core::str::FromStr;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{Hash, Hasher};

use regex::Match;

use crate::charset::{invalid_check, QUERY};
use crate::error::{Error, ErrorRepr};
use crate::index::{element_index, insertion_index};
use crate::parser::form::{encode_pairs, parse_pairs};
use crate::pattern::Pattern;
use crate::percent_decode::unquote;
use crate::percent_encode::quote;

/// A key-value pair of a query.
pub type Pair = (String, String);

/// Case conversion applied to keys and values when encoding.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForceCase {
    /// Uppercase everything.
    Upper,
    /// Lowercase everything.
    Lower,
    /// Keep the case as is.
    #[default]
    Preserve,
}

impl ForceCase {
    /// Applies the conversion.
    fn apply(self, s: String) -> String {
        match self {
            Self::Upper => s.to_uppercase(),
            Self::Lower => s.to_lowercase(),
            Self::Preserve => s,
        }
    }
}

impl FromStr for ForceCase {
    type Err = Error;

    /// Parses `"upper"`, `"lower"` or `"preserve"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upper" => Ok(Self::Upper),
            "lower" => Ok(Self::Lower),
            "preserve" => Ok(Self::Preserve),
            _ => Err(ErrorRepr::InvalidForceCase(s.to_owned()).into()),
        }
    }
}

/// Configuration carried by a [`Query`].
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryOptions {
    /// Percent-decode keys and values (a second time) when parsing strings.
    pub unquote: bool,
    /// Percent-encode keys and values by default when encoding.
    pub requote: bool,
    /// Default case conversion when encoding.
    pub force_case: ForceCase,
    /// Characters kept unencoded when percent-encoding.
    pub quote_safe: String,
}

impl QueryOptions {
    /// Sets whether parsed keys and values are percent-decoded.
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

    /// Sets the default case conversion.
    #[must_use]
    pub fn force_case(mut self, force_case: ForceCase) -> Self {
        self.force_case = force_case;
        self
    }

    /// Sets the characters kept unencoded.
    #[must_use]
    pub fn quote_safe(mut self, quote_safe: impl Into<String>) -> Self {
        self.quote_safe = quote_safe.into();
        self
    }
}

/// Values usable as the value of a query pair.
///
/// `None` is a key without value, the same as an empty value.
pub trait IntoValue {
    /// Converts `self` into the value string.
    fn into_value(self) -> String;
}

impl IntoValue for &str {
    #[inline]
    fn into_value(self) -> String {
        self.to_owned()
    }
}

impl IntoValue for String {
    #[inline]
    fn into_value(self) -> String {
        self
    }
}

impl IntoValue for &String {
    #[inline]
    fn into_value(self) -> String {
        self.clone()
    }
}

impl IntoValue for Cow<'_, str> {
    #[inline]
    fn into_value(self) -> String {
        self.into_owned()
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    #[inline]
    fn into_value(self) -> String {
        self.map_or_else(String::new, IntoValue::into_value)
    }
}

/// Values that can be turned into any number of query pairs.
///
/// Strings are parsed the same way [`Query::parse_with`] parses them.
pub trait IntoPairs {
    /// Converts `self` into pairs, decoding parsed strings if `unquote` is set.
    ///
    /// # Errors
    ///
    /// Fails if a string does not follow the form grammar.
    fn into_pairs(self, unquote: bool) -> Result<Vec<Pair>, Error>;
}

impl IntoPairs for &str {
    fn into_pairs(self, unquote: bool) -> Result<Vec<Pair>, Error> {
        parse_query_str(self, unquote)
    }
}

impl IntoPairs for String {
    #[inline]
    fn into_pairs(self, unquote: bool) -> Result<Vec<Pair>, Error> {
        self.as_str().into_pairs(unquote)
    }
}

impl IntoPairs for &String {
    #[inline]
    fn into_pairs(self, unquote: bool) -> Result<Vec<Pair>, Error> {
        self.as_str().into_pairs(unquote)
    }
}

impl<K: Into<String>, V: IntoValue> IntoPairs for (K, V) {
    #[inline]
    fn into_pairs(self, _unquote: bool) -> Result<Vec<Pair>, Error> {
        Ok(vec![(self.0.into(), self.1.into_value())])
    }
}

impl<K: Into<String>, V: IntoValue> IntoPairs for Vec<(K, V)> {
    fn into_pairs(self, _unquote: bool) -> Result<Vec<Pair>, Error> {
        Ok(self.into_iter().map(|(k, v)| (k.into(), v.into_value())).collect())
    }
}

impl<K: Into<String>, V: IntoValue, const N: usize> IntoPairs for [(K, V); N] {
    fn into_pairs(self, _unquote: bool) -> Result<Vec<Pair>, Error> {
        Ok(self.into_iter().map(|(k, v)| (k.into(), v.into_value())).collect())
    }
}

impl IntoPairs for &Query {
    #[inline]
    fn into_pairs(self, _unquote: bool) -> Result<Vec<Pair>, Error> {
        Ok(self.pairs.clone())
    }
}

impl IntoPairs for Query {
    #[inline]
    fn into_pairs(self, _unquote: bool) -> Result<Vec<Pair>, Error> {
        Ok(self.pairs)
    }
}

/// Values that can be turned into exactly one query pair.
pub trait IntoPair {
    /// Converts `self` into a single pair.
    ///
    /// # Errors
    ///
    /// Fails if a string does not parse to exactly one pair.
    fn into_pair(self, unquote: bool) -> Result<Pair, Error>;
}

impl IntoPair for &str {
    fn into_pair(self, unquote: bool) -> Result<Pair, Error> {
        let mut pairs = parse_query_str(self, unquote)?;
        match pairs.pop() {
            Some(pair) if pairs.is_empty() => Ok(pair),
            _ => Err(Error::single_pair_required(self)),
        }
    }
}

impl IntoPair for &String {
    #[inline]
    fn into_pair(self, unquote: bool) -> Result<Pair, Error> {
        self.as_str().into_pair(unquote)
    }
}

impl<K: Into<String>, V: IntoValue> IntoPair for (K, V) {
    #[inline]
    fn into_pair(self, _unquote: bool) -> Result<Pair, Error> {
        Ok((self.0.into(), self.1.into_value()))
    }
}

/// Parses a raw query string.
///
/// Whitespace and a leading `?` are stripped; a string without any `=` is a
/// single key with an empty value.
fn parse_query_str(s: &str, decode: bool) -> Result<Vec<Pair>, Error> {
    let s = s.trim();
    let s = s.strip_prefix('?').unwrap_or(s).trim_start();
    if s.is_empty() {
        return Ok(Vec::new());
    }
    let pairs = if s.contains('=') {
        parse_pairs(s)?
    } else {
        parse_pairs(&format!("{}=", s))?
    };
    if !decode {
        return Ok(pairs);
    }
    Ok(pairs
        .into_iter()
        .map(|(k, v)| (unquote(&k).into_owned(), unquote(&v).into_owned()))
        .collect())
}

/// Returns `true` if the filter list is empty or contains the value.
fn filter_allows<S: AsRef<str>>(filter: &[S], value: &str) -> bool {
    filter.is_empty() || filter.iter().any(|f| f.as_ref() == value)
}

/// An ordered sequence of key-value pairs, keys allowed to repeat.
///
/// # Examples
///
/// ```
/// use uriplus::Query;
///
/// let mut query = Query::parse("a=1&b=2&a=3")?;
/// assert_eq!(query.get_values("a"), ["1", "3"]);
///
/// query.set_values("a", &["x"])?;
/// query.append("c=4")?;
/// assert_eq!(query.to_string(), "a=x&b=2&a=x&c=4");
/// # Ok::<_, uriplus::Error>(())
/// ```
#[derive(Default, Debug, Clone)]
pub struct Query {
    /// Entries in order.
    pairs: Vec<Pair>,
    /// Configuration.
    options: QueryOptions,
}

impl Query {
    /// Creates an empty query with default options.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a query string with default options.
    ///
    /// # Errors
    ///
    /// Fails if a field has no `=` (unless the whole string has none), or is empty.
    #[inline]
    pub fn parse(s: &str) -> Result<Self, Error> {
        Self::parse_with(s, QueryOptions::default())
    }

    /// Parses a query string.
    ///
    /// Surrounding whitespace and a leading `?` are ignored. A string with
    /// no `=` at all is one key with an empty value. Keys and values have
    /// `+` turned into spaces and are percent-decoded; with
    /// [`QueryOptions::unquote`] they are decoded once more.
    ///
    /// # Errors
    ///
    /// Fails if a field has no `=` (unless the whole string has none), or is empty.
    pub fn parse_with(s: &str, options: QueryOptions) -> Result<Self, Error> {
        let pairs = parse_query_str(s, options.unquote)?;
        Ok(Self { pairs, options })
    }

    /// Creates a query from pairs.
    pub fn from_pairs<I, K, V>(pairs: I, options: QueryOptions) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoValue,
    {
        Self {
            pairs: pairs.into_iter().map(|(k, v)| (k.into(), v.into_value())).collect(),
            options,
        }
    }

    /// Returns the configuration.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// Returns the configuration for modification.
    #[inline]
    pub fn options_mut(&mut self) -> &mut QueryOptions {
        &mut self.options
    }

    /// Returns the entries.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Pair] {
        &self.pairs
    }

    /// Returns an iterator over the entries as string slices.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, &str)> + ExactSizeIterator + '_ {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if there are no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the entry at the index; negative indices count from the end.
    ///
    /// # Errors
    ///
    /// Fails if the index is out of range.
    pub fn get(&self, index: isize) -> Result<(&str, &str), Error> {
        let (k, v) = &self.pairs[element_index(index, self.len())?];
        Ok((k.as_str(), v.as_str()))
    }

    /// Replaces the entry at the index.
    ///
    /// # Errors
    ///
    /// Fails if the index is out of range, or a string item is not exactly one pair.
    pub fn set(&mut self, index: isize, item: impl IntoPair) -> Result<(), Error> {
        let pos = element_index(index, self.len())?;
        let pair = item.into_pair(self.options.unquote)?;
        self.pairs[pos] = pair;
        Ok(())
    }

    /// Removes and returns the entry at the index.
    ///
    /// # Errors
    ///
    /// Fails if the index is out of range.
    pub fn remove_at(&mut self, index: isize) -> Result<Pair, Error> {
        let pos = element_index(index, self.len())?;
        Ok(self.pairs.remove(pos))
    }

    /// Removes and returns the last entry.
    #[inline]
    pub fn pop(&mut self) -> Option<Pair> {
        self.pairs.pop()
    }

    /// Removes every entry.
    #[inline]
    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    /// Appends a string, a pair, a list of pairs or another query.
    ///
    /// Strings may hold any number of pairs; all of them are appended in order.
    ///
    /// # Errors
    ///
    /// Fails if a string does not follow the form grammar. Nothing is appended then.
    pub fn append(&mut self, item: impl IntoPairs) -> Result<(), Error> {
        let pairs = item.into_pairs(self.options.unquote)?;
        self.pairs.extend(pairs);
        Ok(())
    }

    /// Returns a copy with the item appended.
    ///
    /// # Errors
    ///
    /// Fails if a string does not follow the form grammar.
    pub fn with_appended(&self, item: impl IntoPairs) -> Result<Self, Error> {
        let mut copy = self.clone();
        copy.append(item)?;
        Ok(copy)
    }

    /// Inserts a single pair before the index.
    ///
    /// Indices past either end clamp to that end.
    ///
    /// # Errors
    ///
    /// Fails if a string item is not exactly one pair.
    pub fn insert(&mut self, index: isize, item: impl IntoPair) -> Result<(), Error> {
        let pair = item.into_pair(self.options.unquote)?;
        let pos = insertion_index(index, self.len());
        self.pairs.insert(pos, pair);
        Ok(())
    }

    /// Removes the first entry equal to the pair.
    ///
    /// # Errors
    ///
    /// Fails if a string item is not exactly one pair, or no entry matches.
    pub fn remove(&mut self, item: impl IntoPair) -> Result<(), Error> {
        let pair = item.into_pair(self.options.unquote)?;
        let pos = self
            .pairs
            .iter()
            .position(|p| *p == pair)
            .ok_or(ErrorRepr::NotFound)?;
        self.pairs.remove(pos);
        Ok(())
    }

    /// Counts the entries equal to the pair.
    ///
    /// # Errors
    ///
    /// Fails if a string item is not exactly one pair.
    pub fn count(&self, item: impl IntoPair) -> Result<usize, Error> {
        let pair = item.into_pair(self.options.unquote)?;
        Ok(self.pairs.iter().filter(|p| **p == pair).count())
    }

    /// Returns the position of the first entry equal to the pair within `start..stop`.
    ///
    /// Bounds may be negative; they are clamped to the sequence.
    ///
    /// # Errors
    ///
    /// Fails if a string item is not exactly one pair, or no entry matches.
    pub fn index(
        &self,
        item: impl IntoPair,
        start: Option<isize>,
        stop: Option<isize>,
    ) -> Result<usize, Error> {
        let pair = item.into_pair(self.options.unquote)?;
        let len = self.len();
        let start = start.map_or(0, |s| insertion_index(s, len));
        let stop = stop.map_or(len, |s| insertion_index(s, len));
        (start..stop.max(start))
            .find(|&i| self.pairs[i] == pair)
            .ok_or_else(|| ErrorRepr::NotFound.into())
    }

    /// Returns the keys, or only the keys of entries whose value is listed.
    pub fn query_keys<S: AsRef<str>>(&self, values: &[S]) -> Vec<&str> {
        self.iter()
            .filter(|(_, v)| filter_allows(values, v))
            .map(|(k, _)| k)
            .collect()
    }

    /// Returns the values, or only the values of entries whose key is listed.
    pub fn query_values<S: AsRef<str>>(&self, keys: &[S]) -> Vec<&str> {
        self.iter()
            .filter(|(k, _)| filter_allows(keys, k))
            .map(|(_, v)| v)
            .collect()
    }

    /// Returns the entries, or only the entries equal to one of the listed pairs.
    pub fn items<K: AsRef<str>, V: AsRef<str>>(&self, pairs: &[(K, V)]) -> Vec<(&str, &str)> {
        self.iter()
            .filter(|&(k, v)| {
                pairs.is_empty()
                    || pairs
                        .iter()
                        .any(|(pk, pv)| pk.as_ref() == k && pv.as_ref() == v)
            })
            .collect()
    }

    /// Returns the positions of the entries with one of the keys.
    pub fn key_indexes<S: AsRef<str>>(&self, keys: &[S]) -> Vec<usize> {
        self.iter()
            .enumerate()
            .filter(|(_, (k, _))| keys.iter().any(|key| key.as_ref() == *k))
            .map(|(i, _)| i)
            .collect()
    }

    /// Returns the positions of the entries with one of the values.
    pub fn value_indexes<S: AsRef<str>>(&self, values: &[S]) -> Vec<usize> {
        self.iter()
            .enumerate()
            .filter(|(_, (_, v))| values.iter().any(|value| value.as_ref() == *v))
            .map(|(i, _)| i)
            .collect()
    }

    /// Returns every value of the key, in order.
    #[must_use]
    pub fn get_values(&self, key: &str) -> Vec<&str> {
        self.query_values(&[key])
    }

    /// Sets the values of the entries with the key.
    ///
    /// With one value, every entry with the key gets it. With as many values
    /// as there are entries with the key, they are assigned in order.
    ///
    /// # Errors
    ///
    /// Fails for any other number of values. Nothing is changed then.
    pub fn set_values<S: AsRef<str>>(&mut self, key: &str, values: &[S]) -> Result<(), Error> {
        let indexes = self.key_indexes(&[key]);
        if values.len() != 1 && values.len() != indexes.len() {
            return Err(ErrorRepr::ValueCountMismatch {
                given: values.len(),
                expected: indexes.len(),
            }
            .into());
        }
        for (vi, qi) in indexes.into_iter().enumerate() {
            let value = if values.len() == 1 {
                &values[0]
            } else {
                &values[vi]
            };
            self.pairs[qi].1 = value.as_ref().to_owned();
        }
        Ok(())
    }

    /// Removes every entry with the key.
    pub fn del_key(&mut self, key: &str) {
        for i in self.key_indexes(&[key]).into_iter().rev() {
            self.pairs.remove(i);
        }
    }

    /// Returns `true` if any value of the key is empty.
    ///
    /// With `all_values`, returns `true` only if every value is empty, which
    /// holds trivially when the key is absent.
    #[must_use]
    pub fn is_key_empty(&self, key: &str, all_values: bool) -> bool {
        let mut values = self.get_values(key).into_iter();
        if all_values {
            values.all(str::is_empty)
        } else {
            values.any(str::is_empty)
        }
    }

    /// Returns a copy rotated left by `count` entries (right for negative counts).
    #[must_use]
    pub fn rotated_left(&self, count: isize) -> Self {
        let mut copy = self.clone();
        let len = copy.len();
        if len != 0 {
            let n = count.unsigned_abs() % len;
            if count >= 0 {
                copy.pairs.rotate_left(n);
            } else {
                copy.pairs.rotate_right(n);
            }
        }
        copy
    }

    /// Returns a copy rotated right by `count` entries (left for negative counts).
    #[inline]
    #[must_use]
    pub fn rotated_right(&self, count: isize) -> Self {
        self.rotated_left(count.wrapping_neg())
    }

    /// Encodes the query as `key=value&key=value`.
    ///
    /// `quote`, `quote_safe` and `force_case` default to the instance
    /// options when `None`. Case conversion is applied after quoting. A
    /// query of exactly one entry with a non-empty key and an empty value is
    /// written as the bare key.
    ///
    /// # Examples
    ///
    /// ```
    /// use uriplus::{ForceCase, Query};
    ///
    /// let query = Query::parse("name=J%C3%BCrgen%20B&flag=")?;
    /// assert_eq!(query.encode(None, None, None), "name=J\u{fc}rgen B&flag=");
    /// assert_eq!(
    ///     query.encode(Some(true), None, Some(ForceCase::Lower)),
    ///     "name=j%c3%bcrgen%20b&flag="
    /// );
    /// assert_eq!(Query::parse("flag")?.encode(None, None, None), "flag");
    /// # Ok::<_, uriplus::Error>(())
    /// ```
    #[must_use]
    pub fn encode(
        &self,
        quote: Option<bool>,
        quote_safe: Option<&str>,
        force_case: Option<ForceCase>,
    ) -> String {
        let do_quote = quote.unwrap_or(self.options.requote);
        let safe = quote_safe.unwrap_or(&self.options.quote_safe);
        let case = force_case.unwrap_or(self.options.force_case);

        let encoded = encode_pairs(self.iter(), |s| {
            let s = if do_quote {
                self::quote(s, safe)
            } else {
                s.to_owned()
            };
            case.apply(s)
        });

        match self.pairs.as_slice() {
            [(key, value)] if !key.is_empty() && value.is_empty() => {
                encoded.trim_end_matches('=').to_owned()
            }
            _ => encoded,
        }
    }

    /// Returns `true` if the query only uses characters allowed in a query.
    ///
    /// With `encoded`, the percent-encoded form is checked; otherwise every
    /// raw key and value is.
    #[must_use]
    pub fn validate(&self, encoded: bool) -> bool {
        if encoded {
            !invalid_check(QUERY, [self.encode(Some(true), None, None)])
        } else {
            !invalid_check(QUERY, self.pairs.iter().flat_map(|(k, v)| [k, v]))
        }
    }

    /// Searches keys and values with the given patterns.
    ///
    /// Yields `(key_match, value_match)` for each entry where at least one
    /// side matched; a side without a pattern is always `None`.
    ///
    /// # Errors
    ///
    /// Fails if a string pattern does not compile.
    ///
    /// # Examples
    ///
    /// ```
    /// use uriplus::Query;
    ///
    /// let query = Query::parse("id=12&name=x&id2=y")?;
    /// let found = query.search(Some(&"^id"), Some(&r"^\d+$"))?;
    /// assert_eq!(found.len(), 2);
    /// assert_eq!(found[0].1.map(|m| m.as_str()), Some("12"));
    /// assert_eq!(found[1].1, None);
    /// # Ok::<_, uriplus::Error>(())
    /// ```
    pub fn search(
        &self,
        keymatch: Option<&dyn Pattern>,
        valmatch: Option<&dyn Pattern>,
    ) -> Result<Vec<(Option<Match<'_>>, Option<Match<'_>>)>, Error> {
        let keymatch = keymatch.map(Pattern::to_regex).transpose()?;
        let valmatch = valmatch.map(Pattern::to_regex).transpose()?;
        Ok(self
            .iter()
            .map(|(k, v)| {
                (
                    keymatch.as_ref().and_then(|re| re.find(k)),
                    valmatch.as_ref().and_then(|re| re.find(v)),
                )
            })
            .filter(|(km, vm)| km.is_some() || vm.is_some())
            .collect())
    }
}

impl PartialEq for Query {
    /// Compares the entries only.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.pairs == other.pairs
    }
}

impl Eq for Query {}

impl Hash for Query {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pairs.hash(state);
    }
}

impl fmt::Display for Query {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode(None, None, None))
    }
}

impl FromStr for Query {
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Query {
    type Error = Error;

    #[inline]
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Query {
    type Error = Error;

    #[inline]
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Vec<Pair>> for Query {
    #[inline]
    fn from(pairs: Vec<Pair>) -> Self {
        Self {
            pairs,
            options: QueryOptions::default(),
        }
    }
}

impl<K: Into<String>, V: IntoValue, const N: usize> From<[(K, V); N]> for Query {
    #[inline]
    fn from(pairs: [(K, V); N]) -> Self {
        Self::from_pairs(pairs, QueryOptions::default())
    }
}

impl<K: Into<String>, V: IntoValue> From<BTreeMap<K, V>> for Query {
    #[inline]
    fn from(map: BTreeMap<K, V>) -> Self {
        Self::from_pairs(map, QueryOptions::default())
    }
}

impl<K: Into<String>, V: IntoValue, S> From<HashMap<K, V, S>> for Query {
    #[inline]
    fn from(map: HashMap<K, V, S>) -> Self {
        Self::from_pairs(map, QueryOptions::default())
    }
}

impl<K: Into<String>, V: IntoValue> FromIterator<(K, V)> for Query {
    #[inline]
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter, QueryOptions::default())
    }
}

impl<K: Into<String>, V: IntoValue> Extend<(K, V)> for Query {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.pairs
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into_value())));
    }
}

impl IntoIterator for Query {
    type Item = Pair;
    type IntoIter = std::vec::IntoIter<Pair>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

impl<'a> IntoIterator for &'a Query {
    type Item = &'a Pair;
    type IntoIter = core::slice::Iter<'a, Pair>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

impl Shl<isize> for &Query {
    type Output = Query;

    #[inline]
    fn shl(self, count: isize) -> Query {
        self.rotated_left(count)
    }
}

impl Shr<isize> for &Query {
    type Output = Query;

    #[inline]
    fn shr(self, count: isize) -> Query {
        self.rotated_right(count)
    }
}

impl_serde! {
    expecting: "a URI query string",
    ty: Query,
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::ErrorKind;

    const EXAMPLE: &str = "field1=value1&field2=value2&field3=value3";

    fn example() -> Query {
        Query::parse(EXAMPLE).expect("should be a valid query")
    }

    #[test]
    fn parse_and_encode() {
        let query = example();
        assert_eq!(query.len(), 3);
        assert_eq!(query.to_string(), EXAMPLE);
        assert_eq!(query.get(-1).unwrap(), ("field3", "value3"));
    }

    #[test]
    fn leading_question_mark_and_whitespace() {
        let query = Query::parse("  ?a=1 ").unwrap();
        assert_eq!(query.as_slice(), [("a".to_owned(), "1".to_owned())]);
        assert!(Query::parse("?").unwrap().is_empty());
        assert!(Query::parse("   ").unwrap().is_empty());
    }

    #[test]
    fn valueless_key() {
        let query = Query::parse("flag").unwrap();
        assert_eq!(query.as_slice(), [("flag".to_owned(), String::new())]);
        assert_eq!(query.to_string(), "flag");
    }

    #[test]
    fn single_entry_with_empty_key_keeps_equals() {
        let query = Query::from([("", "")]);
        assert_eq!(query.to_string(), "=");
        let query = Query::from([("a", ""), ("b", "")]);
        assert_eq!(query.to_string(), "a=&b=");
    }

    #[test]
    fn malformed() {
        assert_eq!(
            Query::parse("a=1&b").unwrap_err().kind(),
            ErrorKind::MalformedQuery
        );
    }

    #[test]
    fn unquote_decodes_twice() {
        let plain = Query::parse("k=%2541").unwrap();
        assert_eq!(plain.get_values("k"), ["%41"]);
        let decoded = Query::parse_with("k=%2541", QueryOptions::default().unquote(true)).unwrap();
        assert_eq!(decoded.get_values("k"), ["A"]);
    }

    #[test]
    fn duplicates_are_kept() {
        let query = Query::parse("a=1&a=2").unwrap();
        assert_eq!(query.len(), 2);
        assert_eq!(query.get_values("a"), ["1", "2"]);
        assert_eq!(query.key_indexes(&["a"]), [0, 1]);
    }

    #[test]
    fn append_variants() {
        let mut query = example();
        query.append("field4=value4").unwrap();
        query.append(("field5", "value5")).unwrap();
        query.append(vec![("field6", "value6"), ("field7", "value7")]).unwrap();
        query.append("x=1&y=2").unwrap();
        assert_eq!(query.len(), 9);
        assert_eq!(query.get_values("field4"), ["value4"]);
        assert_eq!(query.get(-1).unwrap(), ("y", "2"));

        let before = query.clone();
        assert!(query.append("p=1&q").is_err());
        assert_eq!(query, before);
    }

    #[test]
    fn single_pair_operations() {
        let mut query = example();
        query.insert(0, "first=1").unwrap();
        assert_eq!(query.get(0).unwrap(), ("first", "1"));
        assert_eq!(
            query.insert(0, "a=1&b=2").unwrap_err().kind(),
            ErrorKind::SinglePairRequired
        );
        assert_eq!(query.count("field1=value1").unwrap(), 1);
        assert_eq!(query.index("field2=value2", None, None).unwrap(), 2);
        assert_eq!(
            query.index("field2=value2", Some(3), None).unwrap_err().kind(),
            ErrorKind::NotFound
        );
        query.remove(("first", "1")).unwrap();
        assert_eq!(query.to_string(), EXAMPLE);
        assert_eq!(query.remove("nope=1").unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(
            query.count("").unwrap_err().kind(),
            ErrorKind::SinglePairRequired
        );
    }

    #[test]
    fn projections() {
        let query = Query::parse("a=1&b=2&c=1").unwrap();
        assert_eq!(query.query_keys::<&str>(&[]), ["a", "b", "c"]);
        assert_eq!(query.query_keys(&["1"]), ["a", "c"]);
        assert_eq!(query.query_values(&["b", "c"]), ["2", "1"]);
        assert_eq!(query.items(&[("c", "1"), ("a", "1")]), [("a", "1"), ("c", "1")]);
        assert_eq!(query.items::<&str, &str>(&[]).len(), 3);
        assert_eq!(query.value_indexes(&["1"]), [0, 2]);
    }

    #[test]
    fn set_values_rules() {
        let mut query = Query::parse("a=1&b=2&a=3").unwrap();
        query.set_values("a", &["x", "y"]).unwrap();
        assert_eq!(query.to_string(), "a=x&b=2&a=y");
        query.set_values("a", &["z"]).unwrap();
        assert_eq!(query.get_values("a"), ["z", "z"]);
        let err = query.set_values("a", &["1", "2", "3"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueCountMismatch);
        assert_eq!(query.get_values("a"), ["z", "z"]);
        query.set_values("missing", &["v"]).unwrap();
        assert!(query.get_values("missing").is_empty());
    }

    #[test]
    fn del_key_removes_all() {
        let mut query = Query::parse("a=1&b=2&a=3&c=4").unwrap();
        query.del_key("a");
        assert_eq!(query.to_string(), "b=2&c=4");
    }

    #[test]
    fn key_emptiness() {
        let query = Query::parse("a=&a=1&b=").unwrap();
        assert!(query.is_key_empty("a", false));
        assert!(!query.is_key_empty("a", true));
        assert!(query.is_key_empty("b", true));
        assert!(!query.is_key_empty("missing", false));
        assert!(query.is_key_empty("missing", true));
    }

    #[test]
    fn encode_options() {
        let query = Query::parse("Key=a%20b%2Fc").unwrap();
        assert_eq!(query.encode(None, None, None), "Key=a b/c");
        assert_eq!(query.encode(Some(true), None, None), "Key=a%20b%2Fc");
        assert_eq!(query.encode(Some(true), Some("/"), None), "Key=a%20b/c");
        assert_eq!(
            query.encode(Some(false), None, Some(ForceCase::Upper)),
            "KEY=A B/C"
        );
        let requoting = Query::parse_with(
            "k=a b",
            QueryOptions::default().requote(true).quote_safe(" "),
        )
        .unwrap();
        assert_eq!(requoting.to_string(), "k=a b");
    }

    #[test]
    fn force_case_literals() {
        assert_eq!("upper".parse::<ForceCase>().unwrap(), ForceCase::Upper);
        assert_eq!("preserve".parse::<ForceCase>().unwrap(), ForceCase::Preserve);
        assert_eq!(
            "title".parse::<ForceCase>().unwrap_err().kind(),
            ErrorKind::InvalidForceCase
        );
    }

    #[test]
    fn validation() {
        assert!(example().validate(false));
        let spaced = Query::parse("a=b%20c").unwrap();
        assert!(!spaced.validate(false));
        assert!(spaced.validate(true));
    }

    #[test]
    fn rotation() {
        let query = Query::parse("a=1&b=2&c=3").unwrap();
        assert_eq!((&query << 1).to_string(), "b=2&c=3&a=1");
        assert_eq!((&query >> 1).to_string(), "c=3&a=1&b=2");
        assert_eq!((&query << -1).to_string(), "c=3&a=1&b=2");
        assert_eq!((&query << 4).to_string(), "b=2&c=3&a=1");
        assert!((&Query::new() << 3).is_empty());
    }

    #[test]
    fn copies_are_independent() {
        let query = example();
        let mut copy = query.clone();
        copy.set_values("field1", &["changed"]).unwrap();
        copy.pop();
        assert_eq!(query.to_string(), EXAMPLE);
        assert_ne!(copy, query);
    }

    #[test]
    fn from_map() {
        let mut map = BTreeMap::new();
        map.insert("b", "2");
        map.insert("a", "1");
        assert_eq!(Query::from(map).to_string(), "a=1&b=2");
    }

    #[test]
    fn owned_and_optional_values() {
        let key = String::from("k");
        let mut query = Query::new();
        query.append((key.clone(), String::from("v"))).unwrap();
        query.append((String::from("flag"), None::<String>)).unwrap();
        query.append(vec![(key.clone(), Some(String::from("w")))]).unwrap();
        assert_eq!(query.to_string(), "k=v&flag=&k=w");
        assert_eq!(query.count((key.clone(), String::from("v"))).unwrap(), 1);
        query.insert(0, (String::from("first"), Some(String::from("1")))).unwrap();
        assert_eq!(query.get(0).unwrap(), ("first", "1"));
        query.remove((String::from("flag"), None::<String>)).unwrap();
        assert_eq!(query.get_values(&key), ["v", "w"]);
    }
}
