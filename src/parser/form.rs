//! `application/x-www-form-urlencoded` style key-value parsing.

use crate::error::Error;
use crate::parser::str::find_split_hole;
use crate::percent_decode::unquote_plus;

/// Parses `key=value&key=value` into pairs, keeping blank values.
///
/// Parsing is strict: every `&`-separated field must contain a `=`, and
/// empty fields are rejected. Keys and values have `+` replaced with a space
/// and are then percent-decoded. An empty input yields no pairs.
pub(crate) fn parse_pairs(s: &str) -> Result<Vec<(String, String)>, Error> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    s.split('&')
        .map(|field| {
            let (key, value) =
                find_split_hole(field, b'=').ok_or_else(|| Error::malformed_query(field))?;
            Ok((
                unquote_plus(key).into_owned(),
                unquote_plus(value).into_owned(),
            ))
        })
        .collect()
}

/// Joins pairs as `key=value&key=value`, passing each key and value through `transform`.
pub(crate) fn encode_pairs<'a, I, F>(pairs: I, mut transform: F) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
    F: FnMut(&str) -> String,
{
    let mut out = String::new();
    for (i, (key, value)) in pairs.into_iter().enumerate() {
        if i != 0 {
            out.push('&');
        }
        out.push_str(&transform(key));
        out.push('=');
        out.push_str(&transform(value));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::ErrorKind;

    fn pairs(s: &str) -> Vec<(String, String)> {
        parse_pairs(s).expect("should be a valid form string")
    }

    #[test]
    fn blank_values_are_kept() {
        assert_eq!(
            pairs("a=&b=2"),
            [("a".into(), "".into()), ("b".into(), "2".into())]
        );
        assert_eq!(pairs("="), [("".into(), "".into())]);
    }

    #[test]
    fn only_first_equals_splits() {
        assert_eq!(pairs("a=b=c"), [("a".into(), "b=c".into())]);
    }

    #[test]
    fn fields_are_decoded() {
        assert_eq!(pairs("a+b=%41%2B"), [("a b".into(), "A+".into())]);
    }

    #[test]
    fn strict_parsing() {
        for bad in ["a", "a=1&b", "a=1&&b=2", "&", "a=1&"] {
            let err = parse_pairs(bad).expect_err(bad);
            assert_eq!(err.kind(), ErrorKind::MalformedQuery, "{}", bad);
        }
    }

    #[test]
    fn encode_in_order() {
        let encoded = encode_pairs([("b", "2"), ("a", "1"), ("b", "")], str::to_owned);
        assert_eq!(encoded, "b=2&a=1&b=");
        assert_eq!(encode_pairs([], str::to_owned), "");
    }
}
