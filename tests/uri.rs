//! URI manipulation.

#[macro_use]
mod utils;

use uriplus::{ErrorKind, SplitResult, Uri, UriOptions};

#[test]
fn overview_example() {
    let uri = Uri::parse("http://www.example.com/index.html").unwrap();
    assert_eq!(uri.scheme, "http");
    assert_eq!(uri.host, "www.example.com");
    assert_eq!(uri.path.as_ref().unwrap().segments(), ["index.html"]);
    assert_eq_display!(uri, "http://www.example.com/index.html");
}

#[test]
fn copy_is_deep() {
    let source = Uri::parse("https://u:p@example.com:8443/a/b?x=1&y=2#frag").unwrap();
    let expected = source.to_string();

    let mut copy = source.clone();
    assert_eq!(copy.to_string(), expected);
    copy.scheme = "http".to_owned();
    copy.set_authority("other.org").unwrap();
    copy.set_password(Some("changed"));
    copy.path_append("c");
    copy.path_mut().set(0, "z").unwrap();
    copy.query_mut().del_key("x");
    copy.fragment_mut().append("more").unwrap();
    copy.options_mut().requote = true;
    assert_eq_display!(source, expected);
}

#[test]
fn components_and_whole_string_are_both_quoted() {
    let options = UriOptions::default().requote(true).quote_safe(":/");
    let uri = Uri::parse_with("http://example.com/a b?k=v w", options).unwrap();

    let (_, _, path, query, _) = uri.tupled(None, None);
    assert_eq!(path, "a%20b");
    assert_eq!(query, "k=v%20w");
    assert_eq_display!(uri, "http://example.com/a%2520b%3Fk%3Dv%2520w");
    assert_eq!(uri.encode(Some(false), None), "http://example.com/a b?k=v w");
}

#[test]
fn stripped_and_root() {
    let uri = Uri::parse("http://example.com/a b?q=1#f").unwrap();
    assert_eq!(uri.stripped(Some(true), Some(":/")), "http://example.com/a%2520b");
    assert_eq!(uri.stripped(None, None), "http://example.com/a b");
    assert_eq!(uri.root(None, None), "http://example.com");
}

#[test]
fn host_checked_against_path_and_query_sets() {
    let uri = Uri::parse("http://[2001:db8::1]/index.html").unwrap();
    assert_eq!(uri.host, "[2001:db8::1]");
    assert!(!uri.validate());

    let plain = Uri::parse("http://192.0.2.1/index.html").unwrap();
    assert!(plain.validate());
}

#[test]
fn construction_variants() {
    let split = SplitResult::new("https", "example.com", "/x", "", "top");
    let from_split = Uri::try_from(split).unwrap();
    assert_eq_display!(from_split, "https://example.com/x#top");

    let from_fields = Uri::from_fields(&["https", "example.com"], UriOptions::default()).unwrap();
    assert_eq_display!(from_fields, "https://example.com");

    let from_uri = Uri::from_uri(&from_split, UriOptions::default()).unwrap();
    assert_eq!(from_uri, from_split);

    let err = Uri::from_fields(&["a", "b", "c", "d", "e", "f"], UriOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidSplitFields);
}

#[test]
fn operators() {
    let base = Uri::parse("https://example.com/api").unwrap();
    assert_eq_display!(&base / "v1" / "users", "https://example.com/api/v1/users");
    let separated = base.join_separated("x");
    assert_eq_display!(separated, "https://example.com/api/x");
    assert_eq!(Uri::parse(&separated.to_string()).unwrap(), separated);
    assert_eq_display!(base, "https://example.com/api");
}

#[test]
fn trailing_slash_is_not_kept() {
    let uri = Uri::parse("http://www.example.com/").unwrap();
    assert!(uri.path.as_ref().unwrap().is_empty());
    assert_eq_display!(uri, "http://www.example.com");

    let uri = Uri::parse("http://www.example.com/docs/").unwrap();
    assert_eq_display!(uri, "http://www.example.com/docs");
    let reparsed = Uri::parse(&uri.to_string()).unwrap();
    assert_eq!(reparsed, uri);
}
