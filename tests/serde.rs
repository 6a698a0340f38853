//! Serialization and deserialization.
#![cfg(feature = "serde")]

use serde_test::{assert_de_tokens_error, assert_tokens, Token};

use uriplus::{Path, Query, Uri};

#[test]
fn uri() {
    let uri = Uri::parse("https://example.com/a/b?q=1#top").unwrap();
    assert_tokens(&uri, &[Token::Str("https://example.com/a/b?q=1#top")]);
}

#[test]
fn path() {
    let path = Path::from("/a/b");
    assert_tokens(&path, &[Token::Str("/a/b")]);
}

#[test]
fn query() {
    let query = Query::parse("a=1&a=2").unwrap();
    assert_tokens(&query, &[Token::Str("a=1&a=2")]);
}

#[test]
fn invalid_query() {
    assert_de_tokens_error::<Query>(&[Token::Str("a=1&b")], "bad query field: \"b\"");
}
