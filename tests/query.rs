//! Query manipulation.

#[macro_use]
mod utils;

use uriplus::{ErrorKind, ForceCase, Query, QueryOptions};

const EXAMPLE: &str = "field1=value1&field2=value2&field3=value3";

fn example() -> Query {
    Query::parse(EXAMPLE).expect("example query should parse")
}

#[test]
fn parse_round_trip() {
    let query = example();
    assert_eq!(query.len(), 3);
    assert_eq_display!(query, EXAMPLE);
    assert_eq!(query.get_values("field1"), ["value1"]);
}

#[test]
fn append_then_read_back() {
    let mut query = example();
    query.append("field4=value4").unwrap();
    assert_eq!(query.get_values("field4"), ["value4"]);
    assert_eq!(query.len(), 4);
}

#[test]
fn set_then_read_back() {
    let mut query = example();
    query.set_values("field1", &["coolervalue1"]).unwrap();
    assert_eq!(query.get_values("field1"), ["coolervalue1"]);
    assert_eq!(query.get_values("field2"), ["value2"]);
    assert_eq!(query.get_values("field3"), ["value3"]);
}

#[test]
fn duplicate_keys_are_preserved() {
    let query = Query::parse("a=1&a=2").unwrap();
    assert_eq!(query.get_values("a"), ["1", "2"]);
    assert_eq_display!(query, "a=1&a=2");
}

#[test]
fn single_valueless_entry() {
    let query = Query::from([("flag", "")]);
    assert_eq_display!(query, "flag");
}

#[test]
fn copy_is_deep() {
    let source = example();
    let expected = source.to_string();

    let mut copy = source.clone();
    assert_eq!(copy.to_string(), expected);

    copy.append("x=1").unwrap();
    copy.del_key("field2");
    copy.set(0, ("k", "v")).unwrap();
    copy.insert(-1, "i=j").unwrap();
    copy.remove_at(0).unwrap();
    copy.options_mut().requote = true;
    assert_eq_display!(source, expected);
}

#[test]
fn mutators_validate_before_writing() {
    let mut query = example();
    assert_eq!(
        query.set_values("field1", &["a", "b"]).unwrap_err().kind(),
        ErrorKind::ValueCountMismatch
    );
    assert_eq!(
        query.insert(0, "a=1&b=2").unwrap_err().kind(),
        ErrorKind::SinglePairRequired
    );
    assert_eq!(query.set(3, ("a", "b")).unwrap_err().kind(), ErrorKind::IndexOutOfRange);
    assert_eq_display!(query, EXAMPLE);
}

#[test]
fn encoding_variants() {
    let query = Query::parse_with(
        "Name=J%C3%BCrgen&City=K%C3%B6ln",
        QueryOptions::default().requote(true),
    )
    .unwrap();
    assert_eq_display!(query, "Name=J%C3%BCrgen&City=K%C3%B6ln");
    assert_eq!(
        query.encode(Some(false), None, Some(ForceCase::Lower)),
        "name=j\u{fc}rgen&city=k\u{f6}ln"
    );
    assert_eq!(
        query.encode(None, None, Some("upper".parse().unwrap())),
        "NAME=J%C3%BCRGEN&CITY=K%C3%B6LN"
    );
}

#[test]
fn plus_is_space() {
    let query = Query::parse("q=rust+lang").unwrap();
    assert_eq!(query.get_values("q"), ["rust lang"]);
    assert_eq!(query.encode(Some(true), None, None), "q=rust%20lang");
}

#[test]
fn search_keys_and_values() {
    let query = Query::parse("utm_source=a&utm_medium=b&id=7").unwrap();
    let found = query.search(Some(&"^utm_"), None).unwrap();
    let keys: Vec<&str> = found
        .iter()
        .map(|(k, _)| k.expect("key pattern matched").as_str())
        .collect();
    assert_eq!(keys, ["utm_", "utm_"]);

    let found = query.search(None, Some(&r"^\d$")).unwrap();
    assert_eq!(found.len(), 1);
    assert!(found[0].0.is_none());

    assert_eq!(
        query.search(Some(&"["), None).unwrap_err().kind(),
        ErrorKind::InvalidPattern
    );
}

#[test]
fn with_appended_leaves_source() {
    let query = example();
    let longer = query.with_appended([("a", "1"), ("b", "2")]).unwrap();
    assert_eq!(longer.len(), 5);
    assert_eq!(query.len(), 3);
}
