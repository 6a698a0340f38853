//! Character sets.

use uriplus::charset::{
    invalid_check, CharacterSet, ALL, FRAGMENT, HOST, PATH, PORT, QUERY, RESERVED, SCHEME,
    SEGMENT, UNRESERVED, USERINFO,
};

const SETS: &[(&str, &CharacterSet)] = &[
    ("ALL", ALL),
    ("FRAGMENT", FRAGMENT),
    ("HOST", HOST),
    ("PATH", PATH),
    ("PORT", PORT),
    ("QUERY", QUERY),
    ("RESERVED", RESERVED),
    ("SCHEME", SCHEME),
    ("SEGMENT", SEGMENT),
    ("UNRESERVED", UNRESERVED),
    ("USERINFO", USERINFO),
];

#[test]
fn empty_candidates_are_valid() {
    for (name, set) in SETS {
        assert!(!invalid_check(set, [""]), "{}", name);
        assert!(!invalid_check(set, Vec::<String>::new()), "{}", name);
    }
}

#[test]
fn every_set_is_within_all() {
    for (name, set) in SETS {
        assert!(set.is_subset(ALL), "{}", name);
    }
}

#[test]
fn component_sets() {
    assert!(!invalid_check(SCHEME, ["svn+ssh"]));
    assert!(invalid_check(SCHEME, ["a_b"]));
    assert!(!invalid_check(PORT, ["8080"]));
    assert!(invalid_check(PORT, ["80a"]));
    assert!(!invalid_check(QUERY, ["a=1&b=/?"]));
    assert!(invalid_check(QUERY, ["ok", "a#b"]));
    assert!(invalid_check(PATH, ["caf\u{e9}"]));
}

#[test]
fn segment_excludes_slash() {
    assert!(!SEGMENT.contains('/'));
    assert!(PATH.contains('/'));
}
