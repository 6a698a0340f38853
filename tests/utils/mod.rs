//! Utilities.
#![allow(dead_code)]

use core::fmt;

/// Returns `true` if the `Display` output of the value equals the expected string.
pub fn eq_display<T: fmt::Display>(value: T, expected: &str) -> bool {
    value.to_string() == expected
}

/// Asserts that the `Display` output of the value equals the expected string.
macro_rules! assert_eq_display {
    ($left:expr, $right:expr $(,)?) => {{
        match (&$left, &$right) {
            (left_val, right_val) => {
                assert!(
                    utils::eq_display(left_val, right_val.as_ref()),
                    "`left.to_string() == right` failed:\n  left: {}\n right: {:?}",
                    left_val,
                    right_val,
                );
            }
        }
    }};
    ($left:expr, $right:expr, $($args:tt)*) => {{
        match (&$left, &$right) {
            (left_val, right_val) => {
                assert!(
                    utils::eq_display(left_val, right_val.as_ref()),
                    "`left.to_string() == right` failed:\n  left: {}\n right: {:?}\n  info: {}",
                    left_val,
                    right_val,
                    format_args!($($args)*)
                );
            }
        }
    }};
}
