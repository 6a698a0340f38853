//! Regular expression arguments.

use std::borrow::Cow;

use regex::Regex;

use crate::error::Error;

/// A value usable as a search pattern.
///
/// Strings are compiled on use, and compiled [`Regex`]es are borrowed.
pub trait Pattern {
    /// Returns the compiled regular expression.
    ///
    /// # Errors
    ///
    /// Fails if a string pattern is not a valid regular expression.
    fn to_regex(&self) -> Result<Cow<'_, Regex>, Error>;
}

impl Pattern for Regex {
    #[inline]
    fn to_regex(&self) -> Result<Cow<'_, Regex>, Error> {
        Ok(Cow::Borrowed(self))
    }
}

impl Pattern for str {
    fn to_regex(&self) -> Result<Cow<'_, Regex>, Error> {
        Ok(Cow::Owned(Regex::new(self)?))
    }
}

impl Pattern for String {
    #[inline]
    fn to_regex(&self) -> Result<Cow<'_, Regex>, Error> {
        self.as_str().to_regex()
    }
}

impl<T: Pattern + ?Sized> Pattern for &T {
    #[inline]
    fn to_regex(&self) -> Result<Cow<'_, Regex>, Error> {
        (**self).to_regex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::ErrorKind;

    #[test]
    fn compiled_and_string_patterns() {
        let re = Regex::new("^a+$").unwrap();
        assert!(re.to_regex().unwrap().is_match("aaa"));
        assert!("^a+$".to_regex().unwrap().is_match("aaa"));
        assert!(String::from("b").to_regex().unwrap().is_match("abc"));
    }

    #[test]
    fn invalid_pattern() {
        let err = "(".to_regex().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPattern);
    }
}
