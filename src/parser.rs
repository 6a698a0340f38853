//! Parsers and string helpers shared by the value types.

pub(crate) mod form;
pub(crate) mod str;
