//! Editable URI values: [`Uri`], [`Path`] and [`Query`].
//!
//! The types here favour manipulation over strict validation. A string is
//! split into its components as lenient URL splitters do, and each
//! component can then be edited as a value of its own: the path as a list
//! of segments, and the query (and fragment) as an ordered list of
//! key-value pairs that may repeat keys.
//!
//! ```
//! use uriplus::Uri;
//!
//! let mut uri = Uri::parse("https://example.com/docs/index.html?lang=en&lang=fr")?;
//! assert_eq!(uri.query_mut().get_values("lang"), ["en", "fr"]);
//!
//! uri.path_mut().set(-1, "intro.html")?;
//! uri.query_mut().del_key("lang");
//! assert_eq!(uri.to_string(), "https://example.com/docs/intro.html");
//! # Ok::<_, uriplus::Error>(())
//! ```
//!
//! # Quoting
//!
//! Encoding operations take a tri-state `quote: Option<bool>`: `Some(true)`
//! percent-encodes, `Some(false)` renders (or decodes) raw text, and `None`
//! uses the `requote` option of the value. The same holds for
//! `quote_safe: Option<&str>`, the characters kept unencoded.
//!
//! [`Uri::encode`] renders the components first and then quotes or unquotes
//! the joined string as a whole. With `requote` enabled, components are
//! therefore quoted twice.
//!
//! # Validation
//!
//! `validate` methods check characters against the classes of [RFC 3986]
//! in [`charset`]. They do not check structure.
//!
//! # Features
//!
//! * `serde`: `Serialize` and `Deserialize` for [`Uri`], [`Path`] and
//!   [`Query`], as their default string forms.
//!
//! [RFC 3986]: https://www.rfc-editor.org/rfc/rfc3986
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

#[macro_use]
mod macros;

pub mod charset;
mod error;
pub mod index;
pub(crate) mod parser;
pub mod path;
pub mod pattern;
pub mod percent_decode;
pub mod percent_encode;
pub mod query;
pub mod split;
pub mod uri;

pub use self::error::{Error, ErrorKind};
pub use self::index::Slice;
pub use self::path::{IntoSegments, Path, PathOptions};
pub use self::pattern::Pattern;
pub use self::query::{ForceCase, IntoPair, IntoPairs, IntoValue, Query, QueryOptions};
pub use self::split::SplitResult;
pub use self::uri::{SearchMatch, Uri, UriOptions};
