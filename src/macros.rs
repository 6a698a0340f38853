//! Macros.

/// Implement serialization and deserialization with serde.
///
/// Values are serialized as their default string form and deserialized
/// through their `FromStr` implementation.
///
/// * `$expecting`: `&'static str` value.
/// * `$ty`: identifier of the value type.
macro_rules! impl_serde {
    (
        expecting: $expecting:expr,
        ty: $ty:ident,
    ) => {
        #[cfg(feature = "serde")]
        mod __serde {
            use super::$ty;

            use core::fmt;

            use serde::{
                de::{self, Visitor},
                Deserialize, Deserializer, Serialize, Serializer,
            };

            impl Serialize for $ty {
                fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                where
                    S: Serializer,
                {
                    serializer.collect_str(self)
                }
            }

            /// String visitor.
            #[derive(Debug, Clone, Copy)]
            struct StrVisitor;

            impl<'de> Visitor<'de> for StrVisitor {
                type Value = $ty;

                fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str($expecting)
                }

                fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
                where
                    E: de::Error,
                {
                    v.parse::<$ty>().map_err(E::custom)
                }
            }

            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: Deserializer<'de>,
                {
                    deserializer.deserialize_str(StrVisitor)
                }
            }
        }
    };
}
