//! Shared helpers for string-backed value types.

use once_cell::sync::Lazy;
use regex::Regex;

/// Implement `Deserialize` for a string newtype by routing the raw string
/// through the type's `new()` constructor, so that invalid values are
/// rejected at deserialization time instead of silently accepted.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// Implement the diagnostic `Display` form `TypeName(field: value)`.
macro_rules! impl_value_display {
    ($ty:ident, $field:literal) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!(stringify!($ty), "(", $field, ": {})"), self.as_str())
            }
        }
    };
}

/// Implement `FromStr` for a string newtype via its validating constructor.
macro_rules! impl_from_str {
    ($ty:ident) => {
        impl std::str::FromStr for $ty {
            type Err = $crate::error::ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

pub(crate) use impl_from_str;
pub(crate) use impl_validating_deserialize;
pub(crate) use impl_value_display;

/// A lazily compiled, fully anchored pattern.
///
/// Compilation failure leaves `None`, which every caller treats as
/// "does not match" so no constructor can panic.
pub(crate) type Pattern = Lazy<Option<Regex>>;

/// Returns true if `value` matches `pattern`.
pub(crate) fn matches(pattern: &Pattern, value: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(value))
}

/// Returns true if the value is empty or whitespace-only.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
