//! # Record Addressing
//!
//! Value types a harvester uses to address items: the unique
//! [`RecordIdentifier`] of an item, the hierarchical [`SetSpec`] of the sets
//! it belongs to, and the [`MetadataPrefix`] selecting a dissemination format.
//!
//! ## SetSpec Grammar
//!
//! ```text
//! setSpec = segment *( ":" segment )
//! segment = 1*( ALPHA / DIGIT / "-" / "_" / "." )
//! ```
//!
//! The grammar is checked with one regex anchored at both ends, so a
//! leading, trailing or doubled colon can never yield an empty segment.

use serde::Serialize;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;
use crate::macros::{
    impl_from_str, impl_validating_deserialize, impl_value_display, is_blank, matches, Pattern,
};

static SET_SPEC: Pattern =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9\-_.]+(?::[A-Za-z0-9\-_.]+)*$").ok());

static METADATA_PREFIX: Pattern = Lazy::new(|| Regex::new(r"^[A-Za-z0-9\-_.!~*'()]+$").ok());

/// Unique identifier of an item in a repository (`identifier`).
///
/// Only emptiness is checked: `oai:` identifiers, `info:` URIs and bare
/// handles are all accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RecordIdentifier(String);

impl_validating_deserialize!(RecordIdentifier);
impl_value_display!(RecordIdentifier, "identifier");
impl_from_str!(RecordIdentifier);

impl RecordIdentifier {
    /// Create a record identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Empty`] for empty or whitespace-only input.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if is_blank(&s) {
            return Err(ValidationError::Empty {
                type_name: "RecordIdentifier",
            });
        }
        Ok(Self(s))
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Colon-delimited hierarchical set path (`setSpec`), e.g. `math:algebra`.
///
/// # Validation
///
/// - Must be non-empty
/// - Segments of ASCII letters, digits, `-`, `_`, `.`
/// - Segments joined by single colons, none leading or trailing
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SetSpec(String);

impl_validating_deserialize!(SetSpec);
impl_value_display!(SetSpec, "spec");
impl_from_str!(SetSpec);

impl SetSpec {
    /// Create a set spec, validating the segment grammar.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::Empty`] for empty input.
    /// - [`ValidationError::InvalidFormat`] for any grammar violation.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.is_empty() {
            return Err(ValidationError::Empty {
                type_name: "SetSpec",
            });
        }
        if !matches(&SET_SPEC, &s) {
            return Err(ValidationError::InvalidFormat {
                type_name: "SetSpec",
                value: s,
                expected: "colon-separated segments of [A-Za-z0-9-_.]",
            });
        }
        Ok(Self(s))
    }

    /// Access the set spec string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The segments from the root down. Never empty.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(':')
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// The enclosing set, or `None` for a top-level set.
    pub fn parent(&self) -> Option<SetSpec> {
        self.0
            .rsplit_once(':')
            .map(|(parent, _)| SetSpec(parent.to_string()))
    }

    /// Returns true if `other` lies strictly below this set.
    pub fn is_ancestor_of(&self, other: &SetSpec) -> bool {
        other.0.len() > self.0.len()
            && other.0.starts_with(&self.0)
            && other.0.as_bytes()[self.0.len()] == b':'
    }
}

/// Metadata format selector (`metadataPrefix`), e.g. `oai_dc`.
///
/// # Validation
///
/// - Must be non-empty
/// - Only ASCII letters, digits and the URI unreserved marks `-_.!~*'()`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MetadataPrefix(String);

impl_validating_deserialize!(MetadataPrefix);
impl_value_display!(MetadataPrefix, "prefix");
impl_from_str!(MetadataPrefix);

impl MetadataPrefix {
    /// Create a metadata prefix, validating its character class.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::Empty`] for empty input.
    /// - [`ValidationError::InvalidFormat`] for characters outside the class.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.is_empty() {
            return Err(ValidationError::Empty {
                type_name: "MetadataPrefix",
            });
        }
        if !matches(&METADATA_PREFIX, &s) {
            return Err(ValidationError::InvalidFormat {
                type_name: "MetadataPrefix",
                value: s,
                expected: "characters from [A-Za-z0-9-_.!~*'()]",
            });
        }
        Ok(Self(s))
    }

    /// Access the prefix string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
