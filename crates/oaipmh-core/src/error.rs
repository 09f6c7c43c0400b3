//! # Error Hierarchy
//!
//! Structured error types for the OAI-PMH value model, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Every value type fails construction with a [`ValidationError`]. The
//! variant names the rule that was violated and carries the offending input
//! together with the expected form, so that the HTTP and repository layers
//! can translate the failure into a protocol error (`badArgument`,
//! `cannotDisseminateFormat`, ...) without guesswork.

use thiserror::Error;

/// Top-level error type for consumers decoding documents into the model.
#[derive(Error, Debug)]
pub enum OaiPmhError {
    /// Domain value validation failure.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The document could not be decoded at all.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for OaiPmhError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// The rule a [`ValidationError`] reports as violated.
///
/// Construction failures are deterministic: the same input always yields
/// the same rule, so collaborators may match on this instead of messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationRule {
    /// The value was empty or whitespace-only.
    Empty,
    /// The value did not match the required pattern.
    Format,
    /// The value is well-formed but not one of the permitted literals.
    DisallowedValue,
    /// The URL scheme is not permitted.
    Scheme,
    /// A collection received the same value twice.
    Duplicate,
    /// A collection received fewer elements than it requires.
    Cardinality,
    /// Two fields of one value disagree with each other.
    CrossField,
    /// The value matched the pattern but is not a real calendar date/time.
    Calendar,
}

/// Validation errors for OAI-PMH domain values.
///
/// Each value type enforces its constraints at construction time. These
/// errors carry the invalid input and the expected format.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A value that must carry content was empty or whitespace-only.
    #[error("invalid {type_name}: must be non-empty")]
    Empty {
        /// The value type being constructed.
        type_name: &'static str,
    },

    /// The value does not match the type's pattern.
    #[error("invalid {type_name} format: \"{value}\" (expected {expected})")]
    InvalidFormat {
        /// The value type being constructed.
        type_name: &'static str,
        /// The rejected input.
        value: String,
        /// Description of the accepted form.
        expected: &'static str,
    },

    /// The value is not one of the permitted literals.
    #[error("invalid {type_name}: \"{value}\" (allowed: {allowed})")]
    DisallowedValue {
        /// The value type being constructed.
        type_name: &'static str,
        /// The rejected input.
        value: String,
        /// Comma-separated permitted literals.
        allowed: &'static str,
    },

    /// The URL uses a scheme other than http or https.
    #[error("invalid base URL: \"{value}\" uses scheme \"{scheme}\" (expected http or https)")]
    UnsupportedScheme {
        /// The rejected URL.
        value: String,
        /// The scheme that was found.
        scheme: String,
    },

    /// A collection received a value it already holds.
    #[error("duplicate {type_name}: \"{value}\"")]
    Duplicate {
        /// The element type of the collection.
        type_name: &'static str,
        /// The repeated value.
        value: String,
    },

    /// A collection that requires at least one element was empty.
    #[error("{type_name} requires at least one element")]
    EmptyCollection {
        /// The collection type being constructed.
        type_name: &'static str,
    },

    /// A datestamp literal does not match its declared granularity.
    #[error("datestamp \"{value}\" does not match granularity {granularity}")]
    GranularityMismatch {
        /// The rejected datestamp literal.
        value: String,
        /// The granularity pattern it was checked against.
        granularity: &'static str,
    },

    /// A datestamp has the right shape but names no real UTC date/time.
    #[error("datestamp \"{value}\" is not a valid calendar date/time ({reason})")]
    InvalidCalendarDate {
        /// The rejected datestamp literal.
        value: String,
        /// Why the date/time was rejected.
        reason: String,
    },

    /// A URI failed `anyURI` schema validation.
    #[error("invalid anyURI: \"{value}\" ({reason})")]
    InvalidAnyUri {
        /// The rejected URI.
        value: String,
        /// Why the URI was rejected.
        reason: String,
    },

    /// A container format's prefix presence contradicts its kind.
    #[error("invalid {type_name}: {reason}")]
    PrefixMismatch {
        /// The container kind being constructed.
        type_name: &'static str,
        /// Which way the prefix presence was wrong.
        reason: &'static str,
    },
}

impl ValidationError {
    /// The rule this failure reports.
    pub fn rule(&self) -> ValidationRule {
        match self {
            Self::Empty { .. } => ValidationRule::Empty,
            Self::InvalidFormat { .. } | Self::InvalidAnyUri { .. } => ValidationRule::Format,
            Self::DisallowedValue { .. } => ValidationRule::DisallowedValue,
            Self::UnsupportedScheme { .. } => ValidationRule::Scheme,
            Self::Duplicate { .. } => ValidationRule::Duplicate,
            Self::EmptyCollection { .. } => ValidationRule::Cardinality,
            Self::GranularityMismatch { .. } | Self::PrefixMismatch { .. } => {
                ValidationRule::CrossField
            }
            Self::InvalidCalendarDate { .. } => ValidationRule::Calendar,
        }
    }

    /// Name of the value type whose construction failed.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Empty { type_name }
            | Self::InvalidFormat { type_name, .. }
            | Self::DisallowedValue { type_name, .. }
            | Self::Duplicate { type_name, .. }
            | Self::EmptyCollection { type_name }
            | Self::PrefixMismatch { type_name, .. } => type_name,
            Self::UnsupportedScheme { .. } => "BaseUrl",
            Self::GranularityMismatch { .. } | Self::InvalidCalendarDate { .. } => "UtcDateTime",
            Self::InvalidAnyUri { .. } => "AnyUri",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_display_names_type() {
        let err = ValidationError::Empty {
            type_name: "RepositoryName",
        };
        assert_eq!(format!("{err}"), "invalid RepositoryName: must be non-empty");
        assert_eq!(err.rule(), ValidationRule::Empty);
        assert_eq!(err.type_name(), "RepositoryName");
    }

    #[test]
    fn invalid_format_display() {
        let err = ValidationError::InvalidFormat {
            type_name: "SetSpec",
            value: "a::b".to_string(),
            expected: "colon-separated segments",
        };
        let msg = format!("{err}");
        assert!(msg.contains("a::b"));
        assert!(msg.contains("colon-separated segments"));
        assert_eq!(err.rule(), ValidationRule::Format);
    }

    #[test]
    fn scheme_error_carries_scheme() {
        let err = ValidationError::UnsupportedScheme {
            value: "ftp://example.org".to_string(),
            scheme: "ftp".to_string(),
        };
        assert!(format!("{err}").contains("\"ftp\""));
        assert_eq!(err.rule(), ValidationRule::Scheme);
        assert_eq!(err.type_name(), "BaseUrl");
    }

    #[test]
    fn granularity_mismatch_is_cross_field() {
        let err = ValidationError::GranularityMismatch {
            value: "2024-06-10T12:00:00Z".to_string(),
            granularity: "YYYY-MM-DD",
        };
        assert_eq!(err.rule(), ValidationRule::CrossField);
        assert_eq!(err.type_name(), "UtcDateTime");
    }

    #[test]
    fn any_uri_error_is_format_rule() {
        let err = ValidationError::InvalidAnyUri {
            value: "%zz".to_string(),
            reason: "bad escape".to_string(),
        };
        assert_eq!(err.rule(), ValidationRule::Format);
        assert_eq!(err.type_name(), "AnyUri");
    }

    #[test]
    fn oai_error_wraps_validation() {
        let inner = ValidationError::Duplicate {
            type_name: "Email",
            value: "a@example.org".to_string(),
        };
        let err = OaiPmhError::from(inner);
        assert!(format!("{err}").contains("a@example.org"));
    }

    #[test]
    fn oai_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = OaiPmhError::from(json_err);
        assert!(matches!(err, OaiPmhError::Serialization(_)));
    }
}
