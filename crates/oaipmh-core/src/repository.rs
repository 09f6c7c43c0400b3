//! # Repository Descriptors
//!
//! Value types describing the repository itself in an Identify response:
//! its human-readable name, its base URL, the protocol version it speaks,
//! and its deleted-record policy.
//!
//! ## Validation
//!
//! [`BaseUrl`] does not share the validator of [`crate::namespace::AnyUri`].
//! A base URL must be an absolute http(s) URL with a host, which is a
//! narrower rule than `anyURI`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ValidationError;
use crate::macros::{impl_from_str, impl_validating_deserialize, impl_value_display, is_blank};

/// Human-readable name of a repository (`repositoryName`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepositoryName(String);

impl_validating_deserialize!(RepositoryName);
impl_value_display!(RepositoryName, "name");
impl_from_str!(RepositoryName);

impl RepositoryName {
    /// Create a repository name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Empty`] if the name is empty or consists
    /// only of whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if is_blank(&s) {
            return Err(ValidationError::Empty {
                type_name: "RepositoryName",
            });
        }
        Ok(Self(s))
    }

    /// Access the name exactly as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The OAI-PMH endpoint of a repository (`baseURL`).
///
/// # Validation
///
/// - Must be non-empty
/// - No whitespace, control characters or backslashes anywhere
/// - Must parse as an absolute URL with a host
/// - Scheme must be `http` or `https`
///
/// Equality compares the literal string, not the normalized URL.
#[derive(Debug, Clone)]
pub struct BaseUrl {
    raw: String,
    url: Url,
}

impl_validating_deserialize!(BaseUrl);
impl_value_display!(BaseUrl, "url");
impl_from_str!(BaseUrl);

impl BaseUrl {
    /// Create a base URL, validating syntax and scheme.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::Empty`] for an empty string.
    /// - [`ValidationError::InvalidFormat`] if the string contains whitespace,
    ///   a control character or `\`, or is not an absolute URL with a host.
    /// - [`ValidationError::UnsupportedScheme`] if the scheme is not http or https.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        if is_blank(&raw) {
            return Err(ValidationError::Empty {
                type_name: "BaseUrl",
            });
        }

        // `Url::parse` strips or rewrites these without reporting an error.
        if raw
            .chars()
            .any(|c| c.is_ascii_whitespace() || c.is_control() || c == '\\')
        {
            return Err(ValidationError::InvalidFormat {
                type_name: "BaseUrl",
                value: raw,
                expected: "a URL without whitespace, control characters or backslashes",
            });
        }

        let url = Url::parse(&raw).map_err(|_| ValidationError::InvalidFormat {
            type_name: "BaseUrl",
            value: raw.clone(),
            expected: "an absolute URL such as http://example.org/oai",
        })?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ValidationError::UnsupportedScheme {
                    value: raw.clone(),
                    scheme: other.to_string(),
                })
            }
        }

        if url.host_str().map_or(true, str::is_empty) {
            return Err(ValidationError::InvalidFormat {
                type_name: "BaseUrl",
                value: raw,
                expected: "an absolute URL with a host",
            });
        }

        Ok(Self { raw, url })
    }

    /// Access the URL exactly as given.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Access the parsed URL.
    pub fn as_url(&self) -> &Url {
        &self.url
    }
}

impl PartialEq for BaseUrl {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for BaseUrl {}

impl std::hash::Hash for BaseUrl {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl Serialize for BaseUrl {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

/// Protocol version declared by a repository (`protocolVersion`).
///
/// Only OAI-PMH 2.0 is supported; any other literal is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtocolVersion {
    /// OAI-PMH 2.0.
    #[serde(rename = "2.0")]
    V2_0,
}

impl ProtocolVersion {
    /// The version this crate implements.
    pub const CURRENT: Self = Self::V2_0;

    /// Returns the protocol literal.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V2_0 => "2.0",
        }
    }

    /// Parse and validate a version literal.
    pub fn new(value: &str) -> Result<Self, ValidationError> {
        value.parse()
    }
}

impl Default for ProtocolVersion {
    fn default() -> Self {
        Self::CURRENT
    }
}

impl FromStr for ProtocolVersion {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_blank(s) {
            return Err(ValidationError::Empty {
                type_name: "ProtocolVersion",
            });
        }
        match s {
            "2.0" => Ok(Self::V2_0),
            other => Err(ValidationError::DisallowedValue {
                type_name: "ProtocolVersion",
                value: other.to_string(),
                allowed: "2.0",
            }),
        }
    }
}

impl_value_display!(ProtocolVersion, "version");

/// How a repository tracks deleted records (`deletedRecord`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletedRecord {
    /// No information about deletions is kept.
    No,
    /// Deletions are tracked, but not guaranteed persistently.
    Transient,
    /// Deletions are tracked with no time limit.
    Persistent,
}

impl DeletedRecord {
    /// All policies in protocol order.
    pub fn all() -> &'static [DeletedRecord] {
        &[Self::No, Self::Transient, Self::Persistent]
    }

    /// Returns the protocol literal.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::No => "no",
            Self::Transient => "transient",
            Self::Persistent => "persistent",
        }
    }

    /// Parse and validate a policy literal.
    pub fn new(value: &str) -> Result<Self, ValidationError> {
        value.parse()
    }
}

impl FromStr for DeletedRecord {
    type Err = ValidationError;

    /// Parsing is case-sensitive, as in the protocol schema.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_blank(s) {
            return Err(ValidationError::Empty {
                type_name: "DeletedRecord",
            });
        }
        match s {
            "no" => Ok(Self::No),
            "transient" => Ok(Self::Transient),
            "persistent" => Ok(Self::Persistent),
            other => Err(ValidationError::DisallowedValue {
                type_name: "DeletedRecord",
                value: other.to_string(),
                allowed: "no, transient, persistent",
            }),
        }
    }
}

impl_value_display!(DeletedRecord, "policy");
