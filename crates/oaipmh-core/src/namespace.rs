//! # XML Namespace Types
//!
//! The pieces a container format is described with: schema and namespace
//! URIs ([`AnyUri`]), namespace prefixes ([`NamespacePrefix`]), their
//! bindings ([`MetadataNamespace`], [`MetadataNamespaceCollection`]) and the
//! root element name of a payload ([`MetadataRootTag`]).
//!
//! ## AnyUri Equality
//!
//! [`AnyUri`] compares and hashes the literal string. No URI normalization
//! is applied: `http://a.org/x` and `http://a.org/x/` are distinct values.

use serde::{Deserialize, Serialize};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;
use crate::macros::{impl_from_str, impl_validating_deserialize, impl_value_display, matches, Pattern};
use crate::xsd;

static NC_NAME: Pattern = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.\-]*$").ok());

/// A URI validated as an XML Schema `anyURI`.
///
/// Validation runs through a generated XML document (the `xsd` module),
/// which is also where injection safety is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AnyUri(String);

impl_validating_deserialize!(AnyUri);
impl_value_display!(AnyUri, "uri");
impl_from_str!(AnyUri);

impl AnyUri {
    /// Create a URI, validating it against the `anyURI` datatype.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAnyUri`] for any failure, whether
    /// raised by the XML round trip or by the datatype check.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        xsd::validate_any_uri(&s)?;
        Ok(Self(s))
    }

    /// Access the URI string exactly as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An XML namespace prefix such as `oai_dc` or `dc`.
///
/// # Validation
///
/// - Must be non-empty
/// - NCName-like: letter or `_` first, then letters, digits, `_`, `.`, `-`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NamespacePrefix(String);

impl_validating_deserialize!(NamespacePrefix);
impl_value_display!(NamespacePrefix, "prefix");
impl_from_str!(NamespacePrefix);

impl NamespacePrefix {
    /// Create a namespace prefix.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::Empty`] for empty input.
    /// - [`ValidationError::InvalidFormat`] if the value is not an NCName.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.is_empty() {
            return Err(ValidationError::Empty {
                type_name: "NamespacePrefix",
            });
        }
        if !matches(&NC_NAME, &s) {
            return Err(ValidationError::InvalidFormat {
                type_name: "NamespacePrefix",
                value: s,
                expected: "an NCName such as oai_dc",
            });
        }
        Ok(Self(s))
    }

    /// Access the prefix string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Root element name of a metadata or description payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MetadataRootTag(String);

impl_validating_deserialize!(MetadataRootTag);
impl_value_display!(MetadataRootTag, "tag");
impl_from_str!(MetadataRootTag);

impl MetadataRootTag {
    /// Create a root tag.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Empty`] for the empty string.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.is_empty() {
            return Err(ValidationError::Empty {
                type_name: "MetadataRootTag",
            });
        }
        Ok(Self(s))
    }

    /// Access the tag string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A namespace binding: prefix plus namespace URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetadataNamespace {
    prefix: NamespacePrefix,
    uri: AnyUri,
}

impl MetadataNamespace {
    /// Bind an already validated prefix to an already validated URI.
    pub fn new(prefix: NamespacePrefix, uri: AnyUri) -> Self {
        Self { prefix, uri }
    }

    /// Validate both parts from raw strings, prefix first.
    pub fn parse(prefix: &str, uri: &str) -> Result<Self, ValidationError> {
        Ok(Self::new(NamespacePrefix::new(prefix)?, AnyUri::new(uri)?))
    }

    /// The bound prefix.
    pub fn prefix(&self) -> &NamespacePrefix {
        &self.prefix
    }

    /// The namespace URI.
    pub fn uri(&self) -> &AnyUri {
        &self.uri
    }
}

impl std::fmt::Display for MetadataNamespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MetadataNamespace(prefix: {}, uri: {})",
            self.prefix.as_str(),
            self.uri.as_str()
        )
    }
}

/// Ordered namespace bindings of a container format.
///
/// Equality is positional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataNamespaceCollection(Vec<MetadataNamespace>);

impl MetadataNamespaceCollection {
    /// Collect bindings in the given order.
    pub fn new(namespaces: impl IntoIterator<Item = MetadataNamespace>) -> Self {
        Self(namespaces.into_iter().collect())
    }

    /// A collection with no bindings.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no bindings.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first binding for `prefix`, if any.
    pub fn get(&self, prefix: &NamespacePrefix) -> Option<&MetadataNamespace> {
        self.0.iter().find(|ns| ns.prefix() == prefix)
    }

    /// Iterate in binding order.
    pub fn iter(&self) -> std::slice::Iter<'_, MetadataNamespace> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a MetadataNamespaceCollection {
    type Item = &'a MetadataNamespace;
    type IntoIter = std::slice::Iter<'a, MetadataNamespace>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<MetadataNamespace> for MetadataNamespaceCollection {
    fn from_iter<T: IntoIterator<Item = MetadataNamespace>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl std::fmt::Display for MetadataNamespaceCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MetadataNamespaceCollection(namespaces: [")?;
        for (i, ns) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{ns}")?;
        }
        f.write_str("])")
    }
}
