//! # Container Formats
//!
//! OAI-PMH wraps four kinds of payload in the same structural shape: the
//! `metadata`, `about`, `description` and `setDescription` containers. Each
//! is described by a namespace collection, a schema location and a root
//! tag. Only independently harvested metadata formats carry a
//! `metadataPrefix`.
//!
//! [`ContainerFormat`] is generic over its prefix policy so that the
//! presence of a prefix is a property of the type, not of a runtime check:
//!
//! | Alias | `P` | Prefix |
//! |---|---|---|
//! | [`MetadataFormat`] | [`MetadataPrefix`] | always present |
//! | [`DescriptionFormat`] | [`NoPrefix`] | always absent |
//!
//! Equality compares prefix (absent equals absent), namespaces, schema and
//! root tag, and is defined across both aliases.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::namespace::{AnyUri, MetadataNamespaceCollection, MetadataRootTag};
use crate::record::MetadataPrefix;

mod sealed {
    pub trait Sealed {}
    impl Sealed for crate::record::MetadataPrefix {}
    impl Sealed for super::NoPrefix {}
}

/// Prefix policy of a [`ContainerFormat`]. Sealed.
pub trait FormatPrefix: sealed::Sealed + Clone + std::fmt::Debug {
    /// Name of the container kind, used in error messages.
    const KIND: &'static str;

    /// The prefix, if this policy carries one.
    fn as_prefix(&self) -> Option<&MetadataPrefix>;

    /// Rebuild the policy from an optional prefix, rejecting the wrong
    /// presence.
    fn from_prefix(prefix: Option<MetadataPrefix>) -> Result<Self, ValidationError>;
}

/// Marker for containers that never carry a prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NoPrefix;

impl FormatPrefix for MetadataPrefix {
    const KIND: &'static str = "MetadataFormat";

    fn as_prefix(&self) -> Option<&MetadataPrefix> {
        Some(self)
    }

    fn from_prefix(prefix: Option<MetadataPrefix>) -> Result<Self, ValidationError> {
        prefix.ok_or(ValidationError::PrefixMismatch {
            type_name: Self::KIND,
            reason: "a metadata format requires a metadataPrefix",
        })
    }
}

impl FormatPrefix for NoPrefix {
    const KIND: &'static str = "DescriptionFormat";

    fn as_prefix(&self) -> Option<&MetadataPrefix> {
        None
    }

    fn from_prefix(prefix: Option<MetadataPrefix>) -> Result<Self, ValidationError> {
        match prefix {
            None => Ok(NoPrefix),
            Some(_) => Err(ValidationError::PrefixMismatch {
                type_name: Self::KIND,
                reason: "a description format must not carry a metadataPrefix",
            }),
        }
    }
}

/// Shared shape of the metadata, about, description and setDescription
/// containers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(
    try_from = "RawContainerFormat",
    into = "RawContainerFormat",
    bound = "P: FormatPrefix"
)]
pub struct ContainerFormat<P: FormatPrefix> {
    prefix: P,
    namespaces: MetadataNamespaceCollection,
    schema: AnyUri,
    root_tag: MetadataRootTag,
}

/// A harvestable metadata format; the prefix is always present.
pub type MetadataFormat = ContainerFormat<MetadataPrefix>;

/// A repository description format; there is never a prefix.
pub type DescriptionFormat = ContainerFormat<NoPrefix>;

impl<P: FormatPrefix> ContainerFormat<P> {
    /// The prefix, if this kind of container carries one.
    pub fn prefix(&self) -> Option<&MetadataPrefix> {
        self.prefix.as_prefix()
    }

    /// Namespace bindings of the payload.
    pub fn namespaces(&self) -> &MetadataNamespaceCollection {
        &self.namespaces
    }

    /// Location of the XML schema of the payload.
    pub fn schema(&self) -> &AnyUri {
        &self.schema
    }

    /// Root element of the payload.
    pub fn root_tag(&self) -> &MetadataRootTag {
        &self.root_tag
    }
}

impl MetadataFormat {
    /// Describe a harvestable metadata format.
    pub fn new(
        prefix: MetadataPrefix,
        namespaces: MetadataNamespaceCollection,
        schema: AnyUri,
        root_tag: MetadataRootTag,
    ) -> Self {
        Self {
            prefix,
            namespaces,
            schema,
            root_tag,
        }
    }

    /// The `metadataPrefix` harvesters request this format with.
    pub fn metadata_prefix(&self) -> &MetadataPrefix {
        &self.prefix
    }
}

impl DescriptionFormat {
    /// Describe a repository description format.
    pub fn new(
        namespaces: MetadataNamespaceCollection,
        schema: AnyUri,
        root_tag: MetadataRootTag,
    ) -> Self {
        Self {
            prefix: NoPrefix,
            namespaces,
            schema,
            root_tag,
        }
    }
}

impl<P: FormatPrefix, Q: FormatPrefix> PartialEq<ContainerFormat<Q>> for ContainerFormat<P> {
    fn eq(&self, other: &ContainerFormat<Q>) -> bool {
        self.prefix() == other.prefix()
            && self.namespaces == other.namespaces
            && self.schema == other.schema
            && self.root_tag == other.root_tag
    }
}

impl<P: FormatPrefix> Eq for ContainerFormat<P> {}

impl<P: FormatPrefix> std::hash::Hash for ContainerFormat<P> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.prefix().hash(state);
        self.namespaces.hash(state);
        self.schema.hash(state);
        self.root_tag.hash(state);
    }
}

impl<P: FormatPrefix> std::fmt::Display for ContainerFormat<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(prefix: ", P::KIND)?;
        match self.prefix() {
            Some(prefix) => f.write_str(prefix.as_str())?,
            None => f.write_str("null")?,
        }
        write!(
            f,
            ", namespaces: {}, schema: {}, root_tag: {})",
            self.namespaces,
            self.schema.as_str(),
            self.root_tag.as_str()
        )
    }
}

/// Wire form shared by every container kind.
#[derive(Serialize, Deserialize)]
struct RawContainerFormat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prefix: Option<MetadataPrefix>,
    #[serde(default)]
    namespaces: MetadataNamespaceCollection,
    schema: AnyUri,
    root_tag: MetadataRootTag,
}

impl<P: FormatPrefix> TryFrom<RawContainerFormat> for ContainerFormat<P> {
    type Error = ValidationError;

    fn try_from(raw: RawContainerFormat) -> Result<Self, Self::Error> {
        Ok(Self {
            prefix: P::from_prefix(raw.prefix)?,
            namespaces: raw.namespaces,
            schema: raw.schema,
            root_tag: raw.root_tag,
        })
    }
}

impl<P: FormatPrefix> From<ContainerFormat<P>> for RawContainerFormat {
    fn from(format: ContainerFormat<P>) -> Self {
        Self {
            prefix: format.prefix().cloned(),
            namespaces: format.namespaces,
            schema: format.schema,
            root_tag: format.root_tag,
        }
    }
}
