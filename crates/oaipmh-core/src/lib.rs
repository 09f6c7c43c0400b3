//! # oaipmh-core — Validated Value Types for OAI-PMH 2.0
//!
//! The data elements of the Open Archives Initiative Protocol for Metadata
//! Harvesting as immutable, self-validating Rust values: repository
//! identity, record identifiers, set specs, granularity-bound datestamps
//! and the metadata/description container formats.
//!
//! A value either exists and is valid, or its constructor returned a
//! [`ValidationError`]. There is no partially-built state and no setter.
//!
//! ## Key Design Principles
//!
//! 1. **Newtypes for protocol primitives.** `RepositoryName`, `BaseUrl`,
//!    `Email`, `RecordIdentifier`, `SetSpec`, `MetadataPrefix`,
//!    `NamespacePrefix`, `AnyUri`: no bare strings cross the API.
//!
//! 2. **Closed enums for closed vocabularies.** `ProtocolVersion`,
//!    `DeletedRecord`, `Granularity` and `OaiVerb` parse through `FromStr`
//!    and are matched exhaustively.
//!
//! 3. **Datestamps carry their granularity.** A [`UtcDateTime`] is the pair
//!    (literal, granularity). Two datestamps of different granularity are
//!    never equal.
//!
//! 4. **Prefix presence is a type.** [`ContainerFormat`] is generic over its
//!    prefix policy: [`MetadataFormat`] always has one, [`DescriptionFormat`]
//!    never does.
//!
//! 5. **`anyURI` is checked as XML sees it.** The candidate goes through a
//!    generated document as escaped text, so it cannot alter the document
//!    it is validated in.
//!
//! ## Crate Policy
//!
//! - No I/O. Construction is pure and synchronous; every type is
//!   `Send + Sync`.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Every public type implements `Serialize`, and `Deserialize` only
//!   through its validating constructor.

mod macros;
mod xsd;

pub mod contact;
pub mod description;
pub mod error;
pub mod format;
pub mod identity;
pub mod namespace;
pub mod record;
pub mod repository;
pub mod temporal;
pub mod verb;

// Re-export primary types for ergonomic imports.
pub use contact::{Email, EmailCollection};
pub use description::{Description, DescriptionCollection};
pub use error::{OaiPmhError, ValidationError, ValidationRule};
pub use format::{ContainerFormat, DescriptionFormat, FormatPrefix, MetadataFormat, NoPrefix};
pub use identity::RepositoryIdentity;
pub use namespace::{
    AnyUri, MetadataNamespace, MetadataNamespaceCollection, MetadataRootTag, NamespacePrefix,
};
pub use record::{MetadataPrefix, RecordIdentifier, SetSpec};
pub use repository::{BaseUrl, DeletedRecord, ProtocolVersion, RepositoryName};
pub use temporal::{Granularity, UtcDateTime};
pub use verb::OaiVerb;
