//! # Protocol Verbs
//!
//! The six OAI-PMH 2.0 request verbs as a closed enum. Every `match` on
//! [`OaiVerb`] is exhaustive, so adding a verb forces every consumer to
//! handle it.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::macros::{impl_value_display, is_blank};

/// An OAI-PMH request verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OaiVerb {
    /// Retrieve repository information.
    Identify,
    /// List the metadata formats available from the repository or an item.
    ListMetadataFormats,
    /// List the set structure of the repository.
    ListSets,
    /// Harvest record headers.
    ListIdentifiers,
    /// Harvest full records.
    ListRecords,
    /// Retrieve a single record.
    GetRecord,
}

impl OaiVerb {
    /// All verbs in the order the protocol document lists them.
    pub fn all() -> &'static [OaiVerb] {
        &[
            Self::GetRecord,
            Self::Identify,
            Self::ListIdentifiers,
            Self::ListMetadataFormats,
            Self::ListRecords,
            Self::ListSets,
        ]
    }

    /// Returns the verb exactly as it appears in a request.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identify => "Identify",
            Self::ListMetadataFormats => "ListMetadataFormats",
            Self::ListSets => "ListSets",
            Self::ListIdentifiers => "ListIdentifiers",
            Self::ListRecords => "ListRecords",
            Self::GetRecord => "GetRecord",
        }
    }

    /// Returns true for the four `List*` verbs.
    pub fn is_list_request(&self) -> bool {
        match self {
            Self::ListMetadataFormats
            | Self::ListSets
            | Self::ListIdentifiers
            | Self::ListRecords => true,
            Self::Identify | Self::GetRecord => false,
        }
    }

    /// Returns true for the verbs whose responses may be paged with a
    /// `resumptionToken`. `ListMetadataFormats` is a list verb but never pages.
    pub fn accepts_resumption_token(&self) -> bool {
        match self {
            Self::ListSets | Self::ListIdentifiers | Self::ListRecords => true,
            Self::ListMetadataFormats | Self::Identify | Self::GetRecord => false,
        }
    }

    /// Parse and validate a verb.
    pub fn new(value: &str) -> Result<Self, ValidationError> {
        value.parse()
    }
}

impl FromStr for OaiVerb {
    type Err = ValidationError;

    /// Verbs are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_blank(s) {
            return Err(ValidationError::Empty {
                type_name: "OaiVerb",
            });
        }
        Self::all()
            .iter()
            .copied()
            .find(|verb| verb.as_str() == s)
            .ok_or_else(|| ValidationError::DisallowedValue {
                type_name: "OaiVerb",
                value: s.to_string(),
                allowed: "GetRecord, Identify, ListIdentifiers, ListMetadataFormats, ListRecords, ListSets",
            })
    }
}

impl_value_display!(OaiVerb, "verb");
