//! # Repository Identity
//!
//! The aggregate behind the `Identify` verb. A [`RepositoryIdentity`] is
//! built from already-validated constituents, so assembling one cannot fail:
//! every invariant is carried by the field types.
//!
//! It is also the root of an Identify configuration document. Deserializing
//! routes each field through its validating constructor, and an omitted
//! `descriptions` key yields an empty [`DescriptionCollection`].

use serde::{Deserialize, Serialize};

use crate::contact::EmailCollection;
use crate::description::DescriptionCollection;
use crate::repository::{BaseUrl, DeletedRecord, ProtocolVersion, RepositoryName};
use crate::temporal::{Granularity, UtcDateTime};

/// Everything a repository states about itself in an Identify response.
///
/// Equality holds only when all eight fields are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryIdentity {
    repository_name: RepositoryName,
    base_url: BaseUrl,
    protocol_version: ProtocolVersion,
    admin_emails: EmailCollection,
    earliest_datestamp: UtcDateTime,
    deleted_record: DeletedRecord,
    granularity: Granularity,
    #[serde(default)]
    descriptions: DescriptionCollection,
}

impl RepositoryIdentity {
    /// Assemble an identity. `None` for `descriptions` means no descriptions.
    ///
    /// No cross-field rule is applied: `earliest_datestamp` keeps the
    /// granularity it was validated against, independent of `granularity`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        repository_name: RepositoryName,
        base_url: BaseUrl,
        protocol_version: ProtocolVersion,
        admin_emails: EmailCollection,
        earliest_datestamp: UtcDateTime,
        deleted_record: DeletedRecord,
        granularity: Granularity,
        descriptions: Option<DescriptionCollection>,
    ) -> Self {
        let descriptions = descriptions.unwrap_or_default();
        tracing::debug!(
            repository = repository_name.as_str(),
            base_url = base_url.as_str(),
            admins = admin_emails.len(),
            descriptions = descriptions.count(),
            "assembled repository identity"
        );
        Self {
            repository_name,
            base_url,
            protocol_version,
            admin_emails,
            earliest_datestamp,
            deleted_record,
            granularity,
            descriptions,
        }
    }

    /// A copy of this identity with `descriptions` replaced.
    pub fn with_descriptions(&self, descriptions: DescriptionCollection) -> Self {
        Self {
            descriptions,
            ..self.clone()
        }
    }

    /// The `repositoryName`.
    pub fn repository_name(&self) -> &RepositoryName {
        &self.repository_name
    }

    /// The `baseURL` harvesters send requests to.
    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// The `protocolVersion`.
    pub fn protocol_version(&self) -> ProtocolVersion {
        self.protocol_version
    }

    /// The `adminEmail` addresses, at least one.
    pub fn admin_emails(&self) -> &EmailCollection {
        &self.admin_emails
    }

    /// The `earliestDatestamp`, at the granularity it was declared in.
    pub fn earliest_datestamp(&self) -> &UtcDateTime {
        &self.earliest_datestamp
    }

    /// The `deletedRecord` policy.
    pub fn deleted_record(&self) -> DeletedRecord {
        self.deleted_record
    }

    /// The datestamp `granularity` the repository supports.
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// The `description` containers, possibly none.
    pub fn descriptions(&self) -> &DescriptionCollection {
        &self.descriptions
    }
}

impl std::fmt::Display for RepositoryIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RepositoryIdentity(repository_name: {}, base_url: {}, protocol_version: {}, \
             admin_emails: {}, earliest_datestamp: {}, deleted_record: {}, granularity: {}, \
             descriptions: {})",
            self.repository_name.as_str(),
            self.base_url.as_str(),
            self.protocol_version.as_str(),
            self.admin_emails,
            self.earliest_datestamp,
            self.deleted_record.as_str(),
            self.granularity.as_str(),
            self.descriptions,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::Description;
    use crate::format::DescriptionFormat;
    use crate::namespace::{AnyUri, MetadataNamespaceCollection, MetadataRootTag};
    use serde_json::json;

    fn identity() -> RepositoryIdentity {
        RepositoryIdentity::new(
            RepositoryName::new("Example Archive").unwrap(),
            BaseUrl::new("https://example.org/oai").unwrap(),
            ProtocolVersion::V2_0,
            EmailCollection::parse(["admin@example.org"]).unwrap(),
            UtcDateTime::new("2001-01-01", Granularity::Date).unwrap(),
            DeletedRecord::No,
            Granularity::Date,
            None,
        )
    }

    fn friends() -> DescriptionCollection {
        let format = DescriptionFormat::new(
            MetadataNamespaceCollection::empty(),
            AnyUri::new("http://www.openarchives.org/OAI/2.0/friends.xsd").unwrap(),
            MetadataRootTag::new("friends").unwrap(),
        );
        let data = json!({ "baseURL": ["https://peer.example.org/oai"] });
        DescriptionCollection::new([Description::new(
            format,
            data.as_object().cloned().unwrap(),
        )])
    }

    // -- Construction --

    #[test]
    fn omitted_descriptions_default_to_empty() {
        let id = identity();
        assert_eq!(id.descriptions().count(), 0);
        assert!(id.descriptions().is_empty());
    }

    #[test]
    fn accessors_return_constituents() {
        let id = identity();
        assert_eq!(id.repository_name().as_str(), "Example Archive");
        assert_eq!(id.base_url().as_str(), "https://example.org/oai");
        assert_eq!(id.protocol_version(), ProtocolVersion::V2_0);
        assert_eq!(id.admin_emails().primary().as_str(), "admin@example.org");
        assert_eq!(id.earliest_datestamp().as_str(), "2001-01-01");
        assert_eq!(id.deleted_record(), DeletedRecord::No);
        assert_eq!(id.granularity(), Granularity::Date);
    }

    #[test]
    fn with_descriptions_leaves_original_untouched() {
        let id = identity();
        let described = id.with_descriptions(friends());
        assert_eq!(id.descriptions().count(), 0);
        assert_eq!(described.descriptions().count(), 1);
        assert_eq!(described.repository_name(), id.repository_name());
    }

    // -- Equality --

    #[test]
    fn equal_inputs_give_equal_identities() {
        assert_eq!(identity(), identity());
    }

    #[test]
    fn any_field_difference_breaks_equality() {
        let base = identity();
        let variants = [
            RepositoryIdentity {
                repository_name: RepositoryName::new("Other Archive").unwrap(),
                ..base.clone()
            },
            RepositoryIdentity {
                base_url: BaseUrl::new("https://example.org/oai2").unwrap(),
                ..base.clone()
            },
            RepositoryIdentity {
                admin_emails: EmailCollection::parse(["other@example.org"]).unwrap(),
                ..base.clone()
            },
            RepositoryIdentity {
                earliest_datestamp: UtcDateTime::new("2002-01-01", Granularity::Date).unwrap(),
                ..base.clone()
            },
            RepositoryIdentity {
                deleted_record: DeletedRecord::Persistent,
                ..base.clone()
            },
            RepositoryIdentity {
                granularity: Granularity::DateTime,
                ..base.clone()
            },
            base.with_descriptions(friends()),
        ];
        for variant in variants {
            assert_ne!(base, variant, "{variant}");
        }
    }

    #[test]
    fn identities_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RepositoryIdentity>();
    }

    // -- Display --

    #[test]
    fn display_names_every_field() {
        let s = identity().to_string();
        assert!(s.starts_with("RepositoryIdentity("));
        assert!(s.contains("repository_name: Example Archive"));
        assert!(s.contains("base_url: https://example.org/oai"));
        assert!(s.contains("protocol_version: 2.0"));
        assert!(s.contains("deleted_record: no"));
        assert!(s.contains("granularity: YYYY-MM-DD"));
        assert!(s.contains("descriptions: DescriptionCollection(count: 0)"));
    }

    // -- Serde --

    #[test]
    fn deserialize_without_descriptions() {
        let id: RepositoryIdentity = serde_json::from_value(json!({
            "repository_name": "Example Archive",
            "base_url": "https://example.org/oai",
            "protocol_version": "2.0",
            "admin_emails": ["admin@example.org"],
            "earliest_datestamp": { "datestamp": "2001-01-01", "granularity": "YYYY-MM-DD" },
            "deleted_record": "no",
            "granularity": "YYYY-MM-DD"
        }))
        .unwrap();
        assert_eq!(id, identity());
    }

    #[test]
    fn deserialize_rejects_invalid_constituent() {
        let result: Result<RepositoryIdentity, _> = serde_json::from_value(json!({
            "repository_name": "Example Archive",
            "base_url": "ftp://example.org/oai",
            "protocol_version": "2.0",
            "admin_emails": ["admin@example.org"],
            "earliest_datestamp": { "datestamp": "2001-01-01", "granularity": "YYYY-MM-DD" },
            "deleted_record": "no",
            "granularity": "YYYY-MM-DD"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn serde_roundtrip_with_descriptions() {
        let id = identity().with_descriptions(friends());
        let json = serde_json::to_string(&id).unwrap();
        let back: RepositoryIdentity = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
