//! # Repository Descriptions
//!
//! An Identify response may carry any number of `description` containers
//! (`oai-identifier`, `eprints`, `friends`, `branding`, ...). Each one is a
//! [`DescriptionFormat`] plus an opaque payload that this model does not
//! interpret; rendering it is the job of the XML layer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::format::DescriptionFormat;

/// A single repository description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    format: DescriptionFormat,
    #[serde(default)]
    data: Map<String, Value>,
}

impl Description {
    /// Pair a description format with its payload.
    pub fn new(format: DescriptionFormat, data: Map<String, Value>) -> Self {
        Self { format, data }
    }

    /// The format describing the payload.
    pub fn format(&self) -> &DescriptionFormat {
        &self.format
    }

    /// The uninterpreted payload.
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }
}

impl std::fmt::Display for Description {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Description(format: {}, data: {})",
            self.format,
            Value::Object(self.data.clone())
        )
    }
}

/// Zero or more descriptions, in document order.
///
/// Equality is positional: `[a, b] != [b, a]` when `a != b`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DescriptionCollection(Vec<Description>);

impl DescriptionCollection {
    /// Collect descriptions in the given order.
    pub fn new(descriptions: impl IntoIterator<Item = Description>) -> Self {
        Self(descriptions.into_iter().collect())
    }

    /// A collection with no descriptions.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of descriptions.
    pub fn count(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no descriptions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, Description> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a DescriptionCollection {
    type Item = &'a Description;
    type IntoIter = std::slice::Iter<'a, Description>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Description> for DescriptionCollection {
    fn from_iter<T: IntoIterator<Item = Description>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl std::fmt::Display for DescriptionCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DescriptionCollection(count: {})", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::{AnyUri, MetadataNamespace, MetadataNamespaceCollection, MetadataRootTag};
    use serde_json::json;

    fn format(tag: &str) -> DescriptionFormat {
        DescriptionFormat::new(
            MetadataNamespaceCollection::new([MetadataNamespace::parse(
                tag,
                "http://www.openarchives.org/OAI/2.0/",
            )
            .unwrap()]),
            AnyUri::new("http://www.openarchives.org/OAI/2.0/oai-identifier.xsd").unwrap(),
            MetadataRootTag::new(tag).unwrap(),
        )
    }

    fn payload(value: serde_json::Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn description(tag: &str) -> Description {
        Description::new(format(tag), payload(json!({ "repositoryIdentifier": tag })))
    }

    #[test]
    fn description_accessors() {
        let d = description("oai-identifier");
        assert_eq!(d.format().root_tag().as_str(), "oai-identifier");
        assert_eq!(d.data()["repositoryIdentifier"], "oai-identifier");
    }

    #[test]
    fn description_equality_includes_payload() {
        let a = Description::new(format("friends"), payload(json!({ "baseURL": ["a"] })));
        let b = Description::new(format("friends"), payload(json!({ "baseURL": ["b"] })));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn collection_equality_is_order_sensitive() {
        let a = description("oai-identifier");
        let b = description("friends");
        let ab = DescriptionCollection::new([a.clone(), b.clone()]);
        let ba = DescriptionCollection::new([b, a]);
        assert_ne!(ab, ba);
        assert_eq!(ab, ab.clone());
    }

    #[test]
    fn empty_collections_are_equal() {
        assert_eq!(
            DescriptionCollection::new(Vec::<Description>::new()),
            DescriptionCollection::empty()
        );
        assert_eq!(DescriptionCollection::default().count(), 0);
        assert!(DescriptionCollection::empty().is_empty());
    }

    #[test]
    fn collection_length_mismatch_not_equal() {
        let a = description("oai-identifier");
        assert_ne!(
            DescriptionCollection::new([a.clone()]),
            DescriptionCollection::new([a.clone(), a])
        );
    }

    #[test]
    fn collection_iterates_in_order() {
        let c: DescriptionCollection =
            ["a", "b", "c"].into_iter().map(description).collect();
        let tags: Vec<&str> = c.iter().map(|d| d.format().root_tag().as_str()).collect();
        assert_eq!(tags, ["a", "b", "c"]);
        assert_eq!(c.count(), 3);
        assert_eq!(c.to_string(), "DescriptionCollection(count: 3)");
    }

    #[test]
    fn description_serde_defaults_payload() {
        let d: Description = serde_json::from_value(json!({
            "format": {
                "schema": "http://www.openarchives.org/OAI/2.0/oai-identifier.xsd",
                "root_tag": "oai-identifier"
            }
        }))
        .unwrap();
        assert!(d.data().is_empty());
        assert!(d.format().namespaces().is_empty());
    }
}
