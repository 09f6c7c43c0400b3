//! # Administrator Contacts
//!
//! [`Email`] addresses of repository administrators (`adminEmail`) and the
//! [`EmailCollection`] an Identify response carries. The protocol requires
//! at least one address; the collection also refuses repeats.

use serde::{Deserialize, Serialize};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;
use crate::macros::{
    impl_from_str, impl_validating_deserialize, impl_value_display, is_blank, matches, Pattern,
};

/// RFC 5322 `addr-spec` restricted to a dot-atom local part and a DNS
/// domain of at least two labels.
static EMAIL: Pattern = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$",
    )
    .ok()
});

const MAX_LOCAL_PART: usize = 64;
const MAX_ADDRESS: usize = 254;

/// An administrator e-mail address.
///
/// # Validation
///
/// - Must be non-empty
/// - Local part: dot-atom of RFC 5322 `atext`, at most 64 octets
/// - Domain: dot-separated DNS labels (letters, digits, inner hyphens)
/// - Whole address at most 254 octets
///
/// The address is stored exactly as given; equality is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Email(String);

impl_validating_deserialize!(Email);
impl_value_display!(Email, "email");
impl_from_str!(Email);

impl Email {
    /// Create an e-mail address, validating its format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Empty`] for blank input and
    /// [`ValidationError::InvalidFormat`] for anything that is not an
    /// addr-spec.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if is_blank(&s) {
            return Err(ValidationError::Empty { type_name: "Email" });
        }

        let local_len = s.rfind('@').unwrap_or(s.len());
        if s.len() > MAX_ADDRESS || local_len > MAX_LOCAL_PART || !matches(&EMAIL, &s) {
            return Err(ValidationError::InvalidFormat {
                type_name: "Email",
                value: s,
                expected: "an RFC 5322 address such as admin@example.org",
            });
        }

        Ok(Self(s))
    }

    /// Access the address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part after the `@`.
    pub fn domain(&self) -> &str {
        self.0.rsplit('@').next().unwrap_or_default()
    }
}

/// The administrator addresses of a repository.
///
/// # Invariants
///
/// - At least one address
/// - No address appears twice (by value)
///
/// Insertion order is kept for iteration, but equality ignores it:
/// `[a, b] == [b, a]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Email>", into = "Vec<Email>")]
pub struct EmailCollection {
    emails: Vec<Email>,
}

impl EmailCollection {
    /// Build a collection from one or more distinct addresses.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::EmptyCollection`] if no address is given.
    /// - [`ValidationError::Duplicate`] on the first repeated address.
    pub fn new(emails: impl IntoIterator<Item = Email>) -> Result<Self, ValidationError> {
        let mut accepted: Vec<Email> = Vec::new();
        for email in emails {
            if accepted.contains(&email) {
                return Err(ValidationError::Duplicate {
                    type_name: "Email",
                    value: email.0,
                });
            }
            accepted.push(email);
        }

        if accepted.is_empty() {
            return Err(ValidationError::EmptyCollection {
                type_name: "EmailCollection",
            });
        }

        Ok(Self { emails: accepted })
    }

    /// Build a collection from raw address strings, failing on the first
    /// invalid one.
    pub fn parse<I, S>(values: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let emails = values
            .into_iter()
            .map(Email::new)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(emails)
    }

    /// Number of addresses (always at least one).
    pub fn len(&self) -> usize {
        self.emails.len()
    }

    /// Always false; kept for API symmetry with other collections.
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    /// The first address given, which is never absent.
    pub fn primary(&self) -> &Email {
        &self.emails[0]
    }

    /// Returns true if the address is present.
    pub fn contains(&self, email: &Email) -> bool {
        self.emails.contains(email)
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Email> {
        self.emails.iter()
    }

    fn sorted(&self) -> Vec<&Email> {
        let mut sorted: Vec<&Email> = self.emails.iter().collect();
        sorted.sort();
        sorted
    }
}

impl PartialEq for EmailCollection {
    fn eq(&self, other: &Self) -> bool {
        self.emails.len() == other.emails.len() && self.sorted() == other.sorted()
    }
}

impl Eq for EmailCollection {}

impl std::hash::Hash for EmailCollection {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.sorted().hash(state);
    }
}

impl<'a> IntoIterator for &'a EmailCollection {
    type Item = &'a Email;
    type IntoIter = std::slice::Iter<'a, Email>;

    fn into_iter(self) -> Self::IntoIter {
        self.emails.iter()
    }
}

impl TryFrom<Vec<Email>> for EmailCollection {
    type Error = ValidationError;

    fn try_from(emails: Vec<Email>) -> Result<Self, Self::Error> {
        Self::new(emails)
    }
}

impl From<EmailCollection> for Vec<Email> {
    fn from(collection: EmailCollection) -> Self {
        collection.emails
    }
}

impl std::fmt::Display for EmailCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .emails
            .iter()
            .map(Email::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "EmailCollection(emails: [{joined}])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationRule;

    fn email(s: &str) -> Email {
        Email::new(s).unwrap()
    }

    // -- Email --

    #[test]
    fn email_valid_examples() {
        assert!(Email::new("admin@example.org").is_ok());
        assert!(Email::new("first.last+oai@sub.example.co.uk").is_ok());
        assert!(Email::new("o'reilly@example.org").is_ok());
        assert!(Email::new("x@a-b.example").is_ok());
    }

    #[test]
    fn email_accessors() {
        let e = email("admin@example.org");
        assert_eq!(e.as_str(), "admin@example.org");
        assert_eq!(e.domain(), "example.org");
        assert_eq!(e.to_string(), "Email(email: admin@example.org)");
    }

    #[test]
    fn email_rejects_invalid() {
        assert_eq!(Email::new("").unwrap_err().rule(), ValidationRule::Empty);
        for bad in [
            "admin",
            "admin@",
            "@example.org",
            "admin@@example.org",
            "admin@localhost",
            ".admin@example.org",
            "admin.@example.org",
            "ad..min@example.org",
            "admin@-example.org",
            "admin@example-.org",
            "admin @example.org",
            "admin@exa_mple.org",
        ] {
            let err = Email::new(bad).unwrap_err();
            assert_eq!(err.rule(), ValidationRule::Format, "accepted {bad:?}");
        }
    }

    #[test]
    fn email_length_limits() {
        let local = "a".repeat(65);
        assert!(Email::new(format!("{local}@example.org")).is_err());
        let local = "a".repeat(64);
        assert!(Email::new(format!("{local}@example.org")).is_ok());
        let label = "b".repeat(60);
        let long = format!("a@{label}.{label}.{label}.{label}.{label}.org");
        assert!(long.len() > 254);
        assert!(Email::new(long).is_err());
    }

    // -- EmailCollection --

    #[test]
    fn collection_rejects_empty() {
        let err = EmailCollection::new(Vec::new()).unwrap_err();
        assert_eq!(err.rule(), ValidationRule::Cardinality);
    }

    #[test]
    fn collection_rejects_duplicates_by_value() {
        let err = EmailCollection::new(vec![
            email("a@example.org"),
            email("b@example.org"),
            email("a@example.org"),
        ])
        .unwrap_err();
        assert_eq!(err.rule(), ValidationRule::Duplicate);
        assert!(format!("{err}").contains("a@example.org"));
    }

    #[test]
    fn collection_equality_ignores_order() {
        let ab = EmailCollection::parse(["a@example.org", "b@example.org"]).unwrap();
        let ba = EmailCollection::parse(["b@example.org", "a@example.org"]).unwrap();
        assert_eq!(ab, ba);
        let a = EmailCollection::parse(["a@example.org"]).unwrap();
        assert_ne!(ab, a);
    }

    #[test]
    fn collection_keeps_insertion_order() {
        let c = EmailCollection::parse(["b@example.org", "a@example.org"]).unwrap();
        let order: Vec<&str> = c.iter().map(Email::as_str).collect();
        assert_eq!(order, ["b@example.org", "a@example.org"]);
        assert_eq!(c.primary().as_str(), "b@example.org");
        assert_eq!(c.len(), 2);
        assert!(!c.is_empty());
        assert!(c.contains(&email("a@example.org")));
    }

    #[test]
    fn collection_parse_fails_on_invalid_member() {
        let err = EmailCollection::parse(["a@example.org", "nope"]).unwrap_err();
        assert_eq!(err.rule(), ValidationRule::Format);
    }

    #[test]
    fn collection_hash_ignores_order() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(EmailCollection::parse(["a@example.org", "b@example.org"]).unwrap());
        set.insert(EmailCollection::parse(["b@example.org", "a@example.org"]).unwrap());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn collection_serde_validates() {
        let c = EmailCollection::parse(["a@example.org"]).unwrap();
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "[\"a@example.org\"]");
        let back: EmailCollection = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
        assert!(serde_json::from_str::<EmailCollection>("[]").is_err());
        assert!(
            serde_json::from_str::<EmailCollection>("[\"a@example.org\",\"a@example.org\"]")
                .is_err()
        );
    }

    #[test]
    fn collection_display_lists_members() {
        let c = EmailCollection::parse(["a@example.org", "b@example.org"]).unwrap();
        assert_eq!(
            c.to_string(),
            "EmailCollection(emails: [a@example.org, b@example.org])"
        );
    }
}
