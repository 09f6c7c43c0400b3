//! # Check Subcommand
//!
//! Validates one protocol value through its `oaipmh-core` constructor and
//! prints either the value's diagnostic form or the rejected rule.

use anyhow::Result;
use clap::{Args, ValueEnum};

use oaipmh_core::{
    AnyUri, BaseUrl, DeletedRecord, Email, Granularity, MetadataPrefix, MetadataRootTag,
    NamespacePrefix, OaiVerb, ProtocolVersion, RecordIdentifier, RepositoryName, SetSpec,
    UtcDateTime, ValidationError,
};

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Kind of value to validate.
    pub kind: ValueKind,

    /// The raw value.
    pub value: String,

    /// Granularity a datestamp is validated against.
    #[arg(long, default_value = "YYYY-MM-DD")]
    pub granularity: Granularity,
}

/// Protocol value kinds accepted by `oaipmh check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValueKind {
    RepositoryName,
    BaseUrl,
    Email,
    ProtocolVersion,
    DeletedRecord,
    Granularity,
    Datestamp,
    Identifier,
    SetSpec,
    MetadataPrefix,
    NamespacePrefix,
    AnyUri,
    RootTag,
    Verb,
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    match check_value(args.kind, &args.value, args.granularity) {
        Ok(rendered) => {
            println!("OK: {rendered}");
            Ok(0)
        }
        Err(e) => {
            tracing::debug!(kind = ?args.kind, rule = ?e.rule(), "value rejected");
            println!("FAIL: {e} (rule: {:?})", e.rule());
            Ok(1)
        }
    }
}

/// Validate `value` as `kind` and return its diagnostic form.
pub fn check_value(
    kind: ValueKind,
    value: &str,
    granularity: Granularity,
) -> Result<String, ValidationError> {
    let rendered = match kind {
        ValueKind::RepositoryName => RepositoryName::new(value)?.to_string(),
        ValueKind::BaseUrl => BaseUrl::new(value)?.to_string(),
        ValueKind::Email => Email::new(value)?.to_string(),
        ValueKind::ProtocolVersion => ProtocolVersion::new(value)?.to_string(),
        ValueKind::DeletedRecord => DeletedRecord::new(value)?.to_string(),
        ValueKind::Granularity => Granularity::new(value)?.to_string(),
        ValueKind::Datestamp => UtcDateTime::new(value, granularity)?.to_string(),
        ValueKind::Identifier => RecordIdentifier::new(value)?.to_string(),
        ValueKind::SetSpec => SetSpec::new(value)?.to_string(),
        ValueKind::MetadataPrefix => MetadataPrefix::new(value)?.to_string(),
        ValueKind::NamespacePrefix => NamespacePrefix::new(value)?.to_string(),
        ValueKind::AnyUri => AnyUri::new(value)?.to_string(),
        ValueKind::RootTag => MetadataRootTag::new(value)?.to_string(),
        ValueKind::Verb => OaiVerb::new(value)?.to_string(),
    };
    Ok(rendered)
}
