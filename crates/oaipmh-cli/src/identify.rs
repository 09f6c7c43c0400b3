//! # Identify Subcommand
//!
//! Loads an Identify configuration document (YAML or JSON) into a
//! [`RepositoryIdentity`] and prints a summary of what a harvester would
//! see in the `Identify` response.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use oaipmh_core::RepositoryIdentity;

/// Arguments for the identify subcommand.
#[derive(Args, Debug)]
pub struct IdentifyArgs {
    /// Path to the Identify configuration document (.yaml, .yml or .json).
    pub path: PathBuf,

    /// Print the validated identity as JSON instead of a summary.
    #[arg(long)]
    pub json: bool,
}

/// Execute the identify subcommand.
pub fn run_identify(args: &IdentifyArgs) -> Result<u8> {
    let (format, content) = crate::read_document(&args.path)?;

    let identity: RepositoryIdentity = match crate::decode_document(format, &content) {
        Ok(identity) => identity,
        Err(e) => {
            tracing::info!(path = %args.path.display(), "identity document rejected");
            println!("FAIL: {}: {e:#}", args.path.display());
            return Ok(1);
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&identity)?);
    } else {
        print!("{}", summary(&identity));
    }
    Ok(0)
}

/// Human-readable summary of an identity, one field per line.
pub fn summary(identity: &RepositoryIdentity) -> String {
    let admins: Vec<&str> = identity.admin_emails().iter().map(|e| e.as_str()).collect();
    let mut out = format!("OK: {}\n", identity.repository_name().as_str());
    out.push_str(&format!("  Base URL:           {}\n", identity.base_url().as_str()));
    out.push_str(&format!(
        "  Protocol version:   {}\n",
        identity.protocol_version().as_str()
    ));
    out.push_str(&format!("  Admin emails:       {}\n", admins.join(", ")));
    out.push_str(&format!(
        "  Earliest datestamp: {}\n",
        identity.earliest_datestamp().as_str()
    ));
    out.push_str(&format!(
        "  Deleted records:    {}\n",
        identity.deleted_record().as_str()
    ));
    out.push_str(&format!(
        "  Granularity:        {}\n",
        identity.granularity().as_str()
    ));
    out.push_str(&format!(
        "  Descriptions:       {}\n",
        identity.descriptions().count()
    ));
    for description in identity.descriptions() {
        out.push_str(&format!(
            "    - {} ({})\n",
            description.format().root_tag().as_str(),
            description.format().schema().as_str()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
repository_name: Example Archive
base_url: https://example.org/oai
protocol_version: "2.0"
admin_emails: [admin@example.org, ops@example.org]
earliest_datestamp:
  datestamp: "2001-01-01T00:00:00Z"
  granularity: YYYY-MM-DDThh:mm:ssZ
deleted_record: persistent
granularity: YYYY-MM-DDThh:mm:ssZ
descriptions:
  - format:
      schema: http://www.openarchives.org/OAI/2.0/friends.xsd
      root_tag: friends
    data:
      baseURL:
        - https://peer.example.org/oai
"#;

    fn write(name: &str, content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn valid_yaml_document_exits_zero() {
        let (_dir, path) = write("identity.yaml", VALID);
        let code = run_identify(&IdentifyArgs { path, json: false }).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn valid_json_document_exits_zero() {
        let value: serde_json::Value = serde_yaml::from_str(VALID).unwrap();
        let (_dir, path) = write("identity.json", &value.to_string());
        let code = run_identify(&IdentifyArgs { path, json: true }).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn rejected_document_exits_one() {
        let invalid = VALID.replace("https://example.org/oai", "ftp://example.org/oai");
        let (_dir, path) = write("identity.yaml", &invalid);
        let code = run_identify(&IdentifyArgs { path, json: false }).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn mismatched_datestamp_exits_one() {
        let invalid = VALID.replace("2001-01-01T00:00:00Z", "2001-01-01");
        let (_dir, path) = write("identity.yaml", &invalid);
        let code = run_identify(&IdentifyArgs { path, json: false }).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = IdentifyArgs {
            path: dir.path().join("absent.yaml"),
            json: false,
        };
        assert!(run_identify(&args).is_err());
    }

    #[test]
    fn summary_lists_fields_and_descriptions() {
        let identity: RepositoryIdentity = serde_yaml::from_str(VALID).unwrap();
        let text = summary(&identity);
        assert!(text.starts_with("OK: Example Archive\n"));
        assert!(text.contains("admin@example.org, ops@example.org"));
        assert!(text.contains("Deleted records:    persistent"));
        assert!(text.contains("Descriptions:       1"));
        assert!(text.contains("- friends (http://www.openarchives.org/OAI/2.0/friends.xsd)"));
    }
}
