//! # oaipmh-cli — CLI Tool for the OAI-PMH Value Model
//!
//! Provides the `oaipmh` command-line interface. The binary holds no domain
//! logic: every rule is enforced by `oaipmh-core` constructors, and the CLI
//! only loads input and reports the outcome.
//!
//! ## Subcommands
//!
//! - `oaipmh identify`: Load and validate an Identify configuration document.
//! - `oaipmh check`: Validate a single protocol value.
//!
//! ```bash
//! oaipmh identify repository.yaml
//! oaipmh check set-spec math:algebra
//! oaipmh check datestamp 2024-06-10T12:00:00Z --granularity YYYY-MM-DDThh:mm:ssZ
//! ```
//!
//! Handlers return `Ok(0)` when the input is valid and `Ok(1)` when it was
//! read but rejected. I/O failures surface as errors.

pub mod check;
pub mod identify;

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;

/// Document formats accepted by [`load_document`], chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Pick the format from the file extension (`.yaml`, `.yml`, `.json`).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => bail!(
                "unsupported document extension: {} (expected .yaml, .yml or .json)",
                path.display()
            ),
        }
    }
}

/// Read `path` and decode it as `T`.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let (format, content) = read_document(path)?;
    decode_document(format, &content)
        .with_context(|| format!("invalid document {}", path.display()))
}

/// Read `path`, picking its format from the extension.
pub fn read_document(path: &Path) -> Result<(DocumentFormat, String)> {
    let format = DocumentFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    tracing::debug!(path = %path.display(), ?format, bytes = content.len(), "read document");
    Ok((format, content))
}

/// Decode `content` as `T`. Decode failures carry the validation message of
/// the offending field.
pub fn decode_document<T: DeserializeOwned>(format: DocumentFormat, content: &str) -> Result<T> {
    let value = match format {
        DocumentFormat::Yaml => serde_yaml::from_str(content)?,
        DocumentFormat::Json => serde_json::from_str(content)?,
    };
    Ok(value)
}
