//! # oaipmh CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use oaipmh_cli::check::{run_check, CheckArgs};
use oaipmh_cli::identify::{run_identify, IdentifyArgs};

/// OAI-PMH 2.0 value model tools.
///
/// Validates Identify configuration documents and individual protocol
/// values with the same rules a repository applies at construction time.
#[derive(Parser, Debug)]
#[command(name = "oaipmh", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load and validate an Identify configuration document.
    Identify(IdentifyArgs),

    /// Validate a single protocol value.
    Check(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "oaipmh CLI starting");

    let result = match cli.command {
        Commands::Identify(args) => run_identify(&args),
        Commands::Check(args) => run_check(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oaipmh_cli::check::ValueKind;
    use oaipmh_core::Granularity;
    use std::path::PathBuf;

    #[test]
    fn cli_parse_identify() {
        let cli = Cli::try_parse_from(["oaipmh", "identify", "repository.yaml"]).unwrap();
        if let Commands::Identify(args) = cli.command {
            assert_eq!(args.path, PathBuf::from("repository.yaml"));
            assert!(!args.json);
        } else {
            panic!("expected identify");
        }
    }

    #[test]
    fn cli_parse_identify_json() {
        let cli =
            Cli::try_parse_from(["oaipmh", "identify", "repository.json", "--json"]).unwrap();
        if let Commands::Identify(args) = cli.command {
            assert!(args.json);
        }
    }

    #[test]
    fn cli_parse_check_defaults_to_date_granularity() {
        let cli = Cli::try_parse_from(["oaipmh", "check", "set-spec", "math:algebra"]).unwrap();
        if let Commands::Check(args) = cli.command {
            assert_eq!(args.kind, ValueKind::SetSpec);
            assert_eq!(args.value, "math:algebra");
            assert_eq!(args.granularity, Granularity::Date);
        } else {
            panic!("expected check");
        }
    }

    #[test]
    fn cli_parse_check_with_granularity() {
        let cli = Cli::try_parse_from([
            "oaipmh",
            "check",
            "datestamp",
            "2024-06-10T12:00:00Z",
            "--granularity",
            "YYYY-MM-DDThh:mm:ssZ",
        ])
        .unwrap();
        if let Commands::Check(args) = cli.command {
            assert_eq!(args.kind, ValueKind::Datestamp);
            assert_eq!(args.granularity, Granularity::DateTime);
        }
    }

    #[test]
    fn cli_parse_check_rejects_unknown_granularity() {
        let result = Cli::try_parse_from([
            "oaipmh",
            "check",
            "datestamp",
            "2024-06-10",
            "--granularity",
            "YYYY",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parse_check_rejects_unknown_kind() {
        assert!(Cli::try_parse_from(["oaipmh", "check", "colour", "red"]).is_err());
    }

    #[test]
    fn cli_parse_verbose_levels() {
        let cli0 = Cli::try_parse_from(["oaipmh", "check", "verb", "Identify"]).unwrap();
        assert_eq!(cli0.verbose, 0);

        let cli2 = Cli::try_parse_from(["oaipmh", "-vv", "check", "verb", "Identify"]).unwrap();
        assert_eq!(cli2.verbose, 2);

        let cli3 = Cli::try_parse_from(["oaipmh", "check", "verb", "Identify", "-vvv"]).unwrap();
        assert_eq!(cli3.verbose, 3);
    }

    #[test]
    fn cli_parse_no_subcommand_errors() {
        assert!(Cli::try_parse_from(["oaipmh"]).is_err());
    }
}
