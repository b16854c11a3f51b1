//! # phonenorm CLI entry point
//!
//! Parses command-line arguments, builds the engine from the global
//! registry and fallback flags, and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use phonenorm_cli::batch::{run_batch, BatchArgs};
use phonenorm_cli::check::{run_check, CheckArgs};
use phonenorm_cli::countries::{run_countries, CountriesArgs};
use phonenorm_cli::format::{run_format, FormatArgs};
use phonenorm_cli::normalize::{run_normalize, NormalizeArgs};
use phonenorm_cli::{fallback_policy, load_registry, EXIT_ERROR};
use phonenorm_core::{Normalizer, RealtimeValidator, DEFAULT_COUNTRY};

/// Phone number normalization toolchain.
///
/// Converts user-typed phone numbers into canonical E.164 form, reports
/// realtime validation state for partial input, and renders numbers for
/// display.
#[derive(Parser, Debug)]
#[command(name = "phonenorm", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Country table to use instead of the built-in one (YAML or JSON).
    #[arg(long, global = true)]
    registry: Option<PathBuf>,

    /// Country substituted when a hint is not in the registry.
    #[arg(long, global = true, default_value = DEFAULT_COUNTRY)]
    default_country: String,

    /// Reject unknown country hints instead of falling back.
    #[arg(long, global = true, conflicts_with = "default_country")]
    no_fallback: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Normalize one phone number to E.164.
    Normalize(NormalizeArgs),

    /// Report the realtime validation state of (possibly partial) input.
    Check(CheckArgs),

    /// Render a canonical E.164 number for display.
    Format(FormatArgs),

    /// List supported countries.
    Countries(CountriesArgs),

    /// Normalize a file of phone numbers, one per line.
    Batch(BatchArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("phonenorm CLI v{} starting", env!("CARGO_PKG_VERSION"));

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<u8> {
    let registry = load_registry(cli.registry.as_deref())?;
    let policy = fallback_policy(&registry, &cli.default_country, cli.no_fallback)?;
    let normalizer = Normalizer::new(&registry).with_fallback(policy);

    match cli.command {
        Commands::Normalize(args) => run_normalize(&args, &normalizer),
        Commands::Check(args) => run_check(&args, &RealtimeValidator::new(normalizer)),
        Commands::Format(args) => run_format(&args, &registry),
        Commands::Countries(args) => run_countries(&args, &registry),
        Commands::Batch(args) => run_batch(&args, &normalizer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_normalize() {
        let cli = Cli::try_parse_from([
            "phonenorm",
            "normalize",
            "+351 912 345 678",
            "--country",
            "PT",
        ])
        .unwrap();
        assert_eq!(cli.default_country, DEFAULT_COUNTRY);
        assert!(!cli.no_fallback);
        if let Commands::Normalize(args) = cli.command {
            assert_eq!(args.input, "+351 912 345 678");
            assert_eq!(args.country, "PT");
            assert!(args.expect.is_none());
            assert!(!args.json);
        } else {
            panic!("expected normalize");
        }
    }

    #[test]
    fn cli_parse_normalize_expect_json() {
        let cli = Cli::try_parse_from([
            "phonenorm", "normalize", "0912345678", "-c", "PT", "--expect", "PT", "--json",
        ])
        .unwrap();
        if let Commands::Normalize(args) = cli.command {
            assert_eq!(args.expect.as_deref(), Some("PT"));
            assert!(args.json);
        } else {
            panic!("expected normalize");
        }
    }

    #[test]
    fn cli_parse_check_strict() {
        let cli =
            Cli::try_parse_from(["phonenorm", "check", "9123", "--country", "PT", "--strict"])
                .unwrap();
        if let Commands::Check(args) = cli.command {
            assert!(args.strict);
            assert!(!args.json);
        } else {
            panic!("expected check");
        }
    }

    #[test]
    fn cli_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "phonenorm",
            "countries",
            "--registry",
            "countries.yaml",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.registry, Some(PathBuf::from("countries.yaml")));
        assert!(matches!(cli.command, Commands::Countries(_)));
    }

    #[test]
    fn cli_parse_no_fallback() {
        let cli = Cli::try_parse_from(["phonenorm", "--no-fallback", "format", "+351912345678"])
            .unwrap();
        assert!(cli.no_fallback);
        if let Commands::Format(args) = cli.command {
            assert_eq!(args.e164, "+351912345678");
        } else {
            panic!("expected format");
        }
    }

    #[test]
    fn cli_rejects_conflicting_fallback_flags() {
        let result = Cli::try_parse_from([
            "phonenorm",
            "--no-fallback",
            "--default-country",
            "ES",
            "countries",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_requires_country_for_normalize() {
        assert!(Cli::try_parse_from(["phonenorm", "normalize", "912345678"]).is_err());
    }

    #[test]
    fn cli_parse_batch() {
        let cli =
            Cli::try_parse_from(["phonenorm", "batch", "numbers.txt", "-c", "ES", "--json"])
                .unwrap();
        if let Commands::Batch(args) = cli.command {
            assert_eq!(args.file, PathBuf::from("numbers.txt"));
            assert_eq!(args.country, "ES");
            assert!(args.json);
        } else {
            panic!("expected batch");
        }
    }

    #[test]
    fn run_rejects_unknown_default_country() {
        let cli =
            Cli::try_parse_from(["phonenorm", "--default-country", "ZZ", "countries"]).unwrap();
        assert!(run(cli).is_err());
    }

    #[test]
    fn run_dispatches_normalize() {
        let cli = Cli::try_parse_from(["phonenorm", "normalize", "912345678", "-c", "PT"])
            .unwrap();
        assert_eq!(run(cli).unwrap(), phonenorm_cli::EXIT_OK);
    }
}
