//! # Format Subcommand
//!
//! Renders a canonical E.164 number for display.

use anyhow::Result;
use clap::Args;

use phonenorm_core::{format_e164, CountryRegistry};

use crate::{EXIT_OK, EXIT_REJECTED};

/// Arguments for the format subcommand.
#[derive(Args, Debug)]
pub struct FormatArgs {
    /// Canonical number, e.g. `+351912345678`.
    pub e164: String,
}

/// Execute the format subcommand.
pub fn run_format(args: &FormatArgs, registry: &CountryRegistry) -> Result<u8> {
    match format_e164(registry, &args.e164) {
        Some(display) => {
            println!("{display}");
            Ok(EXIT_OK)
        }
        None => {
            tracing::warn!(input = %args.e164, "not a canonical number with a known calling code");
            Ok(EXIT_REJECTED)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_known_and_rejects_unknown() {
        let registry = CountryRegistry::builtin();
        let ok = FormatArgs {
            e164: "+351912345678".to_string(),
        };
        assert_eq!(run_format(&ok, registry).unwrap(), EXIT_OK);
        let bad = FormatArgs {
            e164: "0912345678".to_string(),
        };
        assert_eq!(run_format(&bad, registry).unwrap(), EXIT_REJECTED);
    }
}
