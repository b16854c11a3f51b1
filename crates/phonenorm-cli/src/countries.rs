//! # Countries Subcommand
//!
//! Lists the active registry, either built-in or loaded via `--registry`.

use std::collections::BTreeMap;

use anyhow::Result;
use clap::Args;

use phonenorm_core::{CountryCallingCode, CountryRegistry};

use crate::EXIT_OK;

/// Arguments for the countries subcommand.
#[derive(Args, Debug)]
pub struct CountriesArgs {
    /// Emit the registry as JSON, keyed by alpha-2.
    #[arg(long)]
    pub json: bool,
}

/// Execute the countries subcommand.
pub fn run_countries(args: &CountriesArgs, registry: &CountryRegistry) -> Result<u8> {
    println!("{}", render(registry, args.json)?);
    Ok(EXIT_OK)
}

/// Render the registry as an aligned table or as JSON. The JSON form is
/// accepted back by `--registry`.
pub fn render(registry: &CountryRegistry, json: bool) -> Result<String> {
    if json {
        let map: BTreeMap<&str, &CountryCallingCode> = registry
            .iter()
            .map(|c| (c.alpha2.as_str(), c))
            .collect();
        return Ok(serde_json::to_string_pretty(&map)?);
    }

    let mut out = String::from("Supported countries:\n\n");
    for c in registry.iter() {
        let lengths = if c.min_national_length == c.max_national_length {
            c.min_national_length.to_string()
        } else {
            format!("{}-{}", c.min_national_length, c.max_national_length)
        };
        out.push_str(&format!(
            "  {:<3} {:<4} {:<5} {:<6} {}\n",
            c.alpha2,
            c.alpha3,
            c.calling_code,
            lengths,
            c.name
        ));
    }
    out.push_str(&format!("\nTotal: {} countries", registry.len()));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_every_country() {
        let registry = CountryRegistry::builtin();
        let text = render(registry, false).unwrap();
        assert!(text.contains("PT  PRT  +351  9      Portugal"));
        assert!(text.contains("DE  DEU  +49   7-11   Germany"));
        assert!(text.ends_with(&format!("Total: {} countries", registry.len())));
    }

    #[test]
    fn json_round_trips_through_registry_loader() {
        let registry = CountryRegistry::builtin();
        let json = render(registry, true).unwrap();
        let reloaded = CountryRegistry::from_json_str(&json).unwrap();
        assert_eq!(reloaded.len(), registry.len());
        assert_eq!(
            reloaded.by_alpha2("BR").unwrap(),
            registry.by_alpha2("BR").unwrap()
        );
    }
}
