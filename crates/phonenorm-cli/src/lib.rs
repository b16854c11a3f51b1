//! # phonenorm-cli — Command-Line Front End
//!
//! Provides the `phonenorm` binary over `phonenorm-core`.
//!
//! ## Subcommands
//!
//! - `phonenorm normalize` — canonical E.164 form of one input.
//! - `phonenorm check` — realtime feedback state for partial input.
//! - `phonenorm format` — display rendering of a canonical number.
//! - `phonenorm countries` — list the active country registry.
//! - `phonenorm batch` — normalize a file of inputs, one per line.
//!
//! ```bash
//! phonenorm normalize "+351 912 345 678" --country PT
//! phonenorm check "91234" --country PT --json
//! phonenorm --registry countries.yaml countries
//! phonenorm --no-fallback batch numbers.txt --country ES
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers here take parsed
//!   arguments and an engine, and return an exit code.
//! - Rendering is split from printing so output can be tested.
//! - Logs go to stderr; stdout carries only command output.

pub mod batch;
pub mod check;
pub mod countries;
pub mod format;
pub mod normalize;

use std::borrow::Cow;
use std::path::Path;

use anyhow::{Context, Result};

use phonenorm_core::{Alpha2, CountryRegistry, FallbackPolicy};

/// Exit code for success.
pub const EXIT_OK: u8 = 0;

/// Exit code for an operational error (bad flags, unreadable files).
pub const EXIT_ERROR: u8 = 1;

/// Exit code when input was processed but rejected.
pub const EXIT_REJECTED: u8 = 2;

/// Load the registry named by `--registry`, or borrow the built-in table.
pub fn load_registry(path: Option<&Path>) -> Result<Cow<'static, CountryRegistry>> {
    match path {
        Some(path) => {
            let registry = CountryRegistry::load(path)
                .with_context(|| format!("failed to load registry: {}", path.display()))?;
            tracing::info!(
                path = %path.display(),
                countries = registry.len(),
                "using custom country registry"
            );
            Ok(Cow::Owned(registry))
        }
        None => Ok(Cow::Borrowed(CountryRegistry::builtin())),
    }
}

/// Build the fallback policy from `--default-country` / `--no-fallback`.
///
/// The default country must exist in `registry`; a fallback that cannot
/// resolve is reported up front instead of on every input.
pub fn fallback_policy(
    registry: &CountryRegistry,
    default_country: &str,
    no_fallback: bool,
) -> Result<FallbackPolicy> {
    if no_fallback {
        return Ok(FallbackPolicy::Reject);
    }
    let code: Alpha2 = default_country
        .parse()
        .with_context(|| format!("invalid --default-country {default_country:?}"))?;
    if registry.get(&code).is_none() {
        anyhow::bail!("default country {code} is not in the active registry");
    }
    Ok(FallbackPolicy::DefaultCountry(code))
}
