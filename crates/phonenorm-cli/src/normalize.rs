//! # Normalize Subcommand
//!
//! Produces the authoritative canonical value for one input.
//!
//! ```bash
//! phonenorm normalize "0912345678" --country PT
//! phonenorm normalize "+34 612 345 678" --country PT --expect PT --json
//! ```

use anyhow::Result;
use clap::Args;

use phonenorm_core::{
    format_normalized, NormalizationOutcome, NormalizationResult, Normalizer,
};

use crate::{EXIT_OK, EXIT_REJECTED};

/// Arguments for the normalize subcommand.
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Phone number as typed by the user.
    pub input: String,

    /// Country hint (ISO 3166-1 alpha-2).
    #[arg(short, long)]
    pub country: String,

    /// Fail with COUNTRY_MISMATCH unless the number resolves to this country.
    #[arg(long)]
    pub expect: Option<String>,

    /// Emit the result as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the normalize subcommand.
pub fn run_normalize(args: &NormalizeArgs, normalizer: &Normalizer<'_>) -> Result<u8> {
    let result = match &args.expect {
        Some(expected) => {
            normalizer.normalize_expecting(Some(&args.input), &args.country, expected)
        }
        None => normalizer.normalize(Some(&args.input), &args.country),
    };

    match &result {
        Ok(phone) => tracing::debug!(e164 = %phone, "normalized"),
        Err(e) => tracing::info!(code = %e.code(), "rejected: {e}"),
    }

    println!("{}", render(&result, args.json)?);
    Ok(if result.is_ok() { EXIT_OK } else { EXIT_REJECTED })
}

/// Render a result as text or JSON.
pub fn render(result: &NormalizationResult, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(&NormalizationOutcome::from(
            result,
        ))?);
    }
    Ok(match result {
        Ok(phone) => format!(
            "e164:     {}\ncountry:  {}\ncode:     {}\nnational: {}\ndisplay:  {}",
            phone.e164(),
            phone.phone_country_code(),
            phone.phone_code(),
            phone.contact_number(),
            format_normalized(phone),
        ),
        Err(e) => format!("{}: {e}", e.code()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(input: &str, country: &str) -> NormalizeArgs {
        NormalizeArgs {
            input: input.to_string(),
            country: country.to_string(),
            expect: None,
            json: false,
        }
    }

    #[test]
    fn exit_codes() {
        let normalizer = Normalizer::builtin();
        assert_eq!(run_normalize(&args("0912345678", "PT"), &normalizer).unwrap(), EXIT_OK);
        assert_eq!(run_normalize(&args("12345", "PT"), &normalizer).unwrap(), EXIT_REJECTED);
    }

    #[test]
    fn expect_flag_produces_mismatch() {
        let normalizer = Normalizer::builtin();
        let mut a = args("+34612345678", "PT");
        a.expect = Some("PT".to_string());
        assert_eq!(run_normalize(&a, &normalizer).unwrap(), EXIT_REJECTED);
        a.expect = Some("ES".to_string());
        assert_eq!(run_normalize(&a, &normalizer).unwrap(), EXIT_OK);
    }

    #[test]
    fn text_rendering() {
        let result = Normalizer::builtin().normalize(Some("912345678"), "PT");
        let text = render(&result, false).unwrap();
        assert!(text.contains("e164:     +351912345678"));
        assert!(text.contains("display:  +351 912 345 678"));

        let result = Normalizer::builtin().normalize(Some("1"), "PT");
        assert!(render(&result, false).unwrap().starts_with("TOO_SHORT: "));
    }

    #[test]
    fn json_rendering() {
        let result = Normalizer::builtin().normalize(Some("912345678"), "PT");
        let value: serde_json::Value =
            serde_json::from_str(&render(&result, true).unwrap()).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["e164"], "+351912345678");
    }
}
