//! # Check Subcommand
//!
//! Reports the realtime feedback state an input widget would show.
//! Exits 0 unless `--strict` is set and the state is not `VALID`.

use anyhow::Result;
use clap::Args;

use phonenorm_core::{RealtimeValidator, ValidationState};

use crate::{EXIT_OK, EXIT_REJECTED};

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Partial or complete input.
    pub input: String,

    /// Country hint (ISO 3166-1 alpha-2).
    #[arg(short, long)]
    pub country: String,

    /// Emit the state as JSON.
    #[arg(long)]
    pub json: bool,

    /// Exit non-zero unless the input is VALID.
    #[arg(long)]
    pub strict: bool,
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs, validator: &RealtimeValidator<'_>) -> Result<u8> {
    let state = validator.evaluate(Some(&args.input), &args.country);
    tracing::debug!(status = %state.status, entered = state.digits_entered, "evaluated");
    println!("{}", render(&state, args.json)?);

    if args.strict && !state.is_submittable() {
        return Ok(EXIT_REJECTED);
    }
    Ok(EXIT_OK)
}

/// Render a state as a one-line summary or JSON.
pub fn render(state: &ValidationState, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(state)?);
    }
    let mut line = format!(
        "{} ({}/{} digits)",
        state.status, state.digits_entered, state.digits_required
    );
    if let Some(message) = &state.message {
        line.push_str(" - ");
        line.push_str(message);
    }
    Ok(line)
}
