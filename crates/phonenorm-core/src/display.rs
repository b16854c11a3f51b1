//! Display formatting for canonical numbers.
//!
//! Output is cosmetic only: `+351 912 345 678`. It is not guaranteed to
//! parse back to the user's original input and is never consulted by the
//! normalizer or by submission logic.

use crate::normalizer::NormalizedPhone;
use crate::registry::CountryRegistry;

/// Group national digits in runs of three, left to right.
pub fn format_national(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Render a normalized number as `<calling code> <grouped national>`.
pub fn format_normalized(phone: &NormalizedPhone) -> String {
    format!(
        "{} {}",
        phone.phone_code(),
        format_national(phone.contact_number())
    )
}

/// Render a raw E.164 string, splitting off the calling code via the
/// registry. Returns `None` unless `e164` is `+` followed by digits with a
/// registered calling code and a non-empty remainder.
pub fn format_e164(registry: &CountryRegistry, e164: &str) -> Option<String> {
    let digits = e164.trim().strip_prefix('+')?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let code = registry.match_longest_prefix(digits)?;
    let national = &digits[code.len()..];
    if national.is_empty() {
        return None;
    }
    Some(format!("+{code} {}", format_national(national)))
}
