//! # Normalizer
//!
//! Converts user-typed phone input plus a country hint into a canonical
//! E.164 number, or a structured [`NormalizationError`].
//!
//! ## Pipeline
//!
//! Normalization runs in two explicit phases:
//!
//! 1. [`Normalizer::resolve_country`] maps the hint to a registry entry,
//!    applying the configured [`FallbackPolicy`] when the hint is unknown.
//! 2. [`Normalizer::normalize_with_country`] parses the input against that
//!    country. A calling code embedded after a leading `+` overrides the
//!    resolved country.
//!
//! ## Determinism
//!
//! Feeding the `e164` of a successful result back in, under any hint,
//! reproduces the same `e164`: an embedded calling code always wins over
//! the hint, and trunk stripping is re-applied after every repair so that
//! canonical national numbers are fixed points.

use serde::Serialize;

use crate::country::{Alpha2, CountryCallingCode};
use crate::error::NormalizationError;
use crate::registry::CountryRegistry;

/// Country substituted for an unknown hint under the default policy.
pub const DEFAULT_COUNTRY: &str = "PT";

/// Fewest digits an E.164 number may carry, excluding `+`.
pub const E164_MIN_DIGITS: usize = 6;

/// Most digits an E.164 number may carry, excluding `+`.
pub const E164_MAX_DIGITS: usize = 15;

/// Result of a single normalization.
pub type NormalizationResult = Result<NormalizedPhone, NormalizationError>;

/// What to do when the country hint is not in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Substitute this country and continue.
    DefaultCountry(Alpha2),
    /// Fail with [`NormalizationError::UnknownCountry`].
    Reject,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        match Alpha2::new(DEFAULT_COUNTRY) {
            Ok(code) => Self::DefaultCountry(code),
            Err(_) => Self::Reject,
        }
    }
}

/// A successfully normalized phone number.
///
/// `e164 == phone_code + contact_number` holds for every value; fields are
/// private so the invariant cannot be broken after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPhone {
    e164: String,
    phone_code: String,
    contact_number: String,
    phone_country_code: Alpha2,
}

impl NormalizedPhone {
    /// Canonical `+<calling code><national number>`.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// Calling code with its `+`.
    pub fn phone_code(&self) -> &str {
        &self.phone_code
    }

    /// Digits-only national number.
    pub fn contact_number(&self) -> &str {
        &self.contact_number
    }

    /// Resolved country. May differ from the hint when the input carried
    /// its own calling code.
    pub fn phone_country_code(&self) -> &Alpha2 {
        &self.phone_country_code
    }

    /// Digit count of the full number, excluding `+`.
    pub fn digit_count(&self) -> usize {
        self.e164.len() - 1
    }
}

impl std::fmt::Display for NormalizedPhone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.e164)
    }
}

/// Normalization engine bound to a registry and a fallback policy.
#[derive(Debug, Clone)]
pub struct Normalizer<'r> {
    registry: &'r CountryRegistry,
    fallback: FallbackPolicy,
}

impl Normalizer<'static> {
    /// A normalizer over the built-in registry with the default fallback.
    pub fn builtin() -> Self {
        Self::new(CountryRegistry::builtin())
    }
}

impl<'r> Normalizer<'r> {
    /// Create a normalizer with the default fallback policy.
    pub fn new(registry: &'r CountryRegistry) -> Self {
        Self {
            registry,
            fallback: FallbackPolicy::default(),
        }
    }

    /// Replace the fallback policy.
    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// The registry this normalizer reads.
    pub fn registry(&self) -> &'r CountryRegistry {
        self.registry
    }

    /// Phase one: resolve a country hint.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizationError::UnknownCountry`] when the hint is
    /// unknown and the policy is [`FallbackPolicy::Reject`], or when the
    /// fallback country itself is missing from the registry.
    pub fn resolve_country(&self, hint: &str) -> Result<&'r CountryCallingCode, NormalizationError> {
        if let Some(country) = self.registry.by_alpha2(hint) {
            return Ok(country);
        }
        match &self.fallback {
            FallbackPolicy::DefaultCountry(code) => {
                tracing::debug!(hint, fallback = %code, "unknown country hint, using fallback");
                self.registry
                    .get(code)
                    .ok_or_else(|| NormalizationError::UnknownCountry {
                        hint: hint.to_string(),
                    })
            }
            FallbackPolicy::Reject => Err(NormalizationError::UnknownCountry {
                hint: hint.to_string(),
            }),
        }
    }

    /// Normalize `raw` under `hint`. Never panics.
    pub fn normalize(&self, raw: Option<&str>, hint: &str) -> NormalizationResult {
        trimmed_input(raw)?;
        let country = self.resolve_country(hint)?;
        self.normalize_with_country(raw, country)
    }

    /// Normalize and additionally require the result to resolve to
    /// `expected`.
    ///
    /// # Errors
    ///
    /// Any error from [`Normalizer::normalize`];
    /// [`NormalizationError::UnknownCountry`] if `expected` is not a
    /// registered country; [`NormalizationError::CountryMismatch`] if the
    /// number resolves elsewhere.
    pub fn normalize_expecting(
        &self,
        raw: Option<&str>,
        hint: &str,
        expected: &str,
    ) -> NormalizationResult {
        let expected_country =
            self.registry
                .by_alpha2(expected)
                .ok_or_else(|| NormalizationError::UnknownCountry {
                    hint: expected.to_string(),
                })?;
        let phone = self.normalize(raw, hint)?;
        if phone.phone_country_code != expected_country.alpha2 {
            return Err(NormalizationError::CountryMismatch {
                expected: expected_country.alpha2.clone(),
                detected: phone.phone_country_code,
            });
        }
        Ok(phone)
    }

    /// Phase two: normalize `raw` against an already-resolved country.
    pub fn normalize_with_country(
        &self,
        raw: Option<&str>,
        country: &'r CountryCallingCode,
    ) -> NormalizationResult {
        let trimmed = trimmed_input(raw)?;
        let international = trimmed.starts_with('+');
        let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Err(NormalizationError::NoDigits);
        }
        if international && digits.len() > E164_MAX_DIGITS {
            return Err(NormalizationError::InvalidFormat {
                digits: digits.len(),
            });
        }

        let (country, candidate) = match self.detect_calling_code(international, &digits) {
            Some(detected) => {
                if detected.alpha2 != country.alpha2 {
                    tracing::debug!(
                        hint = %country.alpha2,
                        detected = %detected.alpha2,
                        "calling code in input overrides country hint"
                    );
                }
                (detected, &digits[detected.calling_code.digits().len()..])
            }
            None => (country, digits.as_str()),
        };

        let national = strip_trunk_prefix(candidate, country.min_national_length);
        let national = check_national_length(country, national)?;

        let total = country.calling_code.digits().len() + national.len();
        if !(E164_MIN_DIGITS..=E164_MAX_DIGITS).contains(&total) {
            return Err(NormalizationError::InvalidFormat { digits: total });
        }

        Ok(NormalizedPhone {
            e164: format!("{}{}", country.calling_code, national),
            phone_code: country.calling_code.to_string(),
            contact_number: national.to_string(),
            phone_country_code: country.alpha2.clone(),
        })
    }

    fn detect_calling_code(
        &self,
        international: bool,
        digits: &str,
    ) -> Option<&'r CountryCallingCode> {
        if !international {
            return None;
        }
        self.registry.match_country(digits)
    }
}

/// Normalize with the built-in registry and default fallback.
pub fn normalize(raw: Option<&str>, hint: &str) -> NormalizationResult {
    Normalizer::builtin().normalize(raw, hint)
}

fn trimmed_input(raw: Option<&str>) -> Result<&str, NormalizationError> {
    match raw.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed),
        _ => Err(NormalizationError::Empty),
    }
}

/// Remove leading `0`s one at a time while the number stays above `min`.
fn strip_trunk_prefix(candidate: &str, min: usize) -> &str {
    let mut national = candidate;
    while national.len() > min {
        match national.strip_prefix('0') {
            Some(rest) => national = rest,
            None => break,
        }
    }
    national
}

/// Enforce the country's national length bounds. An over-long number that
/// still starts with the country's own calling code (typed without `+`) is
/// repaired once by dropping that code and re-measuring.
fn check_national_length<'a>(
    country: &CountryCallingCode,
    national: &'a str,
) -> Result<&'a str, NormalizationError> {
    let min = country.min_national_length;
    let max = country.max_national_length;

    if national.len() < min {
        return Err(too_short(country, national.len()));
    }
    if national.len() <= max {
        return Ok(national);
    }

    let Some(rest) = national.strip_prefix(country.calling_code.digits()) else {
        return Err(too_long(country, national.len()));
    };
    let repaired = strip_trunk_prefix(rest, min);
    tracing::debug!(
        country = %country.alpha2,
        before = national.len(),
        after = repaired.len(),
        "stripped repeated calling code from national number"
    );
    if repaired.len() > max {
        return Err(too_long(country, repaired.len()));
    }
    if repaired.len() < min {
        return Err(too_short(country, repaired.len()));
    }
    Ok(repaired)
}

fn too_short(country: &CountryCallingCode, length: usize) -> NormalizationError {
    NormalizationError::TooShort {
        country: country.alpha2.clone(),
        length,
        min: country.min_national_length,
    }
}

fn too_long(country: &CountryCallingCode, length: usize) -> NormalizationError {
    NormalizationError::TooLong {
        country: country.alpha2.clone(),
        length,
        max: country.max_national_length,
    }
}
