//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout the normalization engine. All
//! errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Normalization failures are returned as values. Each variant carries
//!   the digit counts and bounds its message is built from, so callers never
//!   re-derive them.
//! - Every [`NormalizationError`] maps onto exactly one wire-level
//!   [`ErrorCode`].
//! - Registry errors name the offending entry so a bad table file can be
//!   fixed without guesswork.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::country::Alpha2;

/// Wire-level failure taxonomy reported to consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input was empty, had no digits, or named an unresolvable country.
    InvalidInput,
    /// National number has fewer digits than the country minimum.
    TooShort,
    /// National number has more digits than the country maximum.
    TooLong,
    /// Digit count falls outside the E.164 bound.
    InvalidFormat,
    /// The resolved country differs from the one the caller expected.
    CountryMismatch,
}

impl ErrorCode {
    /// All codes, in declaration order.
    pub fn all() -> &'static [ErrorCode] {
        &[
            Self::InvalidInput,
            Self::TooShort,
            Self::TooLong,
            Self::InvalidFormat,
            Self::CountryMismatch,
        ]
    }

    /// The SCREAMING_SNAKE_CASE wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::TooShort => "TOO_SHORT",
            Self::TooLong => "TOO_LONG",
            Self::InvalidFormat => "INVALID_FORMAT",
            Self::CountryMismatch => "COUNTRY_MISMATCH",
        }
    }

    /// Whether further typing can resolve the failure on its own.
    ///
    /// Only [`ErrorCode::TooShort`] is recoverable; everything else blocks
    /// submission until the input is corrected.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::TooShort)
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure produced by the normalizer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizationError {
    /// Input was absent or whitespace-only.
    #[error("phone number is required")]
    Empty,

    /// Input contained no digits at all.
    #[error("phone number must contain digits")]
    NoDigits,

    /// Country hint could not be resolved and no fallback applies.
    #[error("unsupported country code '{hint}'")]
    UnknownCountry {
        /// The hint as supplied by the caller.
        hint: String,
    },

    /// National number is below the country minimum.
    #[error(
        "phone number is too short for {country}: {} more digit(s) required",
        self.missing_digits().unwrap_or_default()
    )]
    TooShort {
        /// Resolved country.
        country: Alpha2,
        /// Digits in the candidate national number.
        length: usize,
        /// Country minimum national length.
        min: usize,
    },

    /// National number is above the country maximum, even after stripping
    /// a repeated calling code.
    #[error(
        "phone number is too long for {country}: {} digit(s) too many",
        self.excess_digits().unwrap_or_default()
    )]
    TooLong {
        /// Resolved country.
        country: Alpha2,
        /// Digits in the candidate national number.
        length: usize,
        /// Country maximum national length.
        max: usize,
    },

    /// Total digit count lies outside `[6, 15]`.
    #[error("phone number has {digits} digits; E.164 allows 6 to 15")]
    InvalidFormat {
        /// Total digit count that was rejected.
        digits: usize,
    },

    /// The number resolved to a different country than expected.
    #[error("phone number belongs to {detected}, expected {expected}")]
    CountryMismatch {
        /// Country the caller required.
        expected: Alpha2,
        /// Country resolved from the input.
        detected: Alpha2,
    },
}

impl NormalizationError {
    /// The wire-level code for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Empty | Self::NoDigits | Self::UnknownCountry { .. } => ErrorCode::InvalidInput,
            Self::TooShort { .. } => ErrorCode::TooShort,
            Self::TooLong { .. } => ErrorCode::TooLong,
            Self::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            Self::CountryMismatch { .. } => ErrorCode::CountryMismatch,
        }
    }

    /// Digits still missing, for [`NormalizationError::TooShort`].
    pub fn missing_digits(&self) -> Option<usize> {
        match self {
            Self::TooShort { length, min, .. } => Some(min.saturating_sub(*length)),
            _ => None,
        }
    }

    /// Surplus digits, for [`NormalizationError::TooLong`].
    pub fn excess_digits(&self) -> Option<usize> {
        match self {
            Self::TooLong { length, max, .. } => Some(length.saturating_sub(*max)),
            _ => None,
        }
    }
}

/// Malformed country or calling-code primitive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Alpha-2 code is not exactly two ASCII letters.
    #[error("invalid alpha-2 country code: {0:?}")]
    InvalidAlpha2(String),

    /// Alpha-3 code is not exactly three ASCII letters.
    #[error("invalid alpha-3 country code: {0:?}")]
    InvalidAlpha3(String),

    /// Calling code is not `+` followed by one to three digits.
    #[error("invalid calling code: {0:?} (expected '+' followed by 1-3 digits, no leading zero)")]
    InvalidCallingCode(String),
}

/// Error building or loading a country registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Two entries share an alpha-2 key.
    #[error("duplicate registry entry for {0}")]
    DuplicateAlpha2(Alpha2),

    /// Two entries share calling-code digits.
    #[error("calling code {code} is assigned to both {first} and {second}")]
    DuplicateCallingCode {
        /// The shared calling code.
        code: String,
        /// Entry registered first.
        first: Alpha2,
        /// Entry that collided.
        second: Alpha2,
    },

    /// National length bounds are empty or inverted.
    #[error("{alpha2}: invalid national length bounds min={min} max={max}")]
    InvalidLengthBounds {
        /// Offending entry.
        alpha2: Alpha2,
        /// Declared minimum.
        min: usize,
        /// Declared maximum.
        max: usize,
    },

    /// A mapping key disagrees with the entry's own alpha-2 field.
    #[error("registry key {key:?} does not match entry alpha2 {alpha2}")]
    KeyMismatch {
        /// Mapping key in the table file.
        key: String,
        /// Alpha-2 declared inside the entry.
        alpha2: Alpha2,
    },

    /// Table file extension is not `.yaml`, `.yml`, or `.json`.
    #[error("unsupported registry file format: {0}")]
    UnsupportedFormat(String),

    /// Table file could not be parsed.
    #[error("failed to parse registry: {0}")]
    Parse(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
