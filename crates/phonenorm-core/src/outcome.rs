//! # Outcome Wire Model
//!
//! Serializable form of a [`NormalizationResult`] for consumers outside the
//! crate (payload builders, JSON output). Success and failure are distinct
//! variants, so a half-success value cannot be represented.
//!
//! ```json
//! {"status":"success","e164":"+351912345678","phoneCode":"+351",
//!  "contactNumber":"912345678","phoneCountryCode":"PT"}
//! {"status":"failure","code":"TOO_SHORT","message":"..."}
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;
use crate::normalizer::NormalizationResult;

/// Wire representation of a normalization result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum NormalizationOutcome {
    /// Canonical number.
    #[serde(rename_all = "camelCase")]
    Success {
        /// `+` followed by calling code and national number.
        e164: String,
        /// Calling code with `+`.
        phone_code: String,
        /// Digits-only national number.
        contact_number: String,
        /// Resolved alpha-2 country.
        phone_country_code: String,
    },
    /// Rejected input.
    Failure {
        /// Failure category.
        code: ErrorCode,
        /// Human-readable explanation.
        message: String,
    },
}

impl NormalizationOutcome {
    /// Whether this is a success.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The canonical number, if any. This is the only field a submission
    /// payload should read.
    pub fn e164(&self) -> Option<&str> {
        match self {
            Self::Success { e164, .. } => Some(e164.as_str()),
            Self::Failure { .. } => None,
        }
    }

    /// The failure code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { code, .. } => Some(*code),
        }
    }
}

impl From<&NormalizationResult> for NormalizationOutcome {
    fn from(result: &NormalizationResult) -> Self {
        match result {
            Ok(phone) => Self::Success {
                e164: phone.e164().to_string(),
                phone_code: phone.phone_code().to_string(),
                contact_number: phone.contact_number().to_string(),
                phone_country_code: phone.phone_country_code().to_string(),
            },
            Err(err) => Self::Failure {
                code: err.code(),
                message: err.to_string(),
            },
        }
    }
}

impl From<NormalizationResult> for NormalizationOutcome {
    fn from(result: NormalizationResult) -> Self {
        Self::from(&result)
    }
}
