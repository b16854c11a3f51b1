//! # Country Primitives
//!
//! Validated newtypes for ISO 3166-1 country codes and ITU-T calling codes,
//! and the [`CountryCallingCode`] registry entry built from them.
//!
//! ## Validation
//!
//! [`Alpha2`] and [`Alpha3`] accept ASCII letters only and are stored
//! upper-case. [`CallingCode`] is `+` followed by one to three digits with
//! no leading zero. All three validate at construction and at
//! deserialization time.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Implement `Deserialize` for string newtypes by routing the raw string
/// through the type's validating `new()` constructor.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

fn is_letter_code(s: &str, len: usize) -> bool {
    s.len() == len && s.chars().all(|c| c.is_ascii_alphabetic())
}

/// ISO 3166-1 alpha-2 country code (e.g. `PT`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Alpha2(String);

impl_validating_deserialize!(Alpha2);

impl Alpha2 {
    /// Create an alpha-2 code, trimming and upper-casing the input.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAlpha2`] unless the trimmed value
    /// is exactly two ASCII letters.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let upper = raw.trim().to_ascii_uppercase();
        if !is_letter_code(&upper, 2) {
            return Err(ValidationError::InvalidAlpha2(raw));
        }
        Ok(Self(upper))
    }

    /// Access the code string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Alpha2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

impl std::str::FromStr for Alpha2 {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// ISO 3166-1 alpha-3 country code (e.g. `PRT`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Alpha3(String);

impl_validating_deserialize!(Alpha3);

impl Alpha3 {
    /// Create an alpha-3 code, trimming and upper-casing the input.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAlpha3`] unless the trimmed value
    /// is exactly three ASCII letters.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let upper = raw.trim().to_ascii_uppercase();
        if !is_letter_code(&upper, 3) {
            return Err(ValidationError::InvalidAlpha3(raw));
        }
        Ok(Self(upper))
    }

    /// Access the code string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Alpha3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

/// International calling code, stored with its leading `+` (e.g. `+351`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CallingCode(String);

impl_validating_deserialize!(CallingCode);

impl CallingCode {
    /// Create a calling code.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidCallingCode`] unless the value is
    /// `+` followed by one to three digits, the first of which is non-zero.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let trimmed = raw.trim();
        let valid = match trimmed.strip_prefix('+') {
            Some(digits) => {
                (1..=3).contains(&digits.len())
                    && digits.chars().all(|c| c.is_ascii_digit())
                    && !digits.starts_with('0')
            }
            None => false,
        };
        if !valid {
            return Err(ValidationError::InvalidCallingCode(raw));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The code including its `+`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The bare digits, without `+`.
    pub fn digits(&self) -> &str {
        &self.0[1..]
    }
}

impl std::fmt::Display for CallingCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

/// A supported country and its numbering constraints.
///
/// Length bounds apply to the national number, i.e. the digits following
/// the calling code once any trunk prefix has been removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryCallingCode {
    /// Two-letter key.
    pub alpha2: Alpha2,
    /// Three-letter code.
    pub alpha3: Alpha3,
    /// Calling code with leading `+`.
    pub calling_code: CallingCode,
    /// Human-readable country name.
    pub name: String,
    /// Fewest national digits accepted.
    pub min_national_length: usize,
    /// Most national digits accepted.
    pub max_national_length: usize,
}

impl CountryCallingCode {
    /// Build an entry from raw strings.
    ///
    /// Length bounds are checked when the entry is added to a
    /// [`CountryRegistry`](crate::registry::CountryRegistry).
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for a malformed code.
    pub fn new(
        alpha2: &str,
        alpha3: &str,
        calling_code: &str,
        name: &str,
        min_national_length: usize,
        max_national_length: usize,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            alpha2: Alpha2::new(alpha2)?,
            alpha3: Alpha3::new(alpha3)?,
            calling_code: CallingCode::new(calling_code)?,
            name: name.to_string(),
            min_national_length,
            max_national_length,
        })
    }

    /// Whether `len` national digits are within this country's bounds.
    pub fn accepts_length(&self, len: usize) -> bool {
        (self.min_national_length..=self.max_national_length).contains(&len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha2_uppercases_and_trims() {
        let code = Alpha2::new(" pt ").unwrap();
        assert_eq!(code.as_str(), "PT");
        assert_eq!(format!("{code}"), "PT");
    }

    #[test]
    fn alpha2_rejects_invalid() {
        assert!(Alpha2::new("").is_err());
        assert!(Alpha2::new("P").is_err());
        assert!(Alpha2::new("PRT").is_err());
        assert!(Alpha2::new("P1").is_err());
        assert!(Alpha2::new("+3").is_err());
    }

    #[test]
    fn alpha2_parses_from_str() {
        let code: Alpha2 = "es".parse().unwrap();
        assert_eq!(code.as_str(), "ES");
        assert!("Spain".parse::<Alpha2>().is_err());
    }

    #[test]
    fn alpha3_validates_length() {
        assert_eq!(Alpha3::new("prt").unwrap().as_str(), "PRT");
        assert!(Alpha3::new("PT").is_err());
        assert!(Alpha3::new("PRTX").is_err());
    }

    #[test]
    fn calling_code_digits() {
        let code = CallingCode::new("+351").unwrap();
        assert_eq!(code.as_str(), "+351");
        assert_eq!(code.digits(), "351");
    }

    #[test]
    fn calling_code_rejects_invalid() {
        assert!(CallingCode::new("351").is_err());
        assert!(CallingCode::new("+").is_err());
        assert!(CallingCode::new("+0").is_err());
        assert!(CallingCode::new("+3512").is_err());
        assert!(CallingCode::new("+3a").is_err());
    }

    #[test]
    fn deserialize_routes_through_validation() {
        let ok: Alpha2 = serde_json::from_str("\"es\"").unwrap();
        assert_eq!(ok.as_str(), "ES");
        assert!(serde_json::from_str::<Alpha2>("\"ESP\"").is_err());
        assert!(serde_json::from_str::<CallingCode>("\"34\"").is_err());
    }

    #[test]
    fn entry_deserializes_from_camel_case() {
        let json = r#"{
            "alpha2": "PT",
            "alpha3": "PRT",
            "callingCode": "+351",
            "name": "Portugal",
            "minNationalLength": 9,
            "maxNationalLength": 9
        }"#;
        let entry: CountryCallingCode = serde_json::from_str(json).unwrap();
        assert_eq!(entry.calling_code.digits(), "351");
        assert!(entry.accepts_length(9));
        assert!(!entry.accepts_length(8));
        assert!(!entry.accepts_length(10));
    }
}
