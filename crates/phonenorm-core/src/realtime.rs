//! # Realtime Validator
//!
//! Classifies partially typed input without flagging it as an error too
//! early. Each evaluation is a pure function of `(input, hint)`; there is
//! no memory of earlier keystrokes. Debouncing is the caller's concern.
//!
//! | Status    | Condition                                              |
//! |-----------|--------------------------------------------------------|
//! | `EMPTY`   | fewer than three digits entered                        |
//! | `PARTIAL` | normalizer reports `TOO_SHORT`                         |
//! | `VALID`   | normalizer succeeds                                    |
//! | `INVALID` | any other normalizer failure                           |

use serde::{Deserialize, Serialize};

use crate::error::NormalizationError;
use crate::normalizer::{NormalizedPhone, Normalizer};

/// Digits required before input is judged at all.
pub const MIN_DIGITS_TO_EVALUATE: usize = 3;

/// Feedback category for the current input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationStatus {
    /// Too early to judge.
    Empty,
    /// Plausible so far, more digits needed.
    Partial,
    /// Normalizes successfully.
    Valid,
    /// Cannot become valid by typing more.
    Invalid,
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Empty => "EMPTY",
            Self::Partial => "PARTIAL",
            Self::Valid => "VALID",
            Self::Invalid => "INVALID",
        };
        f.write_str(s)
    }
}

/// Outcome of one realtime evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationState {
    /// Feedback category.
    pub status: ValidationStatus,
    /// Digits counted toward the national number so far.
    pub digits_entered: usize,
    /// National digits the resolved country requires at minimum.
    pub digits_required: usize,
    /// Hint for the user, when there is something to say.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationState {
    /// Whether the input may be submitted as-is.
    pub fn is_submittable(&self) -> bool {
        self.status == ValidationStatus::Valid
    }

    /// Whether continued typing can still produce a valid number.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.status,
            ValidationStatus::Empty | ValidationStatus::Partial
        )
    }

    /// Digits still to be typed before the minimum is reached.
    pub fn digits_remaining(&self) -> usize {
        self.digits_required.saturating_sub(self.digits_entered)
    }
}

/// Incremental wrapper around a [`Normalizer`].
#[derive(Debug, Clone)]
pub struct RealtimeValidator<'r> {
    normalizer: Normalizer<'r>,
}

impl RealtimeValidator<'static> {
    /// A validator over the built-in registry.
    pub fn builtin() -> Self {
        Self::new(Normalizer::builtin())
    }
}

impl<'r> RealtimeValidator<'r> {
    /// Wrap a normalizer.
    pub fn new(normalizer: Normalizer<'r>) -> Self {
        Self { normalizer }
    }

    /// Classify `input` typed under `hint`.
    pub fn evaluate(&self, input: Option<&str>, hint: &str) -> ValidationState {
        let digits = input.map_or(0, |s| s.chars().filter(char::is_ascii_digit).count());
        let hinted_min = self
            .normalizer
            .resolve_country(hint)
            .map_or(0, |c| c.min_national_length);

        if digits < MIN_DIGITS_TO_EVALUATE {
            return ValidationState {
                status: ValidationStatus::Empty,
                digits_entered: digits,
                digits_required: hinted_min,
                message: None,
            };
        }

        match self.normalizer.normalize(input, hint) {
            Ok(phone) => self.valid(&phone),
            Err(NormalizationError::TooShort { length, min, .. }) => ValidationState {
                status: ValidationStatus::Partial,
                digits_entered: length,
                digits_required: min,
                message: Some(format!("{} more digit(s) required", min - length)),
            },
            Err(err) => ValidationState {
                status: ValidationStatus::Invalid,
                digits_entered: digits,
                digits_required: hinted_min,
                message: Some(err.to_string()),
            },
        }
    }

    fn valid(&self, phone: &NormalizedPhone) -> ValidationState {
        let entered = phone.contact_number().len();
        let required = self
            .normalizer
            .registry()
            .get(phone.phone_country_code())
            .map_or(entered, |c| c.min_national_length);
        ValidationState {
            status: ValidationStatus::Valid,
            digits_entered: entered,
            digits_required: required,
            message: None,
        }
    }
}

/// Evaluate with the built-in registry and default fallback.
pub fn evaluate(input: Option<&str>, hint: &str) -> ValidationState {
    RealtimeValidator::builtin().evaluate(input, hint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::FallbackPolicy;

    fn eval(input: &str, hint: &str) -> ValidationState {
        evaluate(Some(input), hint)
    }

    #[test]
    fn fewer_than_three_digits_is_empty() {
        for input in ["", "9", "91", "+3", "(9) 1"] {
            let state = eval(input, "PT");
            assert_eq!(state.status, ValidationStatus::Empty, "input {input:?}");
            assert_eq!(state.digits_required, 9);
            assert!(state.message.is_none());
        }
        assert_eq!(evaluate(None, "PT").status, ValidationStatus::Empty);
    }

    #[test]
    fn short_input_is_partial_with_remaining_count() {
        let state = eval("912 34", "PT");
        assert_eq!(state.status, ValidationStatus::Partial);
        assert_eq!(state.digits_entered, 5);
        assert_eq!(state.digits_required, 9);
        assert_eq!(state.digits_remaining(), 4);
        assert_eq!(state.message.as_deref(), Some("4 more digit(s) required"));
        assert!(state.is_recoverable());
        assert!(!state.is_submittable());
    }

    #[test]
    fn partial_counts_national_digits_after_calling_code() {
        let state = eval("+351 91", "PT");
        assert_eq!(state.status, ValidationStatus::Partial);
        assert_eq!(state.digits_entered, 2);
        assert_eq!(state.digits_remaining(), 7);
    }

    #[test]
    fn complete_input_is_valid() {
        let state = eval("912 345 678", "PT");
        assert_eq!(state.status, ValidationStatus::Valid);
        assert_eq!(state.digits_entered, 9);
        assert_eq!(state.digits_required, 9);
        assert!(state.is_submittable());
    }

    #[test]
    fn valid_reports_resolved_country_minimum() {
        let state = eval("+49 301234567", "PT");
        assert_eq!(state.status, ValidationStatus::Valid);
        assert_eq!(state.digits_required, 7);
    }

    #[test]
    fn overlong_input_is_invalid() {
        let state = eval("9123456789", "PT");
        assert_eq!(state.status, ValidationStatus::Invalid);
        assert!(!state.is_recoverable());
        assert!(state.message.unwrap().contains("too long"));
    }

    #[test]
    fn beyond_e164_bound_is_invalid() {
        let state = eval("+1234567890123456", "PT");
        assert_eq!(state.status, ValidationStatus::Invalid);
        assert_eq!(state.digits_entered, 16);
    }

    #[test]
    fn rejected_hint_is_invalid_with_zero_required() {
        let validator = RealtimeValidator::new(
            Normalizer::builtin().with_fallback(FallbackPolicy::Reject),
        );
        let state = validator.evaluate(Some("912345678"), "ZZ");
        assert_eq!(state.status, ValidationStatus::Invalid);
        assert_eq!(state.digits_required, 0);
    }

    #[test]
    fn typing_progression() {
        let statuses: Vec<ValidationStatus> = ["9", "912", "91234", "912345678", "9123456789"]
            .iter()
            .map(|s| eval(s, "PT").status)
            .collect();
        assert_eq!(
            statuses,
            [
                ValidationStatus::Empty,
                ValidationStatus::Partial,
                ValidationStatus::Partial,
                ValidationStatus::Valid,
                ValidationStatus::Invalid,
            ]
        );
    }

    #[test]
    fn serializes_for_the_input_widget() {
        let json = serde_json::to_value(eval("91234", "PT")).unwrap();
        assert_eq!(json["status"], "PARTIAL");
        assert_eq!(json["digitsEntered"], 5);
        assert_eq!(json["digitsRequired"], 9);

        let json = serde_json::to_value(eval("912345678", "PT")).unwrap();
        assert_eq!(json["status"], "VALID");
        assert!(json.get("message").is_none());
    }
}
