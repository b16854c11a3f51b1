//! # phonenorm-core — Phone Number Normalization Engine
//!
//! Converts user-typed phone input into canonical E.164 numbers suitable
//! for identity-verification payloads, and classifies partial input while
//! the user is still typing. Parsing rules are encoded here against a small,
//! fixed set of supported countries; no external numbering-plan metadata is
//! consulted.
//!
//! ## Components
//!
//! 1. **[`CountryRegistry`]** — immutable table of supported countries and
//!    their national length bounds. Passed explicitly; the built-in table is
//!    available via [`CountryRegistry::builtin`].
//!
//! 2. **[`Normalizer`]** — `resolve_country` then `normalize_with_country`.
//!    Returns `Result<NormalizedPhone, NormalizationError>`; never panics.
//!
//! 3. **[`RealtimeValidator`]** — maps the normalizer's verdict onto
//!    `EMPTY | PARTIAL | VALID | INVALID` feedback.
//!
//! 4. **[`display`]** — cosmetic `+351 912 345 678` rendering.
//!
//! ## Crate Policy
//!
//! - No I/O on the normalization path; everything is a pure function of
//!   its arguments and the read-only registry.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests. The only `expect` guards
//!   the compile-time built-in country table.

pub mod country;
pub mod display;
pub mod error;
pub mod normalizer;
pub mod outcome;
pub mod realtime;
pub mod registry;

// Re-export primary types for ergonomic imports.
pub use country::{Alpha2, Alpha3, CallingCode, CountryCallingCode};
pub use display::{format_e164, format_national, format_normalized};
pub use error::{ErrorCode, NormalizationError, RegistryError, ValidationError};
pub use normalizer::{
    normalize, FallbackPolicy, NormalizationResult, NormalizedPhone, Normalizer, DEFAULT_COUNTRY,
    E164_MAX_DIGITS, E164_MIN_DIGITS,
};
pub use outcome::NormalizationOutcome;
pub use realtime::{
    evaluate, RealtimeValidator, ValidationState, ValidationStatus, MIN_DIGITS_TO_EVALUATE,
};
pub use registry::CountryRegistry;
