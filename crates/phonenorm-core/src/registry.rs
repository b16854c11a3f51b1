//! # Country Calling-Code Registry
//!
//! The authoritative, read-only table of supported countries. A registry is
//! validated once when constructed and never mutated afterwards, so a
//! shared reference can be read from any number of threads without
//! locking.
//!
//! ## Invariants
//!
//! - No two entries share an alpha-2 key.
//! - No two entries share calling-code digits.
//! - `1 <= minNationalLength <= maxNationalLength` for every entry.
//!
//! ## Prefix Matching
//!
//! [`CountryRegistry::match_longest_prefix`] tries calling codes longest
//! first. A shorter code that prefixes a longer one would otherwise win
//! against input that belongs to the longer code.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use crate::country::{Alpha2, CountryCallingCode};
use crate::error::RegistryError;

/// Built-in table: (alpha2, alpha3, calling code, name, min, max).
const BUILTIN_COUNTRIES: &[(&str, &str, &str, &str, usize, usize)] = &[
    ("PT", "PRT", "+351", "Portugal", 9, 9),
    ("ES", "ESP", "+34", "Spain", 9, 9),
    ("FR", "FRA", "+33", "France", 9, 9),
    ("DE", "DEU", "+49", "Germany", 7, 11),
    ("GB", "GBR", "+44", "United Kingdom", 10, 10),
    ("IT", "ITA", "+39", "Italy", 9, 10),
    ("NL", "NLD", "+31", "Netherlands", 9, 9),
    ("BE", "BEL", "+32", "Belgium", 8, 9),
    ("IE", "IRL", "+353", "Ireland", 7, 9),
    ("LU", "LUX", "+352", "Luxembourg", 6, 11),
    ("CH", "CHE", "+41", "Switzerland", 9, 9),
    ("US", "USA", "+1", "United States", 10, 10),
    ("BR", "BRA", "+55", "Brazil", 10, 11),
    ("AO", "AGO", "+244", "Angola", 9, 9),
    ("MZ", "MOZ", "+258", "Mozambique", 9, 9),
    ("CV", "CPV", "+238", "Cabo Verde", 7, 7),
];

static BUILTIN: OnceLock<CountryRegistry> = OnceLock::new();

// Table files are either a mapping keyed by alpha-2 or a plain list. Each
// entry is deserialized on its own so a bad field is reported against the
// entry that holds it.

fn yaml_entries(value: serde_yaml::Value) -> Result<Vec<CountryCallingCode>, RegistryError> {
    match value {
        serde_yaml::Value::Mapping(map) => map
            .into_iter()
            .map(|(key, raw)| {
                let Some(key) = key.as_str().map(str::to_string) else {
                    return Err(RegistryError::Parse(format!(
                        "registry key {key:?} is not a string"
                    )));
                };
                let entry = serde_yaml::from_value(raw).map_err(|e| entry_error(&key, e))?;
                keyed_entry(key, entry)
            })
            .collect(),
        serde_yaml::Value::Sequence(items) => items
            .into_iter()
            .enumerate()
            .map(|(idx, raw)| {
                serde_yaml::from_value(raw)
                    .map_err(|e| entry_error(&format!("entry {}", idx + 1), e))
            })
            .collect(),
        _ => Err(not_a_table()),
    }
}

fn json_entries(value: serde_json::Value) -> Result<Vec<CountryCallingCode>, RegistryError> {
    match value {
        serde_json::Value::Object(map) => map
            .into_iter()
            .map(|(key, raw)| {
                let entry = serde_json::from_value(raw).map_err(|e| entry_error(&key, e))?;
                keyed_entry(key, entry)
            })
            .collect(),
        serde_json::Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(idx, raw)| {
                serde_json::from_value(raw)
                    .map_err(|e| entry_error(&format!("entry {}", idx + 1), e))
            })
            .collect(),
        _ => Err(not_a_table()),
    }
}

fn keyed_entry(
    key: String,
    entry: CountryCallingCode,
) -> Result<CountryCallingCode, RegistryError> {
    if !key.trim().eq_ignore_ascii_case(entry.alpha2.as_str()) {
        return Err(RegistryError::KeyMismatch {
            key,
            alpha2: entry.alpha2,
        });
    }
    Ok(entry)
}

fn entry_error(label: &str, err: impl std::fmt::Display) -> RegistryError {
    RegistryError::Parse(format!("{label}: {err}"))
}

fn not_a_table() -> RegistryError {
    RegistryError::Parse("expected a mapping keyed by alpha-2 or a list of entries".to_string())
}

/// Immutable lookup table of supported countries.
#[derive(Debug, Clone)]
pub struct CountryRegistry {
    entries: BTreeMap<Alpha2, CountryCallingCode>,
    /// Calling-code digits paired with their owner, longest first.
    prefixes: Vec<(String, Alpha2)>,
}

impl CountryRegistry {
    /// Build a registry, enforcing the table invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] on a duplicate alpha-2 key, a duplicate
    /// calling code, or invalid national length bounds.
    pub fn new(
        entries: impl IntoIterator<Item = CountryCallingCode>,
    ) -> Result<Self, RegistryError> {
        let mut by_alpha2: BTreeMap<Alpha2, CountryCallingCode> = BTreeMap::new();
        let mut by_code: BTreeMap<String, Alpha2> = BTreeMap::new();

        for entry in entries {
            if entry.min_national_length == 0
                || entry.min_national_length > entry.max_national_length
            {
                return Err(RegistryError::InvalidLengthBounds {
                    alpha2: entry.alpha2,
                    min: entry.min_national_length,
                    max: entry.max_national_length,
                });
            }
            if by_alpha2.contains_key(&entry.alpha2) {
                return Err(RegistryError::DuplicateAlpha2(entry.alpha2));
            }
            let digits = entry.calling_code.digits().to_string();
            if let Some(first) = by_code.get(&digits) {
                return Err(RegistryError::DuplicateCallingCode {
                    code: entry.calling_code.to_string(),
                    first: first.clone(),
                    second: entry.alpha2,
                });
            }
            by_code.insert(digits, entry.alpha2.clone());
            by_alpha2.insert(entry.alpha2.clone(), entry);
        }

        let mut prefixes: Vec<(String, Alpha2)> = by_code.into_iter().collect();
        prefixes.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        Ok(Self {
            entries: by_alpha2,
            prefixes,
        })
    }

    /// The process-wide built-in table, initialised on first use.
    pub fn builtin() -> &'static CountryRegistry {
        BUILTIN.get_or_init(|| {
            let entries = BUILTIN_COUNTRIES.iter().map(
                |&(alpha2, alpha3, code, name, min, max)| {
                    CountryCallingCode::new(alpha2, alpha3, code, name, min, max)
                        .expect("built-in country entries are well-formed")
                },
            );
            Self::new(entries).expect("built-in country table satisfies registry invariants")
        })
    }

    /// Parse a registry from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Parse`] for malformed YAML or entries, and
    /// any invariant violation from [`CountryRegistry::new`].
    pub fn from_yaml_str(yaml: &str) -> Result<Self, RegistryError> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(yaml).map_err(|e| RegistryError::Parse(e.to_string()))?;
        Self::new(yaml_entries(value)?)
    }

    /// Parse a registry from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Parse`] for malformed JSON or entries, and
    /// any invariant violation from [`CountryRegistry::new`].
    pub fn from_json_str(json: &str) -> Result<Self, RegistryError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| RegistryError::Parse(e.to_string()))?;
        Self::new(json_entries(value)?)
    }

    /// Load a registry file, choosing the parser by extension
    /// (`.yaml`/`.yml` or `.json`).
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnsupportedFormat`] for other extensions,
    /// [`RegistryError::Io`] if the file cannot be read, and any parse or
    /// invariant error.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let registry = match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&std::fs::read_to_string(path)?)?,
            "json" => Self::from_json_str(&std::fs::read_to_string(path)?)?,
            _ => return Err(RegistryError::UnsupportedFormat(path.display().to_string())),
        };
        tracing::debug!(
            path = %path.display(),
            countries = registry.len(),
            "loaded country registry"
        );
        Ok(registry)
    }

    /// Exact lookup by alpha-2 code. Case and surrounding whitespace are
    /// ignored; malformed or unknown codes yield `None`.
    pub fn by_alpha2(&self, code: &str) -> Option<&CountryCallingCode> {
        let key = Alpha2::new(code).ok()?;
        self.entries.get(&key)
    }

    /// Lookup by an already-validated alpha-2 code.
    pub fn get(&self, alpha2: &Alpha2) -> Option<&CountryCallingCode> {
        self.entries.get(alpha2)
    }

    /// Return the digits of the longest registered calling code that
    /// prefixes `digits`.
    pub fn match_longest_prefix(&self, digits: &str) -> Option<&str> {
        self.prefixes
            .iter()
            .find(|(code, _)| digits.starts_with(code.as_str()))
            .map(|(code, _)| code.as_str())
    }

    /// Reverse lookup from bare calling-code digits.
    pub fn country_for_calling_code(&self, code_digits: &str) -> Option<&CountryCallingCode> {
        self.prefixes
            .iter()
            .find(|(code, _)| code == code_digits)
            .and_then(|(_, alpha2)| self.entries.get(alpha2))
    }

    /// The country whose calling code is the longest prefix of `digits`.
    pub fn match_country(&self, digits: &str) -> Option<&CountryCallingCode> {
        self.match_longest_prefix(digits)
            .and_then(|code| self.country_for_calling_code(code))
    }

    /// Entries in alpha-2 order.
    pub fn iter(&self) -> impl Iterator<Item = &CountryCallingCode> {
        self.entries.values()
    }

    /// Number of supported countries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
