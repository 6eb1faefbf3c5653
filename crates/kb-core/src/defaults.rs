//! Centralized default constants for the knowledgebase.
//!
//! **This module is the single source of truth** for shared default values
//! and schema limits. Other modules and the store crate reference these
//! constants instead of defining their own magic numbers.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

// =============================================================================
// DISPLAY
// =============================================================================

/// Language used for labels when the caller does not request one.
pub const DEFAULT_LANG: &str = "en";

/// Rendered in place of a value when a statement carries none.
pub const NO_VALUE_MARKER: &str = "*NO VALUE*";

/// Separator between the endpoints of a rendered time range.
pub const TIME_RANGE_SEPARATOR: &str = " – ";

// =============================================================================
// SCHEMA LIMITS
// =============================================================================

/// Maximum characters in a translation's text.
pub const TRANSLATION_MAX_LEN: usize = 250;

/// Maximum characters in a language tag.
pub const LANG_MAX_LEN: usize = 15;

/// Maximum characters in a grammatical case name.
pub const CASE_MAX_LEN: usize = 40;

/// Maximum characters in a reference URL.
pub const REFERENCE_URL_MAX_LEN: usize = 250;

/// Maximum characters in a reference description.
pub const REFERENCE_DESCRIPTION_MAX_LEN: usize = 250;

/// Total significant digits a stored quantity may carry.
pub const QUANTITY_MAX_DIGITS: u64 = 30;

/// Fractional digits a stored quantity may carry.
pub const QUANTITY_DECIMAL_PLACES: i64 = 12;

/// Inclusive latitude bounds in degrees.
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);

/// Inclusive longitude bounds in degrees.
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

// =============================================================================
// RUNTIME CONFIG
// =============================================================================

/// Scope of the (lang, case) uniqueness rule on translations.
///
/// `Global` reproduces the historical schema, where the pair is unique across
/// every concept. `PerConcept` scopes the pair to its owning concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TranslationUniqueness {
    #[default]
    Global,
    PerConcept,
}

impl FromStr for TranslationUniqueness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "global" => Ok(Self::Global),
            "per_concept" | "per-concept" | "perconcept" => Ok(Self::PerConcept),
            _ => Err(format!("Invalid translation uniqueness: {}", s)),
        }
    }
}

impl std::fmt::Display for TranslationUniqueness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::PerConcept => write!(f, "per_concept"),
        }
    }
}

/// Runtime configuration for rendering and storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KbConfig {
    /// Language requested when a caller does not name one.
    pub default_lang: String,
    /// Scope of the translation (lang, case) uniqueness rule.
    pub translation_uniqueness: TranslationUniqueness,
}

impl Default for KbConfig {
    fn default() -> Self {
        Self {
            default_lang: DEFAULT_LANG.to_string(),
            translation_uniqueness: TranslationUniqueness::default(),
        }
    }
}

impl KbConfig {
    /// Load configuration from environment variables with fallback to defaults.
    ///
    /// - `KB_DEFAULT_LANG`: language tag, ignored when empty or too long
    /// - `KB_TRANSLATION_UNIQUENESS`: `global` or `per_concept`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("KB_DEFAULT_LANG") {
            let val = val.trim();
            if val.is_empty() || val.chars().count() > LANG_MAX_LEN {
                tracing::warn!(
                    subsystem = "core",
                    value = %val,
                    "Invalid KB_DEFAULT_LANG, using default"
                );
            } else {
                config.default_lang = val.to_string();
            }
        }

        if let Ok(val) = std::env::var("KB_TRANSLATION_UNIQUENESS") {
            match val.parse::<TranslationUniqueness>() {
                Ok(scope) => config.translation_uniqueness = scope,
                Err(_) => {
                    tracing::warn!(
                        subsystem = "core",
                        value = %val,
                        "Invalid KB_TRANSLATION_UNIQUENESS, using default"
                    );
                }
            }
        }

        config
    }

    /// Builder-style override of the default language.
    pub fn with_default_lang(mut self, lang: impl Into<String>) -> Self {
        self.default_lang = lang.into();
        self
    }

    /// Builder-style override of the translation uniqueness scope.
    pub fn with_translation_uniqueness(mut self, scope: TranslationUniqueness) -> Self {
        self.translation_uniqueness = scope;
        self
    }
}
