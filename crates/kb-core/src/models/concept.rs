//! Concepts and their localized labels.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::defaults::{CASE_MAX_LEN, LANG_MAX_LEN, TRANSLATION_MAX_LEN};
use crate::error::{Error, Result};
use crate::uuid_utils::new_v7;

/// A node in the knowledge graph.
///
/// Translations are kept in insertion order; label fallback relies on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    pub id: Uuid,
    pub description: Option<String>,
    #[serde(default)]
    pub translations: Vec<Translation>,
}

impl Concept {
    /// Create a concept with a fresh id and no translations.
    pub fn new(description: Option<String>) -> Self {
        Self::with_id(new_v7(), description)
    }

    pub fn with_id(id: Uuid, description: Option<String>) -> Self {
        Self {
            id,
            description,
            translations: Vec::new(),
        }
    }

    /// Builder-style helper appending a validated translation.
    pub fn with_translation(
        mut self,
        text: &str,
        lang: &str,
        case: Option<&str>,
    ) -> Result<Self> {
        let translation = Translation::new(self.id, text, lang, case)?;
        self.translations.push(translation);
        Ok(self)
    }

    /// Find the translation with exactly this (lang, case) pair.
    pub fn find_translation(&self, lang: &str, case: Option<&str>) -> Option<&Translation> {
        self.translations.iter().find(|t| t.matches(lang, case))
    }
}

/// A localized label attached to a concept.
///
/// A `None` case is a distinct key, not a wildcard: (`en`, `None`) and
/// (`en`, `Some("genitive")`) are different labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub id: Uuid,
    pub concept_id: Uuid,
    pub translation: String,
    pub lang: String,
    pub case: Option<String>,
}

impl Translation {
    /// Validate and build a translation owned by `concept_id`.
    pub fn new(concept_id: Uuid, text: &str, lang: &str, case: Option<&str>) -> Result<Self> {
        if text.chars().count() > TRANSLATION_MAX_LEN {
            return Err(Error::InvalidInput(format!(
                "translation exceeds {} characters",
                TRANSLATION_MAX_LEN
            )));
        }
        if lang.is_empty() || lang.chars().count() > LANG_MAX_LEN {
            return Err(Error::InvalidInput(format!(
                "language tag must be 1-{} characters, got {:?}",
                LANG_MAX_LEN, lang
            )));
        }
        // An empty case is stored as no case.
        let case = case.filter(|c| !c.is_empty());
        if let Some(c) = case {
            if c.chars().count() > CASE_MAX_LEN {
                return Err(Error::InvalidInput(format!(
                    "case exceeds {} characters",
                    CASE_MAX_LEN
                )));
            }
        }

        Ok(Self {
            id: new_v7(),
            concept_id,
            translation: text.to_string(),
            lang: lang.to_string(),
            case: case.map(str::to_string),
        })
    }

    /// Exact (lang, case) match.
    pub fn matches(&self, lang: &str, case: Option<&str>) -> bool {
        self.lang == lang && self.case.as_deref() == case
    }
}

impl std::fmt::Display for Translation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.case {
            Some(case) => write!(f, "{} ({}:{})", self.translation, self.lang, case),
            None => write!(f, "{} ({})", self.translation, self.lang),
        }
    }
}
