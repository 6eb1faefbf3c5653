//! Translation fallback for concept labels.
//!
//! Lookup order for a requested `(lang, case)`:
//!
//! 1. exact `(lang, case)` match (a `None` case only matches `None`)
//! 2. with `strict_case`, stop here
//! 3. any case in `lang`
//! 4. the concept's first translation in any language
//!
//! Each tier takes the first match in insertion order.

use tracing::trace;

use crate::models::Concept;

/// Resolve the label to show for `concept`.
///
/// Returns `None` when a strict case lookup misses or when the concept has no
/// translations at all.
pub fn resolve_label<'a>(
    concept: &'a Concept,
    lang: &str,
    case: Option<&str>,
    strict_case: bool,
) -> Option<&'a str> {
    if let Some(t) = concept.find_translation(lang, case) {
        trace!(
            subsystem = "core",
            concept_id = %concept.id,
            lang,
            fallback_tier = 1,
            "Label resolved"
        );
        return Some(&t.translation);
    }
    if strict_case {
        return None;
    }

    if let Some(t) = concept.translations.iter().find(|t| t.lang == lang) {
        trace!(
            subsystem = "core",
            concept_id = %concept.id,
            lang,
            fallback_tier = 2,
            "Label resolved"
        );
        return Some(&t.translation);
    }

    let first = concept.translations.first()?;
    trace!(
        subsystem = "core",
        concept_id = %concept.id,
        lang,
        fallback_tier = 3,
        "Label resolved"
    );
    Some(&first.translation)
}

/// Display text for a concept: its label in `lang`, else its description,
/// else the empty string.
pub fn concept_label<'a>(concept: &'a Concept, lang: &str) -> &'a str {
    resolve_label(concept, lang, None, false)
        .filter(|label| !label.is_empty())
        .or(concept.description.as_deref())
        .unwrap_or("")
}
