//! Translation operations.
//!
//! A (lang, case) pair is unique within the configured scope. As with a SQL
//! unique index, a missing case never collides with anything.

use tracing::debug;
use uuid::Uuid;

use kb_core::{Error, Result, Translation, TranslationUniqueness};

use crate::KnowledgeStore;

impl KnowledgeStore {
    /// Append a translation to a concept and return its id.
    pub fn add_translation(
        &mut self,
        concept_id: Uuid,
        text: &str,
        lang: &str,
        case: Option<&str>,
    ) -> Result<Uuid> {
        if !self.concepts.contains_key(&concept_id) {
            return Err(Error::ConceptNotFound(concept_id));
        }
        let translation = Translation::new(concept_id, text, lang, case)?;

        if let Some(case) = translation.case.as_deref() {
            if let Some(existing) = self.find_conflicting_translation(concept_id, lang, case) {
                return Err(Error::Conflict(format!(
                    "translation ({}, {}) already exists on concept {}",
                    lang, case, existing
                )));
            }
        }

        let id = translation.id;
        if let Some(concept) = self.concepts.get_mut(&concept_id) {
            concept.translations.push(translation);
        }
        debug!(
            subsystem = "store",
            concept_id = %concept_id,
            translation_id = %id,
            lang,
            "Translation added"
        );
        Ok(id)
    }

    /// Owner of an existing translation with this (lang, case), within the
    /// configured uniqueness scope.
    fn find_conflicting_translation(
        &self,
        concept_id: Uuid,
        lang: &str,
        case: &str,
    ) -> Option<Uuid> {
        let clashes = |owner: Uuid| {
            self.concepts
                .get(&owner)
                .is_some_and(|c| c.find_translation(lang, Some(case)).is_some())
        };
        match self.config.translation_uniqueness {
            TranslationUniqueness::PerConcept => Some(concept_id).filter(|id| clashes(*id)),
            TranslationUniqueness::Global => {
                self.concept_order.iter().copied().find(|id| clashes(*id))
            }
        }
    }

    pub fn get_translation(&self, id: Uuid) -> Result<&Translation> {
        self.concepts
            .values()
            .flat_map(|c| c.translations.iter())
            .find(|t| t.id == id)
            .ok_or(Error::TranslationNotFound(id))
    }

    pub fn remove_translation(&mut self, id: Uuid) -> Result<()> {
        for concept in self.concepts.values_mut() {
            if let Some(pos) = concept.translations.iter().position(|t| t.id == id) {
                concept.translations.remove(pos);
                debug!(subsystem = "store", translation_id = %id, "Translation removed");
                return Ok(());
            }
        }
        Err(Error::TranslationNotFound(id))
    }
}
