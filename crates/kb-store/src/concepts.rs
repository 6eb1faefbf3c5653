//! Concept operations.

use std::collections::HashSet;

use tracing::{debug, instrument};
use uuid::Uuid;

use kb_core::{Concept, Error, Result, TypedValue};

use crate::KnowledgeStore;

impl KnowledgeStore {
    /// Create a concept and return its id.
    pub fn create_concept(&mut self, description: Option<&str>) -> Uuid {
        let concept = Concept::new(description.map(str::to_string));
        let id = concept.id;
        self.concepts.insert(id, concept);
        self.concept_order.push(id);
        debug!(subsystem = "store", concept_id = %id, "Concept created");
        id
    }

    pub fn get_concept(&self, id: Uuid) -> Result<&Concept> {
        self.concepts.get(&id).ok_or(Error::ConceptNotFound(id))
    }

    /// All concepts in creation order.
    pub fn list_concepts(&self) -> impl Iterator<Item = &Concept> + '_ {
        self.concept_order
            .iter()
            .filter_map(move |id| self.concepts.get(id))
    }

    pub fn concept_count(&self) -> usize {
        self.concepts.len()
    }

    pub fn update_concept_description(
        &mut self,
        id: Uuid,
        description: Option<&str>,
    ) -> Result<()> {
        let concept = self.concepts.get_mut(&id).ok_or(Error::ConceptNotFound(id))?;
        concept.description = description.map(str::to_string);
        debug!(subsystem = "store", concept_id = %id, "Concept description updated");
        Ok(())
    }

    /// Display label of a concept in the configured default language.
    pub fn label(&self, id: Uuid) -> Result<&str> {
        let concept = self.get_concept(id)?;
        Ok(kb_core::concept_label(concept, self.default_lang()))
    }

    /// Delete a concept with its translations, every statement that uses it
    /// as subject, predicate or value concept, and those statements'
    /// qualifiers. Returns the number of statements removed.
    ///
    /// Fails with [`Error::Protected`] while a coordinate that survives the
    /// cascade still names the concept as its globe.
    #[instrument(
        skip(self),
        fields(subsystem = "store", component = "concepts", op = "delete_concept")
    )]
    pub fn delete_concept(&mut self, id: Uuid) -> Result<usize> {
        if !self.concepts.contains_key(&id) {
            return Err(Error::ConceptNotFound(id));
        }

        let roots: Vec<Uuid> = self
            .statements
            .values()
            .filter(|s| s.references_concept(id))
            .map(|s| s.id)
            .collect();
        let doomed = self.cascade_from(&roots);

        let protected_by: Vec<Uuid> = self
            .statements
            .values()
            .filter(|s| !doomed.contains(&s.id))
            .filter(|s| matches!(&s.typed_value, TypedValue::Coordinate(c) if c.globe == id))
            .map(|s| s.id)
            .collect();
        if !protected_by.is_empty() {
            return Err(Error::Protected(format!(
                "concept {} is the globe of {} coordinate value(s)",
                id,
                protected_by.len()
            )));
        }

        self.remove_statements(&doomed);
        self.concepts.remove(&id);
        self.concept_order.retain(|c| *c != id);

        debug!(
            subsystem = "store",
            concept_id = %id,
            cascade_count = doomed.len(),
            "Concept deleted"
        );
        Ok(doomed.len())
    }

    /// `roots` plus every qualifier hanging beneath them, at any depth.
    pub(crate) fn cascade_from(&self, roots: &[Uuid]) -> HashSet<Uuid> {
        let mut doomed: HashSet<Uuid> = roots.iter().copied().collect();
        let mut frontier: Vec<Uuid> = roots.to_vec();

        while let Some(parent) = frontier.pop() {
            for s in self.statements.values() {
                if s.parent_statement() == Some(parent) && doomed.insert(s.id) {
                    frontier.push(s.id);
                }
            }
        }
        doomed
    }

    /// Drop statements, their value records and their reference links.
    pub(crate) fn remove_statements(&mut self, ids: &HashSet<Uuid>) {
        for id in ids {
            self.statements.remove(id);
        }
        self.statement_order.retain(|s| !ids.contains(s));
        self.reference_links
            .retain(|(_, statement)| !ids.contains(statement));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kb_core::{CoordinateValue, StatementParent, StringValue};

    #[test]
    fn test_create_and_list_in_order() {
        let mut store = KnowledgeStore::default();
        let a = store.create_concept(Some("first"));
        let b = store.create_concept(None);
        let c = store.create_concept(Some("third"));

        let ids: Vec<Uuid> = store.list_concepts().map(|c| c.id).collect();
        assert_eq!(ids, vec![a, b, c]);
        assert_eq!(store.concept_count(), 3);
    }

    #[test]
    fn test_get_missing_concept() {
        let store = KnowledgeStore::default();
        assert!(matches!(
            store.get_concept(Uuid::nil()),
            Err(Error::ConceptNotFound(_))
        ));
    }

    #[test]
    fn test_update_description() {
        let mut store = KnowledgeStore::default();
        let id = store.create_concept(None);
        assert_eq!(store.label(id).unwrap(), "");

        store.update_concept_description(id, Some("a river")).unwrap();
        assert_eq!(store.label(id).unwrap(), "a river");
        assert!(store.update_concept_description(Uuid::nil(), None).is_err());
    }

    #[test]
    fn test_label_follows_configured_language() {
        let config = kb_core::KbConfig::default().with_default_lang("sv");
        let fx = crate::test_fixtures::build_helsinki(KnowledgeStore::new(config)).unwrap();
        assert_eq!(fx.store.default_lang(), "sv");
        assert_eq!(fx.store.label(fx.city).unwrap(), "Helsingfors");

        let fx = crate::test_fixtures::helsinki();
        assert_eq!(fx.store.label(fx.city).unwrap(), "Helsinki");
    }

    #[test]
    fn test_delete_cascades_to_statements_and_qualifiers() {
        let mut store = KnowledgeStore::default();
        let subject = store.create_concept(None);
        let pred = store.create_concept(None);
        let other = store.create_concept(None);

        let top = store
            .create_statement(StatementParent::Concept(subject), pred, None)
            .unwrap();
        let qualifier = store
            .create_statement(StatementParent::Statement(top), other, None)
            .unwrap();
        let nested = store
            .create_statement(StatementParent::Statement(qualifier), other, None)
            .unwrap();
        let unrelated = store
            .create_statement(StatementParent::Concept(other), other, None)
            .unwrap();

        assert_eq!(store.delete_concept(subject).unwrap(), 3);
        assert!(store.get_statement(top).is_err());
        assert!(store.get_statement(qualifier).is_err());
        assert!(store.get_statement(nested).is_err());
        assert!(store.get_statement(unrelated).is_ok());
        assert!(store.get_concept(subject).is_err());
    }

    #[test]
    fn test_deleting_a_predicate_removes_its_statements() {
        let mut store = KnowledgeStore::default();
        let subject = store.create_concept(None);
        let pred = store.create_concept(None);
        let value = store.create_concept(None);
        let s = store
            .create_statement(StatementParent::Concept(subject), pred, Some(value))
            .unwrap();

        assert_eq!(store.delete_concept(value).unwrap(), 1);
        assert!(store.get_statement(s).is_err());
        assert!(store.get_concept(subject).is_ok());
    }

    #[test]
    fn test_globe_is_protected() {
        let mut store = KnowledgeStore::default();
        let earth = store.create_concept(Some("Earth"));
        let city = store.create_concept(None);
        let location = store.create_concept(None);
        let s = store
            .create_statement(StatementParent::Concept(city), location, None)
            .unwrap();
        store
            .attach_value(s, CoordinateValue::new(60.17, 24.94, 10.0, None, earth).unwrap())
            .unwrap();

        assert!(matches!(store.delete_concept(earth), Err(Error::Protected(_))));
        assert!(store.get_concept(earth).is_ok());
        assert!(store.get_statement(s).is_ok());

        store.clear_value(s).unwrap();
        assert_eq!(store.delete_concept(earth).unwrap(), 0);
    }

    #[test]
    fn test_globe_used_inside_the_cascade_is_not_protected() {
        let mut store = KnowledgeStore::default();
        let mars = store.create_concept(Some("Mars"));
        let location = store.create_concept(None);
        let s = store
            .create_statement(StatementParent::Concept(mars), location, None)
            .unwrap();
        store
            .attach_value(s, CoordinateValue::new(-4.5, 137.4, 100.0, None, mars).unwrap())
            .unwrap();

        assert_eq!(store.delete_concept(mars).unwrap(), 1);
    }

    #[test]
    fn test_delete_drops_reference_links() {
        let mut store = KnowledgeStore::default();
        let subject = store.create_concept(None);
        let pred = store.create_concept(None);
        let s = store
            .create_statement(StatementParent::Concept(subject), pred, None)
            .unwrap();
        store.attach_value(s, StringValue::new("x")).unwrap();
        let r = store
            .create_reference(Some("https://example.org/source"), None)
            .unwrap();
        store.link_reference(r, s).unwrap();

        store.delete_concept(subject).unwrap();
        assert!(store.statements_for_reference(r).unwrap().is_empty());
        assert!(store.get_reference(r).is_ok());
    }
}
