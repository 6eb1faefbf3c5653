//! Reference operations. References and statements are many-to-many.

use tracing::debug;
use uuid::Uuid;

use kb_core::{Error, Reference, Result, Statement};

use crate::KnowledgeStore;

impl KnowledgeStore {
    /// Create a reference; a URL, when given, must be unique across the store.
    pub fn create_reference(
        &mut self,
        url: Option<&str>,
        description: Option<&str>,
    ) -> Result<Uuid> {
        let reference = Reference::new(url, description)?;
        if let Some(url) = reference.url.as_deref() {
            if self
                .references
                .values()
                .any(|r| r.url.as_deref() == Some(url))
            {
                return Err(Error::Conflict(format!("reference url already exists: {}", url)));
            }
        }

        let id = reference.id;
        self.references.insert(id, reference);
        self.reference_order.push(id);
        debug!(subsystem = "store", reference_id = %id, "Reference created");
        Ok(id)
    }

    pub fn get_reference(&self, id: Uuid) -> Result<&Reference> {
        self.references.get(&id).ok_or(Error::ReferenceNotFound(id))
    }

    /// All references in creation order.
    pub fn list_references(&self) -> impl Iterator<Item = &Reference> + '_ {
        self.reference_order
            .iter()
            .filter_map(move |id| self.references.get(id))
    }

    /// Link a reference to a statement. Linking twice is a no-op.
    pub fn link_reference(&mut self, reference: Uuid, statement: Uuid) -> Result<()> {
        self.get_reference(reference)?;
        self.get_statement(statement)?;
        if self.reference_links.insert((reference, statement)) {
            debug!(
                subsystem = "store",
                reference_id = %reference,
                statement_id = %statement,
                "Reference linked"
            );
        }
        Ok(())
    }

    /// Remove a link; returns whether it existed.
    pub fn unlink_reference(&mut self, reference: Uuid, statement: Uuid) -> Result<bool> {
        self.get_reference(reference)?;
        Ok(self.reference_links.remove(&(reference, statement)))
    }

    /// References backing a statement, in creation order.
    pub fn references_for(&self, statement: Uuid) -> Result<Vec<&Reference>> {
        self.get_statement(statement)?;
        Ok(self
            .list_references()
            .filter(|r| self.reference_links.contains(&(r.id, statement)))
            .collect())
    }

    /// Statements backed by a reference, in creation order.
    pub fn statements_for_reference(&self, reference: Uuid) -> Result<Vec<&Statement>> {
        self.get_reference(reference)?;
        Ok(self
            .statement_order
            .iter()
            .filter(|s| self.reference_links.contains(&(reference, **s)))
            .filter_map(|s| self.statements.get(s))
            .collect())
    }

    pub fn delete_reference(&mut self, id: Uuid) -> Result<()> {
        self.references
            .remove(&id)
            .ok_or(Error::ReferenceNotFound(id))?;
        self.reference_order.retain(|r| *r != id);
        self.reference_links.retain(|(reference, _)| *reference != id);
        debug!(subsystem = "store", reference_id = %id, "Reference deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kb_core::StatementParent;

    fn store_with_statement() -> (KnowledgeStore, Uuid) {
        let mut store = KnowledgeStore::default();
        let subject = store.create_concept(None);
        let pred = store.create_concept(None);
        let s = store
            .create_statement(StatementParent::Concept(subject), pred, None)
            .unwrap();
        (store, s)
    }

    #[test]
    fn test_url_must_be_unique() {
        let mut store = KnowledgeStore::default();
        store
            .create_reference(Some("https://example.org/census"), None)
            .unwrap();
        assert!(matches!(
            store.create_reference(Some("https://example.org/census"), Some("again")),
            Err(Error::Conflict(_))
        ));
        // References without a URL never collide
        store.create_reference(None, Some("notes")).unwrap();
        store.create_reference(None, Some("notes")).unwrap();
        assert_eq!(store.list_references().count(), 3);
    }

    #[test]
    fn test_link_is_many_to_many() {
        let (mut store, s1) = store_with_statement();
        let subject = store.get_statement(s1).unwrap().subject().unwrap();
        let pred = store.get_statement(s1).unwrap().pred;
        let s2 = store
            .create_statement(StatementParent::Concept(subject), pred, None)
            .unwrap();
        let r1 = store.create_reference(Some("https://example.org/a"), None).unwrap();
        let r2 = store.create_reference(None, Some("b")).unwrap();

        store.link_reference(r1, s1).unwrap();
        store.link_reference(r1, s2).unwrap();
        store.link_reference(r2, s1).unwrap();
        store.link_reference(r2, s1).unwrap();

        let refs: Vec<Uuid> = store
            .references_for(s1)
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(refs, vec![r1, r2]);
        assert_eq!(store.statements_for_reference(r1).unwrap().len(), 2);
    }

    #[test]
    fn test_link_requires_both_ends() {
        let (mut store, s) = store_with_statement();
        let r = store.create_reference(None, Some("x")).unwrap();
        assert!(matches!(
            store.link_reference(Uuid::nil(), s),
            Err(Error::ReferenceNotFound(_))
        ));
        assert!(matches!(
            store.link_reference(r, Uuid::nil()),
            Err(Error::StatementNotFound(_))
        ));
    }

    #[test]
    fn test_unlink_and_delete() {
        let (mut store, s) = store_with_statement();
        let r = store.create_reference(None, Some("x")).unwrap();
        store.link_reference(r, s).unwrap();

        assert!(store.unlink_reference(r, s).unwrap());
        assert!(!store.unlink_reference(r, s).unwrap());

        store.link_reference(r, s).unwrap();
        store.delete_reference(r).unwrap();
        assert!(store.references_for(s).unwrap().is_empty());
        assert!(store.get_reference(r).is_err());
        assert!(store.delete_reference(r).is_err());
    }

    #[test]
    fn test_deleting_statement_keeps_reference() {
        let (mut store, s) = store_with_statement();
        let r = store.create_reference(Some("https://example.org/a"), None).unwrap();
        store.link_reference(r, s).unwrap();

        store.delete_statement(s).unwrap();
        assert!(store.get_reference(r).is_ok());
        assert!(store.statements_for_reference(r).unwrap().is_empty());
    }
}
