//! Read-access traits implemented by whatever persists the graph.
//!
//! The rendering layer never queries storage itself; it only looks up
//! already-materialized entities through these traits.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use uuid::Uuid;

use crate::models::{Concept, Statement};

/// Lookup of concepts by id.
pub trait ConceptSource {
    fn concept(&self, id: Uuid) -> Option<&Concept>;
}

/// Lookup of statements by id, needed to describe qualifiers.
pub trait StatementSource {
    fn statement(&self, id: Uuid) -> Option<&Statement>;
}

impl<T: ConceptSource + ?Sized> ConceptSource for &T {
    fn concept(&self, id: Uuid) -> Option<&Concept> {
        (**self).concept(id)
    }
}

impl<T: StatementSource + ?Sized> StatementSource for &T {
    fn statement(&self, id: Uuid) -> Option<&Statement> {
        (**self).statement(id)
    }
}

impl<S: BuildHasher> ConceptSource for HashMap<Uuid, Concept, S> {
    fn concept(&self, id: Uuid) -> Option<&Concept> {
        self.get(&id)
    }
}

impl ConceptSource for BTreeMap<Uuid, Concept> {
    fn concept(&self, id: Uuid) -> Option<&Concept> {
        self.get(&id)
    }
}

impl ConceptSource for [Concept] {
    fn concept(&self, id: Uuid) -> Option<&Concept> {
        self.iter().find(|c| c.id == id)
    }
}

impl ConceptSource for Vec<Concept> {
    fn concept(&self, id: Uuid) -> Option<&Concept> {
        self.as_slice().concept(id)
    }
}

impl<S: BuildHasher> StatementSource for HashMap<Uuid, Statement, S> {
    fn statement(&self, id: Uuid) -> Option<&Statement> {
        self.get(&id)
    }
}

impl StatementSource for [Statement] {
    fn statement(&self, id: Uuid) -> Option<&Statement> {
        self.iter().find(|s| s.id == id)
    }
}

impl StatementSource for Vec<Statement> {
    fn statement(&self, id: Uuid) -> Option<&Statement> {
        self.as_slice().statement(id)
    }
}
