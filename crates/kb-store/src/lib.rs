//! # kb-store
//!
//! In-memory storage layer for the knowledgebase graph.
//!
//! This crate provides:
//! - [`KnowledgeStore`], owning every concept, statement and reference
//! - Ownership cascades on delete, with coordinate globes protected
//! - Uniqueness rules for translations and reference URLs
//! - At most one typed value per statement
//! - Plain-text outline views of a concept's statements and translations
//!
//! ## Example
//!
//! ```rust
//! use kb_store::{KnowledgeStore, StatementParent, StringValue};
//!
//! let mut store = KnowledgeStore::default();
//! let city = store.create_concept(None);
//! store.add_translation(city, "Helsinki", "en", None)?;
//! let nickname = store.create_concept(None);
//! store.add_translation(nickname, "nickname", "en", None)?;
//!
//! let statement = store.create_statement(StatementParent::Concept(city), nickname, None)?;
//! store.attach_value(statement, StringValue::new("Stadi"))?;
//!
//! assert_eq!(store.describe(statement, "en")?, "Helsinki, nickname, \"Stadi\"");
//! # Ok::<(), kb_store::Error>(())
//! ```

pub mod concepts;
pub mod references;
pub mod statements;
pub mod translations;
pub mod views;

// Fixtures shared by unit and integration tests
pub mod test_fixtures;

use std::collections::{BTreeSet, HashMap};

use uuid::Uuid;

// Re-export core types
pub use kb_core::*;

/// Owns the whole graph and enforces its schema rules.
///
/// Each entity map is paired with an id list recording creation order, which
/// listings follow.
#[derive(Debug, Default)]
pub struct KnowledgeStore {
    config: KbConfig,
    concepts: HashMap<Uuid, Concept>,
    concept_order: Vec<Uuid>,
    statements: HashMap<Uuid, Statement>,
    statement_order: Vec<Uuid>,
    references: HashMap<Uuid, Reference>,
    reference_order: Vec<Uuid>,
    /// (reference, statement) pairs.
    reference_links: BTreeSet<(Uuid, Uuid)>,
}

impl KnowledgeStore {
    /// Create an empty store with the given configuration.
    pub fn new(config: KbConfig) -> Self {
        tracing::info!(
            subsystem = "store",
            default_lang = %config.default_lang,
            translation_uniqueness = %config.translation_uniqueness,
            "Knowledge store created"
        );
        Self {
            config,
            ..Self::default()
        }
    }

    /// Create an empty store configured from the environment.
    pub fn from_env() -> Self {
        Self::new(KbConfig::from_env())
    }

    pub fn config(&self) -> &KbConfig {
        &self.config
    }

    /// Language used by [`label`](Self::label).
    pub fn default_lang(&self) -> &str {
        &self.config.default_lang
    }
}

impl ConceptSource for KnowledgeStore {
    fn concept(&self, id: Uuid) -> Option<&Concept> {
        self.concepts.get(&id)
    }
}

impl StatementSource for KnowledgeStore {
    fn statement(&self, id: Uuid) -> Option<&Statement> {
        self.statements.get(&id)
    }
}
