//! Statement and value-record operations.

use tracing::{debug, instrument};
use uuid::Uuid;

use kb_core::{Error, Result, Statement, StatementParent, TypedValue};

use crate::KnowledgeStore;

impl KnowledgeStore {
    /// Create a statement (or qualifier) and return its id.
    ///
    /// The parent, predicate and optional value concept must all exist.
    pub fn create_statement(
        &mut self,
        parent: StatementParent,
        pred: Uuid,
        value: Option<Uuid>,
    ) -> Result<Uuid> {
        match parent {
            StatementParent::Concept(id) => {
                self.get_concept(id)?;
            }
            StatementParent::Statement(id) => {
                self.get_statement(id)?;
            }
        }
        self.get_concept(pred)?;
        if let Some(value) = value {
            self.get_concept(value)?;
        }

        let mut statement = Statement::new(parent, pred);
        statement.value = value;
        let id = statement.id;
        self.statements.insert(id, statement);
        self.statement_order.push(id);

        debug!(
            subsystem = "store",
            statement_id = %id,
            pred = %pred,
            qualifier = matches!(parent, StatementParent::Statement(_)),
            "Statement created"
        );
        Ok(id)
    }

    pub fn get_statement(&self, id: Uuid) -> Result<&Statement> {
        self.statements.get(&id).ok_or(Error::StatementNotFound(id))
    }

    fn statement_mut(&mut self, id: Uuid) -> Result<&mut Statement> {
        self.statements
            .get_mut(&id)
            .ok_or(Error::StatementNotFound(id))
    }

    fn children(&self, parent: StatementParent) -> Vec<&Statement> {
        self.statement_order
            .iter()
            .filter_map(|id| self.statements.get(id))
            .filter(|s| s.parent == parent)
            .collect()
    }

    /// Top-level statements about a concept, in creation order.
    pub fn statements_of(&self, concept: Uuid) -> Result<Vec<&Statement>> {
        self.get_concept(concept)?;
        Ok(self.children(StatementParent::Concept(concept)))
    }

    /// Qualifiers attached to a statement, in creation order.
    pub fn qualifiers_of(&self, statement: Uuid) -> Result<Vec<&Statement>> {
        self.get_statement(statement)?;
        Ok(self.children(StatementParent::Statement(statement)))
    }

    /// Set or clear the value concept.
    pub fn set_value_concept(&mut self, id: Uuid, value: Option<Uuid>) -> Result<()> {
        if let Some(value) = value {
            self.get_concept(value)?;
        }
        let statement = self.statement_mut(id)?;
        statement.value = value;
        statement.touch();
        debug!(subsystem = "store", statement_id = %id, "Value concept set");
        Ok(())
    }

    /// Attach the statement's typed value record.
    ///
    /// Fails with [`Error::Conflict`] when a value record is already
    /// attached; [`clear_value`](Self::clear_value) it first.
    pub fn attach_value(&mut self, id: Uuid, value: impl Into<TypedValue>) -> Result<()> {
        let value = value.into();
        if value.is_none() {
            return Err(Error::InvalidInput(
                "no value to attach; use clear_value to detach".to_string(),
            ));
        }
        value.validate()?;
        if let TypedValue::Coordinate(c) = &value {
            self.get_concept(c.globe)?;
        }

        let statement = self.statement_mut(id)?;
        if !statement.typed_value.is_none() {
            return Err(Error::Conflict(format!(
                "statement {} already has a {} value",
                id,
                statement.typed_value.kind()
            )));
        }
        let kind = value.kind();
        statement.typed_value = value;
        statement.touch();
        debug!(subsystem = "store", statement_id = %id, kind, "Value attached");
        Ok(())
    }

    /// Detach and return the typed value record.
    pub fn clear_value(&mut self, id: Uuid) -> Result<TypedValue> {
        let statement = self.statement_mut(id)?;
        let previous = std::mem::take(&mut statement.typed_value);
        statement.touch();
        debug!(
            subsystem = "store",
            statement_id = %id,
            kind = previous.kind(),
            "Value cleared"
        );
        Ok(previous)
    }

    /// Delete a statement and its qualifiers. Returns the number removed.
    #[instrument(
        skip(self),
        fields(subsystem = "store", component = "statements", op = "delete_statement")
    )]
    pub fn delete_statement(&mut self, id: Uuid) -> Result<usize> {
        self.get_statement(id)?;
        let doomed = self.cascade_from(&[id]);
        self.remove_statements(&doomed);
        debug!(
            subsystem = "store",
            statement_id = %id,
            cascade_count = doomed.len(),
            "Statement deleted"
        );
        Ok(doomed.len())
    }

    /// Display string of a statement's value.
    pub fn render_statement_value(&self, id: Uuid, lang: &str) -> Result<String> {
        Ok(kb_core::render_value(self.get_statement(id)?, self, lang))
    }

    /// One-line description of a statement.
    pub fn describe(&self, id: Uuid, lang: &str) -> Result<String> {
        Ok(kb_core::describe_statement(self.get_statement(id)?, self, lang))
    }
}
