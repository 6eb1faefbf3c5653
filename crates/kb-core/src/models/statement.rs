//! Statements (graph edges) and qualifiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::values::TypedValue;
use crate::uuid_utils::new_v7;

/// What a statement hangs off: a subject concept, or another statement when
/// it is a qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum StatementParent {
    Concept(Uuid),
    Statement(Uuid),
}

/// A typed edge: `(subject, pred, value)` or a qualifier on another statement.
///
/// When both `value` and `typed_value` are set, `value` takes precedence for
/// display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub id: Uuid,
    pub parent: StatementParent,
    /// Concept acting as predicate.
    pub pred: Uuid,
    /// Concept acting as value.
    pub value: Option<Uuid>,
    #[serde(default)]
    pub typed_value: TypedValue,
    pub updated_at: DateTime<Utc>,
}

impl Statement {
    pub fn new(parent: StatementParent, pred: Uuid) -> Self {
        Self {
            id: new_v7(),
            parent,
            pred,
            value: None,
            typed_value: TypedValue::None,
            updated_at: Utc::now(),
        }
    }

    pub fn with_value_concept(mut self, value: Uuid) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_typed_value(mut self, typed_value: impl Into<TypedValue>) -> Self {
        self.typed_value = typed_value.into();
        self
    }

    pub fn is_qualifier(&self) -> bool {
        matches!(self.parent, StatementParent::Statement(_))
    }

    /// Subject concept of a top-level statement.
    pub fn subject(&self) -> Option<Uuid> {
        match self.parent {
            StatementParent::Concept(id) => Some(id),
            StatementParent::Statement(_) => None,
        }
    }

    /// Parent statement of a qualifier.
    pub fn parent_statement(&self) -> Option<Uuid> {
        match self.parent {
            StatementParent::Statement(id) => Some(id),
            StatementParent::Concept(_) => None,
        }
    }

    /// Whether `concept` appears as subject, predicate, or value concept.
    pub fn references_concept(&self, concept: Uuid) -> bool {
        self.subject() == Some(concept) || self.pred == concept || self.value == Some(concept)
    }

    /// Refresh `updated_at`; every mutation goes through here.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Column-shaped statement as a relational collaborator stores it, with the
/// parent split into two nullable foreign keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementRow {
    pub id: Uuid,
    pub concept: Option<Uuid>,
    pub statement: Option<Uuid>,
    pub pred: Uuid,
    pub value: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl StatementRow {
    /// Combine a row with its (separately stored) typed value record.
    pub fn into_statement(self, typed_value: TypedValue) -> Result<Statement> {
        let mut statement = Statement::try_from(self)?;
        statement.typed_value = typed_value;
        Ok(statement)
    }
}

impl TryFrom<StatementRow> for Statement {
    type Error = Error;

    /// Exactly one of `concept` and `statement` must be set.
    fn try_from(row: StatementRow) -> Result<Self> {
        let parent = match (row.concept, row.statement) {
            (Some(concept), None) => StatementParent::Concept(concept),
            (None, Some(statement)) => StatementParent::Statement(statement),
            (None, None) => {
                return Err(Error::MalformedStatement(format!(
                    "statement {} has neither a concept nor a parent statement",
                    row.id
                )))
            }
            (Some(_), Some(_)) => {
                return Err(Error::MalformedStatement(format!(
                    "statement {} has both a concept and a parent statement",
                    row.id
                )))
            }
        };

        Ok(Self {
            id: row.id,
            parent,
            pred: row.pred,
            value: row.value,
            typed_value: TypedValue::None,
            updated_at: row.updated_at,
        })
    }
}

impl From<&Statement> for StatementRow {
    fn from(s: &Statement) -> Self {
        Self {
            id: s.id,
            concept: s.subject(),
            statement: s.parent_statement(),
            pred: s.pred,
            value: s.value,
            updated_at: s.updated_at,
        }
    }
}
