//! Plain-text overviews of a concept, one line per item.
//!
//! ```text
//! - population: 656920
//!   - point in time: 2021
//! - nickname: "Stadi"
//! ```

use std::fmt::Write;

use uuid::Uuid;

use kb_core::render::label_of;
use kb_core::{render_value, Result, Statement};

use crate::KnowledgeStore;

impl KnowledgeStore {
    /// Statements about a concept as `- {pred}: {value}`, with qualifiers
    /// indented two spaces per level beneath their statement.
    pub fn concept_outline(&self, concept: Uuid, lang: &str) -> Result<String> {
        let mut out = String::new();
        for statement in self.statements_of(concept)? {
            self.write_outline_entry(&mut out, statement, lang, 0)?;
        }
        Ok(out)
    }

    fn write_outline_entry(
        &self,
        out: &mut String,
        statement: &Statement,
        lang: &str,
        depth: usize,
    ) -> Result<()> {
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "{:indent$}- {}: {}",
            "",
            label_of(self, statement.pred, lang),
            render_value(statement, self, lang),
            indent = depth * 2
        );
        for qualifier in self.qualifiers_of(statement.id)? {
            self.write_outline_entry(out, qualifier, lang, depth + 1)?;
        }
        Ok(())
    }

    /// Translations of a concept as `- {lang}: {text}` or
    /// `- {lang} / {case}: {text}`, in insertion order.
    pub fn translation_list(&self, concept: Uuid) -> Result<String> {
        let concept = self.get_concept(concept)?;
        let mut out = String::new();
        for t in &concept.translations {
            let _ = match &t.case {
                Some(case) => writeln!(out, "- {} / {}: {}", t.lang, case, t.translation),
                None => writeln!(out, "- {}: {}", t.lang, t.translation),
            };
        }
        Ok(out)
    }
}
