//! # kb-core
//!
//! Core types, rendering, and abstractions for the knowledgebase graph.
//!
//! The graph is made of concepts carrying localized labels, statements that
//! link a subject concept (or, for qualifiers, another statement) through a
//! predicate concept to a value, and references backing those statements.
//! Everything in [`labels`], [`render`] and [`time`] is a pure function over
//! already-loaded data; storage lives behind [`ConceptSource`] and
//! [`StatementSource`].

pub mod defaults;
pub mod error;
pub mod labels;
pub mod logging;
pub mod models;
pub mod render;
pub mod time;
pub mod traits;
pub mod uuid_utils;

// Re-export commonly used types at crate root
pub use defaults::{KbConfig, TranslationUniqueness};
pub use error::{Error, Result};
pub use labels::{concept_label, resolve_label};
pub use models::*;
pub use render::{describe_statement, format_coordinate, format_quantity, render_value};
pub use time::{format_time, to_precision_string};
pub use traits::{ConceptSource, StatementSource};
pub use uuid_utils::new_v7;
