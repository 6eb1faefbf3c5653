//! Display strings for statements and their values.
//!
//! Value precedence, first applicable wins:
//!
//! 1. the value concept's label (or description)
//! 2. the attached [`TypedValue`]
//! 3. [`NO_VALUE_MARKER`]
//!
//! Concepts that cannot be looked up render as an empty label and are logged;
//! nothing here returns an error.

use tracing::warn;
use uuid::Uuid;

use crate::defaults::NO_VALUE_MARKER;
use crate::labels::concept_label;
use crate::models::{CoordinateValue, QuantityValue, Statement, StatementParent, TypedValue};
use crate::traits::{ConceptSource, StatementSource};

/// Label of the concept `id`, or `""` when the source does not have it.
pub fn label_of<C: ConceptSource + ?Sized>(concepts: &C, id: Uuid, lang: &str) -> String {
    match concepts.concept(id) {
        Some(concept) => concept_label(concept, lang).to_string(),
        None => {
            warn!(
                subsystem = "core",
                concept_id = %id,
                "Concept missing from source, rendering empty label"
            );
            String::new()
        }
    }
}

/// Render the value side of a statement.
pub fn render_value<C: ConceptSource + ?Sized>(
    statement: &Statement,
    concepts: &C,
    lang: &str,
) -> String {
    if let Some(value) = statement.value {
        return label_of(concepts, value, lang);
    }

    match &statement.typed_value {
        TypedValue::String(s) => s.to_string(),
        TypedValue::Quantity(q) => format_quantity(q),
        TypedValue::Time(t) => t.to_string(),
        TypedValue::Coordinate(c) => format_coordinate(c, &label_of(concepts, c.globe, lang)),
        TypedValue::None => NO_VALUE_MARKER.to_string(),
    }
}

/// `"{lower} - {upper}"` when both bounds are set, otherwise the value.
///
/// Decimals print in plain notation with their stored scale.
pub fn format_quantity(quantity: &QuantityValue) -> String {
    match (&quantity.lower_bound, &quantity.upper_bound) {
        (Some(lower), Some(upper)) => {
            format!("{} - {}", lower.to_plain_string(), upper.to_plain_string())
        }
        _ => quantity.value.to_plain_string(),
    }
}

/// `"{lat} lat, {lon} lon [at {height} m height] with {precision} m precision on {globe}"`.
pub fn format_coordinate(coordinate: &CoordinateValue, globe_label: &str) -> String {
    match coordinate.height_m {
        Some(height) => format!(
            "{} lat, {} lon at {} m height with {} m precision on {}",
            coordinate.latitude, coordinate.longitude, height, coordinate.precision_m, globe_label
        ),
        None => format!(
            "{} lat, {} lon with {} m precision on {}",
            coordinate.latitude, coordinate.longitude, coordinate.precision_m, globe_label
        ),
    }
}

/// One-line description of a statement.
///
/// Top-level: `"{subject}, {pred}, {value}"`.
/// Qualifier: `"{parent description} ({pred}, {value})"`.
pub fn describe_statement<S>(statement: &Statement, source: &S, lang: &str) -> String
where
    S: ConceptSource + StatementSource + ?Sized,
{
    let pred = label_of(source, statement.pred, lang);
    let value = render_value(statement, source, lang);

    match statement.parent {
        StatementParent::Concept(subject) => {
            format!("{}, {}, {}", label_of(source, subject, lang), pred, value)
        }
        StatementParent::Statement(parent_id) => {
            let parent = match source.statement(parent_id) {
                Some(parent) => describe_statement(parent, source, lang),
                None => {
                    warn!(
                        subsystem = "core",
                        statement_id = %statement.id,
                        parent_id = %parent_id,
                        "Parent statement missing from source"
                    );
                    String::new()
                }
            };
            format!("{} ({}, {})", parent, pred, value)
        }
    }
}
