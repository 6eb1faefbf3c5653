//! Knowledge graph data model.

pub mod concept;
pub mod reference;
pub mod statement;
pub mod values;

pub use concept::{Concept, Translation};
pub use reference::Reference;
pub use statement::{Statement, StatementParent, StatementRow};
pub use values::{
    CoordinateValue, QuantityValue, StringValue, TimePrecision, TimeValue, TypedValue,
};
