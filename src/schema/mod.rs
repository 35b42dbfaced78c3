//! Metadata layer: field rules, mapping tables, shapes, appliers, docs.

pub mod apply;
pub mod docs;
pub mod rules;
pub mod shape;
pub mod table;

pub use apply::{apply_input, apply_response};
pub use docs::{input_shape_schema, response_shape_schema, DocRegistry};
pub use rules::{infer_kind, Bounds, FieldDoc, FieldKind, FieldRule};
pub use shape::{
    DecoratedField, EntityShape, Instance, ResponseField, ResponseShape, SchemaDiagnostic,
    ShapeMeta, BASE_FIELDS,
};
pub use table::{FieldRuleTable, ResponseFieldSpec, ResponseFieldTable, RuleProducer};
