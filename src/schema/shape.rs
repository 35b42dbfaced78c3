//! Resource shapes and their runtime instances. A shape is a named record
//! whose field semantics live entirely in its mapping table; construction is
//! a synthesized shallow copy, never a hand-written constructor.

use crate::schema::rules::{FieldDoc, FieldRule};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// Base fields every entity exposes, declared ahead of resource fields.
pub const BASE_FIELDS: [&str; 3] = ["id", "createdAt", "updatedAt"];

/// Warning-level problems found while decorating a shape. Logged and recorded
/// on the shape; never fatal to resource registration.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SchemaDiagnostic {
    #[error("shape {shape}: mapping table missing; left undecorated")]
    MissingTable { shape: String },
    #[error("shape {shape}: mapping table empty; left undecorated")]
    EmptyTable { shape: String },
    #[error("shape {shape}: field {field}: kind not declared and not inferable from example")]
    KindInference { shape: String, field: String },
}

/// A runtime record: JSON object plus the name of the shape that built it.
#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    shape: String,
    values: Map<String, Value>,
}

impl Instance {
    fn new(shape: &str) -> Self {
        Instance {
            shape: shape.to_string(),
            values: Map::new(),
        }
    }

    pub fn shape_name(&self) -> &str {
        &self.shape
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn set(&mut self, field: &str, value: Value) {
        self.values.insert(field.to_string(), value);
    }

    /// Flatten back to a plain JSON object.
    pub fn to_plain_object(&self) -> Value {
        Value::Object(self.values.clone())
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }
}

impl Serialize for Instance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

/// Shallow copy of every top-level entry of `partial` onto `target`.
/// Last writer wins; a non-object partial is ignored.
fn copy_partial(target: &mut Instance, partial: &Value) {
    match partial {
        Value::Object(map) => {
            for (k, v) in map {
                target.values.insert(k.clone(), v.clone());
            }
        }
        other => {
            tracing::debug!(shape = %target.shape, "non-object partial ignored: {}", type_name(other));
        }
    }
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// An entity's declared record type. Fields are names only; validation and
/// documentation belong to the mapping tables applied to the input and
/// response shapes.
#[derive(Clone, Debug)]
pub struct EntityShape {
    name: String,
    fields: Vec<String>,
}

impl EntityShape {
    pub fn new(name: &str) -> Self {
        EntityShape {
            name: name.to_string(),
            fields: Vec::new(),
        }
    }

    /// Declare the base fields (id, createdAt, updatedAt) ahead of resource
    /// fields, so shapes built on the base expose them on the merged record.
    pub fn with_base_fields(mut self) -> Self {
        for f in BASE_FIELDS {
            if !self.fields.iter().any(|n| n == f) {
                self.fields.push(f.to_string());
            }
        }
        self
    }

    pub fn fields(mut self, names: &[&str]) -> Self {
        for f in names {
            if !self.fields.iter().any(|n| n == f) {
                self.fields.push((*f).to_string());
            }
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_fields(&self) -> &[String] {
        &self.fields
    }

    /// Synthesized constructor. Base construction runs first and defaults
    /// nothing; the partial copy runs after, so partial values always win.
    /// No partial leaves every field unset.
    pub fn construct(&self, partial: Option<&Value>) -> Instance {
        let mut instance = Instance::new(&self.name);
        if let Some(p) = partial {
            copy_partial(&mut instance, p);
        }
        instance
    }
}

/// One decorated input field: the name plus its resolved rule bundle.
#[derive(Clone, Debug)]
pub struct DecoratedField {
    pub name: String,
    pub rule: FieldRule,
}

/// An input shape after decoration: validation predicates and documentation
/// attributes attached per field, in mapping-table order.
#[derive(Clone, Debug)]
pub struct ShapeMeta {
    name: String,
    pub fields: Vec<DecoratedField>,
    pub diagnostics: Vec<SchemaDiagnostic>,
}

impl ShapeMeta {
    pub fn named(name: &str) -> Self {
        ShapeMeta {
            name: name.to_string(),
            fields: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// False when the shape degraded to undecorated (no validation, no docs).
    pub fn is_decorated(&self) -> bool {
        !self.fields.is_empty()
    }
}

/// One documented response field.
#[derive(Clone, Debug)]
pub struct ResponseField {
    pub name: String,
    pub doc: FieldDoc,
}

/// A response shape after enhancement: documentation attributes plus the same
/// synthesized shallow-copy construction entities get. The declared name is
/// preserved for documentation grouping.
#[derive(Clone, Debug)]
pub struct ResponseShape {
    name: String,
    pub fields: Vec<ResponseField>,
    pub diagnostics: Vec<SchemaDiagnostic>,
}

impl ResponseShape {
    pub fn named(name: &str) -> Self {
        ResponseShape {
            name: name.to_string(),
            fields: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build a response instance from a fully-formed source object. Response
    /// instances are never hand-assembled field by field.
    pub fn construct(&self, source: &Value) -> Instance {
        let mut instance = Instance::new(&self.name);
        copy_partial(&mut instance, source);
        instance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn construct_shallow_copies_partial() {
        let shape = EntityShape::new("Payment").with_base_fields().fields(&["amount", "currency"]);
        let built = shape.construct(Some(&json!({"amount": 99.99, "currency": "USD"})));
        assert_eq!(built.get("amount"), Some(&json!(99.99)));
        assert_eq!(built.get("currency"), Some(&json!("USD")));
        assert_eq!(built.get("id"), None);
    }

    #[test]
    fn construct_without_partial_leaves_fields_unset() {
        let shape = EntityShape::new("Payment").with_base_fields();
        let built = shape.construct(None);
        assert_eq!(built.to_plain_object(), json!({}));
    }

    #[test]
    fn construct_ignores_non_object_partial() {
        let shape = EntityShape::new("Payment");
        let built = shape.construct(Some(&json!("not an object")));
        assert_eq!(built.to_plain_object(), json!({}));
    }

    #[test]
    fn base_fields_exposed_on_merged_declaration() {
        let shape = EntityShape::new("Payment").with_base_fields().fields(&["amount"]);
        let declared: Vec<&str> = shape.declared_fields().iter().map(String::as_str).collect();
        assert_eq!(declared, vec!["id", "createdAt", "updatedAt", "amount"]);
    }

    #[test]
    fn reconstruction_from_plain_object_is_idempotent() {
        let shape = EntityShape::new("Payment").with_base_fields();
        let original = shape.construct(Some(&json!({
            "id": 1, "amount": 42.5, "currency": "EUR", "createdAt": "2026-01-01T00:00:00Z"
        })));
        let rebuilt = shape.construct(Some(&original.to_plain_object()));
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn response_construct_preserves_declared_name() {
        let shape = ResponseShape::named("PaymentResponse");
        let built = shape.construct(&json!({"id": 7, "status": "pending"}));
        assert_eq!(shape.name(), "PaymentResponse");
        assert_eq!(built.shape_name(), "PaymentResponse");
        assert_eq!(built.get("status"), Some(&json!("pending")));
    }

    #[test]
    fn response_reconstruction_is_idempotent() {
        let shape = ResponseShape::named("PaymentResponse");
        let original = shape.construct(&json!({"id": 3, "amount": 10.0}));
        let rebuilt = shape.construct(&original.to_plain_object());
        assert_eq!(rebuilt, original);
    }
}
