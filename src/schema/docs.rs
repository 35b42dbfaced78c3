//! Documentation metadata for decorated shapes, emitted as OpenAPI-shaped
//! JSON. Rendering beyond this JSON belongs to the external documentation
//! layer; this module only produces what that layer consumes.

use crate::schema::rules::{FieldDoc, FieldKind};
use crate::schema::shape::{ResponseShape, ShapeMeta};
use serde_json::{json, Map, Value};

fn property(doc: &FieldDoc) -> Value {
    let mut prop = Map::new();
    if doc.is_array {
        prop.insert("type".into(), json!("array"));
        prop.insert("items".into(), json!({}));
    } else if let Some(kind) = doc.kind {
        match kind {
            FieldKind::Enum => {
                prop.insert("type".into(), json!("string"));
                if let Some(ref values) = doc.enum_values {
                    prop.insert("enum".into(), Value::Array(values.clone()));
                }
            }
            other => {
                prop.insert("type".into(), json!(other.as_str()));
            }
        }
    }
    // No kind and not an array: the field stays documented, just untyped.
    prop.insert("description".into(), json!(doc.description));
    if !doc.example.is_null() {
        prop.insert("example".into(), doc.example.clone());
    }
    Value::Object(prop)
}

fn schema_object(title: &str, fields: impl Iterator<Item = (String, FieldDoc)>) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for (name, doc) in fields {
        if doc.required {
            required.push(Value::String(name.clone()));
        }
        properties.insert(name, property(&doc));
    }
    json!({
        "title": title,
        "type": "object",
        "required": required,
        "properties": properties,
    })
}

/// Schema for a decorated input shape. Undecorated shapes render with no
/// properties rather than failing.
pub fn input_shape_schema(shape: &ShapeMeta) -> Value {
    schema_object(
        shape.name(),
        shape.fields.iter().map(|f| (f.name.clone(), f.rule.doc())),
    )
}

/// Schema for an enhanced response shape.
pub fn response_shape_schema(shape: &ResponseShape) -> Value {
    schema_object(
        shape.name(),
        shape.fields.iter().map(|f| (f.name.clone(), f.doc.clone())),
    )
}

/// Collects the declared shape schemas of every registered resource. Shared
/// read-only after startup; the /docs route serves it as one document.
#[derive(Clone, Debug, Default)]
pub struct DocRegistry {
    schemas: Vec<(String, Value)>,
}

impl DocRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_input(&mut self, shape: &ShapeMeta) {
        self.schemas.push((shape.name().to_string(), input_shape_schema(shape)));
    }

    pub fn register_response(&mut self, shape: &ResponseShape) {
        self.schemas.push((shape.name().to_string(), response_shape_schema(shape)));
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// One OpenAPI-shaped components document over all registered shapes.
    pub fn to_document(&self) -> Value {
        let mut schemas = Map::new();
        for (name, schema) in &self.schemas {
            schemas.insert(name.clone(), schema.clone());
        }
        json!({
            "components": {
                "schemas": schemas,
            }
        })
    }
}
