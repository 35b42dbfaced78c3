//! Mapping tables: per-resource field configuration, the single source of
//! truth for both input validation and response documentation.

use crate::schema::rules::{FieldKind, FieldRule};
use serde_json::Value;

/// Zero-argument producer of a field rule. Input-side tables hold producers
/// rather than literal rules so each application resolves a fresh bundle.
pub type RuleProducer = Box<dyn Fn() -> FieldRule + Send + Sync>;

/// Input-side mapping table: ordered (field name, rule producer) pairs.
/// Insertion order is the order validation errors are reported in.
#[derive(Default)]
pub struct FieldRuleTable {
    fields: Vec<(String, RuleProducer)>,
}

impl FieldRuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field. Names are unique within a table; redeclaring a name
    /// replaces the earlier producer in place and logs a warning.
    pub fn field<F>(mut self, name: &str, producer: F) -> Self
    where
        F: Fn() -> FieldRule + Send + Sync + 'static,
    {
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| n == name) {
            tracing::warn!(field = %name, "duplicate field in mapping table; replacing earlier rule");
            slot.1 = Box::new(producer);
        } else {
            self.fields.push((name.to_string(), Box::new(producer)));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleProducer)> {
        self.fields.iter().map(|(n, p)| (n.as_str(), p))
    }
}

/// Response-side field configuration: a literal rule, no producer closure.
#[derive(Clone, Debug)]
pub struct ResponseFieldSpec {
    pub description: String,
    pub example: Value,
    pub required: bool,
    pub kind: Option<FieldKind>,
    pub enum_values: Option<Vec<Value>>,
    pub is_array: bool,
}

impl ResponseFieldSpec {
    pub fn new(description: &str, example: Value) -> Self {
        ResponseFieldSpec {
            description: description.to_string(),
            example,
            required: true,
            kind: None,
            enum_values: None,
            is_array: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Explicit kind; without one the response applier infers it from the
    /// example value.
    pub fn kind(mut self, kind: FieldKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn enum_of(mut self, values: &[&str]) -> Self {
        self.kind = Some(FieldKind::Enum);
        self.enum_values = Some(values.iter().map(|v| Value::String(v.to_string())).collect());
        self
    }

    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }
}

/// Response-side mapping table: ordered (field name, literal spec) pairs.
#[derive(Clone, Debug, Default)]
pub struct ResponseFieldTable {
    fields: Vec<(String, ResponseFieldSpec)>,
}

impl ResponseFieldTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &str, spec: ResponseFieldSpec) -> Self {
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| n == name) {
            tracing::warn!(field = %name, "duplicate field in response table; replacing earlier spec");
            slot.1 = spec;
        } else {
            self.fields.push((name.to_string(), spec));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResponseFieldSpec)> {
        self.fields.iter().map(|(n, s)| (n.as_str(), s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn input_table_preserves_insertion_order() {
        let table = FieldRuleTable::new()
            .field("b", || FieldRule::string("B", "b"))
            .field("a", || FieldRule::string("A", "a"))
            .field("c", || FieldRule::string("C", "c"));
        let names: Vec<&str> = table.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn duplicate_field_replaces_in_place() {
        let table = FieldRuleTable::new()
            .field("x", || FieldRule::string("first", "1"))
            .field("y", || FieldRule::string("other", "2"))
            .field("x", || FieldRule::number("second", 2.0));
        assert_eq!(table.len(), 2);
        let (name, producer) = table.iter().next().unwrap();
        assert_eq!(name, "x");
        assert_eq!(producer().description, "second");
    }

    #[test]
    fn response_table_keeps_literal_specs_in_order() {
        let table = ResponseFieldTable::new()
            .field("id", ResponseFieldSpec::new("Identifier", json!(1)))
            .field(
                "status",
                ResponseFieldSpec::new("Status", json!("pending")).enum_of(&["pending", "done"]),
            );
        let names: Vec<&str> = table.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["id", "status"]);
        let status = &table.iter().nth(1).unwrap().1;
        assert_eq!(status.kind, Some(FieldKind::Enum));
    }
}
