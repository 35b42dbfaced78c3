//! Decoration appliers: resolve a mapping table into per-field rule bundles,
//! then attach them to the target shape. Runs once per resource at
//! definition time, before any request is served.

use crate::schema::rules::{infer_kind, FieldDoc};
use crate::schema::shape::{
    DecoratedField, ResponseField, ResponseShape, SchemaDiagnostic, ShapeMeta,
};
use crate::schema::table::{FieldRuleTable, ResponseFieldTable};

/// Attach validation and documentation from an input-side mapping table.
/// A missing or empty table degrades the shape to undecorated (no validation,
/// no documentation) with a warning; it never fails resource registration.
pub fn apply_input(table: Option<&FieldRuleTable>, shape: &mut ShapeMeta) {
    let shape_name = shape.name().to_string();
    let table = match table {
        None => {
            degrade(shape, SchemaDiagnostic::MissingTable { shape: shape_name });
            return;
        }
        Some(t) if t.is_empty() => {
            degrade(shape, SchemaDiagnostic::EmptyTable { shape: shape_name });
            return;
        }
        Some(t) => t,
    };

    // Phase one: pure resolution, invoking each producer in table order.
    let resolved: Vec<DecoratedField> = table
        .iter()
        .map(|(name, producer)| DecoratedField {
            name: name.to_string(),
            rule: producer(),
        })
        .collect();

    for field in &resolved {
        if field.rule.effective_kind().is_none() {
            let diagnostic = SchemaDiagnostic::KindInference {
                shape: shape.name().to_string(),
                field: field.name.clone(),
            };
            tracing::warn!(%diagnostic, "field kept in documentation without a type");
            shape.diagnostics.push(diagnostic);
        }
    }

    // Phase two: attachment. The only side-effecting step.
    shape.fields = resolved;
}

/// Build an enhanced response shape from a response-side mapping table:
/// documentation attributes per field plus the synthesized shallow-copy
/// constructor. The declared name is preserved on the result.
pub fn apply_response(table: &ResponseFieldTable, name: &str) -> ResponseShape {
    let mut shape = ResponseShape::named(name);
    if table.is_empty() {
        let diagnostic = SchemaDiagnostic::EmptyTable { shape: name.to_string() };
        tracing::warn!(%diagnostic, "response shape left undocumented");
        shape.diagnostics.push(diagnostic);
        return shape;
    }

    for (field, spec) in table.iter() {
        let kind = spec.kind.or_else(|| infer_kind(&spec.example));
        if kind.is_none() {
            // Documentation degradation only; the field still renders and the
            // response is never blocked.
            let diagnostic = SchemaDiagnostic::KindInference {
                shape: name.to_string(),
                field: field.to_string(),
            };
            tracing::warn!(%diagnostic, "field documented without a type");
            shape.diagnostics.push(diagnostic);
        }
        shape.fields.push(ResponseField {
            name: field.to_string(),
            doc: FieldDoc {
                description: spec.description.clone(),
                example: spec.example.clone(),
                required: spec.required,
                kind,
                enum_values: spec.enum_values.clone(),
                is_array: spec.is_array,
            },
        });
    }
    shape
}

fn degrade(shape: &mut ShapeMeta, diagnostic: SchemaDiagnostic) {
    tracing::warn!(%diagnostic, "shape degrades to no validation and no documentation");
    shape.diagnostics.push(diagnostic);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::rules::{FieldKind, FieldRule};
    use crate::schema::table::ResponseFieldSpec;
    use serde_json::{json, Value};

    #[test]
    fn input_applier_attaches_rules_in_table_order() {
        let table = FieldRuleTable::new()
            .field("amount", || FieldRule::number("Amount", 99.99))
            .field("currency", || FieldRule::string("Currency", "USD"));
        let mut shape = ShapeMeta::named("CreatePaymentInput");
        apply_input(Some(&table), &mut shape);
        assert!(shape.is_decorated());
        let names: Vec<&str> = shape.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["amount", "currency"]);
    }

    #[test]
    fn missing_table_degrades_without_failing() {
        let mut shape = ShapeMeta::named("CreatePaymentInput");
        apply_input(None, &mut shape);
        assert!(!shape.is_decorated());
        assert_eq!(
            shape.diagnostics,
            vec![SchemaDiagnostic::MissingTable { shape: "CreatePaymentInput".into() }]
        );
    }

    #[test]
    fn empty_table_degrades_without_failing() {
        let mut shape = ShapeMeta::named("UpdatePaymentInput");
        apply_input(Some(&FieldRuleTable::new()), &mut shape);
        assert!(!shape.is_decorated());
        assert_eq!(
            shape.diagnostics,
            vec![SchemaDiagnostic::EmptyTable { shape: "UpdatePaymentInput".into() }]
        );
    }

    #[test]
    fn response_applier_infers_kind_from_example() {
        let table = ResponseFieldTable::new()
            .field("id", ResponseFieldSpec::new("Identifier", json!(1)))
            .field("amount", ResponseFieldSpec::new("Amount", json!(99.99)))
            .field("active", ResponseFieldSpec::new("Active", json!(true)));
        let shape = apply_response(&table, "PaymentResponse");
        let kinds: Vec<Option<FieldKind>> = shape.fields.iter().map(|f| f.doc.kind).collect();
        assert_eq!(
            kinds,
            vec![Some(FieldKind::Number), Some(FieldKind::Number), Some(FieldKind::Boolean)]
        );
    }

    #[test]
    fn uninferable_kind_degrades_documentation_not_the_field() {
        let table = ResponseFieldTable::new()
            .field("opaque", ResponseFieldSpec::new("Opaque blob", Value::Null));
        let shape = apply_response(&table, "PaymentResponse");
        // Field is kept, just untyped; a diagnostic records the degradation.
        assert_eq!(shape.fields.len(), 1);
        assert_eq!(shape.fields[0].doc.kind, None);
        assert_eq!(
            shape.diagnostics,
            vec![SchemaDiagnostic::KindInference {
                shape: "PaymentResponse".into(),
                field: "opaque".into(),
            }]
        );
    }

    #[test]
    fn enhanced_shape_keeps_declared_name() {
        let table = ResponseFieldTable::new()
            .field("id", ResponseFieldSpec::new("Identifier", json!(1)));
        let shape = apply_response(&table, "PaymentResponse");
        assert_eq!(shape.name(), "PaymentResponse");
    }
}
