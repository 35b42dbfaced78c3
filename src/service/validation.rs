//! Request validation from decorated input shapes.

use crate::error::AppError;
use crate::schema::ShapeMeta;
use serde_json::{Map, Value};

pub struct InputValidator;

impl InputValidator {
    /// Validate a body against a decorated shape. Every declared check runs;
    /// failures are reported together, one message per failing field, in
    /// mapping-table declaration order. Undecorated shapes accept anything.
    pub fn validate(body: &Map<String, Value>, shape: &ShapeMeta) -> Result<(), AppError> {
        if !shape.is_decorated() {
            tracing::debug!(shape = %shape.name(), "undecorated shape; skipping validation");
            return Ok(());
        }
        let mut failures = Vec::new();
        for field in &shape.fields {
            if let Err(message) = field.rule.check(&field.name, body.get(&field.name)) {
                failures.push(message);
            }
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(failures))
        }
    }

    /// Validate only the fields present in the body (partial update).
    /// Required is not enforced for missing fields.
    pub fn validate_partial(body: &Map<String, Value>, shape: &ShapeMeta) -> Result<(), AppError> {
        if !shape.is_decorated() {
            tracing::debug!(shape = %shape.name(), "undecorated shape; skipping validation");
            return Ok(());
        }
        let mut failures = Vec::new();
        for field in &shape.fields {
            match body.get(&field.name) {
                None | Some(Value::Null) => continue,
                Some(v) => {
                    if let Err(message) = field.rule.check(&field.name, Some(v)) {
                        failures.push(message);
                    }
                }
            }
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(failures))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{apply_input, FieldRule, FieldRuleTable};
    use serde_json::json;

    fn payment_input_shape() -> ShapeMeta {
        let table = FieldRuleTable::new()
            .field("amount", || FieldRule::number("Payment amount", 99.99))
            .field("currency", || FieldRule::string("Currency code", "USD").min_length(3).max_length(3))
            .field("customerEmail", || {
                FieldRule::string("Customer email", "a@b.com").format("email")
            })
            .field("description", || {
                FieldRule::string("Optional note", "gift").optional().max_length(500)
            });
        let mut shape = ShapeMeta::named("CreatePaymentInput");
        apply_input(Some(&table), &mut shape);
        shape
    }

    fn body(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(m) => m,
            _ => panic!("test body must be an object"),
        }
    }

    #[test]
    fn missing_required_field_is_named_in_the_error() {
        let shape = payment_input_shape();
        let result = InputValidator::validate(
            &body(json!({"amount": 10.0, "customerEmail": "a@b.com"})),
            &shape,
        );
        match result {
            Err(AppError::Validation(messages)) => {
                assert_eq!(messages, vec!["currency is required".to_string()]);
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(()) => panic!("expected validation failure"),
        }
    }

    #[test]
    fn all_failures_reported_together_in_declaration_order() {
        let shape = payment_input_shape();
        let result = InputValidator::validate(&body(json!({"description": 5})), &shape);
        match result {
            Err(AppError::Validation(messages)) => {
                assert_eq!(
                    messages,
                    vec![
                        "amount is required".to_string(),
                        "currency is required".to_string(),
                        "customerEmail is required".to_string(),
                        "description must be a string".to_string(),
                    ]
                );
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(()) => panic!("expected validation failure"),
        }
    }

    #[test]
    fn valid_body_passes() {
        let shape = payment_input_shape();
        let result = InputValidator::validate(
            &body(json!({
                "amount": 99.99,
                "currency": "USD",
                "customerEmail": "a@b.com",
            })),
            &shape,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn partial_validation_skips_missing_required_fields() {
        let shape = payment_input_shape();
        assert!(InputValidator::validate_partial(&body(json!({})), &shape).is_ok());
        assert!(InputValidator::validate_partial(
            &body(json!({"description": "updated note"})),
            &shape
        )
        .is_ok());
        assert!(InputValidator::validate_partial(&body(json!({"currency": "x"})), &shape).is_err());
    }

    #[test]
    fn undecorated_shape_accepts_anything() {
        let shape = ShapeMeta::named("Degraded");
        assert!(InputValidator::validate(&body(json!({"whatever": 1})), &shape).is_ok());
    }
}
