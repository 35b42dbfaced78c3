//! Mapping tables for the payment resource. These are the single source of
//! truth for payment field semantics; the shapes themselves carry nothing.

use crate::payments::status::PaymentStatus;
use crate::schema::{FieldRule, FieldRuleTable, ResponseFieldSpec, ResponseFieldTable};
use serde_json::json;

pub fn create_payment_table() -> FieldRuleTable {
    FieldRuleTable::new()
        .field("amount", || FieldRule::number("Payment amount", 99.99))
        .field("currency", || {
            FieldRule::string("ISO 4217 currency code", "USD").min_length(3).max_length(3)
        })
        .field("customerEmail", || {
            FieldRule::string("Customer email address", "jane@example.com").format("email")
        })
        .field("customerName", || {
            FieldRule::string("Customer full name", "Jane Doe").max_length(100)
        })
        .field("description", || {
            FieldRule::string("Free-form payment note", "Subscription renewal")
                .optional()
                .max_length(500)
        })
}

pub fn update_payment_table() -> FieldRuleTable {
    FieldRuleTable::new()
        .field("status", || {
            FieldRule::enum_of("Payment status", "completed", &PaymentStatus::NAMES).optional()
        })
        .field("description", || {
            FieldRule::string("Free-form payment note", "Subscription renewal")
                .optional()
                .max_length(500)
        })
}

pub fn payment_response_table() -> ResponseFieldTable {
    ResponseFieldTable::new()
        .field("id", ResponseFieldSpec::new("Payment identifier", json!(1)))
        .field("amount", ResponseFieldSpec::new("Payment amount", json!(99.99)))
        .field("currency", ResponseFieldSpec::new("ISO 4217 currency code", json!("USD")))
        .field(
            "customerEmail",
            ResponseFieldSpec::new("Customer email address", json!("jane@example.com")),
        )
        .field(
            "customerName",
            ResponseFieldSpec::new("Customer full name", json!("Jane Doe")),
        )
        .field(
            "description",
            ResponseFieldSpec::new("Free-form payment note", json!("Subscription renewal"))
                .optional(),
        )
        .field(
            "status",
            ResponseFieldSpec::new("Payment status", json!("pending"))
                .enum_of(&PaymentStatus::NAMES),
        )
        .field(
            "createdAt",
            ResponseFieldSpec::new("Creation timestamp", json!("2026-01-01T00:00:00Z")),
        )
        .field(
            "updatedAt",
            ResponseFieldSpec::new("Last update timestamp", json!("2026-01-01T00:00:00Z")),
        )
}

pub fn payment_list_response_table() -> ResponseFieldTable {
    ResponseFieldTable::new()
        .field(
            "payments",
            ResponseFieldSpec::new("Page of payments", json!([])).array(),
        )
        .field("total", ResponseFieldSpec::new("Number of payments", json!(0)))
}
