//! The payment resource: mapping tables, status rules, and the service
//! composed on the generic CRUD orchestrator.

pub mod service;
pub mod status;
pub mod tables;

pub use service::{PaymentsService, SUPPORTED_CURRENCIES};
pub use status::PaymentStatus;

use crate::schema::{apply_input, apply_response, DocRegistry, EntityShape, ShapeMeta};
use crate::service::{CrudOrchestrator, ResourceDefinition};
use crate::store::EntityStore;
use std::sync::Arc;

pub const RESOURCE: &str = "payment";

/// Resolve the payment mapping tables into decorated shapes, bind the store,
/// and register the shape metadata for documentation. Runs once, at
/// resource-registration time.
pub fn build(store: Arc<dyn EntityStore>, docs: &mut DocRegistry) -> PaymentsService {
    let mut create_input = ShapeMeta::named("CreatePaymentInput");
    apply_input(Some(&tables::create_payment_table()), &mut create_input);
    let mut update_input = ShapeMeta::named("UpdatePaymentInput");
    apply_input(Some(&tables::update_payment_table()), &mut update_input);
    let single = apply_response(&tables::payment_response_table(), "PaymentResponse");
    let list = apply_response(&tables::payment_list_response_table(), "PaymentListResponse");

    docs.register_input(&create_input);
    docs.register_input(&update_input);
    docs.register_response(&single);
    docs.register_response(&list);

    let definition = ResourceDefinition {
        name: RESOURCE.into(),
        entity: EntityShape::new("Payment").with_base_fields().fields(&[
            "amount",
            "currency",
            "customerEmail",
            "customerName",
            "description",
            "status",
        ]),
        create_input,
        update_input,
        single,
        list,
        list_items_field: "payments".into(),
        list_total_field: "total".into(),
    };
    PaymentsService::new(CrudOrchestrator::new(definition, store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn build_registers_all_four_shapes_for_documentation() {
        let mut docs = DocRegistry::new();
        let service = build(Arc::new(MemoryStore::new()), &mut docs);
        assert_eq!(docs.len(), 4);
        let doc = docs.to_document();
        for name in [
            "CreatePaymentInput",
            "UpdatePaymentInput",
            "PaymentResponse",
            "PaymentListResponse",
        ] {
            assert!(
                doc["components"]["schemas"][name].is_object(),
                "missing schema for {}",
                name
            );
        }
        assert_eq!(service.crud().definition().name, "payment");
    }
}
