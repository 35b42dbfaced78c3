//! Scaffold SDK: metadata-driven CRUD resource library.

pub mod error;
pub mod handlers;
pub mod payments;
pub mod response;
pub mod routes;
pub mod schema;
pub mod service;
pub mod state;
pub mod store;

pub use error::AppError;
pub use response::{error_envelope_layer, success_created, success_ok, Envelope, FailureEnvelope};
pub use routes::{common_routes, docs_routes, payment_routes};
pub use schema::{
    apply_input, apply_response, DocRegistry, EntityShape, FieldKind, FieldRule, FieldRuleTable,
    Instance, ResponseFieldSpec, ResponseFieldTable, ResponseShape, SchemaDiagnostic, ShapeMeta,
};
pub use service::{CrudOrchestrator, DeleteAck, InputValidator, ResourceDefinition};
pub use state::AppState;
pub use store::{EntityStore, MemoryStore, StoreError};
