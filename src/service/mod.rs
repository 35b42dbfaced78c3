//! Validation and generic CRUD orchestration over a backing store.

mod crud;
mod validation;
pub use crud::{CrudOrchestrator, DeleteAck, ResourceDefinition};
pub use validation::InputValidator;
