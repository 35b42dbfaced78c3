//! Generic CRUD orchestration over a backing store. One stateless façade per
//! resource, parameterized once at registration time by the resource's shape
//! bindings; each operation delegates to the store and wraps the result in
//! the declared response shape.

use crate::error::AppError;
use crate::schema::{EntityShape, Instance, ResponseShape, ShapeMeta};
use crate::store::EntityStore;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// The five type bindings of one resource, fixed at registration time.
pub struct ResourceDefinition {
    /// Resource name used in not-found messages (e.g. "payment").
    pub name: String,
    pub entity: EntityShape,
    pub create_input: ShapeMeta,
    pub update_input: ShapeMeta,
    pub single: ResponseShape,
    pub list: ResponseShape,
    /// Field of the list response carrying the wrapped items.
    pub list_items_field: String,
    /// Field of the list response carrying the item count.
    pub list_total_field: String,
}

/// Acknowledgement returned by remove; deliberately not a single response.
#[derive(Debug, Serialize)]
pub struct DeleteAck {
    pub deleted: bool,
    pub id: i64,
}

pub struct CrudOrchestrator {
    definition: ResourceDefinition,
    store: Arc<dyn EntityStore>,
}

impl CrudOrchestrator {
    pub fn new(definition: ResourceDefinition, store: Arc<dyn EntityStore>) -> Self {
        CrudOrchestrator { definition, store }
    }

    pub fn definition(&self) -> &ResourceDefinition {
        &self.definition
    }

    pub fn store(&self) -> &Arc<dyn EntityStore> {
        &self.store
    }

    /// Construct the entity from the input, delegate to the store, wrap the
    /// stored record in the single-response shape.
    pub async fn create_entity(&self, input: Value) -> Result<Instance, AppError> {
        let entity = self.definition.entity.construct(Some(&input));
        let stored = self.store.create(entity.into_value()).await?;
        Ok(self.definition.single.construct(&stored))
    }

    /// Fetch everything, wrap each record in the single-response shape, then
    /// wrap items plus their count in the list-response shape.
    pub async fn find_all_entities(&self) -> Result<Instance, AppError> {
        let rows = self.store.find_all().await?;
        let items: Vec<Value> = rows
            .iter()
            .map(|row| self.definition.single.construct(row).into_value())
            .collect();
        let total = items.len();
        let mut source = serde_json::Map::new();
        source.insert(self.definition.list_items_field.clone(), Value::Array(items));
        source.insert(self.definition.list_total_field.clone(), json!(total));
        Ok(self.definition.list.construct(&Value::Object(source)))
    }

    pub async fn find_one_entity(&self, id: i64) -> Result<Instance, AppError> {
        let row = self
            .store
            .find_one(id)
            .await?
            .ok_or_else(|| AppError::not_found(&self.definition.name, id))?;
        Ok(self.definition.single.construct(&row))
    }

    pub async fn update_entity(&self, id: i64, input: Value) -> Result<Instance, AppError> {
        let row = self
            .store
            .update(id, input)
            .await?
            .ok_or_else(|| AppError::not_found(&self.definition.name, id))?;
        Ok(self.definition.single.construct(&row))
    }

    pub async fn remove_entity(&self, id: i64) -> Result<DeleteAck, AppError> {
        if !self.store.remove(id).await? {
            return Err(AppError::not_found(&self.definition.name, id));
        }
        Ok(DeleteAck { deleted: true, id })
    }
}
