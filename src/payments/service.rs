//! Payment business rules composed around the generic CRUD orchestrator.
//! The orchestrator supplies the default wiring; everything payment-specific
//! (positive amounts, supported currencies, status transitions, deletion
//! policy) runs here, before the store is touched.

use crate::error::AppError;
use crate::payments::status::PaymentStatus;
use crate::schema::Instance;
use crate::service::{CrudOrchestrator, DeleteAck};
use serde_json::{json, Map, Value};

pub const SUPPORTED_CURRENCIES: [&str; 4] = ["USD", "EUR", "GBP", "JPY"];

pub struct PaymentsService {
    crud: CrudOrchestrator,
}

impl PaymentsService {
    pub fn new(crud: CrudOrchestrator) -> Self {
        PaymentsService { crud }
    }

    pub fn crud(&self) -> &CrudOrchestrator {
        &self.crud
    }

    /// New payments start pending. Amount and currency rules run first; a
    /// rejected create never reaches the store.
    pub async fn create(&self, body: Map<String, Value>) -> Result<Instance, AppError> {
        check_amount(&body)?;
        check_currency(&body)?;
        let mut body = body;
        body.insert("status".into(), json!(PaymentStatus::Pending.as_str()));
        self.crud.create_entity(Value::Object(body)).await
    }

    pub async fn find_all(&self) -> Result<Instance, AppError> {
        self.crud.find_all_entities().await
    }

    pub async fn find_one(&self, id: i64) -> Result<Instance, AppError> {
        self.crud.find_one_entity(id).await
    }

    /// Status changes are checked against the transition table using the
    /// currently stored status.
    pub async fn update(&self, id: i64, body: Map<String, Value>) -> Result<Instance, AppError> {
        if let Some(requested) = body.get("status").and_then(Value::as_str) {
            let next: PaymentStatus = requested.parse().map_err(AppError::BusinessRule)?;
            let current = self.stored_status(id).await?;
            if !current.can_transition_to(next) {
                return Err(AppError::BusinessRule(format!(
                    "cannot transition payment from {} to {}",
                    current, next
                )));
            }
        }
        self.crud.update_entity(id, Value::Object(body)).await
    }

    /// Completed payments must stay on record.
    pub async fn remove(&self, id: i64) -> Result<DeleteAck, AppError> {
        if self.stored_status(id).await? == PaymentStatus::Completed {
            return Err(AppError::BusinessRule("cannot delete completed payments".into()));
        }
        self.crud.remove_entity(id).await
    }

    async fn stored_status(&self, id: i64) -> Result<PaymentStatus, AppError> {
        let current = self.crud.find_one_entity(id).await?;
        current
            .get("status")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<PaymentStatus>().ok())
            .ok_or_else(|| AppError::BusinessRule("payment has no readable status".into()))
    }
}

fn check_amount(body: &Map<String, Value>) -> Result<(), AppError> {
    if let Some(amount) = body.get("amount").and_then(Value::as_f64) {
        if amount <= 0.0 {
            return Err(AppError::BusinessRule("amount must be positive".into()));
        }
    }
    Ok(())
}

fn check_currency(body: &Map<String, Value>) -> Result<(), AppError> {
    if let Some(currency) = body.get("currency").and_then(Value::as_str) {
        if !SUPPORTED_CURRENCIES.contains(&currency) {
            return Err(AppError::BusinessRule(format!("unsupported currency: {}", currency)));
        }
    }
    Ok(())
}
