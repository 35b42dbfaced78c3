//! Shared application state for all routes. Built once at startup; shape
//! metadata and service wiring are immutable afterwards.

use crate::payments::PaymentsService;
use crate::schema::DocRegistry;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub payments: Arc<PaymentsService>,
    /// Shape metadata collected at registration, served by the docs route.
    pub docs: Arc<DocRegistry>,
}
