//! Route builders: common, docs, and the payment resource.

pub mod common;
pub mod docs;
pub mod payment;

pub use common::common_routes;
pub use docs::docs_routes;
pub use payment::payment_routes;
