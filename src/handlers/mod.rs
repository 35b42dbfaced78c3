//! HTTP handlers for the payment resource.

pub mod payment;
