//! Orders
//!
//! Submission turns a cart into an order and its lines inside a single
//! transaction, capturing catalog prices at that moment. Later adjustments
//! to a line go through a per-order lock and always recompute the stored
//! total from the full set of lines.

pub mod data;
pub mod errors;
pub mod locks;
pub mod records;
mod repository;
pub mod service;

pub use data::NewOrder;
pub use errors::OrdersServiceError;
pub use locks::OrderLocks;
pub use records::{OrderLineRecord, OrderLineUuid, OrderRecord, OrderUuid, PaymentMethod};
pub use service::{MockOrdersService, OrdersService, OrdersSettings, PgOrdersService};
