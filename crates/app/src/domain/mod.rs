//! Pantry Domain Concerns

pub(crate) mod amounts;
pub mod carts;
pub mod customers;
pub mod notifications;
pub mod orders;
pub mod products;
