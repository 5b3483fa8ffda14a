//! Carts
//!
//! A customer's cart lives in two tiers: a local durable cache that every
//! mutation hits first, and a remote session store keyed by customer
//! identity that signed-in customers sync to best-effort. The sync service
//! in [`sync`] owns the reconciliation policy between the two.

pub mod errors;
pub mod local;
pub mod session;
pub mod store;
pub mod sync;

pub use errors::CartStoreError;
pub use store::{CartCache, CartKey, CartSessionStore, MockCartCache, MockCartSessionStore};
pub use sync::*;
