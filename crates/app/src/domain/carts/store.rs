//! Cart storage tier contracts.

use async_trait::async_trait;
use mockall::automock;
use pantry::cart::Cart;

use crate::domain::{carts::errors::CartStoreError, customers::CustomerUuid};

/// Key for the local cart cache.
///
/// Anonymous sessions have no customer identity but still get a durable
/// local copy; signed-in customers are keyed by their UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartKey {
    Anonymous,
    Customer(CustomerUuid),
}

impl From<Option<CustomerUuid>> for CartKey {
    fn from(customer: Option<CustomerUuid>) -> Self {
        customer.map_or(Self::Anonymous, Self::Customer)
    }
}

/// The local durable cart tier.
///
/// Always written first and never over a network, so a cart survives
/// remote outages.
#[automock]
#[async_trait]
pub trait CartCache: Send + Sync {
    /// Load the cached cart for `key`, if one has been saved.
    async fn load(&self, key: CartKey) -> Result<Option<Cart>, CartStoreError>;

    /// Overwrite the cached cart for `key`.
    async fn save(&self, key: CartKey, cart: &Cart) -> Result<(), CartStoreError>;

    /// Drop the cached cart for `key`. Idempotent.
    async fn clear(&self, key: CartKey) -> Result<(), CartStoreError>;
}

/// The remote cart tier, keyed by customer identity.
///
/// Lets a signed-in customer resume their cart from another device. All
/// writes here are best-effort.
#[automock]
#[async_trait]
pub trait CartSessionStore: Send + Sync {
    /// Load the remote cart for `customer`, if one exists.
    async fn load(&self, customer: CustomerUuid) -> Result<Option<Cart>, CartStoreError>;

    /// Overwrite the remote cart for `customer`.
    async fn save(&self, customer: CustomerUuid, cart: &Cart) -> Result<(), CartStoreError>;

    /// Drop the remote cart for `customer`. Idempotent.
    async fn clear(&self, customer: CustomerUuid) -> Result<(), CartStoreError>;
}
