//! Per-order write serialization.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use tokio::sync::OwnedMutexGuard;

use crate::domain::orders::records::OrderUuid;

/// Registry of per-order async locks.
///
/// Operations that rewrite an order's lines and total take the order's
/// lock first, so two concurrent adjustments to the same order run one
/// after the other. Different orders never contend.
#[derive(Debug, Clone, Default)]
pub struct OrderLocks {
    locks: Arc<Mutex<HashMap<OrderUuid, Arc<tokio::sync::Mutex<()>>>>>,
}

impl OrderLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for `order`, waiting if another task holds it.
    pub async fn acquire(&self, order: OrderUuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

            // Drop registry entries no task is waiting on before adding a
            // new one, so the map tracks live orders only.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);

            Arc::clone(locks.entry(order).or_default())
        };

        lock.lock_owned().await
    }
}
