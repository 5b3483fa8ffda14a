//! Two-tier cart synchronization.

use std::{fmt, str::FromStr, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use pantry::cart::Cart;
use thiserror::Error;

use crate::domain::{
    carts::store::{CartCache, CartKey, CartSessionStore},
    customers::CustomerUuid,
};

/// How to reconcile the two tiers when a signed-in customer loads their cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// A non-empty remote cart replaces the local copy; an empty or missing
    /// remote cart falls back to local. This favours the cart the customer
    /// most recently filled on another device.
    #[default]
    RemoteWinsWhenNonEmpty,

    /// The local copy wins whenever it exists; remote is only consulted
    /// when there is no local cart at all.
    LocalFirst,
}

/// Error parsing a [`ConflictPolicy`] from a string.
#[derive(Debug, Error)]
#[error("unknown conflict policy {0:?}")]
pub struct UnknownConflictPolicy(String);

impl ConflictPolicy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RemoteWinsWhenNonEmpty => "remote_wins_when_non_empty",
            Self::LocalFirst => "local_first",
        }
    }
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConflictPolicy {
    type Err = UnknownConflictPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "remote_wins_when_non_empty" => Ok(Self::RemoteWinsWhenNonEmpty),
            "local_first" => Ok(Self::LocalFirst),
            other => Err(UnknownConflictPolicy(other.to_string())),
        }
    }
}

/// Customer-facing cart operations.
///
/// Deliberately infallible: a cart must never error out from under a
/// shopper, so storage failures degrade to the best available copy and
/// are logged rather than surfaced.
#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Load the customer's cart, reconciling both tiers.
    async fn load(&self, customer: Option<CustomerUuid>) -> Cart;

    /// Persist the cart to both tiers, local first.
    async fn save(&self, customer: Option<CustomerUuid>, cart: &Cart);

    /// Drop the cart from both tiers.
    async fn clear(&self, customer: Option<CustomerUuid>);
}

/// Cart service backed by a local cache and a remote session store.
///
/// Anonymous customers only ever touch the local tier.
pub struct TwoTierCartsService {
    cache: Arc<dyn CartCache>,
    sessions: Arc<dyn CartSessionStore>,
    policy: ConflictPolicy,
}

impl TwoTierCartsService {
    #[must_use]
    pub fn new(
        cache: Arc<dyn CartCache>,
        sessions: Arc<dyn CartSessionStore>,
        policy: ConflictPolicy,
    ) -> Self {
        Self {
            cache,
            sessions,
            policy,
        }
    }

    async fn load_local(&self, key: CartKey) -> Option<Cart> {
        match self.cache.load(key).await {
            Ok(cart) => cart,
            Err(error) => {
                tracing::warn!(%error, "failed to read local cart, treating as absent");

                None
            }
        }
    }

    async fn mirror_to_local(&self, key: CartKey, cart: &Cart) {
        if let Err(error) = self.cache.save(key, cart).await {
            tracing::warn!(%error, "failed to mirror remote cart into local cache");
        }
    }
}

#[async_trait]
impl CartsService for TwoTierCartsService {
    async fn load(&self, customer: Option<CustomerUuid>) -> Cart {
        let key = CartKey::from(customer);

        let Some(customer) = customer else {
            return self.load_local(key).await.unwrap_or_default();
        };

        let remote = match self.sessions.load(customer).await {
            Ok(remote) => remote,
            Err(error) => {
                tracing::warn!(
                    %customer,
                    %error,
                    "failed to read remote cart session, falling back to local",
                );

                return self.load_local(key).await.unwrap_or_default();
            }
        };

        match (self.policy, remote) {
            (ConflictPolicy::RemoteWinsWhenNonEmpty, Some(remote)) if !remote.is_empty() => {
                self.mirror_to_local(key, &remote).await;

                remote
            }
            (ConflictPolicy::LocalFirst, Some(remote)) => match self.load_local(key).await {
                Some(local) => local,
                None => {
                    self.mirror_to_local(key, &remote).await;

                    remote
                }
            },
            _ => self.load_local(key).await.unwrap_or_default(),
        }
    }

    async fn save(&self, customer: Option<CustomerUuid>, cart: &Cart) {
        let key = CartKey::from(customer);

        if let Err(error) = self.cache.save(key, cart).await {
            tracing::warn!(%error, "failed to save cart to local cache");
        }

        if let Some(customer) = customer {
            if let Err(error) = self.sessions.save(customer, cart).await {
                tracing::warn!(%customer, %error, "failed to sync cart to remote session");
            }
        }
    }

    async fn clear(&self, customer: Option<CustomerUuid>) {
        let key = CartKey::from(customer);

        if let Err(error) = self.cache.clear(key).await {
            tracing::warn!(%error, "failed to clear local cart");
        }

        if let Some(customer) = customer {
            if let Err(error) = self.sessions.clear(customer).await {
                tracing::warn!(%customer, %error, "failed to clear remote cart session");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::Sequence;
    use mockall::predicate::eq;
    use uuid::Uuid;

    use crate::domain::carts::store::{MockCartCache, MockCartSessionStore};

    use super::*;

    fn cart_with(product: u128, quantity: u32) -> Cart {
        let mut cart = Cart::new();

        cart.add_item(Uuid::from_u128(product), quantity);

        cart
    }

    fn io_error() -> crate::domain::carts::CartStoreError {
        std::io::Error::other("disk on fire").into()
    }

    fn service(cache: MockCartCache, sessions: MockCartSessionStore) -> TwoTierCartsService {
        TwoTierCartsService::new(
            Arc::new(cache),
            Arc::new(sessions),
            ConflictPolicy::default(),
        )
    }

    #[test]
    fn conflict_policy_parses_both_ways() {
        for policy in [ConflictPolicy::RemoteWinsWhenNonEmpty, ConflictPolicy::LocalFirst] {
            assert_eq!(policy.as_str().parse::<ConflictPolicy>().ok(), Some(policy));
        }

        assert!("newest_wins".parse::<ConflictPolicy>().is_err());
    }

    #[tokio::test]
    async fn non_empty_remote_cart_wins_and_is_mirrored_locally() {
        let customer = CustomerUuid::new();
        let remote_cart = cart_with(1, 5);

        let mut cache = MockCartCache::new();
        let mut sessions = MockCartSessionStore::new();

        let expected_remote = remote_cart.clone();
        sessions
            .expect_load()
            .with(eq(customer))
            .once()
            .returning(move |_| Ok(Some(expected_remote.clone())));

        let mirrored = remote_cart.clone();
        cache
            .expect_save()
            .withf(move |key, cart| *key == CartKey::Customer(customer) && *cart == mirrored)
            .once()
            .returning(|_, _| Ok(()));

        let loaded = service(cache, sessions).load(Some(customer)).await;

        assert_eq!(loaded, remote_cart);
    }

    #[tokio::test]
    async fn empty_remote_cart_falls_back_to_local() {
        let customer = CustomerUuid::new();
        let local_cart = cart_with(2, 3);

        let mut cache = MockCartCache::new();
        let mut sessions = MockCartSessionStore::new();

        sessions
            .expect_load()
            .with(eq(customer))
            .once()
            .returning(|_| Ok(Some(Cart::new())));

        let expected_local = local_cart.clone();
        cache
            .expect_load()
            .with(eq(CartKey::Customer(customer)))
            .once()
            .returning(move |_| Ok(Some(expected_local.clone())));

        let loaded = service(cache, sessions).load(Some(customer)).await;

        assert_eq!(loaded, local_cart);
    }

    #[tokio::test]
    async fn remote_failure_degrades_to_local_cart() {
        let customer = CustomerUuid::new();
        let local_cart = cart_with(3, 1);

        let mut cache = MockCartCache::new();
        let mut sessions = MockCartSessionStore::new();

        sessions
            .expect_load()
            .with(eq(customer))
            .once()
            .returning(|_| Err(io_error()));

        let expected_local = local_cart.clone();
        cache
            .expect_load()
            .with(eq(CartKey::Customer(customer)))
            .once()
            .returning(move |_| Ok(Some(expected_local.clone())));

        let loaded = service(cache, sessions).load(Some(customer)).await;

        assert_eq!(loaded, local_cart);
    }

    #[tokio::test]
    async fn both_tiers_failing_yields_an_empty_cart() {
        let customer = CustomerUuid::new();

        let mut cache = MockCartCache::new();
        let mut sessions = MockCartSessionStore::new();

        sessions.expect_load().once().returning(|_| Err(io_error()));
        cache.expect_load().once().returning(|_| Err(io_error()));

        let loaded = service(cache, sessions).load(Some(customer)).await;

        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn anonymous_customers_never_touch_the_remote_tier() {
        let local_cart = cart_with(4, 2);

        let mut cache = MockCartCache::new();
        let sessions = MockCartSessionStore::new();

        let expected_local = local_cart.clone();
        cache
            .expect_load()
            .with(eq(CartKey::Anonymous))
            .once()
            .returning(move |_| Ok(Some(expected_local.clone())));

        let loaded = service(cache, sessions).load(None).await;

        assert_eq!(loaded, local_cart);
    }

    #[tokio::test]
    async fn save_writes_local_before_remote() {
        let customer = CustomerUuid::new();
        let cart = cart_with(5, 1);

        let mut cache = MockCartCache::new();
        let mut sessions = MockCartSessionStore::new();
        let mut seq = Sequence::new();

        cache
            .expect_save()
            .once()
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        sessions
            .expect_save()
            .with(eq(customer), eq(cart.clone()))
            .once()
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        service(cache, sessions).save(Some(customer), &cart).await;
    }

    #[tokio::test]
    async fn save_still_writes_remote_when_local_fails() {
        let customer = CustomerUuid::new();
        let cart = cart_with(6, 1);

        let mut cache = MockCartCache::new();
        let mut sessions = MockCartSessionStore::new();

        cache
            .expect_save()
            .once()
            .returning(|_, _| Err(io_error()));

        sessions
            .expect_save()
            .with(eq(customer), eq(cart.clone()))
            .once()
            .returning(|_, _| Ok(()));

        service(cache, sessions).save(Some(customer), &cart).await;
    }

    #[tokio::test]
    async fn clear_drops_both_tiers() {
        let customer = CustomerUuid::new();

        let mut cache = MockCartCache::new();
        let mut sessions = MockCartSessionStore::new();

        cache
            .expect_clear()
            .with(eq(CartKey::Customer(customer)))
            .once()
            .returning(|_| Ok(()));

        sessions
            .expect_clear()
            .with(eq(customer))
            .once()
            .returning(|_| Ok(()));

        service(cache, sessions).clear(Some(customer)).await;
    }

    #[tokio::test]
    async fn local_first_policy_prefers_the_local_copy() {
        let customer = CustomerUuid::new();
        let local_cart = cart_with(7, 4);
        let remote_cart = cart_with(8, 1);

        let mut cache = MockCartCache::new();
        let mut sessions = MockCartSessionStore::new();

        sessions
            .expect_load()
            .once()
            .returning(move |_| Ok(Some(remote_cart.clone())));

        let expected_local = local_cart.clone();
        cache
            .expect_load()
            .once()
            .returning(move |_| Ok(Some(expected_local.clone())));

        let service = TwoTierCartsService::new(
            Arc::new(cache),
            Arc::new(sessions),
            ConflictPolicy::LocalFirst,
        );

        let loaded = service.load(Some(customer)).await;

        assert_eq!(loaded, local_cart);
    }
}
