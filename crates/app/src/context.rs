//! App Context

use std::{path::PathBuf, sync::Arc};

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        carts::{CartsService, ConflictPolicy, TwoTierCartsService, local::FileCartStore, session::PgCartSessionStore},
        notifications::{NotificationError, Notifier, TracingNotifier, WebhookNotifier},
        orders::{OrdersService, OrdersSettings, PgOrdersService},
        products::{PgProductsService, ProductsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to initialize the notifier")]
    Notifier(#[source] NotificationError),
}

/// Everything configurable about the application layer.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub database_url: String,
    /// Directory for the local cart cache.
    pub cart_dir: PathBuf,
    /// Delivery fee applied when an order doesn't specify one, in minor
    /// units.
    pub default_delivery_fee: u64,
    /// Offset from submission time to the estimated delivery.
    pub estimated_delivery_minutes: u32,
    /// Endpoint for customer notifications. Log-only when unset.
    pub notification_webhook: Option<String>,
    /// How the cart tiers reconcile on load for signed-in customers.
    pub conflict_policy: ConflictPolicy,
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
}

impl AppContext {
    /// Build application context from settings.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails or
    /// the webhook notifier cannot be built.
    pub async fn from_settings(settings: &AppSettings) -> Result<Self, AppInitError> {
        let pool = database::connect(&settings.database_url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);

        let notifier: Arc<dyn Notifier> = match &settings.notification_webhook {
            Some(endpoint) => Arc::new(
                WebhookNotifier::new(endpoint.clone()).map_err(AppInitError::Notifier)?,
            ),
            None => Arc::new(TracingNotifier),
        };

        let carts = TwoTierCartsService::new(
            Arc::new(FileCartStore::new(settings.cart_dir.clone())),
            Arc::new(PgCartSessionStore::new(db.clone())),
            settings.conflict_policy,
        );

        let orders = PgOrdersService::new(
            db.clone(),
            notifier,
            OrdersSettings {
                default_delivery_fee: settings.default_delivery_fee,
                estimated_delivery_minutes: settings.estimated_delivery_minutes,
            },
        );

        Ok(Self {
            products: Arc::new(PgProductsService::new(db)),
            carts: Arc::new(carts),
            orders: Arc::new(orders),
        })
    }
}
