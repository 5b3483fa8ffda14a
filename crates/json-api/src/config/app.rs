//! Application Config

use std::path::PathBuf;

use clap::Args;

use pantry_app::domain::carts::ConflictPolicy;

/// Cart and order settings.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Directory for the local cart cache
    #[arg(long, env = "CART_DIR", default_value = "./carts")]
    pub cart_dir: PathBuf,

    /// Delivery fee in minor units applied when an order doesn't specify one
    #[arg(long, env = "DEFAULT_DELIVERY_FEE", default_value_t = 4900)]
    pub default_delivery_fee: u64,

    /// Minutes from submission to the estimated delivery
    #[arg(long, env = "ESTIMATED_DELIVERY_MINUTES", default_value_t = 30)]
    pub estimated_delivery_minutes: u32,

    /// Webhook endpoint for customer notifications; log-only when unset
    #[arg(long, env = "NOTIFICATION_WEBHOOK")]
    pub notification_webhook: Option<String>,

    /// Cart reconciliation policy (`remote_wins_when_non_empty`, `local_first`)
    #[arg(long, env = "CART_CONFLICT_POLICY", default_value_t = ConflictPolicy::default())]
    pub conflict_policy: ConflictPolicy,
}
