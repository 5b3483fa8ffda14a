//! Server configuration module

use clap::Parser;

use pantry_app::context::AppSettings;

use crate::config::{
    app::AppConfig, db::DatabaseConfig, logging::LoggingConfig, server::ServerRuntimeConfig,
};

pub(crate) mod app;
pub(crate) mod db;
pub(crate) mod logging;
pub(crate) mod server;

/// Pantry JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "pantry-json", about = "Pantry JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Cart and order settings.
    #[command(flatten)]
    pub app: AppConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Application-layer settings derived from this configuration.
    #[must_use]
    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            database_url: self.database.database_url.clone(),
            cart_dir: self.app.cart_dir.clone(),
            default_delivery_fee: self.app.default_delivery_fee,
            estimated_delivery_minutes: self.app.estimated_delivery_minutes,
            notification_webhook: self.app.notification_webhook.clone(),
            conflict_policy: self.app.conflict_policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use pantry_app::domain::carts::ConflictPolicy;

    use super::*;

    #[test]
    fn test_conflict_policy_flows_into_app_settings() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "pantry-json",
            "--database-url",
            "postgres://localhost/pantry",
            "--conflict-policy",
            "local_first",
        ])?;

        assert_eq!(
            config.app_settings().conflict_policy,
            ConflictPolicy::LocalFirst
        );

        Ok(())
    }
}
