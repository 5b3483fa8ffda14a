//! Database Config

use clap::Args;

/// Database connection settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL for the pantry database
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,
}
