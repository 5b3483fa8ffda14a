//! Logging Config

use clap::Args;

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

#[cfg(test)]
mod tests {
    use clap::ValueEnum;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_log_format_parses_both_variants() -> TestResult {
        assert_eq!(LogFormat::from_str("json", true)?, LogFormat::Json);
        assert_eq!(LogFormat::from_str("compact", true)?, LogFormat::Compact);

        Ok(())
    }
}
