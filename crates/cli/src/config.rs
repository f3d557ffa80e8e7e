use std::path::PathBuf;

use clap::Parser;
use storefront_observability::LogFormat;

/// Process configuration, from arguments with environment fallbacks.
#[derive(Debug, Clone, Parser)]
#[command(name = "storefront")]
#[command(about = "Browse a small store inventory and place orders.")]
pub struct Config {
    /// JSON catalog used to stock the store (built-in demo catalog when omitted)
    #[arg(long, env = "STOREFRONT_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Log line format on stderr: pretty or json
    #[arg(long, env = "STOREFRONT_LOG_FORMAT", default_value = "pretty")]
    pub log_format: LogFormat,
}

impl Config {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
