use super::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid detection configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Invalid {feature} #{index}: {reason}")]
    InvalidFeature {
        feature: &'static str,
        index: usize,
        reason: &'static str,
    },
}
