use thiserror::Error;

use crate::options::{Algorithm, Platform};

/// Errors returned by the clustering engine.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested algorithm is not available on the platform profile.
    #[error("{algorithm:?} is not supported on {platform:?}")]
    UnsupportedConfiguration {
        /// Requested algorithm.
        algorithm: Algorithm,
        /// Platform profile the manager was configured for.
        platform: Platform,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Cluster options could not be parsed.
    #[error("invalid cluster options: {0}")]
    Config(#[from] toml::de::Error),

    /// A subscription handle from an earlier attachment was used to detach.
    #[error("subscription {0} is not the active attachment")]
    StaleSubscription(u64),
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
