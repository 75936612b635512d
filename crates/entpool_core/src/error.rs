//! # Pool Error Types
//!
//! Pool operations have no recoverable errors: broken preconditions are
//! contract violations caught by debug assertions. The errors here come from
//! loading and validating configuration.

use thiserror::Error;

/// Errors that can occur while configuring pools.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// The configuration parsed but holds an unusable value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(String),
}

/// Result type for pool configuration.
pub type PoolResult<T> = Result<T, PoolError>;
