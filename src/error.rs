//! Crate error type.
//!
//! The analyzer itself never fails; errors only arise where host data enters
//! the crate (configuration and snapshots decoded from JavaScript).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("failed to decode host value: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, Error>;
