// crates/vtisnap-core/src/error.rs

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SnapError>;

#[derive(Debug, Error)]
pub enum SnapError {
    /// Bad geometry, stride, field shape or offset overflow. Raised before any I/O.
    #[error("configuration error: {0}")]
    Config(String),

    /// Header and payload phases disagree on geometry.
    #[error("consistency error: {0}")]
    Consistency(String),

    #[error("snapshot command error: {0}")]
    Command(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
