//! Error types for the simulation engine.
//!
//! Only recoverable conditions are represented here. Broken internal
//! invariants (mismatched genome lengths, a population drifting from its
//! fixed size) are programmer errors and panic instead.

use thiserror::Error;

/// Errors surfaced to callers of the engine and the command layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// A caller-supplied parameter is out of range or malformed.
    ///
    /// The operation that produced it left all state unchanged.
    #[error("invalid parameter '{0}'")]
    InvalidParameter(String),

    /// The simulation configuration is outside its supported bounds.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The command layer received input it does not recognize.
    #[error("invalid input '{0}'")]
    UnknownCommand(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SimError>;
