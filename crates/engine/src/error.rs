//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`Io`] thrown when the roster file cannot be read or written.
//! - [`InvalidAmount`] thrown when an operator supplied amount is rejected.
//!
//! Lookups that find nothing, taken usernames and similar domain outcomes are
//! not errors: the operations return dedicated outcome enums for them.
//!
//!  [`Io`]: EngineError::Io
//!  [`InvalidAmount`]: EngineError::InvalidAmount
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Roster storage failure: {0}")]
    Io(#[from] std::io::Error),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::Io(a), Self::Io(b)) => a.kind() == b.kind() && a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
