//! Chat delivery errors.

use thiserror::Error;

/// Failure of a single request to the chat service.
///
/// The three variants are kept distinct so callers can tell an unreachable
/// service from one that answered with a non-2xx status or with a body that
/// is not a valid reply.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP error! status: {status}")]
    HttpStatus { status: u16, body: String },

    #[error("Decode error: {0}")]
    Decode(String),
}

/// Coarse classification of a [`DeliveryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryErrorKind {
    Transport,
    HttpStatus,
    Decode,
}

impl DeliveryError {
    pub fn kind(&self) -> DeliveryErrorKind {
        match self {
            DeliveryError::Transport(_) => DeliveryErrorKind::Transport,
            DeliveryError::HttpStatus { .. } => DeliveryErrorKind::HttpStatus,
            DeliveryError::Decode(_) => DeliveryErrorKind::Decode,
        }
    }

    /// HTTP status code, when the service answered with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            DeliveryError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "delivery_tests.rs"]
mod tests;
