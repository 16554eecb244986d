//! Error types for Horizon Lite.

use std::fmt;

/// The main error type for Horizon Lite core operations.
#[derive(Debug)]
pub enum LiteError {
    /// Animator-related error.
    Animator(AnimatorError),
}

impl fmt::Display for LiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Animator(err) => write!(f, "Animator error: {err}"),
        }
    }
}

impl std::error::Error for LiteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Animator(err) => Some(err),
        }
    }
}

/// Animator scheduling errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimatorError {
    /// The animator ID is invalid or has already been unregistered.
    InvalidAnimatorId,
    /// The animator is registered but has been stopped.
    NotRunning,
}

impl fmt::Display for AnimatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAnimatorId => write!(f, "Invalid or unregistered animator ID"),
            Self::NotRunning => write!(f, "Animator is not running"),
        }
    }
}

impl std::error::Error for AnimatorError {}

impl From<AnimatorError> for LiteError {
    fn from(err: AnimatorError) -> Self {
        Self::Animator(err)
    }
}

/// A specialized Result type for Horizon Lite core operations.
pub type Result<T> = std::result::Result<T, LiteError>;
