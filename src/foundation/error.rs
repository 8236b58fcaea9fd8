use crate::foundation::core::Millis;

/// Convenience result type used across keyhold.
pub type KeyholdResult<T> = Result<T, KeyholdError>;

/// Top-level error taxonomy used by the rebuild and evaluate entry points.
///
/// "No output" for a property is not an error: resolvers return `None` for it.
#[derive(thiserror::Error, Debug)]
pub enum KeyholdError {
    /// Structural violation in an authored chain, detected while building the timeline cache.
    #[error("invalid timeline state: property '{property}' has conflicting entries at {time}")]
    InvalidTimelineState {
        /// Property whose chain is malformed.
        property: String,
        /// Time at which the conflict was found.
        time: Millis,
    },

    /// An evaluation reached a state that a clamped, well-formed timeline cannot produce.
    #[error("internal invariant violation: {0}")]
    InternalInvariantViolation(String),

    /// Invalid user-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KeyholdError {
    /// Build a [`KeyholdError::InvalidTimelineState`] value.
    pub fn invalid_timeline(property: impl Into<String>, time: Millis) -> Self {
        Self::InvalidTimelineState {
            property: property.into(),
            time,
        }
    }

    /// Build a [`KeyholdError::InternalInvariantViolation`] value.
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InternalInvariantViolation(msg.into())
    }

    /// Build a [`KeyholdError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`KeyholdError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
