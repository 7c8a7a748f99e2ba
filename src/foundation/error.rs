/// Convenience result type used across geostamp.
pub type StampResult<T> = Result<T, StampError>;

/// Error taxonomy for a single compositing call.
///
/// None of these are retried internally; the first error encountered ends the call and any
/// partially painted surface is dropped with it.
#[derive(thiserror::Error, Debug)]
pub enum StampError {
    /// Non-positive dimensions, a pixel buffer that does not match them, or undecodable input.
    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    /// No usable font for a text role, or shaping failed.
    #[error("text measurement error: {0}")]
    Measurement(String),

    /// The painted surface could not be serialized.
    #[error("encode error: {0}")]
    Encode(String),

    /// Malformed style configuration.
    #[error("validation error: {0}")]
    Validation(String),
}

impl StampError {
    /// Build a [`StampError::InvalidFrame`] value.
    pub fn invalid_frame(msg: impl Into<String>) -> Self {
        Self::InvalidFrame(msg.into())
    }

    /// Build a [`StampError::Measurement`] value.
    pub fn measurement(msg: impl Into<String>) -> Self {
        Self::Measurement(msg.into())
    }

    /// Build a [`StampError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`StampError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
