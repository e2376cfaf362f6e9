//! Error types for effect synthesis

use serde::{Deserialize, Serialize};

/// Failures of a single dispatch call. None of them abort a conversion run;
/// the driver skips the affected animation step.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum EffectError {
    /// Effect id absent from both registries
    #[error("Unsupported effect: {effect_id}")]
    UnsupportedEffect { effect_id: String },

    /// None of the three duration carriers is present on the timing node
    #[error("No duration carrier present for effect {effect_id}")]
    MissingDurationSource { effect_id: String },

    /// Duration is negative, not finite, or not a clock value
    #[error("Invalid duration: {raw}")]
    InvalidDuration { raw: String },

    /// Motion path grammar violation
    #[error("Malformed motion path at byte {offset}: {reason}")]
    MalformedMotionPath { reason: String, offset: usize },

    /// Timeline step targets an object the registry does not know
    #[error("Unknown object: {object_id}")]
    UnknownObject { object_id: String },

    /// Request or timeline JSON could not be decoded
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl EffectError {
    /// Whether the run can continue by skipping the affected step.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::SerializationError { .. })
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::UnsupportedEffect { .. } => "registry",
            Self::MissingDurationSource { .. } | Self::InvalidDuration { .. } => "timing",
            Self::MalformedMotionPath { .. } => "path",
            Self::UnknownObject { .. } => "input",
            Self::SerializationError { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for EffectError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            reason: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EffectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_recoverability() {
        let unsupported = EffectError::UnsupportedEffect {
            effect_id: "ooo-entrance-bogus".to_string(),
        };
        assert!(unsupported.is_recoverable());

        let decode = EffectError::SerializationError {
            reason: "eof".to_string(),
        };
        assert!(!decode.is_recoverable());
    }

    #[test]
    fn test_error_categories() {
        let timing = EffectError::MissingDurationSource {
            effect_id: "ooo-entrance-random".to_string(),
        };
        assert_eq!(timing.category(), "timing");

        let path = EffectError::MalformedMotionPath {
            reason: "expected number".to_string(),
            offset: 3,
        };
        assert_eq!(path.category(), "path");
        assert_eq!(
            path.to_string(),
            "Malformed motion path at byte 3: expected number"
        );
    }
}
