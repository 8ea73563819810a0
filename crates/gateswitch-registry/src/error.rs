//! Registry error types

use thiserror::Error;

use crate::gate::Stage;

/// Errors returned by [`Registry`](crate::Registry) operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    #[error("no such feature gate: {id:?}")]
    Unknown { id: String },

    #[error("feature gate {id:?} is stable and cannot be disabled")]
    StableLocked { id: String },

    #[error("feature gate {id:?} is deprecated and cannot be enabled")]
    DeprecatedLocked { id: String },

    #[error("invalid feature gate identifier {id:?}: must start with a letter or digit and contain only letters, digits, '.' or '_'")]
    InvalidId { id: String },

    #[error("feature gate {id:?} is already registered")]
    Duplicate { id: String },
}

impl GateError {
    /// The identifier the error refers to
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Unknown { id }
            | Self::StableLocked { id }
            | Self::DeprecatedLocked { id }
            | Self::InvalidId { id }
            | Self::Duplicate { id } => id,
        }
    }

    /// Build the lock error for a gate whose stage forbids the requested state
    pub(crate) fn locked(id: &str, stage: Stage) -> Self {
        match stage {
            Stage::Deprecated => Self::DeprecatedLocked { id: id.to_string() },
            _ => Self::StableLocked { id: id.to_string() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_gate() {
        let err = GateError::Unknown {
            id: "ghost".to_string(),
        };
        assert_eq!(err.to_string(), r#"no such feature gate: "ghost""#);
        assert_eq!(err.id(), "ghost");

        let err = GateError::Unknown { id: String::new() };
        assert_eq!(err.to_string(), r#"no such feature gate: """#);
    }

    #[test]
    fn test_locked_picks_variant_by_stage() {
        assert!(matches!(
            GateError::locked("a", Stage::Stable),
            GateError::StableLocked { .. }
        ));
        assert!(matches!(
            GateError::locked("a", Stage::Deprecated),
            GateError::DeprecatedLocked { .. }
        ));
    }
}
