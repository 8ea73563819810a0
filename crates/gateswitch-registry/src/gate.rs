//! Gate definitions.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

/// Maturity stage of a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Experimental - disabled by default, may change or be removed.
    Alpha,
    /// Mostly stable - enabled by default, can still be turned off.
    Beta,
    /// Always enabled. Disabling is an error.
    Stable,
    /// Always disabled. Enabling is an error.
    Deprecated,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alpha => write!(f, "alpha"),
            Self::Beta => write!(f, "beta"),
            Self::Stable => write!(f, "stable"),
            Self::Deprecated => write!(f, "deprecated"),
        }
    }
}

impl Stage {
    /// Initial enabled state of a gate registered at this stage.
    #[must_use]
    pub const fn default_enabled(self) -> bool {
        matches!(self, Self::Beta | Self::Stable)
    }

    /// The only state a gate at this stage may hold, if it is locked.
    #[must_use]
    pub const fn locked_state(self) -> Option<bool> {
        match self {
            Self::Stable => Some(true),
            Self::Deprecated => Some(false),
            Self::Alpha | Self::Beta => None,
        }
    }

    /// Check if gates at this stage can be toggled at all.
    #[must_use]
    pub const fn is_mutable(self) -> bool {
        self.locked_state().is_none()
    }
}

/// Definition of a gate, consumed by [`Registry::register`](crate::Registry::register).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateDef {
    pub(crate) id: String,
    pub(crate) stage: Stage,
    pub(crate) description: String,
    pub(crate) reference_url: Option<String>,
}

impl GateDef {
    pub fn new(id: impl Into<String>, stage: Stage) -> Self {
        Self {
            id: id.into(),
            stage,
            description: String::new(),
            reference_url: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn reference_url(mut self, url: impl Into<String>) -> Self {
        self.reference_url = Some(url.into());
        self
    }
}

/// A registered gate.
///
/// Handles are shared (`Arc<Gate>`) between the registry and the code that
/// checks the gate, so the enabled flag is atomic.
#[derive(Debug)]
pub struct Gate {
    id: String,
    stage: Stage,
    description: String,
    reference_url: Option<String>,
    enabled: AtomicBool,
}

impl Gate {
    pub(crate) fn from_def(def: GateDef) -> Self {
        Self {
            enabled: AtomicBool::new(def.stage.default_enabled()),
            id: def.id,
            stage: def.stage,
            description: def.description,
            reference_url: def.reference_url,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn reference_url(&self) -> Option<&str> {
        self.reference_url.as_deref()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Store the new state, returning the previous one.
    pub(crate) fn store(&self, enabled: bool) -> bool {
        self.enabled.swap(enabled, Ordering::AcqRel)
    }

    /// Point-in-time copy of this gate.
    pub fn info(&self) -> GateInfo {
        GateInfo {
            id: self.id.clone(),
            stage: self.stage,
            enabled: self.is_enabled(),
            description: self.description.clone(),
            reference_url: self.reference_url.clone(),
        }
    }
}

/// Serializable snapshot of a gate's state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateInfo {
    pub id: String,
    pub stage: Stage,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_defaults() {
        assert!(!Stage::Alpha.default_enabled());
        assert!(Stage::Beta.default_enabled());
        assert!(Stage::Stable.default_enabled());
        assert!(!Stage::Deprecated.default_enabled());
    }

    #[test]
    fn test_stage_locking() {
        assert!(Stage::Alpha.is_mutable());
        assert!(Stage::Beta.is_mutable());
        assert_eq!(Stage::Stable.locked_state(), Some(true));
        assert_eq!(Stage::Deprecated.locked_state(), Some(false));
    }

    #[test]
    fn test_gate_info_serialization() {
        let gate = Gate::from_def(
            GateDef::new("exporter.retry", Stage::Beta).description("Retry failed exports"),
        );
        let json = serde_json::to_value(gate.info()).unwrap();
        assert_eq!(json["id"], "exporter.retry");
        assert_eq!(json["stage"], "beta");
        assert_eq!(json["enabled"], true);
        assert!(json.get("reference_url").is_none());
    }
}
