//! Gate registry.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

use crate::{Gate, GateDef, GateError, GateInfo};

static ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9A-Za-z][0-9A-Za-z._]*$").expect("gate id pattern is a valid regex")
});

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);

/// Check whether `id` is acceptable as a gate identifier.
///
/// Identifiers can never start with `-` or `+` or contain `,`, so every
/// registered gate is addressable through the flag syntax.
#[must_use]
pub fn is_valid_id(id: &str) -> bool {
    ID_PATTERN.is_match(id)
}

/// Registry of gates, keyed and enumerated by identifier.
#[derive(Debug, Default)]
pub struct Registry {
    gates: RwLock<BTreeMap<String, Arc<Gate>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Register a gate and return a handle to it.
    pub fn register(&self, def: GateDef) -> Result<Arc<Gate>, GateError> {
        if !is_valid_id(&def.id) {
            return Err(GateError::InvalidId { id: def.id });
        }

        let mut gates = self.gates.write().unwrap_or_else(PoisonError::into_inner);
        if gates.contains_key(&def.id) {
            return Err(GateError::Duplicate { id: def.id });
        }

        let gate = Arc::new(Gate::from_def(def));
        debug!(
            gate = %gate.id(),
            stage = %gate.stage(),
            enabled = gate.is_enabled(),
            "Registered feature gate"
        );
        gates.insert(gate.id().to_string(), Arc::clone(&gate));
        Ok(gate)
    }

    /// Register a gate from a static catalog.
    ///
    /// # Panics
    ///
    /// Panics if the identifier is invalid or already registered.
    pub fn must_register(&self, def: GateDef) -> Arc<Gate> {
        match self.register(def) {
            Ok(gate) => gate,
            Err(err) => panic!("failed to register feature gate: {err}"),
        }
    }

    /// Look up a gate by identifier.
    pub fn get(&self, id: &str) -> Option<Arc<Gate>> {
        self.gates
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Check if a gate is enabled. Unknown gates report `false`.
    pub fn is_enabled(&self, id: &str) -> bool {
        self.get(id).is_some_and(|gate| gate.is_enabled())
    }

    /// Set the enabled state of a gate.
    ///
    /// Stable gates accept `true` and deprecated gates accept `false` as
    /// no-ops; the opposite request fails.
    pub fn set(&self, id: &str, enabled: bool) -> Result<(), GateError> {
        let Some(gate) = self.get(id) else {
            debug!(gate = %id, enabled, "Rejected unknown feature gate");
            return Err(GateError::Unknown { id: id.to_string() });
        };

        match gate.stage().locked_state() {
            Some(locked) if locked != enabled => {
                debug!(gate = %id, stage = %gate.stage(), enabled, "Rejected locked feature gate");
                Err(GateError::locked(id, gate.stage()))
            }
            Some(_) => Ok(()),
            None => {
                let previous = gate.store(enabled);
                debug!(gate = %id, previous, enabled, "Feature gate updated");
                Ok(())
            }
        }
    }

    /// Visit every gate in identifier order.
    pub fn visit_all(&self, mut visit: impl FnMut(&Gate)) {
        let gates = self.gates.read().unwrap_or_else(PoisonError::into_inner);
        for gate in gates.values() {
            visit(gate);
        }
    }

    /// Snapshot of every gate in identifier order.
    pub fn snapshot(&self) -> Vec<GateInfo> {
        let mut infos = Vec::with_capacity(self.len());
        self.visit_all(|gate| infos.push(gate.info()));
        infos
    }

    pub fn len(&self) -> usize {
        self.gates.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
