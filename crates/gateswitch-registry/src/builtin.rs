//! Builtin gate catalog installed by the `gateswitch` binary.

use crate::{GateDef, GateError, Registry, Stage};

/// Builtin gate definitions, grouped by stage.
pub fn builtin_gates() -> Vec<GateDef> {
    vec![
        // ============================================================
        // Stable
        // ============================================================
        GateDef::new("telemetry.structured_logs", Stage::Stable)
            .description("Emit logs as structured events"),
        GateDef::new("exporter.retry", Stage::Stable)
            .description("Retry failed exports with backoff"),
        // ============================================================
        // Beta
        // ============================================================
        GateDef::new("pipeline.batching", Stage::Beta)
            .description("Batch records before export"),
        GateDef::new("receiver.compression", Stage::Beta)
            .description("Accept compressed payloads on receivers"),
        // ============================================================
        // Alpha
        // ============================================================
        GateDef::new("exporter.persistent_queue", Stage::Alpha)
            .description("Buffer pending exports on disk"),
        GateDef::new("processor.adaptive_sampling", Stage::Alpha)
            .description("Adjust sampling rate from observed throughput"),
        GateDef::new("telemetry.self_metrics", Stage::Alpha)
            .description("Report internal metrics about the gateswitch host"),
        // ============================================================
        // Deprecated
        // ============================================================
        GateDef::new("receiver.legacy_endpoint", Stage::Deprecated)
            .description("Serve the pre-1.0 receiver endpoint"),
    ]
}

/// Register every builtin gate into `registry`.
pub fn register_builtin(registry: &Registry) -> Result<(), GateError> {
    for def in builtin_gates() {
        registry.register(def)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_gates_register_cleanly() {
        let registry = Registry::new();
        register_builtin(&registry).unwrap();
        assert_eq!(registry.len(), builtin_gates().len());
        assert!(registry.is_enabled("exporter.retry"));
        assert!(!registry.is_enabled("exporter.persistent_queue"));
    }

    #[test]
    fn test_builtin_gates_are_described() {
        for def in builtin_gates() {
            assert!(!def.description.is_empty(), "{} has no description", def.id);
        }
    }

    #[test]
    fn test_register_builtin_twice_fails() {
        let registry = Registry::new();
        register_builtin(&registry).unwrap();
        assert!(matches!(
            register_builtin(&registry),
            Err(GateError::Duplicate { .. })
        ));
    }
}
