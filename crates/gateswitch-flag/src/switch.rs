//! The feature gate flag adapter

use std::error::Error;
use std::fmt;

use gateswitch_registry::{GateError, Registry};
use tracing::debug;

use crate::token::SEPARATOR;
use crate::{AggregateError, GateFailure, GateToken};

/// Type tag reported for the flag in help text.
pub const TYPE_NAME: &str = "featuregate";

/// The two registry operations the flag relies on.
pub trait GateRegistry {
    type Error: Error + 'static;

    /// Set one gate by identifier.
    fn set(&self, id: &str, enabled: bool) -> Result<(), Self::Error>;

    /// Visit every gate as `(id, enabled)` in the registry's own order.
    fn visit_all(&self, visit: &mut dyn FnMut(&str, bool));
}

impl GateRegistry for Registry {
    type Error = GateError;

    fn set(&self, id: &str, enabled: bool) -> Result<(), GateError> {
        Registry::set(self, id, enabled)
    }

    fn visit_all(&self, visit: &mut dyn FnMut(&str, bool)) {
        Registry::visit_all(self, |gate| visit(gate.id(), gate.is_enabled()));
    }
}

/// A value a command-line parser can render, set from a string, and describe.
pub trait FlagValue {
    type Error;

    /// Current value in flag syntax.
    fn render(&self) -> String;

    /// Apply a raw flag value.
    fn set(&self, raw: &str) -> Result<(), Self::Error>;

    /// Short type tag for help output.
    fn type_name(&self) -> &'static str;
}

/// Applies comma-separated gate tokens to a borrowed registry.
///
/// Holds nothing but the registry reference; all state lives in the registry.
pub struct GateSwitch<'a, R: GateRegistry + ?Sized = Registry> {
    registry: &'a R,
}

impl<'a, R: GateRegistry + ?Sized> GateSwitch<'a, R> {
    pub fn new(registry: &'a R) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'a R {
        self.registry
    }

    /// Every gate as `id` (enabled) or `-id` (disabled), joined with `,`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.registry.visit_all(&mut |id, enabled| {
            if !out.is_empty() {
                out.push(SEPARATOR);
            }
            if !enabled {
                out.push('-');
            }
            out.push_str(id);
        });
        out
    }

    /// Apply a raw flag value.
    ///
    /// Tokens are applied left to right. A rejected token does not stop the
    /// ones after it and nothing is rolled back; every rejection is reported
    /// in the returned aggregate. The empty string is a no-op.
    pub fn set(&self, raw: &str) -> Result<(), AggregateError<R::Error>> {
        AggregateError::check(self.apply(raw))
    }

    /// Apply a raw flag value and return the failures instead of an error.
    pub fn apply(&self, raw: &str) -> Vec<GateFailure<R::Error>> {
        self.apply_tokens(GateToken::split(raw))
    }

    /// Apply already-parsed `(segment, token)` pairs in order.
    ///
    /// Identifiers are forwarded to the registry verbatim; no prefix or
    /// separator handling happens here.
    pub fn apply_tokens<'s, I>(&self, tokens: I) -> Vec<GateFailure<R::Error>>
    where
        I: IntoIterator<Item = (&'s str, GateToken)>,
    {
        let mut failures = Vec::new();
        for (segment, token) in tokens {
            if let Err(source) = self.registry.set(&token.identifier, token.desired_state) {
                debug!(segment = %segment, error = %source, "Feature gate token rejected");
                failures.push(GateFailure::new(segment, token, source));
            }
        }
        failures
    }

    pub fn type_name(&self) -> &'static str {
        TYPE_NAME
    }
}

impl<R: GateRegistry + ?Sized> FlagValue for GateSwitch<'_, R> {
    type Error = AggregateError<R::Error>;

    fn render(&self) -> String {
        GateSwitch::render(self)
    }

    fn set(&self, raw: &str) -> Result<(), Self::Error> {
        GateSwitch::set(self, raw)
    }

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }
}

impl<R: GateRegistry + ?Sized> fmt::Display for GateSwitch<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl<R: GateRegistry + ?Sized> fmt::Debug for GateSwitch<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GateSwitch")
            .field("value", &self.render())
            .finish()
    }
}

impl<R: GateRegistry + ?Sized> Clone for GateSwitch<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: GateRegistry + ?Sized> Copy for GateSwitch<'_, R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use gateswitch_registry::{GateDef, Stage};
    use std::cell::RefCell;

    /// Registry double that records every call it receives.
    #[derive(Default)]
    struct RecordingRegistry {
        known: Vec<&'static str>,
        calls: RefCell<Vec<(String, bool)>>,
    }

    impl GateRegistry for RecordingRegistry {
        type Error = GateError;

        fn set(&self, id: &str, enabled: bool) -> Result<(), GateError> {
            self.calls.borrow_mut().push((id.to_string(), enabled));
            if self.known.contains(&id) {
                Ok(())
            } else {
                Err(GateError::Unknown { id: id.to_string() })
            }
        }

        fn visit_all(&self, visit: &mut dyn FnMut(&str, bool)) {
            for id in &self.known {
                visit(id, true);
            }
        }
    }

    fn registry() -> Registry {
        let registry = Registry::new();
        registry.must_register(GateDef::new("alpha", Stage::Alpha));
        registry.must_register(GateDef::new("beta", Stage::Alpha));
        registry
    }

    #[test]
    fn test_empty_value_is_noop() {
        let recorder = RecordingRegistry::default();
        GateSwitch::new(&recorder).set("").unwrap();
        assert!(recorder.calls.borrow().is_empty());
    }

    #[test]
    fn test_prefix_never_reaches_registry() {
        let recorder = RecordingRegistry {
            known: vec!["a", "b", "c"],
            ..Default::default()
        };
        GateSwitch::new(&recorder).set("a,-b,+c").unwrap();
        assert_eq!(
            *recorder.calls.borrow(),
            [
                ("a".to_string(), true),
                ("b".to_string(), false),
                ("c".to_string(), true)
            ]
        );
    }

    #[test]
    fn test_empty_segments_are_forwarded() {
        let recorder = RecordingRegistry {
            known: vec!["a"],
            ..Default::default()
        };
        let err = GateSwitch::new(&recorder).set("a,,").unwrap_err();
        assert_eq!(recorder.calls.borrow().len(), 3);
        assert_eq!(err.identifiers().collect::<Vec<_>>(), ["", ""]);
    }

    #[test]
    fn test_enable_bare_identifier() {
        let registry = registry();
        GateSwitch::new(&registry).set("alpha").unwrap();
        assert!(registry.is_enabled("alpha"));
        assert!(!registry.is_enabled("beta"));
    }

    #[test]
    fn test_last_token_wins() {
        let registry = registry();
        let switch = GateSwitch::new(&registry);
        switch.set("alpha,-alpha").unwrap();
        assert!(!registry.is_enabled("alpha"));
        switch.set("-alpha,+alpha").unwrap();
        assert!(registry.is_enabled("alpha"));
    }

    #[test]
    fn test_failures_do_not_stop_later_tokens() {
        let registry = registry();
        registry.set("beta", true).unwrap();
        let err = GateSwitch::new(&registry)
            .set("alpha,ghost,-beta")
            .unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.failures()[0].segment, "ghost");
        assert!(registry.is_enabled("alpha"));
        assert!(!registry.is_enabled("beta"));
    }

    #[test]
    fn test_render_empty_registry() {
        let registry = Registry::new();
        assert_eq!(GateSwitch::new(&registry).render(), "");
    }

    #[test]
    fn test_render_marks_disabled_gates() {
        let registry = registry();
        registry.set("alpha", true).unwrap();
        let switch = GateSwitch::new(&registry);
        assert_eq!(switch.render(), "alpha,-beta");
        assert_eq!(switch.to_string(), switch.render());
    }

    #[test]
    fn test_flag_value_trait_object_style_use() {
        fn describe<F: FlagValue>(flag: &F) -> String {
            format!("{} = {}", flag.type_name(), flag.render())
        }
        let registry = registry();
        let switch = GateSwitch::new(&registry);
        FlagValue::set(&switch, "+beta").unwrap();
        assert_eq!(describe(&switch), "featuregate = -alpha,beta");
    }

    #[test]
    fn test_apply_tokens_forwards_identifiers_verbatim() {
        let recorder = RecordingRegistry {
            known: vec!["alpha"],
            ..Default::default()
        };
        let failures = GateSwitch::new(&recorder).apply_tokens([
            ("-alpha", GateToken::new("-alpha", true)),
            ("beta,gamma", GateToken::new("beta,gamma", true)),
            ("alpha", GateToken::new("alpha", false)),
        ]);
        assert_eq!(
            *recorder.calls.borrow(),
            [
                ("-alpha".to_string(), true),
                ("beta,gamma".to_string(), true),
                ("alpha".to_string(), false),
            ]
        );
        let identifiers: Vec<_> = failures.iter().map(GateFailure::identifier).collect();
        assert_eq!(identifiers, ["-alpha", "beta,gamma"]);
    }
}
