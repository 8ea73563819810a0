//! Per-token failures and their aggregate

use std::error::Error;
use std::fmt;

use gateswitch_registry::GateError;

use crate::GateToken;

/// One token the registry refused.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{segment:?}: {source}")]
pub struct GateFailure<E = GateError>
where
    E: Error + 'static,
{
    /// Segment exactly as it appeared in the flag value
    pub segment: String,
    /// Parsed form of the segment
    pub token: GateToken,
    /// Registry error
    #[source]
    pub source: E,
}

impl<E: Error + 'static> GateFailure<E> {
    pub fn new(segment: impl Into<String>, token: GateToken, source: E) -> Self {
        Self {
            segment: segment.into(),
            token,
            source,
        }
    }

    /// Identifier passed to the registry (prefix removed)
    pub fn identifier(&self) -> &str {
        &self.token.identifier
    }
}

/// Every token that failed while applying one or more flag values.
///
/// Never empty: an input without failures produces `Ok(())` instead. Failures
/// keep the order in which tokens were applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateError<E = GateError>
where
    E: Error + 'static,
{
    failures: Vec<GateFailure<E>>,
}

impl<E: Error + 'static> AggregateError<E> {
    /// Wrap collected failures, or `None` if there were none.
    pub fn from_failures(failures: Vec<GateFailure<E>>) -> Option<Self> {
        (!failures.is_empty()).then_some(Self { failures })
    }

    /// `Ok(())` for no failures, the aggregate otherwise.
    pub fn check(failures: Vec<GateFailure<E>>) -> Result<(), Self> {
        Self::from_failures(failures).map_or(Ok(()), Err)
    }

    pub fn failures(&self) -> &[GateFailure<E>] {
        &self.failures
    }

    pub fn into_failures(self) -> Vec<GateFailure<E>> {
        self.failures
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Identifiers of the failed tokens, in order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(GateFailure::identifier)
    }

    /// Append the failures of `other` after this aggregate's own.
    pub fn merge(&mut self, other: Self) {
        self.failures.extend(other.failures);
    }
}

impl<E: Error + 'static> fmt::Display for AggregateError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.failures.as_slice() {
            [only] => write!(f, "invalid feature gate {only}"),
            failures => {
                write!(f, "{} invalid feature gates: ", failures.len())?;
                for (i, failure) in failures.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{failure}")?;
                }
                Ok(())
            }
        }
    }
}

impl<E: Error + 'static> Error for AggregateError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.failures.first().map(|f| f as &(dyn Error + 'static))
    }
}

impl<E: Error + 'static> IntoIterator for AggregateError<E> {
    type Item = GateFailure<E>;
    type IntoIter = std::vec::IntoIter<GateFailure<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.into_iter()
    }
}
