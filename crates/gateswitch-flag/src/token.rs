//! Flag value tokens

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Separator between tokens in a flag value.
pub const SEPARATOR: char = ',';

/// One comma-separated segment of a flag value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GateToken {
    /// Gate identifier with any `-`/`+` prefix removed
    pub identifier: String,
    /// Requested state
    pub desired_state: bool,
}

impl GateToken {
    pub fn new(identifier: impl Into<String>, desired_state: bool) -> Self {
        Self {
            identifier: identifier.into(),
            desired_state,
        }
    }

    /// Interpret a single segment.
    ///
    /// A leading `-` disables, a leading `+` or no prefix enables. Only the
    /// first character is treated as a prefix, so `--a` disables the gate `-a`.
    #[must_use]
    pub fn parse(segment: &str) -> Self {
        if let Some(identifier) = segment.strip_prefix('-') {
            Self::new(identifier, false)
        } else if let Some(identifier) = segment.strip_prefix('+') {
            Self::new(identifier, true)
        } else {
            Self::new(segment, true)
        }
    }

    /// Split a raw flag value into `(segment, token)` pairs, left to right.
    ///
    /// The empty string yields nothing. Any other input yields one item per
    /// segment, including zero-length segments from doubled or trailing commas.
    pub fn split(raw: &str) -> impl Iterator<Item = (&str, GateToken)> {
        let segments = (!raw.is_empty()).then(|| raw.split(SEPARATOR));
        segments
            .into_iter()
            .flatten()
            .map(|segment| (segment, Self::parse(segment)))
    }
}

impl FromStr for GateToken {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Canonical form: `id` when enabled, `-id` when disabled.
impl fmt::Display for GateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.desired_state {
            f.write_str("-")?;
        }
        f.write_str(&self.identifier)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_split_yields_one_token_per_segment(raw in "[a-z+,-]{1,24}") {
            prop_assert_eq!(GateToken::split(&raw).count(), raw.matches(SEPARATOR).count() + 1);
        }

        #[test]
        fn prop_display_then_parse_is_identity(
            identifier in "[0-9A-Za-z][0-9A-Za-z._]{0,16}",
            desired_state in any::<bool>()
        ) {
            let token = GateToken::new(identifier, desired_state);
            prop_assert_eq!(GateToken::parse(&token.to_string()), token);
        }
    }
}
