//! Widget state flags and state specifications
//!
//! A widget is always in some combination of states (hovered, pressed,
//! selected, ...). Style maps and image elements attach values to *state
//! specs*: space separated state names, each optionally negated with `!`.
//! `"pressed !disabled"` matches any state that includes `pressed` and
//! excludes `disabled`.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;
use thiserror::Error;

/// Error produced when a state spec names an unknown state
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown widget state {state:?} in state spec {spec:?}")]
pub struct StateSpecError {
    pub state: String,
    pub spec: String,
}

/// Set of widget state flags
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WidgetState {
    bits: u16,
}

impl WidgetState {
    pub const NONE: WidgetState = WidgetState { bits: 0 };
    pub const ACTIVE: WidgetState = WidgetState { bits: 1 << 0 };
    pub const DISABLED: WidgetState = WidgetState { bits: 1 << 1 };
    pub const FOCUS: WidgetState = WidgetState { bits: 1 << 2 };
    pub const PRESSED: WidgetState = WidgetState { bits: 1 << 3 };
    pub const SELECTED: WidgetState = WidgetState { bits: 1 << 4 };
    pub const BACKGROUND: WidgetState = WidgetState { bits: 1 << 5 };
    pub const READONLY: WidgetState = WidgetState { bits: 1 << 6 };
    pub const ALTERNATE: WidgetState = WidgetState { bits: 1 << 7 };
    pub const INVALID: WidgetState = WidgetState { bits: 1 << 8 };
    pub const HOVER: WidgetState = WidgetState { bits: 1 << 9 };

    const NAMES: [(&'static str, WidgetState); 10] = [
        ("active", Self::ACTIVE),
        ("disabled", Self::DISABLED),
        ("focus", Self::FOCUS),
        ("pressed", Self::PRESSED),
        ("selected", Self::SELECTED),
        ("background", Self::BACKGROUND),
        ("readonly", Self::READONLY),
        ("alternate", Self::ALTERNATE),
        ("invalid", Self::INVALID),
        ("hover", Self::HOVER),
    ];

    /// Look up a single state flag by name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, state)| *state)
    }

    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Check that every flag in `other` is set
    pub const fn contains(&self, other: WidgetState) -> bool {
        self.bits & other.bits == other.bits
    }

    /// Check that at least one flag in `other` is set
    pub const fn intersects(&self, other: WidgetState) -> bool {
        self.bits & other.bits != 0
    }

    /// Names of the set flags, in declaration order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        Self::NAMES
            .iter()
            .filter(|(_, flag)| self.contains(*flag))
            .map(|(name, _)| *name)
    }
}

impl BitOr for WidgetState {
    type Output = WidgetState;

    fn bitor(self, rhs: Self) -> Self::Output {
        WidgetState {
            bits: self.bits | rhs.bits,
        }
    }
}

impl BitOrAssign for WidgetState {
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits |= rhs.bits;
    }
}

/// A parsed state specification such as `"hover !selected !disabled"`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StateSpec {
    /// States that must be present
    pub on: WidgetState,
    /// States that must be absent
    pub off: WidgetState,
}

impl StateSpec {
    /// Check whether `state` satisfies this spec
    pub const fn matches(&self, state: WidgetState) -> bool {
        state.contains(self.on) && !state.intersects(self.off)
    }
}

impl FromStr for StateSpec {
    type Err = StateSpecError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let mut parsed = StateSpec::default();
        for token in spec.split_whitespace() {
            let (negated, name) = match token.strip_prefix('!') {
                Some(name) => (true, name),
                None => (false, token),
            };
            let flag = WidgetState::from_name(name).ok_or_else(|| StateSpecError {
                state: name.to_string(),
                spec: spec.to_string(),
            })?;
            if negated {
                parsed.off |= flag;
            } else {
                parsed.on |= flag;
            }
        }
        Ok(parsed)
    }
}

impl fmt::Display for StateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let on = self.on.names().map(str::to_string);
        let off = self.off.names().map(|name| format!("!{name}"));
        let tokens: Vec<String> = on.chain(off).collect();
        f.write_str(&tokens.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive_and_negated_states() {
        let spec: StateSpec = "pressed !disabled".parse().unwrap();
        assert_eq!(spec.on, WidgetState::PRESSED);
        assert_eq!(spec.off, WidgetState::DISABLED);
    }

    #[test]
    fn test_matching() {
        let spec: StateSpec = "hover !selected !disabled".parse().unwrap();
        assert!(spec.matches(WidgetState::HOVER));
        assert!(spec.matches(WidgetState::HOVER | WidgetState::FOCUS));
        assert!(!spec.matches(WidgetState::HOVER | WidgetState::SELECTED));
        assert!(!spec.matches(WidgetState::NONE));
    }

    #[test]
    fn test_empty_spec_matches_everything() {
        let spec: StateSpec = "".parse().unwrap();
        assert!(spec.matches(WidgetState::NONE));
        assert!(spec.matches(WidgetState::DISABLED | WidgetState::SELECTED));
    }

    #[test]
    fn test_unknown_state_is_an_error() {
        let err = "pressed !hovered".parse::<StateSpec>().unwrap_err();
        assert_eq!(err.state, "hovered");
        assert_eq!(err.spec, "pressed !hovered");
    }

    #[test]
    fn test_display_round_trip() {
        let spec: StateSpec = "!disabled selected pressed".parse().unwrap();
        assert_eq!(spec.to_string(), "pressed selected !disabled");
        assert_eq!(spec.to_string().parse::<StateSpec>(), Ok(spec));
    }
}
