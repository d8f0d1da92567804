//! Control and group kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GroupError, Result};

/// Semantic type of a single control.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    /// Mutually exclusive choice (`<input type="radio">`).
    Radio,
    /// Independent choice (`<input type="checkbox">`).
    Checkbox,
    /// Anything else (text, select, ...); never grouped.
    #[serde(untagged)]
    Other(String),
}

impl ControlKind {
    /// Get the string representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Other(kind) => kind,
        }
    }

    /// Whether controls of this kind can form a group.
    pub fn is_groupable(&self) -> bool {
        matches!(self, Self::Radio | Self::Checkbox)
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ControlKind {
    fn from(value: &str) -> Self {
        match value {
            "radio" => Self::Radio,
            "checkbox" => Self::Checkbox,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Aggregation semantics of a group, derived from its first member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    /// At most one member selected; nothing selected is invalid.
    Exclusive,
    /// Any number of members selected; always valid.
    Multi,
}

impl GroupKind {
    /// The control kind members of this group carry.
    pub fn control_kind(&self) -> ControlKind {
        match self {
            Self::Exclusive => ControlKind::Radio,
            Self::Multi => ControlKind::Checkbox,
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.control_kind().as_str())
    }
}

impl TryFrom<&ControlKind> for GroupKind {
    type Error = GroupError;

    fn try_from(kind: &ControlKind) -> Result<Self> {
        match kind {
            ControlKind::Radio => Ok(Self::Exclusive),
            ControlKind::Checkbox => Ok(Self::Multi),
            ControlKind::Other(other) => Err(GroupError::unsupported_kind(other.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(ControlKind::from("radio"), ControlKind::Radio);
        assert_eq!(ControlKind::from("checkbox"), ControlKind::Checkbox);
        assert_eq!(
            ControlKind::from("text"),
            ControlKind::Other("text".to_string())
        );
    }

    #[test]
    fn test_group_kind_from_control_kind() {
        assert_eq!(
            GroupKind::try_from(&ControlKind::Radio).unwrap(),
            GroupKind::Exclusive
        );
        assert_eq!(
            GroupKind::try_from(&ControlKind::Checkbox).unwrap(),
            GroupKind::Multi
        );
        let err = GroupKind::try_from(&ControlKind::from("select")).unwrap_err();
        assert!(matches!(err, GroupError::UnsupportedKind { kind } if kind == "select"));
    }

    #[test]
    fn test_group_kind_display_uses_control_kind() {
        assert_eq!(GroupKind::Exclusive.to_string(), "radio");
        assert_eq!(GroupKind::Multi.to_string(), "checkbox");
    }

    #[test]
    fn test_serde_other_kind() {
        let kind: ControlKind = serde_json::from_str("\"email\"").unwrap();
        assert_eq!(kind, ControlKind::Other("email".to_string()));
        let kind: ControlKind = serde_json::from_str("\"radio\"").unwrap();
        assert_eq!(kind, ControlKind::Radio);
    }
}
