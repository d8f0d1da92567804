//! Aggregation policies for choice groups.
//!
//! Both policies are snapshotted from the global configuration when a group
//! is constructed and can be overridden per group.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How an exclusive group resolves several checked references in one answer.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    /// Keep the first checked reference in envelope order.
    #[default]
    First,
    /// Keep the last checked reference in envelope order.
    Last,
    /// Fail the answer with `GroupError::AmbiguousSelection`.
    Reject,
}

/// Valid values for the tie-break setting.
pub const VALID_TIE_BREAKS: &[&str] = &["first", "last", "reject"];

impl TieBreak {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Last => "last",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            "reject" => Ok(Self::Reject),
            other => Err(format!("unknown tie-break: {other}")),
        }
    }
}

/// How a group derives its error message from its members.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorMessagePolicy {
    /// First non-empty member message in member order.
    #[default]
    FirstNonEmpty,
    /// All distinct non-empty member messages joined with `"; "`.
    Joined,
}

/// Valid values for the error message setting.
pub const VALID_ERROR_POLICIES: &[&str] = &["first-non-empty", "joined"];

impl ErrorMessagePolicy {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstNonEmpty => "first-non-empty",
            Self::Joined => "joined",
        }
    }

    /// Combine member messages, returning `None` when no member has one.
    pub fn combine<I, S>(&self, messages: I) -> Option<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut non_empty = messages
            .into_iter()
            .map(|m| m.as_ref().trim().to_string())
            .filter(|m| !m.is_empty());

        match self {
            Self::FirstNonEmpty => non_empty.next(),
            Self::Joined => {
                let mut seen: Vec<String> = Vec::new();
                for message in non_empty {
                    if !seen.contains(&message) {
                        seen.push(message);
                    }
                }
                if seen.is_empty() {
                    None
                } else {
                    Some(seen.join("; "))
                }
            }
        }
    }
}

impl fmt::Display for ErrorMessagePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorMessagePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first-non-empty" => Ok(Self::FirstNonEmpty),
            "joined" => Ok(Self::Joined),
            other => Err(format!("unknown error message policy: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tie_break_roundtrip_str() {
        for value in VALID_TIE_BREAKS {
            let parsed: TieBreak = value.parse().unwrap();
            assert_eq!(parsed.as_str(), *value);
        }
        assert!("middle".parse::<TieBreak>().is_err());
    }

    #[test]
    fn test_error_policy_parse() {
        assert_eq!(
            "joined".parse::<ErrorMessagePolicy>().unwrap(),
            ErrorMessagePolicy::Joined
        );
        assert!("last-wins".parse::<ErrorMessagePolicy>().is_err());
    }

    #[test]
    fn test_first_non_empty_skips_empty() {
        let policy = ErrorMessagePolicy::FirstNonEmpty;
        assert_eq!(
            policy.combine(["", "  ", "pick one", "other"]),
            Some("pick one".to_string())
        );
    }

    #[test]
    fn test_joined_dedupes_in_order() {
        let policy = ErrorMessagePolicy::Joined;
        assert_eq!(
            policy.combine(["required", "", "too many", "required"]),
            Some("required; too many".to_string())
        );
    }

    #[test]
    fn test_combine_none_when_all_empty() {
        assert_eq!(ErrorMessagePolicy::FirstNonEmpty.combine(["", ""]), None);
        assert_eq!(ErrorMessagePolicy::Joined.combine(Vec::<String>::new()), None);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ErrorMessagePolicy::FirstNonEmpty).unwrap();
        assert_eq!(json, "\"first-non-empty\"");
        let tb: TieBreak = serde_json::from_str("\"reject\"").unwrap();
        assert_eq!(tb, TieBreak::Reject);
    }
}
