//! Answer envelopes delivered by the UI layer.
//!
//! An envelope lists the controls whose checked state was observed when the
//! user submitted an answer. References carry control ids, not controls;
//! groups resolve them against their own members.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A control id paired with its observed checked state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlRef {
    /// Id of the referenced control.
    pub id: String,
    /// Whether the control was checked when the answer was submitted.
    #[serde(default)]
    pub checked: bool,
}

impl ControlRef {
    /// Create a new reference.
    pub fn new(id: impl Into<String>, checked: bool) -> Self {
        Self {
            id: id.into(),
            checked,
        }
    }
}

/// One user-submitted answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerEnvelope {
    /// Free text typed by the user, if any.
    pub text: Option<String>,
    /// Control references in the order the UI reported them.
    pub controls: Vec<ControlRef>,
}

impl AnswerEnvelope {
    /// Create an empty envelope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append a control reference.
    pub fn with_control(mut self, id: impl Into<String>, checked: bool) -> Self {
        self.controls.push(ControlRef::new(id, checked));
        self
    }

    /// Parse an envelope from a JSON payload.
    pub fn from_json(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Ids of the references reported as checked, in envelope order.
    pub fn checked_ids(&self) -> impl Iterator<Item = &str> {
        self.controls
            .iter()
            .filter(|r| r.checked)
            .map(|r| r.id.as_str())
    }

    /// Find the reference for a control id.
    pub fn find(&self, id: &str) -> Option<&ControlRef> {
        self.controls.iter().find(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GroupError;

    #[test]
    fn test_builder_preserves_order() {
        let envelope = AnswerEnvelope::new()
            .with_control("c", true)
            .with_control("a", false)
            .with_control("b", true);

        let ids: Vec<&str> = envelope.controls.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert_eq!(envelope.checked_ids().collect::<Vec<_>>(), vec!["c", "b"]);
    }

    #[test]
    fn test_from_json() {
        let envelope = AnswerEnvelope::from_json(
            r#"{"controls":[{"id":"red","checked":true},{"id":"blue"}]}"#,
        )
        .unwrap();

        assert_eq!(envelope.text, None);
        assert_eq!(envelope.controls.len(), 2);
        assert!(envelope.find("red").unwrap().checked);
        assert!(!envelope.find("blue").unwrap().checked);
    }

    #[test]
    fn test_from_json_invalid() {
        let err = AnswerEnvelope::from_json("{not json").unwrap_err();
        assert!(matches!(err, GroupError::Serde { .. }));
    }

    #[test]
    fn test_find_missing() {
        let envelope = AnswerEnvelope::new().with_text("hello");
        assert!(envelope.find("x").is_none());
        assert_eq!(envelope.text.as_deref(), Some("hello"));
    }
}
