//! Enclosing fieldset of a group.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Attribute carrying pipe-delimited candidate questions.
pub const QUESTIONS_ATTRIBUTE: &str = "cf-questions";

/// Optional container that owns a group's controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fieldset {
    /// Group-level name.
    pub name: Option<String>,
    /// Group-level id.
    pub id: Option<String>,
    /// Raw attributes of the container.
    pub attributes: HashMap<String, String>,
}

impl Fieldset {
    /// Create an empty fieldset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set a raw attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Set the candidate questions attribute.
    pub fn with_questions(self, questions: impl Into<String>) -> Self {
        self.with_attribute(QUESTIONS_ATTRIBUTE, questions)
    }

    /// Name, when present and non-empty.
    pub fn non_empty_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// Id, when present and non-empty.
    pub fn non_empty_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|i| !i.is_empty())
    }

    /// Candidate questions split on `|`; empty when the attribute is absent
    /// or blank.
    pub fn questions(&self) -> Vec<String> {
        match self.attributes.get(QUESTIONS_ATTRIBUTE) {
            Some(raw) if !raw.is_empty() => raw.split('|').map(str::to_string).collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_questions_split_on_pipe() {
        let fieldset = Fieldset::new().with_questions("Which size?|Pick a size|Size?");
        assert_eq!(
            fieldset.questions(),
            vec!["Which size?", "Pick a size", "Size?"]
        );
    }

    #[test]
    fn test_questions_absent_or_blank() {
        assert!(Fieldset::new().questions().is_empty());
        assert!(Fieldset::new().with_questions("").questions().is_empty());
    }

    #[test]
    fn test_empty_name_and_id_are_ignored() {
        let fieldset = Fieldset::new().with_name("").with_id("sizes");
        assert_eq!(fieldset.non_empty_name(), None);
        assert_eq!(fieldset.non_empty_id(), Some("sizes"));
    }
}
