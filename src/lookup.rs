//! Response lookup for prompts and generic messages.
//!
//! Groups fall back to this service when neither the fieldset nor the first
//! member supplies a question, and for the generic invalid-input message.

use std::collections::HashMap;

use crate::config::DictionaryConfig;
use crate::control::kind::GroupKind;

/// Key of the generic invalid-input message.
pub const INPUT_ERROR_KEY: &str = "input-placeholder-error";

/// External dictionary queried by groups.
pub trait ResponseLookup {
    /// Prompt used for a group of the given kind when nothing else applies.
    fn fallback_question(&self, kind: GroupKind) -> String;

    /// Generic "invalid input" message.
    fn input_error(&self) -> String;
}

/// Table-backed dictionary with built-in English defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Dictionary {
    robot: HashMap<String, String>,
    user: HashMap<String, String>,
}

impl Default for Dictionary {
    fn default() -> Self {
        let robot = [
            ("radio", "Choose one of the options"),
            ("checkbox", "Select as many as you like"),
            ("general", "Please answer the question"),
        ];
        let user = [(INPUT_ERROR_KEY, "Your input is not correct")];

        Self {
            robot: robot
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            user: user
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl Dictionary {
    /// Build a dictionary with configured overrides on top of the defaults.
    pub fn from_config(config: &DictionaryConfig) -> Self {
        let mut dictionary = Self::default();
        dictionary.robot.extend(config.robot.clone());
        dictionary.user.extend(config.user.clone());
        dictionary
    }

    /// Robot prompt for a key, falling back to the general prompt.
    pub fn robot_response(&self, key: &str) -> String {
        self.robot
            .get(key)
            .or_else(|| self.robot.get("general"))
            .cloned()
            .unwrap_or_default()
    }

    /// User-facing string for a key.
    pub fn user_string(&self, key: &str) -> Option<&str> {
        self.user.get(key).map(String::as_str)
    }
}

impl ResponseLookup for Dictionary {
    fn fallback_question(&self, kind: GroupKind) -> String {
        self.robot_response(kind.control_kind().as_str())
    }

    fn input_error(&self) -> String {
        self.user_string(INPUT_ERROR_KEY)
            .unwrap_or_default()
            .to_string()
    }
}
