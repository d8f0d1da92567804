//! Configuration loading for form groups.
//!
//! Configuration follows a precedence chain:
//! 1. Environment variables (highest priority)
//! 2. Project config (`.formgroup/config.toml`)
//! 3. User config (`~/.formgroup/config.toml`)
//! 4. Defaults (lowest priority)
//!
//! All configuration is optional. The process-wide copy is installed once
//! with [`init`] and read with [`global`]; groups snapshot it at
//! construction.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::error::{GroupError, Result};
use crate::group::policy::{ErrorMessagePolicy, TieBreak, VALID_ERROR_POLICIES, VALID_TIE_BREAKS};

static GLOBAL: OnceLock<Config> = OnceLock::new();

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Diagnostic flow configuration.
    pub flow: FlowConfig,
    /// Group aggregation configuration.
    pub group: GroupConfig,
    /// Dictionary overrides.
    pub dictionary: DictionaryConfig,
}

/// Diagnostic flow configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlowConfig {
    /// Log every group as it is registered.
    pub illustrate: bool,
}

/// Group aggregation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GroupConfig {
    /// Tie-break for exclusive groups answered with several checked controls.
    pub exclusive_tie_break: TieBreak,
    /// How member error messages are combined.
    pub error_message: ErrorMessagePolicy,
}

/// Dictionary overrides, merged over the built-in entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Robot prompts keyed by control kind (`radio`, `checkbox`, ...).
    pub robot: HashMap<String, String>,
    /// User-facing strings keyed by id (`input-placeholder-error`, ...).
    pub user: HashMap<String, String>,
}

impl Config {
    /// Load configuration with full precedence chain.
    pub fn load() -> Self {
        match env::current_dir() {
            Ok(cwd) => Self::load_from_cwd(&cwd),
            Err(_) => {
                let mut config = Config::default();
                if let Some(user_config) = Self::load_user_config() {
                    config = config.merge(user_config);
                }
                config.apply_env_overrides();
                config
            }
        }
    }

    /// Load configuration with a specific working directory.
    pub fn load_from_cwd(cwd: &Path) -> Self {
        let mut config = Config::default();

        if let Some(user_config) = Self::load_user_config() {
            config = config.merge(user_config);
        }

        if let Some(project_config) = Self::load_project_config(cwd) {
            config = config.merge(project_config);
        }

        config.apply_env_overrides();

        config
    }

    /// Load user config from `~/.formgroup/config.toml`.
    fn load_user_config() -> Option<Config> {
        let home = formgroup_home()?;
        Self::load_from_file(&home.join("config.toml")).ok()
    }

    /// Load project config from `.formgroup/config.toml` in the given directory.
    fn load_project_config(cwd: &Path) -> Option<Config> {
        let config_path = cwd.join(".formgroup").join("config.toml");
        Self::load_from_file(&config_path).ok()
    }

    /// Load config from a specific file path.
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| GroupError::storage(path, e))?;
        toml::from_str(&content).map_err(|e| GroupError::config(e.to_string()))
    }

    /// Merge another config on top of this one.
    ///
    /// Scalar fields are taken from `other` when they differ from the
    /// default; dictionary entries are merged additively.
    fn merge(mut self, other: Config) -> Self {
        if other.flow.illustrate {
            self.flow.illustrate = true;
        }

        let default_group = GroupConfig::default();
        if other.group.exclusive_tie_break != default_group.exclusive_tie_break {
            self.group.exclusive_tie_break = other.group.exclusive_tie_break;
        }
        if other.group.error_message != default_group.error_message {
            self.group.error_message = other.group.error_message;
        }

        self.dictionary.robot.extend(other.dictionary.robot);
        self.dictionary.user.extend(other.dictionary.user);

        self
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        // FORMGROUP_ILLUSTRATE_FLOW
        if let Ok(val) = env::var("FORMGROUP_ILLUSTRATE_FLOW") {
            self.flow.illustrate = val == "true" || val == "1";
        }

        // FORMGROUP_TIE_BREAK
        if let Ok(val) = env::var("FORMGROUP_TIE_BREAK") {
            match val.parse::<TieBreak>() {
                Ok(tie_break) => self.group.exclusive_tie_break = tie_break,
                Err(_) => tracing::warn!(
                    "Invalid FORMGROUP_TIE_BREAK value '{}'. Valid values: {:?}. Using '{}'.",
                    val,
                    VALID_TIE_BREAKS,
                    self.group.exclusive_tie_break
                ),
            }
        }

        // FORMGROUP_ERROR_MESSAGE
        if let Ok(val) = env::var("FORMGROUP_ERROR_MESSAGE") {
            match val.parse::<ErrorMessagePolicy>() {
                Ok(policy) => self.group.error_message = policy,
                Err(_) => tracing::warn!(
                    "Invalid FORMGROUP_ERROR_MESSAGE value '{}'. Valid values: {:?}. Using '{}'.",
                    val,
                    VALID_ERROR_POLICIES,
                    self.group.error_message
                ),
            }
        }
    }
}

/// Install the process-wide configuration.
///
/// Must run before the first call to [`global`]; a second call, or a call
/// after defaults were already materialised, fails.
pub fn init(config: Config) -> Result<()> {
    GLOBAL
        .set(config)
        .map_err(|_| GroupError::config("global configuration already initialised"))
}

/// Get the process-wide configuration, falling back to defaults.
pub fn global() -> &'static Config {
    GLOBAL.get_or_init(Config::default)
}

/// Get the formgroup home directory.
///
/// `FORMGROUP_HOME` wins when set and non-empty, otherwise `~/.formgroup`.
pub fn formgroup_home() -> Option<PathBuf> {
    if let Ok(home) = env::var("FORMGROUP_HOME") {
        if home.is_empty() {
            tracing::warn!("FORMGROUP_HOME is empty, using default");
        } else {
            return Some(PathBuf::from(home));
        }
    }

    dirs::home_dir().map(|home| home.join(".formgroup"))
}
