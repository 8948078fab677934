//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/fslca/fslca.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `FSLCA_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::AliasPolicy;

/// Errors raised while loading settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("environment override: {0}")]
    Env(String),

    #[error("serialize settings: {0}")]
    Serialize(String),
}

/// Unified configuration for fslca.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Layout file used when no `--tree` is given (default: built-in sample tree)
    pub tree_file: Option<PathBuf>,
    /// Treatment of duplicate alias names on one node
    pub alias_policy: AliasPolicy,
}

/// Raw settings for intermediate parsing (None = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub tree_file: Option<PathBuf>,
    pub alias_policy: Option<AliasPolicy>,
}

/// Get the XDG config directory for fslca.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "fslca").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("fslca.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|e| SettingsError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&content).map_err(|e| SettingsError::Parse {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })
}

/// Expand `~`, `$VAR` and `${VAR}`, leaving the input untouched on failure.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Scalar options: overlay wins if Some, otherwise keep base.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            tree_file: overlay.tree_file.clone().or_else(|| self.tree_file.clone()),
            alias_policy: overlay.alias_policy.unwrap_or(self.alias_policy),
        }
    }

    fn expand_paths(&mut self) {
        if let Some(tree_file) = &self.tree_file {
            let expanded = expand_env_vars(tree_file.to_string_lossy().as_ref());
            self.tree_file = Some(PathBuf::from(expanded));
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line; must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(path) = explicit {
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply FSLCA_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, SettingsError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("FSLCA"))
            .build()
            .map_err(|e| SettingsError::Env(e.to_string()))?;

        if let Ok(val) = config.get_string("tree_file") {
            settings.tree_file = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_string("alias_policy") {
            settings.alias_policy = match val.as_str() {
                "last-wins" => AliasPolicy::LastWins,
                "reject" => AliasPolicy::Reject,
                other => {
                    return Err(SettingsError::Env(format!(
                        "FSLCA_ALIAS_POLICY: expected 'last-wins' or 'reject', got '{}'",
                        other
                    )))
                }
            };
        }

        Ok(settings)
    }

    /// Render settings as TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        toml::to_string_pretty(self).map_err(|e| SettingsError::Serialize(e.to_string()))
    }

    /// Commented template for `config init`.
    pub fn template() -> &'static str {
        r#"# fslca configuration

# Layout file loaded when --tree is not given.
# tree_file = "~/layouts/project.toml"

# Duplicate alias names on one node: "last-wins" or "reject".
alias_policy = "last-wins"
"#
    }
}
