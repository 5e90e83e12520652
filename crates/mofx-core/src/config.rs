//! Runtime configuration
//!
//! Settings come from an optional TOML file. Every field has a default,
//! so an empty file (or no file at all) is a valid configuration.
//!
//! ```toml
//! max_line_len = 400
//! log_profile = "development"
//!
//! [filter]
//! different = true
//! missing = true
//! ```

use crate::diff::align::DEFAULT_MAX_LINE_LEN;
use crate::errors::{MofxError, Result};
use crate::logging_facility::Profile;
use crate::present::StatusFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming a config file when none is passed explicitly
pub const CONFIG_ENV_VAR: &str = "MOFX_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MofxConfig {
    /// Raw lines longer than this are truncated in the aligned view
    pub max_line_len: usize,
    pub log_profile: Profile,
    /// Default status toggles for comparison listings
    pub filter: StatusFilter,
}

impl Default for MofxConfig {
    fn default() -> Self {
        Self {
            max_line_len: DEFAULT_MAX_LINE_LEN,
            log_profile: Profile::Development,
            filter: StatusFilter::default(),
        }
    }
}

impl MofxConfig {
    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when the text is not valid TOML for this schema.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| MofxError::InvalidConfig {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load configuration from an explicit file
    ///
    /// # Errors
    ///
    /// `ConfigNotFound` if the file is missing, `Io` if unreadable,
    /// `InvalidConfig` if malformed.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(MofxError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|e| MofxError::io(path, e))?;
        Self::from_toml_str(&text, path)
    }

    /// Resolve configuration: explicit path, then `MOFX_CONFIG`, then defaults
    ///
    /// # Errors
    ///
    /// Propagates [`from_file`](Self::from_file) errors for whichever path
    /// was selected.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }
}
