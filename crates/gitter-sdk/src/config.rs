//! Repository configuration (`.gitter/config.toml`).
//!
//! ```toml
//! [user]
//! name = "alice"
//!
//! [diff]
//! context = 3
//! ```
//!
//! A missing file means all defaults. Unknown keys are rejected.

use std::path::Path;

use gitter_diff::DEFAULT_CONTEXT;
use serde::Deserialize;

use crate::error::{SdkError, SdkResult};

/// File name of the configuration inside the metadata directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Top-level repository configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub user: UserConfig,

    #[serde(default)]
    pub diff: DiffConfig,
}

/// Identity recorded on new commits.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserConfig {
    /// Author name (default: `"user"`).
    #[serde(default = "default_author")]
    pub name: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            name: default_author(),
        }
    }
}

fn default_author() -> String {
    "user".to_owned()
}

/// Diff output settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiffConfig {
    /// Unchanged lines shown around each change (default: 2).
    #[serde(default = "default_context")]
    pub context: usize,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            context: default_context(),
        }
    }
}

const fn default_context() -> usize {
    DEFAULT_CONTEXT
}

impl Config {
    /// Load configuration from `path`, falling back to defaults if the file
    /// does not exist.
    pub fn load(path: &Path) -> SdkResult<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(SdkError::Config(format!(
                    "{}: could not read file: {e}",
                    path.display()
                )));
            }
        };
        Self::parse(&contents)
            .map_err(|e| SdkError::Config(format!("{}: {e}", path.display())))
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}
