//! Default values and configuration structs with default implementations.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::profile::Profile;
use crate::validation::{EmailPolicy, NamePolicy, PhonePolicy};

/// Macro to generate default functions for serde attributes
macro_rules! default_fn {
    ($name:ident, $type:ty, $value:expr) => {
        pub(crate) fn $name() -> $type {
            $value
        }
    };
}

// =========================================================================
// DEFAULT VALUE FUNCTIONS
// =========================================================================

default_fn!(default_bind, String, "127.0.0.1:5000".to_string());
default_fn!(default_database_path, PathBuf, PathBuf::from(".intake/intake.db"));
default_fn!(default_min_reasons, usize, 1);
default_fn!(default_max_reasons, usize, 5);

// =========================================================================
// CONFIG STRUCTS WITH DEFAULTS
// =========================================================================

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Socket address to listen on (default: 127.0.0.1:5000)
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// SQLite storage settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database file, relative to the working directory (default: .intake/intake.db)
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

/// Flash cookie signing
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SessionConfig {
    /// Hex or plain-text key used to sign flash cookies
    #[serde(default)]
    pub secret_key: String,
}

/// Which form is served and how it looks
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct FormConfig {
    #[serde(default)]
    pub profile: Profile,
    /// Page title; the profile's title when unset
    #[serde(default)]
    pub title: Option<String>,
    /// Directory of `.html` templates overriding the embedded ones
    #[serde(default)]
    pub theme_dir: Option<PathBuf>,
    /// Warning shown on every fresh form; the profile's notice when unset,
    /// disabled when empty
    #[serde(default)]
    pub intro_notice: Option<String>,
}

/// Per-deployment overrides of the profile's validation policies
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ValidationConfig {
    #[serde(default)]
    pub name_policy: Option<NamePolicy>,
    #[serde(default)]
    pub email_policy: Option<EmailPolicy>,
    #[serde(default)]
    pub phone_policy: Option<PhonePolicy>,
    /// Fewest RCA categories accepted (default: 1)
    #[serde(default = "default_min_reasons")]
    pub min_reasons: usize,
    /// Most RCA categories accepted (default: 5)
    #[serde(default = "default_max_reasons")]
    pub max_reasons: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            name_policy: None,
            email_policy: None,
            phone_policy: None,
            min_reasons: default_min_reasons(),
            max_reasons: default_max_reasons(),
        }
    }
}
