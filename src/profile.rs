//! Form profiles.
//!
//! The rich request form and the minimal name/email form share one
//! validation engine. A [`Profile`] selects the schema; [`ValidationRules`]
//! carries the policies the engine applies, starting from the profile's
//! defaults and overridden by configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::validation::{EmailPolicy, NamePolicy, PhonePolicy};

/// Warning shown on every fresh rich form.
pub const RICH_INTRO_NOTICE: &str = "Please enter valid information in all fields.";

/// Which form schema is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Multi-party exception request with remediation plan.
    #[default]
    Rich,
    /// Name and email only.
    Minimal,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Rich => "rich",
            Profile::Minimal => "minimal",
        }
    }

    /// Storage table for this profile.
    pub fn table(&self) -> &'static str {
        match self {
            Profile::Rich => "rich_submissions",
            Profile::Minimal => "minimal_submissions",
        }
    }

    /// Template rendered for this profile.
    pub fn template(&self) -> &'static str {
        match self {
            Profile::Rich => "rich.html",
            Profile::Minimal => "minimal.html",
        }
    }

    pub fn default_title(&self) -> &'static str {
        match self {
            Profile::Rich => "Exception Request",
            Profile::Minimal => "Contact Details",
        }
    }

    pub fn default_intro_notice(&self) -> Option<&'static str> {
        match self {
            Profile::Rich => Some(RICH_INTRO_NOTICE),
            Profile::Minimal => None,
        }
    }

    /// Rules this profile applies when nothing is overridden.
    pub fn default_rules(&self) -> ValidationRules {
        match self {
            Profile::Rich => ValidationRules {
                name: NamePolicy::Permissive,
                email: EmailPolicy::Permissive,
                phone: PhonePolicy::Loose,
                min_reasons: 1,
                max_reasons: 5,
            },
            Profile::Minimal => ValidationRules {
                name: NamePolicy::Strict,
                email: EmailPolicy::Strict,
                phone: PhonePolicy::Digits10,
                min_reasons: 1,
                max_reasons: 5,
            },
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rich" => Ok(Profile::Rich),
            "minimal" => Ok(Profile::Minimal),
            other => anyhow::bail!("Unknown profile '{}'. Use 'rich' or 'minimal'.", other),
        }
    }
}

/// Policies applied by the validation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    pub name: NamePolicy,
    pub email: EmailPolicy,
    pub phone: PhonePolicy,
    /// Fewest RCA categories accepted.
    pub min_reasons: usize,
    /// Most RCA categories accepted.
    pub max_reasons: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Profile::Rich.default_rules()
    }
}
