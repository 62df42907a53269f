//! Configuration management for intake deployments.
//!
//! Configuration lives in a markdown file with YAML frontmatter
//! (`.intake/config.md` by default). Every section has defaults, so an empty
//! frontmatter block is a valid config apart from the secret key. A few
//! settings can be overridden from the environment.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::profile::{Profile, ValidationRules};

pub mod defaults;
pub mod validation;

pub use defaults::*;

#[cfg(test)]
mod tests;

/// Environment variable overriding `server.bind`.
pub const ENV_BIND: &str = "INTAKE_BIND";
/// Environment variable overriding `database.path`.
pub const ENV_DATABASE_PATH: &str = "INTAKE_DATABASE_PATH";
/// Environment variable overriding `session.secret_key`.
pub const ENV_SECRET_KEY: &str = "INTAKE_SECRET_KEY";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

impl Config {
    /// Load `.intake/config.md`, apply environment overrides and validate.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(crate::paths::CONFIG_FILE))
    }

    /// Load from `path`, apply environment overrides and validate.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config = Self::parse(&content)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse config content without touching the environment.
    pub fn parse(content: &str) -> Result<Self> {
        let (frontmatter, _body) = split_frontmatter(content);
        let frontmatter = frontmatter.context("Failed to extract frontmatter from config")?;

        // An empty frontmatter block deserializes as YAML null.
        if frontmatter.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config =
            serde_yaml::from_str(&frontmatter).context("Failed to parse config frontmatter")?;

        config.validation.validate()?;

        Ok(config)
    }

    /// Apply `INTAKE_*` environment variables over file values.
    pub fn apply_env_overrides(&mut self) {
        if let Some(bind) = non_empty_env(ENV_BIND) {
            self.server.bind = bind;
        }
        if let Some(path) = non_empty_env(ENV_DATABASE_PATH) {
            self.database.path = path.into();
        }
        if let Some(secret) = non_empty_env(ENV_SECRET_KEY) {
            self.session.secret_key = secret;
        }
    }

    /// Validation rules: the profile's defaults with configured overrides.
    pub fn rules(&self) -> ValidationRules {
        let defaults = self.form.profile.default_rules();
        ValidationRules {
            name: self.validation.name_policy.unwrap_or(defaults.name),
            email: self.validation.email_policy.unwrap_or(defaults.email),
            phone: self.validation.phone_policy.unwrap_or(defaults.phone),
            min_reasons: self.validation.min_reasons,
            max_reasons: self.validation.max_reasons,
        }
    }

    pub fn profile(&self) -> Profile {
        self.form.profile
    }

    pub fn title(&self) -> String {
        self.form
            .title
            .clone()
            .unwrap_or_else(|| self.form.profile.default_title().to_string())
    }

    /// Notice shown on every fresh form, if any.
    pub fn intro_notice(&self) -> Option<String> {
        match &self.form.intro_notice {
            Some(notice) if notice.trim().is_empty() => None,
            Some(notice) => Some(notice.clone()),
            None => self.form.profile.default_intro_notice().map(str::to_string),
        }
    }

    /// Render a config file for `intake init`.
    pub fn render_initial(profile: Profile, secret_key: &str) -> String {
        format!(
            "---\n\
             server:\n  bind: {}\n\
             database:\n  path: {}\n\
             session:\n  secret_key: {}\n\
             form:\n  profile: {}\n\
             validation:\n  min_reasons: {}\n  max_reasons: {}\n\
             ---\n\n\
             # Intake Config\n\n\
             Edit the frontmatter above. `INTAKE_BIND`, `INTAKE_DATABASE_PATH` and\n\
             `INTAKE_SECRET_KEY` override the matching settings.\n",
            default_bind(),
            default_database_path().display(),
            secret_key,
            profile,
            default_min_reasons(),
            default_max_reasons(),
        )
    }
}

/// Split `---` delimited YAML frontmatter from the markdown body.
pub fn split_frontmatter(content: &str) -> (Option<String>, &str) {
    let content = content.trim();

    if !content.starts_with("---") {
        return (None, content);
    }

    let rest = &content[3..];
    if let Some(end) = rest.find("\n---") {
        let frontmatter = rest[..end].to_string();
        let body = rest[end + 4..].trim_start();
        (Some(frontmatter), body)
    } else {
        (None, content)
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
