//! Validation logic for configuration.

use anyhow::Result;

use super::defaults::ValidationConfig;
use super::Config;

impl ValidationConfig {
    /// Validate RCA category bounds
    pub fn validate(&self) -> Result<()> {
        if self.min_reasons == 0 {
            anyhow::bail!("validation.min_reasons must be greater than 0");
        }

        if self.min_reasons > self.max_reasons {
            anyhow::bail!(
                "validation.min_reasons ({}) must not exceed validation.max_reasons ({})",
                self.min_reasons,
                self.max_reasons
            );
        }

        Ok(())
    }
}

impl Config {
    /// Validate the whole configuration after environment overrides are applied
    pub fn validate(&self) -> Result<()> {
        if self.session.secret_key.trim().is_empty() {
            anyhow::bail!(
                "session.secret_key is empty. Run `intake init` or set INTAKE_SECRET_KEY."
            );
        }

        if self.server.bind.parse::<std::net::SocketAddr>().is_err() {
            anyhow::bail!(
                "server.bind must be a socket address like 127.0.0.1:5000, got '{}'",
                self.server.bind
            );
        }

        self.validation.validate()
    }
}
