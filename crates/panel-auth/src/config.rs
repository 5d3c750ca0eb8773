//! Auth configuration.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::PublicRoutes;

/// Settings for session enforcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Where unauthenticated visitors are sent.
    pub login_url: String,

    /// Routes that stay reachable without a session.
    pub public_routes: PublicRoutes,

    /// Seconds between periodic enforcement runs.
    pub enforce_interval_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_url: "/login".to_string(),
            public_routes: PublicRoutes::default(),
            enforce_interval_secs: 60,
        }
    }
}

impl AuthConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML auth config")?;
        config.validate()
    }

    /// Parse a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(content).context("Failed to parse JSON auth config")?;
        config.validate()
    }

    /// Load config from a file, JSON if the name ends in `.json`, TOML otherwise.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read auth config: {}", path))?;

        let parsed = if path.ends_with(".json") {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        };
        parsed.with_context(|| format!("Invalid auth config: {}", path))
    }

    /// Periodic enforcement interval.
    pub fn enforce_interval(&self) -> Duration {
        Duration::from_secs(self.enforce_interval_secs)
    }

    fn validate(self) -> Result<Self> {
        if self.login_url.trim().is_empty() {
            bail!("login_url must not be empty");
        }
        if self.enforce_interval_secs == 0 {
            bail!("enforce_interval_secs must be positive");
        }
        Ok(self)
    }
}
