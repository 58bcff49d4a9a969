// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the campus-sso project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration management for the login client
//!
//! The configuration is backed by a YAML file deserialized with serde.
//! Every section carries defaults so a missing file falls back to the
//! development deployment values instead of failing startup.
//!
//! ## Usage
//!
//! ```no_run
//! use campus_sso::config::Config;
//! use std::path::Path;
//!
//! let config = Config::from_file(Path::new("config.yaml")).unwrap();
//! println!("token endpoint: {}", config.oauth.token_endpoint());
//! ```

pub mod oauth;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

pub use oauth::OAuthConfig;

/// Root configuration structure for the login client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// OAuth2 authorization server contract and client credentials.
    ///
    /// If not specified in the configuration file, the development defaults
    /// are used.
    #[serde(default)]
    pub oauth: OAuthConfig,
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// A missing file is not an error: the defaults are returned and a
    /// warning is logged. A file that exists but does not parse is a startup
    /// failure with context.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            warn!(
                "Configuration file {:?} not found, using default configuration",
                path
            );
            return Ok(Config::default());
        }

        debug!("Loading configuration from {:?}", path);
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {:?}", path))?;
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yml::from_str(&contents)
            .with_context(|| format!("Failed to parse configuration file {:?}", path))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_deployment_constants() {
        let config = Config::default();
        assert_eq!(config.oauth.client_id, "client");
        assert_eq!(
            config.oauth.authorization_endpoint(),
            "http://localhost:9000/oauth2/authorize"
        );
        assert_eq!(
            config.oauth.token_endpoint(),
            "http://localhost:9000/oauth2/token"
        );
        assert_eq!(
            config.oauth.logout_endpoint(),
            "http://localhost:9000/logout"
        );
        assert_eq!(config.oauth.code_challenge_method, "S256");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::from_file("does-not-exist.yaml").unwrap();
        assert_eq!(config.oauth.scope, "openid profile");
    }
}
