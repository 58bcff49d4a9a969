// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the campus-sso project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration for the OAuth2 authorization server contract
//!
//! Externally supplied constants for the Authorization Code + PKCE flow:
//! server base URL, client credentials, redirect URI and the fixed protocol
//! parameters. None of these are produced by the core logic.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OAuthConfig {
    /// Base URL of the external authorization server
    pub authorization_server: String,
    /// OAuth client identifier
    pub client_id: String,
    /// OAuth client secret, used for HTTP Basic auth at the token endpoint
    pub client_secret: String,
    /// Callback URL registered with the authorization server
    pub redirect_uri: String,
    /// Requested scopes, space separated
    pub scope: String,
    /// OAuth response type, always the authorization code grant
    pub response_type: String,
    /// Response mode requested from the authorization server
    pub response_mode: String,
    /// PKCE challenge method; only S256 is supported
    pub code_challenge_method: String,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            authorization_server: "http://localhost:9000".to_string(),
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            redirect_uri: "http://localhost:5555/login/callback".to_string(),
            scope: "openid profile".to_string(),
            response_type: "code".to_string(),
            response_mode: "form_data".to_string(),
            code_challenge_method: "S256".to_string(),
        }
    }
}

impl OAuthConfig {
    /// URL of the authorization endpoint
    pub fn authorization_endpoint(&self) -> String {
        format!("{}/oauth2/authorize", self.authorization_server)
    }

    /// URL of the token endpoint
    pub fn token_endpoint(&self) -> String {
        format!("{}/oauth2/token", self.authorization_server)
    }

    /// URL of the federated logout endpoint
    pub fn logout_endpoint(&self) -> String {
        format!("{}/logout", self.authorization_server)
    }
}
