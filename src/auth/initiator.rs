// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the campus-sso project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Login initiation: the outbound half of the PKCE flow
//!
//! [`LoginInitiator::initiate`] generates the PKCE material, parks the
//! verifier in the session store for the callback to consume, and asks the
//! navigator for a full-page redirect to the authorization server. The
//! verifier survives the round trip through the external server precisely
//! because it lives in session-scoped storage, not in this object.

use std::sync::Arc;

use log::{debug, info};

use crate::config::OAuthConfig;

use super::navigator::Navigator;
use super::pkce::{generate_code_challenge, generate_code_verifier, generate_nonce};
use super::roles::Route;
use super::session::{SessionStore, ACCESS_TOKEN_KEY, CODE_VERIFIER_KEY};
use super::token::decode_claims;

/// Begins an OAuth2 Authorization Code flow with PKCE (RFC 7636)
pub struct LoginInitiator {
    config: OAuthConfig,
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl LoginInitiator {
    pub fn new(
        config: OAuthConfig,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            config,
            store,
            navigator,
        }
    }

    /// Start a login, or short-circuit when a session already exists
    ///
    /// A stored, decodable token means there is nothing to do: the user is
    /// sent to the home route instead of through the authorization server
    /// again. Otherwise a fresh verifier is generated and persisted under
    /// the `code_verifier` key, and the user agent is sent to the
    /// `/authorize` endpoint with the S256 challenge.
    ///
    /// Returns the navigation target that was requested. The only failure
    /// mode of the generation steps is random-source unavailability, which
    /// aborts the process.
    pub fn initiate(&self) -> String {
        if let Some(token) = self.store.get(ACCESS_TOKEN_KEY) {
            if decode_claims(&token).is_ok() {
                debug!("Session already holds a valid token, skipping authorization redirect");
                let target = Route::Home.path().to_string();
                self.navigator.navigate(&target);
                return target;
            }
        }

        let code_verifier = generate_code_verifier();
        self.store.put(CODE_VERIFIER_KEY, &code_verifier);

        let target = self.authorization_url(&code_verifier);
        info!("Redirecting to authorization server for login");
        self.navigator.navigate(&target);
        target
    }

    /// Build the authorization URL for a given verifier
    fn authorization_url(&self, code_verifier: &str) -> String {
        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("response_type", self.config.response_type.as_str()),
            ("response_mode", self.config.response_mode.as_str()),
            ("scope", self.config.scope.as_str()),
            ("nonce", &generate_nonce()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("code_challenge", &generate_code_challenge(code_verifier)),
            (
                "code_challenge_method",
                self.config.code_challenge_method.as_str(),
            ),
        ];
        let query = serde_urlencoded::to_string(params).unwrap_or_default();
        format!("{}?{}", self.config.authorization_endpoint(), query)
    }
}
