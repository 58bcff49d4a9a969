// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the campus-sso project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Token exchange and session handling
//!
//! [`AuthService`] is the inbound half of the PKCE flow plus the session
//! primitives the rest of the application consumes. The session moves
//! through three states: unauthenticated, pending callback (a verifier is
//! parked in the store), and authenticated (a token is stored). Logout or a
//! token-decode failure returns it to unauthenticated.
//!
//! The session queries never raise: an undecodable token makes
//! [`AuthService::is_authenticated`] and [`AuthService::has_any_roles`]
//! answer `false` and force a logout as a side effect, ending the session on
//! any malformed or tampered token. Internally the decode stays an explicit
//! `Result` ([`decode_claims`]); the collapse to "unauthenticated plus
//! logout" happens only at this boundary.

use std::sync::Arc;

use log::{debug, error, info, warn};
use serde::Deserialize;

use crate::config::OAuthConfig;

use super::errors::AuthError;
use super::navigator::Navigator;
use super::roles::{route_after_login, Role, Route};
use super::session::{SessionStore, ACCESS_TOKEN_KEY, CODE_VERIFIER_KEY};
use super::token::{decode_claims, TokenClaims};

/// Token endpoint response body
///
/// Only `access_token` is consumed; the remaining OAuth2 token fields are
/// accepted and ignored. There is no refresh-token handling in this client.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Token exchange and session-query primitives
///
/// Cheap to clone and share across the application; the session store and
/// navigator sit behind `Arc`.
#[derive(Clone)]
pub struct AuthService {
    config: OAuthConfig,
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    http: reqwest::Client,
}

impl AuthService {
    pub fn new(
        config: OAuthConfig,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            config,
            store,
            navigator,
            http: reqwest::Client::new(),
        }
    }

    /// Handle the authorization server's redirect back to `/login/callback`
    ///
    /// Preconditions are checked fail-closed before any network call:
    /// a session that already holds a decodable token re-enters at the home
    /// route; a callback without a `code` or without a parked verifier is
    /// treated as forged or expired and sent back to the login screen. Only
    /// then is the code exchanged for a token. On success the token is
    /// stored, the single-use verifier is invalidated and the user lands on
    /// the role-resolved route.
    ///
    /// Exchange failures are not retried; transport errors propagate
    /// unchanged.
    pub async fn handle_callback(&self, code: Option<&str>) -> Result<Route, AuthError> {
        if let Some(token) = self.store.get(ACCESS_TOKEN_KEY) {
            if decode_claims(&token).is_ok() {
                debug!("Callback reached with an existing session, going home");
                self.navigator.navigate(Route::Home.path());
                return Ok(Route::Home);
            }
        }

        let Some(code) = code.filter(|c| !c.is_empty()) else {
            warn!("Login callback reached without an authorization code");
            self.navigator.navigate(Route::Login.path());
            return Err(AuthError::MissingAuthorizationCode);
        };

        let Some(code_verifier) = self.store.get(CODE_VERIFIER_KEY) else {
            warn!("Login callback reached without a stored PKCE verifier");
            self.navigator.navigate(Route::Login.path());
            return Err(AuthError::MissingVerifier);
        };

        let token = self.exchange_code(code, &code_verifier).await?;

        self.store.put(ACCESS_TOKEN_KEY, &token.access_token);
        // The verifier is single use; a replayed callback must not find it.
        self.store.remove(CODE_VERIFIER_KEY);

        let route = self.route_after_login(&token.access_token);
        info!("Login completed, landing on {}", route.path());
        self.navigator.navigate(route.path());
        Ok(route)
    }

    /// Exchange an authorization code for an access token
    ///
    /// Single POST to the token endpoint, form encoded, with HTTP Basic
    /// auth built from `client_id:client_secret`.
    async fn exchange_code(
        &self,
        code: &str,
        code_verifier: &str,
    ) -> Result<TokenResponse, AuthError> {
        let params = [
            ("grant_type", "authorization_code"),
            ("client_id", self.config.client_id.as_str()),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("code_verifier", code_verifier),
            ("scope", self.config.scope.as_str()),
        ];

        debug!("Exchanging authorization code at {}", self.config.token_endpoint());
        let response = self
            .http
            .post(self.config.token_endpoint())
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            error!("Token exchange failed with status {}", status);
            return Err(AuthError::TokenExchangeFailed {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|err| {
            error!("Token endpoint returned a malformed body: {}", err);
            AuthError::TokenExchangeFailed {
                status: status.as_u16(),
                body,
            }
        })
    }

    /// Resolve the landing route for a freshly obtained token
    ///
    /// A token that fails to decode at this point routes home; the next
    /// session query will notice and end the session.
    pub fn route_after_login(&self, access_token: &str) -> Route {
        match decode_claims(access_token) {
            Ok(claims) => route_after_login(&claims),
            Err(_) => Route::Home,
        }
    }

    /// Whether the session currently holds a decodable token
    ///
    /// Never errors. An undecodable token ends the session as a side
    /// effect and answers `false`.
    pub fn is_authenticated(&self) -> bool {
        let Some(token) = self.store.get(ACCESS_TOKEN_KEY) else {
            return false;
        };
        match decode_claims(&token) {
            Ok(_) => true,
            Err(_) => {
                error!("Invalid token format or fake token detected, ending session");
                self.logout();
                false
            }
        }
    }

    /// Whether the session's token grants at least one of the given roles
    ///
    /// Never errors; decode failures end the session and answer `false`.
    /// Consumed by the route guards to gate the admin, lecturer and student
    /// sections.
    pub fn has_any_roles(&self, roles: &[Role]) -> bool {
        let token = self.get_token();
        if token.is_empty() {
            return false;
        }

        match decode_claims(&token) {
            Ok(claims) => Self::roles_intersect(&claims, roles),
            Err(_) => {
                error!("Invalid token format or fake token detected, ending session");
                self.logout();
                false
            }
        }
    }

    fn roles_intersect(claims: &TokenClaims, requested: &[Role]) -> bool {
        claims
            .role_names()
            .iter()
            .filter_map(|name| Role::from_claim(name))
            .any(|role| requested.contains(&role))
    }

    /// The stored token, or an empty string; never errors
    pub fn get_token(&self) -> String {
        self.store.get(ACCESS_TOKEN_KEY).unwrap_or_default()
    }

    /// End the session locally and at the authorization server
    ///
    /// Clears the stored token and requests a full navigation to the
    /// external `/logout` endpoint, terminating the federated session as
    /// well.
    pub fn logout(&self) {
        self.store.remove(ACCESS_TOKEN_KEY);
        info!("Signed out, redirecting to the authorization server logout");
        self.navigator.navigate(&self.config.logout_endpoint());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::navigator::MockNavigator;
    use crate::auth::session::MemorySessionStore;
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::json;

    fn mint(claims: serde_json::Value) -> String {
        jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap()
    }

    fn service_with(store: Arc<MemorySessionStore>, navigator: MockNavigator) -> AuthService {
        AuthService::new(OAuthConfig::default(), store, Arc::new(navigator))
    }

    #[test]
    fn is_authenticated_false_without_token() {
        let mut navigator = MockNavigator::new();
        navigator.expect_navigate().never();
        let service = service_with(Arc::new(MemorySessionStore::new()), navigator);
        assert!(!service.is_authenticated());
    }

    #[test]
    fn undecodable_token_forces_logout() {
        let store = Arc::new(MemorySessionStore::new());
        store.put(ACCESS_TOKEN_KEY, "not-a-jwt");

        let mut navigator = MockNavigator::new();
        navigator
            .expect_navigate()
            .withf(|target| target == "http://localhost:9000/logout")
            .times(1)
            .return_const(());

        let service = service_with(store.clone(), navigator);
        assert!(!service.is_authenticated());
        assert_eq!(service.get_token(), "");
    }

    #[test]
    fn has_any_roles_checks_the_intersection() {
        let store = Arc::new(MemorySessionStore::new());
        store.put(
            ACCESS_TOKEN_KEY,
            &mint(json!({"authorities": ["ADMIN", "LECTURER"]})),
        );
        let mut navigator = MockNavigator::new();
        navigator.expect_navigate().never();

        let service = service_with(store, navigator);
        assert!(service.has_any_roles(&[Role::Admin]));
        assert!(service.has_any_roles(&[Role::Lecturer, Role::Student]));
        assert!(!service.has_any_roles(&[Role::Student]));
    }

    #[test]
    fn has_any_roles_false_for_student_only_token() {
        let store = Arc::new(MemorySessionStore::new());
        store.put(ACCESS_TOKEN_KEY, &mint(json!({"authorities": ["STUDENT"]})));
        let mut navigator = MockNavigator::new();
        navigator.expect_navigate().never();

        let service = service_with(store, navigator);
        assert!(!service.has_any_roles(&[Role::Admin]));
        assert!(service.has_any_roles(&[Role::Student]));
    }

    #[test]
    fn logout_clears_token_and_navigates_to_federated_logout() {
        let store = Arc::new(MemorySessionStore::new());
        store.put(ACCESS_TOKEN_KEY, &mint(json!({"roles": ["STUDENT"]})));

        let mut navigator = MockNavigator::new();
        navigator
            .expect_navigate()
            .withf(|target| target == "http://localhost:9000/logout")
            .times(1)
            .return_const(());

        let service = service_with(store.clone(), navigator);
        service.logout();
        assert_eq!(service.get_token(), "");
        assert!(!service.is_authenticated());
    }

    #[test]
    fn route_after_login_applies_the_priority_order() {
        let mut navigator = MockNavigator::new();
        navigator.expect_navigate().never();
        let service = service_with(Arc::new(MemorySessionStore::new()), navigator);

        assert_eq!(
            service.route_after_login(&mint(json!({"roles": ["LECTURER"]}))),
            Route::LecturerHome
        );
        assert_eq!(
            service.route_after_login(&mint(json!({"roles": ["ADMIN", "LECTURER"]}))),
            Route::AdminDashboard
        );
        assert_eq!(service.route_after_login(&mint(json!({}))), Route::Home);
    }
}
