// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the campus-sso project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Route guards built on the session primitives
//!
//! Guards answer the routing layer's question "may this navigation proceed"
//! as a plain value, so the decision is testable without a UI framework.
//! The lecturer and student guards gate their sections on
//! [`AuthService::has_any_roles`]; the login guard makes `/login` a
//! clean-slate entry point by forcing a logout before allowing the
//! navigation.

use log::warn;

use super::roles::{Role, Route};
use super::service::AuthService;

/// Outcome of a guard check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// The navigation may proceed
    Allow,
    /// The navigation is denied; send the user to this route instead
    Redirect(Route),
}

/// Gate the lecturer section; denied users are sent home
pub fn lecturer_guard(service: &AuthService) -> GuardDecision {
    if service.has_any_roles(&[Role::Lecturer]) {
        GuardDecision::Allow
    } else {
        warn!("Navigation to the lecturer section denied, missing LECTURER role");
        GuardDecision::Redirect(Route::Home)
    }
}

/// Gate the student-facing web section; denied users are sent to login
pub fn student_guard(service: &AuthService) -> GuardDecision {
    if service.has_any_roles(&[Role::Student]) {
        GuardDecision::Allow
    } else {
        warn!("Navigation to the student section denied, missing STUDENT role");
        GuardDecision::Redirect(Route::Login)
    }
}

/// Entry guard for the login route
///
/// Always allows, but ends any existing session first so a visit to
/// `/login` starts from a clean slate.
pub fn login_guard(service: &AuthService) -> GuardDecision {
    service.logout();
    GuardDecision::Allow
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::navigator::MockNavigator;
    use crate::auth::session::{MemorySessionStore, ACCESS_TOKEN_KEY, SessionStore};
    use crate::config::OAuthConfig;
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::json;
    use std::sync::Arc;

    fn mint(claims: serde_json::Value) -> String {
        jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap()
    }

    fn service(token: Option<String>, navigator: MockNavigator) -> AuthService {
        let store = Arc::new(MemorySessionStore::new());
        if let Some(token) = token {
            store.put(ACCESS_TOKEN_KEY, &token);
        }
        AuthService::new(OAuthConfig::default(), store, Arc::new(navigator))
    }

    #[test]
    fn lecturer_guard_allows_lecturers() {
        let mut navigator = MockNavigator::new();
        navigator.expect_navigate().never();
        let service = service(Some(mint(json!({"roles": ["LECTURER"]}))), navigator);
        assert_eq!(lecturer_guard(&service), GuardDecision::Allow);
    }

    #[test]
    fn lecturer_guard_redirects_students_home() {
        let mut navigator = MockNavigator::new();
        navigator.expect_navigate().never();
        let service = service(Some(mint(json!({"roles": ["STUDENT"]}))), navigator);
        assert_eq!(
            lecturer_guard(&service),
            GuardDecision::Redirect(Route::Home)
        );
    }

    #[test]
    fn student_guard_redirects_anonymous_users_to_login() {
        let mut navigator = MockNavigator::new();
        navigator.expect_navigate().never();
        let service = service(None, navigator);
        assert_eq!(
            student_guard(&service),
            GuardDecision::Redirect(Route::Login)
        );
    }

    #[test]
    fn login_guard_ends_the_session_and_allows() {
        let mut navigator = MockNavigator::new();
        navigator
            .expect_navigate()
            .withf(|target| target.ends_with("/logout"))
            .times(1)
            .return_const(());
        let service = service(Some(mint(json!({"roles": ["ADMIN"]}))), navigator);

        assert_eq!(login_guard(&service), GuardDecision::Allow);
        assert_eq!(service.get_token(), "");
    }
}
