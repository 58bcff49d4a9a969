// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the campus-sso project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Roles and post-login routing
//!
//! Roles are never stored on their own; they are derived from the decoded
//! access token on every query. The role-to-route priority after login is an
//! explicit ordered list: a token carrying several roles lands on the
//! highest-priority route, ADMIN before LECTURER before the generic home.

use serde::{Deserialize, Serialize};

use super::token::TokenClaims;

/// Role granted by the authorization server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Lecturer,
    Student,
}

impl Role {
    /// Wire spelling of the role as it appears in token claims
    pub fn as_claim(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Lecturer => "LECTURER",
            Role::Student => "STUDENT",
        }
    }

    /// Parse a claim string, `None` for unknown role names
    ///
    /// Unknown roles in a token are ignored rather than treated as errors;
    /// the server may grant roles this client has no routes for.
    pub fn from_claim(value: &str) -> Option<Role> {
        match value {
            "ADMIN" => Some(Role::Admin),
            "LECTURER" => Some(Role::Lecturer),
            "STUDENT" => Some(Role::Student),
            _ => None,
        }
    }
}

/// Client-side landing routes the login flow can resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    AdminDashboard,
    LecturerHome,
    Home,
    Login,
}

impl Route {
    /// Path of the route in the front end's router
    pub fn path(&self) -> &'static str {
        match self {
            Route::AdminDashboard => "/admin/dashboard",
            Route::LecturerHome => "/lecturer/home",
            Route::Home => "/home",
            Route::Login => "/login",
        }
    }
}

/// Ordered role-to-route priority applied after login
///
/// The order is load-bearing: reordering it changes where multi-role users
/// land.
const POST_LOGIN_PRIORITY: &[(Role, Route)] = &[
    (Role::Admin, Route::AdminDashboard),
    (Role::Lecturer, Route::LecturerHome),
];

/// Resolve the landing route for a freshly decoded token
///
/// First match in the fixed priority order wins; a token with no recognized
/// role lands on the generic home route.
pub fn route_after_login(claims: &TokenClaims) -> Route {
    let roles: Vec<Role> = claims
        .role_names()
        .iter()
        .filter_map(|name| Role::from_claim(name))
        .collect();

    for (role, route) in POST_LOGIN_PRIORITY {
        if roles.contains(role) {
            return *route;
        }
    }
    Route::Home
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn claims(roles: &[&str]) -> TokenClaims {
        TokenClaims {
            authorities: None,
            roles: Some(roles.iter().map(|r| r.to_string()).collect()),
            extra: HashMap::new(),
        }
    }

    #[test]
    fn lecturer_lands_on_lecturer_home() {
        assert_eq!(route_after_login(&claims(&["LECTURER"])), Route::LecturerHome);
    }

    #[test]
    fn admin_wins_the_tie_break() {
        assert_eq!(
            route_after_login(&claims(&["LECTURER", "ADMIN"])),
            Route::AdminDashboard
        );
    }

    #[test]
    fn no_roles_lands_on_home() {
        assert_eq!(route_after_login(&claims(&[])), Route::Home);
        assert_eq!(route_after_login(&claims(&["STUDENT"])), Route::Home);
    }

    #[test]
    fn unknown_roles_are_ignored() {
        assert_eq!(route_after_login(&claims(&["SUPERUSER"])), Route::Home);
    }
}
