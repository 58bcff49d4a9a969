// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the campus-sso project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! OAuth2 Authorization Code + PKCE login flow and session handling
//!
//! This module is the authentication core of the campus management front
//! end. It consists of two collaborating halves:
//!
//! - [`initiator::LoginInitiator`]: builds the PKCE material, parks the
//!   code verifier in session storage and redirects the user agent to the
//!   external authorization server.
//! - [`service::AuthService`]: receives the authorization code on callback,
//!   exchanges it for an access token, routes the user by role, and exposes
//!   the session-query primitives (`is_authenticated`, `has_any_roles`,
//!   `get_token`, `logout`) consumed by the route guards and the HTTP
//!   layer.
//!
//! Control flow: initiator → (full-page redirect through the authorization
//! server) → service callback handling → session primitives consumed ever
//! after.
//!
//! ## Security model
//!
//! Client-side token validity is advisory: a session is "valid" iff a token
//! is present and its payload decodes. Signature, expiry and issuer are
//! enforced server-side on every API call via the `Authorization: Bearer`
//! header. Everything here fails closed, and a malformed token ends the
//! session immediately.

pub mod errors;
pub mod guard;
pub mod initiator;
pub mod navigator;
pub mod pkce;
pub mod roles;
pub mod service;
pub mod session;
pub mod token;

pub use errors::AuthError;
pub use guard::{lecturer_guard, login_guard, student_guard, GuardDecision};
pub use initiator::LoginInitiator;
pub use navigator::{LoggingNavigator, Navigator};
pub use roles::{route_after_login, Role, Route};
pub use service::{AuthService, TokenResponse};
pub use session::{MemorySessionStore, SessionStore, ACCESS_TOKEN_KEY, CODE_VERIFIER_KEY};
pub use token::{decode_claims, TokenClaims};
