//! Campus SSO client library
//!
//! This library implements the OAuth2 Authorization Code + PKCE login flow
//! and the session/token lifecycle for the campus management front end.

pub mod auth;
pub mod config;
