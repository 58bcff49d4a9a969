// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the campus-sso project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Error taxonomy for the login flow
//!
//! Every failure in this crate is fail-closed: any ambiguity about the
//! session's validity resolves to "not authenticated". Decode failures are
//! additionally swallowed at the session-query boundary (see
//! [`crate::auth::service::AuthService`]) and converted into a forced logout
//! instead of being surfaced to UI callers.

use thiserror::Error;

/// Failures of the PKCE login flow and session handling
#[derive(Debug, Error)]
pub enum AuthError {
    /// The callback arrived without a matching PKCE verifier in session storage.
    ///
    /// This happens when the session expired mid-flow, the callback URL was
    /// replayed, or the callback landed in a different tab than the one that
    /// initiated the login. Recovery is a redirect to the login screen; the
    /// token endpoint is never contacted.
    #[error("no PKCE code verifier found in session storage")]
    MissingVerifier,

    /// The callback URL did not carry a `code` query parameter.
    #[error("login callback did not carry an authorization code")]
    MissingAuthorizationCode,

    /// The token endpoint answered with a non-success status.
    ///
    /// Login failures are not transient-retried; the user must re-initiate
    /// the login flow.
    #[error("token endpoint returned status {status}: {body}")]
    TokenExchangeFailed { status: u16, body: String },

    /// The stored access token is not decodable as a signed token payload.
    #[error("stored access token is not a decodable JWT")]
    TokenDecodeFailed,

    /// Transport-level failure while talking to the token endpoint.
    ///
    /// Propagated to the caller unchanged, per the no-retry policy.
    #[error("token exchange transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}
