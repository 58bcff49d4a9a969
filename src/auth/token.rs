// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the campus-sso project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Access-token payload decoding
//!
//! A session is considered valid iff a token string is present and its
//! payload is syntactically decodable: three dot-separated parts whose middle
//! part base64url-decodes to a JSON object. No signature, expiry or issuer
//! check happens client-side; the token is opaque proof carried on every API
//! call in the `Authorization` header, and the real enforcement is
//! server-side. Client-side validity is advisory only.
//!
//! Decoding returns an explicit `Result` so the fail-and-logout policy stays
//! a visible decision at the [`crate::auth::service`] boundary instead of a
//! buried catch-all.

use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::errors::AuthError;

/// Claims this client reads out of an access token payload
///
/// The authorization server emits either `authorities` or `roles` for the
/// granted roles; every other claim is carried but unused here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Granted roles under the `authorities` claim, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorities: Option<Vec<String>>,

    /// Granted roles under the `roles` claim, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,

    /// Remaining claims (sub, iss, exp, ...), kept as-is
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl TokenClaims {
    /// The token's role names: `authorities` first, `roles` as fallback,
    /// empty when neither claim is present
    pub fn role_names(&self) -> Vec<String> {
        self.authorities
            .clone()
            .or_else(|| self.roles.clone())
            .unwrap_or_default()
    }
}

/// Decode the payload of a signed token without verifying the signature
///
/// Fails with [`AuthError::TokenDecodeFailed`] on anything that is not a
/// three-part JWT with a well-formed header and a base64url JSON payload.
pub fn decode_claims(token: &str) -> Result<TokenClaims, AuthError> {
    let mut parts = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(AuthError::TokenDecodeFailed);
    };

    // Syntactic header check only; the signature is never verified here.
    jsonwebtoken::decode_header(token).map_err(|_| AuthError::TokenDecodeFailed)?;

    let payload_bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| AuthError::TokenDecodeFailed)?;

    serde_json::from_slice(&payload_bytes).map_err(|_| AuthError::TokenDecodeFailed)
}
