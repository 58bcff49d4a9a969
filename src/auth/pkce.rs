// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the campus-sso project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! PKCE material generation (RFC 7636)
//!
//! This module produces the code verifier, the S256 code challenge derived
//! from it, and the OpenID Connect `nonce`. The verifier is the locally held
//! secret: only its SHA-256 digest travels with the authorization request,
//! the verifier itself is disclosed at token-exchange time only.
//!
//! All randomness comes from `rand`'s thread RNG, which is a CSPRNG reseeded
//! from the operating system. Entropy exhaustion aborts the process; there is
//! no degraded mode with predictable verifiers.

use base64::Engine;
use sha2::{Digest, Sha256};

/// Alphabet used for the OpenID Connect nonce
const NONCE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Number of characters in a generated nonce
const NONCE_LEN: usize = 16;

/// Generate a PKCE code verifier
///
/// Draws 32 cryptographically random bytes and encodes them as base64url
/// without padding, yielding a 43-character string over the unreserved
/// alphabet `[A-Za-z0-9_-]`, within the 43-128 character range RFC 7636
/// requires.
pub fn generate_code_verifier() -> String {
    let bytes = rand::random::<[u8; 32]>();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Derive the S256 code challenge for a verifier
///
/// Computes SHA-256 over the UTF-8 bytes of the verifier and encodes the
/// digest as base64url without padding. Deterministic for a fixed verifier.
/// The plain challenge method is deliberately not offered.
pub fn generate_code_challenge(code_verifier: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code_verifier.as_bytes());
    let digest = hasher.finalize();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(digest)
}

/// Generate a 16-character alphanumeric nonce for the authorization request
///
/// Each random byte is mapped onto the 62-character alphanumeric alphabet.
/// Used to mitigate replay of the authorization response.
pub fn generate_nonce() -> String {
    rand::random::<[u8; NONCE_LEN]>()
        .iter()
        .map(|b| NONCE_ALPHABET[(*b as usize) % NONCE_ALPHABET.len()] as char)
        .collect()
}
