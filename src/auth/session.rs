// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the campus-sso project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Session-scoped storage for the access token and PKCE verifier
//!
//! The access token is held in a session-scoped store only, never in
//! persistent storage: the bearer token has no refresh rotation, so it must
//! not outlive the session that obtained it.
//!
//! All reads and writes go through the [`SessionStore`] trait instead of ad
//! hoc storage access scattered across components. The store is created at
//! application start and cleared on logout.

use std::collections::HashMap;
use std::sync::Mutex;

/// Storage key for the persisted access token
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Storage key for the in-flight PKCE code verifier
pub const CODE_VERIFIER_KEY: &str = "code_verifier";

/// Injectable key/value store scoped to one user session
///
/// The browser analog is `sessionStorage`: it survives the full-page
/// redirect to the authorization server and back, but does not leak across
/// sessions. Access is synchronous; implementations handle their own
/// locking.
pub trait SessionStore: Send + Sync {
    /// Read a value, `None` if the key was never set or was removed
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one
    fn put(&self, key: &str, value: &str);

    /// Remove a value if present
    fn remove(&self, key: &str);
}

/// In-memory session store
///
/// One instance per user session. The mutex only guards map access; no lock
/// is held across any I/O.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}
