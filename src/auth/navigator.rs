// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the campus-sso project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Full-page navigation seam
//!
//! Three steps of the login flow are full browser navigations rather than
//! HTTP requests issued by this crate: the redirect to the authorization
//! server's `/authorize`, the post-login landing redirect, and the federated
//! `/logout`. The [`Navigator`] trait is the seam where the hosting
//! application performs them; tests substitute a recording double.

use log::debug;

/// Performs full-page navigations on behalf of the login flow
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Navigate the user agent to `target`, a route path or absolute URL
    fn navigate(&self, target: &str);
}

/// Navigator that only logs where the user agent would go
///
/// Useful as a default collaborator in hosts that drive navigation
/// themselves and only want the decision.
#[derive(Debug, Default)]
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn navigate(&self, target: &str) {
        debug!("navigation requested: {}", target);
    }
}
