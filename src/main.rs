// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the campus-sso project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

// Terminal front end for the campus SSO login flow
mod auth;
mod config;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use url::Url;

use auth::{AuthService, LoginInitiator, MemorySessionStore, Navigator, Role};
use config::Config;

/// Walk through an OAuth2 Authorization Code + PKCE login against the
/// campus authorization server
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    /// Only print the authorization URL, do not wait for the callback
    #[arg(long)]
    authorize_only: bool,
}

/// Navigator that prints navigation targets to the terminal
///
/// The library never performs full-page navigations itself; in this front
/// end the "browser" is the user, so navigation requests become prompts.
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, target: &str) {
        println!("-> {}", target);
    }
}

/// Extract the authorization code from a pasted callback URL, or accept a
/// bare code as-is
fn extract_code(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(url) = Url::parse(input) {
        return url
            .query_pairs()
            .find(|(key, _)| key == "code")
            .map(|(_, value)| value.to_string());
    }
    Some(input.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load configuration from {:?}", args.config))?;

    let store = Arc::new(MemorySessionStore::new());
    let navigator = Arc::new(TerminalNavigator);
    let initiator = LoginInitiator::new(config.oauth.clone(), store.clone(), navigator.clone());
    let service = AuthService::new(config.oauth.clone(), store, navigator);

    println!("Campus SSO login");
    println!("----------------");
    println!("Open this URL in your browser and sign in:");
    initiator.initiate();

    if args.authorize_only {
        return Ok(());
    }

    print!("Paste the callback URL (or the authorization code): ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read the callback from stdin")?;

    let code = extract_code(&line);
    let route = service
        .handle_callback(code.as_deref())
        .await
        .context("Login failed")?;

    println!("Signed in.");
    println!("- landing route: {}", route.path());
    println!("- authenticated: {}", service.is_authenticated());
    println!(
        "- roles: admin={} lecturer={} student={}",
        service.has_any_roles(&[Role::Admin]),
        service.has_any_roles(&[Role::Lecturer]),
        service.has_any_roles(&[Role::Student]),
    );

    Ok(())
}
