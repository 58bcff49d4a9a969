// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the campus-sso project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Tests for YAML configuration loading

use std::io::Write;

use campus_sso::config::Config;
use tempfile::NamedTempFile;

#[test]
fn load_config_from_yaml_file() {
    let mut file = NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        r#"oauth:
  authorization_server: "https://sso.campus.example"
  client_id: "campus-web"
  client_secret: "s3cr3t"
  redirect_uri: "https://campus.example/login/callback"
  scope: "openid profile"
  response_type: "code"
  response_mode: "form_data"
  code_challenge_method: "S256"
"#
    )
    .expect("write config");

    let config = Config::from_file(file.path()).expect("config should load");
    assert_eq!(config.oauth.client_id, "campus-web");
    assert_eq!(
        config.oauth.token_endpoint(),
        "https://sso.campus.example/oauth2/token"
    );
    assert_eq!(
        config.oauth.logout_endpoint(),
        "https://sso.campus.example/logout"
    );
}

#[test]
fn partial_config_is_a_startup_error() {
    let mut file = NamedTempFile::new().expect("temp file");
    writeln!(file, "oauth:\n  client_id: \"other-client\"").expect("write config");

    // Fields are not defaulted one by one; an incomplete oauth section is a
    // configuration error the operator should see at startup.
    let result = Config::from_file(file.path());
    assert!(result.is_err());
}

#[test]
fn empty_file_uses_defaults() {
    let file = NamedTempFile::new().expect("temp file");
    let config = Config::from_file(file.path()).expect("empty file should load");
    assert_eq!(config.oauth.client_id, "client");
}
