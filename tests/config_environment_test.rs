// ABOUTME: Unit tests for environment configuration and logging configuration
// ABOUTME: Validates defaults, overrides, and rejection of malformed values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use admin_panel::client::http::HttpTransportConfig;
use admin_panel::config::{Environment, LogLevel, PanelConfig};
use admin_panel::errors::ErrorCode;
use admin_panel::logging::{LogFormat, LoggingConfig};
use serial_test::serial;
use std::env;
use std::time::Duration;

const VARS: [&str; 8] = [
    "ADMIN_API_BASE_URL",
    "ADMIN_TENANT_ID",
    "ADMIN_API_TOKEN",
    "ADMIN_HTTP_TIMEOUT_SECS",
    "ADMIN_SEARCH_DEBOUNCE_MS",
    "ADMIN_DEFAULT_PAGE_SIZE",
    "ADMIN_ENVIRONMENT",
    "ADMIN_LOG_LEVEL",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_log_level_parsing() {
    assert_eq!(LogLevel::from_str_or_default("error"), LogLevel::Error);
    assert_eq!(LogLevel::from_str_or_default("WARN"), LogLevel::Warn);
    assert_eq!(LogLevel::from_str_or_default("Debug"), LogLevel::Debug);
    assert_eq!(LogLevel::from_str_or_default("trace"), LogLevel::Trace);
    assert_eq!(LogLevel::from_str_or_default("invalid"), LogLevel::Info);
}

#[test]
fn test_environment_parsing() {
    assert_eq!(Environment::from_str_or_default("PROD"), Environment::Production);
    assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
    assert_eq!(Environment::from_str_or_default("anything"), Environment::Development);
    assert!(Environment::Production.is_production());
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();
    let config = PanelConfig::from_env().unwrap();

    assert_eq!(config.api_base_url.as_str(), "http://localhost:3000/");
    assert_eq!(config.tenant_id, None);
    assert_eq!(config.http_timeout, Duration::from_secs(30));
    assert_eq!(config.search_debounce, Duration::from_millis(300));
    assert_eq!(config.default_page_size, 10);
    assert_eq!(config.environment, Environment::Development);
}

#[test]
#[serial]
fn test_overrides_from_environment() {
    clear_env();
    env::set_var("ADMIN_API_BASE_URL", "https://admin.example.com/backend/");
    env::set_var("ADMIN_TENANT_ID", "acme");
    env::set_var("ADMIN_API_TOKEN", "secret");
    env::set_var("ADMIN_HTTP_TIMEOUT_SECS", "5");
    env::set_var("ADMIN_SEARCH_DEBOUNCE_MS", "150");
    env::set_var("ADMIN_DEFAULT_PAGE_SIZE", "25");
    env::set_var("ADMIN_ENVIRONMENT", "production");
    env::set_var("ADMIN_LOG_LEVEL", "debug");

    let config = PanelConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.api_base_url.host_str(), Some("admin.example.com"));
    assert_eq!(config.tenant_id.as_deref(), Some("acme"));
    assert_eq!(config.http_timeout, Duration::from_secs(5));
    assert_eq!(config.search_debounce, Duration::from_millis(150));
    assert_eq!(config.default_page_size, 25);
    assert!(config.environment.is_production());
    assert_eq!(config.log_level, LogLevel::Debug);

    let transport = HttpTransportConfig::from(&config);
    assert_eq!(transport.tenant_id.as_deref(), Some("acme"));
    assert_eq!(transport.api_token.as_deref(), Some("secret"));
    assert_eq!(transport.timeout, Duration::from_secs(5));
}

#[test]
#[serial]
fn test_malformed_values_are_rejected() {
    clear_env();
    env::set_var("ADMIN_HTTP_TIMEOUT_SECS", "soon");
    let error = PanelConfig::from_env().unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigInvalid);
    assert!(error.message.contains("ADMIN_HTTP_TIMEOUT_SECS"));

    clear_env();
    env::set_var("ADMIN_API_BASE_URL", "not a url");
    assert_eq!(PanelConfig::from_env().unwrap_err().code, ErrorCode::ConfigInvalid);

    clear_env();
    env::set_var("ADMIN_DEFAULT_PAGE_SIZE", "0");
    assert_eq!(PanelConfig::from_env().unwrap_err().code, ErrorCode::ConfigInvalid);
    clear_env();
}

#[test]
#[serial]
fn test_logging_config_from_environment() {
    env::set_var("LOG_FORMAT", "json");
    env::set_var("RUST_LOG", "warn");
    let config = LoggingConfig::from_env();
    env::remove_var("LOG_FORMAT");
    env::remove_var("RUST_LOG");

    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.level, "warn");
    assert_eq!(config.with_level("debug").level, "debug");
}
