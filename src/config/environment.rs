// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses backend URL, tenant, credentials, timeouts, and debounce from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

//! Environment-based configuration management

use crate::errors::{AppError, AppResult};
use admin_panel_core::constants::table::{DEFAULT_ITEMS_PER_PAGE, SEARCH_DEBOUNCE_MS};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::info;
use url::Url;

/// Backend origin used when `ADMIN_API_BASE_URL` is unset
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

/// Request timeout used when `ADMIN_HTTP_TIMEOUT_SECS` is unset
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Normal operation
    #[default]
    Info,
    /// Verbose
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Deployment environment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Runtime configuration for the engine and CLI
#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// Backend origin
    pub api_base_url: Url,
    /// Tenant sent with every request
    pub tenant_id: Option<String>,
    /// Bearer token sent with every request
    pub api_token: Option<String>,
    /// Per-request timeout
    pub http_timeout: Duration,
    /// Search input quiet period
    pub search_debounce: Duration,
    /// Page size for tables whose descriptor does not override it
    pub default_page_size: u32,
    /// Deployment environment
    pub environment: Environment,
    /// Log level
    pub log_level: LogLevel,
}

impl PanelConfig {
    /// Configuration for `api_base_url` with every other setting at its default
    #[must_use]
    pub const fn new(api_base_url: Url) -> Self {
        Self {
            api_base_url,
            tenant_id: None,
            api_token: None,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            search_debounce: Duration::from_millis(SEARCH_DEBOUNCE_MS),
            default_page_size: DEFAULT_ITEMS_PER_PAGE,
            environment: Environment::Development,
            log_level: LogLevel::Info,
        }
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed
    pub fn from_env() -> AppResult<Self> {
        let raw_url =
            non_empty_var("ADMIN_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());
        let api_base_url = Url::parse(&raw_url).map_err(|e| {
            AppError::config_invalid(format!("ADMIN_API_BASE_URL is not a valid URL: {e}"))
        })?;
        let defaults = Self::new(api_base_url);

        let http_timeout = parse_var::<u64>("ADMIN_HTTP_TIMEOUT_SECS")?
            .map_or(defaults.http_timeout, Duration::from_secs);
        let search_debounce = parse_var::<u64>("ADMIN_SEARCH_DEBOUNCE_MS")?
            .map_or(defaults.search_debounce, Duration::from_millis);
        let default_page_size = match parse_var::<u32>("ADMIN_DEFAULT_PAGE_SIZE")? {
            Some(0) => {
                return Err(AppError::config_invalid(
                    "ADMIN_DEFAULT_PAGE_SIZE must be greater than zero",
                ))
            }
            Some(size) => size,
            None => defaults.default_page_size,
        };

        let config = Self {
            api_base_url: defaults.api_base_url,
            tenant_id: non_empty_var("ADMIN_TENANT_ID"),
            api_token: non_empty_var("ADMIN_API_TOKEN"),
            http_timeout,
            search_debounce,
            default_page_size,
            environment: non_empty_var("ADMIN_ENVIRONMENT")
                .map_or(defaults.environment, |s| Environment::from_str_or_default(&s)),
            log_level: non_empty_var("ADMIN_LOG_LEVEL")
                .map_or(defaults.log_level, |s| LogLevel::from_str_or_default(&s)),
        };

        info!(
            api.base_url = %config.api_base_url,
            tenant = config.tenant_id.as_deref().unwrap_or("none"),
            environment = %config.environment,
            "Admin panel configuration loaded"
        );

        Ok(config)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &str) -> AppResult<Option<T>>
where
    T::Err: std::fmt::Display,
{
    non_empty_var(name)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| AppError::config_invalid(format!("{name}={raw} is invalid: {e}")))
        })
        .transpose()
}
