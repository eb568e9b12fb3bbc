// ABOUTME: Configuration module for the admin panel engine
// ABOUTME: Environment-only configuration: backend location, tenant, timeouts, and log settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

/// Environment-based configuration management
pub mod environment;

pub use environment::{Environment, LogLevel, PanelConfig};
