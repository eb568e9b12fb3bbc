// ABOUTME: Re-export of the unified error types from the core crate
// ABOUTME: Keeps `crate::errors::AppError` paths stable for engine modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

pub use admin_panel_core::errors::*;
