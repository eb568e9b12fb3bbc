// ABOUTME: Parses repeatable key=value command-line arguments
// ABOUTME: Values are kept as raw strings; the engines type them per field or filter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

use admin_panel::errors::{AppError, AppResult};

/// Split every `key=value` argument at its first `=`
pub fn pairs(raw: &[String]) -> AppResult<Vec<(String, String)>> {
    raw.iter()
        .map(|arg| {
            let (key, value) = arg
                .split_once('=')
                .ok_or_else(|| AppError::invalid_input(format!("Expected KEY=VALUE, got `{arg}`")))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(AppError::invalid_input(format!("Missing key in `{arg}`")));
            }
            Ok((key.to_owned(), value.to_owned()))
        })
        .collect()
}
