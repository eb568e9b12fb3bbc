// ABOUTME: Helper modules for admin-cli
// ABOUTME: Argument parsing and terminal prompts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

pub mod parse;
pub mod prompt;
