// ABOUTME: Re-exports command modules for admin-cli
// ABOUTME: Read-only table/form commands and mutating create/update/delete commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

pub mod mutate;
pub mod records;
