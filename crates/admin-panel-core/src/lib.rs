// ABOUTME: Core types and constants for the admin panel engine
// ABOUTME: Foundation crate with error handling, schema descriptors, pagination, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

#![deny(unsafe_code)]

//! # Admin Panel Core
//!
//! Foundation crate providing shared types for the admin panel engine. It holds
//! everything the datatable and forms engines agree on without depending on a
//! transport or runtime, so it changes rarely.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Engine-wide defaults (page size, debounce, message lifetimes)
//! - **schema**: Declarative entity descriptors (columns, filters, fields, tabs) and `Row`
//! - **pagination**: Page/offset arithmetic shared by the datatable and the REST query

/// Unified error handling system with standard error codes
pub mod errors;

/// Engine defaults organized by concern
pub mod constants;

/// Declarative entity descriptors consumed by the generic engines
pub mod schema;

/// Page and offset arithmetic
pub mod pagination;
