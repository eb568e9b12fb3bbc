// ABOUTME: Engine-wide default values for paging, debouncing, and transient messages
// ABOUTME: Centralizes timing and size constants shared by the datatable and forms engines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

/// Datatable defaults
pub mod table {
    /// Rows per page when a table config does not specify one
    pub const DEFAULT_ITEMS_PER_PAGE: u32 = 10;

    /// Quiet period before a search keystroke triggers a fetch
    pub const SEARCH_DEBOUNCE_MS: u64 = 300;

    /// Message shown instead of an empty table
    pub const EMPTY_STATE_MESSAGE: &str = "No records found";
}

/// Forms defaults
pub mod form {
    /// How long a success message stays visible
    pub const SUCCESS_MESSAGE_MS: u64 = 3_000;

    /// How long an error message stays visible
    pub const ERROR_MESSAGE_MS: u64 = 5_000;

    /// Error shown for empty required fields
    pub const REQUIRED_MESSAGE: &str = "This field is required";

    /// Error shown for malformed email addresses
    pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
}

/// REST contract query parameter names
pub mod query {
    /// Current page (1-based)
    pub const PAGE: &str = "page";
    /// Page size
    pub const LIMIT: &str = "limit";
    /// Row offset derived from page and limit
    pub const OFFSET: &str = "offset";
    /// Free-text search term
    pub const SEARCH: &str = "search";
}

/// HTTP header names sent by the transport
pub mod headers {
    /// Request correlation header
    pub const REQUEST_ID: &str = "x-request-id";
    /// Tenant selector for the multi-tenant backend
    pub const TENANT_ID: &str = "x-tenant-id";
}
