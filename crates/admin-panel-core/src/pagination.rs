// ABOUTME: Page and offset arithmetic for offset-based REST pagination
// ABOUTME: Shared by the datatable engine and the list query builder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

use serde::{Deserialize, Serialize};

/// Number of pages needed to show `count` rows at `per_page` rows each.
///
/// A zero page size is treated as one so the result is always defined.
#[must_use]
pub const fn total_pages(count: u64, per_page: u32) -> u64 {
    let per_page = if per_page == 0 { 1 } else { per_page as u64 };
    count.div_ceil(per_page)
}

/// Offset-based page request sent to the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u32,
    /// Maximum rows per page
    pub limit: u32,
}

impl PageRequest {
    /// Create a page request, clamping page to at least 1 and limit to at least 1
    #[must_use]
    pub const fn new(page: u32, limit: u32) -> Self {
        Self {
            page: if page == 0 { 1 } else { page },
            limit: if limit == 0 { 1 } else { limit },
        }
    }

    /// Number of rows preceding this page
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }

    /// Index range of this page within a locally held slice of `len` rows
    #[must_use]
    pub fn window(&self, len: usize) -> std::ops::Range<usize> {
        let start = usize::try_from(self.offset()).unwrap_or(usize::MAX).min(len);
        let end = start.saturating_add(self.limit as usize).min(len);
        start..end
    }
}
