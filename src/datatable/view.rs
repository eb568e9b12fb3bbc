// ABOUTME: Immutable view model derived from datatable state on every change
// ABOUTME: Plain-text Display rendering used by the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

use super::sort::SortDirection;
use std::fmt;

/// One column header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    /// Column key
    pub key: String,
    /// Header text
    pub label: String,
    /// Whether clicking sorts
    pub sortable: bool,
    /// Direction indicator when this column is the active sort
    pub sort: Option<SortDirection>,
}

/// One rendered row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    /// Row identity, carried for row events
    pub id: i64,
    /// Cell texts in column order
    pub cells: Vec<String>,
}

/// Pagination footer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationView {
    /// 1-based current page
    pub current_page: u32,
    /// Page count
    pub total_pages: u64,
    /// Rows remaining after client-side filtering
    pub total_items: u64,
    /// Page size
    pub items_per_page: u32,
}

/// Populated table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableGrid {
    /// Heading
    pub title: Option<String>,
    /// Headers in column order
    pub headers: Vec<HeaderCell>,
    /// Visible rows, at most one page
    pub rows: Vec<RenderedRow>,
    /// Footer
    pub pagination: PaginationView,
    /// A request is in flight
    pub loading: bool,
}

/// What the datatable shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableView {
    /// No config has been set
    Unconfigured,
    /// Configured but no row to show
    Empty {
        /// Heading
        title: Option<String>,
        /// Explanation shown in place of the table
        message: String,
        /// A request is in flight
        loading: bool,
    },
    /// Rows to show
    Table(TableGrid),
}

impl TableView {
    /// Rows currently rendered
    #[must_use]
    pub fn rows(&self) -> &[RenderedRow] {
        match self {
            Self::Table(grid) => &grid.rows,
            Self::Unconfigured | Self::Empty { .. } => &[],
        }
    }
}

impl fmt::Display for TableView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unconfigured => writeln!(f, "(table not configured)"),
            Self::Empty { title, message, .. } => {
                if let Some(title) = title {
                    writeln!(f, "{title}")?;
                }
                writeln!(f, "{message}")
            }
            Self::Table(grid) => write_grid(f, grid),
        }
    }
}

fn header_text(header: &HeaderCell) -> String {
    match header.sort {
        Some(SortDirection::Asc) => format!("{} ▲", header.label),
        Some(SortDirection::Desc) => format!("{} ▼", header.label),
        None => header.label.clone(),
    }
}

fn write_grid(f: &mut fmt::Formatter<'_>, grid: &TableGrid) -> fmt::Result {
    if let Some(title) = &grid.title {
        writeln!(f, "{title}")?;
    }

    let headers: Vec<String> = grid.headers.iter().map(header_text).collect();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &grid.rows {
        for (width, cell) in widths.iter_mut().zip(&row.cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let write_line = |f: &mut fmt::Formatter<'_>, cells: &[String]| -> fmt::Result {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let pad = width.saturating_sub(cell.chars().count());
                format!("{cell}{}", " ".repeat(pad))
            })
            .collect();
        writeln!(f, "{}", padded.join(" | ").trim_end())
    };

    write_line(f, &headers)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(f, "{}", rule.join("-+-"))?;
    for row in &grid.rows {
        write_line(f, &row.cells)?;
    }
    writeln!(
        f,
        "Page {} of {} ({} records)",
        grid.pagination.current_page, grid.pagination.total_pages, grid.pagination.total_items
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_aligns_columns() {
        let view = TableView::Table(TableGrid {
            title: Some("Orders".into()),
            headers: vec![
                HeaderCell {
                    key: "id".into(),
                    label: "ID".into(),
                    sortable: true,
                    sort: Some(SortDirection::Desc),
                },
                HeaderCell {
                    key: "name".into(),
                    label: "Name".into(),
                    sortable: false,
                    sort: None,
                },
            ],
            rows: vec![RenderedRow {
                id: 10,
                cells: vec!["10".into(), "Ada".into()],
            }],
            pagination: PaginationView {
                current_page: 1,
                total_pages: 1,
                total_items: 1,
                items_per_page: 10,
            },
            loading: false,
        });

        let text = view.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Orders");
        assert_eq!(lines[1], "ID ▼ | Name");
        assert_eq!(lines[2], "-----+-----");
        assert_eq!(lines[3], "10   | Ada");
        assert_eq!(lines[4], "Page 1 of 1 (1 records)");
    }
}
