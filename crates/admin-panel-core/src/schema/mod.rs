// ABOUTME: Declarative entity descriptors consumed by the datatable and forms engines
// ABOUTME: Columns, filters, fields, tabs, and the opaque Row record fetched from the backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

//! # Entity Schema
//!
//! Descriptors are plain data. Behavior that used to live inside them as
//! closures (cell rendering, field validation) is expressed as tagged variants
//! ([`CellFormat`], [`ValidationRule`]) that the engines resolve through
//! registries, so a descriptor can be built in code or parsed from JSON.
//!
//! Descriptors are built once per process and never mutated afterwards.

mod form;
mod row;
mod table;

pub use form::{FieldConfig, FieldKind, FormConfig, TabConfig, ValidationRule};
pub use row::Row;
pub use table::{CellFormat, ColumnConfig, FilterConfig, FilterKind, SelectOption, TableConfig};
