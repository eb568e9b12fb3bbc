// ABOUTME: Built-in entity definitions (users, orders, promoters) and their registries
// ABOUTME: Configs are built once per process on first use and never mutated afterwards
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

/// Orders table and form
pub mod orders;

/// Promoters table and form
pub mod promoters;

/// Users table and form
pub mod users;

use crate::datatable::RendererRegistry;
use crate::forms::ValidatorRegistry;
use admin_panel_core::schema::{FormConfig, TableConfig};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Table and form descriptors of one entity
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDefinition {
    /// Which entity
    pub kind: EntityKind,
    /// Datatable descriptor
    pub table: TableConfig,
    /// Form descriptor
    pub form: FormConfig,
}

/// Entities shipped with the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Panel users
    Users,
    /// Customer orders
    Orders,
    /// Affiliate promoters
    Promoters,
}

impl EntityKind {
    /// Every built-in entity
    pub const ALL: [Self; 3] = [Self::Users, Self::Orders, Self::Promoters];

    /// Name used on the command line and as the store key
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Orders => "orders",
            Self::Promoters => "promoters",
        }
    }

    /// Process-wide definition, built on first access
    #[must_use]
    pub fn definition(&self) -> &'static EntityDefinition {
        static USERS: OnceLock<EntityDefinition> = OnceLock::new();
        static ORDERS: OnceLock<EntityDefinition> = OnceLock::new();
        static PROMOTERS: OnceLock<EntityDefinition> = OnceLock::new();

        match self {
            Self::Users => USERS.get_or_init(|| EntityDefinition {
                kind: Self::Users,
                table: users::table_config(),
                form: users::form_config(),
            }),
            Self::Orders => ORDERS.get_or_init(|| EntityDefinition {
                kind: Self::Orders,
                table: orders::table_config(),
                form: orders::form_config(),
            }),
            Self::Promoters => PROMOTERS.get_or_init(|| EntityDefinition {
                kind: Self::Promoters,
                table: promoters::table_config(),
                form: promoters::form_config(),
            }),
        }
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "users" | "user" => Ok(Self::Users),
            "orders" | "order" => Ok(Self::Orders),
            "promoters" | "promoter" => Ok(Self::Promoters),
            other => Err(format!(
                "unknown entity `{other}` (expected users, orders, or promoters)"
            )),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renderers for every `CellFormat::Custom` name used by the built-in tables
#[must_use]
pub fn renderers() -> RendererRegistry {
    let mut registry = RendererRegistry::new();
    orders::register_renderers(&mut registry);
    promoters::register_renderers(&mut registry);
    registry
}

/// Validators for every `ValidationRule::Custom` name used by the built-in forms
#[must_use]
pub fn validators() -> ValidatorRegistry {
    let mut registry = ValidatorRegistry::new();
    orders::register_validators(&mut registry);
    promoters::register_validators(&mut registry);
    registry
}
