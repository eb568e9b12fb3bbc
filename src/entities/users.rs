// ABOUTME: Users entity: account table with role and status badges, two-tab account form
// ABOUTME: Password is only format-checked; the backend hashes and stores it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

use admin_panel_core::schema::{
    CellFormat, ColumnConfig, FieldConfig, FieldKind, FilterConfig, FilterKind, FormConfig,
    SelectOption, TabConfig, TableConfig, ValidationRule,
};
use std::collections::BTreeMap;

const ENDPOINT: &str = "/api/users";

fn roles() -> Vec<SelectOption> {
    vec![
        SelectOption::new("admin", "Administrator"),
        SelectOption::new("manager", "Manager"),
        SelectOption::new("viewer", "Viewer"),
    ]
}

pub(super) fn table_config() -> TableConfig {
    let role_labels: BTreeMap<String, String> = roles()
        .into_iter()
        .map(|option| (option.value, option.label))
        .collect();

    TableConfig {
        api_endpoint: ENDPOINT.to_owned(),
        columns: vec![
            ColumnConfig::new("id", "ID").sortable(),
            ColumnConfig::new("name", "Name").sortable(),
            ColumnConfig::new("email", "Email").sortable(),
            ColumnConfig::new("role", "Role").render(CellFormat::Badge { labels: role_labels }),
            ColumnConfig::new("active", "Status").render(CellFormat::Boolean {
                true_label: "Active".into(),
                false_label: "Disabled".into(),
            }),
            ColumnConfig::new("createdAt", "Created")
                .sortable()
                .render(CellFormat::Date),
        ],
        filters: vec![
            FilterConfig::new("role", "Role", FilterKind::Select { options: roles() }),
            FilterConfig::new("email", "Email", FilterKind::Text),
        ],
        items_per_page: 10,
        title: Some("Users".into()),
        store_key: Some("users".into()),
    }
}

pub(super) fn form_config() -> FormConfig {
    FormConfig {
        title: "User".into(),
        api_endpoint: ENDPOINT.to_owned(),
        entity_name: "User".into(),
        tabs: vec![
            TabConfig {
                id: "account".into(),
                label: "Account".into(),
                icon: Some("user".into()),
                fields: vec![
                    FieldConfig::new("name", "Full name", FieldKind::Text)
                        .required()
                        .rule(ValidationRule::MinLength { min: 2 })
                        .rule(ValidationRule::MaxLength { max: 120 }),
                    FieldConfig::new("email", "Email", FieldKind::Email)
                        .required()
                        .placeholder("name@example.com"),
                    FieldConfig::new("password", "Password", FieldKind::Password)
                        .rule(ValidationRule::MinLength { min: 8 }),
                ],
            },
            TabConfig {
                id: "access".into(),
                label: "Access".into(),
                icon: Some("shield".into()),
                fields: vec![
                    FieldConfig::new("role", "Role", FieldKind::Select { options: roles() }).required(),
                    FieldConfig::new("active", "Active", FieldKind::Checkbox),
                ],
            },
        ],
    }
}
