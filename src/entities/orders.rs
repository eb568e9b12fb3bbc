// ABOUTME: Orders entity: order table with currency totals and status badges, order form
// ABOUTME: Registers the order-number renderer and the positive-amount validator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

use crate::datatable::format::display_value;
use crate::datatable::RendererRegistry;
use crate::forms::ValidatorRegistry;
use admin_panel_core::schema::{
    CellFormat, ColumnConfig, FieldConfig, FieldKind, FilterConfig, FilterKind, FormConfig,
    Row, SelectOption, TabConfig, TableConfig, ValidationRule,
};
use serde_json::Value;
use std::collections::BTreeMap;

const ENDPOINT: &str = "/api/orders";

/// Renderer name for `ORD-000042` style order numbers
pub const ORDER_NUMBER_RENDERER: &str = "order_number";

/// Validator name rejecting zero and negative amounts
pub const POSITIVE_AMOUNT_VALIDATOR: &str = "positive_amount";

fn statuses() -> Vec<SelectOption> {
    vec![
        SelectOption::new("pending", "Pending"),
        SelectOption::new("paid", "Paid"),
        SelectOption::new("shipped", "Shipped"),
        SelectOption::new("cancelled", "Cancelled"),
    ]
}

/// `ORD-` followed by the zero-padded id
#[must_use]
pub fn render_order_number(_value: Option<&Value>, row: &Row) -> String {
    format!("ORD-{:06}", row.id())
}

/// Amounts must parse and be strictly positive
#[must_use]
pub fn validate_positive_amount(value: &str) -> Option<String> {
    match value.trim().parse::<f64>() {
        Ok(amount) if amount > 0.0 => None,
        Ok(_) => Some("Amount must be greater than zero".to_owned()),
        Err(_) => Some("Please enter a valid number".to_owned()),
    }
}

pub(super) fn register_renderers(registry: &mut RendererRegistry) {
    registry.register(ORDER_NUMBER_RENDERER, render_order_number);
    registry.register("customer", |value: Option<&Value>, row: &Row| {
        let name = value.map(display_value).unwrap_or_default();
        match row.get("customer.email").map(display_value) {
            Some(email) if !email.is_empty() => format!("{name} <{email}>"),
            _ => name,
        }
    });
}

pub(super) fn register_validators(registry: &mut ValidatorRegistry) {
    registry.register(POSITIVE_AMOUNT_VALIDATOR, validate_positive_amount);
}

pub(super) fn table_config() -> TableConfig {
    let status_labels: BTreeMap<String, String> = statuses()
        .into_iter()
        .map(|option| (option.value, option.label))
        .collect();

    TableConfig {
        api_endpoint: ENDPOINT.to_owned(),
        columns: vec![
            ColumnConfig::new("id", "Order").sortable().render(CellFormat::Custom {
                name: ORDER_NUMBER_RENDERER.into(),
            }),
            ColumnConfig::new("customer.name", "Customer")
                .sortable()
                .render(CellFormat::Custom { name: "customer".into() }),
            ColumnConfig::new("total", "Total").sortable().render(CellFormat::Currency {
                symbol: "$".into(),
                decimals: 2,
            }),
            ColumnConfig::new("status", "Status").render(CellFormat::Badge { labels: status_labels }),
            ColumnConfig::new("notes", "Notes").render(CellFormat::Truncate { max_chars: 40 }),
            ColumnConfig::new("createdAt", "Placed")
                .sortable()
                .render(CellFormat::DateTime),
        ],
        filters: vec![
            FilterConfig::new("status", "Status", FilterKind::Select { options: statuses() }),
            FilterConfig::new("createdAt", "Placed on", FilterKind::Date),
        ],
        items_per_page: 20,
        title: Some("Orders".into()),
        store_key: Some("orders".into()),
    }
}

pub(super) fn form_config() -> FormConfig {
    FormConfig {
        title: "Order".into(),
        api_endpoint: ENDPOINT.to_owned(),
        entity_name: "Order".into(),
        tabs: vec![
            TabConfig {
                id: "details".into(),
                label: "Details".into(),
                icon: Some("receipt".into()),
                fields: vec![
                    FieldConfig::new("customerId", "Customer ID", FieldKind::Number {
                        min: Some(1.0),
                        max: None,
                    })
                    .required(),
                    FieldConfig::new("total", "Total", FieldKind::Number { min: None, max: None })
                        .required()
                        .rule(ValidationRule::Custom {
                            name: POSITIVE_AMOUNT_VALIDATOR.into(),
                        }),
                    FieldConfig::new("status", "Status", FieldKind::Select { options: statuses() })
                        .required(),
                ],
            },
            TabConfig {
                id: "shipping".into(),
                label: "Shipping".into(),
                icon: Some("truck".into()),
                fields: vec![
                    FieldConfig::new("shippingAddress", "Address", FieldKind::Textarea { rows: Some(3) }),
                    FieldConfig::new("shippedAt", "Shipped on", FieldKind::Date),
                    FieldConfig::new("notes", "Notes", FieldKind::Textarea { rows: Some(4) })
                        .rule(ValidationRule::MaxLength { max: 500 }),
                ],
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_renderers() {
        let registry = {
            let mut registry = RendererRegistry::new();
            register_renderers(&mut registry);
            registry
        };
        let row = Row::from_value(json!({
            "id": 42,
            "customer": {"name": "Ada", "email": "ada@example.com"}
        }))
        .unwrap();
        let config = table_config();

        assert_eq!(registry.render_cell(&config.columns[0], &row), "ORD-000042");
        assert_eq!(registry.render_cell(&config.columns[1], &row), "Ada <ada@example.com>");
    }

    #[test]
    fn test_positive_amount() {
        assert_eq!(validate_positive_amount("19.99"), None);
        assert!(validate_positive_amount("0").is_some());
        assert!(validate_positive_amount("-5").is_some());
        assert!(validate_positive_amount("lots").is_some());
    }
}
