// ABOUTME: Promoters entity: affiliate table with commission rates and a tabbed profile form
// ABOUTME: Registers the percentage renderer and the commission-range validator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

use crate::datatable::RendererRegistry;
use crate::forms::ValidatorRegistry;
use admin_panel_core::schema::{
    CellFormat, ColumnConfig, FieldConfig, FieldKind, FilterConfig, FilterKind, FormConfig,
    Row, SelectOption, TabConfig, TableConfig, ValidationRule,
};
use serde_json::Value;

const ENDPOINT: &str = "/api/promoters";

/// Renderer name for `12.5%` style rates
pub const PERCENT_RENDERER: &str = "percent";

/// Validator name accepting 0 to 100 inclusive
pub const COMMISSION_VALIDATOR: &str = "commission_percent";

fn tiers() -> Vec<SelectOption> {
    vec![
        SelectOption::new("bronze", "Bronze"),
        SelectOption::new("silver", "Silver"),
        SelectOption::new("gold", "Gold"),
    ]
}

/// Rate with one decimal and a percent sign; non-numbers render as-is
#[must_use]
pub fn render_percent(value: Option<&Value>, _row: &Row) -> String {
    match value {
        Some(Value::Number(rate)) => rate
            .as_f64()
            .map_or_else(|| rate.to_string(), |rate| format!("{rate:.1}%")),
        Some(Value::String(text)) => text.clone(),
        _ => String::new(),
    }
}

/// Commission must be a number between 0 and 100
#[must_use]
pub fn validate_commission(value: &str) -> Option<String> {
    match value.trim().parse::<f64>() {
        Ok(rate) if (0.0..=100.0).contains(&rate) => None,
        Ok(_) => Some("Commission must be between 0 and 100".to_owned()),
        Err(_) => Some("Please enter a valid number".to_owned()),
    }
}

pub(super) fn register_renderers(registry: &mut RendererRegistry) {
    registry.register(PERCENT_RENDERER, render_percent);
}

pub(super) fn register_validators(registry: &mut ValidatorRegistry) {
    registry.register(COMMISSION_VALIDATOR, validate_commission);
}

pub(super) fn table_config() -> TableConfig {
    TableConfig {
        api_endpoint: ENDPOINT.to_owned(),
        columns: vec![
            ColumnConfig::new("id", "ID").sortable(),
            ColumnConfig::new("name", "Name").sortable(),
            ColumnConfig::new("code", "Referral code"),
            ColumnConfig::new("tier", "Tier"),
            ColumnConfig::new("commissionRate", "Commission")
                .sortable()
                .render(CellFormat::Custom {
                    name: PERCENT_RENDERER.into(),
                }),
            ColumnConfig::new("totalSales", "Sales").sortable().render(CellFormat::Number { decimals: 0 }),
        ],
        filters: vec![
            FilterConfig::new("tier", "Tier", FilterKind::Select { options: tiers() }),
            FilterConfig::new("code", "Code", FilterKind::Text),
        ],
        items_per_page: 10,
        title: Some("Promoters".into()),
        store_key: Some("promoters".into()),
    }
}

pub(super) fn form_config() -> FormConfig {
    FormConfig {
        title: "Promoter".into(),
        api_endpoint: ENDPOINT.to_owned(),
        entity_name: "Promoter".into(),
        tabs: vec![
            TabConfig {
                id: "profile".into(),
                label: "Profile".into(),
                icon: Some("id-card".into()),
                fields: vec![
                    FieldConfig::new("name", "Name", FieldKind::Text).required(),
                    FieldConfig::new("email", "Email", FieldKind::Email).required(),
                    FieldConfig::new("phone", "Phone", FieldKind::Tel).rule(ValidationRule::Pattern {
                        pattern: r"\+?[0-9 ()-]{7,20}".into(),
                        message: "Please enter a valid phone number".into(),
                    }),
                    FieldConfig::new("website", "Website", FieldKind::Url).rule(ValidationRule::Pattern {
                        pattern: r"https?://\S+".into(),
                        message: "Website must start with http:// or https://".into(),
                    }),
                ],
            },
            TabConfig {
                id: "program".into(),
                label: "Program".into(),
                icon: Some("percent".into()),
                fields: vec![
                    FieldConfig::new("code", "Referral code", FieldKind::Text)
                        .required()
                        .rule(ValidationRule::Pattern {
                            pattern: "[A-Z0-9]{4,12}".into(),
                            message: "Use 4-12 uppercase letters or digits".into(),
                        }),
                    FieldConfig::new("tier", "Tier", FieldKind::Select { options: tiers() }),
                    FieldConfig::new("commissionRate", "Commission (%)", FieldKind::Number {
                        min: Some(0.0),
                        max: Some(100.0),
                    })
                    .required()
                    .rule(ValidationRule::Custom {
                        name: COMMISSION_VALIDATOR.into(),
                    }),
                    FieldConfig::new("acceptsTerms", "Accepted program terms", FieldKind::Checkbox)
                        .required(),
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
    fn test_percent_renderer() {
        let row = Row::from_value(json!({"id": 1})).unwrap();
        assert_eq!(render_percent(Some(&json!(12.5)), &row), "12.5%");
        assert_eq!(render_percent(Some(&json!(10)), &row), "10.0%");
        assert_eq!(render_percent(None, &row), "");
    }

    #[test]
    fn test_commission_range() {
        assert_eq!(validate_commission("0"), None);
        assert_eq!(validate_commission("100"), None);
        assert!(validate_commission("100.5").is_some());
        assert!(validate_commission("-1").is_some());
    }
}
