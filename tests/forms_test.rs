// ABOUTME: Integration tests for the forms engine against a scripted transport
// ABOUTME: Covers validation order, active-tab submission, create/edit verbs, and transient messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use admin_panel::client::{HttpMethod, RestTransport};
use admin_panel::errors::ErrorCode;
use admin_panel::events::{EventBus, FormMode, PanelEvent};
use admin_panel::forms::{FormEngine, MessageKind, SubmitOutcome, ValidatorRegistry, Widget};
use admin_panel::test_utils::MockTransport;
use admin_panel_core::constants::form::{EMAIL_MESSAGE, REQUIRED_MESSAGE};
use admin_panel_core::schema::{
    FieldConfig, FieldKind, FormConfig, Row, SelectOption, TabConfig, ValidationRule,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn mock_form() -> (Arc<MockTransport>, FormEngine) {
    common::init_test_logging();
    let transport = MockTransport::shared();
    let mut form = FormEngine::new(Arc::clone(&transport) as Arc<dyn RestTransport>, EventBus::new());
    form.set_config(common::items_form());
    (transport, form)
}

fn email_only_form() -> FormConfig {
    FormConfig {
        title: "Subscriber".into(),
        api_endpoint: "/api/subscribers".into(),
        entity_name: "Subscriber".into(),
        tabs: vec![TabConfig {
            id: "main".into(),
            label: "Main".into(),
            icon: None,
            fields: vec![FieldConfig::new("email", "Email", FieldKind::Email).required()],
        }],
    }
}

#[test]
fn test_required_error_wins_over_every_other_validator() {
    let mut registry = ValidatorRegistry::new();
    registry.register("always_fails", |_: &str| Some("custom failure".to_owned()));
    let transport: Arc<dyn RestTransport> = MockTransport::shared();
    let form = FormEngine::new(transport, EventBus::new()).with_validators(Arc::new(registry));

    let field = FieldConfig::new("email", "Email", FieldKind::Email)
        .required()
        .rule(ValidationRule::MinLength { min: 3 })
        .rule(ValidationRule::Custom {
            name: "always_fails".into(),
        });

    for blank in ["", " ", "\t\n  "] {
        assert_eq!(form.validate_field(&field, blank).as_deref(), Some(REQUIRED_MESSAGE));
    }
    assert_eq!(form.validate_field(&field, "nope").as_deref(), Some(EMAIL_MESSAGE));
    assert_eq!(
        form.validate_field(&field, "a@b.co").as_deref(),
        Some("custom failure")
    );
}

#[tokio::test]
async fn test_empty_required_email_blocks_submission() {
    common::init_test_logging();
    let transport = MockTransport::shared();
    let mut form = FormEngine::new(Arc::clone(&transport) as Arc<dyn RestTransport>, EventBus::new());
    form.set_config(email_only_form());
    form.set_value("email", "").unwrap();

    assert!(!form.validate_form());
    assert_eq!(form.errors().get("email").map(String::as_str), Some(REQUIRED_MESSAGE));

    let outcome = form.handle_submit().await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_edit_mode_puts_to_row_url() {
    let (transport, mut form) = mock_form();
    form.set_mode_attr("edit").unwrap();
    form.set_data_json(r#"{"id": 5, "name": "Ada", "email": "ada@example.com", "quantity": 3}"#)
        .unwrap();

    assert_eq!(form.value("name"), Some("Ada"));
    assert_eq!(form.value("quantity"), Some("3"));
    assert_eq!(form.submit_label().as_deref(), Some("Update Item"));

    let outcome = form.handle_submit().await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Saved(_)));

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Put);
    assert_eq!(requests[0].path, "/api/items/5");
    assert!(transport.requests_with(HttpMethod::Post).is_empty());
}

#[tokio::test]
async fn test_update_with_empty_body_counts_as_saved() {
    let (transport, mut form) = mock_form();
    form.set_mode(FormMode::Edit);
    form.set_data_json(r#"{"id": 8, "name": "Ada", "email": "ada@example.com"}"#)
        .unwrap();
    transport.push_response(204, serde_json::Value::Null);

    let outcome = form.handle_submit().await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Saved(serde_json::Value::Null));
    assert_eq!(transport.last_request().unwrap().path, "/api/items/8");
    assert_eq!(form.message(), Some((MessageKind::Success, "Item updated successfully")));
}

#[tokio::test]
async fn test_edit_mode_without_row_is_rejected() {
    let (transport, mut form) = mock_form();
    form.set_mode(FormMode::Edit);
    form.set_value("name", "Ada").unwrap();
    form.set_value("email", "ada@example.com").unwrap();

    let error = form.handle_submit().await.unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_create_posts_typed_payload_and_emits_success() {
    let (transport, mut form) = mock_form();
    let mut events = form.events().subscribe();
    assert_eq!(form.submit_label().as_deref(), Some("Create Item"));

    form.set_value("name", "Widget").unwrap();
    form.set_value("email", "shop@example.com").unwrap();
    transport.push_response(201, json!({"id": 11, "name": "Widget"}));

    let outcome = form.handle_submit().await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Saved(json!({"id": 11, "name": "Widget"})));
    let request = transport.last_request().unwrap();
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.path, "/api/items");
    assert_eq!(
        request.body,
        Some(json!({"name": "Widget", "email": "shop@example.com"}))
    );

    assert_eq!(form.value("name"), None, "inputs are cleared after a save");
    assert_eq!(form.message(), Some((MessageKind::Success, "Item created successfully")));
    match events.try_recv().unwrap() {
        PanelEvent::FormSuccess { data, mode } => {
            assert_eq!(mode, FormMode::Create);
            assert_eq!(data["id"], 11);
        }
        other => panic!("unexpected event {other:?}"),
    }

    tokio::time::sleep(Duration::from_millis(3001)).await;
    assert_eq!(form.message(), None);
}

#[tokio::test]
async fn test_payload_types_numbers_and_checkboxes() {
    let (transport, mut form) = mock_form();
    form.switch_tab("extra").unwrap();
    form.set_value("quantity", "").unwrap();
    form.set_value("newsletter", "on").unwrap();
    form.set_value("notes", "fragile").unwrap();

    assert_eq!(
        form.payload(),
        json!({"quantity": null, "newsletter": true, "notes": "fragile"})
    );

    form.set_value("quantity", "4").unwrap();
    form.handle_submit().await.unwrap();
    assert_eq!(
        transport.last_request().unwrap().body,
        Some(json!({"quantity": 4, "newsletter": true, "notes": "fragile"}))
    );
}

#[tokio::test(start_paused = true)]
async fn test_rejected_save_keeps_inputs_and_shows_error() {
    let (transport, mut form) = mock_form();
    let mut events = form.events().subscribe();
    form.set_value("name", "Widget").unwrap();
    form.set_value("email", "shop@example.com").unwrap();
    transport.push_response(422, json!({"message": "name already taken"}));

    let error = form.handle_submit().await.unwrap_err();

    assert_eq!(error.code, ErrorCode::ExternalServiceError);
    assert_eq!(error.context.status, Some(422));
    assert_eq!(form.value("name"), Some("Widget"));
    let (kind, text) = form.message().unwrap();
    assert_eq!(kind, MessageKind::Error);
    assert!(text.starts_with("Error saving Item"));
    assert!(text.contains("name already taken"));
    assert!(events.try_recv().is_err(), "no success event on failure");

    tokio::time::sleep(Duration::from_millis(3500)).await;
    assert!(form.message().is_some(), "errors stay up longer than successes");
    tokio::time::sleep(Duration::from_millis(1600)).await;
    assert_eq!(form.message(), None);
}

#[tokio::test]
async fn test_validation_covers_active_tab_only() {
    let (transport, mut form) = mock_form();
    // `notes` on the extra tab is required and left empty
    form.set_value("name", "Widget").unwrap();
    form.set_value("email", "shop@example.com").unwrap();
    form.set_value("quantity", "2").unwrap();

    assert!(form.validate_form());
    form.handle_submit().await.unwrap();
    assert_eq!(
        transport.last_request().unwrap().body,
        Some(json!({"name": "Widget", "email": "shop@example.com"}))
    );

    form.set_value("name", "Widget").unwrap();
    form.switch_tab("extra").unwrap();
    assert!(!form.validate_form());
    assert_eq!(form.errors().get("notes").map(String::as_str), Some(REQUIRED_MESSAGE));
    assert_eq!(form.value("name"), Some("Widget"), "switching tabs keeps inputs");
}

#[test]
fn test_set_value_clears_field_error() {
    let (_transport, mut form) = mock_form();
    assert!(!form.validate_form());
    assert!(form.errors().contains_key("name"));

    form.set_value("name", "Ada").unwrap();
    assert!(!form.errors().contains_key("name"));
    assert!(form.errors().contains_key("email"));

    let error = form.set_value("unknown", "x").unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
}

#[test]
fn test_cancel_clears_and_emits() {
    let (_transport, mut form) = mock_form();
    let mut events = form.events().subscribe();
    form.set_value("name", "Ada").unwrap();

    form.cancel();

    assert_eq!(form.value("name"), None);
    assert_eq!(events.try_recv().unwrap(), PanelEvent::FormCancel);
}

#[test]
fn test_render_lists_every_tab_and_widget() {
    let transport: Arc<dyn RestTransport> = MockTransport::shared();
    let mut form = FormEngine::new(transport, EventBus::new());
    assert!(form.render().is_none());

    let mut config = common::items_form();
    config.tabs[1].fields.push(FieldConfig::new(
        "size",
        "Size",
        FieldKind::Select {
            options: vec![SelectOption::new("s", "Small"), SelectOption::new("l", "Large")],
        },
    ));
    form.set_config(config);
    form.set_data(Row::from_value(json!({"id": 1, "size": "l", "newsletter": true})).unwrap());
    form.validate_form();

    let view = form.render().unwrap();
    assert_eq!(view.tabs.len(), 2);
    assert!(view.tabs[0].active);
    assert!(!view.tabs[1].active);
    assert_eq!(view.visible_fields().count(), 2);
    assert_eq!(view.field("name").unwrap().error.as_deref(), Some(REQUIRED_MESSAGE));

    match &view.field("size").unwrap().widget {
        Widget::Select { options } => {
            assert_eq!(options.len(), 3);
            assert_eq!(options[0].value, "");
            assert!(!options[0].selected);
            assert!(options[2].selected);
        }
        other => panic!("expected a select, got {other:?}"),
    }
    assert_eq!(
        view.field("newsletter").unwrap().widget,
        Widget::Checkbox { checked: true }
    );
    assert!(matches!(
        view.field("notes").unwrap().widget,
        Widget::Textarea { .. }
    ));
    match &view.field("email").unwrap().widget {
        Widget::Input { input_type, .. } => assert_eq!(*input_type, "email"),
        other => panic!("expected an input, got {other:?}"),
    }
    assert!(view.to_string().contains("<Create Item>"));
}

#[test]
fn test_unknown_tab_and_bad_attributes() {
    let (_transport, mut form) = mock_form();
    assert_eq!(form.switch_tab("billing").unwrap_err().code, ErrorCode::ResourceNotFound);
    assert_eq!(form.current_tab(), Some("main"));

    assert_eq!(form.set_mode_attr("destroy").unwrap_err().code, ErrorCode::InvalidInput);
    assert_eq!(form.mode(), FormMode::Create);

    assert!(form.set_config_json("{not json").is_err());
    assert_eq!(form.config().unwrap().entity_name, "Item");

    assert!(form.set_data_json(r#"{"name": "no id"}"#).is_err());
    assert!(form.data().is_none());
}
