//! End-to-end flows through the reqwest client against a mocked inventory service.

use crate::client::{InventoryClient, Outcome};
use crate::config::{ApiConfig, Config};
use crate::form::FormField;
use crate::http::ReqwestHttpClient;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server: &MockServer) -> Config {
    Config {
        api: ApiConfig {
            base_url: server.uri().parse().unwrap(),
            request_timeout: Some(Duration::from_secs(5)),
        },
        ..Default::default()
    }
}

fn client_for(server: &MockServer, answer: bool) -> InventoryClient<ReqwestHttpClient> {
    InventoryClient::from_config(&test_config(server), move |_: &str| answer)
}

/// Mount the three read endpoints, each expected exactly `times` times.
async fn mount_reads(server: &MockServer, times: u64) {
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Milk", "quantity": 2, "expiration_date": "2024-01-01", "reminder_frequency": 7, "minimum_stock": 5}
        ])))
        .expect(times)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/reminders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "product_name": "Milk", "message": "Low stock alert: Milk (Quantity: 2)", "due_date": "2024-01-01"}
        ])))
        .expect(times)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/dashboard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_products": 1, "low_stock": 1, "expiring_soon": 1
        })))
        .expect(times)
        .mount(server)
        .await;
}

#[test_log::test(tokio::test)]
async fn test_initial_load_renders_everything() {
    let server = MockServer::start().await;
    mount_reads(&server, 1).await;

    let mut client = client_for(&server, true);
    client.load().await;

    let out = client.render();
    assert!(out.contains("Total Products: 1"));
    assert!(out.contains("#1 Milk"));
    assert!(out.contains("Minimum Stock: 5"));
    assert!(out.contains("Low stock alert: Milk (Quantity: 2)"));
    assert!(client.notifier().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_create_then_refresh() {
    let server = MockServer::start().await;
    mount_reads(&server, 1).await;

    Mock::given(method("POST"))
        .and(path("/api/products"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "name": "Milk",
            "quantity": 2,
            "expiration_date": "2024-01-01",
            "reminder_frequency": 7,
            "minimum_stock": 5
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Product added successfully"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server, true);
    client.open_create_dialog();
    client.set_field(FormField::Name, "Milk");
    client.set_field(FormField::Quantity, "2");
    client.set_field(FormField::ExpirationDate, "2024-01-01");
    client.set_field(FormField::ReminderFrequency, "7");
    client.set_field(FormField::MinimumStock, "5");

    assert!(client.submit_create().await.is_completed());
    assert!(!client.view().dialog.open);
    assert!(client.form().is_empty());
    assert_eq!(client.view().products.len(), 1);
}

#[test_log::test(tokio::test)]
async fn test_quantity_patch_and_partial_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/products/7/quantity"))
        .and(body_json(json!({"change": 1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Quantity updated successfully"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_products": 0, "low_stock": 0, "expiring_soon": 0
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/reminders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let mut client = client_for(&server, true);
    let card_action = {
        // Bind the "+" control the way a rendered card would
        let product = serde_json::from_value(json!(
            {"id": 7, "name": "Tea", "quantity": 1, "expiration_date": "2025-01-01", "minimum_stock": 1}
        ))
        .unwrap();
        crate::view::ProductCard::from_product(&product).control("+").unwrap()
    };

    assert!(client.dispatch(card_action).await.is_completed());
    assert_eq!(client.view().counters.total_products, Some(0));
}

#[test_log::test(tokio::test)]
async fn test_confirmed_delete() {
    let server = MockServer::start().await;
    mount_reads(&server, 1).await;

    Mock::given(method("DELETE"))
        .and(path("/api/products/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Product deleted successfully"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server, true);
    assert!(client.delete_product(1).await.is_completed());
}

#[test_log::test(tokio::test)]
async fn test_declined_delete_never_reaches_the_server() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut client = client_for(&server, false);
    assert!(matches!(client.delete_product(1).await, Outcome::Declined));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_server_error_becomes_notification() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/products/1"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .expect(1)
        .mount(&server)
        .await;
    mount_reads(&server, 0).await;

    let mut client = client_for(&server, true);
    assert!(matches!(client.delete_product(1).await, Outcome::Failed));

    let notifications = client.notifier().snapshot();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].message, "Failed to delete product");
    assert!(client.render().contains("Failed to delete product"));
}
