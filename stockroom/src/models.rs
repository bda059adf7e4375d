//! Wire types exchanged with the inventory service.
//!
//! Everything here is owned by the server; the client only ever holds the
//! copy returned by the most recent fetch.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type ProductId = i64;

/// An inventory item tracked by name, quantity, expiration and restock threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub quantity: i64,
    pub expiration_date: NaiveDate,
    /// Days between consumption reminders
    #[serde(default)]
    pub reminder_frequency: i64,
    pub minimum_stock: i64,
}

/// Body of `POST /api/products`.
///
/// `expiration_date` is forwarded exactly as the form holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub quantity: i64,
    pub expiration_date: String,
    pub reminder_frequency: i64,
    pub minimum_stock: i64,
}

/// Body of `PATCH /api/products/{id}/quantity`. The server applies the delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityChange {
    pub change: i64,
}

/// A server-computed notice tied to a product needing attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub product_name: String,
    pub message: String,
    pub due_date: NaiveDate,
}

/// Aggregate counters summarizing inventory health.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_products: i64,
    pub low_stock: i64,
    pub expiring_soon: i64,
}

/// Body of `POST /send_alert`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRequest {
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Whatever JSON the alert endpoint acknowledges with.
pub type AlertAck = serde_json::Value;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_decodes_server_shape() {
        let json = r#"{
            "id": 1,
            "name": "Milk",
            "quantity": 2,
            "expiration_date": "2024-01-01",
            "reminder_frequency": 7,
            "minimum_stock": 5
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, 1);
        assert_eq!(product.expiration_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(product.reminder_frequency, 7);
    }

    #[test]
    fn test_product_without_reminder_frequency() {
        let json = r#"{"id":1,"name":"Milk","quantity":2,"expiration_date":"2024-01-01","minimum_stock":5}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.reminder_frequency, 0);
    }

    #[test]
    fn test_reminder_ignores_missing_id() {
        let json = r#"{"product_name":"Bread","message":"Low stock alert","due_date":"2024-03-05"}"#;
        let reminder: Reminder = serde_json::from_str(json).unwrap();
        assert_eq!(reminder.id, None);
        assert_eq!(reminder.product_name, "Bread");
    }

    #[test]
    fn test_new_product_keeps_raw_date() {
        let payload = NewProduct {
            name: "Eggs".to_string(),
            quantity: 12,
            expiration_date: "2024-02-29".to_string(),
            reminder_frequency: 3,
            minimum_stock: 6,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["expiration_date"], "2024-02-29");
        assert_eq!(value["quantity"], 12);
    }
}
