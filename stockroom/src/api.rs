//! Typed endpoints of the inventory service.

use crate::error::Result;
use crate::http::{ApiRequest, HttpClient};
use crate::models::{AlertAck, AlertRequest, DashboardStats, NewProduct, Product, ProductId, QuantityChange, Reminder};
use reqwest::Method;
use serde::de::DeserializeOwned;

pub const PRODUCTS_PATH: &str = "/api/products";
pub const REMINDERS_PATH: &str = "/api/reminders";
pub const DASHBOARD_PATH: &str = "/api/dashboard";
pub const SEND_ALERT_PATH: &str = "/send_alert";

pub fn product_path(id: ProductId) -> String {
    format!("{PRODUCTS_PATH}/{id}")
}

pub fn quantity_path(id: ProductId) -> String {
    format!("{PRODUCTS_PATH}/{id}/quantity")
}

/// Inventory service endpoints on top of an [`HttpClient`].
///
/// Every method succeeds only on a 2xx response. Mutations ignore the
/// response body; reads decode it.
#[derive(Clone)]
pub struct InventoryApi<H: HttpClient> {
    http: H,
}

impl<H: HttpClient> InventoryApi<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>> {
        self.fetch(ApiRequest::get(PRODUCTS_PATH)).await
    }

    #[tracing::instrument(skip(self, product), fields(name = %product.name))]
    pub async fn create_product(&self, product: &NewProduct) -> Result<()> {
        self.send(ApiRequest::with_json(Method::POST, PRODUCTS_PATH, product)?).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<()> {
        self.send(ApiRequest::delete(product_path(id))).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn adjust_quantity(&self, id: ProductId, change: i64) -> Result<()> {
        let body = QuantityChange { change };
        self.send(ApiRequest::with_json(Method::PATCH, quantity_path(id), &body)?).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_reminders(&self) -> Result<Vec<Reminder>> {
        self.fetch(ApiRequest::get(REMINDERS_PATH)).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn dashboard(&self) -> Result<DashboardStats> {
        self.fetch(ApiRequest::get(DASHBOARD_PATH)).await
    }

    #[tracing::instrument(skip(self, alert), fields(email = %alert.email))]
    pub async fn send_alert(&self, alert: &AlertRequest) -> Result<AlertAck> {
        self.fetch(ApiRequest::with_json(Method::POST, SEND_ALERT_PATH, alert)?).await
    }

    async fn send(&self, request: ApiRequest) -> Result<()> {
        self.http.execute(&request).await?.error_for_status()?;
        Ok(())
    }

    async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let response = self.http.execute(&request).await?.error_for_status()?;
        Ok(serde_json::from_str(&response.body)?)
    }
}
