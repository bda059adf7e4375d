//! Terminal front end for a REST inventory service.
//!
//! This crate provides a view controller that:
//! - Lists products, reminders and dashboard counters from the service
//! - Submits a product creation form
//! - Adjusts quantities and deletes products, re-fetching affected views afterwards
//! - Shows failures as self-dismissing notifications
//!
//! The service owns all data. The client never computes a result locally; it
//! mirrors whatever the last successful fetch returned.
//!
//! # Example
//! ```ignore
//! use stockroom::{InventoryApi, InventoryClient, Notifier, ReqwestHttpClient};
//!
//! let http = ReqwestHttpClient::new("http://localhost:5000".parse()?);
//! let mut client = InventoryClient::new(InventoryApi::new(http), Notifier::default(), |_: &str| true);
//!
//! client.load().await;
//! client.adjust_quantity(7, 1).await;
//! println!("{}", client.render());
//! ```

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod confirm;
pub mod error;
pub mod form;
pub mod http;
pub mod models;
pub mod notify;
pub mod render;
pub mod shell;
pub mod telemetry;
pub mod view;

#[cfg(test)]
mod test;

pub use api::InventoryApi;
pub use client::{InventoryClient, Outcome, Refresh};
pub use config::{Args, Config};
pub use error::{ClientError, Result};
pub use http::{ApiRequest, HttpClient, HttpResponse, MockHttpClient, ReqwestHttpClient};
pub use models::*;
pub use notify::{Notification, Notifier};
pub use view::{Action, ViewModel};
