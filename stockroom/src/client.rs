//! The inventory view controller.
//!
//! `InventoryClient` owns the view model and is the only thing that mutates
//! it. Every operation is a one-shot request followed by a re-fetch of the
//! views it can affect. Failures never escape an operation: they are logged
//! and turned into a single notification.

use crate::api::InventoryApi;
use crate::config::Config;
use crate::confirm::Confirm;
use crate::error::ClientError;
use crate::form::{FormField, ProductForm};
use crate::http::{HttpClient, ReqwestHttpClient};
use crate::models::{AlertAck, AlertRequest, DashboardStats, Product, ProductId, Reminder};
use crate::notify::Notifier;
use crate::render;
use crate::view::{Action, ViewModel};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this product?";

const ADD_FAILED: &str = "Failed to add product";
const LOAD_INVENTORY_FAILED: &str = "Failed to load inventory";
const LOAD_REMINDERS_FAILED: &str = "Failed to load reminders";
const DASHBOARD_FAILED: &str = "Failed to update dashboard";
const QUANTITY_FAILED: &str = "Failed to update quantity";
const DELETE_FAILED: &str = "Failed to delete product";
const ALERT_FAILED: &str = "Failed to send alert";

/// How an operation ended, for callers that care. The view and the
/// notification area already reflect the result either way.
#[derive(Debug)]
pub enum Outcome {
    /// The request succeeded and the follow-up refreshes ran
    Completed,
    /// The request failed and a notification was raised
    Failed,
    /// The user declined the confirmation; nothing was sent
    Declined,
    /// The form violates an input constraint; nothing was sent
    Invalid(ClientError),
    /// Local-only change (dialog toggles, dismissals)
    Updated,
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed)
    }
}

/// Which views to re-fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Refresh {
    pub products: bool,
    pub reminders: bool,
    pub dashboard: bool,
}

impl Refresh {
    pub const ALL: Refresh = Refresh {
        products: true,
        reminders: true,
        dashboard: true,
    };

    /// A quantity change cannot add or resolve a reminder on its own.
    pub const AFTER_QUANTITY_CHANGE: Refresh = Refresh {
        products: true,
        reminders: false,
        dashboard: true,
    };
}

pub struct InventoryClient<H: HttpClient> {
    api: InventoryApi<H>,
    view: ViewModel,
    notifier: Notifier,
    confirm: Box<dyn Confirm>,
}

impl InventoryClient<ReqwestHttpClient> {
    /// Client for the service described by the configuration.
    pub fn from_config(config: &Config, confirm: impl Confirm + 'static) -> Self {
        let http = ReqwestHttpClient::new(config.api.base_url.clone()).with_timeout(config.api.request_timeout);
        Self::new(InventoryApi::new(http), Notifier::new(config.notifications.ttl), confirm)
    }
}

impl<H: HttpClient> InventoryClient<H> {
    pub fn new(api: InventoryApi<H>, notifier: Notifier, confirm: impl Confirm + 'static) -> Self {
        Self {
            api,
            view: ViewModel::default(),
            notifier,
            confirm: Box::new(confirm),
        }
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// The whole view, notifications included, as text.
    pub fn render(&self) -> String {
        render::render(&self.view, &self.notifier.snapshot())
    }

    /// Initial page state: every view fetched once, concurrently.
    pub async fn load(&mut self) {
        self.refresh(Refresh::ALL).await;
    }

    pub async fn dispatch(&mut self, action: Action) -> Outcome {
        tracing::debug!(?action, "Dispatching action");
        match action {
            Action::OpenCreateDialog => {
                self.open_create_dialog();
                Outcome::Updated
            }
            Action::CloseCreateDialog => {
                self.close_create_dialog();
                Outcome::Updated
            }
            Action::SubmitCreate => self.submit_create().await,
            Action::AdjustQuantity { product_id, change } => self.adjust_quantity(product_id, change).await,
            Action::DeleteProduct { product_id } => self.delete_product(product_id).await,
            Action::DismissNotification { id } => {
                self.notifier.dismiss(id);
                Outcome::Updated
            }
            Action::Refresh => {
                self.refresh(Refresh::ALL).await;
                Outcome::Completed
            }
        }
    }

    // ------------------------------------------------------------------
    // Creation dialog
    // ------------------------------------------------------------------

    pub fn open_create_dialog(&mut self) {
        self.view.dialog.open = true;
    }

    /// Hide the dialog. Closing always clears the form.
    pub fn close_create_dialog(&mut self) {
        self.view.dialog.open = false;
        self.view.dialog.form.reset();
    }

    pub fn form(&self) -> &ProductForm {
        &self.view.dialog.form
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.view.dialog.form.set(field, value);
    }

    /// Submit the creation form.
    ///
    /// On success the dialog closes and every view is refreshed. On failure
    /// the dialog and the typed values stay as they are.
    pub async fn submit_create(&mut self) -> Outcome {
        let payload = match self.view.dialog.form.to_payload() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::debug!(error = %e, "Creation form rejected");
                return Outcome::Invalid(e);
            }
        };

        match self.api.create_product(&payload).await {
            Ok(()) => {
                tracing::info!(name = %payload.name, "Product created");
                self.close_create_dialog();
                self.refresh(Refresh::ALL).await;
                Outcome::Completed
            }
            Err(e) => {
                self.fail(ADD_FAILED, &e);
                Outcome::Failed
            }
        }
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Ask the server to apply `delta` to a product's quantity.
    pub async fn adjust_quantity(&mut self, product_id: ProductId, delta: i64) -> Outcome {
        match self.api.adjust_quantity(product_id, delta).await {
            Ok(()) => {
                tracing::info!(product_id, delta, "Quantity adjusted");
                self.refresh(Refresh::AFTER_QUANTITY_CHANGE).await;
                Outcome::Completed
            }
            Err(e) => {
                self.fail(QUANTITY_FAILED, &e);
                Outcome::Failed
            }
        }
    }

    /// Delete a product after the user confirms.
    pub async fn delete_product(&mut self, product_id: ProductId) -> Outcome {
        if !self.confirm.confirm(DELETE_PROMPT) {
            tracing::debug!(product_id, "Delete declined");
            return Outcome::Declined;
        }

        match self.api.delete_product(product_id).await {
            Ok(()) => {
                tracing::info!(product_id, "Product deleted");
                self.refresh(Refresh::ALL).await;
                Outcome::Completed
            }
            Err(e) => {
                self.fail(DELETE_FAILED, &e);
                Outcome::Failed
            }
        }
    }

    /// Ask the service to email an alert. Returns its acknowledgement.
    pub async fn send_alert(&mut self, alert: &AlertRequest) -> Option<AlertAck> {
        match self.api.send_alert(alert).await {
            Ok(ack) => {
                tracing::info!(email = %alert.email, "Alert sent");
                Some(ack)
            }
            Err(e) => {
                self.fail(ALERT_FAILED, &e);
                None
            }
        }
    }

    // ------------------------------------------------------------------
    // Refreshes
    // ------------------------------------------------------------------

    pub async fn refresh_products(&mut self) {
        let result = self.api.list_products().await;
        self.apply_products(result);
    }

    pub async fn refresh_reminders(&mut self) {
        let result = self.api.list_reminders().await;
        self.apply_reminders(result);
    }

    pub async fn refresh_dashboard(&mut self) {
        let result = self.api.dashboard().await;
        self.apply_dashboard(result);
    }

    /// Re-fetch the selected views concurrently. Each one succeeds or fails
    /// on its own; a failure leaves that view as it was.
    pub async fn refresh(&mut self, targets: Refresh) {
        let api = &self.api;
        let (products, reminders, dashboard) = tokio::join!(
            async {
                if targets.products { Some(api.list_products().await) } else { None }
            },
            async {
                if targets.reminders { Some(api.list_reminders().await) } else { None }
            },
            async {
                if targets.dashboard { Some(api.dashboard().await) } else { None }
            },
        );

        if let Some(result) = products {
            self.apply_products(result);
        }
        if let Some(result) = reminders {
            self.apply_reminders(result);
        }
        if let Some(result) = dashboard {
            self.apply_dashboard(result);
        }
    }

    fn apply_products(&mut self, result: crate::Result<Vec<Product>>) {
        match result {
            Ok(products) => self.view.show_products(&products),
            Err(e) => self.fail(LOAD_INVENTORY_FAILED, &e),
        }
    }

    fn apply_reminders(&mut self, result: crate::Result<Vec<Reminder>>) {
        match result {
            Ok(reminders) => self.view.show_reminders(&reminders),
            Err(e) => self.fail(LOAD_REMINDERS_FAILED, &e),
        }
    }

    fn apply_dashboard(&mut self, result: crate::Result<DashboardStats>) {
        match result {
            Ok(stats) => self.view.show_dashboard(stats),
            Err(e) => self.fail(DASHBOARD_FAILED, &e),
        }
    }

    /// Raise a notification for a failed operation.
    pub fn notify(&self, message: impl Into<String>) -> u64 {
        self.notifier.notify(message)
    }

    fn fail(&self, message: &str, error: &ClientError) {
        tracing::warn!(error = %error, "{message}");
        self.notifier.notify(message);
    }
}
