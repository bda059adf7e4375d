//! View model owned by the controller.
//!
//! Lists are replaced wholesale on every successful fetch; nothing here is
//! patched incrementally.

use crate::form::ProductForm;
use crate::models::{DashboardStats, Product, ProductId, Reminder};
use chrono::{Datelike, NaiveDate};

/// Something a front end can ask the controller to do.
///
/// Per-product affordances carry their product id, so a control never has to
/// look anything up when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    OpenCreateDialog,
    CloseCreateDialog,
    SubmitCreate,
    AdjustQuantity { product_id: ProductId, change: i64 },
    DeleteProduct { product_id: ProductId },
    DismissNotification { id: u64 },
    Refresh,
}

/// A labelled control bound to an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub label: &'static str,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub quantity: i64,
    pub expiration: String,
    pub minimum_stock: i64,
    pub controls: [Binding; 3],
}

impl ProductCard {
    pub fn from_product(product: &Product) -> Self {
        let id = product.id;
        Self {
            id,
            name: product.name.clone(),
            quantity: product.quantity,
            expiration: short_date(product.expiration_date),
            minimum_stock: product.minimum_stock,
            controls: [
                Binding {
                    label: "-",
                    action: Action::AdjustQuantity {
                        product_id: id,
                        change: -1,
                    },
                },
                Binding {
                    label: "+",
                    action: Action::AdjustQuantity { product_id: id, change: 1 },
                },
                Binding {
                    label: "Delete",
                    action: Action::DeleteProduct { product_id: id },
                },
            ],
        }
    }

    /// The control with the given label, if the card has one.
    pub fn control(&self, label: &str) -> Option<Action> {
        self.controls.iter().find(|b| b.label == label).map(|b| b.action)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderCard {
    pub product_name: String,
    pub message: String,
    pub due: String,
}

impl ReminderCard {
    pub fn from_reminder(reminder: &Reminder) -> Self {
        Self {
            product_name: reminder.product_name.clone(),
            message: reminder.message.clone(),
            due: short_date(reminder.due_date),
        }
    }
}

/// Dashboard counters; `None` until the first successful fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub total_products: Option<i64>,
    pub low_stock: Option<i64>,
    pub expiring_soon: Option<i64>,
}

impl From<DashboardStats> for Counters {
    fn from(stats: DashboardStats) -> Self {
        Self {
            total_products: Some(stats.total_products),
            low_stock: Some(stats.low_stock),
            expiring_soon: Some(stats.expiring_soon),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateDialog {
    pub open: bool,
    pub form: ProductForm,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewModel {
    pub dialog: CreateDialog,
    pub products: Vec<ProductCard>,
    pub reminders: Vec<ReminderCard>,
    pub counters: Counters,
}

impl ViewModel {
    pub fn show_products(&mut self, products: &[Product]) {
        self.products = products.iter().map(ProductCard::from_product).collect();
    }

    pub fn show_reminders(&mut self, reminders: &[Reminder]) {
        self.reminders = reminders.iter().map(ReminderCard::from_reminder).collect();
    }

    pub fn show_dashboard(&mut self, stats: DashboardStats) {
        self.counters = stats.into();
    }

    pub fn product(&self, id: ProductId) -> Option<&ProductCard> {
        self.products.iter().find(|p| p.id == id)
    }
}

/// Short `M/D/YYYY` date, taken from the calendar date with no timezone shift.
pub fn short_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}
