//! Plain-text rendering of the view model.

use crate::form::FormField;
use crate::notify::Notification;
use crate::view::{Counters, CreateDialog, ProductCard, ReminderCard, ViewModel};
use std::fmt::Write;

pub fn render(view: &ViewModel, notifications: &[Notification]) -> String {
    let mut out = String::new();
    render_dashboard(&mut out, &view.counters);
    out.push('\n');
    render_products(&mut out, &view.products);
    out.push('\n');
    render_reminders(&mut out, &view.reminders);
    if view.dialog.open {
        out.push('\n');
        render_dialog(&mut out, &view.dialog);
    }
    if !notifications.is_empty() {
        out.push('\n');
        render_notifications(&mut out, notifications);
    }
    out
}

fn counter(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn render_dashboard(out: &mut String, counters: &Counters) {
    let _ = writeln!(out, "== Dashboard ==");
    let _ = writeln!(out, "Total Products: {}", counter(counters.total_products));
    let _ = writeln!(out, "Low Stock: {}", counter(counters.low_stock));
    let _ = writeln!(out, "Expiring Soon: {}", counter(counters.expiring_soon));
}

pub fn render_products(out: &mut String, products: &[ProductCard]) {
    let _ = writeln!(out, "== Inventory ==");
    if products.is_empty() {
        let _ = writeln!(out, "(no products)");
    }
    for card in products {
        let _ = writeln!(out, "#{} {}", card.id, card.name);
        let _ = writeln!(out, "  Quantity: {}", card.quantity);
        let _ = writeln!(out, "  Expiration: {}", card.expiration);
        let _ = writeln!(out, "  Minimum Stock: {}", card.minimum_stock);
        let controls: Vec<String> = card.controls.iter().map(|b| format!("[{}]", b.label)).collect();
        let _ = writeln!(out, "  {}", controls.join(" "));
    }
}

pub fn render_reminders(out: &mut String, reminders: &[ReminderCard]) {
    let _ = writeln!(out, "== Reminders ==");
    if reminders.is_empty() {
        let _ = writeln!(out, "(no reminders)");
    }
    for card in reminders {
        let _ = writeln!(out, "{}", card.product_name);
        let _ = writeln!(out, "  {}", card.message);
        let _ = writeln!(out, "  Due: {}", card.due);
    }
}

fn render_dialog(out: &mut String, dialog: &CreateDialog) {
    let _ = writeln!(out, "== Add Product ==");
    for field in FormField::ALL {
        let _ = writeln!(out, "  {} ({}): {}", field.label(), field, dialog.form.get(field));
    }
}

fn render_notifications(out: &mut String, notifications: &[Notification]) {
    for n in notifications {
        let _ = writeln!(out, "! [{}] {}", n.id, n.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Product, Reminder};
    use chrono::NaiveDate;

    #[test]
    fn test_single_product_card() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Milk",
            "quantity": 2,
            "expiration_date": "2024-01-01",
            "minimum_stock": 5
        }))
        .unwrap();

        let mut view = ViewModel::default();
        view.show_products(&[product]);

        let mut out = String::new();
        render_products(&mut out, &view.products);

        assert_eq!(out.matches("#").count(), 1);
        assert!(out.contains("#1 Milk"));
        assert!(out.contains("Quantity: 2"));
        assert!(out.contains("Expiration: 1/1/2024"));
        assert!(out.contains("Minimum Stock: 5"));
        assert!(out.contains("[-] [+] [Delete]"));
    }

    #[test]
    fn test_reminder_card() {
        let mut view = ViewModel::default();
        view.show_reminders(&[Reminder {
            id: None,
            product_name: "Bread".to_string(),
            message: "Low stock alert: Bread (Quantity: 1)".to_string(),
            due_date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        }]);

        let mut out = String::new();
        render_reminders(&mut out, &view.reminders);
        assert!(out.contains("Bread\n"));
        assert!(out.contains("Due: 3/5/2024"));
    }

    #[test]
    fn test_unloaded_counters_render_as_dash() {
        let out = render(&ViewModel::default(), &[]);
        assert!(out.contains("Total Products: -"));
        assert!(out.contains("(no products)"));
        assert!(!out.contains("Add Product"));
    }

    #[test]
    fn test_open_dialog_and_notifications() {
        let mut view = ViewModel::default();
        view.dialog.open = true;
        view.dialog.form.name = "Eggs".to_string();

        let notifications = vec![Notification {
            id: 3,
            message: "Failed to add product".to_string(),
        }];
        let out = render(&view, &notifications);
        assert!(out.contains("Product Name (name): Eggs"));
        assert!(out.contains("! [3] Failed to add product"));
    }
}
