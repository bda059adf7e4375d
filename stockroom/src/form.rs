//! The product creation form.
//!
//! Fields are kept as the raw text the user typed. The only checks are the
//! ones an HTML form would enforce natively: required fields, non-negative
//! whole numbers, and a well-formed date.

use crate::error::{ClientError, Result};
use crate::models::NewProduct;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// Names of the form's inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Quantity,
    ExpirationDate,
    ReminderFrequency,
    MinimumStock,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Name,
        FormField::Quantity,
        FormField::ExpirationDate,
        FormField::ReminderFrequency,
        FormField::MinimumStock,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Quantity => "quantity",
            FormField::ExpirationDate => "expiration_date",
            FormField::ReminderFrequency => "reminder_frequency",
            FormField::MinimumStock => "minimum_stock",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Product Name",
            FormField::Quantity => "Quantity",
            FormField::ExpirationDate => "Expiration Date",
            FormField::ReminderFrequency => "Reminder Frequency (days)",
            FormField::MinimumStock => "Minimum Stock",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "name" | "product_name" => Ok(FormField::Name),
            "quantity" | "qty" => Ok(FormField::Quantity),
            "expiration_date" | "expiration" | "expires" => Ok(FormField::ExpirationDate),
            "reminder_frequency" | "frequency" => Ok(FormField::ReminderFrequency),
            "minimum_stock" | "min_stock" | "minimum" => Ok(FormField::MinimumStock),
            other => Err(format!("unknown field '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub quantity: String,
    pub expiration_date: String,
    pub reminder_frequency: String,
    pub minimum_stock: String,
}

impl ProductForm {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Quantity => &self.quantity,
            FormField::ExpirationDate => &self.expiration_date,
            FormField::ReminderFrequency => &self.reminder_frequency,
            FormField::MinimumStock => &self.minimum_stock,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Quantity => self.quantity = value,
            FormField::ExpirationDate => self.expiration_date = value,
            FormField::ReminderFrequency => self.reminder_frequency = value,
            FormField::MinimumStock => self.minimum_stock = value,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Build the creation payload, checking the native input constraints.
    ///
    /// Numbers are coerced to integers. The name and the date are passed
    /// through verbatim, the date once it is known to be a `YYYY-MM-DD`
    /// calendar date.
    pub fn to_payload(&self) -> Result<NewProduct> {
        let name = required(FormField::Name, &self.name)?;

        let quantity = whole_number(FormField::Quantity, &self.quantity)?;

        let expiration_date = required(FormField::ExpirationDate, &self.expiration_date)?;
        NaiveDate::parse_from_str(expiration_date, "%Y-%m-%d").map_err(|_| ClientError::InvalidForm {
            field: FormField::ExpirationDate.as_str(),
            reason: "must be a date in YYYY-MM-DD form".to_string(),
        })?;

        let reminder_frequency = whole_number(FormField::ReminderFrequency, &self.reminder_frequency)?;
        let minimum_stock = whole_number(FormField::MinimumStock, &self.minimum_stock)?;

        Ok(NewProduct {
            name: name.to_string(),
            quantity,
            expiration_date: expiration_date.to_string(),
            reminder_frequency,
            minimum_stock,
        })
    }
}

fn required(field: FormField, value: &str) -> Result<&str> {
    if value.is_empty() {
        return Err(ClientError::InvalidForm {
            field: field.as_str(),
            reason: "please fill out this field".to_string(),
        });
    }
    Ok(value)
}

fn whole_number(field: FormField, value: &str) -> Result<i64> {
    let value = required(field, value.trim())?;
    let number: i64 = value.parse().map_err(|_| ClientError::InvalidForm {
        field: field.as_str(),
        reason: format!("'{value}' is not a whole number"),
    })?;
    if number < 0 {
        return Err(ClientError::InvalidForm {
            field: field.as_str(),
            reason: "must be 0 or greater".to_string(),
        });
    }
    Ok(number)
}
