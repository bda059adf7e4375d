//! Subcommands of the `stockroom` binary.

use clap::Subcommand;

use crate::client::InventoryClient;
use crate::config::Config;
use crate::confirm::{AssumeYes, Confirm, StdinConfirm};
use crate::form::FormField;
use crate::models::{AlertRequest, ProductId};
use crate::shell;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive session (the default)
    Shell,

    /// Load every view and print it once
    Show,

    /// Add a product, then print the refreshed view
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        quantity: String,

        /// YYYY-MM-DD
        #[arg(long)]
        expiration_date: String,

        /// Days between consumption reminders
        #[arg(long)]
        reminder_frequency: String,

        #[arg(long)]
        minimum_stock: String,
    },

    /// Change a product's quantity by a delta (server-applied)
    Adjust {
        id: ProductId,

        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },

    /// Delete a product
    Delete {
        id: ProductId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Ask the service to email an alert
    Alert {
        #[arg(long)]
        email: String,

        #[arg(long, default_value = "Stock Low Alert")]
        subject: String,

        #[arg(long, default_value = "Your inventory is running low. Please restock soon!")]
        message: String,
    },
}

/// Execute one subcommand against the configured service.
pub async fn run(config: &Config, command: Command) -> anyhow::Result<()> {
    let mut confirm: Box<dyn Confirm> = match command {
        Command::Delete { yes: true, .. } => Box::new(AssumeYes),
        _ => Box::new(StdinConfirm),
    };
    let mut client = InventoryClient::from_config(config, move |prompt: &str| confirm.confirm(prompt));

    match command {
        Command::Shell => return shell::run(&mut client, shell::StdinLines, std::io::stdout()).await,
        Command::Show => client.load().await,
        Command::Add {
            name,
            quantity,
            expiration_date,
            reminder_frequency,
            minimum_stock,
        } => {
            client.open_create_dialog();
            client.set_field(FormField::Name, name);
            client.set_field(FormField::Quantity, quantity);
            client.set_field(FormField::ExpirationDate, expiration_date);
            client.set_field(FormField::ReminderFrequency, reminder_frequency);
            client.set_field(FormField::MinimumStock, minimum_stock);
            if let crate::client::Outcome::Invalid(e) = client.submit_create().await {
                anyhow::bail!("invalid product: {e}");
            }
        }
        Command::Adjust { id, delta } => {
            client.adjust_quantity(id, delta).await;
        }
        Command::Delete { id, .. } => {
            client.delete_product(id).await;
        }
        Command::Alert { email, subject, message } => {
            let alert = AlertRequest { email, subject, message };
            if let Some(ack) = client.send_alert(&alert).await {
                println!("{ack}");
            }
        }
    }

    println!("{}", client.render());
    Ok(())
}
