//! Interactive terminal session.
//!
//! Each input line maps onto one controller operation; the full view is
//! printed again after every command.

use std::io::{self, Write};

use async_trait::async_trait;

use crate::client::{InventoryClient, Outcome};
use crate::form::FormField;
use crate::http::HttpClient;
use crate::models::{AlertRequest, ProductId};
use crate::view::Action;

pub const HELP: &str = "\
Commands:
  new                          open the add-product form
  set <field> <value>          fill a form field (name, quantity, expiration_date,
                               reminder_frequency, minimum_stock)
  submit                       submit the form
  cancel                       close the form and clear it
  + <id> | - <id>              raise or lower a product's quantity by one
  adjust <id> <delta>          change a product's quantity by any amount
  rm <id>                      delete a product (asks first)
  dismiss <n>                  dismiss notification n
  refresh                      reload every view
  alert <email> <subject> <message...>
                               ask the service to email an alert
  help                         show this text
  quit                         leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Action(Action),
    Set(FormField, String),
    Alert(AlertRequest),
    Help,
    Quit,
    Empty,
}

pub fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "" => ShellCommand::Empty,
        "new" | "add" => ShellCommand::Action(Action::OpenCreateDialog),
        "cancel" | "close" => ShellCommand::Action(Action::CloseCreateDialog),
        "submit" => ShellCommand::Action(Action::SubmitCreate),
        "refresh" | "r" => ShellCommand::Action(Action::Refresh),
        "+" | "inc" => ShellCommand::Action(Action::AdjustQuantity {
            product_id: parse_id(rest)?,
            change: 1,
        }),
        "-" | "dec" => ShellCommand::Action(Action::AdjustQuantity {
            product_id: parse_id(rest)?,
            change: -1,
        }),
        "adjust" => {
            let (id, delta) = rest.split_once(char::is_whitespace).ok_or("usage: adjust <id> <delta>")?;
            let change = delta
                .trim()
                .parse()
                .map_err(|_| format!("'{}' is not a whole number", delta.trim()))?;
            ShellCommand::Action(Action::AdjustQuantity {
                product_id: parse_id(id)?,
                change,
            })
        }
        "rm" | "delete" => ShellCommand::Action(Action::DeleteProduct {
            product_id: parse_id(rest)?,
        }),
        "dismiss" => ShellCommand::Action(Action::DismissNotification {
            id: rest.parse().map_err(|_| "usage: dismiss <n>".to_string())?,
        }),
        "set" => {
            let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            if field.is_empty() {
                return Err("usage: set <field> <value>".to_string());
            }
            ShellCommand::Set(field.parse()?, value.trim().to_string())
        }
        "alert" => {
            let mut parts = rest.splitn(3, char::is_whitespace);
            match (parts.next(), parts.next(), parts.next()) {
                (Some(email), Some(subject), Some(message)) if !email.is_empty() => ShellCommand::Alert(AlertRequest {
                    email: email.to_string(),
                    subject: subject.to_string(),
                    message: message.trim().to_string(),
                }),
                _ => return Err("usage: alert <email> <subject> <message...>".to_string()),
            }
        }
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };
    Ok(command)
}

fn parse_id(s: &str) -> Result<ProductId, String> {
    s.trim().parse().map_err(|_| format!("'{}' is not a product id", s.trim()))
}

/// Where session input comes from, one line at a time.
#[async_trait]
pub trait LineSource: Send {
    /// The next line, or `None` at end of input.
    async fn next_line(&mut self) -> Option<io::Result<String>>;
}

#[async_trait]
impl<I> LineSource for I
where
    I: Iterator<Item = io::Result<String>> + Send,
{
    async fn next_line(&mut self) -> Option<io::Result<String>> {
        self.next()
    }
}

/// Lines typed on stdin, each read on the blocking pool. The stdin lock is
/// only held while a line is read, so a delete confirmation can read its
/// answer in between.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinLines;

#[async_trait]
impl LineSource for StdinLines {
    async fn next_line(&mut self) -> Option<io::Result<String>> {
        tokio::task::spawn_blocking(|| {
            let mut line = String::new();
            match io::stdin().read_line(&mut line) {
                Ok(0) => None,
                Ok(_) => Some(Ok(line)),
                Err(e) => Some(Err(e)),
            }
        })
        .await
        .unwrap_or_else(|e| Some(Err(io::Error::other(e))))
    }
}

/// Run a session until `quit` or end of input.
pub async fn run<H, L, W>(client: &mut InventoryClient<H>, mut input: L, mut out: W) -> anyhow::Result<()>
where
    H: HttpClient,
    L: LineSource,
    W: Write,
{
    client.load().await;
    writeln!(out, "{}", client.render())?;

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = input.next_line().await else {
            break;
        };
        let line = line?;

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };

        match command {
            ShellCommand::Empty => continue,
            ShellCommand::Quit => break,
            ShellCommand::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            ShellCommand::Set(field, value) => {
                if !client.view().dialog.open {
                    writeln!(out, "the form is closed, use 'new' first")?;
                    continue;
                }
                client.set_field(field, value);
            }
            ShellCommand::Alert(alert) => {
                if let Some(ack) = client.send_alert(&alert).await {
                    writeln!(out, "{ack}")?;
                }
            }
            ShellCommand::Action(action) => {
                if let Outcome::Invalid(e) = client.dispatch(action).await {
                    writeln!(out, "Please check {e}")?;
                }
            }
        }

        writeln!(out, "{}", client.render())?;
    }

    Ok(())
}
