//! Command handlers for the ledger CLI.
//!
//! Each handler loads what it needs through the [`Config`], performs one operation and returns an
//! [`Out`] describing the outcome.

mod balances;
mod expense;
mod group;
mod init;
mod member;

use crate::error::{ErrorType, IntoResult, LedgerError};
use crate::ledger::GroupLedger;
use crate::model::{AmountFormat, Currency, GroupId, Money};
use crate::store::GroupStore;
use crate::{Config, Result};
use anyhow::anyhow;
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use balances::balances;
pub use expense::{expense_add, expense_list, expense_remove, expense_update};
pub use group::{group_create, group_list, group_show};
pub use init::init;
pub use member::{member_add, member_remove};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Loads group `id` from the config's store.
async fn load_ledger(config: &Config, id: &str) -> Result<GroupLedger> {
    let store = config.store();
    let id = GroupId::new(id);
    if !store.exists(&id).await.pub_result(ErrorType::Reference)? {
        return Err(anyhow!("Group '{id}' does not exist")).pub_result(ErrorType::Reference);
    }
    let group = store.load(&id).await.pub_result(ErrorType::Store)?;
    debug!(
        "Group {id} has {} members and {} expenses",
        group.members().len(),
        group.expenses().len()
    );
    Ok(GroupLedger::new(group))
}

/// Persists the group held by `ledger`.
async fn save_ledger(config: &Config, ledger: &GroupLedger) -> Result<()> {
    config
        .store()
        .save(ledger.group())
        .await
        .pub_result(ErrorType::Store)
}

/// Tags a ledger failure with its own error type.
fn checked<T>(result: std::result::Result<T, LedgerError>) -> Result<T> {
    result.map_err(|e| {
        let error_type = e.error_type();
        anyhow::Error::new(e).context(error_type)
    })
}

/// Formats `money` for messages, e.g. `1,250.00 USD`.
fn show_money(currency: &Currency, money: Money) -> String {
    format!(
        "{} {}",
        currency
            .to_amount(money)
            .with_format(AmountFormat::new(false, true)),
        currency.code()
    )
}
