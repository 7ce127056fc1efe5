//! A shared expense ledger for small groups.
//!
//! Members of a [`Group`](model::Group) record expenses, each paid by one member and split among
//! the group either equally or by exact amounts. The [`GroupLedger`] validates every change and
//! derives each member's balance from the full expense history, so balances always sum to zero.

pub mod args;
pub mod commands;
mod config;
mod error;
pub mod ledger;
pub mod model;
pub mod store;
mod utils;


/// The name this library logs under, e.g. `group_ledger::commands`.
pub const CRATE_NAME: &str = env!("CARGO_CRATE_NAME");

pub use config::Config;
pub use error::{Error, ErrorType, IntoResult, LedgerError, Result, SplitProblem, ValidationError};
pub use ledger::{GroupLedger, SharedLedger};
