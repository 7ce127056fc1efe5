//! The shared group expense ledger.
//!
//! - [`evaluate`] turns an amount and a split policy into per-member shares.
//! - [`validate`] checks a draft expense against its group.
//! - [`aggregate`] folds expenses into a [`BalanceVector`](crate::model::BalanceVector).
//! - [`GroupLedger`] applies changes to a group; [`SharedLedger`] lets tasks share one.

mod aggregate;
mod evaluate;
mod service;
mod shared;
mod validate;

pub use aggregate::aggregate;
pub use evaluate::evaluate;
pub use service::GroupLedger;
pub use shared::SharedLedger;
pub use validate::validate;
