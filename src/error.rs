//! Error types.
//!
//! The ledger core reports recoverable problems as [`LedgerError`] (which wraps
//! [`ValidationError`]) so that callers can render them as field errors. Everything above the core
//! (config, store, CLI) uses `anyhow` through [`Result`], tagging errors with an [`ErrorType`].

use crate::model::{ExpenseId, MemberId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// What is wrong with one entry of an exact split.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitProblem {
    /// A group member has no entry.
    Missing,
    /// The entry is below zero.
    Negative,
    /// The entry names someone who is not a member of the group.
    NotAMember,
}

serde_plain::derive_display_from_serialize!(SplitProblem);
serde_plain::derive_fromstr_from_deserialize!(SplitProblem);

/// Reasons a draft expense is rejected. Checked in declaration order; the first failure wins.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ValidationError {
    #[error("the amount must be greater than zero, got {amount}")]
    NonPositiveAmount { amount: Decimal },

    #[error("the amount {amount} has more than {minor_digits} decimal places")]
    ExcessPrecision { amount: Decimal, minor_digits: u32 },

    #[error("the amount {amount} is too large for this ledger")]
    AmountOutOfRange { amount: Decimal },

    #[error("the payer '{payer}' is not a member of the group")]
    UnknownPayer { payer: MemberId },

    #[error("the exact split entry for '{member}' is invalid ({problem})")]
    IncompleteSplit {
        member: MemberId,
        problem: SplitProblem,
    },

    /// `discrepancy` is the expense amount minus the sum of the split values.
    #[error("the split values do not add up to the amount (off by {discrepancy})")]
    SplitMismatch { discrepancy: Decimal },

    #[error("an equal split needs at least one member in the group")]
    EmptyGroup,
}

/// Errors returned by ledger operations.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid split policy: {0}")]
    InvalidPolicy(String),

    #[error("expense '{0}' not found")]
    ExpenseNotFound(ExpenseId),

    #[error("member '{0}' not found")]
    MemberNotFound(MemberId),

    #[error("member '{member}' cannot be removed because expense '{expense}' references them")]
    MemberHasHistory { member: MemberId, expense: ExpenseId },

    #[error("member '{0}' already exists")]
    DuplicateMember(MemberId),

    #[error("the balance of member '{0}' is too large for this ledger")]
    BalanceOverflow(MemberId),
}

impl LedgerError {
    /// The public category of this error.
    pub fn error_type(&self) -> ErrorType {
        match self {
            LedgerError::Validation(_)
            | LedgerError::InvalidPolicy(_)
            | LedgerError::BalanceOverflow(_) => ErrorType::Validation,
            LedgerError::ExpenseNotFound(_)
            | LedgerError::MemberNotFound(_)
            | LedgerError::MemberHasHistory { .. }
            | LedgerError::DuplicateMember(_) => ErrorType::Reference,
        }
    }
}

/// The broad category of a failure, reported ahead of the error chain.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The caller's input was rejected.
    Validation,
    /// The caller referred to something that does not exist or cannot be changed.
    Reference,
    /// The configuration or home directory is unusable.
    Config,
    /// Reading or writing persisted groups failed.
    Store,
}

impl Display for ErrorType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorType::Validation => "Validation error",
            ErrorType::Reference => "Reference error",
            ErrorType::Config => "Configuration error",
            ErrorType::Store => "Store error",
        };
        f.write_str(s)
    }
}

/// Tags an error with an [`ErrorType`] as it leaves a command.
pub trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| e.into().context(error_type))
    }
}
