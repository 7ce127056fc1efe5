use crate::model::{Amount, DraftSplit, MemberId, Money, SplitPolicy};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use uuid::Uuid;

/// Identifies an expense within one group.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh id of the form `exp-<32 hex chars>`.
    pub fn generate() -> Self {
        Self(format!("exp-{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ExpenseId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExpenseId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// An expense as submitted by a caller. Every field must be supplied, including on update.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: Amount,
    pub paid_by: MemberId,
    pub date: NaiveDate,
    pub split: DraftSplit,
}

/// An expense that has passed validation against its group. Amounts are in minor units.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ValidatedExpense {
    description: String,
    amount: Money,
    paid_by: MemberId,
    date: NaiveDate,
    split: SplitPolicy,
}

impl ValidatedExpense {
    pub(crate) fn new(
        description: String,
        amount: Money,
        paid_by: MemberId,
        date: NaiveDate,
        split: SplitPolicy,
    ) -> Self {
        Self {
            description,
            amount,
            paid_by,
            date,
            split,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn paid_by(&self) -> &MemberId {
        &self.paid_by
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn split(&self) -> &SplitPolicy {
        &self.split
    }

    pub(crate) fn split_mut(&mut self) -> &mut SplitPolicy {
        &mut self.split
    }
}

/// A stored expense: a validated expense plus the id the ledger assigned to it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Expense {
    id: ExpenseId,
    #[serde(flatten)]
    details: ValidatedExpense,
}

impl Expense {
    pub fn new(id: ExpenseId, details: ValidatedExpense) -> Self {
        Self { id, details }
    }

    pub fn id(&self) -> &ExpenseId {
        &self.id
    }

    pub fn details(&self) -> &ValidatedExpense {
        &self.details
    }

    pub(crate) fn details_mut(&mut self) -> &mut ValidatedExpense {
        &mut self.details
    }
}

impl Deref for Expense {
    type Target = ValidatedExpense;

    fn deref(&self) -> &Self::Target {
        &self.details
    }
}
