//! A cloneable handle that serializes writes to one group's ledger.

use crate::error::LedgerError;
use crate::ledger::GroupLedger;
use crate::model::{BalanceVector, Expense, ExpenseDraft, ExpenseId, Group, Member, MemberId};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shares a [`GroupLedger`] between tasks.
///
/// Mutations hold the write lock for their whole duration so they never interleave. Reads,
/// including [`SharedLedger::balances`], take the read lock and may run alongside each other.
#[derive(Debug, Clone)]
pub struct SharedLedger {
    inner: Arc<RwLock<GroupLedger>>,
}

impl SharedLedger {
    pub fn new(ledger: GroupLedger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    pub async fn add_expense(&self, draft: &ExpenseDraft) -> Result<Expense, LedgerError> {
        self.inner.write().await.add_expense(draft)
    }

    pub async fn update_expense(
        &self,
        id: &ExpenseId,
        draft: &ExpenseDraft,
    ) -> Result<Expense, LedgerError> {
        self.inner.write().await.update_expense(id, draft)
    }

    pub async fn remove_expense(&self, id: &ExpenseId) -> Result<Expense, LedgerError> {
        self.inner.write().await.remove_expense(id)
    }

    pub async fn add_member(&self, member: Member) -> Result<(), LedgerError> {
        self.inner.write().await.add_member(member)
    }

    pub async fn remove_member(&self, id: &MemberId) -> Result<Member, LedgerError> {
        self.inner.write().await.remove_member(id)
    }

    pub async fn balances(&self) -> Result<BalanceVector, LedgerError> {
        self.inner.read().await.balances()
    }

    /// A copy of the group as it is right now, e.g. for persisting.
    pub async fn snapshot(&self) -> Group {
        self.inner.read().await.group().clone()
    }
}

impl From<GroupLedger> for SharedLedger {
    fn from(ledger: GroupLedger) -> Self {
        Self::new(ledger)
    }
}
