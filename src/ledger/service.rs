//! The group ledger service: every mutation of a group's members and expenses goes through here.

use crate::error::LedgerError;
use crate::ledger::{aggregate, validate};
use crate::model::{
    BalanceVector, Expense, ExpenseDraft, ExpenseId, Group, Member, MemberId, Money, SplitPolicy,
};
use tracing::{debug, info};

/// Owns one [`Group`] and applies changes to it.
///
/// Every operation either succeeds completely or leaves the group untouched. Balances are never
/// stored; [`GroupLedger::balances`] derives them from the current expenses on every call.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GroupLedger {
    group: Group,
}

impl GroupLedger {
    pub fn new(group: Group) -> Self {
        Self { group }
    }

    pub fn group(&self) -> &Group {
        &self.group
    }

    pub fn into_group(self) -> Group {
        self.group
    }

    pub fn members(&self) -> &[Member] {
        self.group.members()
    }

    pub fn expenses(&self) -> &[Expense] {
        self.group.expenses()
    }

    pub fn expense(&self, id: &ExpenseId) -> Option<&Expense> {
        self.group.expense(id)
    }

    /// Validates `draft`, stores it under a new id and returns the stored record.
    ///
    /// An expense that would push a member's balance out of the range of [`Money`] is rejected
    /// with `BalanceOverflow`.
    pub fn add_expense(&mut self, draft: &ExpenseDraft) -> Result<Expense, LedgerError> {
        let validated = validate(draft, &self.group)?;
        aggregate(
            self.group
                .expenses()
                .iter()
                .map(Expense::details)
                .chain(std::iter::once(&validated)),
            self.group.members(),
        )?;
        let expense = Expense::new(ExpenseId::generate(), validated);
        self.group.expenses_mut().push(expense.clone());
        info!(
            "Added expense {} to group {} ({} paid by {})",
            expense.id(),
            self.group.id(),
            self.group.currency().to_amount(expense.amount()),
            expense.paid_by()
        );
        Ok(expense)
    }

    /// Replaces the whole expense `id` with `draft`. Nothing from the old record is carried over
    /// except its id.
    pub fn update_expense(
        &mut self,
        id: &ExpenseId,
        draft: &ExpenseDraft,
    ) -> Result<Expense, LedgerError> {
        let position = self.position(id)?;
        let validated = validate(draft, &self.group)?;
        aggregate(
            self.group
                .expenses()
                .iter()
                .enumerate()
                .filter(|(idx, _)| *idx != position)
                .map(|(_, e)| e.details())
                .chain(std::iter::once(&validated)),
            self.group.members(),
        )?;
        let expense = Expense::new(id.clone(), validated);
        self.group.expenses_mut()[position] = expense.clone();
        info!("Updated expense {id} in group {}", self.group.id());
        Ok(expense)
    }

    /// Removes expense `id` and returns it.
    pub fn remove_expense(&mut self, id: &ExpenseId) -> Result<Expense, LedgerError> {
        let position = self.position(id)?;
        let removed = self.group.expenses_mut().remove(position);
        info!("Removed expense {id} from group {}", self.group.id());
        Ok(removed)
    }

    /// Derives every member's balance from the current expenses.
    pub fn balances(&self) -> Result<BalanceVector, LedgerError> {
        debug!(
            "Computing balances for group {} over {} expenses",
            self.group.id(),
            self.group.expenses().len()
        );
        aggregate(
            self.group.expenses().iter().map(Expense::details),
            self.group.members(),
        )
    }

    /// Appends `member` to the group. Existing exact splits get a zero entry for the new member, so
    /// they owe nothing on those. Equal splits always cover the current members, so every stored
    /// equal expense is shared with the new member from now on.
    pub fn add_member(&mut self, member: Member) -> Result<(), LedgerError> {
        if self.group.has_member(member.id()) {
            return Err(LedgerError::DuplicateMember(member.id().clone()));
        }
        for expense in self.group.expenses_mut() {
            if let SplitPolicy::Exact(shares) = expense.details_mut().split_mut() {
                shares.insert(member.id().clone(), Money::ZERO);
            }
        }
        info!("Added member {} to group {}", member.id(), self.group.id());
        self.group.members_mut().push(member);
        Ok(())
    }

    /// Removes member `id` from the group and returns them.
    ///
    /// A member who paid for any expense, or owes a nonzero share of an exact split, has financial
    /// history and cannot be removed. Their zero entries in exact splits are dropped along with
    /// them.
    pub fn remove_member(&mut self, id: &MemberId) -> Result<Member, LedgerError> {
        let position = self
            .group
            .members()
            .iter()
            .position(|m| m.id() == id)
            .ok_or_else(|| LedgerError::MemberNotFound(id.clone()))?;

        if let Some(expense) = self.group.expenses().iter().find(|e| {
            e.paid_by() == id || e.split().exact_share(id).is_some_and(|s| !s.is_zero())
        }) {
            return Err(LedgerError::MemberHasHistory {
                member: id.clone(),
                expense: expense.id().clone(),
            });
        }

        for expense in self.group.expenses_mut() {
            if let SplitPolicy::Exact(shares) = expense.details_mut().split_mut() {
                shares.remove(id);
            }
        }
        let removed = self.group.members_mut().remove(position);
        info!("Removed member {id} from group {}", self.group.id());
        Ok(removed)
    }

    fn position(&self, id: &ExpenseId) -> Result<usize, LedgerError> {
        self.group
            .expenses()
            .iter()
            .position(|e| e.id() == id)
            .ok_or_else(|| LedgerError::ExpenseNotFound(id.clone()))
    }
}

impl From<Group> for GroupLedger {
    fn from(group: Group) -> Self {
        Self::new(group)
    }
}
