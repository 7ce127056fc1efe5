use crate::model::{Currency, Expense, ExpenseId, Member, MemberId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Identifies a group.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for GroupId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A group of members sharing expenses. The group owns its members and expenses; member order is
/// insertion order and is also display order.
///
/// Balances are not part of a group. They are derived on demand, see
/// [`GroupLedger::balances`](crate::ledger::GroupLedger::balances).
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Group {
    id: GroupId,
    name: String,
    #[serde(default)]
    currency: Currency,
    #[serde(default)]
    members: Vec<Member>,
    #[serde(default)]
    expenses: Vec<Expense>,
}

impl Group {
    /// Creates an empty group.
    pub fn new(id: impl Into<GroupId>, name: impl Into<String>, currency: Currency) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            currency,
            members: Vec::new(),
            expenses: Vec::new(),
        }
    }

    pub fn id(&self) -> &GroupId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn member(&self, id: &MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id() == id)
    }

    pub fn has_member(&self, id: &MemberId) -> bool {
        self.member(id).is_some()
    }

    pub fn expense(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id() == id)
    }

    pub(crate) fn members_mut(&mut self) -> &mut Vec<Member> {
        &mut self.members
    }

    pub(crate) fn expenses_mut(&mut self) -> &mut Vec<Expense> {
        &mut self.expenses
    }
}
