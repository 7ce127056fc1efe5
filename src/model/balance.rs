//! The derived per-member balance of a group.

use crate::model::{Amount, Currency, Member, MemberId, Money};
use serde::Serialize;

/// Each member's net position in the group, in member order.
///
/// A positive balance means the member is owed by the group, a negative balance means the member
/// owes the group. The entries of a `BalanceVector` produced by the ledger always sum to zero.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct BalanceVector(Vec<(MemberId, Money)>);

impl BalanceVector {
    /// Every member of `members` at zero.
    pub(crate) fn zeroed(members: &[Member]) -> Self {
        Self(
            members
                .iter()
                .map(|m| (m.id().clone(), Money::ZERO))
                .collect(),
        )
    }

    pub(crate) fn entry_mut(&mut self, member: &MemberId) -> Option<&mut Money> {
        self.0
            .iter_mut()
            .find(|(id, _)| id == member)
            .map(|(_, balance)| balance)
    }

    pub fn get(&self, member: &MemberId) -> Option<Money> {
        self.0
            .iter()
            .find(|(id, _)| id == member)
            .map(|(_, balance)| *balance)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MemberId, Money)> + '_ {
        self.0.iter().map(|(id, balance)| (id, *balance))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The sum of every entry. Zero for any vector the ledger hands out.
    ///
    /// Entries are summed as `i128` and the result saturates at the range of [`Money`], so large
    /// balances of opposite sign never overflow on the way to zero.
    pub fn total(&self) -> Money {
        let total: i128 = self
            .0
            .iter()
            .map(|(_, balance)| i128::from(balance.minor()))
            .sum();
        let clamped = total.clamp(i128::from(i64::MIN), i128::from(i64::MAX));
        Money::from_minor(clamped as i64)
    }

    /// True when nobody owes anybody anything.
    pub fn is_settled(&self) -> bool {
        self.0.iter().all(|(_, balance)| balance.is_zero())
    }

    /// Converts to display lines in `currency`, pairing each id with its member's display name.
    pub fn to_lines(&self, members: &[Member], currency: &Currency) -> Vec<BalanceLine> {
        self.iter()
            .map(|(id, balance)| BalanceLine {
                member: id.clone(),
                display_name: members
                    .iter()
                    .find(|m| m.id() == id)
                    .map(|m| m.display_name().to_string())
                    .unwrap_or_else(|| id.to_string()),
                balance: currency.to_amount(balance),
            })
            .collect()
    }
}

/// One row of a balance report at the display boundary.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BalanceLine {
    pub member: MemberId,
    pub display_name: String,
    pub balance: Amount,
}

impl BalanceLine {
    /// `"is owed"`, `"owes"` or `"is settled"`.
    pub fn position(&self) -> &'static str {
        if self.balance.is_positive() {
            "is owed"
        } else if self.balance.is_negative() {
            "owes"
        } else {
            "is settled"
        }
    }
}
