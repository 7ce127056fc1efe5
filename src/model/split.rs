//! Split policies: the rule that decides each member's owed share of one expense.

use crate::model::{Amount, MemberId, Money};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A split policy as submitted by a caller, with decimal values.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "shares", rename_all = "snake_case")]
pub enum DraftSplit {
    /// Divide the amount evenly across every member of the group.
    Equal,
    /// Each member owes exactly the given value. Every member must be listed.
    Exact(BTreeMap<MemberId, Amount>),
}

/// A validated split policy with values in minor units.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "shares", rename_all = "snake_case")]
pub enum SplitPolicy {
    Equal,
    Exact(BTreeMap<MemberId, Money>),
}

impl SplitPolicy {
    /// The share stored for `member` in an `Exact` split. `None` for `Equal` or if not present.
    pub fn exact_share(&self, member: &MemberId) -> Option<Money> {
        match self {
            SplitPolicy::Equal => None,
            SplitPolicy::Exact(shares) => shares.get(member).copied(),
        }
    }
}

/// The evaluated owed amount of each member for one expense, in group member order.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct Shares(Vec<(MemberId, Money)>);

impl Shares {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self(Vec::with_capacity(n))
    }

    pub(crate) fn push(&mut self, member: MemberId, share: Money) {
        self.0.push((member, share));
    }

    pub fn get(&self, member: &MemberId) -> Option<Money> {
        self.0
            .iter()
            .find(|(id, _)| id == member)
            .map(|(_, share)| *share)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MemberId, Money)> + '_ {
        self.0.iter().map(|(id, share)| (id, *share))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> Money {
        self.0.iter().map(|(_, share)| *share).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_draft_split_json_shape() {
        let equal: DraftSplit = serde_json::from_str(r#"{"kind":"equal"}"#).unwrap();
        assert_eq!(equal, DraftSplit::Equal);

        let exact: DraftSplit =
            serde_json::from_str(r#"{"kind":"exact","shares":{"alice":"0","bob":"30.00"}}"#)
                .unwrap();
        let DraftSplit::Exact(shares) = exact else {
            panic!("expected an exact split");
        };
        assert_eq!(
            shares.get(&MemberId::new("bob")).unwrap().value(),
            rust_decimal::Decimal::from_str("30.00").unwrap()
        );
    }

    #[test]
    fn test_exact_share() {
        let policy = SplitPolicy::Exact(BTreeMap::from([
            (MemberId::new("alice"), Money::ZERO),
            (MemberId::new("bob"), Money::from_minor(3000)),
        ]));
        assert_eq!(
            policy.exact_share(&MemberId::new("bob")),
            Some(Money::from_minor(3000))
        );
        assert_eq!(policy.exact_share(&MemberId::new("carol")), None);
        assert_eq!(SplitPolicy::Equal.exact_share(&MemberId::new("bob")), None);
    }
}
