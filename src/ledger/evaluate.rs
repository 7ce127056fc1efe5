//! Split policy evaluation: turns an expense amount and its split policy into each member's owed
//! share.

use crate::error::LedgerError;
use crate::model::{Member, Money, Shares, SplitPolicy};

/// Computes every member's owed share of `amount` under `policy`, in member order.
///
/// For [`SplitPolicy::Equal`] each member gets `floor(amount / n)` minor units and the remainder is
/// handed out one minor unit at a time starting from the first member, so the shares always add up
/// to exactly `amount` and the same inputs always give the same shares.
///
/// For [`SplitPolicy::Exact`] the stored values are returned as they are.
///
/// # Errors
///
/// - `InvalidPolicy` if an equal split is requested over no members.
/// - `InvalidPolicy` if an exact split has no entry for a member, or has an entry for someone
///   who is not in `members`.
pub fn evaluate(
    amount: Money,
    policy: &SplitPolicy,
    members: &[Member],
) -> Result<Shares, LedgerError> {
    match policy {
        SplitPolicy::Equal => equal_shares(amount, members),
        SplitPolicy::Exact(values) => {
            let mut shares = Shares::with_capacity(members.len());
            for member in members {
                let share = values.get(member.id()).copied().ok_or_else(|| {
                    LedgerError::InvalidPolicy(format!(
                        "exact split has no entry for member '{}'",
                        member.id()
                    ))
                })?;
                shares.push(member.id().clone(), share);
            }
            if let Some(stray) = values.keys().find(|id| !members.iter().any(|m| m.id() == *id)) {
                return Err(LedgerError::InvalidPolicy(format!(
                    "exact split has an entry for '{stray}' who is not a member"
                )));
            }
            Ok(shares)
        }
    }
}

fn equal_shares(amount: Money, members: &[Member]) -> Result<Shares, LedgerError> {
    if members.is_empty() {
        return Err(LedgerError::InvalidPolicy(String::from(
            "an equal split needs at least one member",
        )));
    }

    let count = members.len() as i64;
    let total = amount.minor();
    let base = total.div_euclid(count);
    let remainder = total.rem_euclid(count) as usize;

    let mut shares = Shares::with_capacity(members.len());
    for (idx, member) in members.iter().enumerate() {
        let mut share = base;
        if idx < remainder {
            share += 1;
        }
        shares.push(member.id().clone(), Money::from_minor(share));
    }
    Ok(shares)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MemberId;
    use std::collections::BTreeMap;

    fn abc() -> Vec<Member> {
        vec![
            Member::new("alice", "Alice"),
            Member::new("bob", "Bob"),
            Member::new("charlie", "Charlie"),
        ]
    }

    fn minors(shares: &Shares) -> Vec<i64> {
        shares.iter().map(|(_, m)| m.minor()).collect()
    }

    #[test]
    fn test_equal_even() {
        let shares = evaluate(Money::from_minor(9000), &SplitPolicy::Equal, &abc()).unwrap();
        assert_eq!(minors(&shares), vec![3000, 3000, 3000]);
    }

    #[test]
    fn test_equal_remainder_goes_to_first_members() {
        let shares = evaluate(Money::from_minor(1000), &SplitPolicy::Equal, &abc()).unwrap();
        assert_eq!(minors(&shares), vec![334, 333, 333]);
        assert_eq!(shares.total(), Money::from_minor(1000));

        let shares = evaluate(Money::from_minor(1001), &SplitPolicy::Equal, &abc()).unwrap();
        assert_eq!(minors(&shares), vec![334, 334, 333]);
    }

    #[test]
    fn test_equal_smaller_than_member_count() {
        let shares = evaluate(Money::from_minor(2), &SplitPolicy::Equal, &abc()).unwrap();
        assert_eq!(minors(&shares), vec![1, 1, 0]);
    }

    #[test]
    fn test_equal_single_member() {
        let members = vec![Member::new("solo", "Solo")];
        let shares = evaluate(Money::from_minor(777), &SplitPolicy::Equal, &members).unwrap();
        assert_eq!(minors(&shares), vec![777]);
    }

    #[test]
    fn test_equal_is_deterministic() {
        let a = evaluate(Money::from_minor(100), &SplitPolicy::Equal, &abc()).unwrap();
        let b = evaluate(Money::from_minor(100), &SplitPolicy::Equal, &abc()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_equal_empty_members() {
        let err = evaluate(Money::from_minor(100), &SplitPolicy::Equal, &[]).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidPolicy(_)));
    }

    #[test]
    fn test_exact_passes_values_through_in_member_order() {
        let policy = SplitPolicy::Exact(BTreeMap::from([
            (MemberId::new("charlie"), Money::ZERO),
            (MemberId::new("alice"), Money::ZERO),
            (MemberId::new("bob"), Money::from_minor(3000)),
        ]));
        let shares = evaluate(Money::from_minor(3000), &policy, &abc()).unwrap();
        let ids: Vec<&str> = shares.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["alice", "bob", "charlie"]);
        assert_eq!(minors(&shares), vec![0, 3000, 0]);
    }

    #[test]
    fn test_exact_missing_member() {
        let policy = SplitPolicy::Exact(BTreeMap::from([
            (MemberId::new("alice"), Money::from_minor(1500)),
            (MemberId::new("bob"), Money::from_minor(1500)),
        ]));
        let err = evaluate(Money::from_minor(3000), &policy, &abc()).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidPolicy(msg) if msg.contains("charlie")));
    }

    #[test]
    fn test_exact_stray_entry() {
        let policy = SplitPolicy::Exact(BTreeMap::from([
            (MemberId::new("alice"), Money::from_minor(1000)),
            (MemberId::new("bob"), Money::from_minor(1000)),
            (MemberId::new("charlie"), Money::from_minor(1000)),
            (MemberId::new("dave"), Money::ZERO),
        ]));
        let err = evaluate(Money::from_minor(3000), &policy, &abc()).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidPolicy(msg) if msg.contains("dave")));
    }
}
