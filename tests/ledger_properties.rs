use chrono::NaiveDate;
use group_ledger::ledger::evaluate;
use group_ledger::model::{
    Amount, Currency, DraftSplit, ExpenseDraft, Group, Member, MemberId, Money, SplitPolicy,
};
use group_ledger::GroupLedger;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

fn members(count: usize) -> Vec<Member> {
    (0..count)
        .map(|idx| Member::new(format!("m{idx}"), format!("Member {idx}")))
        .collect()
}

fn ledger(count: usize) -> GroupLedger {
    let mut ledger = GroupLedger::new(Group::new("props", "Props", Currency::default()));
    for member in members(count) {
        ledger.add_member(member).unwrap();
    }
    ledger
}

fn cents(minor: i64) -> Amount {
    Amount::new(Decimal::new(minor, 2))
}

/// Builds a draft of `minor` cents paid by member `payer`. With `weights` the amount is cut into
/// exact shares in proportion to them; otherwise it is split equally.
fn draft(minor: i64, payer: usize, weights: Option<&[u32]>) -> ExpenseDraft {
    let split = match weights {
        None => DraftSplit::Equal,
        Some(weights) => {
            let total: i64 = weights.iter().map(|w| i64::from(*w)).sum();
            let mut cuts: Vec<i64> = weights
                .iter()
                .map(|w| {
                    if total == 0 {
                        0
                    } else {
                        minor * i64::from(*w) / total
                    }
                })
                .collect();
            let assigned: i64 = cuts.iter().sum();
            cuts[0] += minor - assigned;
            DraftSplit::Exact(
                cuts.iter()
                    .enumerate()
                    .map(|(idx, cut)| (MemberId::new(format!("m{idx}")), cents(*cut)))
                    .collect::<BTreeMap<_, _>>(),
            )
        }
    };
    ExpenseDraft {
        description: String::from("generated"),
        amount: cents(minor),
        paid_by: MemberId::new(format!("m{payer}")),
        date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        split,
    }
}

/// (amount in cents, payer index, exact weights or equal) for a group of `count` members.
fn expenses(count: usize) -> impl Strategy<Value = Vec<(i64, usize, Option<Vec<u32>>)>> {
    prop::collection::vec(
        (
            1i64..=1_000_000,
            0..count,
            prop::option::of(prop::collection::vec(0u32..=100, count)),
        ),
        0..=20,
    )
}

fn group_and_expenses() -> impl Strategy<Value = (usize, Vec<(i64, usize, Option<Vec<u32>>)>)> {
    (1usize..=6).prop_flat_map(|count| (Just(count), expenses(count)))
}

proptest! {
    #[test]
    fn balances_sum_to_zero((count, generated) in group_and_expenses()) {
        let mut ledger = ledger(count);
        let mut paid = Money::ZERO;
        for (minor, payer, weights) in &generated {
            ledger.add_expense(&draft(*minor, *payer, weights.as_deref())).unwrap();
            paid += Money::from_minor(*minor);
        }
        let balances = ledger.balances().unwrap();
        prop_assert_eq!(balances.len(), count);
        prop_assert_eq!(balances.total(), Money::ZERO);

        let owed: Money = balances.iter().map(|(_, b)| b).filter(|b| b.is_positive()).sum();
        prop_assert!(owed <= paid);
    }

    #[test]
    fn balances_ignore_expense_order(
        (count, generated, shuffled) in group_and_expenses().prop_flat_map(|(count, generated)| {
            let shuffled = Just(generated.clone()).prop_shuffle();
            (Just(count), Just(generated), shuffled)
        })
    ) {
        let mut forward = ledger(count);
        for (minor, payer, weights) in &generated {
            forward.add_expense(&draft(*minor, *payer, weights.as_deref())).unwrap();
        }
        let mut reordered = ledger(count);
        for (minor, payer, weights) in &shuffled {
            reordered.add_expense(&draft(*minor, *payer, weights.as_deref())).unwrap();
        }
        prop_assert_eq!(forward.balances().unwrap(), reordered.balances().unwrap());
    }

    #[test]
    fn equal_split_is_exact_and_fair(minor in -1_000_000i64..=1_000_000, count in 1usize..=12) {
        let members = members(count);
        let shares = evaluate(Money::from_minor(minor), &SplitPolicy::Equal, &members).unwrap();
        prop_assert_eq!(shares.total(), Money::from_minor(minor));

        let values: Vec<i64> = shares.iter().map(|(_, share)| share.minor()).collect();
        let base = minor.div_euclid(count as i64);
        for (idx, value) in values.iter().enumerate() {
            let expected = if (idx as i64) < minor.rem_euclid(count as i64) { base + 1 } else { base };
            prop_assert_eq!(*value, expected);
        }
    }

    #[test]
    fn removing_every_expense_settles_the_group((count, generated) in group_and_expenses()) {
        let mut ledger = ledger(count);
        let mut ids = Vec::new();
        for (minor, payer, weights) in &generated {
            let expense = ledger.add_expense(&draft(*minor, *payer, weights.as_deref())).unwrap();
            ids.push(expense.id().clone());
        }
        for id in &ids {
            ledger.remove_expense(id).unwrap();
        }
        prop_assert!(ledger.balances().unwrap().is_settled());
    }
}
