//! Expense validation: checks a draft against its group and converts it to minor units.

use crate::error::{SplitProblem, ValidationError};
use crate::model::{Amount, Currency, DraftSplit, ExpenseDraft, Group, MemberId, Money};
use crate::model::{SplitPolicy, ValidatedExpense};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Validates `draft` against `group`, returning the expense in minor units.
///
/// Checks run in this order and the first failure is returned:
/// 1. The amount is greater than zero, has no more decimal places than the currency's minor unit,
///    and fits in the ledger.
/// 2. The payer is a member of the group.
/// 3. For an exact split: every member has an entry of zero or more that fits in the ledger, no
///    entry names a non-member, and the entries add up to the amount within half a minor unit.
/// 4. For an equal split: the group has at least one member. Since the payer must be a member,
///    this only guards against a payer check being skipped; through `validate` an empty group is
///    reported as `UnknownPayer`.
///
/// Exact split values with more digits than the currency's minor unit are rounded half-to-even. If
/// that rounding leaves the split a few minor units away from the amount, the difference is spread
/// one minor unit at a time across the members in group order so that the stored split is exact.
pub fn validate(draft: &ExpenseDraft, group: &Group) -> Result<ValidatedExpense, ValidationError> {
    let currency = group.currency();
    let value = draft.amount.value();
    if value <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount { amount: value });
    }
    if value.normalize().scale() > currency.minor_digits() {
        return Err(ValidationError::ExcessPrecision {
            amount: value,
            minor_digits: currency.minor_digits(),
        });
    }
    let amount = to_money(currency, value)?;

    if !group.has_member(&draft.paid_by) {
        return Err(ValidationError::UnknownPayer {
            payer: draft.paid_by.clone(),
        });
    }

    let split = match &draft.split {
        DraftSplit::Exact(values) => validate_exact(amount, values, group)?,
        DraftSplit::Equal => {
            if group.members().is_empty() {
                return Err(ValidationError::EmptyGroup);
            }
            SplitPolicy::Equal
        }
    };

    Ok(ValidatedExpense::new(
        draft.description.trim().to_string(),
        amount,
        draft.paid_by.clone(),
        draft.date,
        split,
    ))
}

fn to_money(currency: &Currency, value: Decimal) -> Result<Money, ValidationError> {
    currency
        .to_money(value)
        .ok_or(ValidationError::AmountOutOfRange { amount: value })
}

fn validate_exact(
    amount: Money,
    values: &BTreeMap<MemberId, Amount>,
    group: &Group,
) -> Result<SplitPolicy, ValidationError> {
    for member in group.members() {
        match values.get(member.id()) {
            None => {
                return Err(ValidationError::IncompleteSplit {
                    member: member.id().clone(),
                    problem: SplitProblem::Missing,
                })
            }
            Some(value) if value.is_negative() => {
                return Err(ValidationError::IncompleteSplit {
                    member: member.id().clone(),
                    problem: SplitProblem::Negative,
                })
            }
            Some(value) => {
                to_money(group.currency(), value.value())?;
            }
        }
    }
    if let Some(stray) = values.keys().find(|id| !group.has_member(id)) {
        return Err(ValidationError::IncompleteSplit {
            member: stray.clone(),
            problem: SplitProblem::NotAMember,
        });
    }

    let currency = group.currency();
    let mut sum = Decimal::ZERO;
    for value in values.values().map(Amount::value) {
        sum = sum
            .checked_add(value)
            .ok_or(ValidationError::AmountOutOfRange { amount: value })?;
    }
    let discrepancy = currency.to_decimal(amount) - sum;
    if discrepancy.abs() >= currency.half_minor_unit() {
        return Err(ValidationError::SplitMismatch { discrepancy });
    }

    // Walk members in group order so that reconciliation is deterministic.
    let mut shares = Vec::with_capacity(group.members().len());
    for member in group.members() {
        let value = values
            .get(member.id())
            .map(Amount::value)
            .unwrap_or_default();
        shares.push((member.id().clone(), value, to_money(currency, value)?));
    }
    reconcile(amount, &mut shares);

    Ok(SplitPolicy::Exact(
        shares
            .into_iter()
            .map(|(id, _, share)| (id, share))
            .collect(),
    ))
}

/// Nudges rounded shares one minor unit at a time until they add up to `amount`. Units are added to
/// members whose stated value was above zero and taken from members whose rounded share is above
/// zero, so no share goes negative and a member who owes nothing keeps owing nothing.
fn reconcile(amount: Money, shares: &mut [(MemberId, Decimal, Money)]) {
    let mut residual = amount - shares.iter().map(|(_, _, share)| *share).sum::<Money>();
    let unit = Money::from_minor(1);
    while !residual.is_zero() {
        let before = residual;
        for (_, value, share) in shares.iter_mut() {
            if residual.is_positive() && *value > Decimal::ZERO {
                *share += unit;
                residual -= unit;
            } else if residual.is_negative() && share.is_positive() {
                *share -= unit;
                residual += unit;
            }
            if residual.is_zero() {
                break;
            }
        }
        if residual == before {
            // Nothing eligible; only reachable if every stated value is zero, which the sum
            // check already rules out for a positive amount.
            break;
        }
    }
}
