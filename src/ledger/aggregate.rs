//! Folds a group's expenses into a per-member balance vector.

use crate::error::LedgerError;
use crate::ledger::evaluate;
use crate::model::{BalanceVector, Member, ValidatedExpense};
use tracing::{error, trace};

/// Computes every member's balance from `expenses`.
///
/// Each expense credits its payer with the full amount and debits each member with their share.
/// The fold is commutative, so the order of `expenses` never changes the result.
///
/// # Errors
///
/// Returns an error if an expense refers to a member that is not in `members`, if its split
/// policy cannot be evaluated over `members`, or if a member's balance leaves the range of
/// [`Money`](crate::model::Money).
///
/// # Panics
///
/// Panics if the resulting balances do not sum to zero. That can only happen through a defect in
/// split evaluation and the balances would be wrong, so they are never returned.
pub fn aggregate<'a, I>(expenses: I, members: &[Member]) -> Result<BalanceVector, LedgerError>
where
    I: IntoIterator<Item = &'a ValidatedExpense>,
{
    let mut balances = BalanceVector::zeroed(members);

    for expense in expenses {
        let shares = evaluate(expense.amount(), expense.split(), members)?;

        let payer = balances
            .entry_mut(expense.paid_by())
            .ok_or_else(|| LedgerError::MemberNotFound(expense.paid_by().clone()))?;
        *payer = payer
            .checked_add(expense.amount())
            .ok_or_else(|| LedgerError::BalanceOverflow(expense.paid_by().clone()))?;

        for (member, share) in shares.iter() {
            let balance = balances
                .entry_mut(member)
                .ok_or_else(|| LedgerError::MemberNotFound(member.clone()))?;
            *balance = balance
                .checked_sub(share)
                .ok_or_else(|| LedgerError::BalanceOverflow(member.clone()))?;
        }
        trace!(
            "Applied '{}' paid by {} for {}",
            expense.description(),
            expense.paid_by(),
            expense.amount()
        );
    }

    let total = balances.total();
    if !total.is_zero() {
        error!("Balances do not sum to zero (off by {total} minor units): {balances:?}");
        panic!("ledger invariant violated: balances sum to {total} minor units instead of zero");
    }
    Ok(balances)
}
