//! Types that represent the ledger's data model, such as `Group`, `Expense` and `Money`.
mod amount;
mod balance;
mod currency;
mod expense;
mod group;
mod member;
mod money;
mod split;

pub use amount::{Amount, AmountError, AmountFormat};
pub use balance::{BalanceLine, BalanceVector};
pub use currency::{Currency, MAX_MINOR_DIGITS};
pub use expense::{Expense, ExpenseDraft, ExpenseId, ValidatedExpense};
pub use group::{Group, GroupId};
pub use member::{Member, MemberId};
pub use money::Money;
pub use split::{DraftSplit, Shares, SplitPolicy};
