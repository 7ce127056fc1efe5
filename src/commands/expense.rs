use crate::args::{AddExpenseArgs, GroupRefArgs, RemoveExpenseArgs, UpdateExpenseArgs};
use crate::commands::{checked, load_ledger, save_ledger, show_money, Out};
use crate::error::{ErrorType, IntoResult};
use crate::model::{Expense, ExpenseId};
use crate::{Config, Result};
use std::fmt::Write;

/// Validates and records a new expense. Nothing is saved if validation fails.
pub async fn expense_add(config: Config, args: &AddExpenseArgs) -> Result<Out<Expense>> {
    let mut ledger = load_ledger(&config, args.group()).await?;
    let draft = args.draft().to_draft().pub_result(ErrorType::Validation)?;
    let expense = checked(ledger.add_expense(&draft))?;
    save_ledger(&config, &ledger).await?;
    Ok(Out::new(
        format!(
            "Added expense {} of {} paid by {}",
            expense.id(),
            show_money(ledger.group().currency(), expense.amount()),
            expense.paid_by()
        ),
        expense,
    ))
}

/// Replaces an expense with a newly validated one under the same id.
pub async fn expense_update(config: Config, args: &UpdateExpenseArgs) -> Result<Out<Expense>> {
    let mut ledger = load_ledger(&config, args.group()).await?;
    let id = ExpenseId::new(args.expense());
    let draft = args.draft().to_draft().pub_result(ErrorType::Validation)?;
    let expense = checked(ledger.update_expense(&id, &draft))?;
    save_ledger(&config, &ledger).await?;
    Ok(Out::new(format!("Updated expense {id}"), expense))
}

/// Deletes an expense.
pub async fn expense_remove(config: Config, args: &RemoveExpenseArgs) -> Result<Out<Expense>> {
    let mut ledger = load_ledger(&config, args.group()).await?;
    let expense = checked(ledger.remove_expense(&ExpenseId::new(args.expense())))?;
    save_ledger(&config, &ledger).await?;
    Ok(Out::new(
        format!("Removed expense {}", expense.id()),
        expense,
    ))
}

/// Lists a group's expenses in the order they were recorded.
pub async fn expense_list(config: Config, args: &GroupRefArgs) -> Result<Out<Vec<Expense>>> {
    let ledger = load_ledger(&config, args.group()).await?;
    let currency = ledger.group().currency();
    let mut message = format!(
        "Group '{}' has {} expenses",
        args.group(),
        ledger.expenses().len()
    );
    for expense in ledger.expenses() {
        let _ = write!(
            message,
            "\n  {} {} {} paid by {}: {}",
            expense.id(),
            expense.date(),
            show_money(currency, expense.amount()),
            expense.paid_by(),
            expense.description()
        );
    }
    let expenses = ledger.expenses().to_vec();
    Ok(Out::new(message, expenses))
}
