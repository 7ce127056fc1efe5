use crate::args::GroupRefArgs;
use crate::commands::{checked, load_ledger, show_money, Out};
use crate::model::BalanceLine;
use crate::{Config, Result};
use std::fmt::Write;

/// Derives every member's balance from the group's expenses. Positive means the member is owed.
pub async fn balances(config: Config, args: &GroupRefArgs) -> Result<Out<Vec<BalanceLine>>> {
    let ledger = load_ledger(&config, args.group()).await?;
    let currency = ledger.group().currency();
    let vector = checked(ledger.balances())?;

    let mut message = if vector.is_settled() {
        format!("Everyone in '{}' is settled", args.group())
    } else {
        format!("Balances for '{}'", args.group())
    };
    let lines = vector.to_lines(ledger.members(), currency);
    for (line, (_, balance)) in lines.iter().zip(vector.iter()) {
        let _ = write!(
            message,
            "\n  {} {} {}",
            line.display_name,
            line.position(),
            show_money(currency, balance.abs())
        );
    }
    Ok(Out::new(message, lines))
}
