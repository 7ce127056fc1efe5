use crate::args::InitArgs;
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::model::{Currency, MAX_MINOR_DIGITS};
use crate::{Config, Result};
use anyhow::{anyhow, Context};
use std::path::Path;

/// Creates the data directory, its `groups` subdirectory and an initial `config.json` holding the
/// currency that new groups are created with.
///
/// # Arguments
/// - `ledger_home` - The directory that will be the root of data directory, e.g. `$HOME/ledger`
/// - `args` - The currency code and its number of minor-unit digits.
///
/// # Errors
/// - Returns an error if the currency has too many minor digits.
/// - Returns an error if a ledger already exists at `ledger_home` or any file operations fail.
pub async fn init(ledger_home: &Path, args: &InitArgs) -> Result<Out<Currency>> {
    let currency = Currency::new(args.currency(), args.minor_digits())
        .ok_or_else(|| {
            anyhow!(
                "A currency may have at most {MAX_MINOR_DIGITS} minor digits, got {}",
                args.minor_digits()
            )
        })
        .pub_result(ErrorType::Config)?;
    let config = Config::create(ledger_home, currency.clone())
        .await
        .context("Unable to create the data directory and configs")
        .pub_result(ErrorType::Config)?;
    Ok(Out::new(
        format!(
            "Successfully created the ledger directory at {} using {}",
            config.root().display(),
            currency.code()
        ),
        currency,
    ))
}
