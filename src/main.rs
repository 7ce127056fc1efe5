use clap::Parser;
use group_ledger::args::{Args, Command, ExpenseSubcommand, GroupSubcommand, MemberSubcommand};
use group_ledger::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().ledger_home().path();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init(init_args) => commands::init(home, init_args).await?.print(),

        Command::Group(group_args) => {
            let config = Config::load(home).await?;
            match group_args.action() {
                GroupSubcommand::Create(args) => {
                    commands::group_create(config, args).await?.print()
                }
                GroupSubcommand::Show(args) => commands::group_show(config, args).await?.print(),
                GroupSubcommand::List => commands::group_list(config).await?.print(),
            }
        }

        Command::Member(member_args) => {
            let config = Config::load(home).await?;
            match member_args.action() {
                MemberSubcommand::Add(args) => commands::member_add(config, args).await?.print(),
                MemberSubcommand::Remove(args) => {
                    commands::member_remove(config, args).await?.print()
                }
            }
        }

        Command::Expense(expense_args) => {
            let config = Config::load(home).await?;
            match expense_args.action() {
                ExpenseSubcommand::Add(args) => commands::expense_add(config, args).await?.print(),
                ExpenseSubcommand::Update(args) => {
                    commands::expense_update(config, args).await?.print()
                }
                ExpenseSubcommand::Remove(args) => {
                    commands::expense_remove(config, args).await?.print()
                }
                ExpenseSubcommand::List(args) => {
                    commands::expense_list(config, args).await?.print()
                }
            }
        }

        Command::Balances(balances_args) => {
            let config = Config::load(home).await?;
            commands::balances(config, balances_args).await?.print()
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => default_filter(level),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Enables `level` for the library and for this binary only. Their crate names differ, so each
/// needs its own directive.
fn default_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::new(format!(
        "{}={},{}={}",
        group_ledger::CRATE_NAME,
        level,
        env!("CARGO_CRATE_NAME"),
        level
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use group_ledger::commands::Out;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn printed(level: LevelFilter) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(default_filter(level))
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            Out::<()>::new_message("Everyone in 'trip' is settled").print();
        });
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_default_filter_prints_command_output() {
        let output = printed(LevelFilter::INFO);
        assert!(output.contains("Everyone in 'trip' is settled"), "{output}");
        assert!(output.contains("group_ledger::commands"), "{output}");
    }

    #[test]
    fn test_default_filter_respects_level() {
        assert!(printed(LevelFilter::WARN).is_empty());
    }
}
