//! These structs provide the CLI interface for the ledger CLI.

use crate::model::{Amount, DraftSplit, ExpenseDraft, MemberId};
use anyhow::anyhow;
use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// ledger: keep track of shared expenses within a group.
///
/// Record who paid for what and how each expense is split, and the ledger tells you how much each
/// member is owed or owes. Balances are always recomputed from the recorded expenses and always
/// add up to zero.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the ledger home directory and its configuration file.
    Init(InitArgs),
    /// Create, show or list groups.
    Group(GroupArgs),
    /// Add or remove members of a group.
    Member(MemberArgs),
    /// Add, update, remove or list the expenses of a group.
    Expense(ExpenseArgs),
    /// Show how much each member of a group is owed or owes.
    Balances(GroupRefArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where ledger data and configuration is held. Defaults to ~/ledger
    #[arg(long, env = "LEDGER_HOME", default_value_t = default_ledger_home())]
    ledger_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, ledger_home: PathBuf) -> Self {
        Self {
            log_level,
            ledger_home: ledger_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn ledger_home(&self) -> &DisplayPath {
        &self.ledger_home
    }
}

/// Args for the `ledger init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The code of the ledger currency, used for display only.
    #[arg(long, default_value = "USD")]
    currency: String,

    /// The number of decimal digits in the currency's minor unit, e.g. 2 for cents.
    #[arg(long, default_value_t = 2)]
    minor_digits: u32,
}

impl InitArgs {
    pub fn new(currency: impl Into<String>, minor_digits: u32) -> Self {
        Self {
            currency: currency.into(),
            minor_digits,
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn minor_digits(&self) -> u32 {
        self.minor_digits
    }
}

/// Args naming a single group.
#[derive(Debug, Parser, Clone)]
pub struct GroupRefArgs {
    /// The group id.
    group: String,
}

impl GroupRefArgs {
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }
}

#[derive(Debug, ClapArgs, Clone)]
pub struct GroupArgs {
    #[command(subcommand)]
    action: GroupSubcommand,
}

impl GroupArgs {
    pub fn action(&self) -> &GroupSubcommand {
        &self.action
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum GroupSubcommand {
    /// Create a new, empty group.
    Create(CreateGroupArgs),
    /// Show a group's members and expenses.
    Show(GroupRefArgs),
    /// List every group.
    List,
}

#[derive(Debug, Parser, Clone)]
pub struct CreateGroupArgs {
    /// The id of the new group. Used as its file name.
    id: String,

    /// A human readable name. Defaults to the id.
    #[arg(long)]
    name: Option<String>,
}

impl CreateGroupArgs {
    pub fn new(id: impl Into<String>, name: Option<String>) -> Self {
        Self {
            id: id.into(),
            name,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, ClapArgs, Clone)]
pub struct MemberArgs {
    #[command(subcommand)]
    action: MemberSubcommand,
}

impl MemberArgs {
    pub fn action(&self) -> &MemberSubcommand {
        &self.action
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum MemberSubcommand {
    /// Add a member to a group.
    Add(AddMemberArgs),
    /// Remove a member who has no expense history from a group.
    Remove(RemoveMemberArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct AddMemberArgs {
    /// The group id.
    group: String,

    /// The new member's id, unique within the group.
    id: String,

    /// The name to display. Defaults to the id.
    #[arg(long)]
    name: Option<String>,
}

impl AddMemberArgs {
    pub fn new(group: impl Into<String>, id: impl Into<String>, name: Option<String>) -> Self {
        Self {
            group: group.into(),
            id: id.into(),
            name,
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Parser, Clone)]
pub struct RemoveMemberArgs {
    /// The group id.
    group: String,

    /// The id of the member to remove.
    id: String,
}

impl RemoveMemberArgs {
    pub fn new(group: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            id: id.into(),
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, ClapArgs, Clone)]
pub struct ExpenseArgs {
    #[command(subcommand)]
    action: ExpenseSubcommand,
}

impl ExpenseArgs {
    pub fn action(&self) -> &ExpenseSubcommand {
        &self.action
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ExpenseSubcommand {
    /// Record a new expense.
    Add(AddExpenseArgs),
    /// Replace an expense. Every field must be given again.
    Update(UpdateExpenseArgs),
    /// Delete an expense.
    Remove(RemoveExpenseArgs),
    /// List the expenses of a group.
    List(GroupRefArgs),
}

/// The fields of an expense. Without any `--exact` the expense is split equally across every
/// member of the group.
#[derive(Debug, ClapArgs, Clone)]
pub struct DraftArgs {
    /// What the expense was for.
    #[arg(long, default_value = "")]
    description: String,

    /// The total amount, e.g. 90 or $1,250.00
    #[arg(long, allow_hyphen_values = true)]
    amount: Amount,

    /// The id of the member who paid.
    #[arg(long)]
    paid_by: String,

    /// The date of the expense, YYYY-MM-DD.
    #[arg(long)]
    date: NaiveDate,

    /// An exact share as member=amount. Repeat for every member of the group.
    #[arg(long = "exact", value_name = "MEMBER=AMOUNT")]
    exact: Vec<ExactShare>,
}

impl DraftArgs {
    pub fn new(
        description: impl Into<String>,
        amount: Amount,
        paid_by: impl Into<String>,
        date: NaiveDate,
        exact: Vec<ExactShare>,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            paid_by: paid_by.into(),
            date,
            exact,
        }
    }

    /// Builds the draft expense. Repeated `--exact` entries for one member are added together.
    ///
    /// # Errors
    /// Returns an error if the repeated entries for a member add up to more than a decimal can hold.
    pub fn to_draft(&self) -> crate::Result<ExpenseDraft> {
        let split = if self.exact.is_empty() {
            DraftSplit::Equal
        } else {
            let mut shares: BTreeMap<MemberId, Amount> = BTreeMap::new();
            for share in &self.exact {
                let entry = shares.entry(share.member.clone()).or_default();
                let total = entry
                    .value()
                    .checked_add(share.amount.value())
                    .ok_or_else(|| {
                        anyhow!("the --exact entries for '{}' are too large", share.member)
                    })?;
                *entry = Amount::new(total);
            }
            DraftSplit::Exact(shares)
        };
        Ok(ExpenseDraft {
            description: self.description.clone(),
            amount: self.amount,
            paid_by: MemberId::new(&self.paid_by),
            date: self.date,
            split,
        })
    }
}

#[derive(Debug, Parser, Clone)]
pub struct AddExpenseArgs {
    /// The group id.
    group: String,

    #[command(flatten)]
    draft: DraftArgs,
}

impl AddExpenseArgs {
    pub fn new(group: impl Into<String>, draft: DraftArgs) -> Self {
        Self {
            group: group.into(),
            draft,
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn draft(&self) -> &DraftArgs {
        &self.draft
    }
}

#[derive(Debug, Parser, Clone)]
pub struct UpdateExpenseArgs {
    /// The group id.
    group: String,

    /// The id of the expense to replace.
    expense: String,

    #[command(flatten)]
    draft: DraftArgs,
}

impl UpdateExpenseArgs {
    pub fn new(group: impl Into<String>, expense: impl Into<String>, draft: DraftArgs) -> Self {
        Self {
            group: group.into(),
            expense: expense.into(),
            draft,
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn expense(&self) -> &str {
        &self.expense
    }

    pub fn draft(&self) -> &DraftArgs {
        &self.draft
    }
}

#[derive(Debug, Parser, Clone)]
pub struct RemoveExpenseArgs {
    /// The group id.
    group: String,

    /// The id of the expense to delete.
    expense: String,
}

impl RemoveExpenseArgs {
    pub fn new(group: impl Into<String>, expense: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            expense: expense.into(),
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn expense(&self) -> &str {
        &self.expense
    }
}

/// One `--exact member=amount` entry.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ExactShare {
    member: MemberId,
    amount: Amount,
}

impl ExactShare {
    pub fn new(member: impl Into<MemberId>, amount: Amount) -> Self {
        Self {
            member: member.into(),
            amount,
        }
    }
}

impl FromStr for ExactShare {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (member, amount) = s
            .split_once('=')
            .ok_or_else(|| format!("expected MEMBER=AMOUNT, got '{s}'"))?;
        let member = member.trim();
        if member.is_empty() {
            return Err(format!("missing member in '{s}'"));
        }
        let amount = Amount::from_str(amount).map_err(|e| format!("bad amount in '{s}': {e}"))?;
        Ok(Self::new(member, amount))
    }
}

fn default_ledger_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("ledger"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --ledger-home or LEDGER_HOME instead of relying on the default \
                ledger home directory.",
            );
            PathBuf::from("ledger")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
