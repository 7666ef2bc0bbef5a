//! Command-line surface.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use hissab_shared::amount::parse_major;
use hissab_shared::{MinorUnits, TransactionKind};

/// hissab - personal finance ledger
#[derive(Parser, Debug)]
#[command(name = "hissab")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path of the database file (overrides HISSAB_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Log filter (trace, debug, info, warn, error or a full directive)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    // === Account ===
    /// Create an account and log in
    Signup(SignupArgs),

    /// Log in to an existing account
    Login {
        username: String,

        #[arg(long, env = "HISSAB_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the logged-in account
    Logout,

    /// Show the logged-in account and its settings
    Whoami,

    /// Reset the password of the account registered with an email
    ResetPassword {
        email: String,

        #[arg(long, env = "HISSAB_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(long)]
        confirm: String,
    },

    /// Check a recovery answer
    Recover { username: String, answer: String },

    /// Set or clear the avatar URI
    Avatar {
        /// Omit to clear
        uri: Option<String>,
    },

    // === Onboarding & settings ===
    /// List supported currencies, or switch to one
    Currency {
        /// ISO code, e.g. EUR
        code: Option<String>,
    },

    /// Suggested expense categories and income sources
    Categories {
        /// Only list suggestions for income or expense
        #[arg(long)]
        kind: Option<TransactionKind>,
    },

    /// Record the starting balance and finish setup
    Onboard {
        #[arg(value_parser = parse_major)]
        opening_balance: MinorUnits,
    },

    /// Wipe transactions, budgets and settings, then log out
    Reset {
        /// Required, the reset cannot be undone
        #[arg(long)]
        yes: bool,
    },

    // === Transactions ===
    /// Record a transaction
    Add(AddArgs),

    /// Change fields of a transaction
    Edit(EditArgs),

    /// Delete a transaction
    #[command(alias = "rm")]
    Delete { id: String },

    /// List transactions, optionally filtered by text
    #[command(alias = "ls")]
    List {
        /// Matched against description and category
        query: Option<String>,
    },

    /// Delete every transaction
    Clear {
        #[arg(long)]
        yes: bool,
    },

    // === Budgets ===
    #[command(subcommand)]
    Budget(BudgetCommand),

    // === Analytics ===
    /// Totals, breakdown, trend and cash flow for a date range
    Analytics {
        /// Defaults to the first of the current month
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Defaults to today
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Balance, this month's totals and recent transactions
    Dashboard,

    /// Report for the current month
    Report,

    /// Look for inconsistencies in stored data
    Check,

    /// Financial health score for the current month
    Health,

    /// Recommendations based on this month's spending and budgets
    Advice,

    /// Today's spending, remaining daily budget and large expenses
    Today,

    /// This month against the previous one
    Compare,

    // === Backup ===
    /// Write a backup of the logged-in account
    Export {
        /// Defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Merge a backup into the logged-in account
    Import { path: PathBuf },

    /// Write the logged-in account's transactions as CSV
    ExportCsv {
        /// Defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Add transactions from a CSV file, skipping duplicates and bad rows
    ImportCsv { path: PathBuf },
}

#[derive(Args, Debug)]
pub struct SignupArgs {
    pub username: String,
    pub email: String,

    #[arg(long, env = "HISSAB_PASSWORD", hide_env_values = true)]
    pub password: String,

    #[arg(long, requires = "recovery_answer")]
    pub recovery_question: Option<String>,

    #[arg(long, requires = "recovery_question")]
    pub recovery_answer: Option<String>,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// income or expense
    pub kind: TransactionKind,

    #[arg(value_parser = parse_major)]
    pub amount: MinorUnits,

    pub category: String,

    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    pub id: String,

    #[arg(long)]
    pub kind: Option<TransactionKind>,

    #[arg(long, value_parser = parse_major)]
    pub amount: Option<MinorUnits>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
pub enum BudgetCommand {
    /// Create or replace the budget of a category
    Set {
        category: String,

        #[arg(value_parser = parse_major)]
        monthly: MinorUnits,

        #[arg(long, value_parser = parse_major)]
        yearly: Option<MinorUnits>,
    },

    /// Delete the budget of a category
    #[command(alias = "rm")]
    Remove { category: String },

    /// Usage of every budget this month and year
    #[command(alias = "ls")]
    List,

    /// Budgets at warning level or over
    Alerts,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_amounts_are_validated() {
        let parse = |amount: &str| Cli::try_parse_from(["hissab", "add", "income", amount, "Gift"]);
        assert!(parse("12.5").is_ok());
        assert!(parse("1,000").is_ok());
        assert!(parse("-5").is_err());
        assert!(parse("1.234").is_err());
        assert!(parse("1000000000000.01").is_err());
        assert!(parse("99999999999999999999").is_err());
    }

    #[test]
    fn test_parse_csv_commands() {
        let cli = Cli::try_parse_from(["hissab", "export-csv", "-o", "out.csv"]).unwrap();
        assert!(matches!(cli.command, Command::ExportCsv { output: Some(_) }));

        let cli = Cli::try_parse_from(["hissab", "categories", "--kind", "income"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Categories { kind: Some(TransactionKind::Income) }
        ));
    }

    #[test]
    fn test_parse_add_command() {
        let cli = Cli::try_parse_from([
            "hissab", "add", "expense", "38", "Food", "-d", "Groceries", "--date", "2024-06-02",
        ])
        .unwrap();
        let Command::Add(args) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.kind, TransactionKind::Expense);
        assert_eq!(args.amount, 3_800);
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2024, 6, 2));
    }
}
