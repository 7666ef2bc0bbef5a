//! Maps parsed sub-commands onto `hissab-client` calls and prints results.

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context as _};
use chrono::NaiveDate;
use hissab_analytics::{format_amount, DateRange};
use hissab_client::commands::{analytics, backup, budgets, identity, settings, transactions};
use hissab_client::Session;
use hissab_shared::crypto::Argon2Hasher;
use hissab_shared::{currency, Transaction, TransactionKind, TransactionPatch};
use hissab_store::{BackupPayload, KeyValueStore};
use serde::Serialize;

use crate::cli::{AddArgs, BudgetCommand, Command, EditArgs, SignupArgs};

pub struct RunOptions {
    pub today: NaiveDate,
    pub json: bool,
    pub recent_limit: usize,
}

/// Print `value` as pretty JSON in `--json` mode, otherwise through `human`.
fn emit<T, F>(out: &mut dyn Write, opts: &RunOptions, value: &T, human: F) -> anyhow::Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
{
    if opts.json {
        serde_json::to_writer_pretty(&mut *out, value)?;
        writeln!(out)?;
    } else {
        human(out)?;
    }
    Ok(())
}

fn transaction_line(tx: &Transaction, symbol: &str) -> String {
    let description = if tx.description.is_empty() {
        "-"
    } else {
        tx.description.as_str()
    };
    format!(
        "{}  {:<7}  {:<16}  {:<24}  {:>14}  {}",
        tx.date,
        tx.kind,
        tx.category,
        description,
        format_amount(tx.signed_amount(), symbol),
        tx.id
    )
}

pub fn run<K: KeyValueStore>(
    session: &mut Session<K>,
    command: Command,
    opts: &RunOptions,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let symbol = session.settings().symbol.clone();

    match command {
        // === Account ===
        Command::Signup(args) => signup(session, args, out),
        Command::Login { username, password } => {
            identity::log_in(session, &Argon2Hasher::new(), &username, &password)?;
            writeln!(out, "Logged in as {username}")?;
            Ok(())
        }
        Command::Logout => {
            identity::log_out(session)?;
            writeln!(out, "Logged out")?;
            Ok(())
        }
        Command::Whoami => {
            #[derive(Serialize)]
            struct WhoAmI<'a> {
                username: Option<&'a str>,
                settings: &'a hissab_shared::UserSettings,
            }
            let who = WhoAmI {
                username: session.username(),
                settings: session.settings(),
            };
            emit(out, opts, &who, |out| match who.username {
                Some(username) => writeln!(
                    out,
                    "{username} ({} {}, setup {})",
                    who.settings.currency,
                    who.settings.symbol,
                    if who.settings.setup_complete { "complete" } else { "pending" }
                ),
                None => writeln!(out, "Not logged in"),
            })
        }
        Command::ResetPassword {
            email,
            password,
            confirm,
        } => {
            let hasher = Argon2Hasher::new();
            let username = identity::reset_password(session, &hasher, &email, &password, &confirm)?;
            writeln!(out, "Password updated, logged in as {username}")?;
            Ok(())
        }
        Command::Recover { username, answer } => {
            let hasher = Argon2Hasher::new();
            if !identity::verify_recovery_answer(session, &hasher, &username, &answer) {
                bail!("recovery answer does not match");
            }
            writeln!(out, "Recovery answer accepted")?;
            Ok(())
        }
        Command::Avatar { uri } => {
            let cleared = uri.is_none();
            if !identity::set_avatar(session, uri)? {
                bail!("account record not found");
            }
            writeln!(out, "{}", if cleared { "Avatar cleared" } else { "Avatar updated" })?;
            Ok(())
        }

        // === Onboarding & settings ===
        Command::Currency { code: None } => {
            let options = currency::options();
            emit(out, opts, &options, |out| {
                for c in &options {
                    writeln!(out, "{:<4} {:<4} {}", c.code, c.symbol, c.name)?;
                }
                Ok(())
            })
        }
        Command::Currency { code: Some(code) } => {
            let chosen = settings::choose_currency(session, &code)?;
            writeln!(out, "Currency set to {} ({})", chosen.label(), chosen.symbol)?;
            Ok(())
        }
        Command::Categories { kind } => {
            let kinds = match kind {
                Some(kind) => vec![kind],
                None => vec![TransactionKind::Expense, TransactionKind::Income],
            };
            let listing: Vec<(TransactionKind, &[&str])> = kinds
                .into_iter()
                .map(|kind| (kind, kind.suggested_categories()))
                .collect();
            emit(out, opts, &listing, |out| {
                for (kind, names) in &listing {
                    writeln!(out, "{kind}: {}", names.join(", "))?;
                }
                Ok(())
            })
        }
        Command::Onboard { opening_balance } => {
            match settings::record_opening_balance(session, opening_balance, opts.today)? {
                Some(tx) => writeln!(
                    out,
                    "Opening balance of {} recorded",
                    format_amount(tx.amount_minor_units, &symbol)
                )?,
                None => writeln!(out, "Setup complete")?,
            }
            Ok(())
        }
        Command::Reset { yes } => {
            if !yes {
                bail!("factory reset deletes all your data; re-run with --yes to confirm");
            }
            settings::factory_reset(session)?;
            writeln!(out, "All data deleted, logged out")?;
            Ok(())
        }

        // === Transactions ===
        Command::Add(args) => add(session, args, opts, out),
        Command::Edit(args) => edit(session, args, out),
        Command::Delete { id } => {
            if transactions::remove_transaction(session, &id)? {
                writeln!(out, "Deleted {id}")?;
            } else {
                writeln!(out, "No transaction with id {id}")?;
            }
            Ok(())
        }
        Command::List { query } => {
            let found = transactions::find_transactions(session, query.as_deref().unwrap_or(""))?;
            emit(out, opts, &found, |out| {
                if found.is_empty() {
                    return writeln!(out, "No transactions");
                }
                for tx in &found {
                    writeln!(out, "{}", transaction_line(tx, &symbol))?;
                }
                Ok(())
            })
        }
        Command::Clear { yes } => {
            if !yes {
                bail!("this deletes every transaction; re-run with --yes to confirm");
            }
            transactions::clear_transactions(session)?;
            writeln!(out, "All transactions deleted")?;
            Ok(())
        }

        // === Budgets ===
        Command::Budget(cmd) => budget(session, cmd, opts, &symbol, out),

        // === Analytics ===
        Command::Analytics { from, to } => {
            let default = DateRange::month_to_date(opts.today);
            let range = DateRange::new(from.unwrap_or(default.start), to.unwrap_or(default.end));
            if range.start > range.end {
                bail!("--from {} is after --to {}", range.start, range.end);
            }

            let view = analytics::period_analytics(session, range)?;
            emit(out, opts, &view, |out| {
                writeln!(
                    out,
                    "{} to {} ({} transactions)",
                    range.start, range.end, view.transaction_count
                )?;
                writeln!(out, "  income   {}", format_amount(view.totals.income, &symbol))?;
                writeln!(out, "  expense  {}", format_amount(view.totals.expense, &symbol))?;
                writeln!(out, "  net      {}", format_amount(view.totals.net, &symbol))?;
                if !view.breakdown.is_empty() {
                    writeln!(out, "By category:")?;
                    for share in &view.breakdown {
                        writeln!(
                            out,
                            "  {:<16} {:<7} {:>14} {:>6.1}%",
                            share.category,
                            share.kind,
                            format_amount(share.amount, &symbol),
                            share.percentage
                        )?;
                    }
                }
                if !view.cash_flow.is_empty() {
                    writeln!(out, "Cash flow:")?;
                    for bucket in &view.cash_flow {
                        writeln!(
                            out,
                            "  {:<8} +{:<14} -{}",
                            bucket.label,
                            format_amount(bucket.income_minor_units, &symbol),
                            format_amount(bucket.expense_minor_units, &symbol)
                        )?;
                    }
                }
                Ok(())
            })
        }
        Command::Dashboard => {
            let summary = analytics::dashboard(session, opts.today, opts.recent_limit)?;
            emit(out, opts, &summary, |out| {
                writeln!(out, "Balance        {}", format_amount(summary.total_balance, &symbol))?;
                writeln!(out, "Month income   {}", format_amount(summary.month_income, &symbol))?;
                writeln!(out, "Month expense  {}", format_amount(summary.month_expense, &symbol))?;
                if !summary.recent.is_empty() {
                    writeln!(out, "Recent:")?;
                    for tx in &summary.recent {
                        writeln!(out, "  {}", transaction_line(tx, &symbol))?;
                    }
                }
                Ok(())
            })
        }
        Command::Report => {
            let report = analytics::monthly_report(session, opts.today)?;
            emit(out, opts, &report, |out| {
                writeln!(out, "Report for {}", report.month)?;
                writeln!(out, "  income   {}", format_amount(report.summary.income, &symbol))?;
                writeln!(out, "  expense  {}", format_amount(report.summary.expense, &symbol))?;
                writeln!(out, "  net      {}", format_amount(report.summary.net, &symbol))?;
                for perf in &report.budget_performance {
                    writeln!(
                        out,
                        "  {:<16} {} of {} ({:.0}%, {})",
                        perf.category,
                        format_amount(perf.spent, &symbol),
                        format_amount(perf.budgeted, &symbol),
                        perf.utilization_percent,
                        perf.status
                    )?;
                }
                Ok(())
            })
        }
        Command::Check => {
            let issues = analytics::integrity_report(session)?;
            emit(out, opts, &issues, |out| {
                if issues.is_empty() {
                    return writeln!(out, "No issues found");
                }
                for issue in &issues {
                    writeln!(out, "- {issue}")?;
                }
                Ok(())
            })
        }

        Command::Health => {
            let health = analytics::health_report(session, opts.today)?;
            emit(out, opts, &health, |out| {
                writeln!(out, "Health score for {}: {}/100", health.month, health.score)?;
                for factor in &health.factors {
                    writeln!(
                        out,
                        "  {:<20} {:>2}/{}",
                        factor.kind,
                        factor.points,
                        factor.kind.max_points()
                    )?;
                }
                for line in health.rating.advice() {
                    writeln!(out, "- {line}")?;
                }
                Ok(())
            })
        }
        Command::Advice => {
            let advice = analytics::smart_recommendations(session, opts.today)?;
            emit(out, opts, &advice, |out| {
                if advice.is_empty() {
                    return writeln!(out, "No recommendations, your finances look healthy");
                }
                for rec in &advice {
                    writeln!(out, "- {}", rec.describe(&symbol))?;
                }
                Ok(())
            })
        }
        Command::Today => {
            let check = analytics::daily_check(session, opts.today)?;
            emit(out, opts, &check, |out| {
                writeln!(out, "Spent today    {}", format_amount(check.spent_today, &symbol))?;
                match check.remaining_daily_budget {
                    Some(left) if left > 0 => {
                        writeln!(out, "Left per day   {}", format_amount(left, &symbol))?
                    }
                    Some(_) => writeln!(out, "Left per day   over budget")?,
                    None => writeln!(out, "Left per day   no budgets set")?,
                }
                if !check.large_transactions.is_empty() {
                    writeln!(out, "Large expenses this month:")?;
                    for tx in &check.large_transactions {
                        writeln!(out, "  {}", transaction_line(tx, &symbol))?;
                    }
                }
                Ok(())
            })
        }
        Command::Compare => {
            let cmp = analytics::compare_months(session, opts.today)?;
            let change = |value: Option<f64>| match value {
                Some(pct) => format!("{pct:+.1}%"),
                None => "n/a".to_string(),
            };
            emit(out, opts, &cmp, |out| {
                writeln!(out, "{:<10} {:>14} {:>14}", "", cmp.current.month, cmp.previous.month)?;
                for (label, now, before) in [
                    ("income", cmp.current.income, cmp.previous.income),
                    ("expense", cmp.current.expense, cmp.previous.expense),
                    ("savings", cmp.current.savings, cmp.previous.savings),
                ] {
                    writeln!(
                        out,
                        "{label:<10} {:>14} {:>14}",
                        format_amount(now, &symbol),
                        format_amount(before, &symbol)
                    )?;
                }
                writeln!(out, "Expense change  {}", change(cmp.expense_change_percent))?;
                writeln!(out, "Income change   {}", change(cmp.income_change_percent))?;
                writeln!(
                    out,
                    "Average daily expense  {}",
                    format_amount(cmp.average_daily_expense, &symbol)
                )?;
                if !cmp.spending_by_category.is_empty() {
                    writeln!(out, "Spending by category:")?;
                    for share in &cmp.spending_by_category {
                        writeln!(
                            out,
                            "  {:<16} {:>14} {:>6.1}%",
                            share.category,
                            format_amount(share.amount, &symbol),
                            share.percentage
                        )?;
                    }
                }
                writeln!(out, "Savings trend:")?;
                for month in &cmp.savings_trend {
                    writeln!(out, "  {}  {}", month.month, format_amount(month.savings, &symbol))?;
                }
                Ok(())
            })
        }

        // === Backup ===
        Command::Export { output } => {
            let payload = backup::export_backup(session)?;
            let raw = payload.to_json_pretty()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, raw)
                        .with_context(|| format!("writing {}", path.display()))?;
                    writeln!(
                        out,
                        "Backup of {} transactions and {} budgets written to {}",
                        payload.transactions.len(),
                        payload.budgets.len(),
                        path.display()
                    )?;
                }
                None => writeln!(out, "{raw}")?,
            }
            Ok(())
        }
        Command::Import { path } => import(session, &path, opts, out),
        Command::ExportCsv { output } => {
            let raw = backup::export_csv(session)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, raw)
                        .with_context(|| format!("writing {}", path.display()))?;
                    writeln!(out, "Transactions written to {}", path.display())?;
                }
                None => write!(out, "{raw}")?,
            }
            Ok(())
        }
        Command::ImportCsv { path } => import_csv(session, &path, opts, out),
    }
}

fn signup<K: KeyValueStore>(
    session: &mut Session<K>,
    args: SignupArgs,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let user = identity::sign_up(
        session,
        &Argon2Hasher::new(),
        identity::SignUpRequest {
            username: args.username,
            email: args.email,
            password: args.password,
            recovery_question: args.recovery_question,
            recovery_answer: args.recovery_answer,
        },
    )?;
    writeln!(out, "Account {} created and logged in", user.username)?;
    writeln!(out, "Next: `hissab currency <CODE>` then `hissab onboard <AMOUNT>`")?;
    Ok(())
}

fn add<K: KeyValueStore>(
    session: &Session<K>,
    args: AddArgs,
    opts: &RunOptions,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let tx = transactions::record_transaction(
        session,
        transactions::NewTransaction {
            date: args.date.unwrap_or(opts.today),
            kind: args.kind,
            category: args.category,
            description: args.description,
            amount_minor_units: args.amount,
        },
    )?;
    emit(out, opts, &tx, |out| {
        writeln!(out, "Added {}", transaction_line(&tx, &session.settings().symbol))
    })
}

fn edit<K: KeyValueStore>(
    session: &Session<K>,
    args: EditArgs,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let patch = TransactionPatch {
        date: args.date,
        kind: args.kind,
        category: args.category,
        description: args.description,
        amount_minor_units: args.amount,
    };
    if patch.is_empty() {
        bail!(
            "nothing to change; pass at least one of \
             --date, --kind, --category, --description, --amount"
        );
    }

    if !transactions::edit_transaction(session, &args.id, &patch)? {
        bail!("no transaction with id {}", args.id);
    }
    writeln!(out, "Updated {}", args.id)?;
    Ok(())
}

fn budget<K: KeyValueStore>(
    session: &Session<K>,
    cmd: BudgetCommand,
    opts: &RunOptions,
    symbol: &str,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match cmd {
        BudgetCommand::Set {
            category,
            monthly,
            yearly,
        } => {
            let budget = budgets::set_budget(session, &category, monthly, yearly)?;
            writeln!(
                out,
                "Budget for {} set to {} a month",
                budget.category,
                format_amount(budget.monthly_limit_minor_units, symbol)
            )?;
        }
        BudgetCommand::Remove { category } => {
            if budgets::remove_budget(session, &category)? {
                writeln!(out, "Removed budget for {category}")?;
            } else {
                writeln!(out, "No budget for {category}")?;
            }
        }
        BudgetCommand::List => {
            let usages = budgets::list_budget_usage(session, opts.today)?;
            emit(out, opts, &usages, |out| {
                if usages.is_empty() {
                    return writeln!(out, "No budgets");
                }
                for usage in &usages {
                    writeln!(
                        out,
                        "{:<16} {} of {} ({:.0}%, {})",
                        usage.category,
                        format_amount(usage.spent_this_month, symbol),
                        format_amount(usage.monthly_limit, symbol),
                        usage.monthly_percentage,
                        usage.status
                    )?;
                    if let (Some(limit), Some(status)) = (usage.yearly_limit, usage.yearly_status) {
                        writeln!(
                            out,
                            "{:<16} {} of {} this year ({:.0}%, {})",
                            "",
                            format_amount(usage.spent_this_year, symbol),
                            format_amount(limit, symbol),
                            usage.yearly_percentage,
                            status
                        )?;
                    }
                }
                Ok(())
            })?;
        }
        BudgetCommand::Alerts => {
            let alerts = budgets::list_budget_alerts(session, opts.today)?;
            emit(out, opts, &alerts, |out| {
                if alerts.is_empty() {
                    return writeln!(out, "All budgets on track");
                }
                for alert in &alerts {
                    match alert.over_by {
                        Some(over) => writeln!(
                            out,
                            "{}: over by {} ({:.0}%)",
                            alert.category,
                            format_amount(over, symbol),
                            alert.percentage
                        )?,
                        None => writeln!(
                            out,
                            "{}: {:.0}% used",
                            alert.category, alert.percentage
                        )?,
                    }
                }
                Ok(())
            })?;
        }
    }
    Ok(())
}

fn import<K: KeyValueStore>(
    session: &Session<K>,
    path: &Path,
    opts: &RunOptions,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let payload = BackupPayload::from_json(&raw).context("parsing backup file")?;
    let stats = backup::import_backup(session, &payload)?;

    emit(out, opts, &stats, |out| {
        writeln!(
            out,
            "Imported {} transactions ({} skipped) and {} budgets ({} skipped)",
            stats.transactions_imported,
            stats.transactions_skipped,
            stats.budgets_imported,
            stats.budgets_skipped
        )
    })
}

fn import_csv<K: KeyValueStore>(
    session: &Session<K>,
    path: &Path,
    opts: &RunOptions,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let stats = backup::import_csv(session, &raw)?;

    emit(out, opts, &stats, |out| {
        writeln!(
            out,
            "Imported {} transactions ({} duplicates, {} rejected)",
            stats.imported,
            stats.duplicates,
            stats.rejected.len()
        )?;
        for rejection in &stats.rejected {
            writeln!(out, "  line {}: {}", rejection.line, rejection.reason)?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use hissab_store::{MemoryStore, RecordStore};

    use super::*;
    use crate::cli::Cli;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 20).unwrap()
    }

    fn exec(session: &mut Session<MemoryStore>, args: &[&str]) -> anyhow::Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("hissab").chain(args.iter().copied()))?;
        let opts = RunOptions {
            today: today(),
            json: cli.json,
            recent_limit: 5,
        };
        let mut buf = Vec::new();
        run(session, cli.command, &opts, &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }

    fn session() -> Session<MemoryStore> {
        Session::restore(RecordStore::new(MemoryStore::new()))
    }

    #[test]
    fn test_onboarding_then_dashboard() {
        let mut s = session();
        exec(&mut s, &["signup", "alice", "alice@example.com", "--password", "secret"]).unwrap();
        exec(&mut s, &["currency", "usd"]).unwrap();
        exec(&mut s, &["onboard", "1000"]).unwrap();
        exec(&mut s, &["add", "expense", "38", "Food", "-d", "Groceries", "--date", "2024-06-02"])
            .unwrap();

        let out = exec(&mut s, &["dashboard"]).unwrap();
        assert!(out.contains("Balance        $962.00"), "{out}");
        assert!(out.contains("Groceries"));
    }

    #[test]
    fn test_commands_need_login() {
        let mut s = session();
        let err = exec(&mut s, &["list"]).unwrap_err();
        assert!(err.to_string().contains("Not logged in"), "{err}");
    }

    #[test]
    fn test_reset_requires_confirmation() {
        let mut s = session();
        exec(&mut s, &["signup", "alice", "alice@example.com", "--password", "secret"]).unwrap();
        assert!(exec(&mut s, &["reset"]).is_err());
        assert!(s.is_authenticated());

        exec(&mut s, &["reset", "--yes"]).unwrap();
        assert!(!s.is_authenticated());
    }

    #[test]
    fn test_budget_alerts_json() {
        let mut s = session();
        exec(&mut s, &["signup", "alice", "alice@example.com", "--password", "secret"]).unwrap();
        exec(&mut s, &["budget", "set", "Food", "100"]).unwrap();
        exec(&mut s, &["add", "expense", "120", "Food", "--date", "2024-06-03"]).unwrap();

        let out = exec(&mut s, &["--json", "budget", "alerts"]).unwrap();
        let alerts: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(alerts[0]["status"], "over");
        assert_eq!(alerts[0]["overBy"], 2_000);
    }

    #[test]
    fn test_huge_amounts_rejected() {
        let mut s = session();
        exec(&mut s, &["signup", "alice", "alice@example.com", "--password", "secret"]).unwrap();
        assert!(exec(&mut s, &["add", "income", "1000000000000.01", "Gift"]).is_err());
        assert!(exec(&mut s, &["add", "income", "1000000000000", "Gift"]).is_ok());
        assert!(exec(&mut s, &["add", "income", "1000000000000", "Gift"]).is_ok());

        let out = exec(&mut s, &["--json", "dashboard"]).unwrap();
        let summary: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(summary["totalBalance"], 200_000_000_000_000_i64);
    }

    #[test]
    fn test_categories() {
        let mut s = session();
        let out = exec(&mut s, &["categories", "--kind", "income"]).unwrap();
        assert!(out.starts_with("income: Salary"), "{out}");
        assert!(!out.contains("expense"));

        let out = exec(&mut s, &["categories"]).unwrap();
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn test_health_advice_and_compare() {
        let mut s = session();
        exec(&mut s, &["signup", "alice", "alice@example.com", "--password", "secret"]).unwrap();
        exec(&mut s, &["add", "income", "1000", "Salary", "--date", "2024-06-01"]).unwrap();
        exec(&mut s, &["add", "expense", "400", "Food", "--date", "2024-05-10"]).unwrap();
        exec(&mut s, &["add", "expense", "500", "Food", "--date", "2024-06-10"]).unwrap();

        let out = exec(&mut s, &["--json", "health"]).unwrap();
        let health: serde_json::Value = serde_json::from_str(&out).unwrap();
        // 50% savings, no budgets, income above expenses, positive savings.
        assert_eq!(health["score"], 30 + 10 + 25 + 20);
        assert_eq!(health["rating"], "good");

        let out = exec(&mut s, &["advice"]).unwrap();
        assert!(out.contains("Food"), "{out}");
        assert!(out.contains("haven't set any budgets"), "{out}");

        let out = exec(&mut s, &["compare"]).unwrap();
        assert!(out.contains("Expense change  +25.0%"), "{out}");
        assert!(out.contains("Income change   n/a"), "{out}");

        let out = exec(&mut s, &["today"]).unwrap();
        assert!(out.contains("no budgets set"), "{out}");
    }

    #[test]
    fn test_csv_export_import() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        let path_arg = path.to_str().unwrap();

        let mut s = session();
        exec(&mut s, &["signup", "alice", "alice@example.com", "--password", "secret"]).unwrap();
        exec(&mut s, &["add", "expense", "12.5", "Food", "--date", "2024-06-02"]).unwrap();
        exec(&mut s, &["export-csv", "-o", path_arg]).unwrap();

        exec(&mut s, &["signup", "bob", "bob@example.com", "--password", "secret"]).unwrap();
        let out = exec(&mut s, &["import-csv", path_arg]).unwrap();
        assert!(out.contains("Imported 1 transactions (0 duplicates, 0 rejected)"), "{out}");

        let out = exec(&mut s, &["import-csv", path_arg]).unwrap();
        assert!(out.contains("Imported 0 transactions (1 duplicates"), "{out}");
    }

    #[test]
    fn test_edit_unknown_id_fails() {
        let mut s = session();
        exec(&mut s, &["signup", "alice", "alice@example.com", "--password", "secret"]).unwrap();
        assert!(exec(&mut s, &["edit", "missing", "--amount", "5"]).is_err());
        assert!(exec(&mut s, &["edit", "missing"]).is_err());
    }
}
