//! Tally CLI - Personal finance tracker
//!
//! Usage:
//!   tally init                       Initialize database
//!   tally accounts add --name Nubank Create an account
//!   tally transactions add ...       Record a transaction (auto-categorized)
//!   tally dashboard                  Monthly overview
//!   tally serve --port 3000          Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Serve {
            port,
            host,
            no_auth,
            static_dir,
        } => commands::cmd_serve(&cli.db, &host, port, no_auth, static_dir.as_deref()).await,
        Commands::Categorize {
            description,
            amount,
            kind,
        } => commands::cmd_categorize(&description, amount, &kind).await,
        Commands::Accounts { action } => {
            let (db, user) = commands::open_for_user(&cli.db, &cli.user)?;
            match action {
                None | Some(AccountsAction::List) => commands::cmd_accounts_list(&db, user.id),
                Some(AccountsAction::Add {
                    name,
                    kind,
                    balance,
                    currency,
                    description,
                }) => commands::cmd_accounts_add(
                    &db,
                    &user,
                    &name,
                    &kind,
                    balance,
                    &currency,
                    description.as_deref(),
                ),
            }
        }
        Commands::Transactions { action } => {
            let (db, user) = commands::open_for_user(&cli.db, &cli.user)?;
            match action {
                None => commands::cmd_transactions_list(&db, user.id, 20),
                Some(TransactionsAction::List { limit }) => {
                    commands::cmd_transactions_list(&db, user.id, limit)
                }
                Some(TransactionsAction::Add {
                    account,
                    amount,
                    kind,
                    category,
                    description,
                    date,
                }) => {
                    commands::cmd_transactions_add(
                        &db,
                        &user,
                        commands::NewTransactionArgs {
                            account_id: account,
                            amount,
                            kind,
                            category,
                            description,
                            date,
                        },
                    )
                    .await
                }
                Some(TransactionsAction::Recategorize { id, category }) => {
                    commands::cmd_transactions_recategorize(&db, &user, id, &category)
                }
            }
        }
        Commands::Budgets { action } => {
            let (db, user) = commands::open_for_user(&cli.db, &cli.user)?;
            match action {
                None => commands::cmd_budgets_list(&db, user.id, None),
                Some(BudgetsAction::List { month }) => {
                    commands::cmd_budgets_list(&db, user.id, month.as_deref())
                }
                Some(BudgetsAction::Add {
                    category,
                    limit,
                    month,
                }) => commands::cmd_budgets_add(&db, &user, &category, limit, month.as_deref()),
                Some(BudgetsAction::Alerts { month }) => {
                    commands::cmd_budgets_alerts(&db, user.id, month.as_deref())
                }
            }
        }
        Commands::Goals { action } => {
            let (db, user) = commands::open_for_user(&cli.db, &cli.user)?;
            match action {
                None | Some(GoalsAction::List) => commands::cmd_goals_list(&db, user.id),
                Some(GoalsAction::Add {
                    name,
                    target,
                    target_date,
                    description,
                }) => commands::cmd_goals_add(
                    &db,
                    &user,
                    &name,
                    target,
                    &target_date,
                    description.as_deref(),
                ),
                Some(GoalsAction::Progress { id, amount }) => {
                    commands::cmd_goals_progress(&db, &user, id, amount)
                }
            }
        }
        Commands::Dashboard { month } => {
            let (db, user) = commands::open_for_user(&cli.db, &cli.user)?;
            commands::cmd_dashboard(&db, user.id, month.as_deref(), cli.json)
        }
        Commands::Insights { month } => {
            let (db, user) = commands::open_for_user(&cli.db, &cli.user)?;
            commands::cmd_insights(&db, user.id, month.as_deref(), cli.json)
        }
        Commands::Report { report_type } => {
            let (db, user) = commands::open_for_user(&cli.db, &cli.user)?;
            match report_type {
                ReportType::Spending { from, to, month } => commands::cmd_report_spending(
                    &db,
                    user.id,
                    month.as_deref(),
                    from.as_deref(),
                    to.as_deref(),
                    cli.json,
                ),
            }
        }
        Commands::Estimate { month, months } => {
            let (db, user) = commands::open_for_user(&cli.db, &cli.user)?;
            commands::cmd_estimate(&db, user.id, month.as_deref(), months, cli.json)
        }
    }
}
