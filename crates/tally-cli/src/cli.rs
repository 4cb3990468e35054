//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Track spending, budgets and savings goals
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Self-hosted personal finance tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "tally.db", global = true)]
    pub db: PathBuf,

    /// User the command acts on behalf of
    #[arg(long, default_value = "local-dev", global = true)]
    pub user: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print analytics as JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        ///
        /// WARNING: Do not use this flag when exposing the server to a network.
        /// By default, the server requires Cloudflare Access headers or an API key.
        #[arg(long)]
        no_auth: bool,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Preview the category a transaction would get
    Categorize {
        /// Transaction description
        description: String,

        /// Amount in major units (e.g. 45.90)
        #[arg(short, long, default_value = "0")]
        amount: f64,

        /// Transaction type: income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: String,
    },

    /// Manage accounts
    Accounts {
        #[command(subcommand)]
        action: Option<AccountsAction>,
    },

    /// Manage transactions (list, add, recategorize)
    Transactions {
        #[command(subcommand)]
        action: Option<TransactionsAction>,
    },

    /// Manage monthly budgets
    Budgets {
        #[command(subcommand)]
        action: Option<BudgetsAction>,
    },

    /// Manage savings goals
    Goals {
        #[command(subcommand)]
        action: Option<GoalsAction>,
    },

    /// Show dashboard summary
    Dashboard {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show financial insights for a month
    Insights {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Generate reports
    Report {
        #[command(subcommand)]
        report_type: ReportType,
    },

    /// Project a month's expenses from recent history
    Estimate {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Number of previous months to average
        #[arg(long, default_value = "3")]
        months: usize,
    },
}

#[derive(Subcommand)]
pub enum AccountsAction {
    /// List accounts
    List,

    /// Create an account
    Add {
        /// Account name
        #[arg(short, long)]
        name: String,

        /// Account type: bank_account, savings, credit_card, digital_wallet, investment, other
        #[arg(short = 't', long = "type", default_value = "bank_account")]
        kind: String,

        /// Opening balance in major units
        #[arg(short, long, default_value = "0")]
        balance: f64,

        /// Three-letter currency code
        #[arg(long, default_value = "BRL")]
        currency: String,

        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum TransactionsAction {
    /// List recent transactions
    List {
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },

    /// Record a transaction, categorized automatically unless --category is given
    Add {
        /// Account ID
        #[arg(short, long)]
        account: i64,

        /// Amount in major units (e.g. 45.90)
        #[arg(long)]
        amount: f64,

        /// Transaction type: income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: String,

        /// Category (skips automatic categorization)
        #[arg(short, long)]
        category: Option<String>,

        /// Description used for categorization
        #[arg(short, long)]
        description: Option<String>,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// Override a transaction's category
    Recategorize {
        /// Transaction ID
        id: i64,

        /// New category
        category: String,
    },
}

#[derive(Subcommand)]
pub enum BudgetsAction {
    /// List budgets for a month
    List {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Create a budget
    Add {
        /// Budget category
        #[arg(short, long)]
        category: String,

        /// Spending limit in major units
        #[arg(short, long)]
        limit: f64,

        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show budget utilization, most used first
    Alerts {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum GoalsAction {
    /// List savings goals
    List,

    /// Create a savings goal
    Add {
        /// Goal name
        #[arg(short, long)]
        name: String,

        /// Target amount in major units
        #[arg(long)]
        target: f64,

        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        target_date: String,

        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Set the amount saved so far
    Progress {
        /// Goal ID
        id: i64,

        /// Amount saved in major units
        amount: f64,
    },
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Spending by category
    Spending {
        /// Month (YYYY-MM), used when --from/--to are not given
        #[arg(short, long)]
        month: Option<String>,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
}
