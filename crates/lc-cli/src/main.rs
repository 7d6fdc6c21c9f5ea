mod commands;
mod transport;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use lc_core::config::ConsoleConfig;
use lc_core::session::{FileSession, StaticSession};
use lc_core::widgets::payment_collection::PaymentMethod;
use lc_telemetry::logging::{self, LogFormat};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// lc -- loan console: loans, repayment schedules and collections from the
/// terminal.
#[derive(Parser)]
#[command(name = "lc", version, about)]
struct Cli {
    /// Backend base URL (overrides [api].base_url).
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Config file (defaults to ~/.loan-console/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Forget the stored session token.
    Logout,

    /// List loans, or show one loan with its dues.
    Loans {
        /// Loan ID to show in detail.
        #[arg(long)]
        id: Option<i64>,
    },

    /// List repayment schedules.
    Schedules {
        /// Only installments assigned to the logged-in agent.
        #[arg(long)]
        mine: bool,
    },

    /// List collection agents.
    Agents,

    /// List customers, or show one customer's profile.
    Customers {
        #[arg(long)]
        id: Option<i64>,
    },

    /// Assign an installment to a collection agent.
    Assign {
        /// Schedule (installment) ID.
        schedule: i64,
        /// Agent ID.
        agent: i64,
    },

    /// Record a payment against an installment.
    Collect {
        /// Schedule (installment) ID.
        schedule: i64,
        #[arg(long)]
        amount: String,
        /// cash, upi or card.
        #[arg(long, default_value = "cash")]
        method: PaymentMethod,
    },

    /// Upload documents for a customer.
    Upload {
        customer: i64,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<ConsoleConfig> {
    let mut config = match &cli.config {
        Some(path) => ConsoleConfig::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ConsoleConfig::load().context("loading config")?,
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
        config.validate().context("invalid --api-url")?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    logging::init(
        "lc",
        &config.general.log_level,
        LogFormat::from_json_flag(cli.json_logs),
    );

    let store = FileSession::new(config.token_path());
    let timeout = config.api.timeout_secs.map(Duration::from_secs);
    let base_url = config.api.base_url.as_str();
    tracing::debug!(%base_url, token_file = %store.path().display(), "lc starting");

    match cli.command {
        Commands::Login { email, password } => {
            let api = commands::api_client(base_url, StaticSession::anonymous(), timeout)?;
            commands::login::run(&api, &store, &email, &password).await?;
        }
        Commands::Logout => commands::logout::run(&store)?,
        command => {
            let api = commands::api_client(base_url, store, timeout)?;
            match command {
                Commands::Loans { id } => commands::loans::run(&api, id).await?,
                Commands::Schedules { mine } => commands::schedules::run(&api, mine).await?,
                Commands::Agents => commands::agents::run(&api).await?,
                Commands::Customers { id } => commands::customers::run(&api, id).await?,
                Commands::Assign { schedule, agent } => {
                    commands::assign::run(&api, schedule, agent).await?
                }
                Commands::Collect {
                    schedule,
                    amount,
                    method,
                } => commands::collect::run(&api, schedule, &amount, method).await?,
                Commands::Upload { customer, files } => {
                    commands::upload::run(&api, customer, &files).await?
                }
                Commands::Login { .. } | Commands::Logout => {}
            }
        }
    }

    Ok(())
}
