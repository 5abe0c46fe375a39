//! # Kirana POS CLI
//!
//! Terminal front end for the point-of-sale system.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         kirana (THIS BINARY)                            │
//! │                                                                         │
//! │  clap subcommands ──► Session (login) ──► repositories (kirana-db)     │
//! │                                               │                         │
//! │                                               ▼                         │
//! │                          kirana-core math / kirana-pdf invoices        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every invocation logs in with `--emp-id`/`--password` (or the
//! `KIRANA_EMP_ID`/`KIRANA_PASSWORD` environment variables). Admin-only
//! commands refuse an employee login.

mod commands;
mod config;
mod error;
mod session;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use kirana_core::Role;
use kirana_db::{Database, DbConfig};

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};
use crate::session::Session;

#[derive(Parser)]
#[command(name = "kirana", version, about = "Kirana POS - billing and inventory")]
struct Cli {
    /// Database file path (overrides KIRANA_DB_PATH)
    #[arg(long, global = true)]
    db: Option<String>,

    /// Employee id to log in with
    #[arg(long, global = true, env = "KIRANA_EMP_ID")]
    emp_id: Option<String>,

    /// Password
    #[arg(long, global = true, env = "KIRANA_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Role to log in as: admin or employee
    #[arg(long, global = true, env = "KIRANA_ROLE", default_value = "employee")]
    role: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Verify credentials and show which dashboard they open
    Login,

    /// Ring up sales and look up invoices
    #[command(subcommand)]
    Bill(commands::bill::BillCmd),

    /// Manage products and variants (admin)
    #[command(subcommand)]
    Product(commands::product::ProductCmd),

    /// Manage brands (admin)
    #[command(subcommand)]
    Brand(commands::catalog::BrandCmd),

    /// Manage product types (admin)
    #[command(subcommand)]
    Type(commands::catalog::TypeCmd),

    /// Receive, adjust, and inspect stock
    #[command(subcommand)]
    Stock(commands::stock::StockCmd),

    /// Manage suppliers and sourcing links (admin)
    #[command(subcommand)]
    Supplier(commands::supplier::SupplierCmd),

    /// Manage employee accounts (admin)
    #[command(subcommand)]
    Employee(commands::employee::EmployeeCmd),

    /// Manage tax slabs (admin)
    #[command(subcommand)]
    Tax(commands::tax::TaxCmd),

    /// Sales, inventory, profitability, supplier reports (admin)
    #[command(subcommand)]
    Report(commands::report::ReportCmd),
}

/// Everything a command handler needs.
pub struct Ctx {
    pub db: Database,
    pub config: AppConfig,
    pub session: Session,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let mut config = AppConfig::load();
    if let Some(db_path) = cli.db {
        config.db_path = db_path;
    }

    let role = Role::parse(&cli.role)
        .ok_or_else(|| CliError::InvalidArgument(format!("unknown role: {}", cli.role)))?;

    let emp_id = cli
        .emp_id
        .ok_or_else(|| CliError::InvalidArgument("--emp-id (or KIRANA_EMP_ID) is required".to_string()))?;
    let password = cli
        .password
        .ok_or_else(|| CliError::InvalidArgument("--password (or KIRANA_PASSWORD) is required".to_string()))?;

    debug!(db_path = %config.db_path, "Opening database");
    let db = Database::new(DbConfig::new(&config.db_path)).await?;

    let session = Session::login(&db, &emp_id, &password, role).await?;
    let ctx = Ctx {
        db,
        config,
        session,
    };

    match cli.command {
        Command::Login => {
            let dashboard = match ctx.session.employee.role {
                Role::Admin => "admin dashboard",
                Role::Employee => "billing dashboard",
            };
            println!(
                "Welcome, {} ({}). You have access to the {}.",
                ctx.session.employee.full_name(),
                ctx.session.employee.emp_id,
                dashboard
            );
            Ok(())
        }
        Command::Bill(cmd) => commands::bill::run(&ctx, cmd).await,
        Command::Product(cmd) => commands::product::run(&ctx, cmd).await,
        Command::Brand(cmd) => commands::catalog::run_brand(&ctx, cmd).await,
        Command::Type(cmd) => commands::catalog::run_type(&ctx, cmd).await,
        Command::Stock(cmd) => commands::stock::run(&ctx, cmd).await,
        Command::Supplier(cmd) => commands::supplier::run(&ctx, cmd).await,
        Command::Employee(cmd) => commands::employee::run(&ctx, cmd).await,
        Command::Tax(cmd) => commands::tax::run(&ctx, cmd).await,
        Command::Report(cmd) => commands::report::run(&ctx, cmd).await,
    }
}
