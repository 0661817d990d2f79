use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use famfin::cli::{
    handle_account_command, handle_budget_command, handle_debt_command, handle_export_command,
    handle_goal_command, handle_history_command, handle_profile_command, handle_report_command,
    handle_shop_command, handle_space_command, handle_transaction_command,
};
use famfin::config::{CurrentView, FamfinPaths, Settings};
use famfin::reports::SetupStatus;
use famfin::services::{AccountService, SpaceService};
use famfin::storage::Storage;

/// Environment variable holding the log filter
const LOG_ENV: &str = "FAMFIN_LOG";

#[derive(Parser)]
#[command(
    name = "famfin",
    version,
    about = "Terminal-based personal and family finance tracker",
    long_about = "famfin tracks accounts, income and expenses, savings goals, \
                  monthly budget plans, debts and shopping lists from the command \
                  line. Records can be kept personal or shared in a family space."
)]
struct Cli {
    /// Directory holding the settings, data files and audit log
    #[arg(long, global = true, env = "FAMFIN_DATA_DIR", value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,

    /// Show the current view, balances and the getting-started checklist
    Status,

    /// Profile management commands
    #[command(subcommand)]
    Profile(famfin::cli::ProfileCommands),

    /// Account management commands
    #[command(subcommand)]
    Account(famfin::cli::AccountCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(famfin::cli::TransactionCommands),

    /// Savings goal commands
    #[command(subcommand)]
    Goal(famfin::cli::GoalCommands),

    /// Budget plan commands
    #[command(subcommand)]
    Budget(famfin::cli::BudgetCommands),

    /// Debt and credit commands
    #[command(subcommand)]
    Debt(famfin::cli::DebtCommands),

    /// Shopping list commands
    #[command(subcommand)]
    Shop(famfin::cli::ShopCommands),

    /// Family space commands
    #[command(subcommand)]
    Space(famfin::cli::SpaceCommands),

    /// Reports
    #[command(subcommand)]
    Report(famfin::cli::ReportCommands),

    /// Export data to CSV or JSON
    #[command(subcommand)]
    Export(famfin::cli::ExportCommands),

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// The saved view, or personal when its space is gone or no longer ours
fn effective_view(storage: &Storage, settings: &Settings) -> Result<CurrentView> {
    let view = settings.current_view;
    if let CurrentView::Family { space_id } = view {
        let member = SpaceService::new(storage)
            .list(settings)?
            .iter()
            .any(|s| s.id == space_id);
        if !member {
            tracing::warn!(space = %space_id, "saved family space unavailable, using personal view");
            return Ok(CurrentView::Personal);
        }
    }
    Ok(view)
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = match cli.data_dir {
        Some(dir) => FamfinPaths::with_base_dir(dir),
        None => FamfinPaths::new()?,
    };
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;
    let view = effective_view(&storage, &settings)?;
    storage.set_view(view);

    match cli.command {
        Some(Commands::Init) => {
            if !famfin::storage::init::needs_initialization(&paths) {
                println!("famfin is already initialized at: {}", paths.base_dir().display());
                println!("Existing data was left untouched.");
                return Ok(());
            }
            println!("Initializing famfin at: {}", paths.base_dir().display());
            famfin::storage::init::initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Next steps:");
            println!("  famfin profile set --name <NAME> --email <EMAIL>");
            println!("  famfin account create <NAME> --balance <AMOUNT>");
            println!("  famfin status");
        }
        Some(Commands::Config) => {
            println!("famfin configuration");
            println!("====================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!(
                "  Current view:    {}",
                SpaceService::new(&storage).view_name(storage.view())?
            );
            println!(
                "  Suggestions:     {}",
                if settings.categorizer.api_key().is_some() {
                    "generative"
                } else {
                    "keywords"
                }
            );
        }
        Some(Commands::Status) => {
            let view_name = SpaceService::new(&storage).view_name(storage.view())?;
            println!("View: {}", view_name);
            if let Some(profile) = &settings.profile {
                println!("Profile: {} <{}>", profile.name, profile.email);
            }
            println!(
                "Global balance: {}",
                AccountService::new(&storage)
                    .global_balance()?
                    .format_with_symbol(&settings.currency_symbol)
            );
            println!();
            print!("{}", SetupStatus::generate(&storage)?.format_terminal());
        }
        Some(Commands::Profile(cmd)) => handle_profile_command(&storage, &mut settings, cmd)?,
        Some(Commands::Account(cmd)) => handle_account_command(&storage, &settings, cmd)?,
        Some(Commands::Transaction(cmd)) => handle_transaction_command(&storage, &settings, cmd)?,
        Some(Commands::Goal(cmd)) => handle_goal_command(&storage, &settings, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, &settings, cmd)?,
        Some(Commands::Debt(cmd)) => handle_debt_command(&storage, &settings, cmd)?,
        Some(Commands::Shop(cmd)) => handle_shop_command(&storage, &settings, cmd)?,
        Some(Commands::Space(cmd)) => handle_space_command(&storage, &mut settings, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(&storage, cmd)?,
        Some(Commands::History { limit }) => handle_history_command(&storage, limit)?,
        None => {
            println!("famfin - personal and family finance tracker");
            println!();
            println!("Run 'famfin --help' for usage information.");
            println!("Run 'famfin init' to set up the data directory.");
        }
    }

    Ok(())
}
