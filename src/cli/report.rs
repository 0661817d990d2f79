//! CLI commands for reports

use clap::Subcommand;

use crate::config::Settings;
use crate::error::FamfinResult;
use crate::reports::{CategoryReport, MonthlySummary, SetupStatus};
use crate::storage::Storage;

use super::parse_month;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Income, expenses and spending per category and day for a month
    Summary {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Top spending categories with their share of expenses
    Categories {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Getting-started checklist
    Status,
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> FamfinResult<()> {
    let currency = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Summary { month } => {
            let report = MonthlySummary::generate(storage, parse_month(month.as_deref())?)?;
            print!("{}", report.format_terminal(currency));
        }
        ReportCommands::Categories { month } => {
            let report = CategoryReport::generate(storage, parse_month(month.as_deref())?)?;
            print!("{}", report.format_terminal(currency));
        }
        ReportCommands::Status => {
            print!("{}", SetupStatus::generate(storage)?.format_terminal());
        }
    }

    Ok(())
}
