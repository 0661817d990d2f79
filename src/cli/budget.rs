//! Budget CLI commands
//!
//! Implements CLI commands for monthly budget plans.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::budget::{describe_status, format_budget_list, format_budget_overview};
use crate::error::{FamfinError, FamfinResult};
use crate::models::{BudgetLineId, BudgetMethod, BudgetPlan};
use crate::services::{BudgetService, LineUpdate};
use crate::storage::Storage;

use super::{parse_amount, parse_month};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Generate a budget plan from the template
    Create {
        /// Monthly income to allocate
        #[arg(short, long)]
        income: String,
        /// Allocation method (50/30/20, 50/25/25, zero)
        #[arg(short, long, default_value = "50/30/20")]
        method: String,
        /// Month (YYYY-MM), defaults to the current month
        #[arg(long)]
        month: Option<String>,
    },
    /// List budget plans
    List,
    /// Show a plan with what was spent on each line
    Show {
        /// Plan ID or month (YYYY-MM); defaults to the latest plan
        plan: Option<String>,
    },
    /// Change a plan's income
    Income {
        /// New income
        amount: String,
        /// Plan ID or month; defaults to the latest plan
        #[arg(short, long)]
        plan: Option<String>,
    },
    /// Add a line to a section
    AddLine {
        /// Section number (1-3) or title
        section: String,
        /// Category of the new line
        #[arg(short, long)]
        category: Option<String>,
        /// Allocated amount
        #[arg(short, long, default_value = "0")]
        amount: String,
        /// Plan ID or month; defaults to the latest plan
        #[arg(short, long)]
        plan: Option<String>,
    },
    /// Edit a line
    EditLine {
        /// Line ID or category
        line: String,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New allocated amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New notes
        #[arg(short, long)]
        notes: Option<String>,
        /// Plan ID or month; defaults to the latest plan
        #[arg(short, long)]
        plan: Option<String>,
    },
    /// Remove a line
    RemoveLine {
        /// Line ID or category
        line: String,
        /// Plan ID or month; defaults to the latest plan
        #[arg(short, long)]
        plan: Option<String>,
    },
    /// Delete a plan
    Delete {
        /// Plan ID or month
        plan: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

fn require_line(plan: &BudgetPlan, line: &str) -> FamfinResult<BudgetLineId> {
    plan.find_line(line)
        .map(|l| l.id)
        .ok_or_else(|| FamfinError::NotFound {
            entity_type: "Budget line",
            identifier: line.to_string(),
        })
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> FamfinResult<()> {
    let service = BudgetService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Create {
            income,
            method,
            month,
        } => {
            let method = BudgetMethod::parse(&method).ok_or_else(|| {
                FamfinError::Validation(format!(
                    "Invalid budget method: '{}'. Use 50/30/20, 50/25/25 or zero",
                    method
                ))
            })?;
            let month = parse_month(month.as_deref())?;

            let plan = service.generate(parse_amount(&income)?, method, month)?;
            let overview = service.with_live_spent(plan)?;
            print!("{}", format_budget_overview(&overview, currency));
        }

        BudgetCommands::List => {
            println!("{}", format_budget_list(&service.list()?, currency));
        }

        BudgetCommands::Show { plan } => {
            let plan = service.resolve(plan.as_deref())?;
            let overview = service.with_live_spent(plan)?;
            print!("{}", format_budget_overview(&overview, currency));
        }

        BudgetCommands::Income { amount, plan } => {
            let plan = service.resolve(plan.as_deref())?;
            let updated = service.set_income(plan.id, parse_amount(&amount)?)?;
            let overview = service.with_live_spent(updated)?;
            println!(
                "Income of {} set to {}",
                overview.plan.label,
                overview.plan.income.format_with_symbol(currency)
            );
            println!("{}", describe_status(overview.totals.status(), currency));
        }

        BudgetCommands::AddLine {
            section,
            category,
            amount,
            plan,
        } => {
            let plan = service.resolve(plan.as_deref())?;
            let (updated, line_id) =
                service.add_line(plan.id, &section, category.as_deref(), parse_amount(&amount)?)?;

            if let Some(line) = updated.find_line(&line_id.to_string()) {
                println!(
                    "Added line {} ({}) to {}",
                    line.category,
                    line.allocated.format_with_symbol(currency),
                    updated.label
                );
            }
            println!("  ID: {}", line_id);
        }

        BudgetCommands::EditLine {
            line,
            category,
            amount,
            notes,
            plan,
        } => {
            let plan = service.resolve(plan.as_deref())?;
            let line_id = require_line(&plan, &line)?;

            if category.is_none() && amount.is_none() && notes.is_none() {
                println!("No changes specified. Use --category, --amount or --notes.");
                return Ok(());
            }

            let update = LineUpdate {
                category,
                allocated: amount.as_deref().map(parse_amount).transpose()?,
                notes,
            };
            let updated = service.update_line(plan.id, line_id, update)?;
            let overview = service.with_live_spent(updated)?;

            println!("Updated line in {}", overview.plan.label);
            println!("{}", describe_status(overview.totals.status(), currency));
        }

        BudgetCommands::RemoveLine { line, plan } => {
            let plan = service.resolve(plan.as_deref())?;
            let line_id = require_line(&plan, &line)?;
            let updated = service.delete_line(plan.id, line_id)?;
            println!("Removed line from {}", updated.label);
        }

        BudgetCommands::Delete { plan, force } => {
            let plan = service.resolve(Some(&plan))?;

            if !force {
                println!("About to delete {}", plan.label);
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = service.delete(plan.id)?;
            println!("Deleted {}", deleted.label);
        }
    }

    Ok(())
}
