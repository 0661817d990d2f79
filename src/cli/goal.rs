//! Goal CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::goal::{format_goal_details, format_goal_list};
use crate::error::{FamfinError, FamfinResult};
use crate::models::GoalCategory;
use crate::services::{AccountService, CreateGoalInput, GoalService};
use crate::storage::Storage;

use super::{parse_amount, parse_date, parse_date_or_today, today};

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a savings goal
    Create {
        /// Goal name
        name: String,
        /// Target amount
        target: String,
        /// Deadline (YYYY-MM-DD)
        #[arg(short, long)]
        deadline: Option<String>,
        /// Category (simple-savings, personal-project, investment)
        #[arg(short, long, default_value = "simple-savings")]
        category: String,
        /// Icon key (e.g. car, house, bag)
        #[arg(short, long, default_value = "")]
        icon: String,
        /// Amount already saved
        #[arg(long)]
        initial: Option<String>,
        /// Account the initial amount comes from
        #[arg(short, long)]
        account: Option<String>,
    },
    /// List goals with their progress
    List,
    /// Show a goal with its contributions and forecast
    Show {
        /// Goal name or ID
        goal: String,
    },
    /// Add money to a goal
    Contribute {
        /// Goal name or ID
        goal: String,
        /// Amount
        amount: String,
        /// Account the money comes from
        #[arg(short, long)]
        account: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Delete a goal (its transactions are kept)
    Delete {
        /// Goal name or ID
        goal: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a goal command
pub fn handle_goal_command(
    storage: &Storage,
    settings: &Settings,
    cmd: GoalCommands,
) -> FamfinResult<()> {
    let service = GoalService::new(storage);
    let account_service = AccountService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        GoalCommands::Create {
            name,
            target,
            deadline,
            category,
            icon,
            initial,
            account,
        } => {
            let category = GoalCategory::parse(&category).ok_or_else(|| {
                FamfinError::Validation(format!(
                    "Invalid goal category: '{}'. Use simple-savings, personal-project or investment",
                    category
                ))
            })?;
            let funding_account = account
                .as_deref()
                .map(|a| account_service.require(a).map(|a| a.id))
                .transpose()?;

            let goal = service.create(
                CreateGoalInput {
                    name,
                    target_amount: parse_amount(&target)?,
                    deadline: deadline.as_deref().map(parse_date).transpose()?,
                    category,
                    icon,
                    initial_amount: initial
                        .as_deref()
                        .map(parse_amount)
                        .transpose()?
                        .unwrap_or_default(),
                    funding_account,
                },
                today(),
            )?;

            println!("Created goal: {}", goal.name);
            println!(
                "  Target: {}",
                goal.target_amount.format_with_symbol(currency)
            );
            if goal.current_amount().is_positive() {
                println!(
                    "  Saved:  {}",
                    goal.current_amount().format_with_symbol(currency)
                );
            }
            println!("  ID:     {}", goal.id);
        }

        GoalCommands::List => {
            let goals = service.list()?;
            println!("{}", format_goal_list(&goals, currency, today()));
            if !goals.is_empty() {
                println!(
                    "Total saved: {}   Saver level: {}",
                    service.total_saved()?.format_with_symbol(currency),
                    service.saver_level()?
                );
            }
        }

        GoalCommands::Show { goal } => {
            let goal = service.require(&goal)?;
            print!("{}", format_goal_details(&goal, currency, today()));
            println!();
            println!("Saver level: {}", service.saver_level()?);
        }

        GoalCommands::Contribute {
            goal,
            amount,
            account,
            date,
        } => {
            let goal = service.require(&goal)?;
            let account = account_service.require(&account)?;
            let amount = parse_amount(&amount)?;
            let date = parse_date_or_today(date.as_deref())?;

            let updated = service.contribute(goal.id, amount, account.id, date)?;

            println!(
                "Added {} to {} from {}",
                amount.format_with_symbol(currency),
                updated.name,
                account.name
            );
            println!(
                "  Saved: {} of {} ({}%)",
                updated.current_amount().format_with_symbol(currency),
                updated.target_amount.format_with_symbol(currency),
                updated.progress_percent()
            );
            if updated.is_reached() {
                println!("Goal reached!");
            }
        }

        GoalCommands::Delete { goal, force } => {
            let goal = service.require(&goal)?;

            if !force {
                println!("About to delete goal: {}", goal.name);
                println!("  Its contribution transactions will be kept");
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = service.delete(goal.id)?;
            println!("Deleted goal: {}", deleted.name);
        }
    }

    Ok(())
}
