//! Shopping list CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::shopping::{format_analysis, format_shopping_list, format_shopping_lists};
use crate::error::{FamfinError, FamfinResult};
use crate::models::{ShoppingItemId, ShoppingList};
use crate::services::{AccountService, ItemUpdate, ShoppingService};
use crate::storage::Storage;

use super::{parse_amount, today};

/// Shopping subcommands
#[derive(Subcommand)]
pub enum ShopCommands {
    /// Start a new shopping list
    Create {
        /// List name, defaults to "New list - <date>"
        name: Option<String>,
    },
    /// List shopping lists
    List,
    /// Show a list with its items and analysis
    Show {
        /// List name or ID
        list: String,
    },
    /// Add an item to a list
    Add {
        /// List name or ID
        list: String,
        /// Item name
        item: String,
        /// Estimated unit price
        #[arg(short, long)]
        price: String,
        /// Quantity
        #[arg(short, long, default_value = "1")]
        quantity: u32,
    },
    /// Change an item
    Edit {
        /// List name or ID
        list: String,
        /// Item name or ID
        item: String,
        /// New quantity
        #[arg(short, long)]
        quantity: Option<u32>,
        /// New estimated unit price
        #[arg(short, long)]
        price: Option<String>,
        /// Actual unit price paid
        #[arg(short, long)]
        actual: Option<String>,
    },
    /// Remove an item
    Remove {
        /// List name or ID
        list: String,
        /// Item name or ID
        item: String,
    },
    /// Tick an item off as bought
    Buy {
        /// List name or ID
        list: String,
        /// Item name or ID
        item: String,
        /// Actual unit price paid, defaults to the estimate
        #[arg(short, long)]
        actual: Option<String>,
    },
    /// Put a bought item back on the list
    Unbuy {
        /// List name or ID
        list: String,
        /// Item name or ID
        item: String,
    },
    /// Archive a list, optionally recording the spending as an expense
    Archive {
        /// List name or ID
        list: String,
        /// Record what was spent as a Food expense
        #[arg(short, long)]
        expense: bool,
        /// Account for the expense, defaults to the first account
        #[arg(short, long)]
        account: Option<String>,
        /// Receipt file name
        #[arg(short, long)]
        receipt: Option<String>,
    },
    /// Delete a list
    Delete {
        /// List name or ID
        list: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

fn require_item(list: &ShoppingList, item: &str) -> FamfinResult<ShoppingItemId> {
    list.find_item(item)
        .map(|i| i.id)
        .ok_or_else(|| FamfinError::NotFound {
            entity_type: "Shopping item",
            identifier: item.to_string(),
        })
}

/// Handle a shopping command
pub fn handle_shop_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ShopCommands,
) -> FamfinResult<()> {
    let service = ShoppingService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        ShopCommands::Create { name } => {
            let list = service.create(name.as_deref(), today())?;
            println!("Created shopping list: {}", list.name);
            println!("  ID: {}", list.id);
        }

        ShopCommands::List => {
            println!("{}", format_shopping_lists(&service.list()?, currency));
        }

        ShopCommands::Show { list } => {
            let list = service.require(&list)?;
            print!("{}", format_shopping_list(&list, currency));
        }

        ShopCommands::Add {
            list,
            item,
            price,
            quantity,
        } => {
            let list = service.require(&list)?;
            let (updated, item_id) =
                service.add_item(list.id, &item, quantity, parse_amount(&price)?)?;
            println!("Added {} x{} to {}", item, quantity, updated.name);
            println!("  ID: {}", item_id);
        }

        ShopCommands::Edit {
            list,
            item,
            quantity,
            price,
            actual,
        } => {
            let list = service.require(&list)?;
            let item_id = require_item(&list, &item)?;

            let update = ItemUpdate {
                quantity,
                estimated_price: price.as_deref().map(parse_amount).transpose()?,
                actual_price: actual.as_deref().map(parse_amount).transpose()?,
                purchased: None,
            };
            let updated = service.update_item(list.id, item_id, update)?;
            println!("Updated {} in {}", item, updated.name);
        }

        ShopCommands::Remove { list, item } => {
            let list = service.require(&list)?;
            let item_id = require_item(&list, &item)?;
            let updated = service.remove_item(list.id, item_id)?;
            println!("Removed {} from {}", item, updated.name);
        }

        ShopCommands::Buy { list, item, actual } => {
            let list = service.require(&list)?;
            let item_id = require_item(&list, &item)?;
            let actual = actual.as_deref().map(parse_amount).transpose()?;

            let updated = service.mark_purchased(list.id, item_id, actual)?;
            println!("Bought {}", item);
            println!();
            print!("{}", format_analysis(&updated.analysis(), currency));
        }

        ShopCommands::Unbuy { list, item } => {
            let list = service.require(&list)?;
            let item_id = require_item(&list, &item)?;
            service.update_item(
                list.id,
                item_id,
                ItemUpdate {
                    purchased: Some(false),
                    ..Default::default()
                },
            )?;
            println!("{} is back on the list", item);
        }

        ShopCommands::Archive {
            list,
            expense,
            account,
            receipt,
        } => {
            let list = service.require(&list)?;
            let account_id = account
                .as_deref()
                .map(|a| AccountService::new(storage).require(a).map(|a| a.id))
                .transpose()?;

            let outcome = service.archive(list.id, expense, account_id, receipt, today())?;

            println!("Archived shopping list: {}", outcome.list.name);
            if let Some(txn) = &outcome.expense {
                println!(
                    "  Recorded expense of {} ({})",
                    txn.amount.format_with_symbol(currency),
                    txn.id
                );
            }
            println!();
            print!("{}", format_analysis(&outcome.list.analysis(), currency));
        }

        ShopCommands::Delete { list, force } => {
            let list = service.require(&list)?;

            if !force {
                println!("About to delete shopping list: {}", list.name);
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = service.delete(list.id)?;
            println!("Deleted shopping list: {}", deleted.name);
        }
    }

    Ok(())
}
