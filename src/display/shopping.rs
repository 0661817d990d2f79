//! Shopping list display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{ShoppingAnalysis, ShoppingList};

#[derive(Tabled)]
struct ListRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Items")]
    items: String,
    #[tabled(rename = "Estimated")]
    estimated: String,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = " ")]
    check: &'static str,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Item")]
    name: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Estimated")]
    estimated: String,
    #[tabled(rename = "Actual")]
    actual: String,
}

/// Format shopping lists as a table
pub fn format_shopping_lists(lists: &[ShoppingList], currency: &str) -> String {
    if lists.is_empty() {
        return "No shopping lists yet.".to_string();
    }

    let rows = lists.iter().map(|list| {
        let purchased = list.items.iter().filter(|i| i.purchased).count();
        ListRow {
            id: list.id.to_string(),
            name: list.name.clone(),
            date: list.date.format("%Y-%m-%d").to_string(),
            items: format!("{}/{}", purchased, list.items.len()),
            estimated: list.analysis().total_estimated.format_with_symbol(currency),
            status: list.status.to_string(),
        }
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format the analysis block shown under a list
pub fn format_analysis(analysis: &ShoppingAnalysis, currency: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Estimated total:    {}\n",
        analysis.total_estimated.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "Spent:              {}\n",
        analysis.spent.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "Budget remaining:   {}\n",
        analysis.budget_remaining.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "Planned (bought):   {}\n",
        analysis.planned.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "Difference:         {} ({:+.1}%)\n",
        analysis.difference.format_with_symbol(currency),
        analysis.percentage_diff
    ));
    output.push_str(&format!("\n{}\n", analysis.insight));
    output
}

/// Format a list with its items and analysis
pub fn format_shopping_list(list: &ShoppingList, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("{} ({})\n", list.name, list.status));
    output.push_str(&format!("  ID:   {}\n", list.id));
    output.push_str(&format!("  Date: {}\n", list.date.format("%Y-%m-%d")));
    if list.is_archived() {
        output.push_str(&format!(
            "  Expense recorded: {}\n",
            if list.expense_created { "yes" } else { "no" }
        ));
    }
    if let Some(receipt) = &list.receipt_file_name {
        output.push_str(&format!("  Receipt: {}\n", receipt));
    }
    output.push('\n');

    if list.items.is_empty() {
        output.push_str("No items.\n");
    } else {
        let rows = list.items.iter().map(|item| ItemRow {
            check: if item.purchased { "[x]" } else { "[ ]" },
            id: item.id.to_string(),
            name: item.name.clone(),
            quantity: item.quantity,
            estimated: item.estimated_price.format_with_symbol(currency),
            actual: item
                .actual_price
                .map(|p| p.format_with_symbol(currency))
                .unwrap_or_else(|| "-".to_string()),
        });
        output.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        output.push('\n');
    }

    output.push('\n');
    output.push_str(&format_analysis(&list.analysis(), currency));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, ShoppingItem};
    use chrono::NaiveDate;

    fn list() -> ShoppingList {
        let mut list = ShoppingList::new("Market", NaiveDate::from_ymd_opt(2025, 4, 5).unwrap());
        let mut milk = ShoppingItem::new("Milk", 2, Money::from_units(2));
        milk.purchased = true;
        milk.actual_price = Some(Money::from_units(3));
        list.items.push(milk);
        list.items.push(ShoppingItem::new("Eggs", 1, Money::from_units(4)));
        list
    }

    #[test]
    fn test_list_table() {
        let output = format_shopping_lists(&[list()], "$");
        assert!(output.contains("Market"));
        assert!(output.contains("1/2"));
        assert!(output.contains("$8.00"));
        assert!(output.contains("active"));
    }

    #[test]
    fn test_list_details() {
        let output = format_shopping_list(&list(), "$");
        assert!(output.contains("[x]"));
        assert!(output.contains("Milk cost 50% more than planned"));
        assert!(output.contains("Spent:              $6.00"));
    }
}
