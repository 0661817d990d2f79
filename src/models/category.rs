//! Well-known category names
//!
//! Categories are free-form strings on transactions and budget lines. These
//! constants are the ones famfin itself writes or offers by default.

/// Category given to every transfer
pub const TRANSFER: &str = "Transfer";

/// Category of goal contributions
pub const SAVINGS: &str = "Savings";

pub const OTHER: &str = "Other";

/// Category of expenses recorded from an archived shopping list
pub const GROCERIES: &str = "Food";

/// Category of a repayment on money owed
pub const DEBT_REPAYMENT: &str = "Debt Repayment";

/// Category of money collected on a credit
pub const CREDIT_COLLECTION: &str = "Credit Collection";

/// Grouping label for transfer fees in category reports
pub const TRANSFER_FEES: &str = "Transfer fees";

/// Expense categories offered when no budget plan exists
pub const DEFAULT_EXPENSE_CATEGORIES: &[&str] =
    &["Food", "Transport", "Housing", "Leisure", SAVINGS, OTHER];

pub const INCOME_CATEGORIES: &[&str] = &[
    "Salary",
    "Investment Income",
    "Rental Income",
    "Refund",
    "Gift",
    OTHER,
];

/// The closed set a category suggester may answer with
pub const SUGGESTION_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Housing",
    "Leisure",
    "Health",
    "Education",
    "Shopping",
    "Services",
    OTHER,
];
