//! Transaction model
//!
//! A dated monetary event: an income or an expense on one account, or a
//! transfer between two accounts (optionally with a fee paid by the source).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::TRANSFER;
use super::ids::{AccountId, DebtId, GoalId, TransactionId};
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
    Transfer,
}

impl TransactionKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Some(Self::Income),
            "expense" | "out" => Some(Self::Expense),
            "transfer" => Some(Self::Transfer),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
            Self::Transfer => write!(f, "transfer"),
        }
    }
}

/// How often a transaction recurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    #[default]
    OneTime,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "one-time" | "once" | "onetime" => Some(Self::OneTime),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            "yearly" | "annual" => Some(Self::Yearly),
            _ => None,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneTime => write!(f, "one-time"),
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    /// The account this transaction belongs to (source for transfers)
    pub account_id: AccountId,

    pub date: NaiveDate,

    /// Category name ("Transfer" for transfers)
    pub category: String,

    pub description: String,

    /// Always positive; `kind` gives the direction
    pub amount: Money,

    pub kind: TransactionKind,

    #[serde(default)]
    pub frequency: Frequency,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_name: Option<String>,

    /// Receiving account of a transfer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_account_id: Option<AccountId>,

    /// Fee of a transfer, paid by the source account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_fee: Option<Money>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debt_id: Option<DebtId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<GoalId>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new income or expense
    pub fn new(
        account_id: AccountId,
        date: NaiveDate,
        kind: TransactionKind,
        amount: Money,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            account_id,
            date,
            category: category.into(),
            description: description.into(),
            amount,
            kind,
            frequency: Frequency::OneTime,
            attachment_name: None,
            destination_account_id: None,
            transfer_fee: None,
            debt_id: None,
            goal_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a transfer between two accounts
    pub fn transfer(
        from: AccountId,
        to: AccountId,
        date: NaiveDate,
        amount: Money,
        fee: Money,
        description: impl Into<String>,
    ) -> Self {
        let mut txn = Self::new(
            from,
            date,
            TransactionKind::Transfer,
            amount,
            TRANSFER,
            description,
        );
        txn.destination_account_id = Some(to);
        txn.transfer_fee = Some(fee);
        txn
    }

    pub fn is_transfer(&self) -> bool {
        self.kind == TransactionKind::Transfer
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// Fee of a transfer, zero for other kinds
    pub fn fee(&self) -> Money {
        if self.is_transfer() {
            self.transfer_fee.unwrap_or_default()
        } else {
            Money::zero()
        }
    }

    /// Check whether this transaction moves money in or out of `account_id`
    pub fn touches(&self, account_id: AccountId) -> bool {
        self.account_id == account_id
            || (self.is_transfer() && self.destination_account_id == Some(account_id))
    }

    /// Signed change this transaction makes to the balance of `account_id`
    ///
    /// The source of a transfer loses the amount plus the fee; the
    /// destination receives the full amount.
    pub fn balance_effect(&self, account_id: AccountId) -> Money {
        let mut effect = Money::zero();

        if self.account_id == account_id {
            effect += match self.kind {
                TransactionKind::Income => self.amount,
                TransactionKind::Expense => -self.amount,
                TransactionKind::Transfer => -(self.amount + self.fee()),
            };
        }

        if self.is_transfer() && self.destination_account_id == Some(account_id) {
            effect += self.amount;
        }

        effect
    }

    /// What this transaction costs in a spending summary
    ///
    /// Expenses count fully; transfers only count their fee.
    pub fn spending(&self) -> Money {
        match self.kind {
            TransactionKind::Expense => self.amount,
            TransactionKind::Transfer => self.fee(),
            TransactionKind::Income => Money::zero(),
        }
    }

    /// Case-insensitive search over description and category
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.description.to_lowercase().contains(&needle)
            || self.category.to_lowercase().contains(&needle)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }

        if self.description.trim().is_empty() {
            return Err(TransactionValidationError::EmptyDescription);
        }

        match self.kind {
            TransactionKind::Transfer => {
                match self.destination_account_id {
                    None => return Err(TransactionValidationError::MissingDestination),
                    Some(dest) if dest == self.account_id => {
                        return Err(TransactionValidationError::SameAccountTransfer)
                    }
                    Some(_) => {}
                }
                if self.fee().is_negative() {
                    return Err(TransactionValidationError::NegativeFee(self.fee()));
                }
            }
            TransactionKind::Income | TransactionKind::Expense => {
                if self.category.trim().is_empty() {
                    return Err(TransactionValidationError::MissingCategory);
                }
                if self.destination_account_id.is_some() || self.transfer_fee.is_some() {
                    return Err(TransactionValidationError::TransferFieldsOnNonTransfer);
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.kind {
            TransactionKind::Income => "+",
            TransactionKind::Expense => "-",
            TransactionKind::Transfer => "",
        };
        write!(
            f,
            "{} {} {}{}",
            self.date.format("%Y-%m-%d"),
            self.description,
            sign,
            self.amount
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
    EmptyDescription,
    MissingCategory,
    MissingDestination,
    SameAccountTransfer,
    NegativeFee(Money),
    TransferFieldsOnNonTransfer,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero (got {})", amount)
            }
            Self::EmptyDescription => write!(f, "Description cannot be empty"),
            Self::MissingCategory => write!(f, "Income and expenses need a category"),
            Self::MissingDestination => write!(f, "A transfer needs a destination account"),
            Self::SameAccountTransfer => write!(
                f,
                "The destination account must differ from the source account"
            ),
            Self::NegativeFee(fee) => write!(f, "Transfer fee cannot be negative (got {})", fee),
            Self::TransferFieldsOnNonTransfer => write!(
                f,
                "Only transfers can have a destination account or a fee"
            ),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_expense_and_income_effects() {
        let account = AccountId::new();
        let expense = Transaction::new(
            account,
            date(),
            TransactionKind::Expense,
            Money::from_units(50),
            "Food",
            "Market",
        );
        let income = Transaction::new(
            account,
            date(),
            TransactionKind::Income,
            Money::from_units(200),
            "Salary",
            "Pay",
        );

        assert_eq!(expense.balance_effect(account), Money::from_units(-50));
        assert_eq!(income.balance_effect(account), Money::from_units(200));
        assert_eq!(expense.balance_effect(AccountId::new()), Money::zero());
    }

    #[test]
    fn test_transfer_effects_fee_paid_by_source() {
        let from = AccountId::new();
        let to = AccountId::new();
        let txn = Transaction::transfer(
            from,
            to,
            date(),
            Money::from_units(100),
            Money::from_units(2),
            "Move savings",
        );

        assert_eq!(txn.balance_effect(from), Money::from_units(-102));
        assert_eq!(txn.balance_effect(to), Money::from_units(100));
        assert_eq!(txn.spending(), Money::from_units(2));
        assert_eq!(txn.category, "Transfer");
        assert!(txn.touches(to));
        assert!(txn.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let account = AccountId::new();
        let mut txn = Transaction::new(
            account,
            date(),
            TransactionKind::Expense,
            Money::zero(),
            "Food",
            "Market",
        );
        assert!(matches!(
            txn.validate(),
            Err(TransactionValidationError::NonPositiveAmount(_))
        ));

        txn.amount = Money::from_units(5);
        txn.category = String::new();
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::MissingCategory)
        );

        let same = Transaction::transfer(
            account,
            account,
            date(),
            Money::from_units(5),
            Money::zero(),
            "Loop",
        );
        assert_eq!(
            same.validate(),
            Err(TransactionValidationError::SameAccountTransfer)
        );
    }

    #[test]
    fn test_matches_text() {
        let txn = Transaction::new(
            AccountId::new(),
            date(),
            TransactionKind::Expense,
            Money::from_units(5),
            "Transport",
            "Taxi to airport",
        );
        assert!(txn.matches_text("TAXI"));
        assert!(txn.matches_text("transp"));
        assert!(!txn.matches_text("rent"));
    }

    #[test]
    fn test_parse_kind_and_frequency() {
        assert_eq!(TransactionKind::parse("Income"), Some(TransactionKind::Income));
        assert_eq!(TransactionKind::parse("gift"), None);
        assert_eq!(Frequency::parse("monthly"), Some(Frequency::Monthly));
        assert_eq!(Frequency::parse("annual"), Some(Frequency::Yearly));
    }

    #[test]
    fn test_display() {
        let txn = Transaction::new(
            AccountId::new(),
            date(),
            TransactionKind::Expense,
            Money::from_cents(5000),
            "Food",
            "Market",
        );
        assert_eq!(format!("{}", txn), "2025-01-15 Market -50.00");
    }
}
