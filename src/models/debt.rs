//! Debt and credit model
//!
//! A debt is money I owe; a credit is money owed to me. Both are paid off
//! through dated contributions whose sum is the amount paid so far.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::goal::Contribution;
use super::ids::{DebtId, SpaceId};
use super::money::Money;

/// Direction of the obligation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DebtKind {
    /// I owe this money
    #[default]
    Debt,
    /// This money is owed to me
    Credit,
}

impl DebtKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "debt" | "owe" | "owed" => Some(Self::Debt),
            "credit" | "lent" | "loan" => Some(Self::Credit),
            _ => None,
        }
    }
}

impl fmt::Display for DebtKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debt => write!(f, "debt"),
            Self::Credit => write!(f, "credit"),
        }
    }
}

/// A debt or credit being paid off over time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtCreditItem {
    pub id: DebtId,

    pub name: String,

    pub kind: DebtKind,

    pub total_amount: Money,

    #[serde(default)]
    pub contributions: Vec<Contribution>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_id: Option<SpaceId>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl DebtCreditItem {
    pub fn new(name: impl Into<String>, kind: DebtKind, total_amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: DebtId::new(),
            name: name.into(),
            kind,
            total_amount,
            contributions: Vec::new(),
            space_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn amount_paid(&self) -> Money {
        self.contributions.iter().map(|c| c.amount).sum()
    }

    pub fn remaining(&self) -> Money {
        self.total_amount - self.amount_paid()
    }

    pub fn is_settled(&self) -> bool {
        !self.remaining().is_positive()
    }

    /// Percentage paid, rounded to one decimal (0 for a zero total)
    pub fn progress_percent(&self) -> f64 {
        let ratio = self.amount_paid().ratio_of(self.total_amount);
        (ratio * 1000.0).round() / 10.0
    }

    /// Record a repayment, rejecting amounts that are not positive or
    /// exceed what is left
    pub fn repay(&mut self, date: NaiveDate, amount: Money) -> Result<(), DebtValidationError> {
        if !amount.is_positive() {
            return Err(DebtValidationError::NonPositiveRepayment(amount));
        }
        let remaining = self.remaining();
        if amount > remaining {
            return Err(DebtValidationError::ExceedsRemaining { amount, remaining });
        }

        self.contributions.push(Contribution::new(date, amount));
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Record what was already paid before tracking started
    ///
    /// Zero adds nothing; anything else must lie within the total.
    pub fn set_initial_paid(
        &mut self,
        date: NaiveDate,
        paid: Money,
    ) -> Result<(), DebtValidationError> {
        if paid.is_negative() || paid > self.total_amount {
            return Err(DebtValidationError::InitialPaidOutOfRange {
                paid,
                total: self.total_amount,
            });
        }
        if paid.is_positive() {
            self.contributions.push(Contribution::new(date, paid));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), DebtValidationError> {
        if self.name.trim().is_empty() {
            return Err(DebtValidationError::EmptyName);
        }
        if !self.total_amount.is_positive() {
            return Err(DebtValidationError::NonPositiveTotal(self.total_amount));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebtValidationError {
    EmptyName,
    NonPositiveTotal(Money),
    NonPositiveRepayment(Money),
    ExceedsRemaining { amount: Money, remaining: Money },
    InitialPaidOutOfRange { paid: Money, total: Money },
}

impl fmt::Display for DebtValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Name cannot be empty"),
            Self::NonPositiveTotal(total) => {
                write!(f, "Total amount must be greater than zero (got {})", total)
            }
            Self::NonPositiveRepayment(amount) => {
                write!(f, "Repayment must be greater than zero (got {})", amount)
            }
            Self::ExceedsRemaining { amount, remaining } => write!(
                f,
                "Repayment of {} exceeds the remaining {}",
                amount, remaining
            ),
            Self::InitialPaidOutOfRange { paid, total } => write!(
                f,
                "Amount already paid must be between 0 and {} (got {})",
                total, paid
            ),
        }
    }
}

impl std::error::Error for DebtValidationError {}
