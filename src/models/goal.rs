//! Savings goal model
//!
//! A goal is a target amount reached through dated contributions. The
//! current amount is always the sum of the contributions.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::GoalId;
use super::money::Money;

/// What the money is being saved for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum GoalCategory {
    #[default]
    SimpleSavings,
    PersonalProject,
    Investment,
}

impl GoalCategory {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "simple-savings" | "savings" | "simple" => Some(Self::SimpleSavings),
            "personal-project" | "project" => Some(Self::PersonalProject),
            "investment" | "invest" => Some(Self::Investment),
            _ => None,
        }
    }
}

impl fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SimpleSavings => write!(f, "Simple savings"),
            Self::PersonalProject => write!(f, "Personal project"),
            Self::Investment => write!(f, "Investment"),
        }
    }
}

/// A dated payment toward a goal or a debt/credit item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub date: NaiveDate,
    pub amount: Money,
}

impl Contribution {
    pub fn new(date: NaiveDate, amount: Money) -> Self {
        Self { date, amount }
    }
}

/// Estimated completion of a goal from its contribution pace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalProjection {
    Reached,
    /// Fewer than two contributions
    NotEnoughHistory,
    /// Contributions do not add up to a positive daily rate
    RateTooLow,
    OnTrack {
        completion_date: NaiveDate,
        days_to_goal: i64,
    },
}

/// Distance to the goal's deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    DaysLeft(i64),
    Overdue(i64),
}

/// Saver level earned from the total saved across all goals
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SaverLevel {
    Beginner,
    Intermediate,
    Expert,
    Master,
}

impl SaverLevel {
    /// Thresholds in whole units: 100 000, 500 000 and 1 000 000
    pub fn from_total_saved(total: Money) -> Self {
        if total >= Money::from_units(1_000_000) {
            Self::Master
        } else if total >= Money::from_units(500_000) {
            Self::Expert
        } else if total >= Money::from_units(100_000) {
            Self::Intermediate
        } else {
            Self::Beginner
        }
    }
}

impl fmt::Display for SaverLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Beginner => write!(f, "Beginner"),
            Self::Intermediate => write!(f, "Intermediate"),
            Self::Expert => write!(f, "Expert"),
            Self::Master => write!(f, "Master"),
        }
    }
}

/// A savings goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,

    pub name: String,

    pub target_amount: Money,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,

    #[serde(default)]
    pub category: GoalCategory,

    /// Icon key used by front-ends (e.g. "car", "house", "bag")
    #[serde(default)]
    pub icon: String,

    #[serde(default)]
    pub contributions: Vec<Contribution>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Goal {
    pub fn new(name: impl Into<String>, target_amount: Money, category: GoalCategory) -> Self {
        let now = Utc::now();
        Self {
            id: GoalId::new(),
            name: name.into(),
            target_amount,
            deadline: None,
            category,
            icon: String::new(),
            contributions: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn add_contribution(&mut self, date: NaiveDate, amount: Money) {
        self.contributions.push(Contribution::new(date, amount));
        self.updated_at = Utc::now();
    }

    pub fn current_amount(&self) -> Money {
        self.contributions.iter().map(|c| c.amount).sum()
    }

    /// Amount still missing (negative once the target is exceeded)
    pub fn remaining(&self) -> Money {
        self.target_amount - self.current_amount()
    }

    pub fn is_reached(&self) -> bool {
        !self.remaining().is_positive()
    }

    /// Rounded percentage of the target already saved (0 for a zero target)
    pub fn progress_percent(&self) -> i64 {
        (self.current_amount().ratio_of(self.target_amount) * 100.0).round() as i64
    }

    /// Project the completion date from the average daily contribution rate
    ///
    /// The rate is the sum of all contributions divided by the number of days
    /// between the first and the last one (at least one day).
    pub fn projection(&self, today: NaiveDate) -> GoalProjection {
        let remaining = self.remaining();
        if !remaining.is_positive() {
            return GoalProjection::Reached;
        }

        if self.contributions.len() < 2 {
            return GoalProjection::NotEnoughHistory;
        }

        let mut sorted = self.contributions.clone();
        sorted.sort_by_key(|c| c.date);

        let (first, last) = match (sorted.first(), sorted.last()) {
            (Some(first), Some(last)) => (first.date, last.date),
            _ => return GoalProjection::NotEnoughHistory,
        };
        let days = (last - first).num_days().max(1) as f64;
        let total: Money = sorted.iter().map(|c| c.amount).sum();
        let daily_rate = total.as_f64() / days;

        if daily_rate <= 0.0 {
            return GoalProjection::RateTooLow;
        }

        let days_to_goal = (remaining.as_f64() / daily_rate).ceil() as i64;
        let completion = Duration::try_days(days_to_goal)
            .and_then(|delta| today.checked_add_signed(delta));
        match completion {
            Some(completion_date) => GoalProjection::OnTrack {
                completion_date,
                days_to_goal,
            },
            // Completion falls outside the calendar
            None => GoalProjection::RateTooLow,
        }
    }

    /// Consecutive days with a contribution, counted back from the latest one
    pub fn streak(&self) -> u32 {
        let mut days: Vec<NaiveDate> = self.contributions.iter().map(|c| c.date).collect();
        days.sort_unstable_by(|a, b| b.cmp(a));
        days.dedup();

        let mut streak = 0;
        let mut previous: Option<NaiveDate> = None;
        for day in days {
            match previous {
                Some(prev) if prev.pred_opt() != Some(day) => break,
                _ => {
                    streak += 1;
                    previous = Some(day);
                }
            }
        }
        streak
    }

    /// Days left until the deadline, if one is set
    pub fn countdown(&self, today: NaiveDate) -> Option<Countdown> {
        let deadline = self.deadline?;
        let days = (deadline - today).num_days();
        Some(if days < 0 {
            Countdown::Overdue(-days)
        } else {
            Countdown::DaysLeft(days)
        })
    }

    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.name.trim().is_empty() {
            return Err(GoalValidationError::EmptyName);
        }
        if !self.target_amount.is_positive() {
            return Err(GoalValidationError::NonPositiveTarget(self.target_amount));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    EmptyName,
    NonPositiveTarget(Money),
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Goal name cannot be empty"),
            Self::NonPositiveTarget(target) => {
                write!(f, "Goal target must be greater than zero (got {})", target)
            }
        }
    }
}

impl std::error::Error for GoalValidationError {}
