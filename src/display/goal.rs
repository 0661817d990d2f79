//! Goal display formatting

use chrono::NaiveDate;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Countdown, Goal, GoalProjection};

use super::report::format_bar;

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Goal")]
    name: String,
    #[tabled(rename = "Saved")]
    saved: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Deadline")]
    deadline: String,
    #[tabled(rename = "Streak")]
    streak: String,
}

fn describe_streak(days: u32) -> String {
    match days {
        0 => "-".to_string(),
        1 => "1 day".to_string(),
        n => format!("{} days", n),
    }
}

fn describe_countdown(countdown: Option<Countdown>) -> String {
    match countdown {
        None => "-".to_string(),
        Some(Countdown::DaysLeft(0)) => "today".to_string(),
        Some(Countdown::DaysLeft(days)) => format!("{} days left", days),
        Some(Countdown::Overdue(days)) => format!("{} days overdue", days),
    }
}

/// Describe when the goal should be reached at the current pace
pub fn describe_projection(projection: GoalProjection) -> String {
    match projection {
        GoalProjection::Reached => "Goal reached!".to_string(),
        GoalProjection::NotEnoughHistory => {
            "Not enough contributions yet to estimate a date".to_string()
        }
        GoalProjection::RateTooLow => "Saving rate too low to estimate a date".to_string(),
        GoalProjection::OnTrack {
            completion_date,
            days_to_goal,
        } => format!(
            "Expected on {} ({} days)",
            completion_date.format("%Y-%m-%d"),
            days_to_goal
        ),
    }
}

/// Format goals as a table
pub fn format_goal_list(goals: &[Goal], currency: &str, today: NaiveDate) -> String {
    if goals.is_empty() {
        return "No goals yet.".to_string();
    }

    let rows = goals.iter().map(|goal| GoalRow {
        id: goal.id.to_string(),
        name: goal.name.clone(),
        saved: goal.current_amount().format_with_symbol(currency),
        target: goal.target_amount.format_with_symbol(currency),
        progress: format!(
            "{} {:>3}%",
            format_bar(goal.progress_percent() as f64, 10),
            goal.progress_percent()
        ),
        deadline: describe_countdown(goal.countdown(today)),
        streak: describe_streak(goal.streak()),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format a goal with its contributions and projection
pub fn format_goal_details(goal: &Goal, currency: &str, today: NaiveDate) -> String {
    let mut output = String::new();

    output.push_str(&format!("Goal: {}\n", goal.name));
    output.push_str(&format!("  ID:        {}\n", goal.id));
    output.push_str(&format!("  Category:  {}\n", goal.category));
    if !goal.icon.is_empty() {
        output.push_str(&format!("  Icon:      {}\n", goal.icon));
    }
    output.push_str(&format!(
        "  Saved:     {} of {} ({}%)\n",
        goal.current_amount().format_with_symbol(currency),
        goal.target_amount.format_with_symbol(currency),
        goal.progress_percent()
    ));
    if goal.remaining().is_positive() {
        output.push_str(&format!(
            "  Remaining: {}\n",
            goal.remaining().format_with_symbol(currency)
        ));
    }
    if let Some(deadline) = goal.deadline {
        output.push_str(&format!(
            "  Deadline:  {} ({})\n",
            deadline.format("%Y-%m-%d"),
            describe_countdown(goal.countdown(today))
        ));
    }
    if goal.streak() > 0 {
        output.push_str(&format!("  Streak:    {}\n", describe_streak(goal.streak())));
    }
    output.push_str(&format!(
        "  Forecast:  {}\n",
        describe_projection(goal.projection(today))
    ));

    if !goal.contributions.is_empty() {
        output.push_str("\nContributions:\n");
        let mut contributions = goal.contributions.clone();
        contributions.sort_by(|a, b| b.date.cmp(&a.date));
        for c in contributions {
            output.push_str(&format!(
                "  {}  {:>14}\n",
                c.date.format("%Y-%m-%d"),
                c.amount.format_with_symbol(currency)
            ));
        }
    }

    output
}
