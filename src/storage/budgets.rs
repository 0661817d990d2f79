//! Budget plan table (`budgets.json`)

use std::cmp::Ordering;

use crate::config::CurrentView;
use crate::models::{BudgetPlan, BudgetPlanId};

use super::repository::{JsonRepository, Record};

pub type BudgetRepository = JsonRepository<BudgetPlan>;

impl Record for BudgetPlan {
    type Id = BudgetPlanId;

    const COLLECTION: &'static str = "budgets";

    const ENTITY: &'static str = "Budget";

    fn id(&self) -> BudgetPlanId {
        self.id
    }

    fn name(&self) -> &str {
        &self.label
    }

    fn matches_id(&self, identifier: &str) -> bool {
        self.id.matches(identifier) || self.month.to_string() == identifier.trim()
    }

    fn visible_in(&self, view: &CurrentView) -> bool {
        view.includes(self.space_id)
    }

    /// Most recent month first, newest plan first within a month
    fn ordering(&self, other: &Self) -> Ordering {
        other
            .month
            .cmp(&self.month)
            .then(other.created_at.cmp(&self.created_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetMethod, Money, Month};
    use tempfile::TempDir;

    #[test]
    fn test_latest_plan_first_and_month_lookup() {
        let temp_dir = TempDir::new().unwrap();
        let repo = BudgetRepository::new(temp_dir.path().join("budgets.json"));

        let jan = BudgetPlan::generate(
            Money::from_units(1000),
            BudgetMethod::ZeroBased,
            Month::new(2025, 1).unwrap(),
        );
        let mar = BudgetPlan::generate(
            Money::from_units(1000),
            BudgetMethod::ZeroBased,
            Month::new(2025, 3).unwrap(),
        );
        let mar_id = mar.id;
        repo.upsert(jan).unwrap();
        repo.upsert(mar).unwrap();

        let plans = repo.get_visible(&CurrentView::Personal).unwrap();
        assert_eq!(plans[0].id, mar_id);

        let found = repo.find("2025-03", &CurrentView::Personal).unwrap().unwrap();
        assert_eq!(found.id, mar_id);
    }
}
