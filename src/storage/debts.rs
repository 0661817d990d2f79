//! Debt and credit table (`debts.json`)

use crate::config::CurrentView;
use crate::models::{DebtCreditItem, DebtId};

use super::repository::{JsonRepository, Record};

pub type DebtRepository = JsonRepository<DebtCreditItem>;

impl Record for DebtCreditItem {
    type Id = DebtId;

    const COLLECTION: &'static str = "debts";

    const ENTITY: &'static str = "Debt/credit item";

    fn id(&self) -> DebtId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn matches_id(&self, identifier: &str) -> bool {
        self.id.matches(identifier)
    }

    fn visible_in(&self, view: &CurrentView) -> bool {
        view.includes(self.space_id)
    }
}
