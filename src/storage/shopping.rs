//! Shopping list table (`shopping.json`)

use std::cmp::Ordering;

use crate::models::{ShoppingList, ShoppingListId};

use super::repository::{JsonRepository, Record};

pub type ShoppingRepository = JsonRepository<ShoppingList>;

impl Record for ShoppingList {
    type Id = ShoppingListId;

    const COLLECTION: &'static str = "shopping_lists";

    const ENTITY: &'static str = "Shopping list";

    fn id(&self) -> ShoppingListId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn matches_id(&self, identifier: &str) -> bool {
        self.id.matches(identifier)
    }

    /// Active lists first, then newest first
    fn ordering(&self, other: &Self) -> Ordering {
        self.is_archived()
            .cmp(&other.is_archived())
            .then(other.date.cmp(&self.date))
            .then(other.created_at.cmp(&self.created_at))
    }
}
