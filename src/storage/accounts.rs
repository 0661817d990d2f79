//! Account table (`accounts.json`)

use crate::config::CurrentView;
use crate::models::{Account, AccountId};

use super::repository::{JsonRepository, Record};

pub type AccountRepository = JsonRepository<Account>;

impl Record for Account {
    type Id = AccountId;

    const COLLECTION: &'static str = "accounts";

    const ENTITY: &'static str = "Account";

    fn id(&self) -> AccountId {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountType, SpaceId};
    use tempfile::TempDir;

    #[test]
    fn test_accounts_scoped_by_view() {
        let temp_dir = TempDir::new().unwrap();
        let repo = AccountRepository::new(temp_dir.path().join("accounts.json"));

        let space = SpaceId::new();
        let mut shared = Account::new("Joint", AccountType::Bank);
        shared.space_id = Some(space);
        repo.upsert(Account::new("Wallet", AccountType::Cash)).unwrap();
        repo.upsert(shared).unwrap();

        let personal = repo.get_visible(&CurrentView::Personal).unwrap();
        assert_eq!(personal.len(), 1);
        assert_eq!(personal[0].name, "Wallet");

        let family = CurrentView::Family { space_id: space };
        let shared = repo.get_visible(&family).unwrap();
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].name, "Joint");

        // Names only clash within one view
        assert!(!repo.name_exists("joint", &CurrentView::Personal, None).unwrap());
        assert!(repo.name_exists("joint", &family, None).unwrap());
    }
}
