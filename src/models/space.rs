//! Family space model
//!
//! A family space groups members by e-mail. Accounts, budgets and debts
//! linked to a space are shared by everyone in it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::SpaceId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilySpace {
    pub id: SpaceId,

    pub name: String,

    pub owner_email: String,

    pub members: Vec<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl FamilySpace {
    /// Create a space whose owner is its first member
    pub fn new(name: impl Into<String>, owner_email: impl Into<String>) -> Self {
        let owner_email = normalize_email(&owner_email.into());
        let now = Utc::now();
        Self {
            id: SpaceId::new(),
            name: name.into(),
            members: vec![owner_email.clone()],
            owner_email,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_member(&self, email: &str) -> bool {
        let email = normalize_email(email);
        self.members.iter().any(|m| *m == email)
    }

    pub fn invite(&mut self, email: &str) -> Result<(), SpaceValidationError> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(SpaceValidationError::InvalidEmail(email));
        }
        if self.is_member(&email) {
            return Err(SpaceValidationError::AlreadyMember(email));
        }
        self.members.push(email);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Remove a member; returns whether the space is now empty
    pub fn remove_member(&mut self, email: &str) -> bool {
        let email = normalize_email(email);
        self.members.retain(|m| *m != email);
        self.updated_at = Utc::now();
        self.members.is_empty()
    }

    pub fn validate(&self) -> Result<(), SpaceValidationError> {
        if self.name.trim().is_empty() {
            return Err(SpaceValidationError::EmptyName);
        }
        Ok(())
    }
}

impl fmt::Display for FamilySpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} members)", self.name, self.members.len())
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Minimal shape check: something before and after a single '@'
pub fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaceValidationError {
    EmptyName,
    InvalidEmail(String),
    AlreadyMember(String),
}

impl fmt::Display for SpaceValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Space name cannot be empty"),
            Self::InvalidEmail(email) => write!(f, "Invalid e-mail address: {}", email),
            Self::AlreadyMember(email) => write!(f, "{} is already a member", email),
        }
    }
}

impl std::error::Error for SpaceValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_is_first_member() {
        let space = FamilySpace::new("Home", "Ann@Example.com");
        assert_eq!(space.owner_email, "ann@example.com");
        assert_eq!(space.members, vec!["ann@example.com".to_string()]);
        assert!(space.is_member("ANN@example.com"));
    }

    #[test]
    fn test_invite_rules() {
        let mut space = FamilySpace::new("Home", "ann@example.com");
        assert!(space.invite("bob@example.com").is_ok());
        assert_eq!(
            space.invite("Bob@example.com"),
            Err(SpaceValidationError::AlreadyMember("bob@example.com".into()))
        );
        assert!(matches!(
            space.invite("not-an-email"),
            Err(SpaceValidationError::InvalidEmail(_))
        ));
        assert_eq!(space.members.len(), 2);
    }

    #[test]
    fn test_remove_last_member_empties_space() {
        let mut space = FamilySpace::new("Home", "ann@example.com");
        space.invite("bob@example.com").unwrap();
        assert!(!space.remove_member("ann@example.com"));
        assert!(space.remove_member("bob@example.com"));
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("a@b.c"));
        assert!(!is_valid_email("@b.c"));
        assert!(!is_valid_email("a@"));
        assert!(!is_valid_email("a@b@c"));
        assert!(!is_valid_email("a b@c.d"));
    }
}
