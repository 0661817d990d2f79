//! Profile CLI commands
//!
//! The profile identifies the local user; its e-mail is what family
//! spaces record as membership.

use clap::Subcommand;

use crate::audit::EntityType;
use crate::config::{CurrentView, Profile, Settings};
use crate::error::{FamfinError, FamfinResult};
use crate::models::space::is_valid_email;
use crate::storage::Storage;

/// Profile subcommands
#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show the current profile
    Show,
    /// Create or change the profile
    Set {
        /// Display name
        #[arg(short, long)]
        name: Option<String>,
        /// E-mail address
        #[arg(short, long)]
        email: Option<String>,
        /// Avatar URL or path
        #[arg(short, long)]
        avatar: Option<String>,
    },
}

/// Handle a profile command
pub fn handle_profile_command(
    storage: &Storage,
    settings: &mut Settings,
    cmd: ProfileCommands,
) -> FamfinResult<()> {
    match cmd {
        ProfileCommands::Show => match &settings.profile {
            Some(profile) => {
                println!("Name:   {}", profile.name);
                println!("E-mail: {}", profile.email);
                if !profile.avatar.is_empty() {
                    println!("Avatar: {}", profile.avatar);
                }
            }
            None => {
                println!("No profile configured.");
                println!("Run 'famfin profile set --name <NAME> --email <EMAIL>' to create one.");
            }
        },

        ProfileCommands::Set {
            name,
            email,
            avatar,
        } => {
            let before = settings.profile.clone();

            let profile = match (before.clone(), name, email) {
                (Some(mut existing), name, email) => {
                    if let Some(name) = name {
                        existing.name = name;
                    }
                    if let Some(email) = email {
                        existing.email = email;
                    }
                    existing
                }
                (None, Some(name), Some(email)) => Profile {
                    name,
                    email,
                    avatar: String::new(),
                },
                (None, _, _) => {
                    return Err(FamfinError::Validation(
                        "A new profile needs both --name and --email".into(),
                    ))
                }
            };
            let profile = Profile {
                name: profile.name.trim().to_string(),
                email: profile.email.trim().to_lowercase(),
                avatar: avatar
                    .map(|a| a.trim().to_string())
                    .unwrap_or(profile.avatar),
            };

            if profile.name.is_empty() {
                return Err(FamfinError::Validation("Name cannot be empty".into()));
            }
            if !is_valid_email(&profile.email) {
                return Err(FamfinError::Validation(format!(
                    "Invalid e-mail address: '{}'",
                    profile.email
                )));
            }

            // Membership is per e-mail, so a new identity starts in the personal view
            let email_changed = before.as_ref().map(|p| p.email != profile.email);
            if email_changed == Some(true) {
                settings.current_view = CurrentView::Personal;
            }

            settings.profile = Some(profile.clone());
            settings.save(storage.paths())?;

            match &before {
                Some(before) => storage.log_update(
                    EntityType::Profile,
                    &profile.email,
                    Some(profile.name.clone()),
                    before,
                    &profile,
                )?,
                None => storage.log_create(
                    EntityType::Profile,
                    &profile.email,
                    Some(profile.name.clone()),
                    &profile,
                )?,
            }

            println!("Profile saved: {} <{}>", profile.name, profile.email);
        }
    }

    Ok(())
}
