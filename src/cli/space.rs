//! Family space CLI commands

use clap::Subcommand;

use crate::config::{CurrentView, Settings};
use crate::error::FamfinResult;
use crate::services::SpaceService;
use crate::storage::Storage;

/// Space subcommands
#[derive(Subcommand)]
pub enum SpaceCommands {
    /// Create a family space owned by your profile
    Create {
        /// Space name
        name: String,
    },
    /// List the spaces you belong to
    List,
    /// Add a member by e-mail
    Invite {
        /// Space name or ID
        space: String,
        /// E-mail of the new member
        email: String,
    },
    /// Leave a space (the last member leaving deletes it)
    Leave {
        /// Space name or ID
        space: String,
    },
    /// Switch the current view
    Switch {
        /// "personal" or a space name or ID
        target: String,
    },
    /// Show the current view
    Current,
}

/// Handle a space command
pub fn handle_space_command(
    storage: &Storage,
    settings: &mut Settings,
    cmd: SpaceCommands,
) -> FamfinResult<()> {
    let service = SpaceService::new(storage);

    match cmd {
        SpaceCommands::Create { name } => {
            let space = service.create(&name, settings)?;
            println!("Created family space: {}", space.name);
            println!("  Owner: {}", space.owner_email);
            println!("  ID:    {}", space.id);
            println!();
            println!("Run 'famfin space switch {}' to work in it", space.name);
        }

        SpaceCommands::List => {
            let spaces = service.list(settings)?;
            if spaces.is_empty() {
                println!("You are not a member of any family space.");
                return Ok(());
            }

            let current = settings.current_view.space_id();
            for space in spaces {
                let marker = if current == Some(space.id) { "*" } else { " " };
                println!("{} {}  {}", marker, space.id, space);
                for member in &space.members {
                    let role = if *member == space.owner_email {
                        " (owner)"
                    } else {
                        ""
                    };
                    println!("      {}{}", member, role);
                }
            }
        }

        SpaceCommands::Invite { space, email } => {
            let found = service.require(&space, settings)?;
            let updated = service.invite(found.id, &email, settings)?;
            println!("Invited {} to {}", email.trim(), updated.name);
        }

        SpaceCommands::Leave { space } => {
            let found = service.require(&space, settings)?;
            let outcome = service.leave(found.id, settings)?;

            println!("Left family space: {}", outcome.space.name);
            if outcome.deleted {
                println!("  You were the last member; the space was deleted");
            }
            if outcome.view_reset {
                println!("  Switched back to the personal view");
            }
        }

        SpaceCommands::Switch { target } => {
            let view = if target.trim().eq_ignore_ascii_case("personal") {
                CurrentView::Personal
            } else {
                CurrentView::Family {
                    space_id: service.require(&target, settings)?.id,
                }
            };

            let view = service.switch(view, settings)?;
            println!("Current view: {}", service.view_name(&view)?);
        }

        SpaceCommands::Current => {
            println!("Current view: {}", service.view_name(&settings.current_view)?);
        }
    }

    Ok(())
}
