//! Audit history command

use crate::error::FamfinResult;
use crate::storage::Storage;

/// Print the most recent audit-log entries, newest last
pub fn handle_history_command(storage: &Storage, limit: usize) -> FamfinResult<()> {
    let entries = storage.audit().read_recent(limit)?;

    if entries.is_empty() {
        println!("No history yet.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
