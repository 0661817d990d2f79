//! Audit trail for famfin
//!
//! Every create, update and delete performed through the services is appended
//! to `audit.log` as one JSON object per line, with the entity state before
//! and after the change.
//!
//! - `AuditEntry`: one logged operation.
//! - `AuditLogger`: appends entries and reads them back.
//! - `generate_diff`: a one-line summary of the fields an update changed.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
