//! Backup naming.
//!
//! A backup sits next to its document and carries the local time it was
//! taken: `warmups.json` backed up at 2025-03-04 09:15:02 becomes
//! `warmups.json.20250304_091502.bak`.

use chrono::{DateTime, Local};

/// `strftime` pattern for the timestamp part of a backup name.
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Suffix shared by all backups.
pub const BACKUP_EXTENSION: &str = ".bak";

/// Name of the backup of `name` taken at `at`.
pub fn backup_name(name: &str, at: &DateTime<Local>) -> String {
    format!(
        "{name}.{}{BACKUP_EXTENSION}",
        at.format(BACKUP_TIMESTAMP_FORMAT)
    )
}

/// Returns `true` if `name` was produced by [`backup_name`].
pub fn is_backup_name(name: &str) -> bool {
    name.ends_with(BACKUP_EXTENSION)
}
