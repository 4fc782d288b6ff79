// status.rs — Parsing `svn status` output into a WorkingCopyStatus.
//
// Plain (non-XML) seven-column format: item status in column 0, property
// status in column 1, tree-conflict marker in column 6, path from column 8.
// Lines that carry no change information (externals, ignored items,
// changelist headers, conflict summaries) are skipped.

use land_reconcile::{ChangeFlags, WorkingCopyStatus};

use crate::error::VcsError;

/// Column offset where the path begins on a status line.
const PATH_COLUMN: usize = 8;

/// Parse captured `svn status` output.
///
/// Unknown item-status characters are an error rather than a skip: this
/// snapshot decides what gets committed, so misreading a line must never
/// pass silently.
pub fn parse_status(output: &str) -> Result<WorkingCopyStatus, VcsError> {
    let mut status = WorkingCopyStatus::new();

    for line in output.lines() {
        if line.trim().is_empty() || is_noise(line) {
            continue;
        }
        // Status columns are ASCII; anything else in the first eight
        // bytes means this is not a status line.
        let (prefix, rest) = match (line.get(..PATH_COLUMN), line.get(PATH_COLUMN..)) {
            (Some(prefix), Some(rest)) if prefix.is_ascii() => (prefix, rest),
            _ => {
                return Err(VcsError::StatusParse {
                    line: line.to_string(),
                })
            }
        };

        let cols: Vec<char> = prefix.chars().collect();
        let path = rest.trim();
        if path.is_empty() {
            return Err(VcsError::StatusParse {
                line: line.to_string(),
            });
        }

        // Externals and ignored items never participate in a commit.
        if matches!(cols[0], 'X' | 'I') {
            continue;
        }

        let mut flags = item_flags(cols[0]).ok_or_else(|| VcsError::StatusParse {
            line: line.to_string(),
        })?;
        // Property-only modification shows in column 1.
        if cols[1] == 'M' {
            flags |= ChangeFlags::MODIFIED;
        }
        if cols[1] == 'C' || cols[6] == 'C' {
            flags |= ChangeFlags::CONFLICTED;
        }

        if flags.is_empty() {
            // Clean item listed for lock or changelist bookkeeping.
            continue;
        }

        // svn prints paths with the platform separator; normalize to the
        // repository-relative form the rest of the system uses.
        let path = path.replace('\\', "/");
        tracing::trace!(%path, %flags, "status entry");
        status.insert(path, flags);
    }

    Ok(status)
}

/// Flags for the item-status column, or None for an unknown character.
fn item_flags(c: char) -> Option<ChangeFlags> {
    match c {
        ' ' => Some(ChangeFlags::empty()),
        'M' => Some(ChangeFlags::MODIFIED),
        'A' => Some(ChangeFlags::ADDED),
        'D' => Some(ChangeFlags::DELETED),
        'R' => Some(ChangeFlags::REPLACED),
        '?' => Some(ChangeFlags::UNVERSIONED),
        '!' => Some(ChangeFlags::MISSING),
        'C' => Some(ChangeFlags::CONFLICTED),
        // Obstructed: the on-disk kind no longer matches what is
        // versioned. Blocks a clean commit the same way a conflict does.
        '~' => Some(ChangeFlags::CONFLICTED),
        _ => None,
    }
}

/// Informational lines svn mixes into status output.
fn is_noise(line: &str) -> bool {
    line.trim_start().starts_with('>')
        || line.starts_with("Summary of conflicts")
        || line.starts_with("Status against revision")
        || line.starts_with("--- Changelist")
        || line.starts_with("Performing status on external")
}
