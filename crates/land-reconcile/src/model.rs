// model.rs — Working-copy status snapshot and the declared path set.
//
// All paths in this module are repository-relative with '/' separators,
// the form both the review service and `svn status` emit. Normalization
// happens once, at DeclaredPathSet construction.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Bitset of per-path change flags, mirroring the VCS status columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeFlags(u8);

impl ChangeFlags {
    /// Content or property modification.
    pub const MODIFIED: ChangeFlags = ChangeFlags(1 << 0);
    /// Scheduled for addition.
    pub const ADDED: ChangeFlags = ChangeFlags(1 << 1);
    /// Scheduled for deletion.
    pub const DELETED: ChangeFlags = ChangeFlags(1 << 2);
    /// Present on disk but not under version control.
    pub const UNVERSIONED: ChangeFlags = ChangeFlags(1 << 3);
    /// Tracked but absent from disk without a scheduled deletion.
    pub const MISSING: ChangeFlags = ChangeFlags(1 << 4);
    /// In a conflicted state from a prior update or merge.
    pub const CONFLICTED: ChangeFlags = ChangeFlags(1 << 5);
    /// Deleted and re-added in place.
    pub const REPLACED: ChangeFlags = ChangeFlags(1 << 6);

    pub const fn empty() -> Self {
        ChangeFlags(0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when every flag in `other` is set in `self`.
    pub fn contains(self, other: ChangeFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ChangeFlags {
    type Output = ChangeFlags;

    fn bitor(self, rhs: ChangeFlags) -> ChangeFlags {
        ChangeFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for ChangeFlags {
    fn bitor_assign(&mut self, rhs: ChangeFlags) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for ChangeFlags {
    /// Status-column style rendering, e.g. `M`, `D!`, `A+C`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const LETTERS: &[(ChangeFlags, char)] = &[
            (ChangeFlags::MODIFIED, 'M'),
            (ChangeFlags::ADDED, 'A'),
            (ChangeFlags::DELETED, 'D'),
            (ChangeFlags::REPLACED, 'R'),
            (ChangeFlags::UNVERSIONED, '?'),
            (ChangeFlags::MISSING, '!'),
            (ChangeFlags::CONFLICTED, 'C'),
        ];
        for (flag, letter) in LETTERS {
            if self.contains(*flag) {
                write!(f, "{}", letter)?;
            }
        }
        Ok(())
    }
}

/// Snapshot of the working copy's change flags at reconciliation time.
///
/// Built once per commit attempt and never updated while reconciliation
/// runs. Iteration order is sorted by path so conflict reporting and
/// advisory lists are deterministic.
#[derive(Debug, Clone, Default)]
pub struct WorkingCopyStatus {
    entries: BTreeMap<String, ChangeFlags>,
}

impl WorkingCopyStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record flags for a path, merging with any flags already present.
    pub fn insert(&mut self, path: impl Into<String>, flags: ChangeFlags) {
        *self.entries.entry(path.into()).or_default() |= flags;
    }

    /// Flags for a path; empty if the path has no status entry.
    pub fn flags(&self, path: &str) -> ChangeFlags {
        self.entries.get(path).copied().unwrap_or_default()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ChangeFlags)> {
        self.entries.iter().map(|(p, f)| (p.as_str(), *f))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The authoritative path list the review service declared for one
/// revision. Immutable once built; membership is the only semantic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclaredPathSet {
    paths: BTreeSet<String>,
}

impl DeclaredPathSet {
    /// Build the set, normalizing each entry: surrounding whitespace and
    /// trailing '/' are stripped, and blank entries are dropped. `dir/`
    /// and `dir` therefore name the same entry.
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let paths = paths
            .into_iter()
            .filter_map(|p| {
                let p = p.as_ref().trim().trim_end_matches('/');
                if p.is_empty() {
                    None
                } else {
                    Some(p.to_string())
                }
            })
            .collect();
        Self { paths }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// The shortest declared path that is a strict filesystem ancestor of
    /// `path`, if any. Used for the directory-containment conflict check:
    /// a VCS operation on the returned directory would sweep `path` in.
    pub fn ancestor_of(&self, path: &str) -> Option<&str> {
        for (idx, byte) in path.bytes().enumerate() {
            if byte == b'/' {
                if let Some(hit) = self.paths.get(&path[..idx]) {
                    return Some(hit.as_str());
                }
            }
        }
        None
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Read-only filesystem queries, injected so the reconciler performs no
/// I/O of its own. Independent of [`WorkingCopyStatus`]: a path can be
/// flagged DELETED yet intentionally absent, or declared yet missing.
pub trait ExistenceOracle {
    /// Whether a filesystem entry exists at the path. Regular files,
    /// directories, and symbolic links all count.
    fn exists(&self, path: &str) -> bool;

    /// Whether the path is a symbolic link. Must be true even for a
    /// dangling link whose target is gone.
    fn is_symlink(&self, path: &str) -> bool;
}

/// Outcome of a successful reconciliation.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// Paths to actually commit. Always a subset of the declared set,
    /// sorted, and non-empty.
    pub final_paths: BTreeSet<String>,
    /// Locally changed paths the declared set deliberately excludes.
    /// Advisory: the operator decides whether to proceed without them.
    pub unincluded: Vec<String>,
    /// Declared paths that are gone from disk without a DELETED flag to
    /// explain them. Advisory: already dropped from `final_paths`.
    pub missing: Vec<String>,
}
