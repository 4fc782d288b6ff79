// policy.rs — Decision policy plumbing for advisory findings.
//
// The reconciler never talks to the operator. Advisories flow out of
// `reconcile()` as plain data; the commit flow consults a DecisionPolicy
// once per non-empty category, in fixed order, and an Abort from either
// ends the attempt before anything has been mutated.

use std::fmt;

/// Advisory categories, in the order they are surfaced to the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    /// Locally changed paths the declared set deliberately excludes.
    UnincludedModifications,
    /// Declared paths gone from disk, already dropped from the commit.
    MissingPaths,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::UnincludedModifications => write!(f, "unincluded modifications"),
            Advisory::MissingPaths => write!(f, "missing paths"),
        }
    }
}

/// Outcome of one advisory consultation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Abort,
}

/// Maps an advisory category to proceed-or-abort. Implementations own the
/// interaction surface (a terminal prompt, a scripted answer); they never
/// contain reconciliation logic.
pub trait DecisionPolicy {
    fn decide(&mut self, advisory: Advisory, paths: &[String]) -> Decision;
}

/// Render the operator-facing prompt for an advisory. Singular and plural
/// path counts differ only in grammar, never in meaning.
pub fn advisory_prompt(advisory: Advisory, paths: &[String]) -> String {
    let listing = |paths: &[String]| {
        paths
            .iter()
            .map(|p| format!("  {}", p))
            .collect::<Vec<_>>()
            .join("\n")
    };
    match (advisory, paths) {
        (Advisory::UnincludedModifications, [path]) => format!(
            "'{}' has local changes but is not part of this change.\nCommit without it?",
            path
        ),
        (Advisory::UnincludedModifications, paths) => format!(
            "{} files have local changes but are not part of this change:\n{}\nCommit without them?",
            paths.len(),
            listing(paths)
        ),
        (Advisory::MissingPaths, [path]) => format!(
            "'{}' no longer exists in the working copy and will be left out of the commit.\nContinue?",
            path
        ),
        (Advisory::MissingPaths, paths) => format!(
            "{} files no longer exist in the working copy and will be left out of the commit:\n{}\nContinue?",
            paths.len(),
            listing(paths)
        ),
    }
}

/// Proceeds past every advisory. Used for `--yes` runs and tests.
pub struct ProceedAll;

impl DecisionPolicy for ProceedAll {
    fn decide(&mut self, advisory: Advisory, paths: &[String]) -> Decision {
        tracing::debug!(%advisory, count = paths.len(), "proceeding without confirmation");
        Decision::Proceed
    }
}

/// Aborts on the first advisory. The conservative non-interactive default.
pub struct AbortAll;

impl DecisionPolicy for AbortAll {
    fn decide(&mut self, _advisory: Advisory, _paths: &[String]) -> Decision {
        Decision::Abort
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singular_prompt_names_the_path() {
        let prompt = advisory_prompt(
            Advisory::UnincludedModifications,
            &["c.txt".to_string()],
        );
        assert!(prompt.contains("'c.txt'"));
        assert!(prompt.contains("without it?"));
    }

    #[test]
    fn plural_prompt_counts_and_lists() {
        let paths = vec!["a.txt".to_string(), "b.txt".to_string()];
        let prompt = advisory_prompt(Advisory::UnincludedModifications, &paths);
        assert!(prompt.starts_with("2 files"));
        assert!(prompt.contains("  a.txt"));
        assert!(prompt.contains("  b.txt"));
        assert!(prompt.contains("without them?"));
    }

    #[test]
    fn missing_prompt_says_left_out() {
        let prompt = advisory_prompt(Advisory::MissingPaths, &["gone.txt".to_string()]);
        assert!(prompt.contains("'gone.txt'"));
        assert!(prompt.contains("left out of the commit"));
    }

    #[test]
    fn builtin_policies_answer_as_named() {
        let paths = vec!["x".to_string()];
        assert_eq!(
            ProceedAll.decide(Advisory::MissingPaths, &paths),
            Decision::Proceed
        );
        assert_eq!(
            AbortAll.decide(Advisory::MissingPaths, &paths),
            Decision::Abort
        );
    }
}
