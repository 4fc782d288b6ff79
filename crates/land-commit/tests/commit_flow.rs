// commit_flow.rs — End-to-end tests of the commit flow over mock collaborators.
//
// Flow under test:
//   1. Resolve the revision against the committable set
//   2. Fetch declared paths + commit message
//   3. Snapshot working-copy status, reconcile against a real tempdir
//   4. Put advisories to the decision policy in fixed order
//   5. Commit, then optionally mark the revision committed server-side
//
// The review service, VCS, and policy are in-memory mocks; the existence
// oracle runs against a real temp directory, so what "exists" means here
// is exactly what it means in production.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use land_commit::{CommitError, CommitFlow};
use land_reconcile::{
    Advisory, ChangeFlags, Decision, DecisionPolicy, DeclaredPathSet, ReconcileError,
    WorkingCopyStatus,
};
use land_review::{ReviewError, ReviewService, RevisionId, RevisionRef};
use land_vcs::{Vcs, VcsError};
use tempfile::TempDir;

const OWNER: &str = "dev@example.com";

// ── Mock collaborators ──────────────────────────────────────────

struct MockReview {
    revisions: Vec<RevisionRef>,
    paths: HashMap<u64, Vec<String>>,
    messages: HashMap<u64, String>,
    marked: RefCell<Vec<RevisionId>>,
    fail_mark: bool,
}

impl MockReview {
    fn single(id: u64, paths: &[&str]) -> Self {
        let mut review = Self {
            revisions: vec![rev(id, "change under test")],
            paths: HashMap::new(),
            messages: HashMap::new(),
            marked: RefCell::new(Vec::new()),
            fail_mark: false,
        };
        review.paths.insert(id, paths.iter().map(|p| p.to_string()).collect());
        review.messages.insert(id, "Reviewed change.\n".to_string());
        review
    }
}

impl ReviewService for MockReview {
    fn committable_revisions(&self, _owner: &str) -> Result<Vec<RevisionRef>, ReviewError> {
        Ok(self.revisions.clone())
    }

    fn declared_paths(&self, id: RevisionId) -> Result<DeclaredPathSet, ReviewError> {
        Ok(DeclaredPathSet::new(self.paths[&id.0].iter()))
    }

    fn commit_message(&self, id: RevisionId) -> Result<String, ReviewError> {
        Ok(self.messages[&id.0].clone())
    }

    fn mark_committed(&self, id: RevisionId) -> Result<(), ReviewError> {
        if self.fail_mark {
            return Err(ReviewError::Service {
                status: 503,
                body: "maintenance window".to_string(),
            });
        }
        self.marked.borrow_mut().push(id);
        Ok(())
    }
}

struct MockVcs {
    status: WorkingCopyStatus,
    commits: RefCell<Vec<(PathBuf, Vec<String>, String)>>,
    supported: bool,
    fail_commit: Option<String>,
}

impl MockVcs {
    fn with_status(status: WorkingCopyStatus) -> Self {
        Self {
            status,
            commits: RefCell::new(Vec::new()),
            supported: true,
            fail_commit: None,
        }
    }

    fn clean() -> Self {
        Self::with_status(WorkingCopyStatus::new())
    }
}

impl Vcs for MockVcs {
    fn ensure_working_copy(&self, root: &Path) -> Result<(), VcsError> {
        if self.supported {
            Ok(())
        } else {
            Err(VcsError::UnsupportedWorkingCopy {
                root: root.to_path_buf(),
                hint: String::new(),
            })
        }
    }

    fn status(&self, _root: &Path) -> Result<WorkingCopyStatus, VcsError> {
        Ok(self.status.clone())
    }

    fn commit(&self, root: &Path, paths: &[String], message: &str) -> Result<(), VcsError> {
        if let Some(stderr) = &self.fail_commit {
            return Err(VcsError::CommandFailed {
                command: "svn commit".to_string(),
                stderr: stderr.clone(),
            });
        }
        self.commits
            .borrow_mut()
            .push((root.to_path_buf(), paths.to_vec(), message.to_string()));
        Ok(())
    }
}

/// Answers from a fixed script and records every consultation.
struct ScriptedPolicy {
    answers: Vec<Decision>,
    seen: Vec<(Advisory, Vec<String>)>,
}

impl ScriptedPolicy {
    fn new(answers: &[Decision]) -> Self {
        Self {
            answers: answers.to_vec(),
            seen: Vec::new(),
        }
    }
}

impl DecisionPolicy for ScriptedPolicy {
    fn decide(&mut self, advisory: Advisory, paths: &[String]) -> Decision {
        self.seen.push((advisory, paths.to_vec()));
        if self.answers.is_empty() {
            panic!("policy consulted more times than scripted");
        }
        self.answers.remove(0)
    }
}

// ── Fixtures ────────────────────────────────────────────────────

fn rev(id: u64, title: &str) -> RevisionRef {
    RevisionRef {
        id: RevisionId(id),
        title: title.to_string(),
        created_at: Utc::now(),
    }
}

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "content").unwrap();
}

fn status_of(entries: &[(&str, ChangeFlags)]) -> WorkingCopyStatus {
    let mut status = WorkingCopyStatus::new();
    for (path, flags) in entries {
        status.insert(*path, *flags);
    }
    status
}

// ── Scenarios ───────────────────────────────────────────────────

#[test]
fn unincluded_local_edit_commits_declared_paths_after_proceed() {
    let wc = TempDir::new().unwrap();
    touch(wc.path(), "a.txt");
    touch(wc.path(), "b.txt");
    touch(wc.path(), "c.txt");

    let review = MockReview::single(7, &["a.txt", "b.txt"]);
    let vcs = MockVcs::with_status(status_of(&[
        ("a.txt", ChangeFlags::MODIFIED),
        ("b.txt", ChangeFlags::MODIFIED),
        ("c.txt", ChangeFlags::MODIFIED),
    ]));
    let mut policy = ScriptedPolicy::new(&[Decision::Proceed]);

    let outcome = CommitFlow::new(&review, &vcs, &mut policy, wc.path())
        .run(Some(RevisionId(7)), OWNER)
        .unwrap();

    assert_eq!(outcome.committed_paths, vec!["a.txt", "b.txt"]);
    assert_eq!(policy.seen.len(), 1);
    assert_eq!(policy.seen[0].0, Advisory::UnincludedModifications);
    assert_eq!(policy.seen[0].1, vec!["c.txt"]);

    let commits = vcs.commits.borrow();
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].1, vec!["a.txt", "b.txt"]);
}

#[test]
fn modified_descendant_under_declared_directory_refuses_to_commit() {
    let wc = TempDir::new().unwrap();
    touch(wc.path(), "dir/x.txt");

    let review = MockReview::single(7, &["dir/"]);
    let vcs = MockVcs::with_status(status_of(&[("dir/x.txt", ChangeFlags::MODIFIED)]));
    let mut policy = ScriptedPolicy::new(&[]);

    let err = CommitFlow::new(&review, &vcs, &mut policy, wc.path())
        .run(Some(RevisionId(7)), OWNER)
        .unwrap_err();

    match err {
        CommitError::Reconcile(ReconcileError::DirectoryConflict {
            directory,
            descendant,
        }) => {
            assert_eq!(directory, "dir");
            assert_eq!(descendant, "dir/x.txt");
        }
        other => panic!("expected directory conflict, got {other}"),
    }
    assert!(vcs.commits.borrow().is_empty());
    assert!(policy.seen.is_empty(), "conflicts precede all advisories");
}

#[test]
fn every_declared_path_missing_is_an_empty_commit() {
    let wc = TempDir::new().unwrap();

    let review = MockReview::single(7, &["gone.txt"]);
    let vcs = MockVcs::clean();
    let mut policy = ScriptedPolicy::new(&[]);

    let err = CommitFlow::new(&review, &vcs, &mut policy, wc.path())
        .run(Some(RevisionId(7)), OWNER)
        .unwrap_err();

    assert!(matches!(
        err,
        CommitError::Reconcile(ReconcileError::EmptyCommit)
    ));
    assert!(vcs.commits.borrow().is_empty());
}

#[test]
fn staged_deletion_commits_without_any_prompt() {
    let wc = TempDir::new().unwrap();
    // del.txt is intentionally absent from disk.

    let review = MockReview::single(7, &["del.txt"]);
    let vcs = MockVcs::with_status(status_of(&[("del.txt", ChangeFlags::DELETED)]));
    let mut policy = ScriptedPolicy::new(&[]);

    let outcome = CommitFlow::new(&review, &vcs, &mut policy, wc.path())
        .run(Some(RevisionId(7)), OWNER)
        .unwrap();

    assert_eq!(outcome.committed_paths, vec!["del.txt"]);
    assert!(policy.seen.is_empty(), "no advisory for a staged deletion");
}

#[test]
fn advisories_surface_unincluded_before_missing() {
    let wc = TempDir::new().unwrap();
    touch(wc.path(), "a.txt");
    touch(wc.path(), "c.txt");
    // gone.txt declared but absent, c.txt edited but not declared.

    let review = MockReview::single(7, &["a.txt", "gone.txt"]);
    let vcs = MockVcs::with_status(status_of(&[("c.txt", ChangeFlags::MODIFIED)]));
    let mut policy = ScriptedPolicy::new(&[Decision::Proceed, Decision::Proceed]);

    let outcome = CommitFlow::new(&review, &vcs, &mut policy, wc.path())
        .run(Some(RevisionId(7)), OWNER)
        .unwrap();

    let categories: Vec<Advisory> = policy.seen.iter().map(|(a, _)| *a).collect();
    assert_eq!(
        categories,
        vec![Advisory::UnincludedModifications, Advisory::MissingPaths]
    );
    assert_eq!(outcome.committed_paths, vec!["a.txt"]);
}

#[test]
fn abort_at_first_advisory_commits_nothing() {
    let wc = TempDir::new().unwrap();
    touch(wc.path(), "a.txt");
    touch(wc.path(), "c.txt");

    let review = MockReview::single(7, &["a.txt"]);
    let vcs = MockVcs::with_status(status_of(&[("c.txt", ChangeFlags::MODIFIED)]));
    let mut policy = ScriptedPolicy::new(&[Decision::Abort]);

    let err = CommitFlow::new(&review, &vcs, &mut policy, wc.path())
        .run(Some(RevisionId(7)), OWNER)
        .unwrap_err();

    assert!(matches!(
        err,
        CommitError::Aborted {
            advisory: Advisory::UnincludedModifications
        }
    ));
    assert!(vcs.commits.borrow().is_empty());
    assert!(review.marked.borrow().is_empty());
}

#[test]
fn abort_at_missing_paths_after_proceeding_past_unincluded() {
    let wc = TempDir::new().unwrap();
    touch(wc.path(), "a.txt");
    touch(wc.path(), "c.txt");

    let review = MockReview::single(7, &["a.txt", "gone.txt"]);
    let vcs = MockVcs::with_status(status_of(&[("c.txt", ChangeFlags::MODIFIED)]));
    let mut policy = ScriptedPolicy::new(&[Decision::Proceed, Decision::Abort]);

    let err = CommitFlow::new(&review, &vcs, &mut policy, wc.path())
        .run(Some(RevisionId(7)), OWNER)
        .unwrap_err();

    assert!(matches!(
        err,
        CommitError::Aborted {
            advisory: Advisory::MissingPaths
        }
    ));
    assert!(vcs.commits.borrow().is_empty());
}

// ── Revision resolution ─────────────────────────────────────────

#[test]
fn zero_committable_revisions_is_a_usage_error() {
    let wc = TempDir::new().unwrap();
    let review = MockReview {
        revisions: Vec::new(),
        paths: HashMap::new(),
        messages: HashMap::new(),
        marked: RefCell::new(Vec::new()),
        fail_mark: false,
    };
    let vcs = MockVcs::clean();
    let mut policy = ScriptedPolicy::new(&[]);

    let err = CommitFlow::new(&review, &vcs, &mut policy, wc.path())
        .run(None, OWNER)
        .unwrap_err();

    assert!(matches!(err, CommitError::NoCommittableRevisions { .. }));
}

#[test]
fn requested_revision_outside_committable_set_is_refused() {
    let wc = TempDir::new().unwrap();
    touch(wc.path(), "a.txt");

    let review = MockReview::single(7, &["a.txt"]);
    let vcs = MockVcs::clean();
    let mut policy = ScriptedPolicy::new(&[]);

    let err = CommitFlow::new(&review, &vcs, &mut policy, wc.path())
        .run(Some(RevisionId(99)), OWNER)
        .unwrap_err();

    assert!(matches!(
        err,
        CommitError::RevisionNotCommittable {
            revision: RevisionId(99),
            ..
        }
    ));
}

#[test]
fn several_candidates_without_a_choice_are_handed_back() {
    let wc = TempDir::new().unwrap();
    let mut review = MockReview::single(7, &["a.txt"]);
    review.revisions.push(rev(8, "second change"));
    let vcs = MockVcs::clean();
    let mut policy = ScriptedPolicy::new(&[]);

    let err = CommitFlow::new(&review, &vcs, &mut policy, wc.path())
        .run(None, OWNER)
        .unwrap_err();

    match err {
        CommitError::RevisionRequired { candidates } => {
            assert_eq!(candidates.len(), 2);
        }
        other => panic!("expected RevisionRequired, got {other}"),
    }
}

#[test]
fn sole_candidate_is_landed_without_an_explicit_id() {
    let wc = TempDir::new().unwrap();
    touch(wc.path(), "a.txt");

    let review = MockReview::single(7, &["a.txt"]);
    let vcs = MockVcs::clean();
    let mut policy = ScriptedPolicy::new(&[]);

    let outcome = CommitFlow::new(&review, &vcs, &mut policy, wc.path())
        .run(None, OWNER)
        .unwrap();

    assert_eq!(outcome.revision, RevisionId(7));
}

// ── VCS boundary ────────────────────────────────────────────────

#[test]
fn unsupported_working_copy_fails_before_reconciliation() {
    let wc = TempDir::new().unwrap();
    let review = MockReview::single(7, &["a.txt"]);
    let mut vcs = MockVcs::clean();
    vcs.supported = false;
    let mut policy = ScriptedPolicy::new(&[]);

    let err = CommitFlow::new(&review, &vcs, &mut policy, wc.path())
        .run(Some(RevisionId(7)), OWNER)
        .unwrap_err();

    assert!(matches!(
        err,
        CommitError::Vcs(VcsError::UnsupportedWorkingCopy { .. })
    ));
}

#[test]
fn commit_failure_surfaces_the_tool_diagnostic() {
    let wc = TempDir::new().unwrap();
    touch(wc.path(), "a.txt");

    let review = MockReview::single(7, &["a.txt"]);
    let mut vcs = MockVcs::clean();
    vcs.fail_commit = Some("svn: E155011: File 'a.txt' is out of date".to_string());
    let mut policy = ScriptedPolicy::new(&[]);

    let err = CommitFlow::new(&review, &vcs, &mut policy, wc.path())
        .run(Some(RevisionId(7)), OWNER)
        .unwrap_err();

    assert!(err.to_string().contains("E155011"));
    assert!(review.marked.borrow().is_empty(), "no compensation after failure");
}

#[test]
fn commit_message_reaches_the_vcs_byte_for_byte() {
    let wc = TempDir::new().unwrap();
    touch(wc.path(), "a.txt");

    let mut review = MockReview::single(7, &["a.txt"]);
    review
        .messages
        .insert(7, "Fix naïve quoting — 提交メッセージ\n".to_string());
    let vcs = MockVcs::clean();
    let mut policy = ScriptedPolicy::new(&[]);

    CommitFlow::new(&review, &vcs, &mut policy, wc.path())
        .run(Some(RevisionId(7)), OWNER)
        .unwrap();

    let commits = vcs.commits.borrow();
    assert_eq!(commits[0].2, "Fix naïve quoting — 提交メッセージ\n");
}

// ── Mark-committed compensation ─────────────────────────────────

#[test]
fn compensation_marks_the_revision_when_enabled() {
    let wc = TempDir::new().unwrap();
    touch(wc.path(), "a.txt");

    let review = MockReview::single(7, &["a.txt"]);
    let vcs = MockVcs::clean();
    let mut policy = ScriptedPolicy::new(&[]);

    let outcome = CommitFlow::new(&review, &vcs, &mut policy, wc.path())
        .mark_committed_after(true)
        .run(Some(RevisionId(7)), OWNER)
        .unwrap();

    assert!(outcome.marked_committed);
    assert_eq!(*review.marked.borrow(), vec![RevisionId(7)]);
}

#[test]
fn compensation_is_skipped_when_hooks_do_it_server_side() {
    let wc = TempDir::new().unwrap();
    touch(wc.path(), "a.txt");

    let review = MockReview::single(7, &["a.txt"]);
    let vcs = MockVcs::clean();
    let mut policy = ScriptedPolicy::new(&[]);

    let outcome = CommitFlow::new(&review, &vcs, &mut policy, wc.path())
        .run(Some(RevisionId(7)), OWNER)
        .unwrap();

    assert!(!outcome.marked_committed);
    assert!(review.marked.borrow().is_empty());
}

#[test]
fn failed_compensation_still_reports_the_commit_as_done() {
    let wc = TempDir::new().unwrap();
    touch(wc.path(), "a.txt");

    let mut review = MockReview::single(7, &["a.txt"]);
    review.fail_mark = true;
    let vcs = MockVcs::clean();
    let mut policy = ScriptedPolicy::new(&[]);

    let err = CommitFlow::new(&review, &vcs, &mut policy, wc.path())
        .mark_committed_after(true)
        .run(Some(RevisionId(7)), OWNER)
        .unwrap_err();

    match &err {
        CommitError::MarkCommittedFailed { revision, .. } => {
            assert_eq!(*revision, RevisionId(7));
        }
        other => panic!("expected MarkCommittedFailed, got {other}"),
    }
    // The working copy really was committed before the compensation ran.
    assert_eq!(vcs.commits.borrow().len(), 1);
    assert!(err.to_string().contains("was committed"));
}

// ── Invariants ──────────────────────────────────────────────────

#[test]
fn committed_paths_are_always_a_subset_of_declared() {
    let wc = TempDir::new().unwrap();
    for rel in ["a.txt", "b.txt", "extra.txt"] {
        touch(wc.path(), rel);
    }

    let review = MockReview::single(7, &["a.txt", "b.txt"]);
    let vcs = MockVcs::with_status(status_of(&[
        ("a.txt", ChangeFlags::MODIFIED),
        ("extra.txt", ChangeFlags::UNVERSIONED),
    ]));
    let mut policy = ScriptedPolicy::new(&[Decision::Proceed]);

    let outcome = CommitFlow::new(&review, &vcs, &mut policy, wc.path())
        .run(Some(RevisionId(7)), OWNER)
        .unwrap();

    let declared = ["a.txt", "b.txt"];
    for path in &outcome.committed_paths {
        assert!(declared.contains(&path.as_str()), "{path} was never declared");
    }
}
