// prompt.rs — Interactive decision policy and revision selection.

use std::io::{self, BufRead, Write};

use land_reconcile::{advisory_prompt, Advisory, Decision, DecisionPolicy};
use land_review::{RevisionId, RevisionRef};

/// Decision policy backed by a terminal [y/N] prompt. Anything but an
/// explicit yes — including a read failure or EOF — aborts.
pub struct PromptPolicy;

impl DecisionPolicy for PromptPolicy {
    fn decide(&mut self, advisory: Advisory, paths: &[String]) -> Decision {
        match confirm(&advisory_prompt(advisory, paths)) {
            Ok(true) => Decision::Proceed,
            Ok(false) | Err(_) => Decision::Abort,
        }
    }
}

fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    let answer = input.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Ask the operator which of several committable revisions to land.
pub fn select_revision(candidates: &[RevisionRef]) -> anyhow::Result<RevisionId> {
    println!("Committable revisions:");
    for rev in candidates {
        println!(
            "  {:>8}  {}  {}",
            rev.id,
            rev.created_at.format("%Y-%m-%d"),
            rev.title
        );
    }
    print!("Revision to land: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    parse_selection(&input, candidates)
        .ok_or_else(|| anyhow::anyhow!("'{}' is not a committable revision", input.trim()))
}

/// Resolve typed input to one of the listed revisions.
fn parse_selection(input: &str, candidates: &[RevisionRef]) -> Option<RevisionId> {
    let id: RevisionId = input.trim().parse().ok()?;
    candidates.iter().find(|r| r.id == id).map(|r| r.id)
}
