//! Excluded substring removal.

use rand::RngCore;

use super::{MIN_REPLACED_RUN, RepairConstraint, random_run};
use crate::candidate::{Candidate, Span};
use crate::error::Result;
use crate::exclusion::ExclusionSet;
use crate::mutator::Mutator;

/// Rewrites letter runs while the whole candidate contains an excluded
/// entry.
///
/// The predicate looks at the full candidate, not at the run: as long as
/// any excluded entry is present, every run longer than three letters is
/// rewritten, including runs that have nothing to do with the match. A match
/// living in a run of three letters or fewer is left in place.
#[derive(Debug, Clone, Copy)]
pub struct ExcludedSubstring<'a> {
    mutator: Mutator<'a>,
    exclusions: &'a ExclusionSet,
    remove_touching: bool,
}

impl<'a> ExcludedSubstring<'a> {
    pub fn new(mutator: Mutator<'a>, exclusions: &'a ExclusionSet, remove_touching: bool) -> Self {
        Self {
            mutator,
            exclusions,
            remove_touching,
        }
    }
}

impl RepairConstraint for ExcludedSubstring<'_> {
    fn name(&self) -> &'static str {
        "excluded-substring"
    }

    fn detect(&self, candidate: &Candidate) -> Result<Vec<Span>> {
        if !self.exclusions.contains_excluded(&candidate.as_string()) {
            return Ok(Vec::new());
        }
        Ok(candidate
            .letter_runs(1)
            .into_iter()
            .filter(|run| run.len() >= MIN_REPLACED_RUN)
            .collect())
    }

    /// Re-checks the whole candidate first: an earlier rewrite in the same
    /// pass may already have removed the match.
    fn repair(&self, candidate: &mut Candidate, span: Span, rng: &mut dyn RngCore) -> Result<bool> {
        if !self.exclusions.contains_excluded(&candidate.as_string()) {
            return Ok(false);
        }
        let replacement = random_run(self.mutator, span.len(), self.remove_touching, rng)?;
        candidate.splice(span, &replacement);
        Ok(true)
    }
}
