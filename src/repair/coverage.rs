//! Class coverage enforcement.

use rand::{Rng, RngCore};

use super::{ExcludedSubstring, RepairConstraint, RepairLimit, repair_until_stable};
use crate::candidate::{Candidate, Span};
use crate::error::{GeneratorError, Result};
use crate::exclusion::ExclusionSet;
use crate::mutator::Mutator;

/// True when every class contributes at least one character.
pub fn confirm_proportions(counts: &[usize]) -> bool {
    counts.iter().all(|count| *count >= 1)
}

/// Every class of the pool must appear at least once.
///
/// Terminates only if the candidate is at least as long as the number of
/// classes; shorter candidates run into the repair limit.
#[derive(Debug, Clone, Copy)]
pub struct ClassCoverage<'a> {
    mutator: Mutator<'a>,
    exclusions: &'a ExclusionSet,
    limit: RepairLimit,
}

impl<'a> ClassCoverage<'a> {
    pub fn new(mutator: Mutator<'a>, exclusions: &'a ExclusionSet, limit: RepairLimit) -> Self {
        Self {
            mutator,
            exclusions,
            limit,
        }
    }

    pub fn class_counts(&self, candidate: &Candidate) -> Vec<usize> {
        self.mutator.pool().class_counts(candidate.chars())
    }

    /// Runs coverage repair to completion.
    pub fn ensure_proportions(&self, candidate: &mut Candidate, rng: &mut dyn RngCore) -> Result<usize> {
        repair_until_stable(self, candidate, rng, self.limit)
    }
}

impl RepairConstraint for ClassCoverage<'_> {
    fn name(&self) -> &'static str {
        "class-coverage"
    }

    /// The whole candidate is the violating span while a class is missing.
    fn detect(&self, candidate: &Candidate) -> Result<Vec<Span>> {
        if confirm_proportions(&self.class_counts(candidate)) {
            return Ok(Vec::new());
        }
        Ok(vec![Span::new(0, candidate.len())])
    }

    /// One sweep over the classes in order. Counts are refreshed before
    /// each class, so a class covered by an earlier write is skipped.
    fn repair(&self, candidate: &mut Candidate, _span: Span, rng: &mut dyn RngCore) -> Result<bool> {
        if candidate.is_empty() {
            return Err(GeneratorError::InvalidConfig(
                "cannot cover character classes in an empty candidate".to_string(),
            ));
        }

        let mut changed = false;
        for index in 0..self.mutator.pool().len() {
            if self.class_counts(candidate)[index] >= 1 {
                continue;
            }
            let position = rng.gen_range(0..candidate.len());
            let c = self.mutator.char_from_class(index, rng)?;
            candidate.set(position, c);
            changed = true;

            if !self.exclusions.is_empty() {
                let excluded = ExcludedSubstring::new(self.mutator, self.exclusions, false);
                repair_until_stable(&excluded, candidate, rng, self.limit)?;
            }
        }
        Ok(changed)
    }
}
