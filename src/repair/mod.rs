//! Candidate repair passes
//!
//! Each pass detects violating spans of a candidate and rewrites them with
//! fresh random characters. Passes are not commutative: the generator
//! applies them in a fixed order.

mod adjacency;
mod coverage;
mod excluded;
mod words;

pub use adjacency::{DuplicateAdjacency, remove_touching_duplicates};
pub use coverage::{ClassCoverage, confirm_proportions};
pub use excluded::ExcludedSubstring;
pub use words::{DictionaryWord, SentenceSafeWords};

use rand::RngCore;

use crate::candidate::{Candidate, Span};
use crate::error::{GeneratorError, Result};
use crate::mutator::Mutator;

/// Letter runs of this length or shorter are never rewritten.
pub const MIN_REPLACED_RUN: usize = 4;

/// Upper bound on passes of a fixed-point repair loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairLimit {
    /// Loop until stable, possibly forever.
    Unbounded,
    /// Fail with [`GeneratorError::RepairDiverged`] after this many passes.
    Passes(usize),
}

impl RepairLimit {
    fn allows(self, passes: usize) -> bool {
        match self {
            RepairLimit::Unbounded => true,
            RepairLimit::Passes(max) => passes <= max,
        }
    }
}

impl Default for RepairLimit {
    fn default() -> Self {
        RepairLimit::Passes(10_000)
    }
}

/// A detectable, locally repairable constraint on a candidate.
pub trait RepairConstraint {
    fn name(&self) -> &'static str;

    /// Spans violating the constraint in the current candidate.
    fn detect(&self, candidate: &Candidate) -> Result<Vec<Span>>;

    /// Rewrites `span`. Returns whether the candidate changed.
    fn repair(&self, candidate: &mut Candidate, span: Span, rng: &mut dyn RngCore) -> Result<bool>;
}

/// Detects once and repairs every reported span. Returns the number of
/// rewritten spans.
pub fn apply_once(
    constraint: &dyn RepairConstraint,
    candidate: &mut Candidate,
    rng: &mut dyn RngCore,
) -> Result<usize> {
    let mut rewritten = 0;
    for span in constraint.detect(candidate)? {
        if constraint.repair(candidate, span, rng)? {
            rewritten += 1;
        }
    }
    Ok(rewritten)
}

/// Repeats detect-and-repair until a scan reports nothing. Returns the
/// number of rewritten spans.
pub fn repair_until_stable(
    constraint: &dyn RepairConstraint,
    candidate: &mut Candidate,
    rng: &mut dyn RngCore,
    limit: RepairLimit,
) -> Result<usize> {
    let mut passes = 0;
    let mut rewritten = 0;

    loop {
        let spans = constraint.detect(candidate)?;
        if spans.is_empty() {
            #[cfg(feature = "tracing")]
            {
                if rewritten > 0 {
                    tracing::debug!(
                        "repair pass '{}' stable after {} passes, {} spans rewritten",
                        constraint.name(),
                        passes,
                        rewritten
                    );
                }
            }
            return Ok(rewritten);
        }

        passes += 1;
        if !limit.allows(passes) {
            #[cfg(feature = "tracing")]
            tracing::warn!("repair pass '{}' did not converge", constraint.name());
            return Err(GeneratorError::RepairDiverged {
                pass: constraint.name(),
                passes: passes - 1,
            });
        }

        for span in spans {
            if constraint.repair(candidate, span, rng)? {
                rewritten += 1;
            }
        }
    }
}

/// A fresh random run of `len` characters, optionally with touching
/// duplicates removed.
pub(crate) fn random_run(
    mutator: Mutator<'_>,
    len: usize,
    remove_touching: bool,
    rng: &mut dyn RngCore,
) -> Result<Vec<char>> {
    let mut run = mutator.generate_random(len, rng)?;
    if remove_touching {
        remove_touching_duplicates(mutator, &mut run, rng)?;
    }
    Ok(run.chars().to_vec())
}
