//! Touching duplicate removal.

use rand::RngCore;

use super::RepairConstraint;
use crate::candidate::{Candidate, Span};
use crate::error::Result;
use crate::mutator::Mutator;

/// Two equal characters next to each other.
///
/// Detection runs on the sequence as it was before any replacement, and a
/// replacement is not checked against its new neighbours. One pass does not
/// guarantee a duplicate-free result.
#[derive(Debug, Clone, Copy)]
pub struct DuplicateAdjacency<'a> {
    mutator: Mutator<'a>,
}

impl<'a> DuplicateAdjacency<'a> {
    pub fn new(mutator: Mutator<'a>) -> Self {
        Self { mutator }
    }
}

impl RepairConstraint for DuplicateAdjacency<'_> {
    fn name(&self) -> &'static str {
        "duplicate-adjacency"
    }

    fn detect(&self, candidate: &Candidate) -> Result<Vec<Span>> {
        Ok(candidate
            .chars()
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| pair[0] == pair[1])
            .map(|(i, _)| Span::new(i, i + 2))
            .collect())
    }

    /// Replaces the left character of the pair.
    fn repair(&self, candidate: &mut Candidate, span: Span, rng: &mut dyn RngCore) -> Result<bool> {
        let c = self.mutator.random_char(rng)?;
        candidate.set(span.start, c);
        Ok(true)
    }
}

/// Single left-to-right pass over adjacent pairs.
pub fn remove_touching_duplicates(
    mutator: Mutator<'_>,
    candidate: &mut Candidate,
    rng: &mut dyn RngCore,
) -> Result<usize> {
    super::apply_once(&DuplicateAdjacency::new(mutator), candidate, rng)
}
