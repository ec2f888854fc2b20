//! Natural-language word removal.

use rand::RngCore;

use super::{MIN_REPLACED_RUN, RepairConstraint, random_run};
use crate::candidate::{Candidate, Span};
use crate::error::{GeneratorError, Result};
use crate::exclusion::ExclusionSet;
use crate::mutator::Mutator;
use crate::services::Dictionary;

fn is_known_word(dictionary: &dyn Dictionary, token: &str) -> Result<bool> {
    dictionary
        .is_known_word(token)
        .map_err(|e| GeneratorError::service("dictionary", e))
}

/// Letter runs of any length that the dictionary recognises.
pub struct DictionaryWord<'a> {
    mutator: Mutator<'a>,
    dictionary: &'a dyn Dictionary,
    remove_touching: bool,
}

impl<'a> DictionaryWord<'a> {
    pub fn new(mutator: Mutator<'a>, dictionary: &'a dyn Dictionary, remove_touching: bool) -> Self {
        Self {
            mutator,
            dictionary,
            remove_touching,
        }
    }
}

impl RepairConstraint for DictionaryWord<'_> {
    fn name(&self) -> &'static str {
        "dictionary-word"
    }

    fn detect(&self, candidate: &Candidate) -> Result<Vec<Span>> {
        let mut spans = Vec::new();
        for run in candidate.letter_runs(1) {
            if run.len() >= MIN_REPLACED_RUN && is_known_word(self.dictionary, &candidate.slice(run))? {
                spans.push(run);
            }
        }
        Ok(spans)
    }

    fn repair(&self, candidate: &mut Candidate, span: Span, rng: &mut dyn RngCore) -> Result<bool> {
        let replacement = random_run(self.mutator, span.len(), self.remove_touching, rng)?;
        candidate.splice(span, &replacement);
        Ok(true)
    }
}

/// Letter runs of two or more that are dictionary words or contain an
/// excluded entry. Replacements always have touching duplicates removed.
pub struct SentenceSafeWords<'a> {
    mutator: Mutator<'a>,
    dictionary: &'a dyn Dictionary,
    exclusions: &'a ExclusionSet,
}

impl<'a> SentenceSafeWords<'a> {
    pub fn new(
        mutator: Mutator<'a>,
        dictionary: &'a dyn Dictionary,
        exclusions: &'a ExclusionSet,
    ) -> Self {
        Self {
            mutator,
            dictionary,
            exclusions,
        }
    }
}

impl RepairConstraint for SentenceSafeWords<'_> {
    fn name(&self) -> &'static str {
        "sentence-safe-words"
    }

    fn detect(&self, candidate: &Candidate) -> Result<Vec<Span>> {
        let mut spans = Vec::new();
        for run in candidate.letter_runs(2) {
            if run.len() < MIN_REPLACED_RUN {
                continue;
            }
            let token = candidate.slice(run);
            if self.exclusions.contains_excluded(&token) || is_known_word(self.dictionary, &token)? {
                spans.push(run);
            }
        }
        Ok(spans)
    }

    fn repair(&self, candidate: &mut Candidate, span: Span, rng: &mut dyn RngCore) -> Result<bool> {
        let replacement = random_run(self.mutator, span.len(), true, rng)?;
        candidate.splice(span, &replacement);
        Ok(true)
    }
}
