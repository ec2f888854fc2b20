//! Randomness primitives built on top of a [`CharacterPool`].

use rand::{Rng, RngCore};

use crate::candidate::Candidate;
use crate::error::{GeneratorError, Result};
use crate::pool::CharacterPool;

/// Draws characters and candidates from a validated pool.
///
/// The random source is passed to every call so that concurrent tasks each
/// own their generator.
#[derive(Debug, Clone, Copy)]
pub struct Mutator<'p> {
    pool: &'p CharacterPool,
}

impl<'p> Mutator<'p> {
    pub fn new(pool: &'p CharacterPool) -> Result<Self> {
        pool.validate()?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &'p CharacterPool {
        self.pool
    }

    pub fn random_char(&self, rng: &mut dyn RngCore) -> Result<char> {
        self.pool.sample_char(rng)
    }

    pub fn char_from_class(&self, index: usize, rng: &mut dyn RngCore) -> Result<char> {
        self.pool
            .class(index)
            .and_then(|class| class.pick(rng))
            .ok_or(GeneratorError::EmptyClass { index })
    }

    /// `length` independent two-stage draws.
    pub fn generate_random(&self, length: usize, rng: &mut dyn RngCore) -> Result<Candidate> {
        let chars = (0..length)
            .map(|_| self.random_char(rng))
            .collect::<Result<Vec<_>>>()?;
        Ok(Candidate::new(chars))
    }

    /// Uniform length in `min..=max`.
    pub fn random_length(&self, min: usize, max: usize, rng: &mut dyn RngCore) -> usize {
        if min >= max {
            return min;
        }
        rng.gen_range(min..=max)
    }
}
