//! Character classes and the pool they are sampled from.

use rand::Rng;

use crate::error::{GeneratorError, Result};

const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Built-in ASCII character classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassPreset {
    Lowercase,
    Uppercase,
    Digits,
    Punctuation,
}

impl ClassPreset {
    pub const ALL: [ClassPreset; 4] = [
        ClassPreset::Lowercase,
        ClassPreset::Uppercase,
        ClassPreset::Digits,
        ClassPreset::Punctuation,
    ];

    pub fn chars(self) -> &'static str {
        match self {
            ClassPreset::Lowercase => "abcdefghijklmnopqrstuvwxyz",
            ClassPreset::Uppercase => "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
            ClassPreset::Digits => "0123456789",
            ClassPreset::Punctuation => PUNCTUATION,
        }
    }
}

/// An ordered group of characters, e.g. "digits".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterClass {
    chars: Vec<char>,
}

impl CharacterClass {
    pub fn new(chars: impl IntoIterator<Item = char>) -> Self {
        Self {
            chars: chars.into_iter().collect(),
        }
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    /// Uniform draw within this class. `None` when the class is empty.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<char> {
        if self.chars.is_empty() {
            return None;
        }
        Some(self.chars[rng.gen_range(0..self.chars.len())])
    }
}

impl From<&str> for CharacterClass {
    fn from(value: &str) -> Self {
        Self::new(value.chars())
    }
}

impl From<ClassPreset> for CharacterClass {
    fn from(value: ClassPreset) -> Self {
        Self::from(value.chars())
    }
}

/// The ordered set of classes a password is drawn from.
///
/// Construction never fails: a class emptied by the exclusion pass stays in
/// the pool and is reported by [`CharacterPool::empty_classes`]. Callers
/// that generate from the pool must check it first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterPool {
    classes: Vec<CharacterClass>,
}

impl CharacterPool {
    /// Builds the pool, removing every excluded character from every class.
    pub fn build(mut classes: Vec<CharacterClass>, excluded_chars: &[char]) -> Self {
        for class in &mut classes {
            class.chars.retain(|c| !excluded_chars.contains(c));
        }
        Self { classes }
    }

    pub fn classes(&self) -> &[CharacterClass] {
        &self.classes
    }

    pub fn class(&self, index: usize) -> Option<&CharacterClass> {
        self.classes.get(index)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.iter().all(CharacterClass::is_empty)
    }

    pub fn empty_classes(&self) -> Vec<usize> {
        self.classes
            .iter()
            .enumerate()
            .filter(|(_, class)| class.is_empty())
            .map(|(index, _)| index)
            .collect()
    }

    /// Fails with the first configuration problem that makes sampling
    /// impossible.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(GeneratorError::EmptyPool);
        }
        if let Some(index) = self.empty_classes().into_iter().next() {
            return Err(GeneratorError::EmptyClass { index });
        }
        Ok(())
    }

    /// Picks one class uniformly at random.
    pub fn sample_class<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<(usize, &CharacterClass)> {
        if self.classes.is_empty() {
            return Err(GeneratorError::EmptyPool);
        }
        let index = rng.gen_range(0..self.classes.len());
        Ok((index, &self.classes[index]))
    }

    /// Two-stage draw: a uniform class, then a uniform character inside it.
    ///
    /// Characters of small classes are over-represented compared to a draw
    /// over the flattened pool. Output distributions depend on this.
    pub fn sample_char<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<char> {
        let (index, class) = self.sample_class(rng)?;
        class.pick(rng).ok_or(GeneratorError::EmptyClass { index })
    }

    /// Per class, how many of `chars` belong to it.
    pub fn class_counts(&self, chars: &[char]) -> Vec<usize> {
        self.classes
            .iter()
            .map(|class| chars.iter().filter(|c| class.contains(**c)).count())
            .collect()
    }
}

impl Default for CharacterPool {
    fn default() -> Self {
        Self::build(ClassPreset::ALL.into_iter().map(Into::into).collect(), &[])
    }
}
