//! In-progress password storage.

use secrecy::SecretString;

/// Half-open range `[start, end)` of candidate positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// A password under repair. Its length never changes once drawn.
#[derive(Clone, PartialEq, Eq)]
pub struct Candidate {
    chars: Vec<char>,
}

impl Candidate {
    pub fn new(chars: Vec<char>) -> Self {
        Self { chars }
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

    pub fn get(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    pub fn set(&mut self, index: usize, c: char) {
        self.chars[index] = c;
    }

    pub fn slice(&self, span: Span) -> String {
        self.chars[span.start..span.end].iter().collect()
    }

    /// Overwrites `span` with `replacement`, which must have the same length.
    pub fn splice(&mut self, span: Span, replacement: &[char]) {
        debug_assert_eq!(span.len(), replacement.len());
        self.chars[span.start..span.end].copy_from_slice(replacement);
    }

    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }

    /// Maximal runs of ASCII letters at least `min_len` long.
    pub fn letter_runs(&self, min_len: usize) -> Vec<Span> {
        let mut runs = Vec::new();
        let mut start = None;

        for (i, c) in self.chars.iter().enumerate() {
            match (c.is_ascii_alphabetic(), start) {
                (true, None) => start = Some(i),
                (false, Some(s)) => {
                    if i - s >= min_len {
                        runs.push(Span::new(s, i));
                    }
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            if self.chars.len() - s >= min_len {
                runs.push(Span::new(s, self.chars.len()));
            }
        }
        runs
    }

    /// Consumes the candidate into its final secret form.
    pub fn into_secret(self) -> SecretString {
        SecretString::new(self.as_string().into())
    }
}

impl From<&str> for Candidate {
    fn from(value: &str) -> Self {
        Self::new(value.chars().collect())
    }
}

impl std::fmt::Debug for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Candidate")
            .field("len", &self.chars.len())
            .finish_non_exhaustive()
    }
}
