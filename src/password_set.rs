//! Accepted passwords.

use secrecy::{ExposeSecret, SecretString};

/// Two accumulating lists of accepted passwords.
///
/// Direct and sentence passwords go to `passwords`, human-style ones to
/// `human_passwords`. Reads yield `passwords` first. No deduplication.
#[derive(Debug, Default)]
pub struct PasswordSet {
    passwords: Vec<SecretString>,
    human_passwords: Vec<SecretString>,
}

impl PasswordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, password: SecretString) {
        self.passwords.push(password);
    }

    pub fn push_human(&mut self, password: SecretString) {
        self.human_passwords.push(password);
    }

    pub fn passwords(&self) -> &[SecretString] {
        &self.passwords
    }

    pub fn human_passwords(&self) -> &[SecretString] {
        &self.human_passwords
    }

    /// Both lists, concatenated.
    pub fn all(&self) -> impl Iterator<Item = &SecretString> {
        self.passwords.iter().chain(self.human_passwords.iter())
    }

    pub fn len(&self) -> usize {
        self.passwords.len() + self.human_passwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All passwords joined by a single space. Exposes every secret.
    pub fn expose_joined(&self) -> String {
        self.all()
            .map(|p| p.expose_secret())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
