//! Password generation - candidate pipelines and the retry loop.

use std::sync::Arc;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use secrecy::SecretString;

use crate::candidate::Candidate;
use crate::config::GeneratorConfig;
use crate::error::{GeneratorError, Result};
use crate::mutator::Mutator;
use crate::password_set::PasswordSet;
use crate::pool::CharacterPool;
use crate::repair::{
    ClassCoverage, DictionaryWord, ExcludedSubstring, SentenceSafeWords, remove_touching_duplicates,
    repair_until_stable,
};
use crate::services::{BreachChecker, Dictionary, SentenceSource};

/// How candidates are produced and repaired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// Random draw, repaired according to the configuration flags.
    Direct,
    /// Random draw with every human-style rule enforced.
    Human,
    /// Passphrase from the sentence source, no repair.
    Sentence,
}

/// Why an attempt was thrown away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Found in the breach database.
    Breached,
    /// An excluded entry survived repair.
    Excluded,
    /// A repair pass hit its limit.
    RepairDiverged { pass: &'static str },
    /// Sentence shorter than the minimum length.
    TooShort,
}

/// Outcome of one attempt.
#[derive(Debug)]
pub enum Attempt {
    Accepted(SecretString),
    Rejected(Rejection),
}

/// Builds a [`Generator`] from a configuration and its collaborators.
pub struct GeneratorBuilder {
    config: GeneratorConfig,
    dictionary: Option<Arc<dyn Dictionary>>,
    breach_checker: Option<Arc<dyn BreachChecker>>,
    sentences: Option<Arc<dyn SentenceSource>>,
}

impl GeneratorBuilder {
    pub fn dictionary<D: Dictionary + 'static>(mut self, dictionary: D) -> Self {
        self.dictionary = Some(Arc::new(dictionary));
        self
    }

    pub fn shared_dictionary(mut self, dictionary: Arc<dyn Dictionary>) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    pub fn breach_checker<B: BreachChecker + 'static>(mut self, checker: B) -> Self {
        self.breach_checker = Some(Arc::new(checker));
        self
    }

    pub fn shared_breach_checker(mut self, checker: Arc<dyn BreachChecker>) -> Self {
        self.breach_checker = Some(checker);
        self
    }

    pub fn sentence_source<S: SentenceSource + 'static>(mut self, source: S) -> Self {
        self.sentences = Some(Arc::new(source));
        self
    }

    /// Validates the configuration and builds the character pool.
    ///
    /// # Errors
    ///
    /// - invalid lengths
    /// - a pool or class left empty by excluded characters
    /// - no breach checker
    pub fn build(self) -> Result<Generator> {
        self.config.validate()?;
        let pool = self.config.build_pool();
        pool.validate()?;

        let breach_checker = self
            .breach_checker
            .ok_or(GeneratorError::MissingService("breach checker"))?;

        Ok(Generator {
            config: self.config,
            pool,
            dictionary: self.dictionary,
            breach_checker,
            sentences: self.sentences,
        })
    }
}

/// Produces candidates, repairs them and validates them against the breach
/// checker, retrying from a fresh candidate on rejection.
///
/// Read-only after construction; one instance can serve concurrent tasks as
/// long as each brings its own random source.
pub struct Generator {
    config: GeneratorConfig,
    pool: CharacterPool,
    dictionary: Option<Arc<dyn Dictionary>>,
    breach_checker: Arc<dyn BreachChecker>,
    sentences: Option<Arc<dyn SentenceSource>>,
}

impl Generator {
    pub fn builder(config: GeneratorConfig) -> GeneratorBuilder {
        GeneratorBuilder {
            config,
            dictionary: None,
            breach_checker: None,
            sentences: None,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn pool(&self) -> &CharacterPool {
        &self.pool
    }

    fn mutator(&self) -> Result<Mutator<'_>> {
        Mutator::new(&self.pool)
    }

    fn require_dictionary(&self) -> Result<&dyn Dictionary> {
        self.dictionary
            .as_deref()
            .ok_or(GeneratorError::MissingService("dictionary"))
    }

    /// Fails fast on settings that make `mode` impossible to satisfy.
    pub fn check_mode(&self, mode: GenerationMode) -> Result<()> {
        let needs_coverage = match mode {
            GenerationMode::Direct => {
                if self.config.remove_english {
                    self.require_dictionary()?;
                }
                self.config.ensure_proportions
            }
            GenerationMode::Human => {
                self.require_dictionary()?;
                true
            }
            GenerationMode::Sentence => {
                if self.sentences.is_none() {
                    return Err(GeneratorError::MissingService("sentence source"));
                }
                false
            }
        };

        if needs_coverage && self.config.shortest_len() < self.pool.len() {
            return Err(GeneratorError::InvalidConfig(format!(
                "length {} cannot cover {} character classes",
                self.config.shortest_len(),
                self.pool.len()
            )));
        }
        Ok(())
    }

    /// A fresh random candidate of fixed or random length.
    pub fn draw(&self, rng: &mut dyn RngCore) -> Result<Candidate> {
        let mutator = self.mutator()?;
        let length = match self.config.fixed_len {
            Some(len) => len,
            None => mutator.random_length(self.config.min_len, self.config.max_len, rng),
        };
        mutator.generate_random(length, rng)
    }

    fn next_sentence(&self) -> Result<Candidate> {
        let source = self
            .sentences
            .as_deref()
            .ok_or(GeneratorError::MissingService("sentence source"))?;
        let sentence = source
            .generate_sentence()
            .map_err(|e| GeneratorError::service("sentence source", e))?;
        Ok(Candidate::new(sentence.chars().collect()))
    }

    fn repair_direct(&self, candidate: &mut Candidate, rng: &mut dyn RngCore) -> Result<()> {
        let mutator = self.mutator()?;
        let limit = self.config.repair_limit;
        let exclusions = &self.config.excluded_words;
        let remove_touching = self.config.remove_repeating;

        if remove_touching {
            remove_touching_duplicates(mutator, candidate, rng)?;
        }
        if self.config.remove_english {
            let words = DictionaryWord::new(mutator, self.require_dictionary()?, remove_touching);
            repair_until_stable(&words, candidate, rng, limit)?;
        }
        if !exclusions.is_empty() {
            let excluded = ExcludedSubstring::new(mutator, exclusions, remove_touching);
            repair_until_stable(&excluded, candidate, rng, limit)?;
        }
        if self.config.ensure_proportions {
            ClassCoverage::new(mutator, exclusions, limit).ensure_proportions(candidate, rng)?;
        }
        Ok(())
    }

    fn repair_human(&self, candidate: &mut Candidate, rng: &mut dyn RngCore) -> Result<()> {
        let mutator = self.mutator()?;
        let limit = self.config.repair_limit;
        let exclusions = &self.config.excluded_words;

        remove_touching_duplicates(mutator, candidate, rng)?;
        let words = SentenceSafeWords::new(mutator, self.require_dictionary()?, exclusions);
        repair_until_stable(&words, candidate, rng, limit)?;
        ClassCoverage::new(mutator, exclusions, limit).ensure_proportions(candidate, rng)?;
        Ok(())
    }

    /// Strips punctuation, normalizes whitespace and enforces the length
    /// range on a sentence.
    fn shape_sentence(&self, candidate: &Candidate) -> Option<Candidate> {
        let raw: String = candidate
            .chars()
            .iter()
            .filter(|c| !c.is_ascii_punctuation())
            .collect();
        let words = raw.split_whitespace();
        let joined: String = if self.config.include_whitespace {
            words.collect::<Vec<_>>().join(" ")
        } else {
            words.collect()
        };

        let mut chars: Vec<char> = joined.chars().take(self.config.max_len).collect();
        if chars.last() == Some(&' ') {
            chars.pop();
        }
        if chars.len() < self.config.min_len {
            return None;
        }
        Some(Candidate::new(chars))
    }

    /// Runs one attempt on a supplied candidate: repair according to `mode`,
    /// then the exclusion guard and the breach check.
    ///
    /// For [`GenerationMode::Sentence`] the candidate is the raw sentence.
    pub fn process_candidate<R: RngCore + CryptoRng>(
        &self,
        mode: GenerationMode,
        mut candidate: Candidate,
        rng: &mut R,
    ) -> Result<Attempt> {
        let repaired = match mode {
            GenerationMode::Direct => self.repair_direct(&mut candidate, rng),
            GenerationMode::Human => self.repair_human(&mut candidate, rng),
            GenerationMode::Sentence => match self.shape_sentence(&candidate) {
                Some(shaped) => {
                    candidate = shaped;
                    Ok(())
                }
                None => return Ok(Attempt::Rejected(Rejection::TooShort)),
            },
        };

        match repaired {
            Ok(()) => {}
            Err(GeneratorError::RepairDiverged { pass, .. }) => {
                return Ok(Attempt::Rejected(Rejection::RepairDiverged { pass }));
            }
            Err(e) => return Err(e),
        }

        let exclusions = &self.config.excluded_words;
        if mode != GenerationMode::Sentence
            && !exclusions.is_empty()
            && exclusions.contains_excluded(&candidate.as_string())
        {
            return Ok(Attempt::Rejected(Rejection::Excluded));
        }

        let password = candidate.into_secret();
        let breached = self
            .breach_checker
            .is_compromised(&password)
            .map_err(|e| GeneratorError::service("breach checker", e))?;

        if breached {
            Ok(Attempt::Rejected(Rejection::Breached))
        } else {
            Ok(Attempt::Accepted(password))
        }
    }

    /// Generates one password, restarting from a fresh candidate until one
    /// is accepted or the attempt limit is reached.
    pub fn generate<R: RngCore + CryptoRng>(&self, mode: GenerationMode, rng: &mut R) -> Result<SecretString> {
        self.generate_with_cancel(mode, rng, &|| false)
    }

    /// Like [`Generator::generate`], polling `is_cancelled` before every
    /// attempt.
    pub fn generate_with_cancel<R: RngCore + CryptoRng>(
        &self,
        mode: GenerationMode,
        rng: &mut R,
        is_cancelled: &dyn Fn() -> bool,
    ) -> Result<SecretString> {
        self.check_mode(mode)?;

        let mut attempts = 0;
        loop {
            if is_cancelled() {
                return Err(GeneratorError::Cancelled);
            }
            if !self.config.attempt_limit.allows(attempts) {
                #[cfg(feature = "tracing")]
                tracing::warn!("{:?} generation gave up after {} attempts", mode, attempts);
                return Err(GeneratorError::AttemptsExhausted { attempts });
            }
            attempts += 1;

            let candidate = match mode {
                GenerationMode::Sentence => self.next_sentence()?,
                GenerationMode::Direct | GenerationMode::Human => self.draw(rng)?,
            };

            match self.process_candidate(mode, candidate, rng)? {
                Attempt::Accepted(password) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("{:?} password accepted after {} attempts", mode, attempts);
                    return Ok(password);
                }
                Attempt::Rejected(_rejection) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("{:?} attempt {} rejected: {:?}", mode, attempts, _rejection);
                }
            }
        }
    }

    /// Generates `count` passwords (at least one) into `set`.
    ///
    /// Human-style passwords go to the human list, the others to the main
    /// list.
    pub fn fill<R: RngCore + CryptoRng>(
        &self,
        set: &mut PasswordSet,
        mode: GenerationMode,
        count: usize,
        rng: &mut R,
    ) -> Result<()> {
        for _ in 0..count.max(1) {
            let password = self.generate(mode, rng)?;
            match mode {
                GenerationMode::Human => set.push_human(password),
                GenerationMode::Direct | GenerationMode::Sentence => set.push(password),
            }
        }

        #[cfg(feature = "tracing")]
        tracing::info!("{} {:?} passwords generated", count.max(1), mode);

        Ok(())
    }

    /// [`Generator::fill`] with the operating system random source.
    pub fn fill_secure(&self, set: &mut PasswordSet, mode: GenerationMode, count: usize) -> Result<()> {
        self.fill(set, mode, count, &mut OsRng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AttemptLimit;
    use crate::error::ServiceError;
    use crate::exclusion::ExclusionSet;
    use crate::pool::{CharacterClass, ClassPreset};
    use crate::repair::{RepairLimit, confirm_proportions};
    use crate::services::{CommonPasswordList, WordListDictionary};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use secrecy::ExposeSecret;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct NeverBreached;

    impl BreachChecker for NeverBreached {
        fn is_compromised(&self, _candidate: &SecretString) -> std::result::Result<bool, ServiceError> {
            Ok(false)
        }
    }

    struct AlwaysBreached {
        calls: Arc<AtomicUsize>,
    }

    impl BreachChecker for AlwaysBreached {
        fn is_compromised(&self, _candidate: &SecretString) -> std::result::Result<bool, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        }
    }

    /// Reports the first candidate as breached, records every candidate.
    struct BreachedOnce {
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl BreachChecker for BreachedOnce {
        fn is_compromised(&self, candidate: &SecretString) -> std::result::Result<bool, ServiceError> {
            let mut seen = self.seen.lock().unwrap();
            seen.push(candidate.expose_secret().to_string());
            Ok(seen.len() == 1)
        }
    }

    struct OfflineBreachCheck;

    impl BreachChecker for OfflineBreachCheck {
        fn is_compromised(&self, _candidate: &SecretString) -> std::result::Result<bool, ServiceError> {
            Err(ServiceError::Unavailable("connection refused".to_string()))
        }
    }

    /// Hands out queued sentences, repeating the last one.
    struct QueuedSentences {
        queue: Mutex<Vec<String>>,
    }

    impl QueuedSentences {
        fn new(sentences: &[&str]) -> Self {
            Self {
                queue: Mutex::new(sentences.iter().rev().map(|s| s.to_string()).collect()),
            }
        }
    }

    impl SentenceSource for QueuedSentences {
        fn generate_sentence(&self) -> std::result::Result<String, ServiceError> {
            let mut queue = self.queue.lock().unwrap();
            if queue.len() > 1 {
                Ok(queue.pop().unwrap())
            } else {
                queue
                    .last()
                    .cloned()
                    .ok_or_else(|| ServiceError::InvalidResponse("no sentence".to_string()))
            }
        }
    }

    fn lower_digits_config() -> GeneratorConfig {
        GeneratorConfig::from_presets(&[ClassPreset::Lowercase, ClassPreset::Digits])
            .with_excluded_words(ExclusionSet::default())
            .with_fixed_len(8)
    }

    #[test]
    fn test_direct_with_coverage_end_to_end() {
        let mut config = lower_digits_config();
        config.ensure_proportions = true;
        let generator = Generator::builder(config)
            .breach_checker(NeverBreached)
            .build()
            .unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(42);

        for _ in 0..50 {
            let password = generator.generate(GenerationMode::Direct, &mut rng).unwrap();
            let pwd = password.expose_secret();
            assert_eq!(pwd.chars().count(), 8);
            assert!(pwd.chars().any(|c| c.is_ascii_lowercase()));
            assert!(pwd.chars().any(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_breached_candidate_is_regenerated() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let generator = Generator::builder(lower_digits_config())
            .breach_checker(BreachedOnce { seen: seen.clone() })
            .build()
            .unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(7);

        let password = generator.generate(GenerationMode::Direct, &mut rng).unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1], password.expose_secret());
        assert_ne!(seen[0], seen[1]);
    }

    #[test]
    fn test_forced_draw_with_excluded_word() {
        let mut config = GeneratorConfig::from_presets(&[ClassPreset::Lowercase])
            .with_excluded_words(ExclusionSet::new(["cat"]))
            .with_fixed_len(7);
        config.remove_english = true;
        let generator = Generator::builder(config)
            .dictionary(WordListDictionary::new(["horse", "battery"]))
            .breach_checker(NeverBreached)
            .build()
            .unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(99);

        let attempt = generator
            .process_candidate(GenerationMode::Direct, Candidate::from("xxcatyy"), &mut rng)
            .unwrap();

        match attempt {
            Attempt::Accepted(password) => {
                let pwd = password.expose_secret();
                assert_eq!(pwd.len(), 7);
                assert!(!pwd.contains("cat"));
            }
            Attempt::Rejected(rejection) => panic!("unexpected rejection: {:?}", rejection),
        }
    }

    #[test]
    fn test_accepted_passwords_never_contain_excluded() {
        let mut config = GeneratorConfig::from_presets(&[ClassPreset::Lowercase, ClassPreset::Digits])
            .with_excluded_words(ExclusionSet::new(["ab", "12"]))
            .with_fixed_len(10);
        config.ensure_proportions = true;
        let generator = Generator::builder(config)
            .breach_checker(NeverBreached)
            .build()
            .unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(5);

        for _ in 0..50 {
            let password = generator.generate(GenerationMode::Direct, &mut rng).unwrap();
            let pwd = password.expose_secret();
            assert!(!pwd.contains("ab"));
            assert!(!pwd.contains("12"));
        }
    }

    #[test]
    fn test_short_excluded_run_is_rejected() {
        let config = lower_digits_config().with_excluded_words(ExclusionSet::new(["cat"]));
        let generator = Generator::builder(config)
            .breach_checker(NeverBreached)
            .build()
            .unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(1);

        let attempt = generator
            .process_candidate(GenerationMode::Direct, Candidate::from("1cat2345"), &mut rng)
            .unwrap();
        assert!(matches!(attempt, Attempt::Rejected(Rejection::Excluded)));
    }

    #[test]
    fn test_diverging_repair_is_rejected() {
        let mut config = GeneratorConfig::from_presets(&[ClassPreset::Lowercase])
            .with_excluded_words(ExclusionSet::new(["123"]))
            .with_fixed_len(7);
        config.repair_limit = RepairLimit::Passes(5);
        let generator = Generator::builder(config)
            .breach_checker(NeverBreached)
            .build()
            .unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(1);

        let attempt = generator
            .process_candidate(GenerationMode::Direct, Candidate::from("abcd123"), &mut rng)
            .unwrap();
        assert!(matches!(
            attempt,
            Attempt::Rejected(Rejection::RepairDiverged { pass: "excluded-substring" })
        ));
    }

    #[test]
    fn test_direct_removes_words_and_duplicates() {
        let mut config = GeneratorConfig::default().with_excluded_words(ExclusionSet::default());
        config.remove_repeating = true;
        config.remove_english = true;
        let dictionary = WordListDictionary::new(["horse", "battery", "staple"]);
        let generator = Generator::builder(config)
            .dictionary(dictionary.clone())
            .breach_checker(NeverBreached)
            .build()
            .unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(3);

        let attempt = generator
            .process_candidate(GenerationMode::Direct, Candidate::from("horse!!staple"), &mut rng)
            .unwrap();
        let Attempt::Accepted(password) = attempt else {
            panic!("expected acceptance");
        };
        let repaired = Candidate::from(password.expose_secret());
        let words = DictionaryWord::new(Mutator::new(generator.pool()).unwrap(), &dictionary, true);
        assert!(crate::repair::RepairConstraint::detect(&words, &repaired)
            .unwrap()
            .is_empty());
        assert_eq!(repaired.len(), 13);
    }

    #[test]
    fn test_human_mode_enforces_rules() {
        let config = GeneratorConfig::default().with_fixed_len(12);
        let generator = Generator::builder(config)
            .dictionary(WordListDictionary::new(["horse"]))
            .breach_checker(NeverBreached)
            .build()
            .unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(2);

        let mut set = PasswordSet::new();
        generator
            .fill(&mut set, GenerationMode::Human, 20, &mut rng)
            .unwrap();

        assert_eq!(set.human_passwords().len(), 20);
        assert!(set.passwords().is_empty());
        for password in set.human_passwords() {
            let chars: Vec<char> = password.expose_secret().chars().collect();
            assert_eq!(chars.len(), 12);
            assert!(confirm_proportions(&generator.pool().class_counts(&chars)));
            assert!(!generator
                .config()
                .excluded_words
                .contains_excluded(password.expose_secret()));
        }
    }

    #[test]
    fn test_human_mode_requires_dictionary() {
        let generator = Generator::builder(GeneratorConfig::default())
            .breach_checker(NeverBreached)
            .build()
            .unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        assert!(matches!(
            generator.generate(GenerationMode::Human, &mut rng),
            Err(GeneratorError::MissingService("dictionary"))
        ));
    }

    #[test]
    fn test_remove_english_requires_dictionary() {
        let mut config = GeneratorConfig::default();
        config.remove_english = true;
        let generator = Generator::builder(config)
            .breach_checker(NeverBreached)
            .build()
            .unwrap();
        assert!(matches!(
            generator.check_mode(GenerationMode::Direct),
            Err(GeneratorError::MissingService("dictionary"))
        ));
    }

    #[test]
    fn test_coverage_needs_enough_length() {
        let mut config = GeneratorConfig::default().with_fixed_len(3);
        config.ensure_proportions = true;
        let generator = Generator::builder(config)
            .breach_checker(NeverBreached)
            .build()
            .unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        assert!(matches!(
            generator.generate(GenerationMode::Direct, &mut rng),
            Err(GeneratorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_attempts_exhausted() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut config = lower_digits_config();
        config.attempt_limit = AttemptLimit::Attempts(3);
        let generator = Generator::builder(config)
            .breach_checker(AlwaysBreached { calls: calls.clone() })
            .build()
            .unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(2);

        assert!(matches!(
            generator.generate(GenerationMode::Direct, &mut rng),
            Err(GeneratorError::AttemptsExhausted { attempts: 3 })
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_breach_failure_is_not_clean() {
        let generator = Generator::builder(lower_digits_config())
            .breach_checker(OfflineBreachCheck)
            .build()
            .unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(2);

        assert!(matches!(
            generator.generate(GenerationMode::Direct, &mut rng),
            Err(GeneratorError::Service { service: "breach checker", .. })
        ));
    }

    #[test]
    fn test_common_password_list_rejects_known_password() {
        let config = GeneratorConfig::default().with_excluded_words(ExclusionSet::default());
        let generator = Generator::builder(config)
            .breach_checker(CommonPasswordList::new(["password"]))
            .build()
            .unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(2);

        let attempt = generator
            .process_candidate(GenerationMode::Direct, Candidate::from("PASSWORD"), &mut rng)
            .unwrap();
        assert!(matches!(attempt, Attempt::Rejected(Rejection::Breached)));
    }

    #[test]
    fn test_cancelled_before_first_attempt() {
        let generator = Generator::builder(lower_digits_config())
            .breach_checker(NeverBreached)
            .build()
            .unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(2);

        assert!(matches!(
            generator.generate_with_cancel(GenerationMode::Direct, &mut rng, &|| true),
            Err(GeneratorError::Cancelled)
        ));
    }

    #[test]
    fn test_build_requires_breach_checker() {
        assert!(matches!(
            Generator::builder(GeneratorConfig::default()).build(),
            Err(GeneratorError::MissingService("breach checker"))
        ));
    }

    #[test]
    fn test_build_rejects_emptied_pool() {
        let mut config = GeneratorConfig::from_presets(&[ClassPreset::Digits]);
        config.excluded_chars = "0123456789".chars().collect();
        assert!(matches!(
            Generator::builder(config).breach_checker(NeverBreached).build(),
            Err(GeneratorError::EmptyPool)
        ));

        let mut config = GeneratorConfig::default();
        config.usable_chars.push(CharacterClass::from("#"));
        config.excluded_chars = vec!['#'];
        assert!(matches!(
            Generator::builder(config).breach_checker(NeverBreached).build(),
            Err(GeneratorError::EmptyClass { index: 4 })
        ));
    }

    #[test]
    fn test_build_rejects_zero_fixed_len() {
        let config = GeneratorConfig::default().with_fixed_len(0);
        assert!(matches!(
            Generator::builder(config).breach_checker(NeverBreached).build(),
            Err(GeneratorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_random_length_within_range() {
        let config = GeneratorConfig::default().with_len_range(10, 14);
        let generator = Generator::builder(config)
            .breach_checker(NeverBreached)
            .build()
            .unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(2);

        for _ in 0..30 {
            let password = generator.generate(GenerationMode::Direct, &mut rng).unwrap();
            let len = password.expose_secret().chars().count();
            assert!((10..=14).contains(&len));
        }
    }

    #[test]
    fn test_fill_generates_at_least_one() {
        let generator = Generator::builder(lower_digits_config())
            .breach_checker(NeverBreached)
            .build()
            .unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(2);

        let mut set = PasswordSet::new();
        generator.fill(&mut set, GenerationMode::Direct, 0, &mut rng).unwrap();
        assert_eq!(set.passwords().len(), 1);
        assert!(set.human_passwords().is_empty());
    }

    #[test]
    fn test_fill_secure() {
        let generator = Generator::builder(lower_digits_config())
            .breach_checker(NeverBreached)
            .build()
            .unwrap();

        let mut set = PasswordSet::new();
        generator.fill_secure(&mut set, GenerationMode::Direct, 3).unwrap();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_sentence_mode_shapes_output() {
        let config = GeneratorConfig::default().with_len_range(10, 19);
        let generator = Generator::builder(config)
            .breach_checker(NeverBreached)
            .sentence_source(QueuedSentences::new(&[
                "too   short",
                "sing\tO  goddess the anger of Achilles",
                "Rage, O goddess! Sing of Peleus' son",
            ]))
            .build()
            .unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(2);

        let password = generator.generate(GenerationMode::Sentence, &mut rng).unwrap();
        // "sing O goddess the anger ..." cut at 19 chars, trailing space dropped.
        assert_eq!(password.expose_secret(), "sing O goddess the");

        let password = generator.generate(GenerationMode::Sentence, &mut rng).unwrap();
        assert_eq!(password.expose_secret(), "Rage O goddess Sing");
    }

    #[test]
    fn test_sentence_mode_rejects_zero_min_len() {
        let mut config = GeneratorConfig::default().with_fixed_len(8);
        config.min_len = 0;
        let result = Generator::builder(config)
            .breach_checker(NeverBreached)
            .sentence_source(QueuedSentences::new(&["   "]))
            .build();
        assert!(matches!(result, Err(GeneratorError::InvalidConfig(_))));
    }

    #[test]
    fn test_breached_human_password_stays_human() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let generator = Generator::builder(GeneratorConfig::default().with_fixed_len(12))
            .dictionary(WordListDictionary::new(["horse"]))
            .breach_checker(BreachedOnce { seen: seen.clone() })
            .build()
            .unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(11);

        let mut set = PasswordSet::new();
        generator
            .fill(&mut set, GenerationMode::Human, 1, &mut rng)
            .unwrap();

        assert!(set.passwords().is_empty());
        assert_eq!(set.human_passwords().len(), 1);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        let password = set.human_passwords()[0].expose_secret();
        assert_eq!(seen[1], password);
        // The regenerated password went through the human pipeline again.
        let chars: Vec<char> = password.chars().collect();
        assert_eq!(chars.len(), 12);
        assert!(confirm_proportions(&generator.pool().class_counts(&chars)));
    }

    #[test]
    fn test_sentence_mode_without_whitespace() {
        let mut config = GeneratorConfig::default().with_len_range(10, 20);
        config.include_whitespace = false;
        let generator = Generator::builder(config)
            .breach_checker(NeverBreached)
            .sentence_source(QueuedSentences::new(&["rosy fingered dawn appeared"]))
            .build()
            .unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(2);

        let mut set = PasswordSet::new();
        generator.fill(&mut set, GenerationMode::Sentence, 1, &mut rng).unwrap();
        assert_eq!(set.passwords()[0].expose_secret(), "rosyfingereddawnappe");
    }

    #[test]
    fn test_sentence_mode_requires_source() {
        let generator = Generator::builder(GeneratorConfig::default())
            .breach_checker(NeverBreached)
            .build()
            .unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        assert!(matches!(
            generator.generate(GenerationMode::Sentence, &mut rng),
            Err(GeneratorError::MissingService("sentence source"))
        ));
    }
}
