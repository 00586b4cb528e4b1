//! Random password generation.
//!
//! A password is built by sampling characters uniformly, with replacement,
//! from an alphabet derived from a [`GenerationConfig`]. Letters are always
//! part of the alphabet; digits and symbols are opt-in.
//!
//! This module does no I/O. The random source is supplied by the caller so
//! that tests can run against a seeded generator.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// Shortest length offered by the length control.
pub const MIN_LENGTH: usize = 6;

/// Longest length offered by the length control.
pub const MAX_LENGTH: usize = 15;

/// Length used when nothing else is configured.
pub const DEFAULT_LENGTH: usize = 15;

const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*(){}";

/// Inputs that drive password generation.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct GenerationConfig {
    /// Number of characters in the password
    pub length: usize,

    /// Append `0-9` to the alphabet
    pub include_digits: bool,

    /// Append `!@#$%^&*(){}` to the alphabet
    pub include_symbols: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            include_digits: false,
            include_symbols: false,
        }
    }
}

impl GenerationConfig {
    pub fn new(length: usize, include_digits: bool, include_symbols: bool) -> Self {
        Self {
            length,
            include_digits,
            include_symbols,
        }
    }

    /// Clamp `length` into `MIN_LENGTH..=MAX_LENGTH`.
    pub fn clamp_length(length: usize) -> usize {
        length.clamp(MIN_LENGTH, MAX_LENGTH)
    }

    pub fn alphabet(&self) -> CharacterAlphabet {
        CharacterAlphabet::for_config(self)
    }
}

impl fmt::Display for GenerationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let on_off = |b: bool| if b { "on" } else { "off" };
        write!(
            f,
            "length {}, digits {}, symbols {}",
            self.length,
            on_off(self.include_digits),
            on_off(self.include_symbols)
        )
    }
}

/// The set of candidate characters for a configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharacterAlphabet {
    chars: Vec<char>,
}

impl CharacterAlphabet {
    pub fn for_config(config: &GenerationConfig) -> Self {
        let mut chars: Vec<char> = LETTERS.chars().collect();
        if config.include_digits {
            chars.extend(DIGITS.chars());
        }
        if config.include_symbols {
            chars.extend(SYMBOLS.chars());
        }
        Self { chars }
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

    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }

    /// Pick one character uniformly at random.
    ///
    /// Returns `None` only for an empty alphabet.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<char> {
        if self.chars.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..self.chars.len());
        Some(self.chars[idx])
    }
}

/// A generated password.
///
/// The backing buffer is zeroized on drop and `Debug` never prints it.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Password").field(&"<redacted>").finish()
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generate a password for `config` using `rng`.
///
/// # Errors
///
/// Returns [`Error::Invalid`] for a zero length and [`Error::EmptyAlphabet`]
/// if there is nothing to sample from. Range limits on `length` are the
/// caller's concern.
pub fn generate<R: Rng + ?Sized>(config: &GenerationConfig, rng: &mut R) -> Result<Password> {
    if config.length == 0 {
        return Err(Error::invalid("password length must be positive"));
    }

    let alphabet = config.alphabet();
    let mut out = Zeroizing::new(String::with_capacity(config.length));
    for _ in 0..config.length {
        let c = alphabet.sample(rng).ok_or(Error::EmptyAlphabet)?;
        out.push(c);
    }

    tracing::trace!(length = config.length, alphabet = alphabet.len(), "generated password");
    Ok(Password(out))
}

/// [`generate`] with the thread-local RNG.
pub fn generate_with_default_rng(config: &GenerationConfig) -> Result<Password> {
    generate(config, &mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    fn assert_within(config: &GenerationConfig, pwd: &Password) {
        let alphabet = config.alphabet();
        assert_eq!(pwd.len(), config.length);
        for c in pwd.as_str().chars() {
            assert!(alphabet.contains(c), "{c:?} not in alphabet");
        }
    }

    #[test]
    fn test_alphabet_sizes() {
        assert_eq!(GenerationConfig::new(8, false, false).alphabet().len(), 52);
        assert_eq!(GenerationConfig::new(8, true, false).alphabet().len(), 62);
        assert_eq!(GenerationConfig::new(8, false, true).alphabet().len(), 64);
        assert_eq!(GenerationConfig::new(8, true, true).alphabet().len(), 74);
    }

    #[test]
    fn test_alphabet_grows_monotonically() {
        let base = GenerationConfig::new(8, false, false).alphabet();
        for (digits, symbols) in [(true, false), (false, true), (true, true)] {
            let grown = GenerationConfig::new(8, digits, symbols).alphabet();
            assert!(grown.len() > base.len());
            assert!(base.as_slice().iter().all(|c| grown.contains(*c)));
        }
        let digits = GenerationConfig::new(8, true, false).alphabet();
        let both = GenerationConfig::new(8, true, true).alphabet();
        assert!(digits.as_slice().iter().all(|c| both.contains(*c)));
    }

    #[test]
    fn test_every_length_in_range() {
        let mut rng = rng();
        for length in MIN_LENGTH..=MAX_LENGTH {
            for (digits, symbols) in [(false, false), (true, false), (false, true), (true, true)] {
                let config = GenerationConfig::new(length, digits, symbols);
                let pwd = generate(&config, &mut rng).expect("generate");
                assert_within(&config, &pwd);
            }
        }
    }

    #[test]
    fn test_letters_only_scenario() {
        let config = GenerationConfig::new(8, false, false);
        let pwd = generate(&config, &mut rng()).expect("generate");
        assert_eq!(pwd.len(), 8);
        assert!(pwd.as_str().chars().all(|c| c.is_ascii_alphabetic()));
    }

    #[test]
    fn test_full_alphabet_scenario() {
        let config = GenerationConfig::new(12, true, true);
        let pwd = generate(&config, &mut rng()).expect("generate");
        assert_eq!(pwd.len(), 12);
        assert!(pwd
            .as_str()
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || SYMBOLS.contains(c)));
    }

    #[test]
    fn test_flags_exclude_their_sets() {
        let mut rng = rng();
        let config = GenerationConfig::new(15, false, false);
        for _ in 0..200 {
            let pwd = generate(&config, &mut rng).expect("generate");
            assert!(!pwd.as_str().chars().any(|c| c.is_ascii_digit()));
            assert!(!pwd.as_str().chars().any(|c| SYMBOLS.contains(c)));
        }
    }

    #[test]
    fn test_sampling_reaches_both_ends() {
        // With enough draws, the first and last characters both show up
        // and nothing outside the alphabet does.
        let config = GenerationConfig::new(15, true, true);
        let alphabet = config.alphabet();
        let mut rng = rng();
        let mut seen_first = false;
        let mut seen_last = false;
        for _ in 0..2_000 {
            let c = alphabet.sample(&mut rng).expect("non-empty");
            assert!(alphabet.contains(c));
            seen_first |= c == 'A';
            seen_last |= c == '}';
        }
        assert!(seen_first && seen_last);
    }

    #[test]
    fn test_repeat_generation_keeps_length() {
        let config = GenerationConfig::new(10, true, false);
        let mut rng = rng();
        let a = generate(&config, &mut rng).expect("generate");
        let b = generate(&config, &mut rng).expect("generate");
        assert_eq!(a.len(), b.len());
    }

    #[test]
    fn test_zero_length_rejected() {
        let config = GenerationConfig::new(0, true, true);
        let err = generate(&config, &mut rng()).expect_err("zero length");
        assert!(matches!(err, Error::Invalid { .. }));
    }

    #[test]
    fn test_empty_alphabet_sample_is_none() {
        let alphabet = CharacterAlphabet { chars: Vec::new() };
        assert!(alphabet.is_empty());
        assert_eq!(alphabet.sample(&mut rng()), None);
    }

    #[test]
    fn test_debug_is_redacted() {
        let pwd = generate(&GenerationConfig::default(), &mut rng()).expect("generate");
        assert!(!format!("{pwd:?}").contains(pwd.as_str()));
        assert_eq!(pwd.to_string(), pwd.as_str());
    }

    #[test]
    fn test_default_config() {
        let config = GenerationConfig::default();
        assert_eq!(config, GenerationConfig::new(15, false, false));
        assert_eq!(config.to_string(), "length 15, digits off, symbols off");
    }

    #[test]
    fn test_clamp_length() {
        assert_eq!(GenerationConfig::clamp_length(0), MIN_LENGTH);
        assert_eq!(GenerationConfig::clamp_length(10), 10);
        assert_eq!(GenerationConfig::clamp_length(99), MAX_LENGTH);
    }
}
