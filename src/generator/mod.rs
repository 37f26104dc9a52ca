pub mod dictionary;
pub mod numbers;

use std::fmt;

use clap::ValueEnum;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::generator::dictionary::Dictionary;

/// What kind of tokens a test is made of.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ContentMode {
    #[default]
    Words,
    Adjectives,
    Numbers,
    Characters,
}

impl ContentMode {
    pub const ALL: [ContentMode; 4] = [
        ContentMode::Words,
        ContentMode::Adjectives,
        ContentMode::Numbers,
        ContentMode::Characters,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentMode::Words => "words",
            ContentMode::Adjectives => "adjectives",
            ContentMode::Numbers => "numbers",
            ContentMode::Characters => "characters",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ContentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lazy source of tokens for a session.
///
/// Implementations must return exactly `count` tokens, none of them empty.
/// Calls are synchronous and expected to return immediately.
pub trait TextSupplier {
    fn generate(&mut self, count: usize, mode: ContentMode) -> Vec<String>;
}

/// Default supplier backed by the bundled word lists.
pub struct WordBank {
    words: Dictionary,
    adjectives: Dictionary,
    rng: SmallRng,
}

impl WordBank {
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }

    /// Reproducible supplier for tests and benchmarks.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Self {
        Self {
            words: Dictionary::load_words(),
            adjectives: Dictionary::load_adjectives(),
            rng,
        }
    }

    fn pick(dictionary: &Dictionary, rng: &mut SmallRng) -> String {
        let words = dictionary.words();
        if words.is_empty() {
            // Never hand out an empty token.
            return random_letter(rng).to_string();
        }
        words[rng.gen_range(0..words.len())].clone()
    }
}

impl Default for WordBank {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSupplier for WordBank {
    fn generate(&mut self, count: usize, mode: ContentMode) -> Vec<String> {
        let rng = &mut self.rng;
        (0..count)
            .map(|_| match mode {
                ContentMode::Words => Self::pick(&self.words, rng),
                ContentMode::Adjectives => Self::pick(&self.adjectives, rng),
                ContentMode::Numbers => numbers::random_number_token(rng),
                ContentMode::Characters => random_letter(rng).to_string(),
            })
            .collect()
    }
}

fn random_letter(rng: &mut SmallRng) -> char {
    (b'a' + rng.gen_range(0..26u8)) as char
}
