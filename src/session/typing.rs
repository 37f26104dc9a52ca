use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::key_stats::KeyStatsStore;

/// Position of the next expected character.
///
/// Orders by token first, then by character, so a `BTreeMap<Cursor, _>`
/// iterates in reading order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cursor {
    pub token_index: usize,
    pub char_index: usize,
}

impl Cursor {
    pub const ORIGIN: Cursor = Cursor {
        token_index: 0,
        char_index: 0,
    };

    pub fn new(token_index: usize, char_index: usize) -> Self {
        Self {
            token_index,
            char_index,
        }
    }

    pub fn is_origin(&self) -> bool {
        *self == Self::ORIGIN
    }
}

/// Verdict for one typed position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharOutcome {
    Correct,
    /// Carries the character that was actually typed.
    Incorrect(char),
}

impl CharOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, CharOutcome::Correct)
    }
}

/// All per-session typing state mutated by the keystroke processor.
#[derive(Clone, Debug, Default)]
pub struct TypingState {
    pub tokens: Vec<String>,
    pub cursor: Cursor,
    /// Characters typed into the current token so far.
    pub input: String,
    pub outcomes: BTreeMap<Cursor, CharOutcome>,
    pub correct: u32,
    pub incorrect: u32,
    pub key_stats: KeyStatsStore,
}

impl TypingState {
    pub fn new(tokens: Vec<String>) -> Self {
        Self {
            tokens,
            ..Self::default()
        }
    }

    pub fn current_token(&self) -> Option<&str> {
        self.tokens.get(self.cursor.token_index).map(String::as_str)
    }

    /// Character expected at the cursor, or `None` once the cursor has run
    /// past the end of the current token.
    pub fn expected_char(&self) -> Option<char> {
        self.expected_at(self.cursor)
    }

    pub fn expected_at(&self, pos: Cursor) -> Option<char> {
        self.tokens
            .get(pos.token_index)
            .and_then(|t| t.chars().nth(pos.char_index))
    }

    pub fn outcome_at(&self, pos: Cursor) -> Option<CharOutcome> {
        self.outcomes.get(&pos).copied()
    }

    pub fn typed_count(&self) -> u32 {
        self.correct + self.incorrect
    }
}
