use crate::session::typing::{CharOutcome, Cursor, TypingState};

/// What happened to a single character keystroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeystrokeEvent {
    pub position: Cursor,
    /// `None` when the key was typed past the end of the token.
    pub expected: Option<char>,
    pub actual: char,
    pub outcome: CharOutcome,
}

impl KeystrokeEvent {
    pub fn correct(&self) -> bool {
        self.outcome.is_correct()
    }
}

/// Scores one character key against the cursor position and advances it.
///
/// A key typed past the end of the current token has nothing to match and is
/// always scored incorrect.
pub fn process_char(state: &mut TypingState, ch: char) -> KeystrokeEvent {
    let position = state.cursor;
    let expected = state.expected_char();
    let correct = expected == Some(ch);

    let outcome = if correct {
        state.correct += 1;
        CharOutcome::Correct
    } else {
        state.incorrect += 1;
        CharOutcome::Incorrect(ch)
    };

    state.outcomes.insert(position, outcome);
    state.key_stats.record(ch, correct);
    state.input.push(ch);
    state.cursor.char_index += 1;

    KeystrokeEvent {
        position,
        expected,
        actual: ch,
        outcome,
    }
}

/// Moves to the start of the next token. Returns `false` (and changes
/// nothing) when no character has been typed into the current token.
pub fn process_space(state: &mut TypingState) -> bool {
    if state.input.is_empty() {
        return false;
    }
    state.cursor.token_index += 1;
    state.cursor.char_index = 0;
    state.input.clear();
    true
}

/// Erases the last character of the current token.
///
/// Never crosses back into an earlier token, so backspace at the start of any
/// token (including the very first one) is a no-op. The erased position's
/// count is rolled back with its outcome; per-key stats are left untouched.
pub fn process_backspace(state: &mut TypingState) -> bool {
    if state.cursor.char_index == 0 {
        return false;
    }
    state.cursor.char_index -= 1;
    state.input.pop();

    match state.outcomes.remove(&state.cursor) {
        Some(CharOutcome::Correct) => state.correct = state.correct.saturating_sub(1),
        Some(CharOutcome::Incorrect(_)) => state.incorrect = state.incorrect.saturating_sub(1),
        None => {}
    }
    true
}
