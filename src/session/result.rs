use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::key_stats::KeyStatsStore;
use crate::engine::metrics::{self, Snapshot};
use crate::generator::ContentMode;
use crate::session::typing::TypingState;

/// Summary of a finished session. Built exactly once, when the countdown
/// reaches zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    pub wpm: u32,
    pub accuracy: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub snapshots: Vec<Snapshot>,
    pub key_stats: KeyStatsStore,
    pub timestamp: DateTime<Utc>,
    pub duration_secs: u32,
    pub mode: ContentMode,
}

impl SessionResult {
    pub fn from_session(
        typing: &TypingState,
        snapshots: &[Snapshot],
        duration_secs: u32,
        remaining_secs: u32,
        mode: ContentMode,
    ) -> Self {
        Self {
            wpm: metrics::compute_wpm(typing.correct, duration_secs, remaining_secs),
            accuracy: metrics::compute_accuracy(typing.correct, typing.incorrect),
            correct: typing.correct,
            incorrect: typing.incorrect,
            snapshots: snapshots.to_vec(),
            key_stats: typing.key_stats.clone(),
            timestamp: Utc::now(),
            duration_secs,
            mode,
        }
    }

    pub fn total_chars(&self) -> u32 {
        self.correct + self.incorrect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::input;

    #[test]
    fn test_from_session_uses_final_counts() {
        let mut typing = TypingState::new(vec!["ax".to_string()]);
        input::process_char(&mut typing, 'a');
        input::process_char(&mut typing, 'b');

        let result = SessionResult::from_session(&typing, &[], 30, 0, ContentMode::Words);
        assert_eq!(result.correct, 1);
        assert_eq!(result.incorrect, 1);
        assert_eq!(result.accuracy, 50);
        // 1 char over 30s = 0.4 wpm
        assert_eq!(result.wpm, 0);
        assert_eq!(result.total_chars(), 2);
        assert_eq!(result.key_stats.get_stat('b').unwrap().incorrect, 1);
    }

    #[test]
    fn test_result_serializes_with_mode_name() {
        let typing = TypingState::new(vec!["a".to_string()]);
        let result = SessionResult::from_session(&typing, &[], 15, 0, ContentMode::Numbers);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"mode\":\"numbers\""));
        let back: SessionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
