use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Hit/miss tally for one physical key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyStat {
    pub correct: u32,
    pub incorrect: u32,
    /// Percentage of correct presses; 0 until the key is first used.
    pub accuracy: f64,
}

impl KeyStat {
    pub fn total(&self) -> u32 {
        self.correct + self.incorrect
    }

    fn recompute_accuracy(&mut self) {
        let total = self.total();
        self.accuracy = if total == 0 {
            0.0
        } else {
            self.correct as f64 / total as f64 * 100.0
        };
    }
}

/// Per-key stats for one session. Grows monotonically: entries are never
/// removed or decremented, not even when a character is erased.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyStatsStore {
    pub stats: HashMap<char, KeyStat>,
}

impl KeyStatsStore {
    pub fn record(&mut self, key: char, correct: bool) {
        let stat = self.stats.entry(key).or_default();
        if correct {
            stat.correct += 1;
        } else {
            stat.incorrect += 1;
        }
        stat.recompute_accuracy();
    }

    pub fn get_stat(&self, key: char) -> Option<&KeyStat> {
        self.stats.get(&key)
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Keys ordered worst accuracy first, ties broken by most presses then key.
    pub fn sorted_by_accuracy(&self) -> Vec<(char, KeyStat)> {
        let mut entries: Vec<(char, KeyStat)> = self.stats.iter().map(|(k, s)| (*k, *s)).collect();
        entries.sort_by(|a, b| {
            a.1.accuracy
                .partial_cmp(&b.1.accuracy)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.1.total().cmp(&a.1.total()))
                .then_with(|| a.0.cmp(&b.0))
        });
        entries
    }
}
