use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::result::SessionResult;

pub const RECENT_SCORES_KEY: &str = "recentScores";
pub const HIGH_SCORE_KEY: &str = "highScore";

/// Length cap of the recent scores list.
pub const RECENT_CAPACITY: usize = 5;

/// One row of the persisted recent scores list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub wpm: f64,
    pub accuracy: f64,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "selectedTime")]
    pub selected_time: u32,
}

impl HistoryEntry {
    pub fn from_result(result: &SessionResult) -> Self {
        Self {
            wpm: result.wpm as f64,
            accuracy: result.accuracy as f64,
            timestamp: result.timestamp,
            selected_time: result.duration_secs,
        }
    }
}
