use std::time::{Duration, Instant};

use keysprint::generator::{ContentMode, TextSupplier, WordBank};
use keysprint::session::clock::TICK_INTERVAL;
use keysprint::session::controller::{TOKENS_TO_GENERATE, WORDS_BUFFER};
use keysprint::session::{
    CommandOutcome, KeyInput, KeyOutcome, SessionController, SessionStatus, TickOutcome,
};
use keysprint::store::schema::{HIGH_SCORE_KEY, RECENT_SCORES_KEY};
use keysprint::store::{HistoryEntry, HistoryStore, JsonStore, KeyValueStore};

fn type_token<S: TextSupplier>(session: &mut SessionController<S>, now: Instant) {
    let token = session.tokens()[session.cursor().token_index].clone();
    for ch in token.chars() {
        session.on_key(KeyInput::Char(ch), now);
    }
    session.on_key(KeyInput::Space, now);
}

#[test]
fn test_every_mode_produces_typeable_tokens() {
    let mut bank = WordBank::seeded(99);
    for mode in ContentMode::ALL {
        let tokens = bank.generate(TOKENS_TO_GENERATE, mode);
        assert_eq!(tokens.len(), TOKENS_TO_GENERATE, "{mode}");
        assert!(tokens.iter().all(|t| !t.is_empty()), "{mode}");
        assert!(
            tokens.iter().all(|t| !t.chars().any(char::is_whitespace)),
            "{mode}"
        );
    }
}

#[test]
fn test_numbers_mode_can_start_a_session() {
    let mut session = SessionController::new(WordBank::seeded(3), ContentMode::Numbers, 15);
    let first = session.tokens()[0].chars().next().unwrap();
    assert!(first.is_ascii_digit());

    let outcome = session.on_key(KeyInput::Char(first), Instant::now());
    assert!(matches!(outcome, KeyOutcome::Typed { started: true, .. }));
    assert_eq!(session.status(), SessionStatus::Running);
}

#[test]
fn test_perfect_session_with_real_words() {
    let mut session = SessionController::new(WordBank::seeded(11), ContentMode::Words, 30);
    let t0 = Instant::now();
    for _ in 0..(TOKENS_TO_GENERATE - WORDS_BUFFER + 5) {
        type_token(&mut session, t0);
    }
    // Typing past the refill threshold pulled in exactly one more batch.
    assert_eq!(session.tokens().len(), 2 * TOKENS_TO_GENERATE);

    assert_eq!(
        session.poll_clock(t0 + Duration::from_secs(30)),
        Some(TickOutcome::Finished)
    );
    let result = session.result().unwrap();
    assert_eq!(result.incorrect, 0);
    assert_eq!(result.accuracy, 100);
    assert_eq!(result.snapshots.len(), 30);
    assert!(result.snapshots.iter().all(|s| s.accuracy == 100));
    let elapsed: Vec<u64> = result.snapshots.iter().map(|s| s.elapsed_ms).collect();
    assert!(elapsed.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_restart_mid_session_discards_everything() {
    let mut session = SessionController::new(WordBank::seeded(5), ContentMode::Words, 60);
    let t0 = Instant::now();
    type_token(&mut session, t0);
    session.on_key(KeyInput::Char('#'), t0);
    session.poll_clock(t0 + TICK_INTERVAL * 2);
    let stale = session.clock().token().unwrap();

    assert_eq!(session.restart(), CommandOutcome::Accepted);
    assert_eq!(session.on_tick(stale, t0 + TICK_INTERVAL * 3), TickOutcome::Ignored);
    assert_eq!(session.status(), SessionStatus::Idle);
    assert_eq!(session.time_left(), 60);
    assert!(session.outcomes().is_empty());
    assert!(session.key_stats().is_empty());
    assert!(session.snapshots().is_empty());
    assert_eq!(session.poll_clock(t0 + Duration::from_secs(100)), None);
}

#[test]
fn test_finished_sessions_accumulate_history_on_disk() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut history = HistoryStore::new(JsonStore::with_base_dir(dir.path()).unwrap());
    let mut session = SessionController::new(WordBank::seeded(21), ContentMode::Words, 15);

    let mut best = 0.0f64;
    for round in 0..6 {
        let t0 = Instant::now();
        for _ in 0..=round {
            type_token(&mut session, t0);
        }
        session.poll_clock(t0 + Duration::from_secs(15));
        let result = session.result().expect("session finished");
        let update = history.record(HistoryEntry::from_result(result));

        assert_eq!(update.is_new_record, result.wpm as f64 > best);
        best = best.max(result.wpm as f64);
        assert_eq!(update.best_wpm, best);

        session.restart();
    }

    let kv = history.into_inner();
    let raw = kv.get(RECENT_SCORES_KEY).unwrap().unwrap();
    let stored: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored.len(), 5);
    assert!(stored.iter().all(|e| e["selectedTime"] == 15));
    let high: f64 = kv.get(HIGH_SCORE_KEY).unwrap().unwrap().parse().unwrap();
    assert_eq!(high, best);
}

#[test]
fn test_corrupt_history_file_is_recovered() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("recentScores.json"), "[{\"wpm\": oops").unwrap();
    std::fs::write(dir.path().join("highScore.json"), "NaN-ish").unwrap();

    let mut history = HistoryStore::new(JsonStore::with_base_dir(dir.path()).unwrap());
    assert!(history.recent().is_empty());
    assert_eq!(history.best_wpm(), 0.0);

    let mut session = SessionController::new(WordBank::seeded(8), ContentMode::Characters, 15);
    let t0 = Instant::now();
    type_token(&mut session, t0);
    session.poll_clock(t0 + Duration::from_secs(15));
    let update = history.record(HistoryEntry::from_result(session.result().unwrap()));

    assert_eq!(update.recent.len(), 1);
    assert_eq!(history.recent().len(), 1);
}
