use std::collections::BTreeMap;
use std::time::Instant;

use tracing::{debug, info};

use crate::engine::key_stats::KeyStatsStore;
use crate::engine::metrics::{self, MetricsEngine, Snapshot};
use crate::generator::{ContentMode, TextSupplier};
use crate::session::clock::{SessionClock, TickToken};
use crate::session::input::{self, KeystrokeEvent};
use crate::session::result::SessionResult;
use crate::session::typing::{CharOutcome, Cursor, TypingState};

/// Refill once the cursor gets this close to the end of the token sequence.
pub const WORDS_BUFFER: usize = 20;
/// Tokens requested from the supplier per batch.
pub const TOKENS_TO_GENERATE: usize = 70;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Running,
    Finished,
}

/// Key events the controller understands. Hosts translate their own key
/// representation into this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Space,
    Backspace,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Key had no effect; the host should suppress its default handling.
    Ignored,
    Typed {
        event: KeystrokeEvent,
        /// This key moved the session from idle to running.
        started: bool,
    },
    Advanced {
        refilled: bool,
    },
    Erased,
    /// Space or backspace that was valid in this state but had nothing to do.
    Unchanged,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    Accepted,
    Rejected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Stale token, or the session is not running.
    Ignored,
    Ticked { remaining: u32 },
    Finished,
}

/// The idle → running → finished state machine for one typing test.
///
/// All mutation goes through `on_key`, `on_tick` and the commands, each of
/// which completes before returning, so readers never see a half-applied
/// event.
pub struct SessionController<S: TextSupplier> {
    supplier: S,
    mode: ContentMode,
    status: SessionStatus,
    typing: TypingState,
    clock: SessionClock,
    metrics: MetricsEngine,
    started_at: Option<Instant>,
    result: Option<SessionResult>,
}

impl<S: TextSupplier> SessionController<S> {
    pub fn new(mut supplier: S, mode: ContentMode, duration_secs: u32) -> Self {
        let tokens = supplier.generate(TOKENS_TO_GENERATE, mode);
        Self {
            supplier,
            mode,
            status: SessionStatus::Idle,
            typing: TypingState::new(tokens),
            clock: SessionClock::new(duration_secs),
            metrics: MetricsEngine::new(),
            started_at: None,
            result: None,
        }
    }

    pub fn on_key(&mut self, key: KeyInput, now: Instant) -> KeyOutcome {
        let key = match key {
            KeyInput::Char(' ') => KeyInput::Space,
            other => other,
        };
        match self.status {
            SessionStatus::Finished => KeyOutcome::Ignored,
            SessionStatus::Idle => match key {
                KeyInput::Char(ch) if is_typeable(ch) => {
                    self.start(now);
                    let event = input::process_char(&mut self.typing, ch);
                    KeyOutcome::Typed {
                        event,
                        started: true,
                    }
                }
                _ => KeyOutcome::Ignored,
            },
            SessionStatus::Running => match key {
                KeyInput::Char(ch) if is_typeable(ch) => KeyOutcome::Typed {
                    event: input::process_char(&mut self.typing, ch),
                    started: false,
                },
                KeyInput::Space => {
                    if input::process_space(&mut self.typing) {
                        KeyOutcome::Advanced {
                            refilled: self.refill_if_low(),
                        }
                    } else {
                        KeyOutcome::Unchanged
                    }
                }
                KeyInput::Backspace => {
                    if input::process_backspace(&mut self.typing) {
                        KeyOutcome::Erased
                    } else {
                        KeyOutcome::Unchanged
                    }
                }
                _ => KeyOutcome::Ignored,
            },
        }
    }

    /// Applies one clock tick. Tokens from a cancelled run are ignored.
    pub fn on_tick(&mut self, token: TickToken, now: Instant) -> TickOutcome {
        if self.status != SessionStatus::Running || !self.clock.accepts(token) {
            return TickOutcome::Ignored;
        }
        let remaining = self.clock.advance();
        self.take_snapshot(now);
        if remaining == 0 {
            self.finish();
            TickOutcome::Finished
        } else {
            TickOutcome::Ticked { remaining }
        }
    }

    /// Delivers every tick that has come due by `now` and returns the last
    /// outcome, or `None` when no tick was due. Each overdue tick is stamped
    /// with the instant it was due.
    pub fn poll_clock(&mut self, now: Instant) -> Option<TickOutcome> {
        let mut last = None;
        while let Some((token, due)) = self.clock.poll(now) {
            let outcome = self.on_tick(token, due);
            last = Some(outcome);
            if outcome == TickOutcome::Finished {
                break;
            }
        }
        last
    }

    /// Discards the current session and starts over at idle. Always accepted.
    pub fn restart(&mut self) -> CommandOutcome {
        self.clock.reset(self.clock.duration_secs());
        let tokens = self.supplier.generate(TOKENS_TO_GENERATE, self.mode);
        self.typing = TypingState::new(tokens);
        self.metrics.clear();
        self.started_at = None;
        self.result = None;
        self.status = SessionStatus::Idle;
        debug!(mode = %self.mode, duration = self.clock.duration_secs(), "session reset");
        CommandOutcome::Accepted
    }

    pub fn set_mode(&mut self, mode: ContentMode) -> CommandOutcome {
        if self.status == SessionStatus::Running {
            debug!(%mode, "mode change rejected while running");
            return CommandOutcome::Rejected;
        }
        self.mode = mode;
        self.restart()
    }

    pub fn set_duration(&mut self, duration_secs: u32) -> CommandOutcome {
        if self.status == SessionStatus::Running || duration_secs == 0 {
            debug!(duration_secs, "duration change rejected");
            return CommandOutcome::Rejected;
        }
        self.clock.reset(duration_secs);
        if self.status == SessionStatus::Finished {
            return self.restart();
        }
        CommandOutcome::Accepted
    }

    fn start(&mut self, now: Instant) {
        self.status = SessionStatus::Running;
        self.started_at = Some(now);
        self.clock.start(now);
        info!(mode = %self.mode, duration = self.clock.duration_secs(), "session started");
    }

    fn finish(&mut self) {
        self.clock.cancel();
        self.status = SessionStatus::Finished;
        let result = SessionResult::from_session(
            &self.typing,
            self.metrics.snapshots(),
            self.clock.duration_secs(),
            self.clock.remaining_secs(),
            self.mode,
        );
        info!(
            wpm = result.wpm,
            accuracy = result.accuracy,
            correct = result.correct,
            incorrect = result.incorrect,
            "session finished"
        );
        self.result = Some(result);
    }

    fn take_snapshot(&mut self, now: Instant) {
        let started_at = self.started_at.unwrap_or(now);
        self.metrics.snapshot(
            started_at,
            now,
            self.typing.correct,
            self.typing.incorrect,
            self.clock.duration_secs(),
            self.clock.remaining_secs(),
        );
    }

    fn refill_if_low(&mut self) -> bool {
        let next_index = self.typing.cursor.token_index;
        if next_index + WORDS_BUFFER <= self.typing.tokens.len() {
            return false;
        }
        let more = self.supplier.generate(TOKENS_TO_GENERATE, self.mode);
        debug!(added = more.len(), at = next_index, "refilled token buffer");
        self.typing.tokens.extend(more);
        true
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn time_left(&self) -> u32 {
        self.clock.remaining_secs()
    }

    pub fn duration(&self) -> u32 {
        self.clock.duration_secs()
    }

    pub fn mode(&self) -> ContentMode {
        self.mode
    }

    pub fn tokens(&self) -> &[String] {
        &self.typing.tokens
    }

    pub fn cursor(&self) -> Cursor {
        self.typing.cursor
    }

    pub fn input(&self) -> &str {
        &self.typing.input
    }

    pub fn outcomes(&self) -> &BTreeMap<Cursor, CharOutcome> {
        &self.typing.outcomes
    }

    pub fn correct(&self) -> u32 {
        self.typing.correct
    }

    pub fn incorrect(&self) -> u32 {
        self.typing.incorrect
    }

    pub fn live_wpm(&self) -> u32 {
        metrics::compute_wpm(self.typing.correct, self.duration(), self.time_left())
    }

    pub fn live_accuracy(&self) -> u32 {
        metrics::compute_accuracy(self.typing.correct, self.typing.incorrect)
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        self.metrics.snapshots()
    }

    pub fn key_stats(&self) -> &KeyStatsStore {
        &self.typing.key_stats
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    pub fn result(&self) -> Option<&SessionResult> {
        self.result.as_ref()
    }

    pub fn supplier(&self) -> &S {
        &self.supplier
    }
}

fn is_typeable(ch: char) -> bool {
    !ch.is_whitespace() && !ch.is_control()
}
