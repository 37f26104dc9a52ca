use std::time::{Duration, Instant};

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Proof that a tick was scheduled by a particular run of the clock.
///
/// Every `start` or `cancel` opens a new epoch, so a token minted before a
/// restart is rejected by [`SessionClock::accepts`] afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickToken {
    epoch: u64,
}

/// One-second countdown driving the session duration.
#[derive(Clone, Debug)]
pub struct SessionClock {
    duration_secs: u32,
    remaining_secs: u32,
    epoch: u64,
    next_due: Option<Instant>,
}

impl SessionClock {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            epoch: 0,
            next_due: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.epoch += 1;
        self.next_due = Some(now + TICK_INTERVAL);
    }

    /// Stops future ticks. Tokens already handed out become stale.
    pub fn cancel(&mut self) {
        if self.next_due.take().is_some() {
            self.epoch += 1;
        }
    }

    /// Cancels and rewinds the countdown to `duration_secs`.
    pub fn reset(&mut self, duration_secs: u32) {
        self.cancel();
        self.duration_secs = duration_secs;
        self.remaining_secs = duration_secs;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Token for the current run, if the clock is ticking.
    pub fn token(&self) -> Option<TickToken> {
        self.next_due.map(|_| TickToken { epoch: self.epoch })
    }

    pub fn accepts(&self, token: TickToken) -> bool {
        self.is_armed() && token.epoch == self.epoch
    }

    /// Yields one token per elapsed tick interval, paired with the instant the
    /// tick was due. Call repeatedly until it returns `None` to catch up on
    /// overdue ticks.
    pub fn poll(&mut self, now: Instant) -> Option<(TickToken, Instant)> {
        let due = self.next_due?;
        if now < due {
            return None;
        }
        self.next_due = Some(due + TICK_INTERVAL);
        Some((TickToken { epoch: self.epoch }, due))
    }

    /// Consumes one second and returns what is left.
    pub fn advance(&mut self) -> u32 {
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        self.remaining_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }
}
