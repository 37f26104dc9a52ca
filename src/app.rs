use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::config::{self, Config};
use crate::generator::{TextSupplier, WordBank};
use crate::session::{
    CommandOutcome, KeyInput, KeyOutcome, SessionController, SessionStatus, TickOutcome,
};
use crate::store::{HistoryEntry, HistoryStore, HistoryUpdate, JsonStore, KeyValueStore};
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Test,
    Results,
}

pub struct App<S: TextSupplier = WordBank, K: KeyValueStore = JsonStore> {
    pub screen: AppScreen,
    pub session: SessionController<S>,
    pub history: HistoryStore<K>,
    pub recent: Vec<HistoryEntry>,
    pub best_wpm: f64,
    /// Outcome of recording the most recent finished test.
    pub last_update: Option<HistoryUpdate>,
    pub theme: Theme,
    pub config: Config,
    pub should_quit: bool,
}

impl<S: TextSupplier, K: KeyValueStore> App<S, K> {
    pub fn new(config: Config, supplier: S, kv: K, theme: Theme) -> Self {
        let history = HistoryStore::new(kv);
        let recent = history.recent();
        let best_wpm = history.best_wpm();
        let session = SessionController::new(supplier, config.mode, config.duration_secs);
        Self {
            screen: AppScreen::Test,
            session,
            history,
            recent,
            best_wpm,
            last_update: None,
            theme,
            config,
            should_quit: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match self.screen {
            AppScreen::Test => self.handle_test_key(key, now),
            AppScreen::Results => self.handle_results_key(key),
        }
    }

    fn handle_test_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.restart(),
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
                self.handle_selector_key(key.code)
            }
            _ => {
                let outcome = self.session.on_key(to_key_input(key), now);
                if let KeyOutcome::Typed { started: true, .. } = outcome {
                    debug!("first keystroke");
                }
            }
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('r') | KeyCode::Enter | KeyCode::Tab => self.restart(),
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
                self.handle_selector_key(key.code)
            }
            _ => {}
        }
    }

    /// Arrow keys cycle content mode (left/right) and duration (up/down).
    /// The session rejects both while a test is running.
    fn handle_selector_key(&mut self, code: KeyCode) {
        let outcome = match code {
            KeyCode::Left => self.session.set_mode(self.session.mode().prev()),
            KeyCode::Right => self.session.set_mode(self.session.mode().next()),
            KeyCode::Up => self
                .session
                .set_duration(config::next_duration(self.session.duration())),
            KeyCode::Down => self
                .session
                .set_duration(config::prev_duration(self.session.duration())),
            _ => CommandOutcome::Rejected,
        };
        if outcome == CommandOutcome::Accepted {
            self.config.mode = self.session.mode();
            self.config.duration_secs = self.session.duration();
            self.screen = AppScreen::Test;
        }
    }

    pub fn restart(&mut self) {
        self.session.restart();
        self.screen = AppScreen::Test;
    }

    /// Delivers due clock ticks and records the result when the test ends.
    pub fn on_tick(&mut self, now: Instant) {
        if self.session.poll_clock(now) == Some(TickOutcome::Finished) {
            self.record_result();
        }
    }

    fn record_result(&mut self) {
        let Some(result) = self.session.result() else {
            return;
        };
        let update = self.history.record(HistoryEntry::from_result(result));
        self.recent = update.recent.clone();
        self.best_wpm = update.best_wpm;
        self.last_update = Some(update);
        self.screen = AppScreen::Results;
    }

    pub fn is_new_record(&self) -> bool {
        self.last_update.as_ref().is_some_and(|u| u.is_new_record)
    }

    pub fn is_running(&self) -> bool {
        self.session.status() == SessionStatus::Running
    }
}

/// Maps a terminal key to the session's key vocabulary. Keys with control
/// or alt held never count as typed characters.
pub fn to_key_input(key: KeyEvent) -> KeyInput {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return KeyInput::Other;
    }
    match key.code {
        KeyCode::Char(' ') => KeyInput::Space,
        KeyCode::Char(ch) => KeyInput::Char(ch),
        KeyCode::Backspace => KeyInput::Backspace,
        _ => KeyInput::Other,
    }
}
