use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use keysprint::app::{App, AppScreen};
use keysprint::config::Config;
use keysprint::event::{AppEvent, EventHandler};
use keysprint::generator::{ContentMode, WordBank};
use keysprint::session::SessionStatus;
use keysprint::store::JsonStore;
use keysprint::ui::components::chart::WpmChart;
use keysprint::ui::components::dashboard::Dashboard;
use keysprint::ui::components::key_accuracy::KeyAccuracy;
use keysprint::ui::components::live_stats::LiveStats;
use keysprint::ui::components::recent_tests::RecentTests;
use keysprint::ui::components::selector::Selector;
use keysprint::ui::components::typing_area::TypingArea;
use keysprint::ui::layout::{ResultsLayout, TestLayout, pack_hint_lines};
use keysprint::ui::theme::Theme;

const LOG_ENV: &str = "KEYSPRINT_LOG";

#[derive(Parser)]
#[command(name = "keysprint", version, about = "Terminal typing speed test")]
struct Cli {
    #[arg(short, long, help = "Test length in seconds (15, 30, 60 or 120)")]
    duration: Option<u32>,

    #[arg(short, long, value_enum, help = "Content to type")]
    mode: Option<ContentMode>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Directory for history and logs")]
    data_dir: Option<PathBuf>,
}

impl Cli {
    fn apply(self, config: &mut Config) {
        if let Some(duration) = self.duration {
            config.duration_secs = duration;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if let Some(dir) = self.data_dir {
            config.data_dir = dir;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    cli.apply(&mut config);

    let _log_guard = init_logging(&config.data_dir)?;
    if let Some(e) = config_error {
        warn!(error = ?e, "ignoring unreadable config");
    }

    let themes = Theme::available_themes();
    let theme_names: Vec<&str> = themes.iter().map(String::as_str).collect();
    config.validate(&theme_names);
    let theme = Theme::load(&config.theme).unwrap_or_default();

    let store = JsonStore::with_base_dir(&config.data_dir)?;
    info!(data_dir = %config.data_dir.display(), "starting");
    let mut app = App::new(config, WordBank::new(), store, theme);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(50));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = app.config.save_selection() {
        warn!(error = ?e, "settings not saved");
    }

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn init_logging(data_dir: &Path) -> Result<WorkerGuard> {
    fs::create_dir_all(data_dir)
        .with_context(|| format!("creating data directory {}", data_dir.display()))?;
    let appender = tracing_appender::rolling::never(data_dir, "keysprint.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(guard)
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => app.handle_key(key, Instant::now()),
            AppEvent::Tick | AppEvent::Resize => {}
        }
        // Steady typing can starve the tick event, so poll on every pass.
        app.on_tick(Instant::now());

        if app.should_quit {
            return Ok(());
        }
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()).fg(colors.fg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Results if app.session.result().is_some() => render_results(frame, app),
        _ => render_test(frame, app),
    }
}

fn render_test(frame: &mut ratatui::Frame, app: &App) {
    let layout = TestLayout::new(frame.area());
    let session = &app.session;
    let theme = &app.theme;

    frame.render_widget(
        Selector::new(session.mode(), session.duration(), app.is_running(), theme),
        layout.header,
    );
    frame.render_widget(
        LiveStats::new(
            session.status(),
            session.time_left(),
            session.live_wpm(),
            session.live_accuracy(),
            theme,
        ),
        layout.stats,
    );
    frame.render_widget(
        TypingArea::new(
            session.tokens(),
            session.cursor(),
            session.outcomes(),
            session.status() != SessionStatus::Finished,
            theme,
        ),
        layout.typing,
    );

    let hints = if app.is_running() {
        vec!["[Tab] restart", "[Esc] quit"]
    } else {
        vec!["[Tab] restart", "[\u{2190}/\u{2192}] mode", "[\u{2191}/\u{2193}] time", "[Esc] quit"]
    };
    render_footer(frame, app, &hints, layout.footer);
}

fn render_results(frame: &mut ratatui::Frame, app: &App) {
    let Some(result) = app.session.result() else {
        return;
    };
    let layout = ResultsLayout::new(frame.area());
    let theme = &app.theme;

    frame.render_widget(
        Dashboard::new(result, app.best_wpm, app.is_new_record(), theme),
        layout.summary,
    );
    frame.render_widget(WpmChart::new(&result.snapshots, theme), layout.chart);
    frame.render_widget(KeyAccuracy::new(&result.key_stats, theme), layout.keys);
    frame.render_widget(RecentTests::new(&app.recent, theme), layout.recent);

    let hints = [
        "[r/Enter/Tab] restart",
        "[\u{2190}/\u{2192}] mode",
        "[\u{2191}/\u{2193}] time",
        "[q] quit",
    ];
    render_footer(frame, app, &hints, layout.footer);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, hints: &[&str], area: ratatui::layout::Rect) {
    let colors = &app.theme.colors;
    let lines: Vec<Line> = pack_hint_lines(hints, area.width as usize)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.text_pending()))))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}
