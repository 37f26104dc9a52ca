use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::result::SessionResult;
use crate::ui::theme::Theme;

/// Headline numbers of a finished test.
pub struct Dashboard<'a> {
    pub result: &'a SessionResult,
    pub best_wpm: f64,
    pub is_new_record: bool,
    pub theme: &'a Theme,
}

impl<'a> Dashboard<'a> {
    pub fn new(
        result: &'a SessionResult,
        best_wpm: f64,
        is_new_record: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            result,
            best_wpm,
            is_new_record,
            theme,
        }
    }
}

impl Widget for Dashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Test Complete ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        if self.is_new_record {
            Paragraph::new(Line::from(Span::styled(
                "New High Score!",
                Style::default()
                    .fg(colors.success())
                    .add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center)
            .render(layout[0], buf);
        }

        let wpm_color = if self.is_new_record {
            colors.success()
        } else {
            colors.accent()
        };
        let wpm_text = format!("{} WPM", self.result.wpm);
        let best_text = format!("  (best {:.0})", self.best_wpm);
        let mode_text = format!("  {} \u{00b7} {}s", self.result.mode, self.result.duration_secs);
        let wpm_line = Line::from(vec![
            Span::styled("  Speed:    ", Style::default().fg(colors.fg())),
            Span::styled(
                wpm_text,
                Style::default().fg(wpm_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(best_text, Style::default().fg(colors.text_pending())),
            Span::styled(mode_text, Style::default().fg(colors.text_pending())),
        ]);
        Paragraph::new(wpm_line).render(layout[1], buf);

        let acc_color = accuracy_color(self.result.accuracy as f64, self.theme);
        let acc_text = format!("{}%", self.result.accuracy);
        let acc_line = Line::from(vec![
            Span::styled("  Accuracy: ", Style::default().fg(colors.fg())),
            Span::styled(
                acc_text,
                Style::default().fg(acc_color).add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(acc_line).render(layout[2], buf);

        let chars_line = Line::from(vec![
            Span::styled("  Chars:    ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("{} correct", self.result.correct),
                Style::default().fg(colors.success()),
            ),
            Span::styled(" / ", Style::default().fg(colors.text_pending())),
            Span::styled(
                format!("{} incorrect", self.result.incorrect),
                Style::default().fg(if self.result.incorrect == 0 {
                    colors.success()
                } else {
                    colors.error()
                }),
            ),
            Span::styled(
                format!("  ({} typed)", self.result.total_chars()),
                Style::default().fg(colors.text_pending()),
            ),
        ]);
        Paragraph::new(chars_line).render(layout[3], buf);
    }
}

pub fn accuracy_color(accuracy: f64, theme: &Theme) -> ratatui::style::Color {
    let colors = &theme.colors;
    if accuracy >= 95.0 {
        colors.success()
    } else if accuracy >= 85.0 {
        colors.warning()
    } else {
        colors.error()
    }
}
