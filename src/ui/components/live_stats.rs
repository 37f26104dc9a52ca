use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::session::SessionStatus;
use crate::ui::theme::Theme;

/// One-line readout of the countdown and live metrics.
pub struct LiveStats<'a> {
    status: SessionStatus,
    time_left: u32,
    wpm: u32,
    accuracy: u32,
    theme: &'a Theme,
}

impl<'a> LiveStats<'a> {
    pub fn new(
        status: SessionStatus,
        time_left: u32,
        wpm: u32,
        accuracy: u32,
        theme: &'a Theme,
    ) -> Self {
        Self {
            status,
            time_left,
            wpm,
            accuracy,
            theme,
        }
    }
}

impl Widget for LiveStats<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let line = if self.status == SessionStatus::Idle {
            Line::from(Span::styled(
                "start typing to begin the test",
                Style::default().fg(colors.text_pending()),
            ))
        } else {
            let time_color = if self.time_left <= 5 {
                colors.warning()
            } else {
                colors.accent()
            };
            let time_str = format!("{}s", self.time_left);
            let wpm_str = format!("{}", self.wpm);
            let acc_str = format!("{}%", self.accuracy);
            Line::from(vec![
                Span::styled(
                    time_str,
                    Style::default().fg(time_color).add_modifier(Modifier::BOLD),
                ),
                Span::styled("   wpm ", Style::default().fg(colors.text_pending())),
                Span::styled(wpm_str, Style::default().fg(colors.fg())),
                Span::styled("   acc ", Style::default().fg(colors.text_pending())),
                Span::styled(acc_str, Style::default().fg(colors.fg())),
            ])
        };

        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
