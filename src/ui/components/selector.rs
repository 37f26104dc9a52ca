use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::config::SUPPORTED_DURATIONS;
use crate::generator::ContentMode;
use crate::ui::theme::Theme;

/// Mode and duration pickers shown above the typing area. Locked (dimmed)
/// while a test is running, since changes are rejected then.
pub struct Selector<'a> {
    mode: ContentMode,
    duration_secs: u32,
    locked: bool,
    theme: &'a Theme,
}

impl<'a> Selector<'a> {
    pub fn new(mode: ContentMode, duration_secs: u32, locked: bool, theme: &'a Theme) -> Self {
        Self {
            mode,
            duration_secs,
            locked,
            theme,
        }
    }

    fn option_style(&self, selected: bool) -> Style {
        let colors = &self.theme.colors;
        match (selected, self.locked) {
            (true, false) => Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
            (true, true) => Style::default().fg(colors.fg()),
            (false, _) => Style::default().fg(colors.text_pending()),
        }
    }
}

impl Widget for Selector<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" keysprint ")
            .border_style(Style::default().fg(if self.locked {
                colors.border()
            } else {
                colors.border_focused()
            }))
            .style(Style::default().bg(colors.header_bg()).fg(colors.header_fg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = Vec::new();
        for mode in ContentMode::ALL {
            spans.push(Span::styled(
                format!(" {mode} "),
                self.option_style(mode == self.mode),
            ));
        }
        spans.push(Span::styled(" \u{2502} ", Style::default().fg(colors.border())));
        for secs in SUPPORTED_DURATIONS {
            spans.push(Span::styled(
                format!(" {secs} "),
                self.option_style(secs == self.duration_secs),
            ));
        }

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_every_option() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 80, 3);
        let mut buf = Buffer::empty(area);
        Selector::new(ContentMode::Numbers, 60, false, &theme).render(area, &mut buf);

        let row: String = (0..80).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        for label in ["words", "adjectives", "numbers", "characters", "15", "30", "60", "120"] {
            assert!(row.contains(label), "missing {label} in {row:?}");
        }
    }
}
