use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Widget};

use crate::engine::key_stats::KeyStatsStore;
use crate::ui::components::dashboard::accuracy_color;
use crate::ui::theme::Theme;

/// Per-key accuracy bars, worst keys first.
pub struct KeyAccuracy<'a> {
    stats: &'a KeyStatsStore,
    theme: &'a Theme,
}

impl<'a> KeyAccuracy<'a> {
    pub fn new(stats: &'a KeyStatsStore, theme: &'a Theme) -> Self {
        Self { stats, theme }
    }
}

fn format_key_row(key: char, accuracy: f64, correct: u32, total: u32) -> String {
    format!(" {key} {accuracy:>5.1}% {correct:>3}/{total:<3} ")
}

impl Widget for KeyAccuracy<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(Line::from(Span::styled(
                " Key Accuracy ",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )))
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }
        if self.stats.is_empty() {
            buf.set_string(
                inner.x,
                inner.y,
                " No keys typed",
                Style::default().fg(colors.text_pending()),
            );
            return;
        }

        for (i, (ch, stat)) in self
            .stats
            .sorted_by_accuracy()
            .into_iter()
            .take(inner.height as usize)
            .enumerate()
        {
            let y = inner.y + i as u16;
            let label = format_key_row(ch, stat.accuracy, stat.correct, stat.total());
            let label_len = label.chars().count() as u16;
            let color = accuracy_color(stat.accuracy, self.theme);
            buf.set_string(inner.x, y, &label, Style::default().fg(color));

            let bar_space = inner.width.saturating_sub(label_len) as usize;
            if bar_space > 0 {
                let filled = ((stat.accuracy / 100.0) * bar_space as f64).round() as usize;
                let bar = "\u{2588}".repeat(filled.min(bar_space));
                buf.set_string(inner.x + label_len, y, &bar, Style::default().fg(color));
            }
        }
    }
}
