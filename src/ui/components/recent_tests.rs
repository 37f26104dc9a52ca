use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::store::HistoryEntry;
use crate::ui::components::dashboard::accuracy_color;
use crate::ui::theme::Theme;

/// The persisted recent scores, newest first.
pub struct RecentTests<'a> {
    entries: &'a [HistoryEntry],
    theme: &'a Theme,
}

impl<'a> RecentTests<'a> {
    pub fn new(entries: &'a [HistoryEntry], theme: &'a Theme) -> Self {
        Self { entries, theme }
    }
}

pub fn format_entry_row(entry: &HistoryEntry) -> String {
    let date_str = entry
        .timestamp
        .with_timezone(&chrono::Local)
        .format("%m/%d %H:%M");
    format!(
        "  {wpm:>5.0}  {acc:>6.1}%  {time:>5}  {date_str}",
        wpm = entry.wpm,
        acc = entry.accuracy,
        time = format!("{}s", entry.selected_time),
    )
}

impl Widget for RecentTests<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(Line::from(Span::styled(
                " Recent Tests ",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )))
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![Line::from(Span::styled(
            "    WPM      Acc%   Time  Date",
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        ))];

        if self.entries.is_empty() {
            lines.push(Line::from(Span::styled(
                "  No tests yet",
                Style::default().fg(colors.text_pending()),
            )));
        }
        for entry in self.entries {
            lines.push(Line::from(Span::styled(
                format_entry_row(entry),
                Style::default().fg(accuracy_color(entry.accuracy, self.theme)),
            )));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_format_entry_row_columns() {
        let entry = HistoryEntry {
            wpm: 72.0,
            accuracy: 96.5,
            timestamp: Utc::now(),
            selected_time: 60,
        };
        let row = format_entry_row(&entry);
        assert!(row.starts_with("     72    96.5%    60s  "), "row was {row:?}");
    }
}
