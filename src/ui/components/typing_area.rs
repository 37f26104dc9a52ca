use std::collections::BTreeMap;
use std::ops::Range;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::typing::{CharOutcome, Cursor};
use crate::ui::theme::Theme;

pub struct TypingArea<'a> {
    tokens: &'a [String],
    cursor: Cursor,
    outcomes: &'a BTreeMap<Cursor, CharOutcome>,
    show_cursor: bool,
    theme: &'a Theme,
}

impl<'a> TypingArea<'a> {
    pub fn new(
        tokens: &'a [String],
        cursor: Cursor,
        outcomes: &'a BTreeMap<Cursor, CharOutcome>,
        show_cursor: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            tokens,
            cursor,
            outcomes,
            show_cursor,
            theme,
        }
    }

    /// Rendered width of a token: its own characters plus any extra
    /// characters typed past its end.
    fn token_width(&self, idx: usize) -> usize {
        let len = self.tokens[idx].chars().count();
        let typed = self
            .outcomes
            .range(Cursor::new(idx, 0)..Cursor::new(idx + 1, 0))
            .count();
        let with_cursor = if idx == self.cursor.token_index {
            self.cursor.char_index + 1
        } else {
            0
        };
        len.max(typed).max(with_cursor)
    }

    fn token_spans(&self, idx: usize) -> Vec<Span<'static>> {
        let colors = &self.theme.colors;
        let token: Vec<char> = self.tokens[idx].chars().collect();
        let width = self.token_width(idx);
        let mut spans = Vec::with_capacity(width);

        for char_index in 0..width {
            let pos = Cursor::new(idx, char_index);
            let expected = token.get(char_index).copied();
            let (display, mut style) = match (self.outcomes.get(&pos), expected) {
                (Some(CharOutcome::Correct), Some(ch)) => {
                    (ch, Style::default().fg(colors.text_correct()))
                }
                // Mistyped positions keep the expected letter so the word stays readable.
                (Some(CharOutcome::Incorrect(_)), Some(ch)) => (
                    ch,
                    Style::default()
                        .fg(colors.text_incorrect())
                        .bg(colors.text_incorrect_bg())
                        .add_modifier(Modifier::UNDERLINED),
                ),
                // Typed past the end of the token.
                (Some(outcome), None) => (
                    match outcome {
                        CharOutcome::Incorrect(typed) => *typed,
                        CharOutcome::Correct => ' ',
                    },
                    Style::default()
                        .fg(colors.text_incorrect())
                        .add_modifier(Modifier::DIM),
                ),
                (None, Some(ch)) => (ch, Style::default().fg(colors.text_pending())),
                (None, None) => (' ', Style::default()),
            };
            if self.show_cursor && pos == self.cursor {
                style = Style::default()
                    .fg(colors.text_cursor_fg())
                    .bg(colors.text_cursor_bg());
            }
            spans.push(Span::styled(display.to_string(), style));
        }
        spans
    }
}

/// Greedily packs tokens into lines of at most `width` columns, separated by
/// one space. A token wider than a line gets a line of its own.
pub fn wrap_tokens(widths: &[usize], width: usize) -> Vec<Range<usize>> {
    let mut lines = Vec::new();
    if width == 0 {
        return lines;
    }
    let mut start = 0;
    let mut used = 0;
    for (i, &w) in widths.iter().enumerate() {
        let needed = if i == start { w } else { used + 1 + w };
        if i > start && needed > width {
            lines.push(start..i);
            start = i;
            used = w;
        } else {
            used = needed;
        }
    }
    if start < widths.len() {
        lines.push(start..widths.len());
    }
    lines
}

/// First line to show so the cursor line sits on the second visible row
/// once the first line has been typed.
pub fn first_visible_line(lines: &[Range<usize>], cursor_token: usize) -> usize {
    let cursor_line = lines
        .iter()
        .position(|r| r.contains(&cursor_token))
        .unwrap_or(0);
    cursor_line.saturating_sub(1)
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 || self.tokens.is_empty() {
            return;
        }

        // Only lay out tokens up to a few screens past the cursor.
        let horizon = (self.cursor.token_index + 1 + inner.width as usize * inner.height as usize)
            .min(self.tokens.len());
        let widths: Vec<usize> = (0..horizon).map(|i| self.token_width(i)).collect();
        let lines = wrap_tokens(&widths, inner.width as usize);
        let first = first_visible_line(&lines, self.cursor.token_index);

        let rendered: Vec<Line> = lines
            .iter()
            .skip(first)
            .take(inner.height as usize)
            .map(|range| {
                let mut spans = Vec::new();
                for idx in range.clone() {
                    if idx > range.start {
                        spans.push(Span::raw(" "));
                    }
                    spans.extend(self.token_spans(idx));
                }
                Line::from(spans)
            })
            .collect();

        Paragraph::new(rendered).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::Theme;

    #[test]
    fn test_wrap_tokens_packs_greedily() {
        // "aaa bb cccc" in width 7 -> "aaa bb" / "cccc"
        let lines = wrap_tokens(&[3, 2, 4], 7);
        assert_eq!(lines, vec![0..2, 2..3]);
    }

    #[test]
    fn test_wrap_tokens_oversized_token_gets_own_line() {
        let lines = wrap_tokens(&[2, 12, 2], 5);
        assert_eq!(lines, vec![0..1, 1..2, 2..3]);
    }

    #[test]
    fn test_wrap_tokens_zero_width() {
        assert!(wrap_tokens(&[1, 2], 0).is_empty());
    }

    #[test]
    fn test_first_visible_line_keeps_one_line_of_context() {
        let lines = vec![0..3, 3..6, 6..9];
        assert_eq!(first_visible_line(&lines, 1), 0);
        assert_eq!(first_visible_line(&lines, 4), 0);
        assert_eq!(first_visible_line(&lines, 7), 1);
    }

    #[test]
    fn test_token_width_includes_extra_chars_and_cursor() {
        let theme = Theme::default();
        let tokens = vec!["hi".to_string(), "yo".to_string()];
        let mut outcomes = BTreeMap::new();
        outcomes.insert(Cursor::new(0, 0), CharOutcome::Correct);
        outcomes.insert(Cursor::new(0, 1), CharOutcome::Correct);
        outcomes.insert(Cursor::new(0, 2), CharOutcome::Incorrect('x'));
        let area = TypingArea::new(&tokens, Cursor::new(0, 3), &outcomes, true, &theme);

        // Two letters, one extra, one slot for the cursor.
        assert_eq!(area.token_width(0), 4);
        assert_eq!(area.token_width(1), 2);
    }

    #[test]
    fn test_render_shows_typed_extra_character() {
        let theme = Theme::default();
        let tokens = vec!["hi".to_string(), "yo".to_string()];
        let mut outcomes = BTreeMap::new();
        outcomes.insert(Cursor::new(0, 0), CharOutcome::Correct);
        outcomes.insert(Cursor::new(0, 1), CharOutcome::Correct);
        outcomes.insert(Cursor::new(0, 2), CharOutcome::Incorrect('x'));

        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        TypingArea::new(&tokens, Cursor::new(0, 3), &outcomes, false, &theme).render(area, &mut buf);

        let row: String = (1..10).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(row.starts_with("hix"), "row was {row:?}");
        assert!(row.contains("yo"));
    }
}
