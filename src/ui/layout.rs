use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen regions of the test view.
pub struct TestLayout {
    pub header: Rect,
    pub stats: Rect,
    pub typing: Rect,
    pub footer: Rect,
}

impl TestLayout {
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(2),
            ])
            .split(area);

        Self {
            header: vertical[0],
            stats: vertical[1],
            typing: vertical[2],
            footer: vertical[3],
        }
    }
}

/// Screen regions of the results view. The chart and key table sit side by
/// side on wide terminals and stack otherwise.
pub struct ResultsLayout {
    pub summary: Rect,
    pub chart: Rect,
    pub keys: Rect,
    pub recent: Rect,
    pub footer: Rect,
}

impl ResultsLayout {
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(7),
                Constraint::Min(8),
                Constraint::Length(8),
                Constraint::Length(2),
            ])
            .split(area);

        let (chart, keys) = if area.width >= 100 {
            let horizontal = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
                .split(vertical[1]);
            (horizontal[0], horizontal[1])
        } else {
            let stacked = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(vertical[1]);
            (stacked[0], stacked[1])
        };

        Self {
            summary: vertical[0],
            chart,
            keys,
            recent: vertical[2],
            footer: vertical[3],
        }
    }
}

pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = "  ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints {
        if hint.is_empty() {
            continue;
        }
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width {
            current = candidate;
            has_hint = true;
        } else {
            if has_hint {
                out.push(current);
            }
            current = format!("{prefix}{hint}");
            has_hint = true;
        }
    }

    if has_hint {
        out.push(current);
    }
    out
}
