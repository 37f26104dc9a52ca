use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::widgets::{Axis, Block, Chart, Dataset, GraphType, Widget};

use crate::engine::metrics::Snapshot;
use crate::ui::theme::Theme;

/// WPM and accuracy over the course of one test, one point per snapshot.
pub struct WpmChart<'a> {
    wpm: Vec<(f64, f64)>,
    accuracy: Vec<(f64, f64)>,
    theme: &'a Theme,
}

impl<'a> WpmChart<'a> {
    pub fn new(snapshots: &[Snapshot], theme: &'a Theme) -> Self {
        let (wpm, accuracy) = series(snapshots);
        Self {
            wpm,
            accuracy,
            theme,
        }
    }
}

/// Splits snapshots into `(seconds, wpm)` and `(seconds, accuracy)` points.
pub fn series(snapshots: &[Snapshot]) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    snapshots
        .iter()
        .map(|s| {
            let x = s.elapsed_ms as f64 / 1000.0;
            ((x, s.wpm as f64), (x, s.accuracy as f64))
        })
        .unzip()
}

impl Widget for WpmChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .title(" WPM / Accuracy Over Time ")
            .border_style(Style::default().fg(colors.border()));

        if self.wpm.is_empty() {
            block.render(area, buf);
            return;
        }

        let max_x = self.wpm.last().map(|(x, _)| *x).unwrap_or(1.0).max(1.0);
        let max_y = self
            .wpm
            .iter()
            .map(|(_, y)| *y)
            .fold(100.0f64, f64::max);

        let datasets = vec![
            Dataset::default()
                .name("wpm")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(colors.accent()))
                .data(&self.wpm),
            Dataset::default()
                .name("acc %")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(colors.success()))
                .data(&self.accuracy),
        ];

        let chart = Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .title("Seconds")
                    .style(Style::default().fg(colors.text_pending()))
                    .bounds([0.0, max_x])
                    .labels(["0".to_string(), format!("{max_x:.0}")]),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(colors.text_pending()))
                    .bounds([0.0, max_y * 1.1])
                    .labels(["0".to_string(), format!("{:.0}", max_y * 1.1)]),
            );

        chart.render(area, buf);
    }
}
