//! Percent-normalized sparkline: a Braille line chart with no axes.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::widgets::{Axis, Chart, Dataset, GraphType};
use ratatui::Frame;

use market_agent_core::sparkline::SparklineData;
use market_agent_core::PricePoint;

use crate::theme;

/// Draw `series` into `area`. Empty input draws nothing.
pub fn render(f: &mut Frame, area: Rect, series: &[PricePoint]) {
    let Some(data) = SparklineData::from_series(series) else {
        return;
    };

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(theme::trend_color(data.trend)))
        .graph_type(GraphType::Line)
        .data(&data.points);

    let chart = Chart::new(vec![dataset])
        .x_axis(Axis::default().bounds([0.0, data.x_max]))
        .y_axis(Axis::default().bounds(data.y_bounds));

    f.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn cells(terminal: &Terminal<TestBackend>) -> Vec<(String, Style)> {
        let buf = terminal.backend().buffer();
        let area = buf.area;
        let mut out = Vec::new();
        for y in 0..area.height {
            for x in 0..area.width {
                let cell = &buf[(x, y)];
                out.push((cell.symbol().to_string(), cell.style()));
            }
        }
        out
    }

    #[test]
    fn empty_series_draws_nothing() {
        let mut terminal = Terminal::new(TestBackend::new(20, 5)).unwrap();
        terminal.draw(|f| render(f, f.area(), &[])).unwrap();
        assert!(cells(&terminal).iter().all(|(s, _)| s == " "));
    }

    #[test]
    fn rising_series_uses_positive_color() {
        let series = [PricePoint::close("t0", 100.0), PricePoint::close("t1", 110.0)];
        let mut terminal = Terminal::new(TestBackend::new(20, 5)).unwrap();
        terminal.draw(|f| render(f, f.area(), &series)).unwrap();
        let drawn: Vec<_> = cells(&terminal).into_iter().filter(|(s, _)| s != " ").collect();
        assert!(!drawn.is_empty());
        assert!(drawn.iter().all(|(_, style)| style.fg == Some(theme::POSITIVE)));
    }

    #[test]
    fn falling_series_uses_negative_color() {
        let series = [PricePoint::close("t0", 100.0), PricePoint::close("t1", 90.0)];
        let mut terminal = Terminal::new(TestBackend::new(20, 5)).unwrap();
        terminal.draw(|f| render(f, f.area(), &series)).unwrap();
        let drawn: Vec<_> = cells(&terminal).into_iter().filter(|(s, _)| s != " ").collect();
        assert!(!drawn.is_empty());
        assert!(drawn.iter().all(|(_, style)| style.fg == Some(theme::NEGATIVE)));
    }
}
