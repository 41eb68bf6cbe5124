//! Instrument card: name, last price, change, sparkline and preset selector.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use market_agent_core::TimeFrame;

use crate::card::{CardPhase, InstrumentCard};
use crate::theme;
use crate::ui::{format, sparkline};

pub fn render(f: &mut Frame, area: Rect, card: &InstrumentCard) {
    let title = match (card.name(), card.symbol()) {
        (Some(name), Some(symbol)) => format!(" {name} ({symbol}) "),
        (None, Some(symbol)) => format!(" {symbol} "),
        _ => " Instrument ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(Span::styled(title, theme::bold()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

    f.render_widget(Paragraph::new(price_line(card)), rows[0]);

    match card.phase() {
        CardPhase::Idle => f.render_widget(
            Paragraph::new(Span::styled("Select an instrument.", theme::muted())),
            rows[1],
        ),
        CardPhase::Loading => f.render_widget(
            Paragraph::new(Span::styled("Loading prices…", theme::muted())),
            rows[1],
        ),
        CardPhase::Failed(msg) => f.render_widget(
            Paragraph::new(Span::styled(msg.as_str(), theme::negative())),
            rows[1],
        ),
        CardPhase::Loaded(s) if s.series.is_empty() => f.render_widget(
            Paragraph::new(Span::styled("No price data.", theme::muted())),
            rows[1],
        ),
        CardPhase::Loaded(s) => sparkline::render(f, rows[1], &s.series),
    }

    f.render_widget(Paragraph::new(preset_line(card.timeframe())), rows[2]);
}

fn price_line(card: &InstrumentCard) -> Line<'static> {
    let mut spans = vec![
        Span::styled("Last ", theme::muted()),
        Span::styled(format::format_price(card.last_price()), theme::bold()),
    ];
    if let (Some(pct), Some(trend)) = (card.change_pct(), card.trend()) {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(format::format_pct(pct), theme::trend(trend)));
    }
    Line::from(spans)
}

fn preset_line(active: TimeFrame) -> Line<'static> {
    let mut spans = Vec::with_capacity(TimeFrame::PRESETS.len() * 2);
    for preset in TimeFrame::PRESETS {
        let style = if preset == active {
            theme::selected()
        } else {
            theme::muted()
        };
        spans.push(Span::styled(format!(" {} ", preset.label), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}
