//! Dashboard: summary boxes, instrument list + card, rules table.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::app::AppState;
use crate::pages::{DashboardState, PageState, Remote};
use crate::theme;
use crate::ui::{card, format, rules};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let PageState::Dashboard(d) = &app.page else {
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Percentage(30),
        ])
        .split(area);

    render_summary(f, rows[0], d);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(rows[1]);
    render_instruments(f, middle[0], d);
    card::render(f, middle[1], &d.card);

    let block = boxed(" Rules ");
    let inner = block.inner(rows[2]);
    f.render_widget(block, rows[2]);
    rules::render_table(f, inner, &d.rules, 0);
}

fn boxed(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(Span::styled(title, theme::panel_title(false)))
}

fn loading_or_error<T>(remote: &Remote<T>) -> Option<Line<'_>> {
    match remote {
        Remote::Loading => Some(Line::from(Span::styled("Loading…", theme::muted()))),
        Remote::Failed(msg) => Some(Line::from(Span::styled(msg.as_str(), theme::negative()))),
        Remote::Ready(_) => None,
    }
}

fn render_summary(f: &mut Frame, area: Rect, d: &DashboardState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let health = loading_or_error(&d.health).unwrap_or_else(|| {
        let status = d.health.ready().map_or("", |h| h.status.as_str());
        let style = if status == "ok" {
            theme::positive()
        } else {
            theme::warning()
        };
        Line::from(Span::styled(status.to_string(), style))
    });
    let block = boxed(" API Health ");
    f.render_widget(Paragraph::new(health).block(block), cols[0]);

    let active = loading_or_error(&d.rules).unwrap_or_else(|| {
        Line::from(vec![
            Span::styled(d.active_rules().unwrap_or(0).to_string(), theme::bold()),
            Span::styled(" enabled", theme::muted()),
        ])
    });
    f.render_widget(Paragraph::new(active).block(boxed(" Active Rules ")), cols[1]);

    let mut status_lines = match (&d.status, loading_or_error(&d.status)) {
        (_, Some(line)) => vec![line],
        (Remote::Ready(s), None) => vec![
            Line::from(vec![
                Span::styled("Last tick ", theme::muted()),
                Span::styled(
                    s.last_tick.as_deref().map_or_else(|| "never".to_string(), format::format_ts),
                    theme::text(),
                ),
            ]),
            Line::from(vec![
                Span::styled("Signals ", theme::muted()),
                Span::styled(s.signals_count.to_string(), theme::bold()),
            ]),
        ],
        _ => Vec::new(),
    };
    match &d.tick {
        Some(Remote::Loading) => {
            status_lines.push(Line::from(Span::styled("Tick requested…", theme::warning())))
        }
        Some(Remote::Ready(ack)) if !ack.ok => {
            status_lines.push(Line::from(Span::styled("Tick rejected", theme::negative())))
        }
        Some(Remote::Failed(msg)) => {
            status_lines.push(Line::from(Span::styled(msg.as_str(), theme::negative())))
        }
        _ => {}
    }
    f.render_widget(
        Paragraph::new(status_lines).block(boxed(" Agent Status (t: run tick) ")),
        cols[2],
    );
}

fn render_instruments(f: &mut Frame, area: Rect, d: &DashboardState) {
    let block = boxed(" Instruments ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if let Some(line) = loading_or_error(&d.instruments) {
        f.render_widget(Paragraph::new(line), inner);
        return;
    }
    let items = d.instruments.ready().map(Vec::as_slice).unwrap_or(&[]);
    if items.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("No instruments.", theme::muted())),
            inner,
        );
        return;
    }

    let rows: Vec<ListItem> = items
        .iter()
        .map(|inst| {
            let mut spans = vec![Span::styled(inst.symbol.as_str(), theme::accent())];
            if let Some(name) = &inst.name {
                spans.push(Span::raw(" "));
                spans.push(Span::styled(name.as_str(), theme::muted()));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();
    let list = List::new(rows).highlight_style(theme::selected());
    let mut state = ListState::default().with_selected(Some(d.selected));
    f.render_stateful_widget(list, inner, &mut state);
}
