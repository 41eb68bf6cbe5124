//! Instruments page: add-instrument form beside the instrument list.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use market_agent_core::Instrument;

use crate::app::AppState;
use crate::pages::{
    FormField, InstrumentForm, InstrumentKind, InstrumentsState, Notice, PageState, Remote,
};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let PageState::Instruments(state) = &app.page else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_form(f, chunks[0], state);
    render_list(f, chunks[1], &state.list);
}

fn render_form(f: &mut Frame, area: Rect, state: &InstrumentsState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(Span::styled(" Add instrument ", theme::panel_title(true)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines: Vec<Line> = FormField::ALL
        .iter()
        .map(|&field| field_line(&state.form, field))
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "↑/↓ field  ←/→ or space: type  Enter: submit  Esc: back",
        theme::muted(),
    )));
    lines.push(Line::from(""));

    if state.submitting {
        lines.push(Line::from(Span::styled("Submitting…", theme::warning())));
    } else if let Some(notice) = &state.notice {
        lines.push(match notice {
            Notice::Success(msg) => Line::from(Span::styled(msg.as_str(), theme::positive())),
            Notice::Error(msg) => Line::from(Span::styled(msg.as_str(), theme::negative())),
        });
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn field_line(form: &InstrumentForm, field: FormField) -> Line<'_> {
    let focused = form.focus == field;
    let marker = if focused { "▶ " } else { "  " };
    let label = if field.is_required() {
        format!("{}*", field.label())
    } else {
        field.label().to_string()
    };
    let label_style = if focused { theme::accent() } else { theme::text() };

    let mut spans = vec![
        Span::styled(marker, theme::accent()),
        Span::styled(format!("{label:<15}"), label_style),
    ];

    if field == FormField::Kind {
        for kind in [InstrumentKind::Equity, InstrumentKind::Bond] {
            let style = if kind == form.kind {
                theme::selected()
            } else {
                theme::muted()
            };
            spans.push(Span::styled(format!(" {} ", kind.as_str()), style));
        }
        return Line::from(spans);
    }

    let value = form.value(field);
    if value.is_empty() {
        spans.push(Span::styled(field.placeholder(), theme::muted()));
    } else {
        spans.push(Span::styled(value, theme::bold()));
    }
    if focused {
        spans.push(Span::styled("▏", theme::accent()));
    }
    Line::from(spans)
}

fn render_list(f: &mut Frame, area: Rect, list: &Remote<Vec<Instrument>>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(Span::styled(" Instruments ", theme::panel_title(false)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    match list {
        Remote::Loading => {
            f.render_widget(Paragraph::new(Span::styled("Loading…", theme::muted())), inner);
        }
        Remote::Failed(msg) => {
            f.render_widget(Paragraph::new(Span::styled(msg.as_str(), theme::negative())), inner);
        }
        Remote::Ready(items) if items.is_empty() => {
            f.render_widget(Paragraph::new(Span::styled("No instruments.", theme::muted())), inner);
        }
        Remote::Ready(items) => {
            let rows: Vec<ListItem> = items
                .iter()
                .map(|inst| {
                    ListItem::new(Line::from(vec![
                        Span::styled(format!("{:<12}", inst.symbol), theme::accent()),
                        Span::styled(format!("{:<8}", inst.kind), theme::text()),
                        Span::styled(
                            format!("{} · {}", inst.currency, inst.source),
                            theme::muted(),
                        ),
                    ]))
                })
                .collect();
            f.render_widget(List::new(rows), inner);
        }
    }
}
