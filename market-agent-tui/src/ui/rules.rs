//! Rules table, used full-page and on the Dashboard.

use ratatui::layout::{Constraint, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Cell, Paragraph, Row, Table};
use ratatui::Frame;

use market_agent_core::Rule;

use crate::app::AppState;
use crate::pages::{PageState, Remote, RuleRow};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    if let PageState::Rules(state) = &app.page {
        render_table(f, area, &state.rules, state.scroll);
    }
}

pub fn render_table(f: &mut Frame, area: Rect, rules: &Remote<Vec<Rule>>, scroll: usize) {
    let rules = match rules {
        Remote::Loading => {
            f.render_widget(Paragraph::new(Span::styled("Loading rules…", theme::muted())), area);
            return;
        }
        Remote::Failed(msg) => {
            f.render_widget(Paragraph::new(Span::styled(msg.as_str(), theme::negative())), area);
            return;
        }
        Remote::Ready(rules) if rules.is_empty() => {
            let empty = Span::styled("No rules configured.", theme::muted());
            f.render_widget(Paragraph::new(empty), area);
            return;
        }
        Remote::Ready(rules) => rules,
    };

    let header = Row::new(["ID", "Kind", "Enabled", "Params", "Notify"]).style(theme::bold());
    let rows: Vec<Row> = rules
        .iter()
        .skip(scroll)
        .map(|rule| {
            let row = RuleRow::from_rule(rule);
            let enabled_style = if rule.enabled {
                theme::positive()
            } else {
                theme::muted()
            };
            Row::new(vec![
                Cell::from(row.id).style(theme::accent()),
                Cell::from(row.kind),
                Cell::from(row.enabled).style(enabled_style),
                Cell::from(row.params).style(theme::text()),
                Cell::from(row.notify).style(theme::muted()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(20),
        Constraint::Length(16),
        Constraint::Length(8),
        Constraint::Min(20),
        Constraint::Length(20),
    ];
    let table = Table::new(rows, widths).header(header).column_spacing(1);
    f.render_widget(table, area);
}
