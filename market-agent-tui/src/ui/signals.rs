//! Signals page: one bordered card per signal from the last tick.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use market_agent_core::Signal;

use crate::app::AppState;
use crate::pages::signals::EMPTY_MESSAGE;
use crate::pages::{PageState, Remote};
use crate::theme;
use crate::ui::format;

const CARD_HEIGHT: u16 = 4;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let PageState::Signals(state) = &app.page else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);
    f.render_widget(
        Paragraph::new(Span::styled("Signals (last tick)", theme::bold())),
        chunks[0],
    );

    let body = chunks[1];
    match &state.signals {
        Remote::Loading => {
            let loading = Span::styled("Loading signals…", theme::muted());
            f.render_widget(Paragraph::new(loading), body);
        }
        Remote::Failed(msg) => {
            f.render_widget(Paragraph::new(Span::styled(msg.as_str(), theme::negative())), body);
        }
        Remote::Ready(signals) if signals.is_empty() => {
            f.render_widget(Paragraph::new(Span::styled(EMPTY_MESSAGE, theme::muted())), body);
        }
        Remote::Ready(signals) => {
            let mut y = body.y;
            for signal in signals.iter().skip(state.scroll) {
                if y + CARD_HEIGHT > body.bottom() {
                    break;
                }
                let rect = Rect::new(body.x, y, body.width, CARD_HEIGHT);
                render_card(f, rect, signal);
                y += CARD_HEIGHT;
            }
        }
    }
}

fn render_card(f: &mut Frame, area: Rect, signal: &Signal) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(Span::styled(format!(" {} ", signal.instrument_id), theme::bold()))
        .title_bottom(Span::styled(format!(" {} ", format::format_ts(&signal.ts)), theme::muted()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", signal.direction.label()),
                theme::direction(signal.direction),
            ),
            Span::raw("  "),
            Span::styled(
                format!("{} • score {:.2}", signal.rule_id, signal.score),
                theme::text(),
            ),
        ]),
        Line::from(Span::styled(signal.reason.as_str(), theme::muted())),
    ];
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}
