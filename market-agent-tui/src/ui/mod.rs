//! Top-level UI layout — one full-screen page with a status bar.

pub mod card;
pub mod dashboard;
pub mod format;
pub mod instruments;
pub mod rules;
pub mod signals;
pub mod sparkline;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::app::AppState;
use crate::pages::Page;
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    draw_page(f, chunks[0], app);
    status_bar::render(f, chunks[1], app);
}

/// Draw the mounted page inside its border.
fn draw_page(f: &mut Frame, area: Rect, app: &AppState) {
    let page = app.active_page();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} [{}] ", page.label(), page.index() + 1))
        .title_style(theme::panel_title(true));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match page {
        Page::Dashboard => dashboard::render(f, inner, app),
        Page::Instruments => instruments::render(f, inner, app),
        Page::Rules => rules::render(f, inner, app),
        Page::Signals => signals::render(f, inner, app),
    }
}
