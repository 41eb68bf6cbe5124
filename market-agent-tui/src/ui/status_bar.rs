//! Bottom status bar — page hints, API base, last status message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, StatusLevel};
use crate::pages::Page;
use crate::theme;

/// Key hints for the active page. The Instruments form takes digits and
/// letters as text, so only Tab and Esc navigate there.
fn hints(page: Page) -> &'static str {
    match page {
        Page::Instruments => " Tab/Shift-Tab:page Esc:dashboard Ctrl-C:quit",
        _ => " 1:Dashboard 2:Instruments 3:Rules 4:Signals r:reload q:quit",
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    // Page hints
    spans.push(Span::styled(hints(app.active_page()), theme::muted()));

    spans.push(Span::raw(" | "));
    spans.push(Span::styled(format!("api: {}", app.api_base), theme::neutral()));

    if let Some(at) = app.last_update {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(at.format("%H:%M:%S").to_string(), theme::muted()));
    }

    // Status message
    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
