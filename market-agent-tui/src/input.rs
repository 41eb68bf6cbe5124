//! Keyboard input dispatch — global keys → form → page-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::AppState;
use crate::pages::Page;

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Keys that work everywhere, including while typing.
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
            return;
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.navigate(app.active_page().prev());
            } else {
                app.navigate(app.active_page().next());
            }
            return;
        }
        KeyCode::BackTab => {
            app.navigate(app.active_page().prev());
            return;
        }
        _ => {}
    }

    // 2. The Instruments form consumes character keys.
    if app.active_page() == Page::Instruments {
        handle_form_key(app, key);
        return;
    }

    // 3. Global single-letter keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('r') => {
            app.reload();
            return;
        }
        KeyCode::Char(c @ '1'..='4') => {
            if let Some(page) = c.to_digit(10).and_then(|d| Page::from_index(d as usize - 1)) {
                app.navigate(page);
            }
            return;
        }
        _ => {}
    }

    // 4. Page-specific keys.
    match app.active_page() {
        Page::Dashboard => handle_dashboard_key(app, key),
        Page::Rules | Page::Signals => handle_list_key(app, key),
        Page::Instruments => {}
    }
}

fn handle_dashboard_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.select_next_instrument(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev_instrument(),
        KeyCode::Char('l') | KeyCode::Right => app.cycle_timeframe(true),
        KeyCode::Char('h') | KeyCode::Left => app.cycle_timeframe(false),
        KeyCode::Char('t') => app.trigger_tick(),
        _ => {}
    }
}

fn handle_list_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.scroll(true),
        KeyCode::Char('k') | KeyCode::Up => app.scroll(false),
        _ => {}
    }
}

fn handle_form_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.navigate(Page::Dashboard);
            return;
        }
        KeyCode::Enter => {
            app.submit_form();
            return;
        }
        _ => {}
    }

    let Some(state) = app.instruments_mut() else {
        return;
    };
    let form = &mut state.form;
    match key.code {
        KeyCode::Down => form.focus_next(),
        KeyCode::Up => form.focus_prev(),
        KeyCode::Left | KeyCode::Right => form.toggle_kind(),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(c) if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() => {
            form.insert_char(c)
        }
        _ => {}
    }
}
