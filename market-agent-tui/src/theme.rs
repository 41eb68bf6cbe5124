//! Neon-on-charcoal palette and style helpers.
//!
//! - **Accent**: electric cyan (focus, highlights)
//! - **Positive**: neon green (gains, buy, enabled)
//! - **Negative**: hot pink (losses, sell, errors)
//! - **Warning**: neon orange (loading, pending)
//! - **Neutral**: cool purple (watch, secondary info)
//! - **Muted**: steel blue (hints, disabled)

use ratatui::style::{Color, Modifier, Style};

use market_agent_core::{Direction, Trend};

pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT: Color = Color::White;

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

pub fn bold() -> Style {
    text().add_modifier(Modifier::BOLD)
}

/// Highlighted row or focused field.
pub fn selected() -> Style {
    accent().add_modifier(Modifier::REVERSED)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent().add_modifier(Modifier::BOLD)
    } else {
        muted()
    }
}

/// Up is green, down is pink.
pub fn trend_color(trend: Trend) -> Color {
    match trend {
        Trend::Up => POSITIVE,
        Trend::Down => NEGATIVE,
    }
}

pub fn trend(trend: Trend) -> Style {
    Style::default().fg(trend_color(trend))
}

pub fn direction_color(direction: Direction) -> Color {
    match direction {
        Direction::Buy => POSITIVE,
        Direction::Sell => NEGATIVE,
        Direction::Watch => NEUTRAL,
    }
}

/// Badge style for a signal direction.
pub fn direction(direction: Direction) -> Style {
    Style::default()
        .fg(direction_color(direction))
        .add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_colors() {
        assert_eq!(trend_color(Trend::Up), POSITIVE);
        assert_eq!(trend_color(Trend::Down), NEGATIVE);
    }

    #[test]
    fn direction_colors() {
        assert_eq!(direction_color(Direction::Buy), POSITIVE);
        assert_eq!(direction_color(Direction::Sell), NEGATIVE);
        assert_eq!(direction_color(Direction::Watch), NEUTRAL);
    }

    #[test]
    fn active_panel_is_accented() {
        assert_eq!(panel_border(true).fg, Some(ACCENT));
        assert_eq!(panel_border(false).fg, Some(MUTED));
    }
}
