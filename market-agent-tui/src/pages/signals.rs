//! Signals — the last tick's signal batch.

use market_agent_core::Signal;

use super::Remote;

pub const EMPTY_MESSAGE: &str = "No signals yet.";

#[derive(Debug, Clone)]
pub struct SignalsState {
    pub signals: Remote<Vec<Signal>>,
    pub scroll: usize,
}

impl Default for SignalsState {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalsState {
    pub fn new() -> Self {
        Self {
            signals: Remote::Loading,
            scroll: 0,
        }
    }

    pub fn scroll_down(&mut self) {
        let n = self.signals.ready().map_or(0, Vec::len);
        if self.scroll + 1 < n {
            self.scroll += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}
