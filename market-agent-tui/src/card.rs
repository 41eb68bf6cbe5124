//! Instrument card — one symbol's latest price, change and sparkline.
//!
//! State machine: `Idle → Loading → {Loaded, Failed}`. Changing the symbol or
//! the timeframe re-enters `Loading` and bumps the generation; a completion
//! is applied only if it carries the current generation, so the most
//! recently issued (symbol, timeframe) pair always wins.

use market_agent_core::sparkline::{final_trend, pct_change};
use market_agent_core::{ApiError, PricePoint, PriceSeries, TimeFrame, Trend};

#[derive(Debug, Clone, PartialEq)]
pub enum CardPhase {
    Idle,
    Loading,
    Loaded(PriceSeries),
    Failed(String),
}

/// A price fetch the card wants issued.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuery {
    pub generation: u64,
    pub symbol: String,
    pub timeframe: TimeFrame,
}

#[derive(Debug, Clone)]
pub struct InstrumentCard {
    symbol: Option<String>,
    name: Option<String>,
    timeframe: TimeFrame,
    generation: u64,
    phase: CardPhase,
}

impl Default for InstrumentCard {
    fn default() -> Self {
        Self::new()
    }
}

impl InstrumentCard {
    pub fn new() -> Self {
        Self {
            symbol: None,
            name: None,
            timeframe: TimeFrame::default(),
            generation: 0,
            phase: CardPhase::Idle,
        }
    }

    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn timeframe(&self) -> TimeFrame {
        self.timeframe
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> &CardPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == CardPhase::Loading
    }

    /// Point the card at `symbol`. No-op if it already shows it.
    pub fn select_symbol(&mut self, symbol: &str, name: Option<String>) -> Option<PriceQuery> {
        if self.symbol.as_deref() == Some(symbol) {
            return None;
        }
        self.symbol = Some(symbol.to_string());
        self.name = name;
        Some(self.begin(symbol.to_string()))
    }

    /// Switch timeframe. Without a symbol the choice is remembered but nothing
    /// is fetched.
    pub fn select_timeframe(&mut self, timeframe: TimeFrame) -> Option<PriceQuery> {
        if self.timeframe == timeframe {
            return None;
        }
        self.timeframe = timeframe;
        let symbol = self.symbol.clone()?;
        Some(self.begin(symbol))
    }

    pub fn cycle_timeframe(&mut self, forward: bool) -> Option<PriceQuery> {
        let next = if forward {
            self.timeframe.next()
        } else {
            self.timeframe.prev()
        };
        self.select_timeframe(next)
    }

    fn begin(&mut self, symbol: String) -> PriceQuery {
        self.generation += 1;
        self.phase = CardPhase::Loading;
        PriceQuery {
            generation: self.generation,
            symbol,
            timeframe: self.timeframe,
        }
    }

    /// Apply a completed fetch. Returns false (and changes nothing) when the
    /// result belongs to a superseded request.
    pub fn resolve(&mut self, generation: u64, result: Result<PriceSeries, ApiError>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.phase = match result {
            Ok(series) => CardPhase::Loaded(series),
            Err(e) => CardPhase::Failed(e.to_string()),
        };
        true
    }

    pub fn loaded(&self) -> Option<&PriceSeries> {
        match &self.phase {
            CardPhase::Loaded(s) => Some(s),
            _ => None,
        }
    }

    pub fn series(&self) -> &[PricePoint] {
        self.loaded().map(|s| s.series.as_slice()).unwrap_or(&[])
    }

    /// `quote.last`, else the last close.
    pub fn last_price(&self) -> Option<f64> {
        self.loaded().and_then(PriceSeries::last_price)
    }

    /// Change of the last price against the first loaded close.
    pub fn change_pct(&self) -> Option<f64> {
        let series = self.loaded()?;
        let base = series.first_close()?;
        let last = series.last_price()?;
        Some(pct_change(base, last))
    }

    pub fn trend(&self) -> Option<Trend> {
        self.change_pct()
            .map(Trend::from_pct)
            .or_else(|| final_trend(self.series()))
    }
}
