//! Dashboard — health, rule count, agent status, instrument list + card.

use market_agent_core::{Ack, ApiError, Health, Instrument, Rule, Status};

use super::Remote;
use crate::card::{InstrumentCard, PriceQuery};
use crate::worker::ApiRequest;

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub health: Remote<Health>,
    pub rules: Remote<Vec<Rule>>,
    pub status: Remote<Status>,
    pub instruments: Remote<Vec<Instrument>>,
    pub selected: usize,
    pub card: InstrumentCard,
    /// Outcome of the last `run-tick`, if one was requested on this mount.
    pub tick: Option<Remote<Ack>>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            health: Remote::Loading,
            rules: Remote::Loading,
            status: Remote::Loading,
            instruments: Remote::Loading,
            selected: 0,
            card: InstrumentCard::new(),
            tick: None,
        }
    }

    /// Issued concurrently on mount.
    pub fn mount_requests() -> Vec<ApiRequest> {
        vec![
            ApiRequest::Health,
            ApiRequest::Rules,
            ApiRequest::Status,
            ApiRequest::Instruments,
        ]
    }

    /// Store the instrument list and point the card at the first entry.
    pub fn apply_instruments(
        &mut self,
        result: Result<Vec<Instrument>, ApiError>,
    ) -> Option<PriceQuery> {
        self.instruments = Remote::from_result(result);
        self.selected = 0;
        self.retarget_card()
    }

    pub fn selected_instrument(&self) -> Option<&Instrument> {
        self.instruments.ready()?.get(self.selected)
    }

    pub fn instrument_count(&self) -> usize {
        self.instruments.ready().map_or(0, Vec::len)
    }

    pub fn select_next(&mut self) -> Option<PriceQuery> {
        let n = self.instrument_count();
        if n == 0 || self.selected + 1 >= n {
            return None;
        }
        self.selected += 1;
        self.retarget_card()
    }

    pub fn select_prev(&mut self) -> Option<PriceQuery> {
        if self.selected == 0 {
            return None;
        }
        self.selected -= 1;
        self.retarget_card()
    }

    fn retarget_card(&mut self) -> Option<PriceQuery> {
        let (symbol, name) = {
            let inst = self.selected_instrument()?;
            (inst.symbol.clone(), inst.name.clone())
        };
        self.card.select_symbol(&symbol, name)
    }

    /// Enabled rule count once rules have loaded.
    pub fn active_rules(&self) -> Option<usize> {
        self.rules
            .ready()
            .map(|rules| rules.iter().filter(|r| r.enabled).count())
    }
}
