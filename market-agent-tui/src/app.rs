//! Application state — single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels;
//! every request carries a [`Ticket`] and responses for a page instance that
//! is no longer mounted are dropped on arrival.

use std::sync::mpsc::{Receiver, Sender};

use chrono::{DateTime, Local};

use crate::card::PriceQuery;
use crate::pages::{InstrumentsState, Page, PageState, Remote};
use crate::worker::{ApiPayload, ApiRequest, Ticket, WorkerCommand, WorkerResponse};

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub page: PageState,
    /// Id of the mounted page instance. Bumped on every navigation.
    pub mount: u64,
    pub running: bool,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub api_base: String,
    pub status_message: Option<(String, StatusLevel)>,
    pub last_update: Option<DateTime<Local>>,
}

impl AppState {
    /// Build the app and mount the Dashboard.
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        api_base: impl Into<String>,
    ) -> Self {
        let (page, _) = PageState::mount(Page::Dashboard);
        let mut app = Self {
            page,
            mount: 0,
            running: true,
            worker_tx,
            worker_rx,
            api_base: api_base.into(),
            status_message: None,
            last_update: None,
        };
        app.navigate(Page::Dashboard);
        app
    }

    pub fn active_page(&self) -> Page {
        self.page.page()
    }

    /// Mount `page` with fresh state and issue its mount fetches.
    pub fn navigate(&mut self, page: Page) {
        let (state, requests) = PageState::mount(page);
        self.mount += 1;
        self.page = state;
        tracing::info!(page = page.label(), mount = self.mount, "mount");
        for (seq, request) in requests.into_iter().enumerate() {
            self.dispatch(seq as u64, request);
        }
    }

    /// Remount the current page.
    pub fn reload(&mut self) {
        self.navigate(self.active_page());
        self.set_status(format!("Reloaded {}", self.active_page().label()));
    }

    fn dispatch(&mut self, seq: u64, request: ApiRequest) {
        let ticket = Ticket {
            mount: self.mount,
            seq,
        };
        if self
            .worker_tx
            .send(WorkerCommand::Fetch { ticket, request })
            .is_err()
        {
            tracing::error!("worker channel closed");
            self.set_error("Background worker is not running");
        }
    }

    fn dispatch_price(&mut self, query: PriceQuery) {
        self.dispatch(
            query.generation,
            ApiRequest::Prices {
                symbol: query.symbol,
                timeframe: query.timeframe,
            },
        );
    }

    /// Drain all pending worker responses without blocking.
    pub fn drain_responses(&mut self) {
        while let Ok(resp) = self.worker_rx.try_recv() {
            self.handle_response(resp);
        }
    }

    pub fn handle_response(&mut self, resp: WorkerResponse) {
        let WorkerResponse { ticket, payload } = resp;
        if ticket.mount != self.mount {
            tracing::debug!(
                mount = ticket.mount,
                current = self.mount,
                "dropping response for unmounted page"
            );
            return;
        }
        let error = payload.error().map(ToString::to_string);

        let mut follow_up = None;
        let mut superseded = false;
        match (&mut self.page, payload) {
            (PageState::Dashboard(d), ApiPayload::Health(r)) => d.health = Remote::from_result(r),
            (PageState::Dashboard(d), ApiPayload::Rules(r)) => d.rules = Remote::from_result(r),
            (PageState::Dashboard(d), ApiPayload::Status(r)) => d.status = Remote::from_result(r),
            (PageState::Dashboard(d), ApiPayload::Instruments(r)) => {
                follow_up = d.apply_instruments(r);
            }
            (PageState::Dashboard(d), ApiPayload::Prices(r)) => {
                if !d.card.resolve(ticket.seq, r) {
                    tracing::debug!(generation = ticket.seq, "dropping superseded price series");
                    superseded = true;
                }
            }
            (PageState::Dashboard(d), ApiPayload::TickTriggered(r)) => {
                let accepted = matches!(r, Ok(ref ack) if ack.ok);
                d.tick = Some(Remote::from_result(r));
                if accepted {
                    self.status_message = Some(("Tick requested".into(), StatusLevel::Info));
                }
            }
            (PageState::Instruments(s), ApiPayload::Instruments(r)) => {
                s.list = Remote::from_result(r);
            }
            (PageState::Instruments(s), ApiPayload::InstrumentAdded(r)) => s.apply_added(r),
            (PageState::Rules(s), ApiPayload::Rules(r)) => s.rules = Remote::from_result(r),
            (PageState::Signals(s), ApiPayload::Signals(r)) => s.signals = Remote::from_result(r),
            (page, payload) => {
                let page = page.page().label();
                tracing::debug!(page, ?payload, "unexpected payload for page");
            }
        }
        if superseded {
            return;
        }
        self.last_update = Some(Local::now());
        if let Some(err) = error {
            self.set_error(err);
        }
        if let Some(query) = follow_up {
            self.dispatch_price(query);
        }
    }

    pub fn select_next_instrument(&mut self) {
        let query = match &mut self.page {
            PageState::Dashboard(d) => d.select_next(),
            _ => None,
        };
        if let Some(q) = query {
            self.dispatch_price(q);
        }
    }

    pub fn select_prev_instrument(&mut self) {
        let query = match &mut self.page {
            PageState::Dashboard(d) => d.select_prev(),
            _ => None,
        };
        if let Some(q) = query {
            self.dispatch_price(q);
        }
    }

    /// Step the card's timeframe preset forward or back.
    pub fn cycle_timeframe(&mut self, forward: bool) {
        let query = match &mut self.page {
            PageState::Dashboard(d) => d.card.cycle_timeframe(forward),
            _ => None,
        };
        if let Some(q) = query {
            self.dispatch_price(q);
        }
    }

    /// Ask the backend to run one tick. Ignored while a request is pending.
    pub fn trigger_tick(&mut self) {
        match &mut self.page {
            PageState::Dashboard(d) => {
                if matches!(d.tick, Some(Remote::Loading)) {
                    return;
                }
                d.tick = Some(Remote::Loading);
            }
            _ => return,
        }
        self.dispatch(0, ApiRequest::RunTick);
    }

    pub fn instruments_mut(&mut self) -> Option<&mut InstrumentsState> {
        match &mut self.page {
            PageState::Instruments(s) => Some(s),
            _ => None,
        }
    }

    /// Validate the add-instrument form and POST it. A blank required field
    /// leaves an inline message and sends nothing.
    pub fn submit_form(&mut self) {
        let body = match self.instruments_mut() {
            Some(s) if !s.submitting => s.submit(),
            _ => None,
        };
        if let Some(body) = body {
            tracing::info!(symbol = %body.symbol, "adding instrument");
            self.dispatch(0, ApiRequest::AddInstrument(body));
        }
    }

    pub fn scroll(&mut self, down: bool) {
        match &mut self.page {
            PageState::Rules(s) if down => s.scroll_down(),
            PageState::Rules(s) => s.scroll_up(),
            PageState::Signals(s) if down => s.scroll_down(),
            PageState::Signals(s) => s.scroll_up(),
            _ => {}
        }
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }
}
