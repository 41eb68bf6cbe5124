//! Background worker thread — every backend call runs here.
//!
//! The UI sends [`WorkerCommand`]s over an `mpsc` channel and drains
//! [`WorkerResponse`]s on each tick. Requests are executed on a private
//! rayon::ThreadPool (not the global pool) so a page's mount fetches run
//! concurrently. Each response echoes the [`Ticket`] of its request; the UI
//! uses it to drop results that no longer have a target.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result};

use market_agent_core::{
    Ack, ApiError, Health, Instrument, MarketApi, NewInstrument, PriceSeries, Rule, Signal,
    Status, TimeFrame,
};

/// Identifies the page instance (`mount`) and request slot (`seq`) a
/// response belongs to. For price fetches `seq` is the card generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub mount: u64,
    pub seq: u64,
}

/// One backend operation.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    Health,
    Instruments,
    Rules,
    Status,
    Signals,
    Prices { symbol: String, timeframe: TimeFrame },
    AddInstrument(NewInstrument),
    RunTick,
}

impl ApiRequest {
    pub fn label(&self) -> &'static str {
        match self {
            ApiRequest::Health => "health",
            ApiRequest::Instruments => "instruments",
            ApiRequest::Rules => "rules",
            ApiRequest::Status => "status",
            ApiRequest::Signals => "signals",
            ApiRequest::Prices { .. } => "prices",
            ApiRequest::AddInstrument(_) => "add_instrument",
            ApiRequest::RunTick => "run_tick",
        }
    }
}

/// Result of one backend operation.
#[derive(Debug, Clone)]
pub enum ApiPayload {
    Health(Result<Health, ApiError>),
    Instruments(Result<Vec<Instrument>, ApiError>),
    Rules(Result<Vec<Rule>, ApiError>),
    Status(Result<Status, ApiError>),
    Signals(Result<Vec<Signal>, ApiError>),
    Prices(Result<PriceSeries, ApiError>),
    InstrumentAdded(Result<Ack, ApiError>),
    TickTriggered(Result<Ack, ApiError>),
}

impl ApiPayload {
    pub fn error(&self) -> Option<&ApiError> {
        match self {
            ApiPayload::Health(r) => r.as_ref().err(),
            ApiPayload::Instruments(r) => r.as_ref().err(),
            ApiPayload::Rules(r) => r.as_ref().err(),
            ApiPayload::Status(r) => r.as_ref().err(),
            ApiPayload::Signals(r) => r.as_ref().err(),
            ApiPayload::Prices(r) => r.as_ref().err(),
            ApiPayload::InstrumentAdded(r) => r.as_ref().err(),
            ApiPayload::TickTriggered(r) => r.as_ref().err(),
        }
    }
}

/// Commands sent from the UI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    Fetch { ticket: Ticket, request: ApiRequest },
    Shutdown,
}

/// Responses sent from the worker back to the UI.
#[derive(Debug, Clone)]
pub struct WorkerResponse {
    pub ticket: Ticket,
    pub payload: ApiPayload,
}

/// Run one request against `api`.
pub fn execute(api: &dyn MarketApi, request: ApiRequest) -> ApiPayload {
    match request {
        ApiRequest::Health => ApiPayload::Health(api.health()),
        ApiRequest::Instruments => ApiPayload::Instruments(api.instruments()),
        ApiRequest::Rules => ApiPayload::Rules(api.rules()),
        ApiRequest::Status => ApiPayload::Status(api.status()),
        ApiRequest::Signals => ApiPayload::Signals(api.signals()),
        ApiRequest::Prices { symbol, timeframe } => ApiPayload::Prices(api.prices(
            &symbol,
            Some(timeframe.range),
            Some(timeframe.interval),
        )),
        ApiRequest::AddInstrument(body) => ApiPayload::InstrumentAdded(api.add_instrument(&body)),
        ApiRequest::RunTick => ApiPayload::TickTriggered(api.run_tick()),
    }
}

/// Spawn the background worker thread with a private pool of `threads`.
pub fn spawn_worker(
    api: Arc<dyn MarketApi>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    threads: usize,
) -> Result<JoinHandle<()>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .thread_name(|i| format!("market-agent-fetch-{i}"))
        .build()
        .context("failed to build worker thread pool")?;

    thread::Builder::new()
        .name("market-agent-worker".into())
        .spawn(move || worker_loop(api, pool, rx, tx))
        .context("failed to spawn worker thread")
}

fn worker_loop(
    api: Arc<dyn MarketApi>,
    pool: rayon::ThreadPool,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) {
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(WorkerCommand::Fetch { ticket, request }) => {
                let api = Arc::clone(&api);
                let tx = tx.clone();
                pool.spawn(move || {
                    let label = request.label();
                    tracing::debug!(
                        request = label,
                        mount = ticket.mount,
                        seq = ticket.seq,
                        "fetch start"
                    );
                    let payload = execute(api.as_ref(), request);
                    if let Some(err) = payload.error() {
                        tracing::warn!(request = label, error = %err, "fetch failed");
                    }
                    // The UI may already be gone during shutdown.
                    let _ = tx.send(WorkerResponse { ticket, payload });
                });
            }
        }
    }
    tracing::debug!("worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    use market_agent_core::{Interval, PricePoint, Range};

    struct FakeApi;

    impl MarketApi for FakeApi {
        fn health(&self) -> Result<Health, ApiError> {
            Ok(Health {
                status: "ok".into(),
            })
        }
        fn instruments(&self) -> Result<Vec<Instrument>, ApiError> {
            Ok(Vec::new())
        }
        fn add_instrument(&self, _body: &NewInstrument) -> Result<Ack, ApiError> {
            Ok(Ack { ok: true })
        }
        fn rules(&self) -> Result<Vec<Rule>, ApiError> {
            Err(ApiError::Http {
                status: 500,
                status_text: "Internal Server Error".into(),
            })
        }
        fn prices(
            &self,
            symbol: &str,
            range: Option<Range>,
            interval: Option<Interval>,
        ) -> Result<PriceSeries, ApiError> {
            Ok(PriceSeries {
                symbol: Some(format!("{symbol}:{}:{}", range.unwrap(), interval.unwrap())),
                series: vec![PricePoint::close("t0", 1.0)],
                ..PriceSeries::default()
            })
        }
        fn signals(&self) -> Result<Vec<Signal>, ApiError> {
            Ok(Vec::new())
        }
        fn status(&self) -> Result<Status, ApiError> {
            Ok(Status::default())
        }
        fn run_tick(&self) -> Result<Ack, ApiError> {
            Ok(Ack { ok: true })
        }
    }

    #[test]
    fn execute_passes_timeframe_tokens() {
        let payload = execute(
            &FakeApi,
            ApiRequest::Prices {
                symbol: "AAPL".into(),
                timeframe: TimeFrame::PRESETS[2],
            },
        );
        match payload {
            ApiPayload::Prices(Ok(s)) => assert_eq!(s.symbol.as_deref(), Some("AAPL:1mo:1hour")),
            other => panic!("expected prices, got {other:?}"),
        }
    }

    #[test]
    fn payload_exposes_error() {
        let payload = execute(&FakeApi, ApiRequest::Rules);
        assert!(matches!(payload.error(), Some(ApiError::Http { status: 500, .. })));
        assert!(execute(&FakeApi, ApiRequest::Health).error().is_none());
    }

    #[test]
    fn worker_echoes_ticket() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let handle = spawn_worker(Arc::new(FakeApi), cmd_rx, resp_tx, 2).unwrap();

        let ticket = Ticket { mount: 7, seq: 3 };
        let request = ApiRequest::Health;
        cmd_tx.send(WorkerCommand::Fetch { ticket, request }).unwrap();
        let resp = resp_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(resp.ticket, ticket);
        assert!(matches!(resp.payload, ApiPayload::Health(Ok(_))));

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().expect("worker should join cleanly");
    }

    #[test]
    fn concurrent_mount_fetches_all_answer() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let handle = spawn_worker(Arc::new(FakeApi), cmd_rx, resp_tx, 4).unwrap();

        let requests = [
            ApiRequest::Health,
            ApiRequest::Rules,
            ApiRequest::Status,
            ApiRequest::Instruments,
        ];
        for (seq, request) in requests.into_iter().enumerate() {
            let ticket = Ticket {
                mount: 1,
                seq: seq as u64,
            };
            cmd_tx.send(WorkerCommand::Fetch { ticket, request }).unwrap();
        }
        let mut seqs: Vec<u64> = (0..4)
            .map(|_| resp_rx.recv_timeout(Duration::from_secs(5)).unwrap().ticket.seq)
            .collect();
        seqs.sort_unstable();
        assert_eq!(seqs, vec![0, 1, 2, 3]);

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn worker_uses_private_pool() {
        let global_threads = rayon::current_num_threads();
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, _resp_rx) = mpsc::channel();

        let handle = spawn_worker(Arc::new(FakeApi), cmd_rx, resp_tx, 3).unwrap();
        assert_eq!(rayon::current_num_threads(), global_threads);

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }
}
