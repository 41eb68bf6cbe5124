//! Market Agent TUI — terminal dashboard for the market agent backend.

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use market_agent_core::config::DEFAULT_API_BASE;
use market_agent_core::{Config, HttpClient, MarketApi};
use market_agent_tui::worker::{self, WorkerCommand};
use market_agent_tui::{input, logging, ui, AppState};

const FETCH_THREADS: usize = 4;

#[derive(Parser, Debug)]
#[command(name = "market-agent", version, about = "Terminal dashboard for the market agent")]
struct Args {
    /// Config file (default: <config dir>/market-agent/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Backend base URL, e.g. http://localhost:8000
    #[arg(long)]
    api_base: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Log file path
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn resolve_config(args: &Args) -> Result<Config> {
    let mut config =
        Config::load(args.config.as_deref()).context("failed to load configuration")?;
    if let Some(base) = &args.api_base {
        config.api.base_url = Some(base.clone());
    }
    if let Some(secs) = args.timeout_secs {
        config.api.timeout_secs = secs;
    }
    if let Some(path) = &args.log_file {
        config.log.file = Some(path.clone());
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    let log_file = config.log_file();
    logging::init(&log_file, &config.log.filter)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting market-agent");
    if let Some(env_file) = &config.env_file {
        tracing::debug!(path = %env_file.display(), "loaded .env");
    }

    let base_url = config.base_url();
    let default_base = config.base_url_is_default();
    if default_base {
        tracing::warn!(base = DEFAULT_API_BASE, "no API base URL configured, using default");
    }

    let client = HttpClient::new(&base_url, Duration::from_secs(config.api.timeout_secs))
        .context("failed to build HTTP client")?;
    let api: Arc<dyn MarketApi> = Arc::new(client);

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle = worker::spawn_worker(api, cmd_rx, resp_tx, FETCH_THREADS)?;

    let mut app = AppState::new(cmd_tx.clone(), resp_rx, base_url);
    if default_base {
        app.set_warning(format!("Using default API base {DEFAULT_API_BASE}"));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Shutdown worker
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    if worker_handle.join().is_err() {
        tracing::error!("worker thread panicked");
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("exiting");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        app.drain_responses();

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
