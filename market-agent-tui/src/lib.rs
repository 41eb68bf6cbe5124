//! Market Agent TUI — four full-screen pages over the agent's REST API.
//!
//! Pages:
//! 1. Dashboard — health, active rules, agent status, instrument card
//! 2. Instruments — add-instrument form and instrument list
//! 3. Rules — configured rules table
//! 4. Signals — the last tick's signals

pub mod app;
pub mod card;
pub mod input;
pub mod logging;
pub mod pages;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::{AppState, StatusLevel};
pub use pages::Page;
