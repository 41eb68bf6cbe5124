//! Market Agent core — backend client, view-models and chart math.
//!
//! - `client` — `MarketApi` trait and the blocking HTTP implementation
//! - `models` — instruments, rules, price series, signals, status
//! - `sparkline` — percent normalization against the first close
//! - `timeframe` — range/interval tokens and card presets
//! - `config` — defaults, TOML file, `.env` and environment overrides

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod sparkline;
pub mod timeframe;

pub use client::{HttpClient, MarketApi};
pub use config::{Config, ConfigError};
pub use error::ApiError;
pub use models::{
    Ack, Direction, Health, Instrument, NewInstrument, Notify, PricePoint, PriceSeries, Quote,
    Rule, Signal, Status,
};
pub use sparkline::{percent_series, Trend};
pub use timeframe::{Interval, Range, TimeFrame};
