//! View-models returned by the backend.
//!
//! These mirror the JSON the backend sends and are never mutated after decode.
//! Optional fields default so that the two historical response variants (with
//! and without quote/OHLV data) both decode.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A tracked instrument as listed by `GET /instruments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub symbol: String,
    pub instrument_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub currency: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Body of `POST /instruments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInstrument {
    pub symbol: String,
    pub instrument_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub currency: String,
    pub source: String,
}

/// `{ "ok": bool }` acknowledgement used by the write endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub ok: bool,
}

/// `GET /instruments` answers either a bare array or `{ "items": [...] }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum InstrumentList {
    Bare(Vec<Instrument>),
    Wrapped { items: Vec<Instrument> },
}

impl InstrumentList {
    pub(crate) fn into_vec(self) -> Vec<Instrument> {
        match self {
            InstrumentList::Bare(v) => v,
            InstrumentList::Wrapped { items } => items,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notify {
    pub channel: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_score: Option<f64>,
}

/// A configured alerting rule. Read-only on this side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub kind: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub params: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify: Option<Notify>,
}

impl Rule {
    /// Params as compact JSON, e.g. `{"window":20}`.
    pub fn params_json(&self) -> String {
        Value::Object(self.params.clone()).to_string()
    }
}

/// Latest quote attached to a price series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub last: Option<f64>,
    #[serde(default, rename = "prevClose")]
    pub prev_close: Option<f64>,
    #[serde(default)]
    pub ts: Option<String>,
}

/// One bar. Only the close is guaranteed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub t: String,
    #[serde(default)]
    pub o: Option<f64>,
    #[serde(default)]
    pub h: Option<f64>,
    #[serde(default)]
    pub l: Option<f64>,
    pub c: f64,
    #[serde(default)]
    pub v: Option<f64>,
}

impl PricePoint {
    pub fn close(t: impl Into<String>, c: f64) -> Self {
        Self {
            t: t.into(),
            o: None,
            h: None,
            l: None,
            c,
            v: None,
        }
    }
}

/// `GET /prices` response, chronological ascending as sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub instrument_id: Option<String>,
    #[serde(default)]
    pub quote: Option<Quote>,
    #[serde(default)]
    pub series: Vec<PricePoint>,
    #[serde(default)]
    pub provider: Option<String>,
}

impl PriceSeries {
    /// `quote.last`, falling back to the close of the final bar.
    pub fn last_price(&self) -> Option<f64> {
        self.quote
            .as_ref()
            .and_then(|q| q.last)
            .or_else(|| self.series.last().map(|p| p.c))
    }

    pub fn first_close(&self) -> Option<f64> {
        self.series.first().map(|p| p.c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Buy,
    Sell,
    Watch,
}

impl Direction {
    pub fn label(self) -> &'static str {
        match self {
            Direction::Buy => "BUY",
            Direction::Sell => "SELL",
            Direction::Watch => "WATCH",
        }
    }
}

/// One entry of the last tick's signal batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub instrument_id: String,
    pub rule_id: String,
    pub ts: String,
    pub direction: Direction,
    pub score: f64,
    pub reason: String,
    #[serde(default)]
    pub details: Value,
}

/// `GET /status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    #[serde(default)]
    pub last_tick: Option<String>,
    #[serde(default)]
    pub signals_count: u64,
}

/// `GET /healthz`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn instrument_list_accepts_both_shapes() {
        let row = json!({
            "symbol": "GGAL.BA",
            "instrument_id": "ISIN-AR-GGAL",
            "type": "equity",
            "currency": "ARS",
            "source": "yfinance"
        });
        let bare: InstrumentList = serde_json::from_value(json!([row.clone()])).unwrap();
        let wrapped: InstrumentList = serde_json::from_value(json!({ "items": [row] })).unwrap();
        assert_eq!(bare.into_vec().len(), 1);
        let items = wrapped.into_vec();
        assert_eq!(items[0].kind, "equity");
        assert_eq!(items[0].name, None);
    }

    #[test]
    fn rule_params_serialize_compact() {
        let rule: Rule = serde_json::from_value(json!({
            "id": "r1",
            "kind": "ma-cross",
            "enabled": true,
            "params": { "window": 20 }
        }))
        .unwrap();
        assert_eq!(rule.params_json(), r#"{"window":20}"#);
        assert!(rule.notify.is_none());
    }

    #[test]
    fn rule_without_params_is_empty_map() {
        let rule: Rule = serde_json::from_value(json!({
            "id": "momentum_breakout",
            "kind": "breakout",
            "enabled": false,
            "notify": { "channel": "telegram", "min_score": 0.7 }
        }))
        .unwrap();
        assert_eq!(rule.params_json(), "{}");
        assert_eq!(rule.notify.unwrap().min_score, Some(0.7));
    }

    #[test]
    fn price_series_without_quote_or_ohlv() {
        let s: PriceSeries = serde_json::from_value(json!({
            "instrument_id": "ISIN-AR-GGAL",
            "series": [{ "t": "2024-01-02T00:00:00", "c": 100.0 }],
            "provider": "tiingo"
        }))
        .unwrap();
        assert_eq!(s.series[0].o, None);
        assert_eq!(s.last_price(), Some(100.0));
    }

    #[test]
    fn quote_last_wins_over_series() {
        let s: PriceSeries = serde_json::from_value(json!({
            "symbol": "AAPL",
            "quote": { "last": 190.5, "prevClose": 188.0, "ts": null },
            "series": [{ "t": "t0", "o": 1, "h": 1, "l": 1, "c": 180.0, "v": 10 }]
        }))
        .unwrap();
        assert_eq!(s.last_price(), Some(190.5));
        assert_eq!(s.quote.unwrap().prev_close, Some(188.0));
    }

    #[test]
    fn null_quote_last_falls_back_to_close() {
        let s = PriceSeries {
            quote: Some(Quote::default()),
            series: vec![PricePoint::close("t0", 5.0), PricePoint::close("t1", 6.0)],
            ..PriceSeries::default()
        };
        assert_eq!(s.last_price(), Some(6.0));
        assert_eq!(s.first_close(), Some(5.0));
    }

    #[test]
    fn signal_direction_is_lowercase_on_wire() {
        let sig: Signal = serde_json::from_value(json!({
            "instrument_id": "ISIN-AR-GGAL",
            "rule_id": "momentum_breakout",
            "ts": "2024-05-01T14:00:00",
            "direction": "watch",
            "score": 0.42,
            "reason": "close above 20d high",
            "details": { "high": 101.2 }
        }))
        .unwrap();
        assert_eq!(sig.direction, Direction::Watch);
        assert_eq!(sig.direction.label(), "WATCH");
    }
}
