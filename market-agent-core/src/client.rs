//! Backend API client.
//!
//! The [`MarketApi`] trait abstracts the backend so the UI worker can run
//! against the real HTTP client or an in-memory fake in tests. Every call is
//! exactly one request: no retry, no caching, no in-flight deduplication.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::models::{
    Ack, Health, Instrument, InstrumentList, NewInstrument, PriceSeries, Rule, Signal, Status,
};
use crate::timeframe::{Interval, Range};

/// Operations the dashboard needs from the backend.
pub trait MarketApi: Send + Sync {
    /// `GET /healthz`
    fn health(&self) -> Result<Health, ApiError>;

    /// `GET /instruments`
    fn instruments(&self) -> Result<Vec<Instrument>, ApiError>;

    /// `POST /instruments`
    fn add_instrument(&self, body: &NewInstrument) -> Result<Ack, ApiError>;

    /// `GET /rules`
    fn rules(&self) -> Result<Vec<Rule>, ApiError>;

    /// `GET /prices?symbol=..&range=..&interval=..`
    fn prices(
        &self,
        symbol: &str,
        range: Option<Range>,
        interval: Option<Interval>,
    ) -> Result<PriceSeries, ApiError>;

    /// `GET /signals`
    fn signals(&self) -> Result<Vec<Signal>, ApiError>;

    /// `GET /status`
    fn status(&self) -> Result<Status, ApiError>;

    /// `POST /run-tick`
    fn run_tick(&self) -> Result<Ack, ApiError>;
}

/// Blocking HTTP implementation of [`MarketApi`].
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("market-agent/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {e}")))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Canonical prices URL. Absent selectors are left out of the query.
    pub fn prices_url(
        &self,
        symbol: &str,
        range: Option<Range>,
        interval: Option<Interval>,
    ) -> Result<Url, ApiError> {
        let mut params = vec![("symbol", symbol)];
        if let Some(r) = range {
            params.push(("range", r.as_str()));
        }
        if let Some(i) = interval {
            params.push(("interval", i.as_str()));
        }
        Url::parse_with_params(&self.url("/prices"), &params)
            .map_err(|e| ApiError::Network(format!("invalid url: {e}")))
    }

    /// Send one request and return the decoded JSON body.
    fn execute(
        &self,
        request: RequestBuilder,
        method: Method,
        path: &str,
    ) -> Result<Value, ApiError> {
        let resp = request.send().map_err(|e| {
            tracing::warn!(%method, path, error = %e, "request failed");
            ApiError::from(e)
        })?;

        let status = resp.status();
        tracing::debug!(%method, path, status = status.as_u16(), "api response");
        if !status.is_success() {
            tracing::warn!(%method, path, status = status.as_u16(), "non-success status");
            return Err(ApiError::http(status));
        }

        let body = resp.text()?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(%method, path, error = %e, "response is not JSON");
            ApiError::from(e)
        })
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let value = self.execute(self.client.get(self.url(path)), Method::GET, path)?;
        decode(path, value)
    }

    fn post<T: DeserializeOwned>(&self, path: &str, body: Option<&Value>) -> Result<T, ApiError> {
        let mut request = self.client.post(self.url(path));
        if let Some(b) = body {
            request = request.json(b);
        }
        let value = self.execute(request, Method::POST, path)?;
        decode(path, value)
    }
}

fn decode<T: DeserializeOwned>(path: &str, value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| {
        tracing::warn!(path, error = %e, "response shape mismatch");
        ApiError::from(e)
    })
}

/// Accept `[...]` or `{ "items": [...] }`; anything else is logged and empty.
pub(crate) fn decode_instruments(value: Value) -> Result<Vec<Instrument>, ApiError> {
    let recognized = match &value {
        Value::Array(_) => true,
        Value::Object(map) => map.get("items").is_some_and(Value::is_array),
        _ => false,
    };
    if !recognized {
        tracing::warn!(
            response = %value,
            "instruments: unexpected response shape, treating as empty"
        );
        return Ok(Vec::new());
    }
    let list: InstrumentList = serde_json::from_value(value)?;
    Ok(list.into_vec())
}

impl MarketApi for HttpClient {
    fn health(&self) -> Result<Health, ApiError> {
        self.get("/healthz")
    }

    fn instruments(&self) -> Result<Vec<Instrument>, ApiError> {
        let path = "/instruments";
        let value = self.execute(self.client.get(self.url(path)), Method::GET, path)?;
        decode_instruments(value)
    }

    fn add_instrument(&self, body: &NewInstrument) -> Result<Ack, ApiError> {
        let json = serde_json::to_value(body)?;
        self.post("/instruments", Some(&json))
    }

    fn rules(&self) -> Result<Vec<Rule>, ApiError> {
        self.get("/rules")
    }

    fn prices(
        &self,
        symbol: &str,
        range: Option<Range>,
        interval: Option<Interval>,
    ) -> Result<PriceSeries, ApiError> {
        let url = self.prices_url(symbol, range, interval)?;
        let value = self.execute(self.client.get(url), Method::GET, "/prices")?;
        decode("/prices", value)
    }

    fn signals(&self) -> Result<Vec<Signal>, ApiError> {
        self.get("/signals")
    }

    fn status(&self) -> Result<Status, ApiError> {
        self.get("/status")
    }

    fn run_tick(&self) -> Result<Ack, ApiError> {
        self.post("/run-tick", None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(base: &str) -> HttpClient {
        HttpClient::new(base, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let c = client("http://localhost:8000/");
        assert_eq!(c.base_url(), "http://localhost:8000");
        assert_eq!(c.url("/rules"), "http://localhost:8000/rules");
    }

    #[test]
    fn prices_url_with_selectors() {
        let c = client("http://localhost:8000");
        let url = c
            .prices_url("GGAL.BA", Some(Range::FiveDays), Some(Interval::FifteenMin))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/prices?symbol=GGAL.BA&range=5d&interval=15min"
        );
    }

    #[test]
    fn prices_url_omits_missing_selectors() {
        let c = client("http://localhost:8000");
        let url = c.prices_url("AAPL", None, None).unwrap();
        assert_eq!(url.query(), Some("symbol=AAPL"));
    }

    #[test]
    fn prices_url_escapes_symbol() {
        let c = client("http://localhost:8000");
        let url = c.prices_url("BRK B", Some(Range::OneYear), None).unwrap();
        assert_eq!(url.query(), Some("symbol=BRK+B&range=1y"));
    }

    #[test]
    fn instruments_unexpected_shape_is_empty() {
        assert!(decode_instruments(json!({ "data": [] })).unwrap().is_empty());
        assert!(decode_instruments(json!("nope")).unwrap().is_empty());
        assert!(decode_instruments(json!({ "items": 3 })).unwrap().is_empty());
    }

    #[test]
    fn instruments_malformed_rows_are_parse_errors() {
        let err = decode_instruments(json!([{ "symbol": "X" }])).unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[test]
    fn instruments_wrapped() {
        let v = json!({ "items": [{
            "symbol": "AAPL", "instrument_id": "US-AAPL", "type": "equity",
            "currency": "USD", "source": "tiingo", "name": "Apple"
        }]});
        let items = decode_instruments(v).unwrap();
        assert_eq!(items[0].name.as_deref(), Some("Apple"));
    }
}
