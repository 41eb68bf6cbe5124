//! Price history selectors: range tokens, interval tokens and the card presets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How far back a price query reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Range {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "1y")]
    OneYear,
}

impl Range {
    pub const ALL: [Range; 5] = [
        Range::OneDay,
        Range::FiveDays,
        Range::OneMonth,
        Range::ThreeMonths,
        Range::OneYear,
    ];

    /// Query-string token understood by the backend.
    pub fn as_str(self) -> &'static str {
        match self {
            Range::OneDay => "1d",
            Range::FiveDays => "5d",
            Range::OneMonth => "1mo",
            Range::ThreeMonths => "3mo",
            Range::OneYear => "1y",
        }
    }
}

/// Bar width of a price query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "5min")]
    FiveMin,
    #[serde(rename = "15min")]
    FifteenMin,
    #[serde(rename = "1hour")]
    OneHour,
    #[serde(rename = "4hour")]
    FourHour,
    #[serde(rename = "1day")]
    OneDay,
}

impl Interval {
    pub const ALL: [Interval; 5] = [
        Interval::FiveMin,
        Interval::FifteenMin,
        Interval::OneHour,
        Interval::FourHour,
        Interval::OneDay,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Interval::FiveMin => "5min",
            Interval::FifteenMin => "15min",
            Interval::OneHour => "1hour",
            Interval::FourHour => "4hour",
            Interval::OneDay => "1day",
        }
    }
}

/// Token that matches neither a known range nor a known interval.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized token '{0}'")]
pub struct UnknownToken(pub String);

impl FromStr for Range {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Range::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownToken(s.to_string()))
    }
}

impl FromStr for Interval {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interval::ALL
            .into_iter()
            .find(|i| i.as_str() == s)
            .ok_or_else(|| UnknownToken(s.to_string()))
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A labelled (range, interval) pair offered by the instrument card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeFrame {
    pub label: &'static str,
    pub range: Range,
    pub interval: Interval,
}

impl TimeFrame {
    pub const PRESETS: [TimeFrame; 5] = [
        TimeFrame {
            label: "1D",
            range: Range::OneDay,
            interval: Interval::FiveMin,
        },
        TimeFrame {
            label: "5D",
            range: Range::FiveDays,
            interval: Interval::FifteenMin,
        },
        TimeFrame {
            label: "1M",
            range: Range::OneMonth,
            interval: Interval::OneHour,
        },
        TimeFrame {
            label: "3M",
            range: Range::ThreeMonths,
            interval: Interval::FourHour,
        },
        TimeFrame {
            label: "1Y",
            range: Range::OneYear,
            interval: Interval::OneDay,
        },
    ];

    /// Position of this preset in [`TimeFrame::PRESETS`].
    pub fn index(self) -> usize {
        TimeFrame::PRESETS
            .iter()
            .position(|p| *p == self)
            .unwrap_or(1)
    }

    pub fn next(self) -> TimeFrame {
        TimeFrame::PRESETS[(self.index() + 1) % TimeFrame::PRESETS.len()]
    }

    pub fn prev(self) -> TimeFrame {
        let n = TimeFrame::PRESETS.len();
        TimeFrame::PRESETS[(self.index() + n - 1) % n]
    }
}

impl Default for TimeFrame {
    /// Five days of 15-minute bars.
    fn default() -> Self {
        TimeFrame::PRESETS[1]
    }
}
