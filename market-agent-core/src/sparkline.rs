//! Percent-normalized sparkline math.
//!
//! Every point is expressed as the percent change of its close against the
//! first close of the series. A zero or NaN base flattens the whole line to 0
//! instead of propagating a division by zero.

use crate::models::PricePoint;

/// Direction of the line, decided by the final point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    /// Non-negative is up.
    pub fn from_pct(pct: f64) -> Self {
        if pct >= 0.0 {
            Trend::Up
        } else {
            Trend::Down
        }
    }
}

/// Percent change of `value` against `base`, 0 when `base` is zero or NaN.
pub fn pct_change(base: f64, value: f64) -> f64 {
    if base == 0.0 || base.is_nan() {
        0.0
    } else {
        (value - base) / base * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PctPoint<'a> {
    pub t: &'a str,
    pub close: f64,
    pub pct: f64,
}

/// Single-pass iterator over the normalized series.
#[derive(Debug)]
pub struct PercentSeries<'a> {
    base: f64,
    points: std::slice::Iter<'a, PricePoint>,
}

impl<'a> Iterator for PercentSeries<'a> {
    type Item = PctPoint<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let p = self.points.next()?;
        Some(PctPoint {
            t: &p.t,
            close: p.c,
            pct: pct_change(self.base, p.c),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.points.size_hint()
    }
}

impl ExactSizeIterator for PercentSeries<'_> {}

/// Normalize `series` against its first close.
pub fn percent_series(series: &[PricePoint]) -> PercentSeries<'_> {
    PercentSeries {
        base: series.first().map(|p| p.c).unwrap_or(0.0),
        points: series.iter(),
    }
}

/// Trend of the final point, `None` for an empty series.
pub fn final_trend(series: &[PricePoint]) -> Option<Trend> {
    let first = series.first()?;
    let last = series.last()?;
    Some(Trend::from_pct(pct_change(first.c, last.c)))
}

/// Chart-ready `(x, pct)` pairs plus the y bounds to draw them in.
#[derive(Debug, Clone, PartialEq)]
pub struct SparklineData {
    pub points: Vec<(f64, f64)>,
    pub y_bounds: [f64; 2],
    pub x_max: f64,
    pub trend: Trend,
}

impl SparklineData {
    /// `None` when there is nothing to draw.
    pub fn from_series(series: &[PricePoint]) -> Option<Self> {
        let trend = final_trend(series)?;
        let points: Vec<(f64, f64)> = percent_series(series)
            .enumerate()
            .map(|(i, p)| (i as f64, p.pct))
            .collect();

        let (min, max) = points
            .iter()
            .map(|&(_, y)| y)
            .filter(|y| y.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
                (lo.min(y), hi.max(y))
            });
        let (min, max) = if min.is_finite() { (min, max) } else { (0.0, 0.0) };
        // Flat lines still need a non-empty band to render in.
        let pad = ((max - min).abs() * 0.05).max(0.5);

        Some(Self {
            x_max: (points.len().saturating_sub(1) as f64).max(1.0),
            points,
            y_bounds: [min - pad, max + pad],
            trend,
        })
    }

    pub fn last_pct(&self) -> f64 {
        self.points.last().map(|&(_, y)| y).unwrap_or(0.0)
    }
}
