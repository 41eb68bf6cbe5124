//! Property tests for percent normalization.
//!
//! 1. The first point of any non-empty series is 0%
//! 2. Every point equals (c - c0) / c0 * 100
//! 3. A zero base flattens the whole series to 0%
//! 4. The trend follows the sign of the final point

use market_agent_core::sparkline::{final_trend, percent_series, SparklineData};
use market_agent_core::{PricePoint, Trend};
use proptest::prelude::*;

fn arb_close() -> impl Strategy<Value = f64> {
    (0.01..10_000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_series() -> impl Strategy<Value = Vec<PricePoint>> {
    prop::collection::vec(arb_close(), 1..200).prop_map(|closes| {
        closes
            .into_iter()
            .enumerate()
            .map(|(i, c)| PricePoint::close(format!("t{i}"), c))
            .collect()
    })
}

proptest! {
    #[test]
    fn first_point_is_zero(series in arb_series()) {
        let first = percent_series(&series).next().unwrap();
        prop_assert_eq!(first.pct, 0.0);
    }

    #[test]
    fn matches_closed_form(series in arb_series()) {
        let base = series[0].c;
        for (p, raw) in percent_series(&series).zip(series.iter()) {
            let expected = (raw.c - base) / base * 100.0;
            prop_assert!((p.pct - expected).abs() <= 1e-9 * expected.abs().max(1.0));
            prop_assert_eq!(p.close, raw.c);
        }
    }

    #[test]
    fn zero_base_is_flat(mut series in arb_series()) {
        series[0].c = 0.0;
        prop_assert!(percent_series(&series).all(|p| p.pct == 0.0));
        prop_assert_eq!(final_trend(&series), Some(Trend::Up));
    }

    #[test]
    fn trend_follows_final_sign(series in arb_series()) {
        let last = percent_series(&series).last().unwrap().pct;
        let expected = if last >= 0.0 { Trend::Up } else { Trend::Down };
        prop_assert_eq!(final_trend(&series), Some(expected));

        let data = SparklineData::from_series(&series).unwrap();
        prop_assert_eq!(data.points.len(), series.len());
        prop_assert!(data.y_bounds[0] < data.y_bounds[1]);
    }
}
