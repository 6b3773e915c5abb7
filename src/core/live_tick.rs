use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::Bar;

/// Outcome of merging one live price into the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiveTickMerge {
    /// Price was invalid or the series empty; nothing changed.
    Ignored,
    /// The newest bar absorbed the price.
    UpdatedLast,
    /// A new bar was opened at the current period boundary.
    Appended,
}

/// Folds a live price into `bars` using wall-clock time only.
///
/// While `now_ms` is inside the newest bar's period its close/high/low move
/// with the price. Past the period a new bar is opened on the period grid
/// anchored at the newest bar, with `open` equal to the previous close.
pub fn merge_live_price(
    bars: &mut Vec<Bar>,
    price: f64,
    now_ms: i64,
    period_ms: i64,
) -> LiveTickMerge {
    if !price.is_finite() || price <= 0.0 || period_ms <= 0 {
        return LiveTickMerge::Ignored;
    }
    let Some(last) = bars.last_mut() else {
        return LiveTickMerge::Ignored;
    };

    if now_ms < last.time.saturating_add(period_ms) {
        last.close = price;
        last.high = last.high.max(price);
        last.low = last.low.min(price);
        trace!(price, time = last.time, "live price merged into newest bar");
        return LiveTickMerge::UpdatedLast;
    }

    let periods_elapsed = (now_ms - last.time) / period_ms;
    let time = last.time + periods_elapsed * period_ms;
    let open = last.close;
    bars.push(Bar {
        time,
        open,
        high: open.max(price),
        low: open.min(price),
        close: price,
        volume: 0.0,
    });
    trace!(price, time, "live price opened a new bar");
    LiveTickMerge::Appended
}

#[cfg(test)]
mod tests {
    use super::{LiveTickMerge, merge_live_price};
    use crate::core::Bar;

    fn series() -> Vec<Bar> {
        vec![Bar::new(0, 10.0, 12.0, 9.0, 11.0, 5.0).expect("bar")]
    }

    #[test]
    fn price_inside_period_updates_last_bar() {
        let mut bars = series();
        assert_eq!(
            merge_live_price(&mut bars, 13.0, 30_000, 60_000),
            LiveTickMerge::UpdatedLast
        );
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].close, 13.0);
        assert_eq!(bars[0].high, 13.0);
        assert_eq!(bars[0].low, 9.0);
    }

    #[test]
    fn price_after_period_opens_aligned_bar() {
        let mut bars = series();
        assert_eq!(
            merge_live_price(&mut bars, 8.0, 150_000, 60_000),
            LiveTickMerge::Appended
        );
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[1].time, 120_000);
        assert_eq!(bars[1].open, 11.0);
        assert_eq!(bars[1].low, 8.0);
        assert_eq!(bars[1].high, 11.0);
        assert!(bars[1].validate().is_ok());
    }

    #[test]
    fn invalid_price_or_empty_series_is_ignored() {
        let mut bars = series();
        assert_eq!(
            merge_live_price(&mut bars, f64::NAN, 0, 60_000),
            LiveTickMerge::Ignored
        );
        let mut empty = Vec::new();
        assert_eq!(
            merge_live_price(&mut empty, 10.0, 0, 60_000),
            LiveTickMerge::Ignored
        );
    }
}
