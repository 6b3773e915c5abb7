use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::primitives::{datetime_to_unix_millis, decimal_to_f64};
use crate::error::{ChartError, ChartResult};

/// One OHLCV sample for a fixed time period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Period open time in unix milliseconds.
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// Builds a validated bar.
    ///
    /// Invariants:
    /// - all prices are finite
    /// - `low <= high`
    /// - `open` and `close` are within `[low, high]`
    /// - `volume` is finite and `>= 0`
    pub fn new(
        time: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> ChartResult<Self> {
        let bar = Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        };
        bar.validate()?;
        Ok(bar)
    }

    /// Converts strongly-typed temporal/decimal input into a validated bar.
    pub fn from_decimal_time(
        time: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
    ) -> ChartResult<Self> {
        Self::new(
            datetime_to_unix_millis(time),
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
            decimal_to_f64(volume, "volume")?,
        )
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.open.is_finite()
            || !self.high.is_finite()
            || !self.low.is_finite()
            || !self.close.is_finite()
        {
            return Err(ChartError::InvalidData(
                "bar prices must be finite".to_owned(),
            ));
        }
        if self.low > self.high {
            return Err(ChartError::InvalidData("bar low must be <= high".to_owned()));
        }
        if self.open < self.low
            || self.open > self.high
            || self.close < self.low
            || self.close > self.high
        {
            return Err(ChartError::InvalidData(
                "bar open/close must be within low/high range".to_owned(),
            ));
        }
        if !self.volume.is_finite() || self.volume < 0.0 {
            return Err(ChartError::InvalidData(
                "bar volume must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Returns `true` when close price is greater than or equal to open price.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

/// Sorts bars by time, drops invalid samples and keeps the last sample for
/// duplicated timestamps.
#[must_use]
pub fn canonicalize_bars(mut bars: Vec<Bar>) -> Vec<Bar> {
    let original_len = bars.len();
    bars.retain(|bar| bar.validate().is_ok());
    bars.sort_by_key(|bar| bar.time);

    let mut deduped: Vec<Bar> = Vec::with_capacity(bars.len());
    let mut duplicate_count = 0_usize;
    for bar in bars {
        if let Some(last) = deduped.last_mut() {
            if bar.time == last.time {
                *last = bar;
                duplicate_count += 1;
                continue;
            }
        }
        deduped.push(bar);
    }

    let filtered_count = original_len.saturating_sub(deduped.len() + duplicate_count);
    if filtered_count > 0 || duplicate_count > 0 {
        warn!(
            filtered_count,
            duplicate_count,
            canonical_count = deduped.len(),
            "canonicalized bar series"
        );
    }
    deduped
}

/// Highest `high` across `bars`.
#[must_use]
pub fn max_high(bars: &[Bar]) -> Option<f64> {
    bars.iter().map(|bar| OrderedFloat(bar.high)).max().map(|v| v.0)
}

/// Lowest `low` across `bars`.
#[must_use]
pub fn min_low(bars: &[Bar]) -> Option<f64> {
    bars.iter().map(|bar| OrderedFloat(bar.low)).min().map(|v| v.0)
}

/// Largest finite volume across `bars`.
#[must_use]
pub fn max_volume(bars: &[Bar]) -> Option<f64> {
    bars.iter()
        .filter(|bar| bar.volume.is_finite())
        .map(|bar| OrderedFloat(bar.volume))
        .max()
        .map(|v| v.0)
}
