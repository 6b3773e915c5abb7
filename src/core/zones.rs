//! Momentum-bucket overlay over the visible window.
//!
//! The visible bars are cut into a fixed number of equal segments, each
//! segment is classified by its net close-to-close move, and adjacent
//! segments of the same kind are merged into zones.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::bar::{max_high, min_low};
use crate::core::{Bar, CoordinateMapper};
use crate::error::{ChartError, ChartResult};

/// Tuning for segment classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneConfig {
    pub segment_count: usize,
    /// Relative move above which a segment is bullish (below its negation, bearish).
    pub momentum_threshold: f64,
    /// Volatility mapped to full intensity.
    pub volatility_saturation: f64,
    pub min_intensity: f64,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            segment_count: 10,
            momentum_threshold: 0.005,
            volatility_saturation: 0.05,
            min_intensity: 0.15,
        }
    }
}

impl ZoneConfig {
    pub fn validate(self) -> ChartResult<Self> {
        if self.segment_count == 0 {
            return Err(ChartError::InvalidConfig(
                "zone segment count must be > 0".to_owned(),
            ));
        }
        if !self.momentum_threshold.is_finite() || self.momentum_threshold < 0.0 {
            return Err(ChartError::InvalidConfig(
                "zone momentum threshold must be finite and >= 0".to_owned(),
            ));
        }
        if !self.volatility_saturation.is_finite() || self.volatility_saturation <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "zone volatility saturation must be finite and > 0".to_owned(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_intensity) {
            return Err(ChartError::InvalidConfig(
                "zone min intensity must be in [0, 1]".to_owned(),
            ));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneKind {
    Bullish,
    Bearish,
    Neutral,
}

impl ZoneKind {
    #[must_use]
    pub fn classify(momentum: f64, threshold: f64) -> Self {
        if momentum > threshold {
            ZoneKind::Bullish
        } else if momentum < -threshold {
            ZoneKind::Bearish
        } else {
            ZoneKind::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub kind: ZoneKind,
    pub start_pixel_x: f64,
    pub end_pixel_x: f64,
    pub bar_count: usize,
    pub start_price: f64,
    pub end_price: f64,
    /// Visual strength in `[0, 1]` derived from volatility.
    pub intensity: f64,
    /// Number of original segments folded into this zone.
    pub segment_count: usize,
}

impl Zone {
    /// Net change from `start_price` to `end_price` in percent.
    #[must_use]
    pub fn change_percent(&self) -> f64 {
        if self.start_price == 0.0 {
            return 0.0;
        }
        (self.end_price - self.start_price) / self.start_price * 100.0
    }

    #[must_use]
    pub fn center_x(&self) -> f64 {
        (self.start_pixel_x + self.end_pixel_x) / 2.0
    }

    #[must_use]
    pub fn width_px(&self) -> f64 {
        self.end_pixel_x - self.start_pixel_x
    }
}

/// Aggregation result handed to the render pipeline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoneOverlay {
    pub zones: Vec<Zone>,
    pub window_bar_count: usize,
}

impl ZoneOverlay {
    /// Share of the visible window covered by `zone`, in percent.
    #[must_use]
    pub fn coverage_percent(&self, zone: &Zone) -> f64 {
        if self.window_bar_count == 0 {
            return 0.0;
        }
        zone.bar_count as f64 / self.window_bar_count as f64 * 100.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

/// Segments the mapper's visible window and merges same-kind neighbours.
#[must_use]
pub fn aggregate_zones(bars: &[Bar], mapper: &CoordinateMapper, config: &ZoneConfig) -> ZoneOverlay {
    let window = mapper.window();
    let Some(visible) = bars.get(window.range()) else {
        return ZoneOverlay::default();
    };
    if visible.is_empty() {
        return ZoneOverlay::default();
    }

    let segment_len = visible.len().div_ceil(config.segment_count.max(1));
    let half_width = window.candle_pixel_width / 2.0;
    let mut segments: SmallVec<[Zone; 16]> = SmallVec::new();
    for (chunk_index, chunk) in visible.chunks(segment_len).enumerate() {
        let first_index = window.start_index + chunk_index * segment_len;
        let last_index = first_index + chunk.len() - 1;
        segments.push(classify_segment(
            chunk,
            mapper.bar_index_to_pixel_x(first_index) - half_width,
            mapper.bar_index_to_pixel_x(last_index) + half_width,
            config,
        ));
    }

    ZoneOverlay {
        zones: merge_zones(&segments),
        window_bar_count: visible.len(),
    }
}

fn classify_segment(chunk: &[Bar], start_pixel_x: f64, end_pixel_x: f64, config: &ZoneConfig) -> Zone {
    let close_start = chunk.first().map_or(0.0, |bar| bar.close);
    let close_end = chunk.last().map_or(0.0, |bar| bar.close);
    let (momentum, volatility) = if close_start != 0.0 {
        let high = max_high(chunk).unwrap_or(close_start);
        let low = min_low(chunk).unwrap_or(close_start);
        (
            (close_end - close_start) / close_start,
            (high - low) / close_start.abs(),
        )
    } else {
        (0.0, 0.0)
    };
    let intensity =
        (volatility / config.volatility_saturation).clamp(config.min_intensity, 1.0);

    Zone {
        kind: ZoneKind::classify(momentum, config.momentum_threshold),
        start_pixel_x,
        end_pixel_x,
        bar_count: chunk.len(),
        start_price: close_start,
        end_price: close_end,
        intensity,
        segment_count: 1,
    }
}

/// Folds adjacent zones sharing a kind. Applying it twice changes nothing.
#[must_use]
pub fn merge_zones(zones: &[Zone]) -> Vec<Zone> {
    let mut merged: Vec<Zone> = Vec::with_capacity(zones.len());
    for zone in zones {
        match merged.last_mut() {
            Some(last) if last.kind == zone.kind => {
                let total = last.bar_count + zone.bar_count;
                if total > 0 {
                    last.intensity = (last.intensity * last.bar_count as f64
                        + zone.intensity * zone.bar_count as f64)
                        / total as f64;
                }
                last.bar_count = total;
                last.segment_count += zone.segment_count;
                last.end_pixel_x = zone.end_pixel_x;
                last.end_price = zone.end_price;
            }
            _ => merged.push(*zone),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::{Zone, ZoneKind, merge_zones};

    fn zone(kind: ZoneKind, start: f64, bars: usize) -> Zone {
        Zone {
            kind,
            start_pixel_x: start,
            end_pixel_x: start + 10.0,
            bar_count: bars,
            start_price: start,
            end_price: start + 1.0,
            intensity: 0.5,
            segment_count: 1,
        }
    }

    #[test]
    fn classify_uses_symmetric_threshold() {
        assert_eq!(ZoneKind::classify(0.01, 0.005), ZoneKind::Bullish);
        assert_eq!(ZoneKind::classify(-0.01, 0.005), ZoneKind::Bearish);
        assert_eq!(ZoneKind::classify(0.005, 0.005), ZoneKind::Neutral);
    }

    #[test]
    fn merge_folds_runs_and_carries_prices() {
        let zones = vec![
            zone(ZoneKind::Bullish, 0.0, 3),
            zone(ZoneKind::Bullish, 10.0, 3),
            zone(ZoneKind::Bearish, 20.0, 2),
        ];
        let merged = merge_zones(&zones);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].bar_count, 6);
        assert_eq!(merged[0].segment_count, 2);
        assert_eq!(merged[0].start_price, 0.0);
        assert_eq!(merged[0].end_price, 11.0);
        assert_eq!(merged[0].end_pixel_x, 20.0);
    }
}
