use serde::{Deserialize, Serialize};

use crate::core::{Timeframe, WindowGeometry};
use crate::error::{ChartError, ChartResult};

/// Tuning for zoom/pan clamping and price scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportTuning {
    /// Minimum candle width when the full history is dense.
    pub min_candle_width_dense_px: f64,
    /// Minimum candle width otherwise.
    pub min_candle_width_px: f64,
    pub max_candle_width_px: f64,
    /// Body width as a share of the candle slot.
    pub body_width_ratio: f64,
    /// Share of the visible count that may be empty space right of the newest bar.
    pub max_right_empty_ratio: f64,
    /// Floor applied to `zoom_level` before dividing the bar count.
    pub zoom_divisor_floor: f64,
    pub wheel_zoom_in_factor: f64,
    pub wheel_zoom_out_factor: f64,
    /// Multiplier applied to `price_zoom` per wheel-up tick over the price gutter.
    pub price_wheel_factor: f64,
    pub min_price_zoom: f64,
    pub max_price_zoom: f64,
    /// Exponential sensitivity of axis-handle drags, per pixel.
    pub axis_drag_sensitivity: f64,
    /// Vertical travel before a main drag starts moving the price axis.
    pub price_pan_engage_px: f64,
    /// Share of the visible price span added above and below the data.
    pub price_padding_ratio: f64,
}

impl Default for ViewportTuning {
    fn default() -> Self {
        Self {
            min_candle_width_dense_px: 1.0,
            min_candle_width_px: 3.0,
            max_candle_width_px: 25.0,
            body_width_ratio: 0.7,
            max_right_empty_ratio: 0.5,
            zoom_divisor_floor: 0.1,
            wheel_zoom_in_factor: 1.18,
            wheel_zoom_out_factor: 0.85,
            price_wheel_factor: 0.9,
            min_price_zoom: 0.05,
            max_price_zoom: 20.0,
            axis_drag_sensitivity: 0.005,
            price_pan_engage_px: 6.0,
            price_padding_ratio: 0.08,
        }
    }
}

impl ViewportTuning {
    /// Candle width floor: the dense minimum once `total_bars` no longer fit
    /// the chart at `min_candle_width_px`.
    #[must_use]
    pub fn min_candle_width_for(&self, total_bars: usize, chart_width_px: f64) -> f64 {
        if total_bars as f64 * self.min_candle_width_px > chart_width_px {
            self.min_candle_width_dense_px
        } else {
            self.min_candle_width_px
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        let positive = [
            ("min_candle_width_dense_px", self.min_candle_width_dense_px),
            ("min_candle_width_px", self.min_candle_width_px),
            ("max_candle_width_px", self.max_candle_width_px),
            ("zoom_divisor_floor", self.zoom_divisor_floor),
            ("wheel_zoom_in_factor", self.wheel_zoom_in_factor),
            ("wheel_zoom_out_factor", self.wheel_zoom_out_factor),
            ("price_wheel_factor", self.price_wheel_factor),
            ("min_price_zoom", self.min_price_zoom),
            ("max_price_zoom", self.max_price_zoom),
            ("axis_drag_sensitivity", self.axis_drag_sensitivity),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "viewport tuning `{name}` must be finite and > 0"
                )));
            }
        }
        if self.min_candle_width_dense_px > self.min_candle_width_px
            || self.min_candle_width_px > self.max_candle_width_px
        {
            return Err(ChartError::InvalidConfig(
                "candle width bounds must satisfy dense <= min <= max".to_owned(),
            ));
        }
        if self.min_price_zoom > self.max_price_zoom {
            return Err(ChartError::InvalidConfig(
                "min price zoom must be <= max price zoom".to_owned(),
            ));
        }
        for (name, value) in [
            ("body_width_ratio", self.body_width_ratio),
            ("max_right_empty_ratio", self.max_right_empty_ratio),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidConfig(format!(
                    "viewport tuning `{name}` must be in [0, 1]"
                )));
            }
        }
        if !self.price_pan_engage_px.is_finite()
            || self.price_pan_engage_px < 0.0
            || !self.price_padding_ratio.is_finite()
            || self.price_padding_ratio < 0.0
        {
            return Err(ChartError::InvalidConfig(
                "price pan threshold and padding must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Authoritative zoom/pan/price-scale state of one chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub zoom_level: f64,
    /// Bars between the newest bar and the right chart edge; positive values
    /// look into history, negative values leave empty space on the right.
    pub pan_offset_bars: f64,
    pub price_zoom: f64,
    pub price_offset_percent: f64,
    pub auto_fit_price: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom_level: 1.0,
            pan_offset_bars: 0.0,
            price_zoom: 1.0,
            price_offset_percent: 0.0,
            auto_fit_price: true,
        }
    }
}

impl Viewport {
    /// Default viewport for `timeframe`: the whole history for the longest
    /// timeframe, about `default_visible_bars` bars otherwise.
    #[must_use]
    pub fn for_timeframe(timeframe: Timeframe, total_bars: usize) -> Self {
        let zoom_level = match timeframe.default_visible_bars() {
            Some(target) if total_bars > 0 => total_bars as f64 / target as f64,
            _ => 1.0,
        };
        Self {
            zoom_level: zoom_level.max(timeframe.min_zoom_level()),
            ..Self::default()
        }
    }

    /// Price zoom applied to mapping, `1` while auto-fitting.
    #[must_use]
    pub fn effective_price_zoom(&self) -> f64 {
        if self.auto_fit_price {
            1.0
        } else {
            self.price_zoom
        }
    }

    /// Price offset applied to mapping, `0` while auto-fitting.
    #[must_use]
    pub fn effective_price_offset_percent(&self) -> f64 {
        if self.auto_fit_price {
            0.0
        } else {
            self.price_offset_percent
        }
    }

    /// Leaves auto-fit keeping the current effective mapping.
    pub fn detach_price_scale(&mut self) {
        if self.auto_fit_price {
            self.auto_fit_price = false;
            self.price_zoom = 1.0;
            self.price_offset_percent = 0.0;
        }
    }

    /// Bounds `zoom_level` to the range where it changes the candle width:
    /// `[max(timeframe minimum, N * min_width / W), N * max_width / W]`.
    pub fn clamp_zoom(
        &mut self,
        timeframe: Timeframe,
        total_bars: usize,
        chart_width_px: f64,
        tuning: &ViewportTuning,
    ) {
        let mut min_zoom = timeframe.min_zoom_level();
        let mut max_zoom = min_zoom;
        if total_bars > 0 && chart_width_px > 0.0 {
            let bars_per_px = total_bars as f64 / chart_width_px;
            let min_width = tuning.min_candle_width_for(total_bars, chart_width_px);
            min_zoom = min_zoom.max(bars_per_px * min_width);
            max_zoom = (bars_per_px * tuning.max_candle_width_px).max(min_zoom);
        }
        if !self.zoom_level.is_finite() {
            self.zoom_level = min_zoom;
        }
        self.zoom_level = self.zoom_level.clamp(min_zoom, max_zoom);
    }

    /// Clamps `pan_offset_bars` into `[-floor(V * ratio), max(0, N - V)]`.
    ///
    /// Returns `true` when the pan had to be adjusted.
    pub fn clamp_pan(&mut self, geometry: &WindowGeometry, total_bars: usize) -> bool {
        let (lower, upper) = geometry.pan_bounds(total_bars);
        let before = self.pan_offset_bars;
        if !before.is_finite() {
            self.pan_offset_bars = 0.0;
            return true;
        }
        self.pan_offset_bars = before.clamp(lower, upper);
        self.pan_offset_bars != before
    }

    pub fn clamp_price_zoom(&mut self, tuning: &ViewportTuning) {
        if !self.price_zoom.is_finite() {
            self.price_zoom = 1.0;
        }
        self.price_zoom = self
            .price_zoom
            .clamp(tuning.min_price_zoom, tuning.max_price_zoom);
    }
}

#[cfg(test)]
mod tests {
    use super::{Viewport, ViewportTuning};
    use crate::core::Timeframe;

    #[test]
    fn default_for_intraday_timeframe_targets_hundred_bars() {
        let viewport = Viewport::for_timeframe(Timeframe::OneDay, 1_000);
        assert_eq!(viewport.zoom_level, 10.0);
        assert_eq!(viewport.pan_offset_bars, 0.0);
        assert!(viewport.auto_fit_price);
    }

    #[test]
    fn default_for_longest_timeframe_shows_all_bars() {
        let viewport = Viewport::for_timeframe(Timeframe::All, 1_000);
        assert_eq!(viewport.zoom_level, 1.0);
    }

    #[test]
    fn detach_keeps_effective_mapping() {
        let mut viewport = Viewport {
            price_zoom: 3.0,
            price_offset_percent: 12.0,
            ..Viewport::default()
        };
        assert_eq!(viewport.effective_price_zoom(), 1.0);
        viewport.detach_price_scale();
        assert!(!viewport.auto_fit_price);
        assert_eq!(viewport.effective_price_zoom(), 1.0);
        assert_eq!(viewport.effective_price_offset_percent(), 0.0);
    }

    #[test]
    fn zoom_is_bounded_by_timeframe_and_max_candle_width() {
        let tuning = ViewportTuning::default();
        let mut viewport = Viewport {
            zoom_level: 1_000.0,
            ..Viewport::default()
        };
        viewport.clamp_zoom(Timeframe::OneDay, 1_000, 1_000.0, &tuning);
        assert_eq!(viewport.zoom_level, 25.0);

        // Dense history: 1 px candles are reached at zoom 1.
        viewport.zoom_level = 0.01;
        viewport.clamp_zoom(Timeframe::OneDay, 1_000, 1_000.0, &tuning);
        assert_eq!(viewport.zoom_level, 1.0);

        // Sparse history: the 3 px floor sits below the timeframe minimum.
        viewport.zoom_level = 0.01;
        viewport.clamp_zoom(Timeframe::OneDay, 100, 1_000.0, &tuning);
        assert_eq!(viewport.zoom_level, 0.5);
    }

    #[test]
    fn zoom_floor_follows_min_candle_width() {
        let tuning = ViewportTuning::default();
        let mut viewport = Viewport {
            zoom_level: 0.5,
            ..Viewport::default()
        };
        viewport.clamp_zoom(Timeframe::OneDay, 5_000, 1_000.0, &tuning);
        assert_eq!(viewport.zoom_level, 5.0);

        viewport.zoom_level = 0.5;
        viewport.clamp_zoom(Timeframe::OneDay, 300, 1_200.0, &tuning);
        assert_eq!(viewport.zoom_level, 0.75);
    }

    #[test]
    fn default_tuning_is_valid() {
        assert!(ViewportTuning::default().validate().is_ok());
    }
}
