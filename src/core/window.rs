use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::core::{Viewport, ViewportTuning};

const SLOT_EPSILON: f64 = 1e-6;

/// Candle sizing derived from zoom, independent of pan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub candle_pixel_width: f64,
    pub body_pixel_width: f64,
    /// Bar slots that fit the chart width at `candle_pixel_width`.
    pub visible_count: usize,
    pub max_right_empty_ratio: f64,
}

impl WindowGeometry {
    /// Resolves candle width from `zoom_level`:
    /// `requested = N / max(floor, zoom)`, width is clamped, then the slot
    /// count is recomputed from the clamped width so bars always fill the chart.
    #[must_use]
    pub fn resolve(
        zoom_level: f64,
        chart_width_px: f64,
        total_bars: usize,
        tuning: &ViewportTuning,
    ) -> Self {
        let chart_width_px = chart_width_px.max(1.0);
        let min_width = tuning.min_candle_width_for(total_bars, chart_width_px);
        let requested = total_bars as f64 / zoom_level.max(tuning.zoom_divisor_floor);
        let raw_width = if requested > 0.0 {
            chart_width_px / requested
        } else {
            tuning.max_candle_width_px
        };
        let candle_pixel_width = raw_width.clamp(min_width, tuning.max_candle_width_px);
        // `chart / (chart / requested)` can land just under an integer.
        let slots = chart_width_px / candle_pixel_width + SLOT_EPSILON;
        let visible_count = (slots.floor() as usize).max(1);
        let body_pixel_width = (candle_pixel_width * tuning.body_width_ratio)
            .max(1.0)
            .min(candle_pixel_width);

        Self {
            candle_pixel_width,
            body_pixel_width,
            visible_count,
            max_right_empty_ratio: tuning.max_right_empty_ratio,
        }
    }

    /// Allowed `pan_offset_bars` range for `total_bars`.
    #[must_use]
    pub fn pan_bounds(&self, total_bars: usize) -> (f64, f64) {
        let visible = self.visible_count as f64;
        let lower = -(visible * self.max_right_empty_ratio).floor();
        let upper = (total_bars as f64 - visible).max(0.0);
        (lower, upper)
    }
}

/// Slice of bars drawn this frame plus their pixel footprint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibleWindow {
    pub start_index: usize,
    pub end_index: usize,
    pub candle_pixel_width: f64,
    pub body_pixel_width: f64,
    pub left_empty_count: usize,
    pub right_empty_count: usize,
    pub visible_count: usize,
    /// Fractional bar index occupying the leftmost slot; negative when the
    /// history does not reach the left edge.
    pub first_slot: f64,
}

impl VisibleWindow {
    #[must_use]
    pub fn compute(viewport: &Viewport, geometry: &WindowGeometry, total_bars: usize) -> Self {
        let total = total_bars as f64;
        let visible = geometry.visible_count as f64;
        let right_edge = total - viewport.pan_offset_bars;
        let first_slot = right_edge - visible;

        let start_index = (first_slot - 0.5).ceil().clamp(0.0, total) as usize;
        let end_index = ((right_edge + 0.5).floor().clamp(0.0, total) as usize).max(start_index);
        let left_empty_count = (-first_slot).max(0.0).floor() as usize;
        let right_empty_count = (-viewport.pan_offset_bars).max(0.0).floor() as usize;

        Self {
            start_index,
            end_index,
            candle_pixel_width: geometry.candle_pixel_width,
            body_pixel_width: geometry.body_pixel_width,
            left_empty_count,
            right_empty_count,
            visible_count: geometry.visible_count,
            first_slot,
        }
    }

    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start_index..self.end_index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.end_index - self.start_index
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }
}

#[cfg(test)]
mod tests {
    use super::{VisibleWindow, WindowGeometry};
    use crate::core::{Viewport, ViewportTuning};

    #[test]
    fn sparse_history_uses_wider_minimum() {
        let tuning = ViewportTuning::default();
        let geometry = WindowGeometry::resolve(0.1, 1_000.0, 100, &tuning);
        assert_eq!(geometry.candle_pixel_width, 3.0);
        assert_eq!(geometry.visible_count, 333);
    }

    #[test]
    fn dense_history_allows_single_pixel_candles() {
        let tuning = ViewportTuning::default();
        let geometry = WindowGeometry::resolve(1.0, 1_000.0, 5_000, &tuning);
        assert_eq!(geometry.candle_pixel_width, 1.0);
        assert_eq!(geometry.visible_count, 1_000);
    }

    #[test]
    fn slot_count_survives_rounding_at_any_chart_width() {
        let tuning = ViewportTuning::default();
        for width in 300..2_500 {
            let geometry = WindowGeometry::resolve(10.0, f64::from(width), 1_000, &tuning);
            assert_eq!(geometry.visible_count, 100, "chart width {width}");
        }
        let geometry = WindowGeometry::resolve(10.0, 411.0, 1_000, &tuning);
        let window = VisibleWindow::compute(&Viewport::default(), &geometry, 1_000);
        assert_eq!((window.start_index, window.end_index), (900, 1_000));
    }

    #[test]
    fn negative_pan_leaves_right_empty_space() {
        let tuning = ViewportTuning::default();
        let geometry = WindowGeometry::resolve(10.0, 1_000.0, 1_000, &tuning);
        let viewport = Viewport {
            zoom_level: 10.0,
            pan_offset_bars: -20.0,
            ..Viewport::default()
        };
        let window = VisibleWindow::compute(&viewport, &geometry, 1_000);
        assert_eq!(window.right_empty_count, 20);
        assert_eq!(window.end_index, 1_000);
        assert_eq!(window.start_index, 920);
    }

    #[test]
    fn short_history_is_right_aligned() {
        let tuning = ViewportTuning::default();
        let geometry = WindowGeometry::resolve(0.5, 1_000.0, 50, &tuning);
        let window = VisibleWindow::compute(&Viewport::default(), &geometry, 50);
        assert_eq!(window.start_index, 0);
        assert_eq!(window.end_index, 50);
        assert!(window.left_empty_count > 0);
    }
}
