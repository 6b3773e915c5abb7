use serde::{Deserialize, Serialize};

use crate::core::bar::{max_high, min_low};
use crate::core::{Bar, Layout, Viewport, ViewportTuning, VisibleWindow};

const MIN_ABSOLUTE_SPAN: f64 = 1e-6;
const MIN_RELATIVE_SPAN: f64 = 1e-3;

/// Price interval mapped onto the chart height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// Builds a range, widening a zero span to a minimal epsilon around its midpoint.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        let (low, high) = if min <= max { (min, max) } else { (max, min) };
        let span = high - low;
        if span > 0.0 {
            return Self {
                min: low,
                max: high,
            };
        }
        let mid = (low + high) / 2.0;
        let half = (mid.abs() * MIN_RELATIVE_SPAN).max(MIN_ABSOLUTE_SPAN) / 2.0;
        Self {
            min: mid - half,
            max: mid + half,
        }
    }

    /// Visible high/low, padded, scaled by price zoom around the midpoint and
    /// shifted by the price offset. `None` for an empty window.
    #[must_use]
    pub fn from_window(
        bars: &[Bar],
        window: &VisibleWindow,
        viewport: &Viewport,
        tuning: &ViewportTuning,
    ) -> Option<Self> {
        let visible = bars.get(window.range())?;
        let low = min_low(visible)?;
        let high = max_high(visible)?;
        let base = Self::new(low, high);

        let padded_span = base.span() * (1.0 + 2.0 * tuning.price_padding_ratio);
        let span = padded_span * viewport.effective_price_zoom();
        let mid = base.mid() + span * viewport.effective_price_offset_percent() / 100.0;
        Some(Self::new(mid - span / 2.0, mid + span / 2.0))
    }

    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn mid(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    #[must_use]
    pub fn contains(&self, price: f64) -> bool {
        (self.min..=self.max).contains(&price)
    }
}

/// Pure data-space ↔ pixel-space mapping for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    layout: Layout,
    window: VisibleWindow,
    price_range: PriceRange,
}

impl CoordinateMapper {
    #[must_use]
    pub fn new(layout: Layout, window: VisibleWindow, price_range: PriceRange) -> Self {
        Self {
            layout,
            window,
            price_range: PriceRange::new(price_range.min, price_range.max),
        }
    }

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[must_use]
    pub fn window(&self) -> &VisibleWindow {
        &self.window
    }

    #[must_use]
    pub fn price_range(&self) -> PriceRange {
        self.price_range
    }

    /// Higher price maps to smaller Y.
    #[must_use]
    pub fn price_to_pixel_y(&self, price: f64) -> f64 {
        let normalized = (price - self.price_range.min) / self.price_range.span();
        self.layout.chart_bottom - normalized * self.layout.chart_height()
    }

    #[must_use]
    pub fn pixel_y_to_price(&self, y: f64) -> f64 {
        let normalized = (self.layout.chart_bottom - y) / self.layout.chart_height();
        self.price_range.min + normalized * self.price_range.span()
    }

    /// Centre X of bar `index`.
    #[must_use]
    pub fn bar_index_to_pixel_x(&self, index: usize) -> f64 {
        let width = self.window.candle_pixel_width;
        self.layout.chart_left + (index as f64 - self.window.first_slot) * width + width / 2.0
    }

    /// Continuous bar position under `x`; bar `i` spans `[i, i + 1)`.
    #[must_use]
    pub fn pixel_x_to_bar_position(&self, x: f64) -> f64 {
        (x - self.layout.chart_left) / self.window.candle_pixel_width + self.window.first_slot
    }

    /// Index of the visible bar under `x`, clamped into the window.
    #[must_use]
    pub fn pixel_x_to_bar_index(&self, x: f64) -> Option<usize> {
        if self.window.is_empty() {
            return None;
        }
        let x = x.clamp(self.layout.chart_left, self.layout.chart_right);
        let position = self.pixel_x_to_bar_position(x).floor();
        let first = self.window.start_index as f64;
        let last = (self.window.end_index - 1) as f64;
        Some(position.clamp(first, last) as usize)
    }

    #[must_use]
    pub fn is_price_visible(&self, price: f64) -> bool {
        let y = self.price_to_pixel_y(price);
        y >= self.layout.chart_top && y <= self.layout.chart_bottom
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{CoordinateMapper, PriceRange};
    use crate::core::{
        Layout, LayoutConfig, SurfaceSize, Viewport, ViewportTuning, VisibleWindow,
        WindowGeometry,
    };

    fn mapper() -> CoordinateMapper {
        let layout = Layout::new(SurfaceSize::new(1_080, 600), LayoutConfig::default())
            .expect("layout");
        let tuning = ViewportTuning::default();
        let geometry = WindowGeometry::resolve(10.0, layout.chart_width(), 1_000, &tuning);
        let window = VisibleWindow::compute(&Viewport::default(), &geometry, 1_000);
        CoordinateMapper::new(layout, window, PriceRange::new(100.0, 200.0))
    }

    #[test]
    fn price_axis_is_inverted() {
        let mapper = mapper();
        let layout = *mapper.layout();
        assert_relative_eq!(mapper.price_to_pixel_y(200.0), layout.chart_top, epsilon = 1e-9);
        assert_relative_eq!(mapper.price_to_pixel_y(100.0), layout.chart_bottom, epsilon = 1e-9);
        assert!(mapper.price_to_pixel_y(180.0) < mapper.price_to_pixel_y(120.0));
    }

    #[test]
    fn degenerate_range_is_widened() {
        let range = PriceRange::new(50.0, 50.0);
        assert!(range.span() > 0.0);
        assert!(range.contains(50.0));
    }

    #[test]
    fn visible_bars_land_inside_chart() {
        let mapper = mapper();
        let layout = *mapper.layout();
        for index in mapper.window().range() {
            let x = mapper.bar_index_to_pixel_x(index);
            assert!(x >= layout.chart_left && x <= layout.chart_right);
        }
    }
}
