use tracing::trace;

use crate::core::{
    CoordinateMapper, Layout, PriceRange, SurfaceSize, Timeframe, Viewport, VisibleWindow,
    WindowGeometry,
};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::{ChartEngine, PluginEvent};

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.core.viewport
    }

    /// Replaces the viewport; zoom and pan are clamped immediately.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.core.viewport = viewport;
        self.core.viewport.clamp_price_zoom(&self.core.config.viewport_tuning);
        self.apply_viewport_bounds();
        self.emit_plugin_event(PluginEvent::ViewportChanged);
    }

    #[must_use]
    pub fn timeframe(&self) -> Timeframe {
        self.core.timeframe
    }

    #[must_use]
    pub fn layout(&self) -> Layout {
        self.core.layout
    }

    #[must_use]
    pub fn window_geometry(&self) -> WindowGeometry {
        WindowGeometry::resolve(
            self.core.viewport.zoom_level,
            self.core.layout.chart_width(),
            self.core.bars.len(),
            &self.core.config.viewport_tuning,
        )
    }

    #[must_use]
    pub fn visible_window(&self) -> VisibleWindow {
        VisibleWindow::compute(
            &self.core.viewport,
            &self.window_geometry(),
            self.core.bars.len(),
        )
    }

    /// Mapper for the current frame; `None` while no bar is visible.
    #[must_use]
    pub fn coordinate_mapper(&self) -> Option<CoordinateMapper> {
        let window = self.visible_window();
        let price_range = PriceRange::from_window(
            &self.core.bars,
            &window,
            &self.core.viewport,
            &self.core.config.viewport_tuning,
        )?;
        Some(CoordinateMapper::new(self.core.layout, window, price_range))
    }

    /// Resets zoom, pan and price scale to the timeframe default.
    pub fn reset_viewport(&mut self) {
        self.core.viewport = Viewport::for_timeframe(self.core.timeframe, self.core.bars.len());
        self.apply_viewport_bounds();
        self.emit_plugin_event(PluginEvent::ViewportChanged);
    }

    /// Resizes the surface, re-clamps the viewport and redraws.
    pub fn resize(&mut self, surface: SurfaceSize, now_ms: i64) -> ChartResult<()> {
        let layout = Layout::new(surface, self.core.config.layout)?;
        self.core.config.surface = surface;
        self.core.layout = layout;
        self.core.hover = None;
        self.apply_viewport_bounds();
        trace!(
            width = surface.width,
            height = surface.height,
            device_pixel_ratio = surface.device_pixel_ratio,
            "resize surface"
        );
        self.emit_plugin_event(PluginEvent::ViewportChanged);
        self.render(now_ms)
    }

    /// Clamps zoom to its timeframe bounds, then pan to the resulting window.
    ///
    /// Returns `true` when the pan had to be adjusted.
    pub(super) fn apply_viewport_bounds(&mut self) -> bool {
        let total = self.core.bars.len();
        let chart_width = self.core.layout.chart_width();
        self.core.viewport.clamp_zoom(
            self.core.timeframe,
            total,
            chart_width,
            &self.core.config.viewport_tuning,
        );
        let geometry = self.window_geometry();
        self.core.viewport.clamp_pan(&geometry, total)
    }

    /// Shifts the pan by `delta_bars`; returns `true` when a bound was hit.
    pub(super) fn pan_by_bars(&mut self, delta_bars: f64) -> bool {
        if !delta_bars.is_finite() {
            return false;
        }
        self.core.viewport.pan_offset_bars += delta_bars;
        self.apply_viewport_bounds()
    }

    /// Moves the price axis by a vertical pixel displacement.
    pub(super) fn shift_price_by_pixels(&mut self, dy_px: f64) {
        let chart_height = self.core.layout.chart_height();
        if !dy_px.is_finite() || chart_height <= 0.0 || self.core.viewport.auto_fit_price {
            return;
        }
        self.core.viewport.price_offset_percent += dy_px / chart_height * 100.0;
    }

    /// Sets `zoom_level` keeping the bar under `anchor_x` (device px) fixed.
    pub(super) fn zoom_around(&mut self, zoom_level: f64, anchor_x: f64) {
        if !zoom_level.is_finite() || zoom_level <= 0.0 {
            return;
        }
        let layout = self.core.layout;
        let offset_px = (anchor_x - layout.chart_left).clamp(0.0, layout.chart_width());
        let before = self.window_geometry();

        self.core.viewport.zoom_level = zoom_level;
        self.core.viewport.clamp_zoom(
            self.core.timeframe,
            self.core.bars.len(),
            layout.chart_width(),
            &self.core.config.viewport_tuning,
        );
        let after = self.window_geometry();

        // Keep `first_slot + offset / width` constant across the width change.
        self.core.viewport.pan_offset_bars += before.visible_count as f64
            - after.visible_count as f64
            + offset_px / after.candle_pixel_width
            - offset_px / before.candle_pixel_width;
        self.apply_viewport_bounds();
    }
}
