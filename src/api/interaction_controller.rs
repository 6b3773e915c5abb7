use tracing::trace;

use crate::core::{PixelPoint, PointerRegion};
use crate::interaction::{
    Crosshair, GestureContext, GestureEffect, GestureInput, GestureState, MomentumState, reduce,
};
use crate::render::Renderer;

use super::{ChartEngine, PluginEvent};

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn gesture_state(&self) -> GestureState {
        self.core.gesture
    }

    /// Crosshair for the current hover position, snapped to a visible bar.
    #[must_use]
    pub fn crosshair(&self) -> Option<Crosshair> {
        let point = self.core.hover?;
        let mapper = self.coordinate_mapper()?;
        Crosshair::resolve(&self.core.bars, &mapper, point)
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.core.fullscreen
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.core.fullscreen = fullscreen;
    }

    /// Mouse wheel at host coordinates `(x, y)` in CSS pixels.
    ///
    /// Over the price gutter the price axis is scaled; elsewhere on the plot
    /// the time axis zooms around the cursor.
    pub fn wheel(&mut self, x: f64, y: f64, delta_y: f64) {
        if !x.is_finite() || !y.is_finite() || !delta_y.is_finite() || delta_y == 0.0 {
            return;
        }
        let point = self.core.layout.to_device(x, y);
        let tuning = self.core.config.viewport_tuning;
        match self.core.layout.region_at(point) {
            PointerRegion::PriceAxis => {
                let current = self.core.viewport.effective_price_zoom();
                self.core.viewport.detach_price_scale();
                self.core.viewport.price_zoom = if delta_y < 0.0 {
                    current * tuning.price_wheel_factor
                } else {
                    current / tuning.price_wheel_factor
                };
                self.core.viewport.clamp_price_zoom(&tuning);
            }
            PointerRegion::Chart | PointerRegion::TimeAxis => {
                let factor = if delta_y < 0.0 {
                    tuning.wheel_zoom_in_factor
                } else {
                    tuning.wheel_zoom_out_factor
                };
                let zoom_level = self.core.viewport.zoom_level * factor;
                self.zoom_around(zoom_level, point.x);
            }
            PointerRegion::Outside => return,
        }
        trace!(
            zoom_level = self.core.viewport.zoom_level,
            price_zoom = self.core.viewport.price_zoom,
            "wheel"
        );
        self.emit_plugin_event(PluginEvent::ViewportChanged);
    }

    pub fn pointer_down(&mut self, x: f64, y: f64, time_ms: f64) {
        let Some(point) = self.device_point(x, y, time_ms) else {
            return;
        };
        let region = self.core.layout.region_at(point);
        self.dispatch_gesture(GestureInput::PointerDown { point, region }, time_ms);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64, time_ms: f64) {
        let Some(point) = self.device_point(x, y, time_ms) else {
            return;
        };
        let region = self.core.layout.region_at(point);
        self.dispatch_gesture(GestureInput::PointerMove { point, region }, time_ms);
    }

    pub fn pointer_up(&mut self, x: f64, y: f64, time_ms: f64) {
        let Some(point) = self.device_point(x, y, time_ms) else {
            return;
        };
        self.dispatch_gesture(GestureInput::PointerUp { point }, time_ms);
    }

    /// Hides the crosshair and ends any drag in progress.
    pub fn pointer_leave(&mut self, time_ms: f64) {
        if !time_ms.is_finite() {
            return;
        }
        self.dispatch_gesture(GestureInput::PointerLeave, time_ms);
    }

    /// Resets the viewport to the timeframe default.
    pub fn double_click(&mut self) {
        self.cancel_momentum();
        self.reset_viewport();
    }

    /// Escape key. Returns `true` when it left fullscreen.
    pub fn key_escape(&mut self) -> bool {
        if self.core.fullscreen {
            self.core.fullscreen = false;
            return true;
        }
        false
    }

    fn device_point(&self, x: f64, y: f64, time_ms: f64) -> Option<PixelPoint> {
        if !x.is_finite() || !y.is_finite() || !time_ms.is_finite() {
            return None;
        }
        Some(self.core.layout.to_device(x, y))
    }

    fn gesture_context(&self) -> GestureContext {
        GestureContext {
            zoom_level: self.core.viewport.zoom_level,
            effective_price_zoom: self.core.viewport.effective_price_zoom(),
            auto_fit_price: self.core.viewport.auto_fit_price,
            tuning: self.core.config.viewport_tuning,
        }
    }

    fn dispatch_gesture(&mut self, input: GestureInput, time_ms: f64) {
        let transition = reduce(self.core.gesture, input, &self.gesture_context());
        self.core.gesture = transition.state;
        for effect in transition.effects {
            self.apply_gesture_effect(effect, time_ms);
        }
    }

    fn apply_gesture_effect(&mut self, effect: GestureEffect, time_ms: f64) {
        let tuning = self.core.config.viewport_tuning;
        match effect {
            GestureEffect::CancelMomentum => self.cancel_momentum(),
            GestureEffect::PanStarted { point } => {
                self.core.velocity.reset(point, time_ms);
                self.emit_plugin_event(PluginEvent::PanStarted);
            }
            GestureEffect::DragBy {
                dx_px,
                dy_px,
                point,
            } => {
                self.core
                    .velocity
                    .sample(point, time_ms, &self.core.config.momentum);
                let candle_width = self.window_geometry().candle_pixel_width;
                self.pan_by_bars(dx_px / candle_width);
                self.shift_price_by_pixels(dy_px);
                self.emit_plugin_event(PluginEvent::ViewportChanged);
            }
            GestureEffect::DetachPriceScale => self.core.viewport.detach_price_scale(),
            GestureEffect::SetPriceZoom(price_zoom) => {
                self.core.viewport.price_zoom = price_zoom;
                self.core.viewport.clamp_price_zoom(&tuning);
                self.emit_plugin_event(PluginEvent::ViewportChanged);
            }
            GestureEffect::SetZoom(zoom_level) => {
                if zoom_level.is_finite() {
                    self.core.viewport.zoom_level = zoom_level;
                    self.apply_viewport_bounds();
                    self.emit_plugin_event(PluginEvent::ViewportChanged);
                }
            }
            GestureEffect::PanEnded => {
                let (vx, vy) = self
                    .core
                    .velocity
                    .release_velocity(time_ms, &self.core.config.momentum);
                // Vertical inertia only applies once the price axis is detached.
                let vy = if self.core.viewport.auto_fit_price { 0.0 } else { vy };
                self.core.momentum =
                    MomentumState::from_release((vx, vy), &self.core.config.momentum);
                self.emit_plugin_event(PluginEvent::PanEnded);
                if self.core.momentum.active {
                    trace!(
                        velocity_time_axis = self.core.momentum.velocity_time_axis,
                        velocity_price_axis = self.core.momentum.velocity_price_axis,
                        "momentum started"
                    );
                    self.emit_plugin_event(PluginEvent::MomentumStarted);
                }
            }
            GestureEffect::MoveCrosshair(point) => self.core.hover = Some(point),
            GestureEffect::HideCrosshair => self.core.hover = None,
        }
    }
}
