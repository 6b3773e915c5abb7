use tracing::trace;

use crate::interaction::MomentumState;
use crate::render::Renderer;

use super::{ChartEngine, PluginEvent};

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn momentum_state(&self) -> MomentumState {
        self.core.momentum
    }

    #[must_use]
    pub fn is_momentum_active(&self) -> bool {
        self.core.momentum.active
    }

    /// Advances inertia by one animation frame.
    ///
    /// Returns `true` while momentum is still running so the host knows to
    /// schedule another frame.
    pub fn step_momentum(&mut self) -> bool {
        if !self.core.momentum.active {
            return false;
        }
        let config = self.core.config.momentum;
        let Some(step) = self.core.momentum.step(&config) else {
            trace!("momentum settled");
            self.emit_plugin_event(PluginEvent::MomentumSettled);
            return false;
        };

        let candle_width = self.window_geometry().candle_pixel_width;
        if step.dx_px != 0.0 && self.pan_by_bars(step.dx_px / candle_width) {
            self.core.momentum.stop_time_axis();
        }
        self.shift_price_by_pixels(step.dy_px);
        trace!(
            dx_px = step.dx_px,
            dy_px = step.dy_px,
            pan_offset_bars = self.core.viewport.pan_offset_bars,
            "momentum step"
        );
        self.emit_plugin_event(PluginEvent::ViewportChanged);
        true
    }

    /// Stops inertia, e.g. on a new pointer-down.
    pub(super) fn cancel_momentum(&mut self) {
        if self.core.momentum.active {
            self.core.momentum.stop();
            self.emit_plugin_event(PluginEvent::MomentumSettled);
        }
    }
}
