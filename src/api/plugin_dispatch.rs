use crate::extensions::PluginContext;
use crate::render::Renderer;

use super::{ChartEngine, PluginEvent};

impl<R: Renderer> ChartEngine<R> {
    pub(super) fn plugin_context(&self) -> PluginContext {
        let window = self.visible_window();
        PluginContext {
            viewport: self.core.viewport,
            timeframe: self.core.timeframe,
            bars_len: self.core.bars.len(),
            visible_range: (window.start_index, window.end_index),
            gesture: self.core.gesture,
            momentum_active: self.core.momentum.active,
            crosshair: self.crosshair(),
        }
    }

    /// Plugins are notified in registration order.
    pub(super) fn emit_plugin_event(&mut self, event: PluginEvent) {
        if self.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        for plugin in self.plugins.values_mut() {
            plugin.on_event(event, context);
        }
    }
}
