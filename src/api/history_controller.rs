use crate::history::EdgeObservation;
use crate::render::Renderer;

use super::{ChartEngine, PluginEvent};

impl<R: Renderer> ChartEngine<R> {
    /// Edge detection for lazy history, run once per draw.
    pub(super) fn observe_history_edge(&mut self, now_ms: i64) {
        if !self.core.config.mode.is_native() || self.core.bars.is_empty() {
            return;
        }
        let window = self.visible_window();
        let observation = EdgeObservation {
            overlay_enabled: self.core.config.show_zone_overlay,
            start_index: window.start_index,
            total_bars: self.core.bars.len(),
        };
        let fire = self.core.bridge.observe(
            observation,
            &self.core.feed,
            now_ms,
            &self.core.config.history,
        );
        if !fire {
            return;
        }

        // Cleared again by `prepend_history` or `history_fetch_failed`.
        self.core.feed.loading_more = true;
        if let Some(source) = self.history_source.as_mut() {
            source.fetch_more_history();
        }
        self.emit_plugin_event(PluginEvent::HistoryRequested);
    }

    pub fn set_zone_overlay(&mut self, enabled: bool) {
        self.core.config.show_zone_overlay = enabled;
        if enabled {
            self.core.bridge.reset();
        }
    }

    #[must_use]
    pub fn is_zone_overlay_enabled(&self) -> bool {
        self.core.config.show_zone_overlay
    }
}
