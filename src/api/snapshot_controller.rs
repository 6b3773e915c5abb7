use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::{ChartEngine, EngineSnapshot};

impl<R: Renderer> ChartEngine<R> {
    /// Builds a deterministic snapshot useful for regression tests.
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            series_key: self.core.series_key.clone(),
            timeframe: self.core.timeframe,
            bars_len: self.core.bars.len(),
            oldest_time: self.core.bars.first().map(|bar| bar.time),
            newest_time: self.core.bars.last().map(|bar| bar.time),
            viewport: self.core.viewport,
            geometry: self.window_geometry(),
            window: self.visible_window(),
            feed: self.core.feed,
            bridge: self.core.bridge,
            gesture: self.core.gesture,
            momentum: self.core.momentum,
            crosshair: self.crosshair(),
            live_price: self.core.live_price,
            fullscreen: self.core.fullscreen,
        }
    }

    /// Serializes snapshot as pretty JSON for fixture-based regression checks.
    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}
