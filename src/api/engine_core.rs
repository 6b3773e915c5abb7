use crate::core::{Bar, Layout, PixelPoint, Timeframe, Viewport};
use crate::history::{BarFeedState, HistoryBridge};
use crate::interaction::{GestureState, MomentumState, VelocityTracker};

use super::{ChartEngineConfig, RenderStyle, SeriesKey};

/// Internal engine state used by the public facade (`ChartEngine`).
pub(super) struct EngineCore {
    pub(super) config: ChartEngineConfig,
    pub(super) style: RenderStyle,
    pub(super) layout: Layout,
    pub(super) timeframe: Timeframe,
    pub(super) series_key: Option<SeriesKey>,
    pub(super) bars: Vec<Bar>,
    pub(super) feed: BarFeedState,
    pub(super) viewport: Viewport,
    pub(super) gesture: GestureState,
    pub(super) velocity: VelocityTracker,
    pub(super) momentum: MomentumState,
    pub(super) bridge: HistoryBridge,
    /// Last pointer position over the chart, device pixels.
    pub(super) hover: Option<PixelPoint>,
    pub(super) live_price: Option<f64>,
    pub(super) fullscreen: bool,
}
