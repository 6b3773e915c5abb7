use serde::{Deserialize, Serialize};

use crate::core::{Timeframe, Viewport, VisibleWindow, WindowGeometry};
use crate::history::{BarFeedState, HistoryBridge};
use crate::interaction::{Crosshair, GestureState, MomentumState};

use super::SeriesKey;

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub series_key: Option<SeriesKey>,
    pub timeframe: Timeframe,
    pub bars_len: usize,
    pub oldest_time: Option<i64>,
    pub newest_time: Option<i64>,
    pub viewport: Viewport,
    pub geometry: WindowGeometry,
    pub window: VisibleWindow,
    pub feed: BarFeedState,
    pub bridge: HistoryBridge,
    pub gesture: GestureState,
    pub momentum: MomentumState,
    pub crosshair: Option<Crosshair>,
    pub live_price: Option<f64>,
    pub fullscreen: bool,
}
