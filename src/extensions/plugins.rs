use serde::{Deserialize, Serialize};

use crate::core::{Timeframe, Viewport};
use crate::interaction::{Crosshair, GestureState};

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub viewport: Viewport,
    pub timeframe: Timeframe,
    pub bars_len: usize,
    /// Visible bar index range `[start, end)`.
    pub visible_range: (usize, usize),
    pub gesture: GestureState,
    pub momentum_active: bool,
    pub crosshair: Option<Crosshair>,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PluginEvent {
    BarsReplaced { bars_len: usize },
    HistoryPrepended { added: usize },
    LivePriceMerged { appended: bool },
    ViewportChanged,
    HistoryRequested,
    PanStarted,
    PanEnded,
    MomentumStarted,
    MomentumSettled,
    Rendered,
}

/// Extension hook interface for bounded custom logic.
///
/// Plugins observe events and read engine context without mutating engine
/// internals.
pub trait ChartPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: PluginEvent, context: PluginContext);
}
