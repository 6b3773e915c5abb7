use indexmap::IndexMap;

use crate::core::{Layout, Viewport};
use crate::error::ChartResult;
use crate::history::{BarFeedState, HistoryBridge};
use crate::interaction::{GestureState, MomentumState, VelocityTracker};
use crate::render::Renderer;

use super::{
    ChartEngine, ChartEngineConfig, DefaultValueFormatter, RenderStyle, engine_core::EngineCore,
};

impl<R: Renderer> ChartEngine<R> {
    /// Creates an engine with no bars and the timeframe's default viewport.
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        config.validate()?;
        let layout = Layout::new(config.surface, config.layout)?;
        let timeframe = config.timeframe;

        Ok(Self {
            renderer,
            formatter: Box::new(DefaultValueFormatter),
            history_source: None,
            plugins: IndexMap::new(),
            core: EngineCore {
                config,
                style: RenderStyle::default(),
                layout,
                timeframe,
                series_key: None,
                bars: Vec::new(),
                feed: BarFeedState::default(),
                viewport: Viewport::for_timeframe(timeframe, 0),
                gesture: GestureState::Idle,
                velocity: VelocityTracker::default(),
                momentum: MomentumState::default(),
                bridge: HistoryBridge::default(),
                hover: None,
                live_price: None,
                fullscreen: false,
            },
        })
    }
}
