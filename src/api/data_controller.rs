use tracing::{debug, trace, warn};

use crate::core::{Bar, LiveTickMerge, Viewport, canonicalize_bars, merge_live_price};
use crate::history::{BarFeedState, HistoryBridge};
use crate::interaction::GestureState;
use crate::render::Renderer;

use super::{ChartEngine, PluginEvent, SeriesKey};

impl<R: Renderer> ChartEngine<R> {
    /// Replaces the whole series.
    ///
    /// A new `key`, or a first non-empty load, resets the viewport to the
    /// timeframe default and drops gesture, momentum and history state.
    /// Otherwise the current viewport is kept and re-clamped.
    pub fn set_series(&mut self, key: SeriesKey, bars: Vec<Bar>) {
        let bars = canonicalize_bars(bars);
        let key_changed = self.core.series_key.as_ref() != Some(&key);
        let was_empty = self.core.bars.is_empty();

        self.core.timeframe = key.timeframe;
        self.core.series_key = Some(key);
        self.core.bars = bars;

        if key_changed || was_empty {
            self.core.viewport = Viewport::for_timeframe(self.core.timeframe, self.core.bars.len());
            self.core.momentum.stop();
            self.core.bridge.reset();
            self.core.gesture = GestureState::Idle;
            self.core.hover = None;
            self.core.live_price = None;
        }
        self.apply_viewport_bounds();

        debug!(
            bars_len = self.core.bars.len(),
            reset = key_changed || was_empty,
            timeframe = ?self.core.timeframe,
            "replaced bar series"
        );
        self.emit_plugin_event(PluginEvent::BarsReplaced {
            bars_len: self.core.bars.len(),
        });
    }

    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.core.bars
    }

    #[must_use]
    pub fn series_key(&self) -> Option<&SeriesKey> {
        self.core.series_key.as_ref()
    }

    pub fn set_feed_state(&mut self, feed: BarFeedState) {
        self.core.feed = feed;
    }

    #[must_use]
    pub fn feed_state(&self) -> BarFeedState {
        self.core.feed
    }

    #[must_use]
    pub fn history_bridge(&self) -> HistoryBridge {
        self.core.bridge
    }

    /// Prepends an older page of bars and returns how many were kept.
    ///
    /// Bars not strictly older than the current oldest bar are dropped. When
    /// the user is looking at history the pan is shifted by the prepended
    /// count so the same bars stay on screen, and zoom is scaled so the
    /// candle width does not change.
    pub fn prepend_history(&mut self, bars: Vec<Bar>) -> usize {
        self.core.feed.loading_more = false;
        let mut older = canonicalize_bars(bars);
        if let Some(oldest) = self.core.bars.first().map(|bar| bar.time) {
            older.retain(|bar| bar.time < oldest);
        }
        let added = older.len();
        if added == 0 {
            trace!("history page had no older bars");
            return 0;
        }

        let previous_len = self.core.bars.len();
        let visible_count = self.window_geometry().visible_count;
        older.append(&mut self.core.bars);
        self.core.bars = older;

        if previous_len == 0 {
            self.core.viewport = Viewport::for_timeframe(self.core.timeframe, self.core.bars.len());
        } else {
            self.core.viewport.pan_offset_bars = HistoryBridge::reanchored_pan(
                self.core.viewport.pan_offset_bars,
                added,
                visible_count,
                &self.core.config.history,
            );
            self.scale_zoom_for_growth(previous_len);
        }
        self.apply_viewport_bounds();

        debug!(
            added,
            bars_len = self.core.bars.len(),
            pan_offset_bars = self.core.viewport.pan_offset_bars,
            "prepended history"
        );
        self.emit_plugin_event(PluginEvent::HistoryPrepended { added });
        added
    }

    /// Reports a failed history fetch. Nothing retries until the next edge
    /// trigger after the cooldown.
    pub fn history_fetch_failed(&mut self) {
        self.core.feed.loading_more = false;
        warn!(
            bars_len = self.core.bars.len(),
            "older history fetch failed"
        );
    }

    /// Folds a live price into the newest bar or opens a new one.
    ///
    /// An invalid price hides the live-price layer until a valid one arrives.
    pub fn update_live_price(&mut self, price: f64, now_ms: i64) -> LiveTickMerge {
        if !self.core.config.mode.is_native() {
            return LiveTickMerge::Ignored;
        }
        if !price.is_finite() || price <= 0.0 {
            self.core.live_price = None;
            return LiveTickMerge::Ignored;
        }

        let previous_len = self.core.bars.len();
        let merge = merge_live_price(
            &mut self.core.bars,
            price,
            now_ms,
            self.core.timeframe.resolution_ms(),
        );
        if merge == LiveTickMerge::Ignored {
            return merge;
        }
        self.core.live_price = Some(price);

        if merge == LiveTickMerge::Appended {
            if self.core.viewport.pan_offset_bars > 0.0 {
                self.core.viewport.pan_offset_bars += 1.0;
            }
            self.scale_zoom_for_growth(previous_len);
            self.apply_viewport_bounds();
        }
        self.emit_plugin_event(PluginEvent::LivePriceMerged {
            appended: merge == LiveTickMerge::Appended,
        });
        merge
    }

    #[must_use]
    pub fn live_price(&self) -> Option<f64> {
        self.core.live_price
    }

    /// Keeps the candle width when the series grows from `previous_len` bars.
    fn scale_zoom_for_growth(&mut self, previous_len: usize) {
        if previous_len == 0 {
            return;
        }
        let ratio = self.core.bars.len() as f64 / previous_len as f64;
        self.core.viewport.zoom_level *= ratio;
    }
}
