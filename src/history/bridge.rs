use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChartError, ChartResult};

/// Tuning for edge detection and request throttling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// The window counts as "at the edge" when `start_index <= this`.
    pub edge_threshold_bars: usize,
    /// Below this many loaded bars one edge draw is enough to fetch.
    pub small_history_bars: usize,
    /// Consecutive edge draws required otherwise.
    pub required_edge_streak: u32,
    pub cooldown_ms: i64,
    /// Prepends shift the pan only when it exceeds this share of the visible count.
    pub reanchor_pan_ratio: f64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            edge_threshold_bars: 3,
            small_history_bars: 150,
            required_edge_streak: 2,
            cooldown_ms: 2_000,
            reanchor_pan_ratio: 0.2,
        }
    }
}

impl HistoryConfig {
    pub fn validate(self) -> ChartResult<Self> {
        if self.required_edge_streak == 0 {
            return Err(ChartError::InvalidConfig(
                "history edge streak must be > 0".to_owned(),
            ));
        }
        if self.cooldown_ms < 0 {
            return Err(ChartError::InvalidConfig(
                "history cooldown must be >= 0".to_owned(),
            ));
        }
        if !self.reanchor_pan_ratio.is_finite() || self.reanchor_pan_ratio < 0.0 {
            return Err(ChartError::InvalidConfig(
                "history re-anchor ratio must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Flags published by the bar collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BarFeedState {
    /// Initial load in flight.
    pub loading: bool,
    /// Older-history fetch in flight.
    pub loading_more: bool,
    pub has_more_history: bool,
    /// All-time high known to the collaborator, if any.
    pub ath_price: Option<f64>,
}

/// Fetch collaborator for older bars.
///
/// Requests are fire-and-forget; results come back through
/// `ChartEngine::prepend_history` or `ChartEngine::history_fetch_failed`.
pub trait HistorySource {
    fn fetch_more_history(&mut self);
}

impl<F: FnMut()> HistorySource for F {
    fn fetch_more_history(&mut self) {
        self()
    }
}

/// Per-draw inputs to edge detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeObservation {
    pub overlay_enabled: bool,
    pub start_index: usize,
    pub total_bars: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoryBridge {
    edge_streak: u32,
    last_request_ms: Option<i64>,
    requests_fired: u64,
}

impl HistoryBridge {
    /// Updates the edge streak for one draw and decides whether to fetch.
    pub fn observe(
        &mut self,
        observation: EdgeObservation,
        feed: &BarFeedState,
        now_ms: i64,
        config: &HistoryConfig,
    ) -> bool {
        let at_edge = !observation.overlay_enabled
            && feed.has_more_history
            && !feed.loading_more
            && observation.start_index <= config.edge_threshold_bars;
        if !at_edge {
            self.edge_streak = 0;
            return false;
        }

        self.edge_streak = self.edge_streak.saturating_add(1);
        let triggered = observation.total_bars < config.small_history_bars
            || self.edge_streak >= config.required_edge_streak;
        let cooled_down = self
            .last_request_ms
            .is_none_or(|last| now_ms.saturating_sub(last) >= config.cooldown_ms);
        if !triggered || !cooled_down {
            return false;
        }

        self.edge_streak = 0;
        self.last_request_ms = Some(now_ms);
        self.requests_fired += 1;
        debug!(
            start_index = observation.start_index,
            total_bars = observation.total_bars,
            "requesting older history"
        );
        true
    }

    /// Pan after `prepended` bars were added in front of the series.
    #[must_use]
    pub fn reanchored_pan(
        pan_offset_bars: f64,
        prepended: usize,
        visible_count: usize,
        config: &HistoryConfig,
    ) -> f64 {
        if pan_offset_bars > config.reanchor_pan_ratio * visible_count as f64 {
            pan_offset_bars + prepended as f64
        } else {
            pan_offset_bars
        }
    }

    #[must_use]
    pub fn edge_streak(&self) -> u32 {
        self.edge_streak
    }

    #[must_use]
    pub fn last_request_ms(&self) -> Option<i64> {
        self.last_request_ms
    }

    #[must_use]
    pub fn requests_fired(&self) -> u64 {
        self.requests_fired
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
