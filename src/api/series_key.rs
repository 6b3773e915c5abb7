use serde::{Deserialize, Serialize};

use crate::core::Timeframe;

/// Identity of the bar series being shown. Any change resets the viewport.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesKey {
    /// Ticker symbol or token address.
    pub symbol: String,
    pub timeframe: Timeframe,
    #[serde(default)]
    pub network_id: Option<String>,
    #[serde(default)]
    pub period_length: Option<u32>,
}

impl SeriesKey {
    #[must_use]
    pub fn new(symbol: impl Into<String>, timeframe: Timeframe) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe,
            network_id: None,
            period_length: None,
        }
    }

    #[must_use]
    pub fn with_network_id(mut self, network_id: impl Into<String>) -> Self {
        self.network_id = Some(network_id.into());
        self
    }

    #[must_use]
    pub fn with_period_length(mut self, period_length: u32) -> Self {
        self.period_length = Some(period_length);
        self
    }
}
