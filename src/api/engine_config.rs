use serde::{Deserialize, Serialize};

use crate::core::{LayoutConfig, SurfaceSize, Timeframe, ViewportTuning, ZoneConfig};
use crate::error::{ChartError, ChartResult};
use crate::history::HistoryConfig;
use crate::interaction::MomentumConfig;

/// How the main series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SeriesKind {
    #[default]
    Candles,
    /// Smoothed close-price line with gradient fill.
    Line,
}

/// Whether the engine draws at all.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChartMode {
    #[default]
    Native,
    /// A third-party widget shows `symbol`; the native pipeline is bypassed.
    ExternalWidget { symbol: String },
}

impl ChartMode {
    #[must_use]
    pub fn is_native(&self) -> bool {
        matches!(self, ChartMode::Native)
    }
}

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub surface: SurfaceSize,
    #[serde(default)]
    pub timeframe: Timeframe,
    #[serde(default)]
    pub series_kind: SeriesKind,
    #[serde(default)]
    pub mode: ChartMode,
    #[serde(default = "default_true")]
    pub show_volume: bool,
    /// Momentum-zone overlay. While enabled, lazy history loading is paused.
    #[serde(default)]
    pub show_zone_overlay: bool,
    #[serde(default = "default_true")]
    pub show_reference_lines: bool,
    /// Enables the market-cap readout under the live price badge.
    #[serde(default)]
    pub circulating_supply: Option<f64>,
    #[serde(default = "default_layout_config")]
    pub layout: LayoutConfig,
    #[serde(default = "default_viewport_tuning")]
    pub viewport_tuning: ViewportTuning,
    #[serde(default = "default_momentum_config")]
    pub momentum: MomentumConfig,
    #[serde(default = "default_history_config")]
    pub history: HistoryConfig,
    #[serde(default = "default_zone_config")]
    pub zones: ZoneConfig,
}

impl ChartEngineConfig {
    /// Creates a config with default tuning for a surface.
    #[must_use]
    pub fn new(surface: SurfaceSize) -> Self {
        Self {
            surface,
            timeframe: Timeframe::default(),
            series_kind: SeriesKind::default(),
            mode: ChartMode::default(),
            show_volume: true,
            show_zone_overlay: false,
            show_reference_lines: true,
            circulating_supply: None,
            layout: default_layout_config(),
            viewport_tuning: default_viewport_tuning(),
            momentum: default_momentum_config(),
            history: default_history_config(),
            zones: default_zone_config(),
        }
    }

    #[must_use]
    pub fn with_timeframe(mut self, timeframe: Timeframe) -> Self {
        self.timeframe = timeframe;
        self
    }

    #[must_use]
    pub fn with_series_kind(mut self, series_kind: SeriesKind) -> Self {
        self.series_kind = series_kind;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ChartMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_volume(mut self, show_volume: bool) -> Self {
        self.show_volume = show_volume;
        self
    }

    #[must_use]
    pub fn with_zone_overlay(mut self, show_zone_overlay: bool) -> Self {
        self.show_zone_overlay = show_zone_overlay;
        self
    }

    #[must_use]
    pub fn with_reference_lines(mut self, show_reference_lines: bool) -> Self {
        self.show_reference_lines = show_reference_lines;
        self
    }

    #[must_use]
    pub fn with_circulating_supply(mut self, circulating_supply: Option<f64>) -> Self {
        self.circulating_supply = circulating_supply;
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_viewport_tuning(mut self, tuning: ViewportTuning) -> Self {
        self.viewport_tuning = tuning;
        self
    }

    #[must_use]
    pub fn with_momentum(mut self, momentum: MomentumConfig) -> Self {
        self.momentum = momentum;
        self
    }

    #[must_use]
    pub fn with_history(mut self, history: HistoryConfig) -> Self {
        self.history = history;
        self
    }

    #[must_use]
    pub fn with_zones(mut self, zones: ZoneConfig) -> Self {
        self.zones = zones;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.surface.validate()?;
        self.layout.validate()?;
        self.viewport_tuning.validate()?;
        self.momentum.validate()?;
        self.history.validate()?;
        self.zones.validate()?;
        if let Some(supply) = self.circulating_supply {
            if !supply.is_finite() || supply <= 0.0 {
                return Err(ChartError::InvalidConfig(
                    "circulating supply must be finite and > 0".to_owned(),
                ));
            }
        }
        if let ChartMode::ExternalWidget { symbol } = &self.mode {
            if symbol.is_empty() {
                return Err(ChartError::InvalidConfig(
                    "external widget symbol must not be empty".to_owned(),
                ));
            }
        }
        Ok(())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config: {e}")))
    }
}

fn default_true() -> bool {
    true
}

fn default_layout_config() -> LayoutConfig {
    LayoutConfig::default()
}

fn default_viewport_tuning() -> ViewportTuning {
    ViewportTuning::default()
}

fn default_momentum_config() -> MomentumConfig {
    MomentumConfig::default()
}

fn default_history_config() -> HistoryConfig {
    HistoryConfig::default()
}

fn default_zone_config() -> ZoneConfig {
    ZoneConfig::default()
}
