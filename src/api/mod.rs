mod axis_render_frame_builder;
mod candlestick_render_frame_builder;
mod crosshair_render_frame_builder;
mod data_controller;
mod engine;
mod engine_config;
mod engine_core;
mod engine_init;
mod engine_snapshot;
mod formatter;
mod history_controller;
mod interaction_controller;
mod line_series_render_frame_builder;
mod live_price_render_frame_builder;
mod momentum_controller;
mod plugin_dispatch;
mod plugin_registry;
mod reference_line_render_frame_builder;
mod render_frame_builder;
mod render_style;
mod series_key;
mod snapshot_controller;
mod time_label_format;
mod validation;
mod viewport_controller;
mod volume_render_frame_builder;
mod zone_render_frame_builder;

pub use engine::ChartEngine;
pub use engine_config::{ChartEngineConfig, ChartMode, SeriesKind};
pub use engine_snapshot::EngineSnapshot;
pub use formatter::{DefaultValueFormatter, ValueFormatter};
pub use render_style::RenderStyle;
pub use series_key::SeriesKey;
pub use time_label_format::{format_crosshair_time, format_time_axis_label};

pub use crate::extensions::PluginEvent;
