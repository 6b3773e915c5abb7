//! Observer hooks for host-side extensions.

mod plugins;

pub use plugins::{ChartPlugin, PluginContext, PluginEvent};
