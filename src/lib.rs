//! candle-viewport: headless interactive price-chart viewport engine.
//!
//! A host feeds bars, pointer input and animation ticks into a
//! [`ChartEngine`]; the engine keeps zoom/pan/price-scale state, pages older
//! history in through a [`history::HistorySource`], and hands each draw to a
//! [`render::Renderer`] as an ordered list of layered draw commands.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod history;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult};
