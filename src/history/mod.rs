//! Lazy loading of older bars when the view approaches the oldest loaded bar.

mod bridge;

pub use bridge::{BarFeedState, EdgeObservation, HistoryBridge, HistoryConfig, HistorySource};
