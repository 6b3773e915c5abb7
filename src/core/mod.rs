pub mod bar;
pub mod layout;
pub mod live_tick;
pub mod mapper;
pub mod primitives;
pub mod timeframe;
pub mod types;
pub mod viewport;
pub mod window;
pub mod zones;

pub use bar::{Bar, canonicalize_bars};
pub use layout::{Layout, LayoutConfig, PointerRegion};
pub use live_tick::{LiveTickMerge, merge_live_price};
pub use mapper::{CoordinateMapper, PriceRange};
pub use timeframe::{TimeLabelGranularity, Timeframe};
pub use types::{PixelPoint, SurfaceSize};
pub use viewport::{Viewport, ViewportTuning};
pub use window::{VisibleWindow, WindowGeometry};
pub use zones::{Zone, ZoneConfig, ZoneKind, ZoneOverlay, aggregate_zones, merge_zones};
