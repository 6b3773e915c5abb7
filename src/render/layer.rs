use serde::{Deserialize, Serialize};

/// Draw layers, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RenderLayer {
    Background,
    /// Horizontal price grid and price-gutter labels.
    Grid,
    TimeAxis,
    ZoneBackground,
    Series,
    Volume,
    LivePrice,
    ReferenceLines,
    ZoneLabels,
    Crosshair,
}

impl RenderLayer {
    pub const COUNT: usize = 10;

    pub const ORDER: [RenderLayer; Self::COUNT] = [
        RenderLayer::Background,
        RenderLayer::Grid,
        RenderLayer::TimeAxis,
        RenderLayer::ZoneBackground,
        RenderLayer::Series,
        RenderLayer::Volume,
        RenderLayer::LivePrice,
        RenderLayer::ReferenceLines,
        RenderLayer::ZoneLabels,
        RenderLayer::Crosshair,
    ];

    /// Position in `ORDER`.
    #[must_use]
    pub const fn rank(self) -> usize {
        self as usize
    }
}
