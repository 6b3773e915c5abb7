pub mod gesture;
pub mod momentum;

use serde::{Deserialize, Serialize};

use crate::core::{Bar, CoordinateMapper, PixelPoint};

pub use gesture::{
    GestureContext, GestureEffect, GestureEffects, GestureInput, GestureState, GestureTransition,
    reduce,
};
pub use momentum::{MomentumConfig, MomentumState, MomentumStep, VelocityTracker};

/// Pointer-tracked guides snapped to the nearest visible bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Crosshair {
    pub snapped_bar_index: usize,
    /// Centre X of the snapped bar.
    pub pixel_x: f64,
    pub pixel_y: f64,
    /// Price under `pixel_y`.
    pub price: f64,
    pub bar: Bar,
}

impl Crosshair {
    /// Resolves the crosshair for a pointer at `point`; `None` when no bar is
    /// visible.
    #[must_use]
    pub fn resolve(bars: &[Bar], mapper: &CoordinateMapper, point: PixelPoint) -> Option<Self> {
        if !point.is_finite() {
            return None;
        }
        let point = mapper.layout().clamp_to_plot(point);
        let index = mapper.pixel_x_to_bar_index(point.x)?;
        let bar = *bars.get(index)?;
        let pixel_y = point.y.min(mapper.layout().chart_bottom);
        Some(Self {
            snapped_bar_index: index,
            pixel_x: mapper.bar_index_to_pixel_x(index),
            pixel_y,
            price: mapper.pixel_y_to_price(pixel_y),
            bar,
        })
    }
}
