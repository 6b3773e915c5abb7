mod frame;
mod layer;
mod null_renderer;
mod primitives;

pub use frame::{DrawCommand, LayeredCommand, LayeredFrame, RenderFrame};
pub use layer::RenderLayer;
pub use null_renderer::NullRenderer;
pub use primitives::{
    ClipRect, Color, LinePrimitive, LineStrokeStyle, PathGradientFill, PathPrimitive,
    PathSegment, RectPrimitive, TextHAlign, TextPrimitive,
};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame` and replay its
/// commands in order, so drawing code stays isolated from viewport and
/// interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
