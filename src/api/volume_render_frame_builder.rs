use crate::core::bar::max_volume;
use crate::render::{LayeredFrame, RectPrimitive, RenderLayer, Renderer};

use super::render_frame_builder::FrameScene;
use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    /// Volume bars in the band under the price area, scaled to the window max.
    pub(super) fn append_volume_primitives(layered: &mut LayeredFrame, scene: &FrameScene<'_>) {
        let visible = scene.visible_bars();
        let Some(max) = max_volume(visible).filter(|max| *max > 0.0) else {
            return;
        };
        let layout = scene.layout;
        let window = *scene.mapper.window();
        let style = scene.style;
        let band_height = layout.volume_height();

        for (offset, bar) in visible.iter().enumerate() {
            if !bar.volume.is_finite() || bar.volume <= 0.0 {
                continue;
            }
            let height = bar.volume / max * band_height;
            let x = scene.mapper.bar_index_to_pixel_x(window.start_index + offset);
            let color = if bar.is_bullish() {
                style.candle_up_color
            } else {
                style.candle_down_color
            };
            layered.push_rect(
                RenderLayer::Volume,
                RectPrimitive::new(
                    x - window.body_pixel_width / 2.0,
                    layout.plot_bottom - height,
                    window.body_pixel_width,
                    height,
                    color.with_alpha(style.volume_alpha),
                ),
            );
        }
    }
}
