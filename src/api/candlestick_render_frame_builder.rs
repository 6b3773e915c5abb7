use crate::render::{ClipRect, LayeredFrame, LinePrimitive, RectPrimitive, RenderLayer, Renderer};

use super::render_frame_builder::FrameScene;
use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    /// Wick and body per visible bar, clipped to the price area.
    pub(super) fn append_candlestick_primitives(layered: &mut LayeredFrame, scene: &FrameScene<'_>) {
        let layout = scene.layout;
        let window = *scene.mapper.window();
        let style = scene.style;
        let wick_width = scene.px(style.wick_width).min(window.candle_pixel_width).max(0.5);
        let min_body_height = scene.px(1.0);

        layered.push_clip(
            RenderLayer::Series,
            ClipRect::new(
                layout.chart_left,
                layout.chart_top,
                layout.chart_width(),
                layout.chart_height(),
            ),
        );
        for (offset, bar) in scene.visible_bars().iter().enumerate() {
            let index = window.start_index + offset;
            let x = scene.mapper.bar_index_to_pixel_x(index);
            let color = if bar.is_bullish() {
                style.candle_up_color
            } else {
                style.candle_down_color
            };

            let high_y = scene.mapper.price_to_pixel_y(bar.high);
            let low_y = scene.mapper.price_to_pixel_y(bar.low);
            layered.push_line(
                RenderLayer::Series,
                LinePrimitive::new(x, high_y, x, low_y, wick_width, color),
            );

            let open_y = scene.mapper.price_to_pixel_y(bar.open);
            let close_y = scene.mapper.price_to_pixel_y(bar.close);
            let top = open_y.min(close_y);
            let height = (open_y - close_y).abs().max(min_body_height);
            layered.push_rect(
                RenderLayer::Series,
                RectPrimitive::new(
                    x - window.body_pixel_width / 2.0,
                    top,
                    window.body_pixel_width,
                    height,
                    color,
                ),
            );
        }
        layered.pop_clip(RenderLayer::Series);
    }
}
