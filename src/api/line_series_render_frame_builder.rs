use crate::render::{ClipRect, LayeredFrame, PathGradientFill, PathPrimitive, RenderLayer, Renderer};

use super::render_frame_builder::FrameScene;
use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    /// Close-price line smoothed through segment midpoints, with a gradient
    /// fill down to the price-area bottom. Coloured by the window's net trend.
    pub(super) fn append_line_series_primitives(layered: &mut LayeredFrame, scene: &FrameScene<'_>) {
        let visible = scene.visible_bars();
        let (Some(first), Some(last)) = (visible.first(), visible.last()) else {
            return;
        };
        let layout = scene.layout;
        let style = scene.style;
        let start_index = scene.mapper.window().start_index;
        let points: Vec<(f64, f64)> = visible
            .iter()
            .enumerate()
            .map(|(offset, bar)| {
                (
                    scene.mapper.bar_index_to_pixel_x(start_index + offset),
                    scene.mapper.price_to_pixel_y(bar.close),
                )
            })
            .collect();

        let color = if last.close >= first.close {
            style.line_up_color
        } else {
            style.line_down_color
        };
        let (start_x, start_y) = points[0];
        let mut path = PathPrimitive::new(start_x, start_y, scene.px(style.line_series_width), color)
            .with_fill(PathGradientFill {
                baseline_y: layout.chart_bottom,
                top_color: color.with_alpha(style.line_fill_alpha),
                bottom_color: color.with_alpha(0.0),
            })
            .with_glow(scene.px(style.line_glow_width));
        for pair in points.windows(2).skip(1) {
            let (cx, cy) = pair[0];
            let (nx, ny) = pair[1];
            path.quad_to(cx, cy, (cx + nx) / 2.0, (cy + ny) / 2.0);
        }
        if let Some(&(x, y)) = points.last().filter(|_| points.len() > 1) {
            path.line_to(x, y);
        }

        layered.push_clip(
            RenderLayer::Series,
            ClipRect::new(
                layout.chart_left,
                layout.chart_top,
                layout.chart_width(),
                layout.chart_height(),
            ),
        );
        layered.push_path(RenderLayer::Series, path);
        layered.pop_clip(RenderLayer::Series);
    }
}
