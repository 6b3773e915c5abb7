use crate::render::{LayeredFrame, LinePrimitive, RenderLayer, Renderer, TextHAlign, TextPrimitive};

use super::render_frame_builder::{FrameScene, estimate_text_width_px};
use super::time_label_format::format_time_axis_label;
use super::ChartEngine;

const MIN_TIME_LABELS: f64 = 3.0;
const MAX_TIME_LABELS: f64 = 7.0;
const AXIS_LABEL_PADDING_PX: f64 = 6.0;
const TIME_LABEL_GAP_PX: f64 = 8.0;

impl<R: Renderer> ChartEngine<R> {
    pub(super) fn append_price_grid_primitives(
        &self,
        layered: &mut LayeredFrame,
        scene: &FrameScene<'_>,
    ) {
        let layout = scene.layout;
        let font_size = scene.px(scene.style.axis_label_font_size_px);
        let levels = Self::append_grid_lines(layered, layout, scene.style);
        for y in levels {
            let price = scene.mapper.pixel_y_to_price(y);
            let label_y = (y - font_size / 2.0).clamp(0.0, layout.surface_height - font_size);
            layered.push_text(
                RenderLayer::Grid,
                TextPrimitive::new(
                    self.formatter.format_price(price),
                    layout.chart_right + scene.px(AXIS_LABEL_PADDING_PX),
                    label_y,
                    font_size,
                    scene.style.axis_label_color,
                    TextHAlign::Left,
                ),
            );
        }
    }

    /// Time labels at a stride aligned to absolute bar indices, so labels do
    /// not jitter while panning. The newest visible bar is always labelled.
    pub(super) fn append_time_axis_primitives(
        &self,
        layered: &mut LayeredFrame,
        scene: &FrameScene<'_>,
    ) {
        let window = *scene.mapper.window();
        if window.is_empty() {
            return;
        }
        let layout = scene.layout;
        let style = scene.style;
        let granularity = self.core.timeframe.label_granularity();
        let font_size = scene.px(style.axis_label_font_size_px);
        let label_y = layout.plot_bottom + scene.px(AXIS_LABEL_PADDING_PX);

        let chart_width_logical = layout.chart_width() / layout.device_pixel_ratio;
        let target = (chart_width_logical / style.time_label_spacing_px)
            .floor()
            .clamp(MIN_TIME_LABELS, MAX_TIME_LABELS);
        let step = ((window.visible_count as f64 / target).ceil() as usize).max(1);

        let newest = window.end_index - 1;
        let Some(newest_bar) = scene.bars.get(newest) else {
            return;
        };
        let newest_text = format_time_axis_label(newest_bar.time, granularity);
        let newest_x = scene.mapper.bar_index_to_pixel_x(newest);
        let newest_half_width = estimate_text_width_px(&newest_text, font_size) / 2.0;
        let gap = scene.px(TIME_LABEL_GAP_PX);

        let first_aligned = window.start_index.div_ceil(step) * step;
        let mut previous_right = f64::NEG_INFINITY;
        for index in (first_aligned..newest).step_by(step) {
            let Some(bar) = scene.bars.get(index) else {
                continue;
            };
            let x = scene.mapper.bar_index_to_pixel_x(index);
            if x < layout.chart_left || x > layout.chart_right {
                continue;
            }
            let text = format_time_axis_label(bar.time, granularity);
            let half_width = estimate_text_width_px(&text, font_size) / 2.0;
            let overlaps_newest = x + half_width + gap > newest_x - newest_half_width;
            let overlaps_previous = x - half_width < previous_right + gap;
            if overlaps_newest || overlaps_previous {
                continue;
            }
            previous_right = x + half_width;
            Self::push_time_label(layered, scene, x, label_y, text, font_size);
        }
        Self::push_time_label(layered, scene, newest_x, label_y, newest_text, font_size);
    }

    fn push_time_label(
        layered: &mut LayeredFrame,
        scene: &FrameScene<'_>,
        x: f64,
        y: f64,
        text: String,
        font_size: f64,
    ) {
        let layout = scene.layout;
        layered.push_line(
            RenderLayer::TimeAxis,
            LinePrimitive::new(
                x,
                layout.chart_top,
                x,
                layout.plot_bottom,
                scene.px(scene.style.grid_line_width),
                scene.style.grid_line_color,
            ),
        );
        layered.push_text(
            RenderLayer::TimeAxis,
            TextPrimitive::new(
                text,
                x,
                y,
                font_size,
                scene.style.axis_label_color,
                TextHAlign::Center,
            ),
        );
    }
}
