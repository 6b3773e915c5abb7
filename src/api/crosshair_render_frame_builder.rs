use crate::interaction::Crosshair;
use crate::render::{
    LayeredFrame, LinePrimitive, RectPrimitive, RenderLayer, Renderer, TextHAlign, TextPrimitive,
};

use super::render_frame_builder::{FrameScene, estimate_text_width_px};
use super::time_label_format::format_crosshair_time;
use super::ChartEngine;

const LABEL_PADDING_PX: f64 = 4.0;
const PANEL_MARGIN_PX: f64 = 6.0;

impl<R: Renderer> ChartEngine<R> {
    pub(super) fn append_crosshair_primitives(
        &self,
        layered: &mut LayeredFrame,
        scene: &FrameScene<'_>,
        crosshair: &Crosshair,
    ) {
        let layout = scene.layout;
        let style = scene.style;
        let line_width = scene.px(style.crosshair_line_width);
        let font_size = scene.px(style.axis_label_font_size_px);
        let padding = scene.px(LABEL_PADDING_PX);
        let label_height = font_size + 2.0 * padding;

        layered.push_line(
            RenderLayer::Crosshair,
            LinePrimitive::new(
                crosshair.pixel_x,
                layout.chart_top,
                crosshair.pixel_x,
                layout.plot_bottom,
                line_width,
                style.crosshair_line_color,
            )
            .with_stroke_style(style.crosshair_stroke_style),
        );
        layered.push_line(
            RenderLayer::Crosshair,
            LinePrimitive::new(
                layout.chart_left,
                crosshair.pixel_y,
                layout.chart_right,
                crosshair.pixel_y,
                line_width,
                style.crosshair_line_color,
            )
            .with_stroke_style(style.crosshair_stroke_style),
        );

        // Price badge in the gutter.
        let price_y = (crosshair.pixel_y - label_height / 2.0)
            .min(layout.chart_bottom - label_height)
            .max(layout.chart_top);
        layered.push_rect(
            RenderLayer::Crosshair,
            RectPrimitive::new(
                layout.chart_right,
                price_y,
                layout.surface_width - layout.chart_right,
                label_height,
                style.crosshair_label_box_color,
            ),
        );
        layered.push_text(
            RenderLayer::Crosshair,
            TextPrimitive::new(
                self.formatter.format_price(crosshair.price),
                layout.chart_right + padding,
                price_y + padding,
                font_size,
                style.crosshair_label_text_color,
                TextHAlign::Left,
            ),
        );

        // Time badge in the time gutter.
        let time_text =
            format_crosshair_time(crosshair.bar.time, self.core.timeframe.label_granularity());
        let time_width = estimate_text_width_px(&time_text, font_size) + 2.0 * padding;
        let time_x = (crosshair.pixel_x - time_width / 2.0)
            .min(layout.chart_right - time_width)
            .max(layout.chart_left);
        layered.push_rect(
            RenderLayer::Crosshair,
            RectPrimitive::new(
                time_x,
                layout.plot_bottom,
                time_width,
                label_height,
                style.crosshair_label_box_color,
            ),
        );
        layered.push_text(
            RenderLayer::Crosshair,
            TextPrimitive::new(
                time_text,
                time_x + time_width / 2.0,
                layout.plot_bottom + padding,
                font_size,
                style.crosshair_label_text_color,
                TextHAlign::Center,
            ),
        );

        self.append_ohlcv_panel(layered, scene, crosshair);
    }

    /// OHLCV readout for the snapped bar, pinned to the top-left corner.
    fn append_ohlcv_panel(
        &self,
        layered: &mut LayeredFrame,
        scene: &FrameScene<'_>,
        crosshair: &Crosshair,
    ) {
        let layout = scene.layout;
        let style = scene.style;
        let bar = crosshair.bar;
        let text = format!(
            "O {}  H {}  L {}  C {}  V {}",
            self.formatter.format_price(bar.open),
            self.formatter.format_price(bar.high),
            self.formatter.format_price(bar.low),
            self.formatter.format_price(bar.close),
            self.formatter.format_large_number(bar.volume),
        );
        let font_size = scene.px(style.axis_label_font_size_px);
        let padding = scene.px(LABEL_PADDING_PX);
        let margin = scene.px(PANEL_MARGIN_PX);
        let width = (estimate_text_width_px(&text, font_size) + 2.0 * padding)
            .min(layout.chart_width() - margin);
        let x = layout.chart_left + margin;
        let y = layout.chart_top + margin;

        layered.push_rect(
            RenderLayer::Crosshair,
            RectPrimitive::new(
                x,
                y,
                width.max(0.0),
                font_size + 2.0 * padding,
                style.ohlc_panel_background_color,
            ),
        );
        layered.push_text(
            RenderLayer::Crosshair,
            TextPrimitive::new(
                text,
                x + padding,
                y + padding,
                font_size,
                style.ohlc_panel_text_color,
                TextHAlign::Left,
            ),
        );
    }
}
