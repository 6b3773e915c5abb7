use crate::render::{
    LayeredFrame, LinePrimitive, RectPrimitive, RenderLayer, Renderer, TextHAlign, TextPrimitive,
};

use super::render_frame_builder::FrameScene;
use super::ChartEngine;

const BADGE_PADDING_PX: f64 = 4.0;
const BADGE_CORNER_RADIUS_PX: f64 = 3.0;

impl<R: Renderer> ChartEngine<R> {
    /// Dashed live-price line plus a badge in the price gutter.
    ///
    /// The line is only drawn while the price is inside the price area; the
    /// badge is clamped into it and carries an arrow pointing at an
    /// off-screen price.
    pub(super) fn append_live_price_primitives(
        &self,
        layered: &mut LayeredFrame,
        scene: &FrameScene<'_>,
        price: f64,
    ) {
        if !price.is_finite() {
            return;
        }
        let layout = scene.layout;
        let style = scene.style;
        let rising = self
            .core
            .bars
            .last()
            .is_none_or(|bar| price >= bar.open);
        let color = if rising {
            style.live_price_up_color
        } else {
            style.live_price_down_color
        };

        let y = scene.mapper.price_to_pixel_y(price);
        if scene.mapper.is_price_visible(price) {
            layered.push_line(
                RenderLayer::LivePrice,
                LinePrimitive::new(
                    layout.chart_left,
                    y,
                    layout.chart_right,
                    y,
                    scene.px(style.live_price_line_width),
                    color,
                )
                .with_stroke_style(style.live_price_stroke_style),
            );
        }

        let formatted = self.formatter.format_price(price);
        let text = if y < layout.chart_top {
            format!("▲ {formatted}")
        } else if y > layout.chart_bottom {
            format!("▼ {formatted}")
        } else {
            formatted
        };
        let font_size = scene.px(style.badge_font_size_px);
        let padding = scene.px(BADGE_PADDING_PX);
        let badge_height = font_size + 2.0 * padding;
        let badge_y = (y - badge_height / 2.0)
            .min(layout.chart_bottom - badge_height)
            .max(layout.chart_top);
        let gutter_width = layout.surface_width - layout.chart_right;

        layered.push_rect(
            RenderLayer::LivePrice,
            RectPrimitive::new(layout.chart_right, badge_y, gutter_width, badge_height, color)
                .with_corner_radius(scene.px(BADGE_CORNER_RADIUS_PX)),
        );
        layered.push_text(
            RenderLayer::LivePrice,
            TextPrimitive::new(
                text,
                layout.chart_right + padding,
                badge_y + padding,
                font_size,
                style.live_price_badge_text_color,
                TextHAlign::Left,
            ),
        );

        let Some(supply) = self
            .core
            .config
            .circulating_supply
            .filter(|supply| supply.is_finite() && *supply > 0.0)
        else {
            return;
        };
        let market_cap_y =
            (badge_y + badge_height + padding / 2.0).min(layout.surface_height - font_size);
        layered.push_text(
            RenderLayer::LivePrice,
            TextPrimitive::new(
                format!("MC {}", self.formatter.format_large_number(price * supply)),
                layout.chart_right + padding,
                market_cap_y,
                font_size,
                style.market_cap_text_color,
                TextHAlign::Left,
            ),
        );
    }
}
