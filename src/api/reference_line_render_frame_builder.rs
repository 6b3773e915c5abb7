use crate::core::bar::max_high;
use crate::render::{
    Color, LayeredFrame, LinePrimitive, RenderLayer, Renderer, TextHAlign, TextPrimitive,
};

use super::render_frame_builder::FrameScene;
use super::ChartEngine;

/// Local high within this share of the ATH is not drawn separately.
const LOCAL_HIGH_SUPPRESSION_RATIO: f64 = 0.005;
const LABEL_PADDING_PX: f64 = 4.0;

impl<R: Renderer> ChartEngine<R> {
    /// All-time-high value used for the reference line: the collaborator's
    /// figure when known, otherwise the highest loaded bar.
    #[must_use]
    pub fn all_time_high(&self) -> Option<f64> {
        self.core
            .feed
            .ath_price
            .filter(|price| price.is_finite() && *price > 0.0)
            .or_else(|| max_high(&self.core.bars))
    }

    pub(super) fn append_reference_line_primitives(
        &self,
        layered: &mut LayeredFrame,
        scene: &FrameScene<'_>,
    ) {
        let ath = self.all_time_high();
        if let Some(ath) = ath {
            self.push_reference_line(layered, scene, "ATH", ath, scene.style.ath_line_color);
        }

        let Some(local_high) = max_high(scene.visible_bars()) else {
            return;
        };
        let near_ath = ath.is_some_and(|ath| {
            ath > 0.0 && ((local_high - ath) / ath).abs() <= LOCAL_HIGH_SUPPRESSION_RATIO
        });
        if !near_ath {
            self.push_reference_line(
                layered,
                scene,
                "High",
                local_high,
                scene.style.local_high_line_color,
            );
        }
    }

    fn push_reference_line(
        &self,
        layered: &mut LayeredFrame,
        scene: &FrameScene<'_>,
        caption: &str,
        price: f64,
        color: Color,
    ) {
        if !scene.mapper.is_price_visible(price) {
            return;
        }
        let layout = scene.layout;
        let style = scene.style;
        let y = scene.mapper.price_to_pixel_y(price);
        layered.push_line(
            RenderLayer::ReferenceLines,
            LinePrimitive::new(
                layout.chart_left,
                y,
                layout.chart_right,
                y,
                scene.px(style.reference_line_width),
                color,
            )
            .with_stroke_style(style.reference_stroke_style),
        );

        let font_size = scene.px(style.axis_label_font_size_px);
        let padding = scene.px(LABEL_PADDING_PX);
        let label_y = (y - font_size - padding).max(layout.chart_top);
        layered.push_text(
            RenderLayer::ReferenceLines,
            TextPrimitive::new(
                format!("{caption} {}", self.formatter.format_price(price)),
                layout.chart_left + padding,
                label_y,
                font_size,
                color,
                TextHAlign::Left,
            ),
        );
    }
}
