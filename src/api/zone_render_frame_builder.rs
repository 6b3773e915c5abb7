use crate::core::{ZoneKind, ZoneOverlay};
use crate::render::{
    Color, LayeredFrame, LinePrimitive, RectPrimitive, RenderLayer, Renderer, TextHAlign,
    TextPrimitive,
};

use super::render_frame_builder::{FrameScene, estimate_text_width_px};
use super::{ChartEngine, RenderStyle};

const BADGE_PADDING_PX: f64 = 4.0;
const BADGE_CORNER_RADIUS_PX: f64 = 3.0;
const RANGE_LINE_GAP_PX: f64 = 3.0;

fn zone_color(kind: ZoneKind, style: &RenderStyle) -> Color {
    match kind {
        ZoneKind::Bullish => style.zone_bullish_color,
        ZoneKind::Bearish => style.zone_bearish_color,
        ZoneKind::Neutral => style.zone_neutral_color,
    }
}

impl<R: Renderer> ChartEngine<R> {
    /// Translucent band per zone behind the series.
    pub(super) fn append_zone_background_primitives(
        layered: &mut LayeredFrame,
        scene: &FrameScene<'_>,
        overlay: &ZoneOverlay,
    ) {
        let layout = scene.layout;
        for zone in &overlay.zones {
            let left = zone.start_pixel_x.max(layout.chart_left);
            let right = zone.end_pixel_x.min(layout.chart_right);
            if right <= left {
                continue;
            }
            let alpha = zone.intensity * scene.style.zone_max_alpha;
            layered.push_rect(
                RenderLayer::ZoneBackground,
                RectPrimitive::new(
                    left,
                    layout.chart_top,
                    right - left,
                    layout.chart_height(),
                    zone_color(zone.kind, &scene.style).with_alpha(alpha),
                ),
            );
        }
    }

    /// Coverage/change badge per zone, skipped when its centre is off-chart.
    /// Merged zones also get a range line spanning their width.
    pub(super) fn append_zone_label_primitives(
        layered: &mut LayeredFrame,
        scene: &FrameScene<'_>,
        overlay: &ZoneOverlay,
    ) {
        let layout = scene.layout;
        let style = scene.style;
        let font_size = scene.px(style.badge_font_size_px);
        let padding = scene.px(BADGE_PADDING_PX);
        let badge_y = layout.chart_top + scene.px(style.zone_label_offset_px);
        let badge_height = font_size + 2.0 * padding;

        for zone in &overlay.zones {
            let center = zone.center_x();
            if center < layout.chart_left || center > layout.chart_right {
                continue;
            }
            let text = format!(
                "{:.0}% {:+.2}%",
                overlay.coverage_percent(zone),
                zone.change_percent()
            );
            let badge_width = estimate_text_width_px(&text, font_size) + 2.0 * padding;
            layered.push_rect(
                RenderLayer::ZoneLabels,
                RectPrimitive::new(
                    center - badge_width / 2.0,
                    badge_y,
                    badge_width,
                    badge_height,
                    style.zone_label_background_color,
                )
                .with_corner_radius(scene.px(BADGE_CORNER_RADIUS_PX)),
            );
            layered.push_text(
                RenderLayer::ZoneLabels,
                TextPrimitive::new(
                    text,
                    center,
                    badge_y + padding,
                    font_size,
                    style.zone_label_text_color,
                    TextHAlign::Center,
                ),
            );

            if zone.segment_count > 1 {
                let y = badge_y + badge_height + scene.px(RANGE_LINE_GAP_PX);
                layered.push_line(
                    RenderLayer::ZoneLabels,
                    LinePrimitive::new(
                        zone.start_pixel_x.max(layout.chart_left),
                        y,
                        zone.end_pixel_x.min(layout.chart_right),
                        y,
                        scene.px(1.0),
                        zone_color(zone.kind, &style),
                    ),
                );
            }
        }
    }
}
