use crate::render::{Color, LineStrokeStyle};

/// Style contract for the current render frame. Sizes are logical pixels and
/// get multiplied by the device pixel ratio at draw time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub background_color: Color,
    pub grid_line_color: Color,
    pub axis_label_color: Color,
    pub candle_up_color: Color,
    pub candle_down_color: Color,
    pub line_up_color: Color,
    pub line_down_color: Color,
    /// Alpha of the gradient under the line series at its top edge.
    pub line_fill_alpha: f64,
    pub volume_alpha: f64,
    pub live_price_up_color: Color,
    pub live_price_down_color: Color,
    pub live_price_badge_text_color: Color,
    pub live_price_stroke_style: LineStrokeStyle,
    pub market_cap_text_color: Color,
    pub ath_line_color: Color,
    pub local_high_line_color: Color,
    pub reference_stroke_style: LineStrokeStyle,
    pub zone_bullish_color: Color,
    pub zone_bearish_color: Color,
    pub zone_neutral_color: Color,
    /// Background alpha at full zone intensity.
    pub zone_max_alpha: f64,
    pub zone_label_background_color: Color,
    pub zone_label_text_color: Color,
    pub crosshair_line_color: Color,
    pub crosshair_stroke_style: LineStrokeStyle,
    pub crosshair_label_box_color: Color,
    pub crosshair_label_text_color: Color,
    pub ohlc_panel_background_color: Color,
    pub ohlc_panel_text_color: Color,
    pub empty_state_text_color: Color,
    pub grid_line_width: f64,
    pub wick_width: f64,
    pub line_series_width: f64,
    pub line_glow_width: f64,
    pub live_price_line_width: f64,
    pub reference_line_width: f64,
    pub crosshair_line_width: f64,
    pub axis_label_font_size_px: f64,
    pub badge_font_size_px: f64,
    pub empty_state_font_size_px: f64,
    /// Offset of zone badges below the chart top.
    pub zone_label_offset_px: f64,
    /// Minimum spacing between time-axis labels.
    pub time_label_spacing_px: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background_color: Color::rgb(0.055, 0.063, 0.086),
            grid_line_color: Color::rgba(1.0, 1.0, 1.0, 0.06),
            axis_label_color: Color::rgba(0.82, 0.84, 0.88, 0.85),
            candle_up_color: Color::rgb(0.149, 0.651, 0.604),
            candle_down_color: Color::rgb(0.937, 0.325, 0.314),
            line_up_color: Color::rgb(0.133, 0.773, 0.369),
            line_down_color: Color::rgb(0.937, 0.267, 0.267),
            line_fill_alpha: 0.28,
            volume_alpha: 0.35,
            live_price_up_color: Color::rgb(0.133, 0.773, 0.369),
            live_price_down_color: Color::rgb(0.937, 0.267, 0.267),
            live_price_badge_text_color: Color::rgb(1.0, 1.0, 1.0),
            live_price_stroke_style: LineStrokeStyle::Dashed {
                dash_px: 4.0,
                gap_px: 4.0,
            },
            market_cap_text_color: Color::rgba(0.82, 0.84, 0.88, 0.85),
            ath_line_color: Color::rgba(0.984, 0.749, 0.141, 0.8),
            local_high_line_color: Color::rgba(0.576, 0.773, 0.992, 0.7),
            reference_stroke_style: LineStrokeStyle::Dashed {
                dash_px: 2.0,
                gap_px: 3.0,
            },
            zone_bullish_color: Color::rgb(0.133, 0.773, 0.369),
            zone_bearish_color: Color::rgb(0.937, 0.267, 0.267),
            zone_neutral_color: Color::rgb(0.580, 0.639, 0.722),
            zone_max_alpha: 0.14,
            zone_label_background_color: Color::rgba(0.0, 0.0, 0.0, 0.55),
            zone_label_text_color: Color::rgb(1.0, 1.0, 1.0),
            crosshair_line_color: Color::rgba(1.0, 1.0, 1.0, 0.35),
            crosshair_stroke_style: LineStrokeStyle::Dashed {
                dash_px: 3.0,
                gap_px: 3.0,
            },
            crosshair_label_box_color: Color::rgb(0.216, 0.255, 0.318),
            crosshair_label_text_color: Color::rgb(1.0, 1.0, 1.0),
            ohlc_panel_background_color: Color::rgba(0.0, 0.0, 0.0, 0.45),
            ohlc_panel_text_color: Color::rgba(0.9, 0.91, 0.93, 1.0),
            empty_state_text_color: Color::rgba(0.82, 0.84, 0.88, 0.7),
            grid_line_width: 1.0,
            wick_width: 1.0,
            line_series_width: 2.0,
            line_glow_width: 4.0,
            live_price_line_width: 1.0,
            reference_line_width: 1.0,
            crosshair_line_width: 1.0,
            axis_label_font_size_px: 11.0,
            badge_font_size_px: 11.0,
            empty_state_font_size_px: 14.0,
            zone_label_offset_px: 8.0,
            time_label_spacing_px: 140.0,
        }
    }
}
