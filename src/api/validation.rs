use crate::error::{ChartError, ChartResult};

use super::RenderStyle;

pub(super) fn validate_render_style(style: RenderStyle) -> ChartResult<RenderStyle> {
    for color in [
        style.background_color,
        style.grid_line_color,
        style.axis_label_color,
        style.candle_up_color,
        style.candle_down_color,
        style.line_up_color,
        style.line_down_color,
        style.live_price_up_color,
        style.live_price_down_color,
        style.live_price_badge_text_color,
        style.market_cap_text_color,
        style.ath_line_color,
        style.local_high_line_color,
        style.zone_bullish_color,
        style.zone_bearish_color,
        style.zone_neutral_color,
        style.zone_label_background_color,
        style.zone_label_text_color,
        style.crosshair_line_color,
        style.crosshair_label_box_color,
        style.crosshair_label_text_color,
        style.ohlc_panel_background_color,
        style.ohlc_panel_text_color,
        style.empty_state_text_color,
    ] {
        color.validate()?;
    }

    for (name, value) in [
        ("line_fill_alpha", style.line_fill_alpha),
        ("volume_alpha", style.volume_alpha),
        ("zone_max_alpha", style.zone_max_alpha),
    ] {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(ChartError::InvalidData(format!(
                "render style `{name}` must be in [0, 1]"
            )));
        }
    }

    for (name, value) in [
        ("grid_line_width", style.grid_line_width),
        ("wick_width", style.wick_width),
        ("line_series_width", style.line_series_width),
        ("live_price_line_width", style.live_price_line_width),
        ("reference_line_width", style.reference_line_width),
        ("crosshair_line_width", style.crosshair_line_width),
        ("axis_label_font_size_px", style.axis_label_font_size_px),
        ("badge_font_size_px", style.badge_font_size_px),
        ("empty_state_font_size_px", style.empty_state_font_size_px),
        ("time_label_spacing_px", style.time_label_spacing_px),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "render style `{name}` must be finite and > 0"
            )));
        }
    }

    for (name, value) in [
        ("line_glow_width", style.line_glow_width),
        ("zone_label_offset_px", style.zone_label_offset_px),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "render style `{name}` must be finite and >= 0"
            )));
        }
    }

    Ok(style)
}

#[cfg(test)]
mod tests {
    use super::validate_render_style;
    use crate::api::RenderStyle;

    #[test]
    fn default_style_is_valid() {
        assert!(validate_render_style(RenderStyle::default()).is_ok());
    }

    #[test]
    fn zero_font_size_is_rejected() {
        let style = RenderStyle {
            axis_label_font_size_px: 0.0,
            ..RenderStyle::default()
        };
        assert!(validate_render_style(style).is_err());
    }
}
