use tracing::trace;

use crate::core::{Bar, CoordinateMapper, Layout, ZoneOverlay, aggregate_zones};
use crate::error::ChartResult;
use crate::render::{
    LayeredFrame, LinePrimitive, RectPrimitive, RenderFrame, RenderLayer, Renderer, TextHAlign,
    TextPrimitive,
};

use super::{ChartEngine, RenderStyle, SeriesKind};

/// Horizontal price levels drawn across the plot.
pub(super) const GRID_LEVELS: usize = 5;
const TEXT_WIDTH_PER_CHAR_EM: f64 = 0.6;

/// Per-frame inputs shared by every sub-builder.
pub(super) struct FrameScene<'a> {
    pub(super) layout: Layout,
    pub(super) mapper: CoordinateMapper,
    pub(super) bars: &'a [Bar],
    pub(super) style: RenderStyle,
}

impl FrameScene<'_> {
    /// Bars inside the visible window.
    pub(super) fn visible_bars(&self) -> &[Bar] {
        self.bars.get(self.mapper.window().range()).unwrap_or(&[])
    }

    /// Logical size scaled to device pixels.
    pub(super) fn px(&self, logical: f64) -> f64 {
        logical * self.layout.device_pixel_ratio
    }
}

/// Rough text advance used to size badges without a text backend.
pub(super) fn estimate_text_width_px(text: &str, font_size_px: f64) -> f64 {
    text.chars().count() as f64 * font_size_px * TEXT_WIDTH_PER_CHAR_EM
}

impl<R: Renderer> ChartEngine<R> {
    /// Builds the layered draw list for the current state without drawing it.
    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        let surface = self.core.config.surface;
        if !self.core.config.mode.is_native() {
            return Ok(RenderFrame::new(surface));
        }

        let layout = self.core.layout;
        let style = self.core.style;
        let mut layered = LayeredFrame::new();
        layered.push_rect(
            RenderLayer::Background,
            RectPrimitive::new(
                0.0,
                0.0,
                layout.surface_width,
                layout.surface_height,
                style.background_color,
            ),
        );

        let Some(mapper) = self.coordinate_mapper() else {
            self.append_empty_state_primitives(&mut layered, layout, style);
            let frame = layered.into_frame(surface);
            frame.validate()?;
            return Ok(frame);
        };
        let scene = FrameScene {
            layout,
            mapper,
            bars: &self.core.bars,
            style,
        };

        self.append_price_grid_primitives(&mut layered, &scene);
        self.append_time_axis_primitives(&mut layered, &scene);

        let zones = self
            .core
            .config
            .show_zone_overlay
            .then(|| aggregate_zones(&self.core.bars, &mapper, &self.core.config.zones));
        if let Some(overlay) = &zones {
            Self::append_zone_background_primitives(&mut layered, &scene, overlay);
        }

        match self.core.config.series_kind {
            SeriesKind::Candles => Self::append_candlestick_primitives(&mut layered, &scene),
            SeriesKind::Line => Self::append_line_series_primitives(&mut layered, &scene),
        }
        if self.core.config.show_volume {
            Self::append_volume_primitives(&mut layered, &scene);
        }
        if let Some(price) = self.core.live_price {
            self.append_live_price_primitives(&mut layered, &scene, price);
        }
        if self.core.config.show_reference_lines {
            self.append_reference_line_primitives(&mut layered, &scene);
        }
        if let Some(overlay) = &zones {
            Self::append_zone_label_primitives(&mut layered, &scene, overlay);
        }
        if let Some(crosshair) = self.crosshair() {
            self.append_crosshair_primitives(&mut layered, &scene, &crosshair);
        }

        let frame = layered.into_frame(surface);
        frame.validate()?;
        trace!(
            commands = frame.len(),
            start_index = mapper.window().start_index,
            end_index = mapper.window().end_index,
            "built render frame"
        );
        Ok(frame)
    }

    /// Zone overlay for the current window, or `None` while disabled.
    #[must_use]
    pub fn zone_overlay(&self) -> Option<ZoneOverlay> {
        if !self.core.config.show_zone_overlay {
            return None;
        }
        let mapper = self.coordinate_mapper()?;
        Some(aggregate_zones(
            &self.core.bars,
            &mapper,
            &self.core.config.zones,
        ))
    }

    fn append_empty_state_primitives(
        &self,
        layered: &mut LayeredFrame,
        layout: Layout,
        style: RenderStyle,
    ) {
        Self::append_grid_lines(layered, layout, style);
        let message = if self.core.feed.loading {
            "Loading…"
        } else {
            "No data"
        };
        let font_size = style.empty_state_font_size_px * layout.device_pixel_ratio;
        layered.push_text(
            RenderLayer::Grid,
            TextPrimitive::new(
                message,
                (layout.chart_left + layout.chart_right) / 2.0,
                (layout.chart_top + layout.plot_bottom) / 2.0 - font_size / 2.0,
                font_size,
                style.empty_state_text_color,
                TextHAlign::Center,
            ),
        );
    }

    /// Evenly spaced horizontal grid lines; returns their Y positions.
    pub(super) fn append_grid_lines(
        layered: &mut LayeredFrame,
        layout: Layout,
        style: RenderStyle,
    ) -> [f64; GRID_LEVELS] {
        let mut levels = [0.0; GRID_LEVELS];
        let step = layout.chart_height() / (GRID_LEVELS - 1) as f64;
        for (index, y) in levels.iter_mut().enumerate() {
            *y = layout.chart_top + index as f64 * step;
            layered.push_line(
                RenderLayer::Grid,
                LinePrimitive::new(
                    layout.chart_left,
                    *y,
                    layout.chart_right,
                    *y,
                    style.grid_line_width * layout.device_pixel_ratio,
                    style.grid_line_color,
                ),
            );
        }
        levels
    }
}
