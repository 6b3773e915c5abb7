use serde::{Deserialize, Serialize};

use crate::core::{PixelPoint, SurfaceSize};
use crate::error::{ChartError, ChartResult};

/// Fixed padding constants in logical (CSS) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub top_margin: f64,
    pub left_margin: f64,
    pub price_axis_width: f64,
    pub time_axis_height: f64,
    /// Share of the plot height reserved for volume bars.
    pub volume_band_fraction: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            top_margin: 16.0,
            left_margin: 8.0,
            price_axis_width: 72.0,
            time_axis_height: 26.0,
            volume_band_fraction: 0.18,
        }
    }
}

impl LayoutConfig {
    pub fn validate(self) -> ChartResult<Self> {
        for (name, value) in [
            ("top_margin", self.top_margin),
            ("left_margin", self.left_margin),
            ("price_axis_width", self.price_axis_width),
            ("time_axis_height", self.time_axis_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "layout `{name}` must be finite and >= 0"
                )));
            }
        }
        if !self.volume_band_fraction.is_finite() || !(0.0..0.9).contains(&self.volume_band_fraction)
        {
            return Err(ChartError::InvalidConfig(
                "layout volume band fraction must be in [0, 0.9)".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Region of the surface a pointer falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerRegion {
    Chart,
    PriceAxis,
    TimeAxis,
    Outside,
}

/// Pixel geometry of one draw, in device pixels.
///
/// ```text
///  top margin
///  +-----------------------------+--------+
///  | price area                  | price  |
///  |                             | gutter |
///  +-----------------------------+        |
///  | volume band                 |        |
///  +-----------------------------+--------+
///  | time gutter                 |        |
///  +-----------------------------+--------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub surface_width: f64,
    pub surface_height: f64,
    pub device_pixel_ratio: f64,
    pub chart_left: f64,
    pub chart_right: f64,
    pub chart_top: f64,
    /// Bottom of the price area, top of the volume band.
    pub chart_bottom: f64,
    /// Bottom of the volume band, top of the time gutter.
    pub plot_bottom: f64,
}

impl Layout {
    pub fn new(surface: SurfaceSize, config: LayoutConfig) -> ChartResult<Self> {
        let surface = surface.validate()?;
        let config = config.validate()?;
        let ratio = surface.device_pixel_ratio;
        let surface_width = surface.pixel_width();
        let surface_height = surface.pixel_height();

        let chart_left = config.left_margin * ratio;
        let chart_right = surface_width - config.price_axis_width * ratio;
        let chart_top = config.top_margin * ratio;
        let plot_bottom = surface_height - config.time_axis_height * ratio;
        if chart_right - chart_left < 1.0 || plot_bottom - chart_top < 1.0 {
            return Err(ChartError::InvalidViewport {
                width: surface.width,
                height: surface.height,
            });
        }
        let volume_height = (plot_bottom - chart_top) * config.volume_band_fraction;
        let chart_bottom = plot_bottom - volume_height;

        Ok(Self {
            surface_width,
            surface_height,
            device_pixel_ratio: ratio,
            chart_left,
            chart_right,
            chart_top,
            chart_bottom,
            plot_bottom,
        })
    }

    #[must_use]
    pub fn chart_width(&self) -> f64 {
        self.chart_right - self.chart_left
    }

    #[must_use]
    pub fn chart_height(&self) -> f64 {
        self.chart_bottom - self.chart_top
    }

    #[must_use]
    pub fn volume_top(&self) -> f64 {
        self.chart_bottom
    }

    #[must_use]
    pub fn volume_height(&self) -> f64 {
        self.plot_bottom - self.chart_bottom
    }

    /// Converts a host (CSS pixel) coordinate into device pixels.
    #[must_use]
    pub fn to_device(&self, x: f64, y: f64) -> PixelPoint {
        PixelPoint::new(x * self.device_pixel_ratio, y * self.device_pixel_ratio)
    }

    #[must_use]
    pub fn region_at(&self, point: PixelPoint) -> PointerRegion {
        let in_x = (0.0..=self.surface_width).contains(&point.x);
        let in_y = (0.0..=self.surface_height).contains(&point.y);
        if !in_x || !in_y {
            return PointerRegion::Outside;
        }
        if point.x > self.chart_right {
            return PointerRegion::PriceAxis;
        }
        if point.y > self.plot_bottom {
            return PointerRegion::TimeAxis;
        }
        if point.x >= self.chart_left && point.y >= self.chart_top {
            return PointerRegion::Chart;
        }
        PointerRegion::Outside
    }

    /// Clamps a point into the plot rectangle (price area plus volume band).
    #[must_use]
    pub fn clamp_to_plot(&self, point: PixelPoint) -> PixelPoint {
        PixelPoint::new(
            point.x.clamp(self.chart_left, self.chart_right),
            point.y.clamp(self.chart_top, self.plot_bottom),
        )
    }

    /// Horizontal position of `x` across the chart in `[0, 1]`.
    #[must_use]
    pub fn horizontal_ratio(&self, x: f64) -> f64 {
        ((x - self.chart_left) / self.chart_width()).clamp(0.0, 1.0)
    }
}
