use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Pixel size of the rendering surface.
///
/// `width`/`height` are CSS (logical) pixels of the host container; the
/// backing store is `width * device_pixel_ratio` by `height * device_pixel_ratio`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_device_pixel_ratio")]
    pub device_pixel_ratio: f64,
}

impl SurfaceSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio: 1.0,
        }
    }

    #[must_use]
    pub fn with_device_pixel_ratio(mut self, ratio: f64) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0
            && self.height > 0
            && self.device_pixel_ratio.is_finite()
            && self.device_pixel_ratio > 0.0
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }

    /// Backing-store width in device pixels.
    #[must_use]
    pub fn pixel_width(self) -> f64 {
        f64::from(self.width) * self.device_pixel_ratio
    }

    /// Backing-store height in device pixels.
    #[must_use]
    pub fn pixel_height(self) -> f64 {
        f64::from(self.height) * self.device_pixel_ratio
    }
}

fn default_device_pixel_ratio() -> f64 {
    1.0
}

/// Point in device-pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
