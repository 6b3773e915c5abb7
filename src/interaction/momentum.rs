use serde::{Deserialize, Serialize};

use crate::core::PixelPoint;
use crate::error::{ChartError, ChartResult};

/// Tuning for post-drag inertia. Velocities are in device px per ms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentumConfig {
    /// Weight of the newest raw sample in the smoothed velocity.
    pub latest_sample_weight: f64,
    /// A release later than this after the last move carries no velocity.
    pub stale_release_ms: f64,
    /// Either axis must exceed this at release for momentum to start.
    pub start_threshold: f64,
    /// Share of the release velocity handed to the animation.
    pub release_scale: f64,
    /// Per-frame velocity multiplier.
    pub friction: f64,
    /// Nominal frame duration used to turn velocity into a pixel delta.
    pub frame_ms: f64,
    /// Animation ends once both axes fall below this.
    pub stop_threshold: f64,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            latest_sample_weight: 0.6,
            stale_release_ms: 120.0,
            start_threshold: 0.1,
            release_scale: 0.5,
            friction: 0.92,
            frame_ms: 16.0,
            stop_threshold: 0.02,
        }
    }
}

impl MomentumConfig {
    pub fn validate(self) -> ChartResult<Self> {
        if !(0.0..=1.0).contains(&self.latest_sample_weight) {
            return Err(ChartError::InvalidConfig(
                "momentum latest sample weight must be in [0, 1]".to_owned(),
            ));
        }
        if !self.friction.is_finite() || self.friction <= 0.0 || self.friction >= 1.0 {
            return Err(ChartError::InvalidConfig(
                "momentum friction must be in (0, 1)".to_owned(),
            ));
        }
        for (name, value) in [
            ("stale_release_ms", self.stale_release_ms),
            ("start_threshold", self.start_threshold),
            ("release_scale", self.release_scale),
            ("frame_ms", self.frame_ms),
            ("stop_threshold", self.stop_threshold),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "momentum `{name}` must be finite and > 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Smoothed drag velocity from pointer samples.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VelocityTracker {
    last_point: Option<PixelPoint>,
    last_time_ms: f64,
    previous_raw: (f64, f64),
    velocity: (f64, f64),
}

impl VelocityTracker {
    /// Starts a fresh sample run at `point`.
    pub fn reset(&mut self, point: PixelPoint, time_ms: f64) {
        *self = Self {
            last_point: Some(point),
            last_time_ms: time_ms,
            ..Self::default()
        };
    }

    pub fn sample(&mut self, point: PixelPoint, time_ms: f64, config: &MomentumConfig) {
        let Some(last) = self.last_point else {
            self.reset(point, time_ms);
            return;
        };
        let elapsed = time_ms - self.last_time_ms;
        if elapsed > 0.0 {
            let raw = ((point.x - last.x) / elapsed, (point.y - last.y) / elapsed);
            let weight = config.latest_sample_weight;
            self.velocity = (
                weight * raw.0 + (1.0 - weight) * self.previous_raw.0,
                weight * raw.1 + (1.0 - weight) * self.previous_raw.1,
            );
            self.previous_raw = raw;
            self.last_time_ms = time_ms;
        }
        self.last_point = Some(point);
    }

    /// Smoothed velocity `(x, y)` in px/ms.
    #[must_use]
    pub fn velocity(&self) -> (f64, f64) {
        self.velocity
    }

    /// Velocity valid at `release_ms`, zero when the last move is stale.
    #[must_use]
    pub fn release_velocity(&self, release_ms: f64, config: &MomentumConfig) -> (f64, f64) {
        if self.last_point.is_none() || release_ms - self.last_time_ms > config.stale_release_ms {
            return (0.0, 0.0);
        }
        self.velocity
    }
}

/// Pixel displacement produced by one animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentumStep {
    pub dx_px: f64,
    pub dy_px: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MomentumState {
    pub velocity_time_axis: f64,
    pub velocity_price_axis: f64,
    pub active: bool,
}

impl MomentumState {
    /// Momentum for a drag released with `velocity`; inactive below the start
    /// threshold.
    #[must_use]
    pub fn from_release(velocity: (f64, f64), config: &MomentumConfig) -> Self {
        let (vx, vy) = velocity;
        if !vx.is_finite() || !vy.is_finite() {
            return Self::default();
        }
        if vx.abs() <= config.start_threshold && vy.abs() <= config.start_threshold {
            return Self::default();
        }
        Self {
            velocity_time_axis: vx * config.release_scale,
            velocity_price_axis: vy * config.release_scale,
            active: true,
        }
    }

    /// Decays velocity by one frame and returns the displacement to apply.
    ///
    /// Returns `None` and deactivates once both axes drop below the stop
    /// threshold.
    pub fn step(&mut self, config: &MomentumConfig) -> Option<MomentumStep> {
        if !self.active {
            return None;
        }
        self.velocity_time_axis *= config.friction;
        self.velocity_price_axis *= config.friction;
        if self.velocity_time_axis.abs() < config.stop_threshold
            && self.velocity_price_axis.abs() < config.stop_threshold
        {
            self.stop();
            return None;
        }
        Some(MomentumStep {
            dx_px: self.velocity_time_axis * config.frame_ms,
            dy_px: self.velocity_price_axis * config.frame_ms,
        })
    }

    pub fn stop(&mut self) {
        *self = Self::default();
    }

    /// Drops horizontal motion after the pan hit a bound.
    pub fn stop_time_axis(&mut self) {
        self.velocity_time_axis = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{MomentumConfig, MomentumState, VelocityTracker};
    use crate::core::PixelPoint;

    #[test]
    fn tracker_blends_latest_with_previous_sample() {
        let config = MomentumConfig::default();
        let mut tracker = VelocityTracker::default();
        tracker.reset(PixelPoint::new(0.0, 0.0), 0.0);
        tracker.sample(PixelPoint::new(10.0, 0.0), 10.0, &config);
        assert_relative_eq!(tracker.velocity().0, 0.6, epsilon = 1e-12);
        tracker.sample(PixelPoint::new(30.0, 0.0), 20.0, &config);
        assert_relative_eq!(tracker.velocity().0, 0.6 * 2.0 + 0.4 * 1.0, epsilon = 1e-12);
    }

    #[test]
    fn stale_release_carries_no_velocity() {
        let config = MomentumConfig::default();
        let mut tracker = VelocityTracker::default();
        tracker.reset(PixelPoint::new(0.0, 0.0), 0.0);
        tracker.sample(PixelPoint::new(40.0, 0.0), 10.0, &config);
        assert_eq!(tracker.release_velocity(200.0, &config), (0.0, 0.0));
        assert!(tracker.release_velocity(50.0, &config).0 > 0.0);
    }

    #[test]
    fn slow_release_does_not_start_momentum() {
        let config = MomentumConfig::default();
        assert!(!MomentumState::from_release((0.05, 0.08), &config).active);
        let state = MomentumState::from_release((1.0, 0.0), &config);
        assert!(state.active);
        assert_eq!(state.velocity_time_axis, 0.5);
    }

    #[test]
    fn step_decays_then_terminates() {
        let config = MomentumConfig::default();
        let mut state = MomentumState::from_release((1.0, 0.0), &config);
        let first = state.step(&config).expect("first frame moves");
        assert_relative_eq!(first.dx_px, 0.5 * 0.92 * 16.0, epsilon = 1e-9);
        let mut frames = 1;
        while state.step(&config).is_some() {
            frames += 1;
            assert!(frames < 200);
        }
        assert!(!state.active);
    }
}
