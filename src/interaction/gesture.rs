//! Pointer gesture reducer.
//!
//! `reduce` is pure: it maps the current `GestureState` and one input to the
//! next state plus a list of `GestureEffect`s that the engine applies to the
//! viewport, momentum and crosshair.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{PixelPoint, PointerRegion, ViewportTuning};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum GestureState {
    #[default]
    Idle,
    /// Main drag over the plot.
    Panning {
        origin: PixelPoint,
        last: PixelPoint,
        /// Whether vertical motion is moving the price axis.
        price_engaged: bool,
    },
    /// Drag on the price gutter handle.
    PriceAxisDrag {
        origin_y: f64,
        start_price_zoom: f64,
    },
    /// Drag on the time gutter handle.
    TimeAxisDrag { origin_x: f64, start_zoom: f64 },
}

impl GestureState {
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        !matches!(self, GestureState::Idle)
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        matches!(self, GestureState::Panning { .. })
    }
}

/// Pointer input in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureInput {
    PointerDown {
        point: PixelPoint,
        region: PointerRegion,
    },
    PointerMove {
        point: PixelPoint,
        region: PointerRegion,
    },
    PointerUp {
        point: PixelPoint,
    },
    PointerLeave,
}

/// Engine values the reducer reads but never writes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureContext {
    pub zoom_level: f64,
    /// Price zoom currently applied to the mapping.
    pub effective_price_zoom: f64,
    pub auto_fit_price: bool,
    pub tuning: ViewportTuning,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEffect {
    CancelMomentum,
    PanStarted { point: PixelPoint },
    /// Main-drag displacement since the previous move. `dy_px` is zero until
    /// the price axis is engaged.
    DragBy {
        dx_px: f64,
        dy_px: f64,
        point: PixelPoint,
    },
    DetachPriceScale,
    SetPriceZoom(f64),
    SetZoom(f64),
    PanEnded,
    MoveCrosshair(PixelPoint),
    HideCrosshair,
}

pub type GestureEffects = SmallVec<[GestureEffect; 4]>;

#[derive(Debug, Clone, PartialEq)]
pub struct GestureTransition {
    pub state: GestureState,
    pub effects: GestureEffects,
}

impl GestureTransition {
    fn new(state: GestureState) -> Self {
        Self {
            state,
            effects: SmallVec::new(),
        }
    }

    fn with(mut self, effect: GestureEffect) -> Self {
        self.effects.push(effect);
        self
    }
}

#[must_use]
pub fn reduce(state: GestureState, input: GestureInput, context: &GestureContext) -> GestureTransition {
    match input {
        GestureInput::PointerDown { point, region } => pointer_down(point, region, context),
        GestureInput::PointerMove { point, region } => pointer_move(state, point, region, context),
        GestureInput::PointerUp { point } => finish(state, point),
        GestureInput::PointerLeave => {
            let transition = match state {
                GestureState::Panning { last, .. } => finish(state, last),
                _ => GestureTransition::new(GestureState::Idle),
            };
            transition.with(GestureEffect::HideCrosshair)
        }
    }
}

fn pointer_down(
    point: PixelPoint,
    region: PointerRegion,
    context: &GestureContext,
) -> GestureTransition {
    let next = match region {
        PointerRegion::Chart => GestureState::Panning {
            origin: point,
            last: point,
            price_engaged: false,
        },
        PointerRegion::PriceAxis => GestureState::PriceAxisDrag {
            origin_y: point.y,
            start_price_zoom: context.effective_price_zoom,
        },
        PointerRegion::TimeAxis => GestureState::TimeAxisDrag {
            origin_x: point.x,
            start_zoom: context.zoom_level,
        },
        PointerRegion::Outside => GestureState::Idle,
    };
    let transition = GestureTransition::new(next).with(GestureEffect::CancelMomentum);
    if next.is_panning() {
        transition.with(GestureEffect::PanStarted { point })
    } else {
        transition
    }
}

fn pointer_move(
    state: GestureState,
    point: PixelPoint,
    region: PointerRegion,
    context: &GestureContext,
) -> GestureTransition {
    let tuning = &context.tuning;
    match state {
        GestureState::Idle => {
            let effect = if region == PointerRegion::Chart {
                GestureEffect::MoveCrosshair(point)
            } else {
                GestureEffect::HideCrosshair
            };
            GestureTransition::new(state).with(effect)
        }
        GestureState::Panning {
            origin,
            last,
            price_engaged,
        } => {
            let vertical_travel = (point.y - origin.y).abs();
            let engage_now = !price_engaged
                && (!context.auto_fit_price || vertical_travel > tuning.price_pan_engage_px);
            let engaged = price_engaged || engage_now;
            let dy_px = if engaged { point.y - last.y } else { 0.0 };

            let mut transition = GestureTransition::new(GestureState::Panning {
                origin,
                last: point,
                price_engaged: engaged,
            });
            if engage_now && context.auto_fit_price {
                transition = transition.with(GestureEffect::DetachPriceScale);
            }
            transition
                .with(GestureEffect::DragBy {
                    dx_px: point.x - last.x,
                    dy_px,
                    point,
                })
                .with(GestureEffect::MoveCrosshair(point))
        }
        GestureState::PriceAxisDrag {
            origin_y,
            start_price_zoom,
        } => {
            let price_zoom =
                start_price_zoom * ((point.y - origin_y) * tuning.axis_drag_sensitivity).exp();
            GestureTransition::new(state)
                .with(GestureEffect::DetachPriceScale)
                .with(GestureEffect::SetPriceZoom(price_zoom))
        }
        GestureState::TimeAxisDrag {
            origin_x,
            start_zoom,
        } => {
            let zoom = start_zoom * ((point.x - origin_x) * tuning.axis_drag_sensitivity).exp();
            GestureTransition::new(state).with(GestureEffect::SetZoom(zoom))
        }
    }
}

fn finish(state: GestureState, point: PixelPoint) -> GestureTransition {
    let mut transition = GestureTransition::new(GestureState::Idle);
    if let GestureState::Panning {
        last,
        price_engaged,
        ..
    } = state
    {
        if point.is_finite() && point != last {
            transition = transition.with(GestureEffect::DragBy {
                dx_px: point.x - last.x,
                dy_px: if price_engaged { point.y - last.y } else { 0.0 },
                point,
            });
        }
        transition = transition.with(GestureEffect::PanEnded);
    }
    transition
}

#[cfg(test)]
mod tests {
    use super::{GestureContext, GestureEffect, GestureInput, GestureState, reduce};
    use crate::core::{PixelPoint, PointerRegion, ViewportTuning};

    fn context(auto_fit_price: bool) -> GestureContext {
        GestureContext {
            zoom_level: 10.0,
            effective_price_zoom: 1.0,
            auto_fit_price,
            tuning: ViewportTuning::default(),
        }
    }

    fn down(state: GestureState, x: f64, y: f64, region: PointerRegion) -> GestureState {
        reduce(
            state,
            GestureInput::PointerDown {
                point: PixelPoint::new(x, y),
                region,
            },
            &context(true),
        )
        .state
    }

    #[test]
    fn pointer_down_picks_gesture_by_region() {
        assert!(down(GestureState::Idle, 10.0, 10.0, PointerRegion::Chart).is_panning());
        assert!(matches!(
            down(GestureState::Idle, 10.0, 10.0, PointerRegion::PriceAxis),
            GestureState::PriceAxisDrag { .. }
        ));
        assert!(matches!(
            down(GestureState::Idle, 10.0, 10.0, PointerRegion::TimeAxis),
            GestureState::TimeAxisDrag { .. }
        ));
    }

    #[test]
    fn small_vertical_motion_does_not_move_price_axis() {
        let state = down(GestureState::Idle, 100.0, 100.0, PointerRegion::Chart);
        let transition = reduce(
            state,
            GestureInput::PointerMove {
                point: PixelPoint::new(150.0, 104.0),
                region: PointerRegion::Chart,
            },
            &context(true),
        );
        assert!(transition.effects.contains(&GestureEffect::DragBy {
            dx_px: 50.0,
            dy_px: 0.0,
            point: PixelPoint::new(150.0, 104.0),
        }));
        assert!(!transition.effects.contains(&GestureEffect::DetachPriceScale));
    }

    #[test]
    fn vertical_travel_past_threshold_detaches_price_scale() {
        let state = down(GestureState::Idle, 100.0, 100.0, PointerRegion::Chart);
        let transition = reduce(
            state,
            GestureInput::PointerMove {
                point: PixelPoint::new(100.0, 110.0),
                region: PointerRegion::Chart,
            },
            &context(true),
        );
        assert!(transition.effects.contains(&GestureEffect::DetachPriceScale));
        assert!(transition.effects.iter().any(|effect| matches!(
            effect,
            GestureEffect::DragBy { dy_px, .. } if *dy_px == 10.0
        )));
    }

    #[test]
    fn release_ends_pan_and_returns_to_idle() {
        let state = down(GestureState::Idle, 100.0, 100.0, PointerRegion::Chart);
        let transition = reduce(
            state,
            GestureInput::PointerUp {
                point: PixelPoint::new(120.0, 100.0),
            },
            &context(true),
        );
        assert_eq!(transition.state, GestureState::Idle);
        assert!(matches!(
            transition.effects.as_slice(),
            [GestureEffect::DragBy { .. }, GestureEffect::PanEnded]
        ));
    }
}
