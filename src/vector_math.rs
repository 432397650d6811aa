//! Angle helpers for steering sprites along a path.
//! Angles are radians measured counter-clockwise from the positive x axis.
use std::f32::consts::{PI, TAU};

use glam::Vec2;

/// Returns the heading from `from` towards `to`.
///
/// Coincident points yield `0.0`; callers skip steering in that case.
///
/// # Examples
/// ```
/// use glam::Vec2;
/// use shoal::vector_math::angle_to;
/// let heading = angle_to(Vec2::ZERO, Vec2::new(0.0, 2.0));
/// assert!((heading - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
/// ```
#[must_use]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let offset = to - from;
    offset.y.atan2(offset.x)
}

/// Wraps `delta` into `(-π, π]` so turns always take the short way round.
///
/// Non-finite input is returned unchanged.
///
/// # Examples
/// ```
/// use std::f32::consts::PI;
/// use shoal::vector_math::shortest_angle_delta;
/// let wrapped = shortest_angle_delta(1.5 * PI);
/// assert!((wrapped + 0.5 * PI).abs() < 1e-6);
/// ```
#[must_use]
pub fn shortest_angle_delta(delta: f32) -> f32 {
    if !delta.is_finite() {
        return delta;
    }
    let mut wrapped = delta;
    while wrapped > PI {
        wrapped -= TAU;
    }
    while wrapped <= -PI {
        wrapped += TAU;
    }
    wrapped
}

/// Moves `current` a `1 / divisor` step of the way towards `target`.
#[must_use]
pub fn smooth_turn(current: f32, target: f32, divisor: f32) -> f32 {
    current + shortest_angle_delta(target - current) / divisor
}
