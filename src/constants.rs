//! Reference constants for path playback.
//!
//! Paths are authored against a fixed 60 Hz update loop; settings derive
//! their per-tick defaults from these values.

/// Scale applied to stored path coordinates (fixed point, 1/100 unit).
pub const POINT_SCALE: f32 = 0.01;
/// Update rate the authored fade and turn rates assume.
pub const REFERENCE_TICK_RATE: f32 = 60.0;
/// Duration of the fade-in applied to actors that start hidden.
pub const DEFAULT_FADE_IN_SECONDS: f32 = 2.0;
/// Fraction of the remaining heading error closed per tick is `1 / divisor`.
pub const TURN_SMOOTHING_DIVISOR: f32 = 8.0;
/// Speed multiplier used when a parameter record omits one.
pub const DEFAULT_SPEED: f32 = 1.0;
