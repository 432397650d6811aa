//! Numeric conversion helpers used across the project.
//!
//! These utilities guard conversions between floating-point time values and
//! integer path indices.

/// Floor a progress value into a path index.
///
/// Negative and NaN inputs map to `0`; values beyond `usize::MAX` saturate.
///
/// # Examples
///
/// ```
/// use shoal::numeric::floor_to_index;
/// assert_eq!(floor_to_index(1.99), 1);
/// assert_eq!(floor_to_index(-0.5), 0);
/// ```
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Float to integer casts saturate and the value is clamped to zero first."
)]
#[must_use]
pub fn floor_to_index(value: f32) -> usize {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    value.floor() as usize
}

/// Convert a point count into seconds-compatible `f32`.
#[expect(
    clippy::cast_precision_loss,
    reason = "Path lengths stay far below f32's exact integer range."
)]
#[must_use]
pub fn count_to_f32(count: usize) -> f32 {
    count as f32
}
