//! Utility helpers for tests.
//!
//! Builders for parameter records and a ready-made in-memory scene.

pub mod scene;

use glam::Vec2;

/// Assert that two positions agree to within `epsilon` on both axes.
///
/// # Panics
/// Panics with both positions in the message if they differ.
pub fn assert_vec2_near(actual: Vec2, expected: Vec2, epsilon: f32) {
    assert!(
        approx::abs_diff_eq!(actual.x, expected.x, epsilon = epsilon)
            && approx::abs_diff_eq!(actual.y, expected.y, epsilon = epsilon),
        "expected {expected:?}, got {actual:?}"
    );
}

/// Flattens whole-unit coordinates into the fixed-point path encoding.
///
/// # Examples
/// ```
/// use test_utils::encode_points;
/// assert_eq!(encode_points(&[(0, 0), (1, -2)]), vec![0, 0, 100, -200]);
/// ```
pub fn encode_points(points: &[(i32, i32)]) -> Vec<i32> {
    points
        .iter()
        .flat_map(|&(x, y)| [x * 100, y * 100])
        .collect()
}
