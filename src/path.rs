//! Fixed-point path storage.
//!
//! Paths arrive as a flat `[x0, y0, x1, y1, …]` sequence of integers in
//! hundredths of a unit. Decoding happens lazily, one point per tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::PathError;
use crate::POINT_SCALE;

/// Validated, even-length sequence of scaled path coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<i32>", into = "Vec<i32>")]
pub struct PathPoints(Vec<i32>);

impl PathPoints {
    /// Wraps raw coordinates, rejecting odd-length input.
    ///
    /// # Errors
    /// Returns [`PathError::InvalidArgument`] when `raw.len()` is odd.
    ///
    /// # Examples
    /// ```
    /// use shoal::PathPoints;
    /// let path = PathPoints::new(vec![0, 0, 150, -25]).expect("even length");
    /// assert_eq!(path.len(), 2);
    /// assert!(PathPoints::new(vec![1, 2, 3]).is_err());
    /// ```
    pub fn new(raw: Vec<i32>) -> Result<Self, PathError> {
        if raw.len() % 2 != 0 {
            return Err(PathError::invalid(format!(
                "path has {} coordinates; expected an even count",
                raw.len()
            )));
        }
        Ok(Self(raw))
    }

    /// Number of points in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len() / 2
    }

    /// Whether the path has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decodes point `index` into scene units.
    ///
    /// # Errors
    /// Returns [`PathError::IndexOutOfRange`] when `index >= self.len()`.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec2;
    /// use shoal::PathPoints;
    /// let path = PathPoints::new(vec![0, 0, 150, -25]).expect("even length");
    /// assert_eq!(path.point(1).expect("in range"), Vec2::new(1.5, -0.25));
    /// ```
    pub fn point(&self, index: usize) -> Result<Vec2, PathError> {
        let out_of_range = || PathError::IndexOutOfRange {
            index,
            len: self.len(),
        };
        let start = index.checked_mul(2).ok_or_else(out_of_range)?;
        let end = start.checked_add(2).ok_or_else(out_of_range)?;
        match self.0.get(start..end) {
            Some(&[x, y]) => Ok(Vec2::new(decode(x), decode(y))),
            _ => Err(out_of_range()),
        }
    }
}

impl TryFrom<Vec<i32>> for PathPoints {
    type Error = PathError;

    fn try_from(raw: Vec<i32>) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<PathPoints> for Vec<i32> {
    fn from(points: PathPoints) -> Self {
        points.0
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "Authored coordinates stay well inside f32's exact integer range."
)]
fn decode(raw: i32) -> f32 {
    raw as f32 * POINT_SCALE
}
