//! Parameter records accepted when adding actors.
//!
//! Records arrive as JSON from scene scripts. Optional fields take the
//! defaults documented on each field; `actor`, `presentation`, `ratio` and
//! `points` are required.

use glam::{Affine2, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::PathError;
use crate::host::Handle;
use crate::path::PathPoints;
use crate::tween::TweenSpec;
use crate::DEFAULT_SPEED;

const fn default_speed() -> f32 {
    DEFAULT_SPEED
}

const fn default_forward() -> bool {
    true
}

const fn default_transform() -> Affine2 {
    Affine2::IDENTITY
}

/// Fields shared by every actor variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonParams {
    /// Logical actor that receives lifecycle events.
    pub actor: Handle,
    /// Sprite that displays the actor.
    pub presentation: Handle,
    /// Start transparent and fade in. Defaults to `false`.
    #[serde(default)]
    pub hidden: bool,
    /// Seconds before the actor appears. Defaults to `0`.
    #[serde(default)]
    pub delay: f32,
    /// Initial clock value. Defaults to `0`.
    #[serde(default)]
    pub elapsed: f32,
    /// Time multiplier. Defaults to `1`.
    #[serde(default = "default_speed")]
    pub speed: f32,
    /// Path points per second of active time.
    pub ratio: f32,
    /// The path to follow.
    pub points: PathPoints,
}

impl CommonParams {
    /// Creates a record with every optional field at its default.
    #[must_use]
    pub const fn new(actor: Handle, presentation: Handle, ratio: f32, points: PathPoints) -> Self {
        Self {
            actor,
            presentation,
            hidden: false,
            delay: 0.0,
            elapsed: 0.0,
            speed: DEFAULT_SPEED,
            ratio,
            points,
        }
    }

    fn validate(&self, min_points: usize) -> Result<(), PathError> {
        if !self.ratio.is_finite() || self.ratio <= 0.0 {
            return Err(PathError::invalid(format!(
                "ratio must be a positive number, got {}",
                self.ratio
            )));
        }
        if !self.delay.is_finite() || self.delay < 0.0 {
            return Err(PathError::invalid(format!(
                "delay must be a non-negative number, got {}",
                self.delay
            )));
        }
        if !self.elapsed.is_finite() || !self.speed.is_finite() {
            return Err(PathError::invalid("elapsed and speed must be finite"));
        }
        if self.points.len() < min_points {
            return Err(PathError::invalid(format!(
                "path has {} points; at least {min_points} required",
                self.points.len()
            )));
        }
        Ok(())
    }
}

/// Record for [`crate::PathDriver::add_directional`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionalParams {
    /// Shared fields.
    #[serde(flatten)]
    pub common: CommonParams,
    /// Walk the path from its first point. Defaults to `true`.
    #[serde(default = "default_forward")]
    pub forward: bool,
    /// Transform applied to every point. Defaults to identity.
    #[serde(default = "default_transform")]
    pub transform: Affine2,
    /// Optional time warp.
    #[serde(default)]
    pub tween: Option<TweenSpec>,
}

impl DirectionalParams {
    /// Creates a forward, untransformed, untweened record.
    #[must_use]
    pub const fn new(common: CommonParams) -> Self {
        Self {
            common,
            forward: true,
            transform: Affine2::IDENTITY,
            tween: None,
        }
    }

    /// Parses a record from JSON without validating it.
    ///
    /// # Errors
    /// Returns [`PathError::InvalidArgument`] for malformed JSON, missing
    /// required fields or an odd-length path.
    pub fn from_json(json: &str) -> Result<Self, PathError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Checks ranges and point counts.
    ///
    /// # Errors
    /// Returns [`PathError::InvalidArgument`] when the path has fewer than
    /// two points, the ratio is not positive, or the tween is malformed.
    pub fn validate(&self) -> Result<(), PathError> {
        self.common.validate(2)?;
        if let Some(tween) = &self.tween {
            tween.validate()?;
        }
        Ok(())
    }
}

/// Record for [`crate::PathDriver::add_group`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupParams {
    /// Shared fields.
    #[serde(flatten)]
    pub common: CommonParams,
    /// Last progress index at which the actor faces the centre. Defaults to `0`.
    #[serde(default)]
    pub center_index: usize,
    /// Formation centre as `[x, y]`. Defaults to the origin.
    #[serde(default)]
    pub center_pos: Vec2,
    /// Face the centre while gathering. Defaults to `false`.
    #[serde(default)]
    pub center: bool,
}

impl GroupParams {
    /// Creates a record that never faces the centre.
    #[must_use]
    pub const fn new(common: CommonParams) -> Self {
        Self {
            common,
            center_index: 0,
            center_pos: Vec2::ZERO,
            center: false,
        }
    }

    /// Parses a record from JSON without validating it.
    ///
    /// # Errors
    /// Returns [`PathError::InvalidArgument`] for malformed JSON, missing
    /// required fields or an odd-length path.
    pub fn from_json(json: &str) -> Result<Self, PathError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Checks ranges and point counts.
    ///
    /// # Errors
    /// Returns [`PathError::InvalidArgument`] when the ratio is not positive
    /// or the path is too short: one point suffices when facing the centre,
    /// two otherwise.
    pub fn validate(&self) -> Result<(), PathError> {
        self.common.validate(if self.center { 1 } else { 2 })
    }
}

/// A batch of actors to add, as read by the `pathsim` tool.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneParams {
    /// Single swimmers.
    #[serde(default)]
    pub directional: Vec<DirectionalParams>,
    /// Formation members.
    #[serde(default)]
    pub group: Vec<GroupParams>,
}

impl SceneParams {
    /// Parses a scene from JSON.
    ///
    /// # Errors
    /// Returns [`PathError::InvalidArgument`] for malformed records.
    pub fn from_json(json: &str) -> Result<Self, PathError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Every actor and presentation handle the scene refers to.
    pub fn handles(&self) -> impl Iterator<Item = (Handle, Handle)> + '_ {
        self.directional
            .iter()
            .map(|params| &params.common)
            .chain(self.group.iter().map(|params| &params.common))
            .map(|common| (common.actor, common.presentation))
    }
}
