//! Actors that follow a transformed path, optionally in reverse and with a
//! tween warping their progress.

use glam::{Affine2, Vec2};

use super::ActorState;
use crate::error::PathError;
use crate::numeric::floor_to_index;
use crate::params::DirectionalParams;
use crate::settings::DriverSettings;
use crate::tween::TweenSpec;
use crate::vector_math::{angle_to, smooth_turn};

/// A single swimmer.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalActor {
    pub(super) state: ActorState,
    transform: Affine2,
    forward: bool,
    tween: TweenSpec,
}

impl DirectionalActor {
    /// Builds an actor from a validated parameter record.
    #[must_use]
    pub fn from_params(params: DirectionalParams) -> Self {
        Self {
            state: ActorState::from_params(params.common),
            transform: params.transform,
            forward: params.forward,
            tween: params.tween.unwrap_or_default(),
        }
    }

    /// Shared state.
    #[must_use]
    pub const fn state(&self) -> &ActorState {
        &self.state
    }

    /// Transform applied to every decoded point.
    #[must_use]
    pub const fn transform(&self) -> Affine2 {
        self.transform
    }

    /// Whether the path is walked from its first point.
    #[must_use]
    pub const fn forward(&self) -> bool {
        self.forward
    }

    /// Time warp applied to progress.
    #[must_use]
    pub const fn tween(&self) -> &TweenSpec {
        &self.tween
    }

    /// Progress index, warped by the tween once the actor has left the
    /// first point.
    #[must_use]
    pub fn progress_index(&self) -> usize {
        let base = self.state.base_index();
        if base == 0 || !self.tween.is_enabled() {
            return base;
        }
        floor_to_index(self.tween.warp(self.state.active_time()) * self.state.ratio())
    }

    /// Mirrors `index` when walking backwards. `index` must be in range.
    #[must_use]
    pub fn resolve_index(&self, index: usize) -> usize {
        if self.forward {
            index
        } else {
            self.state
                .point_count()
                .saturating_sub(1)
                .saturating_sub(index)
        }
    }

    /// Decoded point `index` mapped through the transform.
    ///
    /// # Errors
    /// Returns [`PathError::IndexOutOfRange`] past the end of the path.
    pub fn point_position(&self, index: usize) -> Result<Vec2, PathError> {
        let point = self.state.points().point(index)?;
        Ok(self.transform.transform_point2(point))
    }

    pub(super) fn initial_heading(&self, start: Vec2) -> Result<f32, PathError> {
        Ok(angle_to(start, self.point_position(1)?))
    }

    pub(super) fn steer(&self, current: f32, from: Vec2, to: Vec2, settings: &DriverSettings) -> f32 {
        smooth_turn(current, angle_to(from, to), settings.turn_divisor)
    }
}
