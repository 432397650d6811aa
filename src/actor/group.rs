//! Formation swimmers that can face a shared centre while gathering.

use glam::Vec2;

use super::ActorState;
use crate::error::PathError;
use crate::params::GroupParams;
use crate::settings::DriverSettings;
use crate::vector_math::{angle_to, smooth_turn};

/// A member of a group formation.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupActor {
    pub(super) state: ActorState,
    center_index: usize,
    center: Vec2,
    face_center: bool,
}

impl GroupActor {
    /// Builds an actor from a validated parameter record.
    #[must_use]
    pub fn from_params(params: GroupParams) -> Self {
        Self {
            state: ActorState::from_params(params.common),
            center_index: params.center_index,
            center: params.center_pos,
            face_center: params.center,
        }
    }

    /// Shared state.
    #[must_use]
    pub const fn state(&self) -> &ActorState {
        &self.state
    }

    /// Last progress index at which the actor still faces the centre.
    #[must_use]
    pub const fn center_index(&self) -> usize {
        self.center_index
    }

    /// Formation centre in scene units.
    #[must_use]
    pub const fn center(&self) -> Vec2 {
        self.center
    }

    /// Whether the actor faces the centre until `center_index`.
    #[must_use]
    pub const fn face_center(&self) -> bool {
        self.face_center
    }

    pub(super) fn initial_heading(&self, start: Vec2) -> Result<f32, PathError> {
        let target = if self.face_center {
            self.center
        } else {
            self.state.points().point(1)?
        };
        Ok(angle_to(start, target))
    }

    pub(super) fn steer(
        &self,
        current: f32,
        from: Vec2,
        to: Vec2,
        index: usize,
        settings: &DriverSettings,
    ) -> f32 {
        if self.face_center && index < self.center_index {
            angle_to(to, self.center)
        } else {
            smooth_turn(current, angle_to(from, to), settings.turn_divisor)
        }
    }
}
