//! Per-actor path state and the update protocol shared by every variant.
//!
//! An actor moves through `Pending → Activating → Active` and ends when its
//! progress index runs off the end of the path. [`PathActor`] is the closed
//! set of variants the driver knows how to advance.

use glam::Vec2;
use log::debug;

use crate::error::PathError;
use crate::host::{ActorEvent, Handle, Host, Presentation};
use crate::numeric::{count_to_f32, floor_to_index};
use crate::params::CommonParams;
use crate::path::PathPoints;
use crate::settings::DriverSettings;

pub mod directional;
pub mod group;

pub use directional::DirectionalActor;
pub use group::GroupActor;

/// Where an actor is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorPhase {
    /// `elapsed < delay`; updates do nothing.
    Pending,
    /// Started but still fading in or waiting for the sprite to play.
    Activating,
    /// Fully visible and moving.
    Active,
}

/// Result of one update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The actor keeps its slot.
    Alive,
    /// The path ran out and the actor was told to fade out.
    Finished,
    /// The presentation object no longer resolves.
    Detached,
}

impl UpdateOutcome {
    /// Whether the driver should keep the actor.
    #[must_use]
    pub const fn is_alive(self) -> bool {
        matches!(self, Self::Alive)
    }
}

/// Timing and path data shared by every actor variant.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorState {
    actor: Handle,
    presentation: Handle,
    activated: bool,
    hidden: bool,
    delay: f32,
    elapsed: f32,
    speed: f32,
    ratio: f32,
    points: PathPoints,
}

impl ActorState {
    /// Builds state from a validated parameter record.
    #[must_use]
    pub fn from_params(params: CommonParams) -> Self {
        Self {
            actor: params.actor,
            presentation: params.presentation,
            activated: false,
            hidden: params.hidden,
            delay: params.delay,
            elapsed: params.elapsed,
            speed: params.speed,
            ratio: params.ratio,
            points: params.points,
        }
    }

    /// Handle of the logical actor.
    #[must_use]
    pub const fn actor(&self) -> Handle {
        self.actor
    }

    /// Handle of the sprite that displays the actor.
    #[must_use]
    pub const fn presentation(&self) -> Handle {
        self.presentation
    }

    /// Whether the actor started hidden.
    #[must_use]
    pub const fn hidden(&self) -> bool {
        self.hidden
    }

    /// Whether activation has completed.
    #[must_use]
    pub const fn is_activated(&self) -> bool {
        self.activated
    }

    /// Seconds to wait before the actor appears.
    #[must_use]
    pub const fn delay(&self) -> f32 {
        self.delay
    }

    /// Scaled seconds since the actor was added.
    #[must_use]
    pub const fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Time multiplier applied in [`ActorState::advance`].
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Replaces the time multiplier.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Path points per second of active time.
    #[must_use]
    pub const fn ratio(&self) -> f32 {
        self.ratio
    }

    /// The path being followed.
    #[must_use]
    pub const fn points(&self) -> &PathPoints {
        &self.points
    }

    /// Number of points in the path.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Advances the clock by `dt` scaled by the actor's speed.
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt * self.speed;
    }

    /// Jumps the clock to `elapsed`.
    pub fn seek_to(&mut self, elapsed: f32) {
        self.elapsed = elapsed;
    }

    /// Seconds since the delay ran out, never negative.
    #[must_use]
    pub fn active_time(&self) -> f32 {
        (self.elapsed - self.delay).max(0.0)
    }

    /// Progress index before any tween is applied.
    #[must_use]
    pub fn base_index(&self) -> usize {
        floor_to_index(self.active_time() * self.ratio)
    }

    /// Seconds of active time the whole path takes.
    #[must_use]
    pub fn length(&self) -> f32 {
        count_to_f32(self.point_count()) / self.ratio
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> ActorPhase {
        if self.elapsed < self.delay {
            ActorPhase::Pending
        } else if self.activated {
            ActorPhase::Active
        } else {
            ActorPhase::Activating
        }
    }

    /// Runs one activation step.
    ///
    /// Starts the sprite animation if it is stopped, then either raises the
    /// opacity of a hidden actor by `fade_step` or marks activation done.
    pub fn activate<P: Presentation + ?Sized>(&mut self, sprite: &mut P, fade_step: f32) {
        if !sprite.is_active() {
            sprite.set_active(true);
            sprite.seek(self.elapsed - self.delay);
            debug!("actor {} started playing", self.actor);
        }
        let opacity = sprite.opacity();
        if self.hidden && opacity < 1.0 {
            sprite.set_opacity((opacity + fade_step).min(1.0));
        } else {
            self.activated = true;
            debug!("actor {} activated", self.actor);
        }
    }
}

/// Closed set of actor variants owned by the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum PathActor {
    /// Follows its path with an optional transform, direction and tween.
    Directional(DirectionalActor),
    /// Swims in formation, optionally facing a shared centre.
    Group(GroupActor),
}

impl From<DirectionalActor> for PathActor {
    fn from(actor: DirectionalActor) -> Self {
        Self::Directional(actor)
    }
}

impl From<GroupActor> for PathActor {
    fn from(actor: GroupActor) -> Self {
        Self::Group(actor)
    }
}

impl PathActor {
    /// Shared state.
    #[must_use]
    pub const fn state(&self) -> &ActorState {
        match self {
            Self::Directional(actor) => &actor.state,
            Self::Group(actor) => &actor.state,
        }
    }

    /// Shared state, mutably.
    pub fn state_mut(&mut self) -> &mut ActorState {
        match self {
            Self::Directional(actor) => &mut actor.state,
            Self::Group(actor) => &mut actor.state,
        }
    }

    /// Handle of the logical actor.
    #[must_use]
    pub const fn handle(&self) -> Handle {
        self.state().actor()
    }

    /// Places the sprite at the start of the path.
    ///
    /// # Errors
    /// Propagates [`PathError::IndexOutOfRange`] when the path is too short.
    pub fn init<P: Presentation + ?Sized>(&self, sprite: &mut P) -> Result<(), PathError> {
        let start = self.point_position(0)?;
        let heading = match self {
            Self::Directional(actor) => actor.initial_heading(start)?,
            Self::Group(actor) => actor.initial_heading(start)?,
        };
        sprite.set_position(start);
        sprite.set_rotation(heading);
        if self.state().hidden() {
            sprite.set_opacity(0.0);
        }
        Ok(())
    }

    /// Progress index for the current clock.
    #[must_use]
    pub fn progress_index(&self) -> usize {
        match self {
            Self::Directional(actor) => actor.progress_index(),
            Self::Group(actor) => actor.state.base_index(),
        }
    }

    /// Maps a progress index onto the path point to display.
    #[must_use]
    pub fn resolve_index(&self, index: usize) -> usize {
        match self {
            Self::Directional(actor) => actor.resolve_index(index),
            Self::Group(_) => index,
        }
    }

    /// Position of path point `index` in scene space.
    ///
    /// # Errors
    /// Returns [`PathError::IndexOutOfRange`] past the end of the path.
    pub fn point_position(&self, index: usize) -> Result<Vec2, PathError> {
        match self {
            Self::Directional(actor) => actor.point_position(index),
            Self::Group(actor) => actor.state.points().point(index),
        }
    }

    fn steer(
        &self,
        current: f32,
        from: Vec2,
        to: Vec2,
        index: usize,
        settings: &DriverSettings,
    ) -> f32 {
        match self {
            Self::Directional(actor) => actor.steer(current, from, to, settings),
            Self::Group(actor) => actor.steer(current, from, to, index, settings),
        }
    }

    /// Runs one update against the host.
    ///
    /// # Errors
    /// Returns [`PathError::IndexOutOfRange`] if a resolved point is missing
    /// from the path.
    pub fn update<H: Host>(
        &mut self,
        host: &mut H,
        settings: &DriverSettings,
    ) -> Result<UpdateOutcome, PathError> {
        if self.state().phase() == ActorPhase::Pending {
            return Ok(UpdateOutcome::Alive);
        }
        let Some(mut sprite) = host.presentation(self.state().presentation()) else {
            return Ok(UpdateOutcome::Detached);
        };
        if !self.state().is_activated() {
            self.state_mut().activate(&mut sprite, settings.fade_step());
        }

        let index = self.progress_index();
        if index >= self.state().point_count() {
            drop(sprite);
            let actor = self.handle();
            host.notify(actor, ActorEvent::Fadeout);
            debug!("actor {actor} reached the end of its path");
            return Ok(UpdateOutcome::Finished);
        }

        let position = self.point_position(self.resolve_index(index))?;
        let last = sprite.position();
        if last == position {
            return Ok(UpdateOutcome::Alive);
        }
        sprite.set_position(position);
        let heading = self.steer(sprite.rotation(), last, position, index, settings);
        sprite.set_rotation(heading);
        Ok(UpdateOutcome::Alive)
    }
}
