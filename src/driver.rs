//! Registry that owns every path actor and advances them once per tick.

use std::fmt;
use std::str::FromStr;

use bevy::prelude::Resource;
use log::{debug, error, warn};

use crate::actor::{DirectionalActor, GroupActor, PathActor, UpdateOutcome};
use crate::error::PathError;
use crate::host::{Handle, Host};
use crate::params::{DirectionalParams, GroupParams};
use crate::settings::DriverSettings;

/// Numeric attributes readable and writable through
/// [`PathDriver::stat`] and [`PathDriver::set_stat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKey {
    /// Time multiplier.
    Speed,
}

impl StatKey {
    /// Name used by scene scripts.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Speed => "speed",
        }
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StatKey {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "speed" => Ok(Self::Speed),
            other => Err(PathError::invalid(format!("unknown stat `{other}`"))),
        }
    }
}

/// What happened during one [`PathDriver::tick`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Actors that moved, or waited, and remain registered.
    pub advanced: usize,
    /// Actors that reached the end of their path.
    pub finished: Vec<Handle>,
    /// Actors dropped because their actor or presentation handle went stale.
    pub detached: Vec<Handle>,
    /// Actors dropped because their update failed.
    pub failed: Vec<Handle>,
}

impl TickSummary {
    /// Number of actors removed this tick.
    #[must_use]
    pub fn removed(&self) -> usize {
        self.finished.len() + self.detached.len() + self.failed.len()
    }
}

/// Owns the path state of every animated actor.
///
/// Actors are kept in insertion order and each is updated exactly once per
/// tick.
#[derive(Resource, Debug, Clone, Default)]
pub struct PathDriver {
    actors: Vec<PathActor>,
    settings: DriverSettings,
}

impl PathDriver {
    /// Creates an empty driver.
    #[must_use]
    pub const fn new(settings: DriverSettings) -> Self {
        Self {
            actors: Vec::new(),
            settings,
        }
    }

    /// Settings applied to every actor.
    #[must_use]
    pub const fn settings(&self) -> &DriverSettings {
        &self.settings
    }

    /// Number of registered actors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Whether no actors are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Whether `actor` has path state.
    #[must_use]
    pub fn contains(&self, actor: Handle) -> bool {
        self.position(actor).is_some()
    }

    /// Path state registered for `actor`.
    #[must_use]
    pub fn actor(&self, actor: Handle) -> Option<&PathActor> {
        self.actors.iter().find(|entry| entry.handle() == actor)
    }

    /// Registered actors in update order.
    pub fn actors(&self) -> impl Iterator<Item = &PathActor> {
        self.actors.iter()
    }

    fn position(&self, actor: Handle) -> Option<usize> {
        self.actors.iter().position(|entry| entry.handle() == actor)
    }

    fn actor_mut(&mut self, actor: Handle) -> Result<&mut PathActor, PathError> {
        self.actors
            .iter_mut()
            .find(|entry| entry.handle() == actor)
            .ok_or(PathError::NotFound(actor))
    }

    /// Registers a directional actor and places its sprite at the start of
    /// the path.
    ///
    /// # Errors
    /// Returns [`PathError::InvalidArgument`] when the record is out of range
    /// or either handle is stale. The driver is unchanged on error.
    pub fn add_directional<H: Host>(
        &mut self,
        host: &mut H,
        params: DirectionalParams,
    ) -> Result<(), PathError> {
        params.validate().inspect_err(|err| warn!("rejected directional actor: {err}"))?;
        self.install(host, DirectionalActor::from_params(params).into())
    }

    /// Registers a group actor and places its sprite at the start of the
    /// path.
    ///
    /// # Errors
    /// Returns [`PathError::InvalidArgument`] when the record is out of range
    /// or either handle is stale. The driver is unchanged on error.
    pub fn add_group<H: Host>(
        &mut self,
        host: &mut H,
        params: GroupParams,
    ) -> Result<(), PathError> {
        params.validate().inspect_err(|err| warn!("rejected group actor: {err}"))?;
        self.install(host, GroupActor::from_params(params).into())
    }

    fn install<H: Host>(&mut self, host: &mut H, entry: PathActor) -> Result<(), PathError> {
        let actor = entry.handle();
        let presentation = entry.state().presentation();
        if !host.exists(actor) {
            warn!("rejected actor {actor}: actor handle is stale");
            return Err(PathError::invalid(format!("actor {actor} does not exist")));
        }
        let Some(mut sprite) = host.presentation(presentation) else {
            warn!("rejected actor {actor}: presentation {presentation} is stale");
            return Err(PathError::invalid(format!(
                "presentation {presentation} does not exist"
            )));
        };
        entry.init(&mut sprite)?;

        if let Some(slot) = self.position(actor) {
            debug!("replaced path state for actor {actor}");
            if let Some(existing) = self.actors.get_mut(slot) {
                *existing = entry;
            }
        } else {
            debug!("added path state for actor {actor}");
            self.actors.push(entry);
        }
        Ok(())
    }

    /// Drops the path state of `actor`. Returns whether it was registered.
    pub fn remove(&mut self, actor: Handle) -> bool {
        let before = self.actors.len();
        self.actors.retain(|entry| entry.handle() != actor);
        let removed = self.actors.len() != before;
        if removed {
            debug!("removed path state for actor {actor}");
        }
        removed
    }

    /// Drops every actor.
    pub fn clear(&mut self) {
        self.actors.clear();
    }

    /// Advances every actor by `dt` seconds and prunes the ones that ended.
    ///
    /// A failing actor is logged and removed; the others still update.
    pub fn tick<H: Host>(&mut self, host: &mut H, dt: f32) -> TickSummary {
        let mut summary = TickSummary::default();
        let settings = self.settings;
        self.actors.retain_mut(|entry| {
            let actor = entry.handle();
            let state = entry.state();
            if !host.exists(actor) || !host.exists(state.presentation()) {
                debug!("dropping actor {actor}: handle went stale");
                summary.detached.push(actor);
                return false;
            }
            entry.state_mut().advance(dt);
            match entry.update(host, &settings) {
                Ok(UpdateOutcome::Alive) => {
                    summary.advanced += 1;
                    true
                }
                Ok(UpdateOutcome::Finished) => {
                    summary.finished.push(actor);
                    false
                }
                Ok(UpdateOutcome::Detached) => {
                    debug!("dropping actor {actor}: presentation no longer resolves");
                    summary.detached.push(actor);
                    false
                }
                Err(err) => {
                    error!("dropping actor {actor}: {err}");
                    summary.failed.push(actor);
                    false
                }
            }
        });
        summary
    }

    /// Sets the clock of `actor` to `elapsed` and updates it once.
    ///
    /// The actor stays registered whatever the outcome, so a scrub past the
    /// end can be followed by a scrub back. The next [`PathDriver::tick`]
    /// prunes it if it is still finished.
    ///
    /// # Errors
    /// Returns [`PathError::NotFound`] for an unknown actor, or the update
    /// error.
    pub fn seek<H: Host>(
        &mut self,
        host: &mut H,
        actor: Handle,
        elapsed: f32,
    ) -> Result<UpdateOutcome, PathError> {
        let settings = self.settings;
        let entry = self.actor_mut(actor)?;
        entry.state_mut().seek_to(elapsed);
        entry.update(host, &settings)
    }

    /// Seconds of active time the path of `actor` takes.
    ///
    /// # Errors
    /// Returns [`PathError::NotFound`] for an unknown actor.
    pub fn length(&self, actor: Handle) -> Result<f32, PathError> {
        self.actor(actor)
            .map(|entry| entry.state().length())
            .ok_or(PathError::NotFound(actor))
    }

    /// Reads a stat.
    ///
    /// # Errors
    /// Returns [`PathError::NotFound`] for an unknown actor.
    pub fn stat(&self, actor: Handle, key: StatKey) -> Result<f32, PathError> {
        let state = self
            .actor(actor)
            .ok_or(PathError::NotFound(actor))?
            .state();
        Ok(match key {
            StatKey::Speed => state.speed(),
        })
    }

    /// Writes a stat.
    ///
    /// # Errors
    /// Returns [`PathError::NotFound`] for an unknown actor and
    /// [`PathError::InvalidArgument`] for a non-finite value.
    pub fn set_stat(&mut self, actor: Handle, key: StatKey, value: f32) -> Result<(), PathError> {
        if !value.is_finite() {
            return Err(PathError::invalid(format!("{key} must be finite, got {value}")));
        }
        let state = self.actor_mut(actor)?.state_mut();
        match key {
            StatKey::Speed => state.set_speed(value),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemoryHost;
    use crate::params::CommonParams;
    use crate::path::PathPoints;
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};

    struct Scene {
        host: MemoryHost,
        driver: PathDriver,
        actor: Handle,
        sprite: Handle,
    }

    fn straight(actor: Handle, sprite: Handle) -> DirectionalParams {
        DirectionalParams::new(CommonParams::new(
            actor,
            sprite,
            1.0,
            PathPoints::new(vec![0, 0, 100, 0, 200, 0]).expect("even length"),
        ))
    }

    #[fixture]
    fn scene() -> Scene {
        let mut host = MemoryHost::new();
        let actor = host.spawn_actor();
        let sprite = host.spawn_sprite();
        let mut driver = PathDriver::default();
        driver
            .add_directional(&mut host, straight(actor, sprite))
            .expect("live handles");
        Scene {
            host,
            driver,
            actor,
            sprite,
        }
    }

    #[rstest]
    fn stale_handles_are_rejected_on_add() {
        let mut host = MemoryHost::new();
        let actor = host.spawn_actor();
        let mut driver = PathDriver::default();
        let result = driver.add_directional(&mut host, straight(actor, Handle(99)));
        assert!(matches!(result, Err(PathError::InvalidArgument(_))));
        assert!(driver.is_empty());
    }

    #[rstest]
    fn adding_twice_replaces_state(mut scene: Scene) {
        let mut params = straight(scene.actor, scene.sprite);
        params.common.ratio = 4.0;
        scene
            .driver
            .add_directional(&mut scene.host, params)
            .expect("live handles");
        assert_eq!(scene.driver.len(), 1);
        assert_relative_eq!(scene.driver.length(scene.actor).expect("registered"), 0.75);
    }

    #[rstest]
    fn stat_keys_parse_by_name() {
        assert_eq!("speed".parse::<StatKey>(), Ok(StatKey::Speed));
        assert!(matches!(
            "colour".parse::<StatKey>(),
            Err(PathError::InvalidArgument(_))
        ));
    }

    #[rstest]
    fn speed_stat_round_trips(mut scene: Scene) {
        scene
            .driver
            .set_stat(scene.actor, StatKey::Speed, 2.5)
            .expect("registered");
        assert_relative_eq!(
            scene.driver.stat(scene.actor, StatKey::Speed).expect("registered"),
            2.5
        );
        assert!(scene
            .driver
            .set_stat(scene.actor, StatKey::Speed, f32::NAN)
            .is_err());
    }

    #[rstest]
    fn unknown_actors_are_not_found(mut scene: Scene) {
        let ghost = Handle(404);
        assert_eq!(scene.driver.length(ghost), Err(PathError::NotFound(ghost)));
        assert_eq!(
            scene.driver.stat(ghost, StatKey::Speed),
            Err(PathError::NotFound(ghost))
        );
        assert_eq!(
            scene.driver.seek(&mut scene.host, ghost, 1.0),
            Err(PathError::NotFound(ghost))
        );
        assert!(!scene.driver.remove(ghost));
    }

    #[rstest]
    fn despawned_actor_is_pruned_on_tick(mut scene: Scene) {
        scene.host.despawn(scene.actor);
        let summary = scene.driver.tick(&mut scene.host, 1.0 / 60.0);
        assert_eq!(summary.detached, vec![scene.actor]);
        assert!(scene.driver.is_empty());
        assert!(scene.host.events().is_empty());
    }

    #[rstest]
    fn seeking_past_the_end_then_back_keeps_the_actor(mut scene: Scene) {
        let outcome = scene.driver.seek(&mut scene.host, scene.actor, 3.0);
        assert_eq!(outcome, Ok(UpdateOutcome::Finished));
        assert!(scene.driver.contains(scene.actor));

        let back = scene.driver.seek(&mut scene.host, scene.actor, 1.0);
        assert_eq!(back, Ok(UpdateOutcome::Alive));
        let position = scene.host.sprite(scene.sprite).expect("sprite").position;
        assert_relative_eq!(position.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(position.y, 0.0, epsilon = 1e-5);
    }

    #[rstest]
    fn tick_prunes_an_actor_left_past_the_end(mut scene: Scene) {
        scene
            .driver
            .seek(&mut scene.host, scene.actor, 3.0)
            .expect("registered");
        let summary = scene.driver.tick(&mut scene.host, 1.0 / 60.0);
        assert_eq!(summary.finished, vec![scene.actor]);
        assert!(scene.driver.is_empty());
    }

    #[rstest]
    fn clear_drops_everything(mut scene: Scene) {
        scene.driver.clear();
        assert!(scene.driver.is_empty());
        assert_eq!(scene.driver.tick(&mut scene.host, 0.1), TickSummary::default());
    }
}
