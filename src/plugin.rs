//! Bevy integration: runs a [`PathDriver`] against ECS entities.
//!
//! Handles are entity bits. Any entity can serve as an actor; presentation
//! entities carry a [`PathSprite`] next to their `Transform`. Reaching the
//! end of a path triggers a [`PathFadeout`] event for the actor entity.

use bevy::ecs::prelude::On;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use log::debug;

use crate::driver::PathDriver;
use crate::host::{ActorEvent, Handle, Host, Presentation};
use crate::settings::DriverSettings;

/// Sprite animation state driven by the path driver.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component, Default)]
#[require(Transform)]
pub struct PathSprite {
    /// Whether the sprite animation is playing.
    pub active: bool,
    /// Animation playhead in seconds.
    pub playhead: f32,
    /// Opacity in `0.0..=1.0`.
    pub opacity: f32,
}

impl Default for PathSprite {
    fn default() -> Self {
        Self {
            active: false,
            playhead: 0.0,
            opacity: 1.0,
        }
    }
}

/// Event raised when an actor reaches the end of its path.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathFadeout {
    /// Actor that should fade out and despawn.
    pub actor: Entity,
}

impl From<Entity> for Handle {
    fn from(entity: Entity) -> Self {
        Self(entity.to_bits())
    }
}

impl From<Handle> for Entity {
    fn from(handle: Handle) -> Self {
        Self::from_bits(handle.into_inner())
    }
}

/// Borrowed `Transform` and [`PathSprite`] of one presentation entity.
pub struct SpriteView<'a> {
    transform: Mut<'a, Transform>,
    sprite: Mut<'a, PathSprite>,
}

impl Presentation for SpriteView<'_> {
    fn is_active(&self) -> bool {
        self.sprite.active
    }

    fn set_active(&mut self, active: bool) {
        self.sprite.active = active;
    }

    fn seek(&mut self, time: f32) {
        self.sprite.playhead = time;
    }

    fn opacity(&self) -> f32 {
        self.sprite.opacity
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.sprite.opacity = opacity;
    }

    fn position(&self) -> Vec2 {
        self.transform.translation.truncate()
    }

    fn set_position(&mut self, position: Vec2) {
        self.transform.translation.x = position.x;
        self.transform.translation.y = position.y;
    }

    fn rotation(&self) -> f32 {
        self.transform.rotation.to_euler(EulerRot::XYZ).2
    }

    fn set_rotation(&mut self, rotation: f32) {
        self.transform.rotation = Quat::from_rotation_z(rotation);
    }
}

/// [`Host`] over the ECS world.
///
/// Handles passed in must come from `Handle::from(entity)`.
#[derive(SystemParam)]
pub struct EcsHost<'w, 's> {
    entities: Query<'w, 's, Entity>,
    sprites: Query<'w, 's, (&'static mut Transform, &'static mut PathSprite)>,
    commands: Commands<'w, 's>,
}

impl Host for EcsHost<'_, '_> {
    type Presentation<'a>
        = SpriteView<'a>
    where
        Self: 'a;

    fn exists(&self, handle: Handle) -> bool {
        self.entities.contains(Entity::from(handle))
    }

    fn presentation(&mut self, handle: Handle) -> Option<Self::Presentation<'_>> {
        self.sprites
            .get_mut(Entity::from(handle))
            .ok()
            .map(|(transform, sprite)| SpriteView { transform, sprite })
    }

    fn notify(&mut self, actor: Handle, event: ActorEvent) {
        match event {
            ActorEvent::Fadeout => self.commands.trigger(PathFadeout {
                actor: Entity::from(actor),
            }),
        }
    }
}

/// Advances every path by the frame time.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn advance_paths_system(time: Res<Time>, mut driver: ResMut<PathDriver>, mut host: EcsHost) {
    let summary = driver.tick(&mut host, time.delta_secs());
    if summary.removed() > 0 {
        debug!(
            "paths: {} finished, {} detached, {} failed",
            summary.finished.len(),
            summary.detached.len(),
            summary.failed.len()
        );
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
fn log_fadeout(event: On<PathFadeout>) {
    debug!("actor {:?} finished its path", event.event().actor);
}

/// Installs a [`PathDriver`] resource and advances it every `Update`.
#[derive(Debug, Default)]
pub struct PathDriverPlugin {
    /// Settings for the installed driver.
    pub settings: DriverSettings,
}

impl Plugin for PathDriverPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<PathSprite>()
            .insert_resource(PathDriver::new(self.settings))
            .add_observer(log_fadeout)
            .add_systems(Update, advance_paths_system);
    }
}
