//! In-memory host used by the `pathsim` binary and by tests.
//!
//! Objects live in hash maps keyed by [`Handle`]; despawning removes them so
//! the driver observes stale handles exactly as it would in a real scene.

use glam::Vec2;
use hashbrown::{HashMap, HashSet};
use log::debug;

use super::{ActorEvent, Handle, Host, Presentation};

/// Plain presentation record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemorySprite {
    /// Whether the sprite animation is playing.
    pub active: bool,
    /// Last playhead requested through [`Presentation::seek`].
    pub playhead: Option<f32>,
    /// Opacity in `0.0..=1.0`.
    pub opacity: f32,
    /// Position in scene units.
    pub position: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
}

impl Default for MemorySprite {
    fn default() -> Self {
        Self {
            active: false,
            playhead: None,
            opacity: 1.0,
            position: Vec2::ZERO,
            rotation: 0.0,
        }
    }
}

impl Presentation for MemorySprite {
    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn seek(&mut self, time: f32) {
        self.playhead = Some(time);
    }

    fn opacity(&self) -> f32 {
        self.opacity
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    fn rotation(&self) -> f32 {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
    }
}

/// Scene of bare actors and sprites.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    next_id: u64,
    actors: HashSet<Handle>,
    sprites: HashMap<Handle, MemorySprite>,
    events: Vec<(Handle, ActorEvent)>,
}

impl MemoryHost {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> Handle {
        self.next_id += 1;
        Handle(self.next_id)
    }

    /// Creates a new actor object and returns its handle.
    pub fn spawn_actor(&mut self) -> Handle {
        let handle = self.allocate();
        self.actors.insert(handle);
        handle
    }

    /// Creates a new sprite with default state and returns its handle.
    pub fn spawn_sprite(&mut self) -> Handle {
        let handle = self.allocate();
        self.sprites.insert(handle, MemorySprite::default());
        handle
    }

    /// Registers an actor under a caller-chosen handle.
    pub fn insert_actor(&mut self, handle: Handle) {
        self.next_id = self.next_id.max(handle.0);
        self.actors.insert(handle);
    }

    /// Registers a sprite under a caller-chosen handle.
    pub fn insert_sprite(&mut self, handle: Handle, sprite: MemorySprite) {
        self.next_id = self.next_id.max(handle.0);
        self.sprites.insert(handle, sprite);
    }

    /// Destroys whatever object `handle` refers to.
    ///
    /// Returns `true` when something was removed.
    pub fn despawn(&mut self, handle: Handle) -> bool {
        let removed = self.actors.remove(&handle) | self.sprites.remove(&handle).is_some();
        if removed {
            debug!("despawned {handle}");
        }
        removed
    }

    /// Looks up a sprite.
    #[must_use]
    pub fn sprite(&self, handle: Handle) -> Option<&MemorySprite> {
        self.sprites.get(&handle)
    }

    /// Looks up a sprite for modification.
    pub fn sprite_mut(&mut self, handle: Handle) -> Option<&mut MemorySprite> {
        self.sprites.get_mut(&handle)
    }

    /// Lifecycle requests received so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[(Handle, ActorEvent)] {
        &self.events
    }

    /// Removes and returns the recorded lifecycle requests.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, (Handle, ActorEvent)> {
        self.events.drain(..)
    }
}

impl Host for MemoryHost {
    type Presentation<'a> = &'a mut MemorySprite;

    fn exists(&self, handle: Handle) -> bool {
        self.actors.contains(&handle) || self.sprites.contains_key(&handle)
    }

    fn presentation(&mut self, handle: Handle) -> Option<Self::Presentation<'_>> {
        self.sprites.get_mut(&handle)
    }

    fn notify(&mut self, actor: Handle, event: ActorEvent) {
        debug!("actor {actor} notified: {}", event.name());
        self.events.push((actor, event));
    }
}
