//! Convenience constructors for driver scenes used in tests.

use shoal::{
    CommonParams, DirectionalParams, GroupParams, Handle, MemoryHost, PathDriver, PathPoints,
};

use crate::encode_points;

/// Three points one unit apart along the x axis: `(0,0)`, `(1,0)`, `(2,0)`.
pub fn straight_path() -> PathPoints {
    PathPoints::new(encode_points(&[(0, 0), (1, 0), (2, 0)])).expect("even length")
}

/// A path of `count` points one unit apart along the x axis.
pub fn line_path(count: i32) -> PathPoints {
    let points: Vec<_> = (0..count).map(|x| (x, 0)).collect();
    PathPoints::new(encode_points(&points)).expect("even length")
}

/// Shared fields at their defaults with `ratio` points per second.
pub fn common(actor: Handle, presentation: Handle, ratio: f32, points: PathPoints) -> CommonParams {
    CommonParams::new(actor, presentation, ratio, points)
}

/// Forward, untweened directional record.
pub fn directional(actor: Handle, presentation: Handle, points: PathPoints) -> DirectionalParams {
    DirectionalParams::new(common(actor, presentation, 1.0, points))
}

/// Group record that faces `center` until `center_index`.
pub fn centred_group(
    actor: Handle,
    presentation: Handle,
    points: PathPoints,
    center: glam::Vec2,
    center_index: usize,
) -> GroupParams {
    GroupParams {
        center_index,
        center_pos: center,
        center: true,
        ..GroupParams::new(common(actor, presentation, 1.0, points))
    }
}

/// A host and empty driver.
#[derive(Debug, Clone)]
pub struct Scene {
    /// In-memory scene graph.
    pub host: MemoryHost,
    /// Driver under test.
    pub driver: PathDriver,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            host: MemoryHost::new(),
            driver: PathDriver::default(),
        }
    }
}

impl Scene {
    /// Spawns an actor and a sprite, returning `(actor, sprite)`.
    pub fn spawn_pair(&mut self) -> (Handle, Handle) {
        (self.host.spawn_actor(), self.host.spawn_sprite())
    }

    /// Spawns a pair and registers a directional actor built by `build`.
    ///
    /// # Panics
    /// Panics if the driver rejects the record.
    pub fn add_directional(
        &mut self,
        build: impl FnOnce(Handle, Handle) -> DirectionalParams,
    ) -> (Handle, Handle) {
        let (actor, sprite) = self.spawn_pair();
        self.driver
            .add_directional(&mut self.host, build(actor, sprite))
            .expect("directional actor accepted");
        (actor, sprite)
    }

    /// Spawns a pair and registers a group actor built by `build`.
    ///
    /// # Panics
    /// Panics if the driver rejects the record.
    pub fn add_group(
        &mut self,
        build: impl FnOnce(Handle, Handle) -> GroupParams,
    ) -> (Handle, Handle) {
        let (actor, sprite) = self.spawn_pair();
        self.driver
            .add_group(&mut self.host, build(actor, sprite))
            .expect("group actor accepted");
        (actor, sprite)
    }

    /// Ticks `count` times at `dt` seconds.
    pub fn run(&mut self, count: usize, dt: f32) {
        for _ in 0..count {
            self.driver.tick(&mut self.host, dt);
        }
    }
}
