//! Collaborator interfaces supplied by the host environment.
//!
//! The driver never owns actor or presentation objects. It refers to them
//! through [`Handle`]s and asks the [`Host`] whether they still exist before
//! touching them, so objects may be destroyed externally at any time.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub mod memory;

/// Opaque, externally validated reference to a host-owned object.
///
/// Identity is the stable instance identifier, never a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(pub u64);

impl From<u64> for Handle {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Handle {
    /// Returns the raw instance identifier.
    #[must_use]
    pub const fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle requests sent back to the actor object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorEvent {
    /// The actor reached the end of its path and should fade out and die.
    Fadeout,
}

impl ActorEvent {
    /// Name of the event as the host's scripting layer spells it.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fadeout => "fadeout",
        }
    }
}

/// Visual counterpart of an actor.
///
/// Rotation is in radians, measured counter-clockwise from the positive x
/// axis. Opacity ranges over `0.0..=1.0`.
#[cfg_attr(test, mockall::automock)]
pub trait Presentation {
    /// Whether the sprite animation is playing.
    fn is_active(&self) -> bool;
    /// Starts or stops the sprite animation.
    fn set_active(&mut self, active: bool);
    /// Moves the sprite animation playhead to `time` seconds.
    fn seek(&mut self, time: f32);
    /// Current opacity.
    fn opacity(&self) -> f32;
    /// Sets the opacity.
    fn set_opacity(&mut self, opacity: f32);
    /// Current position.
    fn position(&self) -> Vec2;
    /// Sets the position.
    fn set_position(&mut self, position: Vec2);
    /// Current rotation.
    fn rotation(&self) -> f32;
    /// Sets the rotation.
    fn set_rotation(&mut self, rotation: f32);
}

impl<P: Presentation + ?Sized> Presentation for &mut P {
    fn is_active(&self) -> bool {
        (**self).is_active()
    }

    fn set_active(&mut self, active: bool) {
        (**self).set_active(active);
    }

    fn seek(&mut self, time: f32) {
        (**self).seek(time);
    }

    fn opacity(&self) -> f32 {
        (**self).opacity()
    }

    fn set_opacity(&mut self, opacity: f32) {
        (**self).set_opacity(opacity);
    }

    fn position(&self) -> Vec2 {
        (**self).position()
    }

    fn set_position(&mut self, position: Vec2) {
        (**self).set_position(position);
    }

    fn rotation(&self) -> f32 {
        (**self).rotation()
    }

    fn set_rotation(&mut self, rotation: f32) {
        (**self).set_rotation(rotation);
    }
}

/// Scene graph services consumed by the driver.
pub trait Host {
    /// Borrowed view of a presentation object.
    type Presentation<'a>: Presentation
    where
        Self: 'a;

    /// Liveness check for an actor or presentation handle.
    fn exists(&self, handle: Handle) -> bool;

    /// Resolves a presentation handle, returning `None` once it is gone.
    fn presentation(&mut self, handle: Handle) -> Option<Self::Presentation<'_>>;

    /// Sends a lifecycle request to an actor. The driver does not wait for
    /// the host to act on it.
    fn notify(&mut self, actor: Handle, event: ActorEvent);
}
