#![cfg_attr(docsrs, feature(doc_cfg))]
//! Deterministic path animation for schooling sprites.
//!
//! A [`PathDriver`] owns the path state of many actors and advances them one
//! tick at a time: delays, fade-in, tween-warped progress along fixed-point
//! paths, smoothed steering and end-of-path fadeout requests. Scene objects
//! are reached through the [`Host`] trait; [`plugin`] provides a Bevy host.
pub mod actor;
pub mod constants;
pub mod driver;
pub mod easing;
pub mod error;
pub mod host;
pub mod logging;
pub mod numeric;
pub mod params;
pub mod path;
pub mod plugin;
pub mod settings;
pub mod tween;
pub mod vector_math;
pub use constants::*;

// Re-export commonly used items
pub use actor::{ActorPhase, ActorState, DirectionalActor, GroupActor, PathActor, UpdateOutcome};
pub use driver::{PathDriver, StatKey, TickSummary};
pub use easing::{Ease, Transition};
pub use error::PathError;
pub use host::memory::{MemoryHost, MemorySprite};
pub use host::{ActorEvent, Handle, Host, Presentation};
pub use logging::init as init_logging;
pub use params::{CommonParams, DirectionalParams, GroupParams, SceneParams};
pub use path::PathPoints;
pub use plugin::{PathDriverPlugin, PathFadeout, PathSprite};
pub use settings::DriverSettings;
pub use tween::{TweenPhase, TweenSpec};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use shoal::prelude::*;
    //! ```

    pub use crate::DirectionalParams;
    pub use crate::DriverSettings;
    pub use crate::GroupParams;
    pub use crate::Handle;
    pub use crate::Host;
    pub use crate::PathDriver;
    pub use crate::PathDriverPlugin;
    pub use crate::PathError;
    pub use crate::PathPoints;
    pub use crate::TweenSpec;
}
