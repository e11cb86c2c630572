//! Soho Triggers - Clickable Trigger Volumes
//!
//! Binds discrete pointer activations to small state machines that mutate
//! the scene through the [`soho_scene::SceneHost`] port.
//!
//! # Features
//!
//! - Pointer-down dispatch, once per press (never while held)
//! - Small clickable cubes with hover labels
//! - Cycling, presence-toggle, replace and clear dispatchers
//! - Random hex colors drawn from an injected random source
//! - Spotlight yaw oscillation (opt-in per frame system)
//!
//! # Example
//!
//! ```ignore
//! use soho_triggers::prelude::*;
//!
//! let blink = PresenceToggle::new(wen_moon, blink_modifiers);
//! create_clickable_cube(&mut scene, &mut pointer_events, position, "Blink", blink.into_callback())?;
//! ```

pub mod events;
pub mod factory;
pub mod oscillation;
pub mod random;
pub mod system;
pub mod toggle;

pub mod prelude {
    pub use crate::events::{InputAction, PointerEvent, PointerEventOpts, PointerInput};
    pub use crate::factory::{create_clickable_cube, CLICKABLE_CUBE_SCALE};
    pub use crate::oscillation::SpotlightOscillator;
    pub use crate::random::{random_hex_color, random_hex_string, seeded_rng, HEX_SYMBOLS};
    pub use crate::system::{PointerCallback, PointerEventsSystem};
    pub use crate::toggle::{
        AnimationCycle, AnimationStep, ClearOverride, Cycle, Dispatcher, Presence, PresenceToggle,
        ReplaceOverride,
    };
}

pub use prelude::*;
