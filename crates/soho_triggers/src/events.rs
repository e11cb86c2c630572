//! Pointer events

use serde::{Deserialize, Serialize};
use soho_math::Ray;
use soho_scene::Entity;

/// Input buttons a trigger can listen to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputAction {
    /// Mouse click / tap
    Pointer,
    Primary,
    Secondary,
    /// Matches every button
    Any,
}

impl InputAction {
    /// Whether a registration for `self` accepts a press of `pressed`
    pub fn accepts(self, pressed: InputAction) -> bool {
        self == InputAction::Any || self == pressed
    }
}

impl Default for InputAction {
    fn default() -> Self {
        Self::Pointer
    }
}

/// Registration options for a pointer callback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEventOpts {
    pub button: InputAction,
    /// Label shown while the pointer hovers the entity
    pub hover_text: String,
    /// Farthest hit distance that still activates
    pub max_distance: f32,
}

impl PointerEventOpts {
    pub fn new(hover_text: impl Into<String>) -> Self {
        Self {
            button: InputAction::Pointer,
            hover_text: hover_text.into(),
            max_distance: 10.0,
        }
    }
}

/// Raw input sample delivered by the host input layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub button: InputAction,
    pub pressed: bool,
    /// Ray from the camera through the pointer
    pub ray: Ray,
}

impl PointerInput {
    pub fn press(button: InputAction, ray: Ray) -> Self {
        Self {
            button,
            pressed: true,
            ray,
        }
    }

    pub fn release(button: InputAction, ray: Ray) -> Self {
        Self {
            button,
            pressed: false,
            ray,
        }
    }
}

/// A pointer-down activation delivered to a callback
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub button: InputAction,
    /// Entity whose collider was hit
    pub entity: Entity,
    /// Distance from the ray origin to the hit
    pub distance: f32,
}

impl PointerEvent {
    pub fn down(entity: Entity, button: InputAction, distance: f32) -> Self {
        Self {
            button,
            entity,
            distance,
        }
    }
}
