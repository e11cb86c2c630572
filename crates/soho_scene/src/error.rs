//! Error types reported by the scene host

use crate::entity::Entity;
use thiserror::Error;

/// Scene host errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    /// No entity carries the requested name
    #[error("No entity named '{0}'")]
    NameNotFound(String),

    /// Entity handle does not refer to a live entity
    #[error("Entity not found: {0}")]
    EntityNotFound(Entity),

    /// `create` was used on an entity that already has the component
    #[error("{entity} already has a {component} component")]
    ComponentExists {
        entity: Entity,
        component: &'static str,
    },

    /// The operation needs a component the entity does not have
    #[error("{entity} has no {component} component")]
    MissingComponent {
        entity: Entity,
        component: &'static str,
    },

    /// Animator has no clip with this name
    #[error("{entity} has no animation clip '{clip}'")]
    ClipNotFound { entity: Entity, clip: String },

    /// The host refused to allocate another entity
    #[error("Entity limit reached ({0})")]
    EntityLimit(usize),
}

/// Result type for scene operations
pub type Result<T> = std::result::Result<T, SceneError>;
