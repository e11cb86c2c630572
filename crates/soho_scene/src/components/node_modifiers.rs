//! glTF node modifiers
//!
//! A node modifier overrides the material (or shadow casting) of one named
//! node inside a model instance without touching the underlying asset. The
//! empty path addresses the whole model.

use super::material::Material;
use serde::{Deserialize, Serialize};

/// Override for a single node path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeModifier {
    /// Slash-separated node path; empty means every node
    pub path: String,
    pub material: Option<Material>,
    pub cast_shadows: Option<bool>,
}

impl NodeModifier {
    /// Modifier targeting `path` with no overrides yet
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            material: None,
            cast_shadows: None,
        }
    }

    /// Modifier addressing the whole model
    pub fn whole_model() -> Self {
        Self::new("")
    }

    pub fn with_material(mut self, material: impl Into<Material>) -> Self {
        self.material = Some(material.into());
        self
    }

    pub fn with_cast_shadows(mut self, cast_shadows: bool) -> Self {
        self.cast_shadows = Some(cast_shadows);
        self
    }

    pub fn is_whole_model(&self) -> bool {
        self.path.is_empty()
    }
}

/// The full set of overrides attached to one entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GltfNodeModifiers {
    pub modifiers: Vec<NodeModifier>,
}

impl GltfNodeModifiers {
    pub fn new(modifiers: Vec<NodeModifier>) -> Self {
        Self { modifiers }
    }

    pub fn single(modifier: NodeModifier) -> Self {
        Self::new(vec![modifier])
    }

    /// Modifier for an exact node path
    pub fn get(&self, path: &str) -> Option<&NodeModifier> {
        self.modifiers.iter().find(|m| m.path == path)
    }

    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::material::PbrMaterial;
    use soho_math::Color4;

    #[test]
    fn test_lookup_by_path() {
        let mods = GltfNodeModifiers::new(vec![
            NodeModifier::new("TRex").with_material(PbrMaterial::new().with_albedo(Color4::red())),
            NodeModifier::whole_model().with_cast_shadows(false),
        ]);

        assert_eq!(mods.len(), 2);
        assert!(mods.get("TRex").unwrap().material.is_some());
        assert!(mods.get("").unwrap().is_whole_model());
        assert!(mods.get("TRex.001").is_none());
    }

    #[test]
    fn test_serializes_for_snapshots() {
        let mods = GltfNodeModifiers::single(NodeModifier::whole_model().with_cast_shadows(false));
        let json = serde_json::to_string(&mods).unwrap();
        assert!(json.contains("\"cast_shadows\":false"));
    }
}
