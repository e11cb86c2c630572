//! In-process scene host
//!
//! `MemoryScene` stores components in plain maps. It backs the headless
//! runtime and every test that needs a host, and enforces the same rules a
//! real host would: unknown names and handles are errors, `create` refuses
//! to overwrite, video textures must point at an entity with a player.

use crate::components::{
    Animator, GltfNodeModifiers, LightSource, Material, MeshCollider, MeshRenderer, Texture,
    Transform, VideoPlayer,
};
use crate::entity::Entity;
use crate::error::{Result, SceneError};
use crate::host::SceneHost;
use serde::Serialize;
use soho_math::{ray_aabb, Ray};
use std::collections::{BTreeMap, HashMap};

/// Components stored for one entity
#[derive(Debug, Clone, Default, Serialize)]
pub struct EntityRecord {
    pub entity: Option<Entity>,
    pub name: Option<String>,
    pub transform: Option<Transform>,
    pub mesh: Option<MeshRenderer>,
    pub collider: Option<MeshCollider>,
    pub node_modifiers: Option<GltfNodeModifiers>,
    pub light: Option<LightSource>,
    pub video_player: Option<VideoPlayer>,
    pub animator: Option<Animator>,
}

/// Scene host backed by in-memory maps
#[derive(Debug, Default)]
pub struct MemoryScene {
    entities: BTreeMap<Entity, EntityRecord>,
    names: HashMap<String, Entity>,
    next_id: u32,
    entity_limit: Option<usize>,
}

impl MemoryScene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of live entities
    pub fn with_entity_limit(mut self, limit: usize) -> Self {
        self.entity_limit = Some(limit);
        self
    }

    /// Add a pre-authored entity with a stable name, as a scene composite would
    pub fn spawn_named(&mut self, name: impl Into<String>, transform: Transform) -> Result<Entity> {
        let name = name.into();
        let entity = self.add_entity()?;
        if let Some(record) = self.entities.get_mut(&entity) {
            record.name = Some(name.clone());
            record.transform = Some(transform);
        }
        self.names.insert(name, entity);
        Ok(entity)
    }

    /// Give an entity an animator with the clips baked into its model
    pub fn insert_animator(&mut self, entity: Entity, animator: Animator) -> Result<()> {
        self.record_mut(entity)?.animator = Some(animator);
        Ok(())
    }

    pub fn record(&self, entity: Entity) -> Option<&EntityRecord> {
        self.entities.get(&entity)
    }

    /// All entities in creation order
    pub fn records(&self) -> impl Iterator<Item = &EntityRecord> {
        self.entities.values()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn light(&self, entity: Entity) -> Option<&LightSource> {
        self.entities.get(&entity)?.light.as_ref()
    }

    pub fn video_player(&self, entity: Entity) -> Option<&VideoPlayer> {
        self.entities.get(&entity)?.video_player.as_ref()
    }

    pub fn animator(&self, entity: Entity) -> Option<&Animator> {
        self.entities.get(&entity)?.animator.as_ref()
    }

    fn record_mut(&mut self, entity: Entity) -> Result<&mut EntityRecord> {
        self.entities
            .get_mut(&entity)
            .ok_or(SceneError::EntityNotFound(entity))
    }

    fn animator_mut(&mut self, entity: Entity) -> Result<&mut Animator> {
        self.record_mut(entity)?
            .animator
            .as_mut()
            .ok_or(SceneError::MissingComponent {
                entity,
                component: "Animator",
            })
    }

    /// Video textures must reference a live entity carrying a player
    fn check_textures(&self, modifiers: &GltfNodeModifiers) -> Result<()> {
        for modifier in &modifiers.modifiers {
            let texture = match &modifier.material {
                Some(Material::Pbr(pbr)) => pbr.texture.as_ref(),
                Some(Material::Unlit(unlit)) => unlit.texture.as_ref(),
                None => None,
            };
            if let Some(Texture::Video { video_player_entity }) = texture {
                if self.video_player(*video_player_entity).is_none() {
                    return Err(SceneError::MissingComponent {
                        entity: *video_player_entity,
                        component: "VideoPlayer",
                    });
                }
            }
        }
        Ok(())
    }
}

impl SceneHost for MemoryScene {
    fn entity_by_name(&self, name: &str) -> Result<Entity> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| SceneError::NameNotFound(name.to_string()))
    }

    fn add_entity(&mut self) -> Result<Entity> {
        if let Some(limit) = self.entity_limit {
            if self.entities.len() >= limit {
                return Err(SceneError::EntityLimit(limit));
            }
        }
        let entity = Entity::from_raw(self.next_id);
        self.next_id += 1;
        self.entities.insert(
            entity,
            EntityRecord {
                entity: Some(entity),
                ..Default::default()
            },
        );
        log::trace!("added {}", entity);
        Ok(entity)
    }

    fn transform(&self, entity: Entity) -> Result<Transform> {
        let record = self
            .entities
            .get(&entity)
            .ok_or(SceneError::EntityNotFound(entity))?;
        record.transform.ok_or(SceneError::MissingComponent {
            entity,
            component: "Transform",
        })
    }

    fn set_transform(&mut self, entity: Entity, transform: Transform) -> Result<()> {
        self.record_mut(entity)?.transform = Some(transform);
        Ok(())
    }

    fn set_mesh(&mut self, entity: Entity, mesh: MeshRenderer) -> Result<()> {
        self.record_mut(entity)?.mesh = Some(mesh);
        Ok(())
    }

    fn set_collider(&mut self, entity: Entity, collider: MeshCollider) -> Result<()> {
        self.record_mut(entity)?.collider = Some(collider);
        Ok(())
    }

    fn pick(&self, ray: &Ray) -> Option<(Entity, f32)> {
        self.entities
            .iter()
            .filter_map(|(&entity, record)| {
                let transform = record.transform?;
                match record.collider? {
                    MeshCollider::Box => {
                        ray_aabb(ray, &transform.unit_box_bounds()).map(|t| (entity, t))
                    }
                }
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    fn create_node_modifiers(
        &mut self,
        entity: Entity,
        modifiers: GltfNodeModifiers,
    ) -> Result<()> {
        self.check_textures(&modifiers)?;
        let record = self.record_mut(entity)?;
        if record.node_modifiers.is_some() {
            return Err(SceneError::ComponentExists {
                entity,
                component: "GltfNodeModifiers",
            });
        }
        record.node_modifiers = Some(modifiers);
        Ok(())
    }

    fn create_or_replace_node_modifiers(
        &mut self,
        entity: Entity,
        modifiers: GltfNodeModifiers,
    ) -> Result<()> {
        self.check_textures(&modifiers)?;
        let record = self.record_mut(entity)?;
        if record.node_modifiers.replace(modifiers).is_some() {
            log::trace!("replaced node modifiers on {}", entity);
        }
        Ok(())
    }

    fn node_modifiers(&self, entity: Entity) -> Option<&GltfNodeModifiers> {
        self.entities.get(&entity)?.node_modifiers.as_ref()
    }

    fn delete_node_modifiers(&mut self, entity: Entity) -> Option<GltfNodeModifiers> {
        self.entities.get_mut(&entity)?.node_modifiers.take()
    }

    fn create_light(&mut self, entity: Entity, light: LightSource) -> Result<()> {
        let record = self.record_mut(entity)?;
        if record.light.is_some() {
            return Err(SceneError::ComponentExists {
                entity,
                component: "LightSource",
            });
        }
        record.light = Some(light);
        Ok(())
    }

    fn create_video_player(&mut self, entity: Entity, player: VideoPlayer) -> Result<()> {
        let record = self.record_mut(entity)?;
        if record.video_player.is_some() {
            return Err(SceneError::ComponentExists {
                entity,
                component: "VideoPlayer",
            });
        }
        record.video_player = Some(player);
        Ok(())
    }

    fn play_single_animation(&mut self, entity: Entity, clip: &str) -> Result<()> {
        if self.animator_mut(entity)?.play_single(clip) {
            Ok(())
        } else {
            Err(SceneError::ClipNotFound {
                entity,
                clip: clip.to_string(),
            })
        }
    }

    fn set_clip_playing(&mut self, entity: Entity, clip: &str, playing: bool) -> Result<()> {
        let state = self
            .animator_mut(entity)?
            .clip_mut(clip)
            .ok_or_else(|| SceneError::ClipNotFound {
                entity,
                clip: clip.to_string(),
            })?;
        state.playing = playing;
        Ok(())
    }

    fn clip_playing(&self, entity: Entity, clip: &str) -> Result<bool> {
        let animator = self
            .entities
            .get(&entity)
            .ok_or(SceneError::EntityNotFound(entity))?
            .animator
            .as_ref()
            .ok_or(SceneError::MissingComponent {
                entity,
                component: "Animator",
            })?;
        animator
            .clip(clip)
            .map(|state| state.playing)
            .ok_or_else(|| SceneError::ClipNotFound {
                entity,
                clip: clip.to_string(),
            })
    }

    fn stop_all_animations(&mut self, entity: Entity) -> Result<()> {
        self.animator_mut(entity)?.stop_all();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{NodeModifier, PbrMaterial};
    use soho_math::{Color4, Vec3};

    fn scene_with_model() -> (MemoryScene, Entity) {
        let mut scene = MemoryScene::new();
        let model = scene
            .spawn_named("wenmoon", Transform::from_position(Vec3::new(64.0, 0.0, 44.0)))
            .unwrap();
        (scene, model)
    }

    fn red_override() -> GltfNodeModifiers {
        GltfNodeModifiers::single(
            NodeModifier::whole_model().with_material(PbrMaterial::new().with_albedo(Color4::red())),
        )
    }

    #[test]
    fn test_lookup_by_name() {
        let (scene, model) = scene_with_model();
        assert_eq!(scene.entity_by_name("wenmoon"), Ok(model));
        assert_eq!(
            scene.entity_by_name("missing"),
            Err(SceneError::NameNotFound("missing".into()))
        );
    }

    #[test]
    fn test_create_refuses_overwrite() {
        let (mut scene, model) = scene_with_model();
        scene.create_node_modifiers(model, red_override()).unwrap();
        let err = scene.create_node_modifiers(model, red_override()).unwrap_err();
        assert!(matches!(err, SceneError::ComponentExists { .. }));
    }

    #[test]
    fn test_create_or_replace_keeps_one_set() {
        let (mut scene, model) = scene_with_model();
        scene.create_or_replace_node_modifiers(model, red_override()).unwrap();
        let shadows_off = GltfNodeModifiers::single(NodeModifier::whole_model().with_cast_shadows(false));
        scene
            .create_or_replace_node_modifiers(model, shadows_off.clone())
            .unwrap();
        assert_eq!(scene.node_modifiers(model), Some(&shadows_off));

        assert!(scene.delete_node_modifiers(model).is_some());
        assert!(!scene.has_node_modifiers(model));
        assert!(scene.delete_node_modifiers(model).is_none());
    }

    #[test]
    fn test_video_texture_needs_player() {
        let (mut scene, model) = scene_with_model();
        let video = GltfNodeModifiers::single(
            NodeModifier::whole_model()
                .with_material(PbrMaterial::new().with_texture(Texture::video(model))),
        );
        assert!(scene.create_or_replace_node_modifiers(model, video.clone()).is_err());

        scene
            .create_video_player(model, VideoPlayer::new("https://example.invalid/a.m3u8"))
            .unwrap();
        assert!(scene.create_or_replace_node_modifiers(model, video).is_ok());
    }

    #[test]
    fn test_entity_limit() {
        let mut scene = MemoryScene::new().with_entity_limit(1);
        scene.add_entity().unwrap();
        assert_eq!(scene.add_entity(), Err(SceneError::EntityLimit(1)));
    }

    #[test]
    fn test_pick_nearest_collider() {
        let mut scene = MemoryScene::new();
        let near = scene.add_entity().unwrap();
        let far = scene.add_entity().unwrap();
        let cube = Vec3::splat(0.5);
        scene
            .set_transform(near, Transform::from_position(Vec3::new(0.0, 1.0, 5.0)).with_scale(cube))
            .unwrap();
        scene
            .set_transform(far, Transform::from_position(Vec3::new(0.0, 1.0, 10.0)).with_scale(cube))
            .unwrap();
        scene.set_collider(near, MeshCollider::Box).unwrap();
        scene.set_collider(far, MeshCollider::Box).unwrap();

        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Z);
        assert_eq!(scene.pick(&ray).map(|(e, _)| e), Some(near));

        let miss = Ray::new(Vec3::new(3.0, 1.0, 0.0), Vec3::Z);
        assert!(scene.pick(&miss).is_none());
    }

    #[test]
    fn test_animation_errors() {
        let (mut scene, model) = scene_with_model();
        assert!(matches!(
            scene.play_single_animation(model, "swim"),
            Err(SceneError::MissingComponent { .. })
        ));

        scene
            .insert_animator(model, Animator::with_clips(["swim", "bite"]))
            .unwrap();
        scene.play_single_animation(model, "swim").unwrap();
        scene.set_clip_playing(model, "bite", true).unwrap();
        assert!(scene.clip_playing(model, "swim").unwrap());
        assert!(scene.clip_playing(model, "bite").unwrap());
        assert!(matches!(
            scene.clip_playing(model, "dance"),
            Err(SceneError::ClipNotFound { .. })
        ));

        scene.stop_all_animations(model).unwrap();
        assert!(!scene.clip_playing(model, "swim").unwrap());
    }
}
