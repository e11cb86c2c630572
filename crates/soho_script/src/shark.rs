//! Shark: animation cycle, video player and node modifier playground

use crate::config::{SceneConfig, SharkConfig};
use crate::SetupContext;
use soho_math::{Color4, Vec3};
use soho_scene::{
    Entity, GltfNodeModifiers, NodeModifier, PbrMaterial, Result, Texture, UnlitMaterial,
    VideoPlayer,
};
use soho_triggers::{
    random_hex_color, AnimationCycle, ClearOverride, Dispatcher, PointerEventOpts,
    ReplaceOverride,
};
use std::sync::Arc;

/// Row of shark triggers, all at this height and depth
const ROW_Y: f32 = 1.0;
const ROW_Z: f32 = 47.0;

fn row(x: f32) -> Vec3 {
    Vec3::new(x, ROW_Y, ROW_Z)
}

/// Video frames on every node
pub fn video_everywhere(shark: Entity) -> GltfNodeModifiers {
    GltfNodeModifiers::single(
        NodeModifier::whole_model()
            .with_material(PbrMaterial::new().with_texture(Texture::video(shark))),
    )
}

/// Video frames on the back node only
pub fn video_on_back(shark: Entity, paths: &SharkConfig) -> GltfNodeModifiers {
    GltfNodeModifiers::single(
        NodeModifier::new(paths.back_path.as_str())
            .with_material(PbrMaterial::new().with_texture(Texture::video(shark))),
    )
}

pub fn no_shadows() -> GltfNodeModifiers {
    GltfNodeModifiers::single(NodeModifier::whole_model().with_cast_shadows(false))
}

/// Glowing white eyes, unlit fins, colored back and belly
pub fn all_nodes(
    paths: &SharkConfig,
    eyes_glow: Color4,
    fin: Color4,
    back: Color4,
    belly: Color4,
) -> GltfNodeModifiers {
    GltfNodeModifiers::new(vec![
        NodeModifier::new(paths.eyes_path.as_str()).with_material(
            PbrMaterial::new()
                .with_albedo(Color4::white())
                .with_emissive(eyes_glow.rgb(), 100.0),
        ),
        NodeModifier::new(paths.fin_path.as_str())
            .with_material(UnlitMaterial::default().with_diffuse(fin)),
        NodeModifier::new(paths.back_path.as_str())
            .with_material(PbrMaterial::new().with_albedo(back)),
        NodeModifier::new(paths.belly_path.as_str())
            .with_material(PbrMaterial::new().with_albedo(belly)),
    ])
}

/// Wire the shark. Returns its animation cycle so the caller can observe it.
pub(crate) fn setup_shark(cx: &mut SetupContext<'_>) -> Result<Arc<AnimationCycle>> {
    let config: &SceneConfig = cx.config;
    let shark = cx.host.entity_by_name(&config.entities.shark)?;
    let paths = &config.shark;

    let cycle = Arc::new(AnimationCycle::swim_and_bite(
        shark,
        &paths.swim_clip,
        &paths.bite_clip,
    ));
    cx.register(
        "shark_animate",
        shark,
        PointerEventOpts::new("Animate!"),
        cycle.clone().into_callback(),
    );

    cx.host.create_video_player(
        shark,
        VideoPlayer::new(config.assets.shark_video.as_str()).playing(true),
    )?;

    let video_all = ReplaceOverride::fixed(shark, video_everywhere(shark));
    cx.cube("shark_video_all", row(52.0), "VIDEO on ALL the Shark", video_all.into_callback())?;

    let video_back = ReplaceOverride::fixed(shark, video_on_back(shark, paths));
    cx.cube("shark_video_back", row(50.0), "VIDEO on Shark's Back", video_back.into_callback())?;

    let eyes_path = paths.eyes_path.clone();
    let eyes = ReplaceOverride::new(shark, cx.rng(), move |rng| {
        GltfNodeModifiers::single(
            NodeModifier::new(eyes_path.as_str())
                .with_material(PbrMaterial::new().with_albedo(random_hex_color(rng))),
        )
    });
    cx.cube("shark_eyes", row(48.0), "Change shark EYEs node", eyes.into_callback())?;

    let shadows = ReplaceOverride::fixed(shark, no_shadows());
    cx.cube("shark_shadows", row(46.0), "Disable shark shadows", shadows.into_callback())?;

    let all_paths = paths.clone();
    let all = ReplaceOverride::new(shark, cx.rng(), move |rng| {
        let eyes_glow = random_hex_color(rng);
        let fin = random_hex_color(rng);
        let back = random_hex_color(rng);
        let belly = random_hex_color(rng);
        all_nodes(&all_paths, eyes_glow, fin, back, belly)
    });
    cx.cube("shark_all_nodes", row(44.0), "Change ALL nodes", all.into_callback())?;

    let reset = ClearOverride::new(shark);
    cx.cube("shark_reset", row(42.0), "REMOVE GltfNodeModifier", reset.into_callback())?;

    Ok(cycle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use soho_scene::Material;

    #[test]
    fn test_video_targets_the_shark_player() {
        let shark = Entity::from_raw(6);
        let modifiers = video_everywhere(shark);
        let whole = modifiers.get("").unwrap();
        match &whole.material {
            Some(Material::Pbr(pbr)) => assert_eq!(pbr.texture, Some(Texture::video(shark))),
            other => panic!("unexpected material {:?}", other),
        }

        let back = video_on_back(shark, &SharkConfig::default());
        assert!(back
            .get("Scene_root/shark_skeleton/Sphere/Sphere.001/Sphere_2")
            .is_some());
    }

    #[test]
    fn test_all_nodes_layout() {
        let red = Color4::red();
        let modifiers = all_nodes(&SharkConfig::default(), red, red, red, red);
        assert_eq!(modifiers.len(), 4);

        let eyes = modifiers.get("Scene_root/shark_skeleton/Sphere/Sphere.001").unwrap();
        match &eyes.material {
            Some(Material::Pbr(pbr)) => {
                assert_eq!(pbr.albedo_color, Some(Color4::white()));
                assert_eq!(pbr.emissive_intensity, Some(100.0));
                assert_eq!(pbr.emissive_color, Some(red.rgb()));
            }
            other => panic!("unexpected material {:?}", other),
        }

        let fin = modifiers
            .get("Scene_root/shark_skeleton/Sphere/Sphere.001/Sphere_1")
            .unwrap();
        assert!(matches!(&fin.material, Some(Material::Unlit(unlit)) if unlit.diffuse_color == Some(red)));
    }

    #[test]
    fn test_no_shadows_has_no_material() {
        let modifiers = no_shadows();
        let whole = modifiers.get("").unwrap();
        assert_eq!(whole.cast_shadows, Some(false));
        assert!(whole.material.is_none());
    }
}
