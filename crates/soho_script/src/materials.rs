//! Material swapping on the big model and on Wen Moon

use crate::config::{SceneConfig, TRexConfig};
use crate::SetupContext;
use soho_math::{Color3, Color4, Vec3};
use soho_scene::{GltfNodeModifiers, NodeModifier, PbrMaterial, Result, Texture};
use soho_triggers::{random_hex_color, ClearOverride, Dispatcher, PresenceToggle, ReplaceOverride};

/// Node of Wen Moon that blinks
pub const WEN_MOON_HEAD: &str = "M_Head_BaseMesh";

/// Red body, glowing magenta accent
pub fn initial_trex_modifiers(trex: &TRexConfig) -> GltfNodeModifiers {
    GltfNodeModifiers::new(vec![
        NodeModifier::new(trex.body_path.as_str())
            .with_material(PbrMaterial::new().with_albedo(Color4::red())),
        NodeModifier::new(trex.accent_path.as_str()).with_material(
            PbrMaterial::new()
                .with_albedo(Color4::magenta())
                .with_emissive(Color3::magenta(), 1.0),
        ),
    ])
}

/// Body and accent in two fresh colors; the accent glows in its own color
pub fn random_trex_modifiers(trex: &TRexConfig, body: Color4, accent: Color4) -> GltfNodeModifiers {
    GltfNodeModifiers::new(vec![
        NodeModifier::new(trex.body_path.as_str())
            .with_material(PbrMaterial::new().with_albedo(body)),
        NodeModifier::new(trex.accent_path.as_str()).with_material(
            PbrMaterial::new()
                .with_albedo(accent)
                .with_emissive(accent.rgb(), 1.0),
        ),
    ])
}

/// Blink texture on the head node
pub fn wen_moon_blink_modifiers(config: &SceneConfig) -> GltfNodeModifiers {
    GltfNodeModifiers::single(
        NodeModifier::new(WEN_MOON_HEAD).with_material(
            PbrMaterial::new()
                .with_texture(Texture::common(config.assets.wen_moon_blink.as_str()))
                .with_metallic(0.02)
                .with_roughness(0.75),
        ),
    )
}

/// Whole model in one color, half rough and not metallic
pub fn wen_moon_color_modifiers(color: Color4) -> GltfNodeModifiers {
    GltfNodeModifiers::single(
        NodeModifier::whole_model().with_material(
            PbrMaterial::new()
                .with_albedo(color)
                .with_metallic(0.0)
                .with_roughness(0.5),
        ),
    )
}

/// Initial TRex colors plus the TRex random color trigger
pub(crate) fn setup_trex(cx: &mut SetupContext<'_>) -> Result<()> {
    let big_model = cx.host.entity_by_name(&cx.config.entities.big_model)?;
    if cx.config.trex.accent_path != TRexConfig::default().accent_path {
        log::warn!(
            "TRex accent path is '{}' instead of '{}'",
            cx.config.trex.accent_path,
            TRexConfig::default().accent_path
        );
    }

    cx.host
        .create_node_modifiers(big_model, initial_trex_modifiers(&cx.config.trex))?;

    let trex = cx.config.trex.clone();
    let random = ReplaceOverride::new(big_model, cx.rng(), move |rng| {
        let body = random_hex_color(rng);
        let accent = random_hex_color(rng);
        random_trex_modifiers(&trex, body, accent)
    });
    cx.cube(
        "trex_random_color",
        Vec3::new(85.0, 1.0, 70.0),
        "Random color",
        random.into_callback(),
    )?;
    Ok(())
}

/// Random color, blink and reset triggers for Wen Moon
pub(crate) fn setup_wen_moon(cx: &mut SetupContext<'_>) -> Result<()> {
    let wen_moon = cx.host.entity_by_name(&cx.config.entities.wen_moon)?;

    let random = ReplaceOverride::new(wen_moon, cx.rng(), |rng| {
        wen_moon_color_modifiers(random_hex_color(rng))
    });
    cx.cube(
        "wenmoon_random_color",
        Vec3::new(65.0, 1.0, 40.0),
        "Random color",
        random.into_callback(),
    )?;

    let blink = PresenceToggle::new(wen_moon, wen_moon_blink_modifiers(cx.config));
    cx.cube("wenmoon_blink", Vec3::new(66.0, 1.0, 40.0), "Blink", blink.into_callback())?;

    let reset = ClearOverride::new(wen_moon);
    cx.cube("wenmoon_reset", Vec3::new(60.0, 1.0, 40.0), "Reset", reset.into_callback())?;
    Ok(())
}
