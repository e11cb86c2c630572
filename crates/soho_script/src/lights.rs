//! Reference lights

use crate::config::SceneConfig;
use soho_math::Color3;
use soho_scene::{LightSource, Result, SceneHost, Texture};

const SPOT_INNER_ANGLE: f32 = 30.0;
const SPOT_OUTER_ANGLE: f32 = 60.0;

/// Attach a light to each of the four reference entities
pub fn setup_lights(host: &mut dyn SceneHost, config: &SceneConfig) -> Result<()> {
    let names = &config.entities;

    let spot = host.entity_by_name(&names.spot_light)?;
    host.create_light(
        spot,
        LightSource::spot(SPOT_INNER_ANGLE, SPOT_OUTER_ANGLE).with_intensity(100_000.0),
    )?;

    let point = host.entity_by_name(&names.point_light)?;
    host.create_light(point, LightSource::point().with_intensity(100_000.0))?;

    let red = host.entity_by_name(&names.red_spot_light)?;
    host.create_light(
        red,
        LightSource::spot(SPOT_INNER_ANGLE, SPOT_OUTER_ANGLE)
            .with_color(Color3::red())
            .with_intensity(1_000_000.0)
            .with_shadow(),
    )?;

    let masked = host.entity_by_name(&names.masked_spot_light)?;
    host.create_light(
        masked,
        LightSource::spot(SPOT_INNER_ANGLE, SPOT_OUTER_ANGLE)
            .with_color(Color3::magenta())
            .with_intensity(1_000_000.0)
            .with_shadow()
            .with_shadow_mask(Texture::common(config.assets.light_mask.as_str())),
    )?;

    log::info!("Lights attached to 4 reference entities");
    Ok(())
}
