//! Scene configuration
//!
//! Everything here defaults to the published scene, so an empty file (or no
//! file) reproduces it exactly.
//!
//! # Example Config File
//!
//! ```toml
//! seed = 7             # fixed seed for random colors; omit for entropy
//!
//! [trex]
//! accent_path = "TRex.001"
//!
//! [oscillation]
//! enabled = true
//! amplitude = 15.0
//! frequency = 0.3
//! ```

use crate::names;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid scene config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Names of the entities the script looks up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityNamesConfig {
    pub spot_light: String,
    pub point_light: String,
    pub red_spot_light: String,
    pub masked_spot_light: String,
    pub big_model: String,
    pub wen_moon: String,
    pub shark: String,
}

impl Default for EntityNamesConfig {
    fn default() -> Self {
        Self {
            spot_light: names::LIGHT_REF.into(),
            point_light: names::LIGHT_REF_2.into(),
            red_spot_light: names::LIGHT_REF_3.into(),
            masked_spot_light: names::LIGHT_REF_4.into(),
            big_model: names::SOHOSCENE_GLB.into(),
            wen_moon: names::WENMOON.into(),
            shark: names::SHARK.into(),
        }
    }
}

/// Opaque asset references handed to the host loader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub light_mask: String,
    pub wen_moon_blink: String,
    pub shark_video: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            light_mask: "assets/scene/images/lightmask1.png".into(),
            wen_moon_blink: "assets/scene/images/wenmoon-blink.png".into(),
            shark_video: "https://player.vimeo.com/external/1027418923.m3u8?s=b012663ac0ca957d28cd360bea9ebb02bf02b5f2&logging=false".into(),
        }
    }
}

/// Node paths inside the big model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TRexConfig {
    pub body_path: String,
    /// One published revision of the scene used `TRex.000000sgsdh1` here,
    /// which matches no node; set it explicitly to reproduce that revision.
    pub accent_path: String,
}

impl Default for TRexConfig {
    fn default() -> Self {
        Self {
            body_path: "TRex".into(),
            accent_path: "TRex.001".into(),
        }
    }
}

/// Clip names and node paths of the shark model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SharkConfig {
    pub swim_clip: String,
    pub bite_clip: String,
    pub eyes_path: String,
    pub back_path: String,
    pub fin_path: String,
    pub belly_path: String,
}

impl Default for SharkConfig {
    fn default() -> Self {
        Self {
            swim_clip: "swim".into(),
            bite_clip: "bite".into(),
            eyes_path: "Scene_root/shark_skeleton/Sphere/Sphere.001".into(),
            fin_path: "Scene_root/shark_skeleton/Sphere/Sphere.001/Sphere_1".into(),
            back_path: "Scene_root/shark_skeleton/Sphere/Sphere.001/Sphere_2".into(),
            belly_path: "Scene_root/shark_skeleton/Sphere/Sphere.001/Sphere_3".into(),
        }
    }
}

/// Spotlight oscillation; off unless enabled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OscillationConfig {
    pub enabled: bool,
    /// Half of the sweep arc, degrees
    pub amplitude: f32,
    /// Sweeps per second
    pub frequency: f32,
    /// Entities to sweep; defaults to the three spot lights
    pub targets: Vec<String>,
}

impl Default for OscillationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            amplitude: 15.0,
            frequency: 0.3,
            targets: vec![
                names::LIGHT_REF.into(),
                names::LIGHT_REF_3.into(),
                names::LIGHT_REF_4.into(),
            ],
        }
    }
}

/// Root scene configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Base seed for per-trigger random sources
    pub seed: Option<u64>,
    pub entities: EntityNamesConfig,
    pub assets: AssetsConfig,
    pub trex: TRexConfig,
    pub shark: SharkConfig,
    pub oscillation: OscillationConfig,
}

impl SceneConfig {
    /// Parse from TOML text
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load from a file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Seed for the random source of the `index`-th trigger
    pub fn trigger_seed(&self, index: u64) -> Option<u64> {
        self.seed.map(|seed| seed.wrapping_add(index))
    }
}
