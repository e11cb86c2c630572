//! Runtime Configuration
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables: `SOHO_FRAMES`, `SOHO_SEED`, `SOHO_OSCILLATE`
//! 2. Config file named by `SOHO_CONFIG`, else `soho.toml`
//! 3. Built-in defaults (a missing file is not an error)
//!
//! # Example Config File
//!
//! ```toml
//! [runtime]
//! frames = 240
//! frame_delta = 0.016
//! clicks = [
//!     { frame = 1, trigger = "shark_animate" },
//!     { frame = 2, trigger = "wenmoon_blink" },
//! ]
//!
//! [scene]
//! seed = 7
//!
//! [scene.oscillation]
//! enabled = true
//! ```

use serde::{Deserialize, Serialize};
use soho_scene::SceneError;
use soho_script::{ConfigError, SceneConfig};
use std::path::Path;
use thiserror::Error;

/// Config file used when `SOHO_CONFIG` is not set
pub const DEFAULT_CONFIG_PATH: &str = "soho.toml";

/// Runtime errors
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("Snapshot serialization failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// A click delivered at the start of a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedClick {
    pub frame: u32,
    /// Trigger key, e.g. `shark_animate`
    pub trigger: String,
}

/// Frame loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    /// Frames to run before exiting
    pub frames: u32,
    /// Seconds per frame
    pub frame_delta: f64,
    /// Pace frames in real time and feed wall-clock seconds to the
    /// oscillator instead of simulated time
    pub wall_clock: bool,
    pub clicks: Vec<ScriptedClick>,
    /// Print the final scene as JSON on stdout
    pub print_scene: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            frames: 60,
            frame_delta: 1.0 / 60.0,
            wall_clock: false,
            clicks: Vec::new(),
            print_scene: true,
        }
    }
}

impl LoopConfig {
    /// Clicks scheduled for `frame`, in file order
    pub fn clicks_at(&self, frame: u32) -> impl Iterator<Item = &ScriptedClick> {
        self.clicks.iter().filter(move |click| click.frame == frame)
    }
}

/// Complete runtime configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub runtime: LoopConfig,
    pub scene: SceneConfig,
    /// File the configuration came from
    #[serde(skip)]
    pub config_path: Option<String>,
}

impl RuntimeConfig {
    /// Load runtime configuration from all sources
    pub fn load() -> Result<Self, RuntimeError> {
        let path = std::env::var("SOHO_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut config = if Path::new(&path).exists() {
            let mut loaded = Self::load_from_file(&path)?;
            loaded.config_path = Some(path.clone());
            log::info!("Loaded config from {}", path);
            loaded
        } else {
            log::info!("No {} found, using the default scene", path);
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(frames) = std::env::var("SOHO_FRAMES") {
            if let Ok(frames) = frames.parse() {
                self.runtime.frames = frames;
                log::info!("Frames from env: {}", self.runtime.frames);
            }
        }

        if let Ok(seed) = std::env::var("SOHO_SEED") {
            if let Ok(seed) = seed.parse() {
                self.scene.seed = Some(seed);
                log::info!("Seed from env: {}", seed);
            }
        }

        if std::env::var("SOHO_OSCILLATE")
            .map(|v| v == "1" || v == "true")
            .unwrap_or(false)
        {
            self.scene.oscillation.enabled = true;
        }
    }
}
