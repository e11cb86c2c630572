//! Video player component

use serde::{Deserialize, Serialize};

/// Streams a video source so video textures can sample it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoPlayer {
    /// Opaque source URL, handed to the host as-is
    pub src: String,
    pub playing: bool,
}

impl VideoPlayer {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            playing: false,
        }
    }

    pub fn playing(mut self, playing: bool) -> Self {
        self.playing = playing;
        self
    }
}
