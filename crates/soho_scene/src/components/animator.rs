//! Animator component
//!
//! Holds the playback state of the named clips baked into a model. The host
//! drives the actual skinning; the script only flips playing flags.

use serde::{Deserialize, Serialize};

/// Playback state of one clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    pub clip: String,
    pub playing: bool,
    pub looping: bool,
    /// Set when playback should restart from the first frame
    pub should_reset: bool,
}

impl AnimationClip {
    pub fn new(clip: impl Into<String>) -> Self {
        Self {
            clip: clip.into(),
            playing: false,
            looping: true,
            should_reset: false,
        }
    }
}

/// All clips of an animated model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Animator {
    pub states: Vec<AnimationClip>,
}

impl Animator {
    pub fn with_clips<I, S>(clips: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            states: clips.into_iter().map(AnimationClip::new).collect(),
        }
    }

    pub fn clip(&self, name: &str) -> Option<&AnimationClip> {
        self.states.iter().find(|s| s.clip == name)
    }

    pub fn clip_mut(&mut self, name: &str) -> Option<&mut AnimationClip> {
        self.states.iter_mut().find(|s| s.clip == name)
    }

    /// Play `name` and stop every other clip. Returns false if the clip
    /// does not exist, leaving all states untouched.
    pub fn play_single(&mut self, name: &str) -> bool {
        if self.clip(name).is_none() {
            return false;
        }
        for state in &mut self.states {
            let selected = state.clip == name;
            state.playing = selected;
            state.should_reset = selected;
        }
        true
    }

    pub fn stop_all(&mut self) {
        for state in &mut self.states {
            state.playing = false;
            state.should_reset = true;
        }
    }

    /// Names of clips currently playing, in declaration order
    pub fn playing(&self) -> Vec<&str> {
        self.states
            .iter()
            .filter(|s| s.playing)
            .map(|s| s.clip.as_str())
            .collect()
    }
}
