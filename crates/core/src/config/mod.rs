use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{keyframe::Rgba, playback::Easing, render::Size, Result};

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub surface: SurfaceConfig,
    pub playback: PlaybackConfig,
}

impl AppConfig {
    /// Reads a JSON configuration file. Missing fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Size and backdrop of the render target.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: f32,
    pub height: f32,
    pub background: Option<Rgba>,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 400.0,
            background: None,
        }
    }
}

impl SurfaceConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Configuration specific to the playback loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub fps: u32,
    pub lead_in_ms: u64,
    pub easing: Easing,
    /// Built-in scene name or path to a JSON scene.
    pub scene: String,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            lead_in_ms: 50,
            easing: Easing::Linear,
            scene: "rta-logo".to_string(),
        }
    }
}

impl PlaybackConfig {
    pub fn lead_in(&self) -> Duration {
        Duration::from_millis(self.lead_in_ms)
    }

    /// Time between frames, or `None` when `fps` is zero.
    pub fn frame_interval(&self) -> Option<Duration> {
        (self.fps > 0).then(|| Duration::from_secs_f64(1.0 / self.fps as f64))
    }
}
