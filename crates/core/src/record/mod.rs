use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    playback::{Easing, PlaybackDriver, PlaybackPhase},
    render::{DisplayList, DrawCall, Size},
    scene::Scene,
    FauxPassError, Result,
};

/// Highest accepted frame rate. Recorded timestamps are whole milliseconds,
/// so faster rates would only repeat frames.
pub const MAX_FPS: u32 = 1000;

/// Configuration options for the recording subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingSettings {
    pub fps: u32,
    pub size: Size,
    #[serde(default)]
    pub easing: Easing,
}

impl Default for RecordingSettings {
    fn default() -> Self {
        Self {
            fps: 60,
            size: Size::new(400.0, 400.0),
            easing: Easing::Linear,
        }
    }
}

/// Draw calls emitted for one frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedFrame {
    pub timestamp_ms: u64,
    pub draws: Vec<DrawCall>,
}

/// One loop of a scene, sampled at a fixed frame rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recording {
    pub scene: String,
    pub fps: u32,
    pub size: Size,
    pub duration_ms: u64,
    pub frames: Vec<RecordedFrame>,
}

impl Recording {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Plays a scene offline through a [`PlaybackDriver`] and captures every
/// frame's draw calls.
#[derive(Debug, Default)]
pub struct Recorder {
    settings: RecordingSettings,
}

impl Recorder {
    pub fn new(settings: RecordingSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RecordingSettings {
        &self.settings
    }

    /// Records a single loop, from progress 0 up to and including the final
    /// frame.
    ///
    /// Frame `i` is taken at exactly `i / fps` seconds into the loop.
    pub fn record(&self, scene: &Scene) -> Result<Recording> {
        let fps = self.settings.fps;
        if fps == 0 || fps > MAX_FPS {
            return Err(FauxPassError::msg(format!(
                "recording frame rate must be between 1 and {MAX_FPS}, got {fps}"
            )));
        }

        let mut driver = PlaybackDriver::for_scene(scene).with_easing(self.settings.easing);
        let mut surface = DisplayList::new(self.settings.size);
        let mut frames = Vec::new();
        let mut frame_index: u64 = 0;

        loop {
            let timestamp_ms = driver.scene_time_ms();
            scene.render_at(timestamp_ms, &mut surface);
            frames.push(RecordedFrame {
                timestamp_ms,
                draws: surface.take(),
            });

            if driver.phase() == PlaybackPhase::Complete {
                break;
            }
            let previous = frame_time(frame_index, fps);
            frame_index += 1;
            driver.advance(frame_time(frame_index, fps) - previous);
        }

        tracing::debug!(scene = scene.name(), frames = frames.len(), "recorded loop");
        Ok(Recording {
            scene: scene.name().to_string(),
            fps: self.settings.fps,
            size: self.settings.size,
            duration_ms: scene.duration_ms(),
            frames,
        })
    }
}

fn frame_time(index: u64, fps: u32) -> Duration {
    Duration::from_nanos((index as u128 * 1_000_000_000 / fps as u128) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneDescriptor;

    fn rta_logo() -> Scene {
        Scene::try_from(SceneDescriptor::rta_logo()).unwrap()
    }

    #[test]
    fn records_one_full_loop() {
        let recorder = Recorder::new(RecordingSettings {
            fps: 10,
            ..Default::default()
        });
        let recording = recorder.record(&rta_logo()).unwrap();

        let timestamps: Vec<_> = recording.frames.iter().map(|f| f.timestamp_ms).collect();
        assert_eq!(timestamps.len(), 21);
        assert_eq!(timestamps.first(), Some(&0));
        assert_eq!(timestamps.last(), Some(&2000));
        assert!(timestamps.iter().enumerate().all(|(i, t)| *t == i as u64 * 100));
        assert!(recording.frames.iter().all(|f| f.draws.len() == 2));
    }

    #[test]
    fn rejects_out_of_range_fps() {
        for fps in [0, MAX_FPS + 1, u32::MAX] {
            let recorder = Recorder::new(RecordingSettings {
                fps,
                ..Default::default()
            });
            assert_eq!(recorder.settings().fps, fps);
            assert!(recorder.record(&rta_logo()).is_err());
        }
    }

    #[test]
    fn fastest_rate_records_every_millisecond() {
        let recorder = Recorder::new(RecordingSettings {
            fps: MAX_FPS,
            ..Default::default()
        });
        let recording = recorder.record(&rta_logo()).unwrap();

        assert_eq!(recording.frames.len(), 2001);
        assert!(recording
            .frames
            .iter()
            .enumerate()
            .all(|(i, f)| f.timestamp_ms == i as u64));
    }

    #[test]
    fn uneven_rates_do_not_drift() {
        let scene = Scene::new("second", 1000, Vec::new()).unwrap();
        let recorder = Recorder::new(RecordingSettings {
            fps: 3,
            ..Default::default()
        });
        let recording = recorder.record(&scene).unwrap();

        let timestamps: Vec<_> = recording.frames.iter().map(|f| f.timestamp_ms).collect();
        assert_eq!(timestamps, [0, 333, 667, 1000]);
    }

    #[test]
    fn serializes_frames_as_json() {
        let recorder = Recorder::new(RecordingSettings {
            fps: 1,
            size: Size::new(200.0, 200.0),
            easing: Easing::Linear,
        });
        let recording = recorder.record(&rta_logo()).unwrap();
        assert_eq!(recording.frames.len(), 3);

        let json: serde_json::Value = serde_json::from_str(&recording.to_json().unwrap()).unwrap();
        assert_eq!(json["scene"], "rta-logo");
        let first = &json["frames"][0]["draws"][0];
        assert_eq!(first["node"], "outerCircle");
        assert_eq!(first["shape"]["type"], "circle");
        assert_eq!(first["fill"], "#FBC02DFF");
    }
}
