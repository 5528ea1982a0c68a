//! Core library for Faux Pass, the animated ticket screen.
//!
//! The crate is a small declarative animation engine. A [`Scene`] holds
//! [`Node`]s, each with its own [`Keyframe`] timeline; a [`PlaybackDriver`]
//! turns host clock ticks into a scene timestamp, every node samples its
//! timeline at that timestamp and draws the resulting shape into a host
//! [`Surface`]. Nothing here touches a real window or GPU.

pub mod config;
pub mod error;
pub mod interpolate;
pub mod keyframe;
pub mod node;
pub mod playback;
pub mod record;
pub mod render;
pub mod scene;
pub mod timeline;

pub use config::{AppConfig, PlaybackConfig, SurfaceConfig};
pub use error::{FauxPassError, Result};
pub use keyframe::{Keyframe, Rgba, Snapshot};
pub use node::Node;
pub use playback::{Easing, LoopPosition, PlaybackDriver, PlaybackPhase};
pub use record::{Recorder, RecordedFrame, Recording, RecordingSettings};
pub use render::{DisplayList, DrawCall, Point, Shape, Size, Surface};
pub use scene::{Scene, SceneDescriptor};
