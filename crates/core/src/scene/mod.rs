use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    keyframe::{Keyframe, Rgba},
    node::Node,
    render::Surface,
    timeline, FauxPassError, Result,
};

/// Serializable, unvalidated form of a [`Scene`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescriptor {
    #[serde(default)]
    pub name: String,
    pub duration_ms: u64,
    /// Back-to-front draw order.
    pub nodes: Vec<Node>,
}

impl SceneDescriptor {
    /// Names accepted by [`SceneDescriptor::builtin`].
    pub const BUILTIN: [&'static str; 2] = ["rta-logo", "showcase"];

    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "rta-logo" => Some(Self::rta_logo()),
            "showcase" => Some(Self::showcase()),
            _ => None,
        }
    }

    /// Two concentric circles, gold behind white, breathing over two seconds.
    pub fn rta_logo() -> Self {
        Self {
            name: "rta-logo".to_string(),
            duration_ms: 2000,
            nodes: vec![
                Node::circle(
                    "outerCircle",
                    vec![
                        Keyframe::at(0).width(0.45).color(Rgba::from_argb(0xFFFBC02D)),
                        Keyframe::at(1000).width(0.5),
                        Keyframe::at(2000).width(0.45),
                    ],
                ),
                Node::circle(
                    "innerCircle",
                    vec![
                        Keyframe::at(0).width(0.4).color(Rgba::WHITE),
                        Keyframe::at(1000).width(0.42),
                        Keyframe::at(2000).width(0.4),
                    ],
                ),
            ],
        }
    }

    /// Background pulse, a card sliding up, a spinning accent and two bars.
    pub fn showcase() -> Self {
        let card = |t| Keyframe::at(t).x(0.5).width(0.86).height(0.32).rotation(0.0);
        let accent = |t| Keyframe::at(t).position(0.82, 0.28).width(0.10).height(0.12);

        Self {
            name: "showcase".to_string(),
            duration_ms: 1800,
            nodes: vec![
                Node::circle(
                    "bgPulse",
                    vec![
                        Keyframe::at(0)
                            .position(0.5, 0.5)
                            .width(1.6)
                            .opacity(0.0)
                            .color(Rgba::from_argb(0xFF0E0F13)),
                        Keyframe::at(200).position(0.5, 0.5).width(1.6).opacity(1.0),
                        Keyframe::at(1200).position(0.5, 0.5).width(1.8).opacity(1.0),
                        Keyframe::at(1600).position(0.5, 0.5).width(1.6).opacity(1.0),
                    ],
                ),
                Node::rectangle(
                    "card",
                    24.0,
                    vec![
                        card(0).y(1.2).opacity(0.0).color(Rgba::from_argb(0xFF161923)),
                        card(350).y(0.58).opacity(1.0),
                        card(900).y(0.56).opacity(1.0),
                        card(1200).y(0.58).opacity(1.0),
                    ],
                ),
                Node::triangle(
                    "accent",
                    vec![
                        accent(200)
                            .rotation(0.0)
                            .opacity(0.0)
                            .color(Rgba::from_argb(0xFF4FC3F7)),
                        accent(450).rotation(0.0).opacity(1.0),
                        accent(1400).rotation(360.0).opacity(1.0),
                    ],
                ),
                Node::rectangle(
                    "pill",
                    999.0,
                    vec![
                        Keyframe::at(400)
                            .position(0.5, 0.42)
                            .width(0.46)
                            .height(0.06)
                            .opacity(0.0)
                            .color(Rgba::from_argb(0xFF263043)),
                        Keyframe::at(700).position(0.5, 0.42).width(0.56).height(0.06).opacity(1.0),
                        Keyframe::at(1100).position(0.5, 0.42).width(0.50).height(0.06).opacity(1.0),
                    ],
                ),
                Node::rectangle(
                    "underline",
                    12.0,
                    vec![
                        Keyframe::at(650)
                            .position(0.5, 0.68)
                            .width(0.0)
                            .height(0.008)
                            .opacity(0.0)
                            .color(Rgba::from_argb(0xFF4FC3F7)),
                        Keyframe::at(900).position(0.5, 0.68).width(0.60).height(0.008).opacity(1.0),
                        Keyframe::at(1200).position(0.5, 0.68).width(0.52).height(0.008).opacity(1.0),
                    ],
                ),
            ],
        }
    }

    /// Resolves a built-in scene name, falling back to a JSON file path.
    pub fn find(name_or_path: &str) -> Result<Self> {
        if let Some(descriptor) = Self::builtin(name_or_path) {
            return Ok(descriptor);
        }

        let path = Path::new(name_or_path);
        if path.is_file() {
            Self::load(path)
        } else {
            Err(FauxPassError::UnknownScene(name_or_path.to_string()))
        }
    }

    /// Reads a JSON scene document.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Validated, immutable set of nodes played as one animation loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SceneDescriptor", into = "SceneDescriptor")]
pub struct Scene {
    name: String,
    duration_ms: u64,
    nodes: Vec<Node>,
}

impl Scene {
    /// Builds a scene, rejecting a zero duration, keyframes out of order and
    /// keyframes that fall after the end of the loop.
    pub fn new(name: impl Into<String>, duration_ms: u64, nodes: Vec<Node>) -> Result<Self> {
        let name = name.into();
        if duration_ms == 0 {
            return Err(FauxPassError::EmptyDuration);
        }

        for node in &nodes {
            timeline::validate_order(node.name(), node.keyframes())?;
            if let Some(time_ms) = timeline::last_timestamp(node.keyframes()) {
                if time_ms > duration_ms {
                    return Err(FauxPassError::UnreachableKeyframe {
                        node: node.name().to_string(),
                        time_ms,
                        duration_ms,
                    });
                }
            }
        }

        tracing::debug!(scene = %name, duration_ms, nodes = nodes.len(), "scene built");
        Ok(Self {
            name,
            duration_ms,
            nodes,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Scene timestamp for a loop progress in `0.0..=1.0`, rounded to the
    /// nearest millisecond.
    pub fn time_at(&self, progress: f32) -> u64 {
        (progress.clamp(0.0, 1.0) as f64 * self.duration_ms as f64).round() as u64
    }

    /// Samples every node at `time_ms` and draws them back-to-front.
    ///
    /// The surface is expected to be cleared by its owner beforehand.
    pub fn render_at<S: Surface + ?Sized>(&self, time_ms: u64, surface: &mut S) {
        for node in &self.nodes {
            node.render_at(time_ms, surface);
        }
    }

    /// Renders the frame for a loop progress, see [`Scene::time_at`].
    pub fn render_progress<S: Surface + ?Sized>(&self, progress: f32, surface: &mut S) {
        self.render_at(self.time_at(progress), surface);
    }
}

impl TryFrom<SceneDescriptor> for Scene {
    type Error = FauxPassError;

    fn try_from(descriptor: SceneDescriptor) -> Result<Self> {
        Scene::new(descriptor.name, descriptor.duration_ms, descriptor.nodes)
    }
}

impl From<Scene> for SceneDescriptor {
    fn from(scene: Scene) -> Self {
        Self {
            name: scene.name,
            duration_ms: scene.duration_ms,
            nodes: scene.nodes,
        }
    }
}
