/// Result alias that carries the custom [`FauxPassError`] type.
pub type Result<T> = std::result::Result<T, FauxPassError>;

/// Common error type for the core crate.
///
/// Sampling and drawing never fail; every variant here comes from building a
/// scene, loading configuration, or writing output.
#[derive(Debug, thiserror::Error)]
pub enum FauxPassError {
    /// Free-form message for host-level failures.
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Scene or configuration documents that fail to (de)serialize.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    /// Colour strings that are not `#RRGGBB` or `#RRGGBBAA`.
    #[error("invalid color `{0}`, expected #RRGGBB or #RRGGBBAA")]
    InvalidColor(String),
    /// A node's keyframe timestamps decrease somewhere along its timeline.
    #[error("node `{node}` has a keyframe at {time_ms}ms after one at {previous_ms}ms")]
    UnsortedKeyframes {
        node: String,
        previous_ms: u64,
        time_ms: u64,
    },
    /// A keyframe lies past the end of the scene and could never be shown.
    #[error("node `{node}` has a keyframe at {time_ms}ms but the scene ends at {duration_ms}ms")]
    UnreachableKeyframe {
        node: String,
        time_ms: u64,
        duration_ms: u64,
    },
    /// Scenes must last at least one millisecond.
    #[error("scene duration must be greater than zero")]
    EmptyDuration,
    /// Neither a built-in scene name nor a readable scene file.
    #[error("unknown scene `{0}`")]
    UnknownScene(String),
}

impl FauxPassError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}

impl From<&str> for FauxPassError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for FauxPassError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
