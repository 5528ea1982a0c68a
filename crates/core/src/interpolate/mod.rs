//! Blending between two neighbouring keyframes.

use crate::keyframe::{Keyframe, Rgba, Snapshot};

/// Values that can be blended linearly.
pub trait Lerp: Copy {
    fn lerp(self, other: Self, f: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(self, other: Self, f: f32) -> Self {
        self + (other - self) * f
    }
}

impl Lerp for Rgba {
    fn lerp(self, other: Self, f: f32) -> Self {
        Rgba::new(
            self.r.lerp(other.r, f),
            self.g.lerp(other.g, f),
            self.b.lerp(other.b, f),
            self.a.lerp(other.a, f),
        )
    }
}

/// Position of `time_ms` within the segment `[prev_ms, next_ms]`, clamped to
/// `0.0..=1.0`.
///
/// The span is floored at one millisecond so two keyframes sharing a
/// timestamp act as an instantaneous step instead of dividing by zero.
pub fn blend_factor(prev_ms: u64, next_ms: u64, time_ms: u64) -> f32 {
    let span = next_ms.saturating_sub(prev_ms).max(1) as f64;
    let offset = time_ms as f64 - prev_ms as f64;
    (offset / span).clamp(0.0, 1.0) as f32
}

/// Blends two optional attribute values.
///
/// When only one side carries a value it is used as-is, with a preference for
/// `next` once the query time has reached the next keyframe.
pub fn blend<T: Lerp>(
    prev: Option<T>,
    next: Option<T>,
    f: f32,
    reached_next: bool,
) -> Option<T> {
    match (prev, next) {
        (Some(a), Some(b)) => Some(a.lerp(b, f)),
        _ if reached_next => next.or(prev),
        _ => prev.or(next),
    }
}

/// Produces the snapshot at `time_ms` between `prev` and `next`.
///
/// Scale and opacity fall back to `1.0` when neither keyframe defines them;
/// every other attribute stays absent and is resolved by the drawing node.
pub fn interpolate(prev: &Keyframe, next: &Keyframe, time_ms: u64) -> Snapshot {
    let f = blend_factor(prev.time_ms, next.time_ms, time_ms);
    let reached = time_ms >= next.time_ms;
    let scalar = |get: fn(&Keyframe) -> Option<f32>| blend(get(prev), get(next), f, reached);

    Keyframe {
        time_ms,
        x: scalar(|kf: &Keyframe| kf.x),
        y: scalar(|kf: &Keyframe| kf.y),
        width: scalar(|kf: &Keyframe| kf.width),
        height: scalar(|kf: &Keyframe| kf.height),
        rotation: scalar(|kf: &Keyframe| kf.rotation),
        scale_x: scalar(|kf: &Keyframe| kf.scale_x).or(Some(1.0)),
        scale_y: scalar(|kf: &Keyframe| kf.scale_y).or(Some(1.0)),
        opacity: scalar(|kf: &Keyframe| kf.opacity).or(Some(1.0)),
        color: blend(prev.color, next.color, f, reached),
    }
}
