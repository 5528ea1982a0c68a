//! Easing curves applied to loop progress.

use serde::{Deserialize, Serialize};

/// Maps linear loop progress onto an eased curve. Endpoints are preserved.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    /// `cubic-bezier(0.4, 0, 0.2, 1)`, the default curve of platform tweens.
    FastOutSlowIn,
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
}

impl Easing {
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::FastOutSlowIn => cubic_bezier(t, 0.4, 0.0, 0.2, 1.0),
            Easing::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(t, x1, y1, x2, y2),
        }
    }
}

/// Evaluates a CSS-style cubic bezier at `x`.
///
/// Solves for the curve parameter with Newton-Raphson and falls back to
/// bisection when the slope flattens out.
fn cubic_bezier(x: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let (x, x1, y1, x2, y2) = (x as f64, x1 as f64, y1 as f64, x2 as f64, y2 as f64);
    let mut t = x;
    let mut solved = false;
    for _ in 0..8 {
        let err = bezier(t, x1, x2) - x;
        if err.abs() < 1e-7 {
            solved = true;
            break;
        }
        let slope = bezier_slope(t, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        t -= err / slope;
    }

    if !solved {
        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        for _ in 0..32 {
            let estimate = bezier(t, x1, x2);
            if (estimate - x).abs() < 1e-7 {
                break;
            }
            if estimate < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
    }

    bezier(t.clamp(0.0, 1.0), y1, y2) as f32
}

fn bezier(t: f64, p1: f64, p2: f64) -> f64 {
    let u = 1.0 - t;
    3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
}

fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let u = 1.0 - t;
    3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}
