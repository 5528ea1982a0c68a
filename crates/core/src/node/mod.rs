//! Drawable scene nodes.
//!
//! Every node owns its own keyframe timeline. Sampling is shared; only the
//! geometry built from the resolved attributes differs per shape.

use serde::{Deserialize, Serialize};

use crate::{
    keyframe::{Keyframe, Rgba, Snapshot},
    render::{DrawCall, Point, Shape, Size, Surface},
    timeline,
};

/// Fallback width and height, as fractions of the surface, for a shape whose
/// keyframes never set them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeDefaults {
    pub width: f32,
    pub height: f32,
}

/// Snapshot with every attribute filled in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// Always within `0.0..=1.0` unless the snapshot carried `NaN`.
    pub opacity: f32,
    pub color: Rgba,
}

/// Applies the default table to a sampled snapshot.
///
/// Position defaults to the surface centre, scale and opacity to `1.0`,
/// rotation to zero and colour to opaque white. Opacity is clamped rather
/// than rejected.
pub fn resolve(snapshot: &Snapshot, defaults: ShapeDefaults) -> Resolved {
    Resolved {
        x: snapshot.x.unwrap_or(0.5),
        y: snapshot.y.unwrap_or(0.5),
        width: snapshot.width.unwrap_or(defaults.width),
        height: snapshot.height.unwrap_or(defaults.height),
        rotation: snapshot.rotation.unwrap_or(0.0),
        scale_x: snapshot.scale_x.unwrap_or(1.0),
        scale_y: snapshot.scale_y.unwrap_or(1.0),
        opacity: snapshot.opacity.unwrap_or(1.0).clamp(0.0, 1.0),
        color: snapshot.color.unwrap_or(Rgba::WHITE),
    }
}

/// A drawable entity with its own keyframe timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Node {
    /// Disc sized against the smaller surface dimension.
    Circle {
        name: String,
        keyframes: Vec<Keyframe>,
    },
    /// Box with a fixed corner radius in pixels.
    ///
    /// Scale grows the box about `(x, y)`: the top-left is taken from the
    /// scaled size, so a scaled rectangle stays centred on its position.
    Rectangle {
        name: String,
        keyframes: Vec<Keyframe>,
        #[serde(default, rename = "round")]
        corner_radius: f32,
    },
    /// Isosceles triangle, apex up before rotation.
    Triangle {
        name: String,
        keyframes: Vec<Keyframe>,
    },
}

impl Node {
    pub fn circle(name: impl Into<String>, keyframes: Vec<Keyframe>) -> Self {
        Self::Circle {
            name: name.into(),
            keyframes,
        }
    }

    pub fn rectangle(
        name: impl Into<String>,
        corner_radius: f32,
        keyframes: Vec<Keyframe>,
    ) -> Self {
        Self::Rectangle {
            name: name.into(),
            keyframes,
            corner_radius,
        }
    }

    pub fn triangle(name: impl Into<String>, keyframes: Vec<Keyframe>) -> Self {
        Self::Triangle {
            name: name.into(),
            keyframes,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Circle { name, .. }
            | Self::Rectangle { name, .. }
            | Self::Triangle { name, .. } => name,
        }
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        match self {
            Self::Circle { keyframes, .. }
            | Self::Rectangle { keyframes, .. }
            | Self::Triangle { keyframes, .. } => keyframes,
        }
    }

    pub fn defaults(&self) -> ShapeDefaults {
        match self {
            Self::Circle { .. } => ShapeDefaults {
                width: 0.2,
                height: 0.2,
            },
            Self::Rectangle { .. } => ShapeDefaults {
                width: 0.3,
                height: 0.1,
            },
            Self::Triangle { .. } => ShapeDefaults {
                width: 0.2,
                height: 0.2,
            },
        }
    }

    /// Samples this node's timeline at `time_ms`.
    pub fn sample(&self, time_ms: u64) -> Snapshot {
        timeline::sample(self.keyframes(), time_ms)
    }

    /// Draws the shape described by `snapshot`. Emits nothing when the
    /// resolved opacity is not positive.
    pub fn draw<S: Surface + ?Sized>(&self, snapshot: &Snapshot, surface: &mut S) {
        let resolved = resolve(snapshot, self.defaults());
        if resolved.opacity.is_nan() || resolved.opacity <= 0.0 {
            return;
        }

        let size = surface.size();
        let center = Point::new(resolved.x * size.width, resolved.y * size.height);

        let (shape, rotation) = match self {
            Self::Circle { .. } => {
                let basis = resolved.width * size.min_dimension();
                let scale = (resolved.scale_x + resolved.scale_y) / 2.0;
                let shape = Shape::Circle {
                    center,
                    radius: basis * scale / 2.0,
                };
                (shape, 0.0)
            }
            Self::Rectangle { corner_radius, .. } => {
                let width = resolved.width * size.width * resolved.scale_x;
                let height = resolved.height * size.height * resolved.scale_y;
                let shape = Shape::Rect {
                    top_left: Point::new(center.x - width / 2.0, center.y - height / 2.0),
                    size: Size::new(width, height),
                    corner_radius: *corner_radius,
                };
                (shape, resolved.rotation)
            }
            Self::Triangle { .. } => {
                let half_width = resolved.width * size.width / 2.0;
                let half_height = resolved.height * size.height / 2.0;
                let shape = Shape::Triangle {
                    vertices: [
                        Point::new(center.x, center.y - half_height),
                        Point::new(center.x - half_width, center.y + half_height),
                        Point::new(center.x + half_width, center.y + half_height),
                    ],
                };
                (shape, resolved.rotation)
            }
        };

        surface.draw(DrawCall {
            node: self.name().to_string(),
            shape,
            pivot: center,
            rotation,
            fill: resolved.color,
            opacity: resolved.opacity,
        });
    }

    /// Samples at `time_ms` and draws the result.
    pub fn render_at<S: Surface + ?Sized>(&self, time_ms: u64, surface: &mut S) {
        let snapshot = self.sample(time_ms);
        self.draw(&snapshot, surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DisplayList;

    fn surface(width: f32, height: f32) -> DisplayList {
        DisplayList::new(Size::new(width, height))
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() <= 1e-3
    }

    #[test]
    fn circle_pulse_interpolates_width() {
        let gold = Rgba::from_argb(0xFFFBC02D);
        let node = Node::circle(
            "outerCircle",
            vec![
                Keyframe::at(0).width(0.45).color(gold),
                Keyframe::at(1000).width(0.5),
                Keyframe::at(2000).width(0.45),
            ],
        );
        let mut list = surface(200.0, 200.0);

        let snapshot = node.sample(500);
        assert!(approx(snapshot.width.unwrap(), 0.475));
        node.draw(&snapshot, &mut list);

        let call = &list.calls()[0];
        assert_eq!(call.node, "outerCircle");
        assert_eq!(call.fill, gold);
        assert_eq!(call.opacity, 1.0);
        match call.shape {
            Shape::Circle { center, radius } => {
                assert_eq!(center, Point::new(100.0, 100.0));
                assert!(approx(radius, 47.5));
            }
            ref other => panic!("expected a circle, got {other:?}"),
        }
    }

    #[test]
    fn circle_radius_uses_min_dimension_and_mean_scale() {
        let node = Node::circle("dot", vec![Keyframe::at(0).width(0.5).scale(1.0, 3.0)]);
        let mut list = surface(400.0, 100.0);
        node.render_at(0, &mut list);

        match list.calls()[0].shape {
            // 0.5 * 100 * mean(1, 3) / 2
            Shape::Circle { radius, .. } => assert!(approx(radius, 50.0)),
            ref other => panic!("expected a circle, got {other:?}"),
        }
    }

    #[test]
    fn rounded_card_fades_in() {
        let node = Node::rectangle(
            "card",
            24.0,
            vec![
                Keyframe::at(0).opacity(0.0),
                Keyframe::at(350).opacity(1.0),
            ],
        );
        let mut list = surface(400.0, 800.0);

        let snapshot = node.sample(175);
        assert!(approx(snapshot.opacity.unwrap(), 0.5));
        node.draw(&snapshot, &mut list);

        let call = &list.calls()[0];
        assert!(approx(call.opacity, 0.5));
        match call.shape {
            Shape::Rect { corner_radius, .. } => assert_eq!(corner_radius, 24.0),
            ref other => panic!("expected a rect, got {other:?}"),
        }
    }

    #[test]
    fn rectangle_centres_scaled_box_and_rotates_about_centre() {
        let node = Node::rectangle(
            "bar",
            0.0,
            vec![Keyframe::at(0)
                .position(0.25, 0.5)
                .width(0.5)
                .height(0.1)
                .scale(2.0, 1.0)
                .rotation(30.0)],
        );
        let mut list = surface(200.0, 100.0);
        node.render_at(0, &mut list);

        let call = &list.calls()[0];
        assert_eq!(call.pivot, Point::new(50.0, 50.0));
        assert_eq!(call.rotation, 30.0);
        match call.shape {
            Shape::Rect { top_left, size, .. } => {
                assert!(approx(size.width, 200.0));
                assert!(approx(size.height, 10.0));
                assert!(approx(top_left.x, -50.0));
                assert!(approx(top_left.y, 45.0));
            }
            ref other => panic!("expected a rect, got {other:?}"),
        }
    }

    #[test]
    fn scaled_rectangle_keeps_its_centre() {
        let node = Node::rectangle(
            "square",
            0.0,
            vec![Keyframe::at(0).width(0.5).height(0.5).scale(2.0, 1.0)],
        );
        let mut list = surface(100.0, 100.0);
        node.render_at(0, &mut list);

        match list.calls()[0].shape {
            Shape::Rect { top_left, size, .. } => {
                assert!(approx(size.width, 100.0));
                assert!(approx(top_left.x, 0.0));
                assert!(approx(top_left.y, 25.0));
                assert!(approx(top_left.x + size.width / 2.0, 50.0));
            }
            ref other => panic!("expected a rect, got {other:?}"),
        }
    }

    #[test]
    fn triangle_points_apex_up() {
        let node = Node::triangle(
            "accent",
            vec![Keyframe::at(0).position(0.5, 0.5).width(0.1).height(0.2).rotation(90.0)],
        );
        let mut list = surface(100.0, 100.0);
        node.render_at(0, &mut list);

        let call = &list.calls()[0];
        assert_eq!(call.rotation, 90.0);
        match call.shape {
            Shape::Triangle { vertices } => {
                let expected = [(50.0, 40.0), (45.0, 60.0), (55.0, 60.0)];
                for (vertex, (x, y)) in vertices.iter().zip(expected) {
                    assert!(approx(vertex.x, x) && approx(vertex.y, y), "{vertex:?}");
                }
            }
            ref other => panic!("expected a triangle, got {other:?}"),
        }
    }

    #[test]
    fn missing_attributes_resolve_to_shape_defaults() {
        let mut list = surface(100.0, 100.0);
        Node::circle("bare", Vec::new()).render_at(10, &mut list);
        Node::rectangle("bare", 0.0, Vec::new()).render_at(10, &mut list);

        let calls = list.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].fill, Rgba::WHITE);
        match (&calls[0].shape, &calls[1].shape) {
            (Shape::Circle { center, radius }, Shape::Rect { size, .. }) => {
                assert_eq!(*center, Point::new(50.0, 50.0));
                assert!(approx(*radius, 10.0));
                assert!(approx(size.width, 30.0));
                assert!(approx(size.height, 10.0));
            }
            other => panic!("unexpected shapes {other:?}"),
        }
    }

    #[test]
    fn transparent_snapshots_draw_nothing() {
        let hidden = Keyframe::at(0).opacity(0.0);
        let below_zero = Keyframe::at(0).opacity(-0.5);
        let not_a_number = Keyframe::at(0).opacity(f32::NAN);
        let nodes = [
            Node::circle("c", Vec::new()),
            Node::rectangle("r", 8.0, Vec::new()),
            Node::triangle("t", Vec::new()),
        ];

        let mut list = surface(100.0, 100.0);
        for node in &nodes {
            for snapshot in [&hidden, &below_zero, &not_a_number] {
                node.draw(snapshot, &mut list);
            }
        }
        assert!(list.is_empty());
    }

    #[test]
    fn opacity_above_one_is_clamped() {
        let mut list = surface(100.0, 100.0);
        Node::triangle("t", Vec::new()).draw(&Keyframe::at(0).opacity(3.0), &mut list);
        assert_eq!(list.calls()[0].opacity, 1.0);
    }

    #[test]
    fn nodes_deserialize_from_tagged_json() {
        let node: Node = serde_json::from_str(
            r##"{"shape": "rectangle", "name": "pill", "round": 999,
                "keyframes": [{"t": 400, "w": 0.46, "color": "#263043"}]}"##,
        )
        .unwrap();

        assert_eq!(node.name(), "pill");
        assert_eq!(node.keyframes().len(), 1);
        assert!(matches!(node, Node::Rectangle { corner_radius, .. } if corner_radius == 999.0));
    }
}
