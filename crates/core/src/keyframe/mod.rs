//! Keyframes and the colour type they carry.
//!
//! A [`Keyframe`] is a partial snapshot of a node's visual attributes at a
//! point in time. Any attribute may be absent; absent attributes are either
//! carried over from a neighbouring keyframe while sampling or resolved to a
//! shape default at draw time.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::FauxPassError;

/// Keyframe produced by sampling a timeline at an arbitrary time.
pub type Snapshot = Keyframe;

/// Point-in-time set of optional visual attributes.
///
/// Positions and sizes are normalized against the render surface, so `0.5`
/// for `x` means the horizontal centre whatever the surface width is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Milliseconds from the start of the scene.
    #[serde(rename = "t")]
    pub time_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    #[serde(default, rename = "w", skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, rename = "h", skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    /// Rotation in degrees, clockwise.
    #[serde(default, rename = "r", skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
    #[serde(default, rename = "sx", skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f32>,
    #[serde(default, rename = "sy", skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f32>,
    #[serde(default, rename = "alpha", skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba>,
}

impl Keyframe {
    /// Creates an empty keyframe at the given timestamp.
    pub fn at(time_ms: u64) -> Self {
        Self {
            time_ms,
            ..Default::default()
        }
    }

    pub fn x(mut self, x: f32) -> Self {
        self.x = Some(x);
        self
    }

    pub fn y(mut self, y: f32) -> Self {
        self.y = Some(y);
        self
    }

    /// Sets both coordinates at once.
    pub fn position(self, x: f32, y: f32) -> Self {
        self.x(x).y(y)
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn rotation(mut self, degrees: f32) -> Self {
        self.rotation = Some(degrees);
        self
    }

    pub fn scale(mut self, scale_x: f32, scale_y: f32) -> Self {
        self.scale_x = Some(scale_x);
        self.scale_y = Some(scale_y);
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn color(mut self, color: Rgba) -> Self {
        self.color = Some(color);
        self
    }
}

/// Straight (non-premultiplied) RGBA colour with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Unpacks a `0xAARRGGBB` literal.
    pub fn from_argb(argb: u32) -> Self {
        Self {
            a: ((argb >> 24) & 0xff) as f32 / 255.0,
            r: ((argb >> 16) & 0xff) as f32 / 255.0,
            g: ((argb >> 8) & 0xff) as f32 / 255.0,
            b: (argb & 0xff) as f32 / 255.0,
        }
    }

    /// Channels quantized to bytes, in `[r, g, b, a]` order.
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
            .map(|channel| (channel.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_bytes();
        write!(f, "#{r:02X}{g:02X}{b:02X}{a:02X}")
    }
}

impl FromStr for Rgba {
    type Err = FauxPassError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || FauxPassError::InvalidColor(value.to_string());
        let hex = value.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() || !matches!(hex.len(), 6 | 8) {
            return Err(invalid());
        }

        let mut channels = [255u8; 4];
        for (slot, index) in channels.iter_mut().zip((0..hex.len()).step_by(2)) {
            *slot = u8::from_str_radix(&hex[index..index + 2], 16).map_err(|_| invalid())?;
        }

        let [r, g, b, a] = channels.map(|channel| channel as f32 / 255.0);
        Ok(Self::new(r, g, b, a))
    }
}

impl TryFrom<String> for Rgba {
    type Error = FauxPassError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba> for String {
    fn from(value: Rgba) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpacks_argb_literals() {
        let gold = Rgba::from_argb(0xFFFBC02D);
        assert_eq!(gold.to_bytes(), [0xFB, 0xC0, 0x2D, 0xFF]);
        assert_eq!(gold.to_string(), "#FBC02DFF");
    }

    #[test]
    fn parses_hex_strings() {
        let opaque: Rgba = "#4FC3F7".parse().unwrap();
        assert_eq!(opaque.to_bytes(), [0x4F, 0xC3, 0xF7, 0xFF]);

        let translucent: Rgba = "#00000080".parse().unwrap();
        assert_eq!(translucent.to_bytes()[3], 0x80);
    }

    #[test]
    fn rejects_malformed_colors() {
        for input in ["4FC3F7", "#4FC3F", "#GGGGGG", "#ééé"] {
            let err = input.parse::<Rgba>().unwrap_err();
            assert!(format!("{err}").contains(input));
        }
    }

    #[test]
    fn keyframes_use_short_json_keys() {
        let keyframe = Keyframe::at(350)
            .position(0.5, 0.58)
            .width(0.86)
            .opacity(1.0)
            .color(Rgba::from_argb(0xFF161923));

        let json = serde_json::to_value(&keyframe).unwrap();
        assert_eq!(json["t"], 350);
        assert_eq!(json["color"], "#161923FF");
        assert!(json.get("h").is_none());

        let parsed: Keyframe =
            serde_json::from_str(r##"{"t": 200, "w": 0.1, "alpha": 0.0, "color": "#4FC3F7"}"##)
                .unwrap();
        assert_eq!(parsed.time_ms, 200);
        assert_eq!(parsed.width, Some(0.1));
        assert_eq!(parsed.opacity, Some(0.0));
        assert_eq!(parsed.x, None);
    }
}
