use std::fmt;
use serde::{Deserialize, Serialize};

/// Unique identifier for a node in the scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// 24-bit RGB color.
/// Written as `0xRRGGBB` in code and as `"#rrggbb"` in JSON config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(u32);

impl Color {
    pub const WHITE: Self = Self(0xffffff);
    pub const BLACK: Self = Self(0x000000);

    /// Build a color from a packed `0xRRGGBB` value. Bits above 24 are dropped.
    pub const fn from_hex(hex: u32) -> Self {
        Self(hex & 0x00ff_ffff)
    }

    /// Packed `0xRRGGBB` value.
    pub const fn hex(self) -> u32 {
        self.0
    }

    /// Channels in [0, 1].
    pub fn to_rgb(self) -> [f32; 3] {
        [
            ((self.0 >> 16) & 0xff) as f32 / 255.0,
            ((self.0 >> 8) & 0xff) as f32 / 255.0,
            (self.0 & 0xff) as f32 / 255.0,
        ]
    }

    /// Channels multiplied by a light intensity.
    pub fn scaled(self, intensity: f32) -> [f32; 3] {
        let [r, g, b] = self.to_rgb();
        [r * intensity, g * intensity, b * intensity]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let digits = value.strip_prefix('#').unwrap_or(&value);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("expected a \"#rrggbb\" color, got {value:?}"));
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from_hex)
            .map_err(|err| format!("invalid color {value:?}: {err}"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_channels() {
        let c = Color::from_hex(0xff8000);
        let [r, g, b] = c.to_rgb();
        assert_eq!(r, 1.0);
        assert!((g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(b, 0.0);
    }

    #[test]
    fn from_hex_masks_high_bits() {
        assert_eq!(Color::from_hex(0xff12_3456).hex(), 0x123456);
    }

    #[test]
    fn parse_with_and_without_hash() {
        assert_eq!(Color::try_from("#2563eb".to_string()), Ok(Color::from_hex(0x2563eb)));
        assert_eq!(Color::try_from("F59E0B".to_string()), Ok(Color::from_hex(0xf59e0b)));
        assert!(Color::try_from("#fff".to_string()).is_err());
        assert!(Color::try_from("#gg0000".to_string()).is_err());
    }

    #[test]
    fn display_is_lowercase_hash() {
        assert_eq!(Color::from_hex(0x10B981).to_string(), "#10b981");
    }

    #[test]
    fn scaled_by_intensity() {
        assert_eq!(Color::WHITE.scaled(0.6), [0.6, 0.6, 0.6]);
    }
}
