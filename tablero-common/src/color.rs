use serde::{Deserialize, Serialize};

/// An opaque RGB color. Chart specs carry colors as CSS strings, so the
/// serde representation is the `rgb(r, g, b)` form rather than a struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Invalid CSS color: {0}")]
pub struct ColorParseError(pub String);

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// A gray with all three channels set to `level`.
    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }

    /// Whether all three channels are equal.
    pub fn is_gray(&self) -> bool {
        self.r == self.g && self.g == self.b
    }

    /// CSS functional notation, e.g. `rgb(141, 0, 46)`.
    pub fn to_css_rgb(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// Hex notation, e.g. `#8D002E`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse any CSS color string (`#8d002e`, `rgb(0, 76, 153)`, named
    /// colors). The alpha channel, if present, is discarded.
    pub fn from_css(s: &str) -> Result<Self, ColorParseError> {
        let color = s
            .parse::<css_color_parser::Color>()
            .map_err(|_| ColorParseError(s.to_string()))?;
        Ok(Self::new(color.r, color.g, color.b))
    }

    /// Channels as floats in [0, 1].
    pub fn to_unit_rgb(&self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// From float channels in [0, 1], truncating like the source
    /// application's `int(c * 255)`.
    pub fn from_unit_rgb(channels: [f32; 3]) -> Self {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0) as u8;
        Self::new(q(channels[0]), q(channels[1]), q(channels[2]))
    }
}

impl std::fmt::Display for RgbColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_css_rgb())
    }
}

impl Serialize for RgbColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css_rgb())
    }
}

impl<'de> Deserialize<'de> for RgbColor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        RgbColor::from_css(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_round_trip() {
        let wine = RgbColor::from_css("#8d002e").unwrap();
        assert_eq!(wine, RgbColor::new(141, 0, 46));
        assert_eq!(wine.to_css_rgb(), "rgb(141, 0, 46)");
        assert_eq!(wine.to_hex(), "#8D002E");
        assert_eq!(RgbColor::from_css(&wine.to_css_rgb()).unwrap(), wine);
    }

    #[test]
    fn test_invalid_color() {
        assert!(RgbColor::from_css("not-a-color").is_err());
    }

    #[test]
    fn test_gray() {
        let g = RgbColor::gray(169);
        assert!(g.is_gray());
        assert_eq!(g.to_css_rgb(), "rgb(169, 169, 169)");
    }

    #[test]
    fn test_unit_conversion() {
        let c = RgbColor::from_unit_rgb([0.2, 0.95, 1.0]);
        assert_eq!(c, RgbColor::new(51, 242, 255));
        let back = c.to_unit_rgb();
        assert!((back[0] - 0.2).abs() < 1.0 / 255.0);
    }
}
