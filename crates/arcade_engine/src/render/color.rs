use serde::{Deserialize, Serialize};

/// RGBA color with 8-bit channels
///
/// Every channel is an integer in `0..=255` with straight (not
/// premultiplied) alpha; `255` alpha is opaque. This is the only channel
/// convention in the system. Backends convert from it, never reinterpret it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Color {
    /// Opaque black
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque red
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Opaque green
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    /// Opaque blue
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    /// Opaque yellow
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    /// Fully transparent black
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Create a color from all four channels
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Channels scaled to `0.0..=1.0`, for backends that take float colors
    pub fn to_normalized(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a].map(|c| f32::from(c) / 255.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_extremes() {
        assert_eq!(Color::WHITE.to_normalized(), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(Color::TRANSPARENT.to_normalized(), [0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_rgb_is_opaque() {
        assert_eq!(Color::rgb(1, 2, 3).a, 255);
    }
}
