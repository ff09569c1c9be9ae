/// Pixel color triple and its hex representation.

use serde::Serialize;
use std::fmt;

/// An RGB triple read from a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct PixelColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PixelColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb`, always 7 characters.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Sum of the three channels (max 765, fits in u16).
    pub fn total(&self) -> u16 {
        self.r as u16 + self.g as u16 + self.b as u16
    }
}

impl From<image::Rgb<u8>> for PixelColor {
    fn from(px: image::Rgb<u8>) -> Self {
        let [r, g, b] = px.0;
        Self { r, g, b }
    }
}

impl From<PixelColor> for image::Rgb<u8> {
    fn from(c: PixelColor) -> Self {
        image::Rgb(c.channels())
    }
}

/// Displays as the literal `(r, g, b)` triple.
impl fmt::Display for PixelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}
