//! Colors and swing palettes.

use serde::{Deserialize, Serialize};

use crate::constants::MIN_PALETTE_COLORS;

/// RGBA color with components in 0-1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Solid black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from RGB values (0-1) with full alpha.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Creates a color from a packed 0xRRGGBBAA value.
    #[must_use]
    pub fn hex(hex: u32) -> Self {
        let r = ((hex >> 24) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let b = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let a = (hex & 0xFF) as f32 / 255.0;
        Self::rgba(r, g, b, a)
    }

    /// Returns a new color with different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Multiplies every channel (alpha included) by `factor`.
    ///
    /// This is how faded additive layers are produced: premultiplied fade.
    #[must_use]
    pub fn scale(self, factor: f32) -> Self {
        Self::rgba(self.r * factor, self.g * factor, self.b * factor, self.a * factor)
    }

    /// Linearly interpolates between two colors.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::rgba(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Converts to array format.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Ordered swing colors, darkest/coolest first, brightest/hottest last.
///
/// Resolved once when a weapon definition is built and shared by every
/// swing of that weapon.
#[derive(Debug, Clone, PartialEq)]
pub struct SwingPalette {
    colors: Vec<Color>,
}

impl SwingPalette {
    /// Builds a palette. Returns `None` with fewer than two colors.
    #[must_use]
    pub fn new(colors: Vec<Color>) -> Option<Self> {
        if colors.len() < MIN_PALETTE_COLORS {
            return None;
        }
        Some(Self { colors })
    }

    /// Builds a palette from packed 0xRRGGBBAA values.
    #[must_use]
    pub fn from_hex(values: &[u32]) -> Option<Self> {
        Self::new(values.iter().copied().map(Color::hex).collect())
    }

    /// Number of colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false: a palette holds at least two colors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `index`, clamped into the palette.
    #[must_use]
    pub fn get(&self, index: usize) -> Color {
        self.colors[index.min(self.colors.len() - 1)]
    }

    /// The first (darkest) color.
    #[must_use]
    pub fn darkest(&self) -> Color {
        self.colors[0]
    }

    /// The last (brightest) color.
    #[must_use]
    pub fn brightest(&self) -> Color {
        self.colors[self.colors.len() - 1]
    }

    /// Samples the gradient at `t` (0 = darkest, 1 = brightest).
    #[must_use]
    pub fn sample(&self, t: f32) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let scaled = t * (self.colors.len() - 1) as f32;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let lower = (scaled.floor() as usize).min(self.colors.len() - 2);
        let local = scaled - lower as f32;
        self.colors[lower].lerp(self.colors[lower + 1], local)
    }

    /// All colors in order.
    #[must_use]
    pub fn as_slice(&self) -> &[Color] {
        &self.colors
    }
}
