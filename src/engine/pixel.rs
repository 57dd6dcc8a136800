//! Pixel value type
//!
//! An immutable 8-bit RGBA color with the derived brightness metrics used by
//! the tone filters.

/// Largest value any channel can hold
pub const CHANNEL_MAX: u8 = 255;

// ============================================================================
// Helper Functions
// ============================================================================

/// Clamp a wide intermediate into `0..=max`
#[inline]
pub fn clamp_channel(value: i32, max: u8) -> u8 {
    value.clamp(0, max as i32) as u8
}

// ============================================================================
// Pixel
// ============================================================================

/// RGBA color value
///
/// Channels are plain `u8`, so they can never leave `[0, 255]`. Arithmetic
/// that builds a new pixel goes through [`clamp_channel`] rather than
/// wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixel {
    red: u8,
    green: u8,
    blue: u8,
    alpha: u8,
}

impl Pixel {
    /// Opaque black, the initial value of every canvas
    pub const BLACK: Pixel = Pixel::new(0, 0, 0, CHANNEL_MAX);

    /// Fully transparent black
    pub const TRANSPARENT: Pixel = Pixel::new(0, 0, 0, 0);

    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Opaque pixel from color channels
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, CHANNEL_MAX)
    }

    pub fn red(&self) -> u8 {
        self.red
    }

    pub fn green(&self) -> u8 {
        self.green
    }

    pub fn blue(&self) -> u8 {
        self.blue
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    /// Color channels as `[r, g, b]`
    pub fn channels(&self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    /// Average of the color channels (integer division)
    pub fn intensity(&self) -> u8 {
        ((self.red as u16 + self.green as u16 + self.blue as u16) / 3) as u8
    }

    /// Largest color channel
    pub fn value(&self) -> u8 {
        self.red.max(self.green).max(self.blue)
    }

    /// Rec. 709 weighted brightness before rounding
    pub fn weighted_luma(&self) -> f64 {
        0.2126 * self.red as f64 + 0.7152 * self.green as f64 + 0.0722 * self.blue as f64
    }

    /// [`Pixel::weighted_luma`] rounded to the nearest integer
    pub fn luma(&self) -> u8 {
        self.weighted_luma().round().clamp(0.0, CHANNEL_MAX as f64) as u8
    }

    /// Same alpha, color channels replaced by `f(channel)`
    pub fn map_channels(&self, mut f: impl FnMut(u8) -> u8) -> Self {
        Self::new(f(self.red), f(self.green), f(self.blue), self.alpha)
    }

    /// Same alpha, color channels combined pairwise with `other`'s
    pub fn zip_channels(&self, other: &Pixel, mut f: impl FnMut(u8, u8) -> u8) -> Self {
        Self::new(
            f(self.red, other.red),
            f(self.green, other.green),
            f(self.blue, other.blue),
            self.alpha,
        )
    }
}

impl Default for Pixel {
    fn default() -> Self {
        Pixel::BLACK
    }
}
