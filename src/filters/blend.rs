//! Per-pixel filter arithmetic
//!
//! Everything works in `i32` and clamps once when the output pixel is built.

use crate::engine::{clamp_channel, Pixel};

// ============================================================================
// Channel isolation
// ============================================================================

/// Color channel kept by an isolate filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// Zero the other two color channels
    pub fn isolate(self, pixel: Pixel) -> Pixel {
        match self {
            Channel::Red => Pixel::new(pixel.red(), 0, 0, pixel.alpha()),
            Channel::Green => Pixel::new(0, pixel.green(), 0, pixel.alpha()),
            Channel::Blue => Pixel::new(0, 0, pixel.blue(), pixel.alpha()),
        }
    }
}

// ============================================================================
// Tone adjustment (self-referential)
// ============================================================================

/// Brightness metric a tone filter measures on the pixel itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Value,
    Intensity,
    Luma,
}

impl Metric {
    pub fn measure(self, pixel: Pixel) -> u8 {
        match self {
            Metric::Value => pixel.value(),
            Metric::Intensity => pixel.intensity(),
            Metric::Luma => pixel.luma(),
        }
    }
}

/// Direction of a tone adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToneOp {
    Brighten,
    Darken,
}

impl ToneOp {
    /// Shift every color channel by `metric` measured on `pixel`
    ///
    /// Results are clamped to `0..=max`.
    pub fn adjust(self, pixel: Pixel, metric: Metric, max: u8) -> Pixel {
        let amount = metric.measure(pixel) as i32;
        let delta = match self {
            ToneOp::Brighten => amount,
            ToneOp::Darken => -amount,
        };
        pixel.map_channels(|c| clamp_channel(c as i32 + delta, max))
    }
}

// ============================================================================
// Anchored blends (against the base layer)
// ============================================================================

/// Blend computed between the target pixel and the base layer's pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendOp {
    Multiply,
    Screen,
    Difference,
}

impl BlendOp {
    /// Combine `top` with `base`; alpha always comes from `top`
    pub fn blend(self, top: Pixel, base: Pixel, max: u8) -> Pixel {
        let m = max as i32;
        top.zip_channels(&base, |t, b| {
            let (t, b) = (t as i32, b as i32);
            let out = match self {
                // round(t * b / m)
                BlendOp::Multiply => (2 * t * b + m) / (2 * m),
                BlendOp::Screen => m - ((m - t) * (m - b)) / m,
                BlendOp::Difference => (t - b).abs(),
            };
            clamp_channel(out, max)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isolate_keeps_alpha() {
        let p = Pixel::new(10, 20, 30, 77);
        assert_eq!(Channel::Red.isolate(p), Pixel::new(10, 0, 0, 77));
        assert_eq!(Channel::Green.isolate(p), Pixel::new(0, 20, 0, 77));
        assert_eq!(Channel::Blue.isolate(p), Pixel::new(0, 0, 30, 77));
    }

    #[test]
    fn test_brighten_clamps_at_max() {
        let p = Pixel::rgb(200, 100, 50);
        // value = 200
        assert_eq!(
            ToneOp::Brighten.adjust(p, Metric::Value, 255),
            Pixel::rgb(255, 255, 250)
        );
        // intensity = 116
        assert_eq!(
            ToneOp::Brighten.adjust(p, Metric::Intensity, 255),
            Pixel::rgb(255, 216, 166)
        );
        assert_eq!(
            ToneOp::Brighten.adjust(Pixel::rgb(90, 10, 10), Metric::Value, 100),
            Pixel::rgb(100, 100, 100)
        );
    }

    #[test]
    fn test_darken_clamps_at_zero() {
        let p = Pixel::rgb(200, 100, 50);
        // luma = 118
        assert_eq!(
            ToneOp::Darken.adjust(p, Metric::Luma, 255),
            Pixel::rgb(82, 0, 0)
        );
    }

    #[test]
    fn test_multiply_rounds() {
        let out = BlendOp::Multiply.blend(Pixel::rgb(200, 100, 50), Pixel::rgb(128, 128, 128), 255);
        assert_eq!(out, Pixel::rgb(100, 50, 25));

        let white = Pixel::rgb(255, 255, 255);
        assert_eq!(BlendOp::Multiply.blend(white, white, 255), white);
    }

    #[test]
    fn test_screen() {
        let out = BlendOp::Screen.blend(Pixel::rgb(0, 255, 128), Pixel::rgb(0, 0, 128), 255);
        // 255 - (127 * 127) / 255 = 255 - 63
        assert_eq!(out, Pixel::rgb(0, 255, 192));
    }

    #[test]
    fn test_difference_and_alpha_source() {
        let top = Pixel::new(10, 200, 50, 40);
        let base = Pixel::new(60, 20, 50, 255);
        assert_eq!(
            BlendOp::Difference.blend(top, base, 255),
            Pixel::new(50, 180, 0, 40)
        );
    }

    #[test]
    fn test_blend_against_transparent_black() {
        let top = Pixel::rgb(12, 34, 56);
        assert_eq!(
            BlendOp::Multiply.blend(top, Pixel::TRANSPARENT, 255),
            Pixel::rgb(0, 0, 0)
        );
        assert_eq!(BlendOp::Screen.blend(top, Pixel::TRANSPARENT, 255), top);
        assert_eq!(BlendOp::Difference.blend(top, Pixel::TRANSPARENT, 255), top);
    }
}
