//! Quantization with golden-ratio dithering
//!
//! Truncating smoothly changing intensities to 8 bits shows up as visible
//! steps on a dim LED. Adding a sub-unit offset that walks a low-discrepancy
//! sequence before truncation turns those steps into fine, decorrelated
//! noise. The offset changes once per chip, so all three channels of a chip
//! share it.

use smart_leds::RGB8;

use crate::codec::EncodeError;
use crate::color_order::ColorOrder;
use crate::layout::CHANNEL_COUNT;

/// Fractional part of the golden ratio
pub const GOLDEN_RATIO_FRACTION: f64 = 0.618_033_988_75;

/// Channel bytes of one frame, in wire order
pub type ByteFrame = heapless::Vec<u8, CHANNEL_COUNT>;

/// Dither offset in `[0, 1)`, stepped by the golden ratio
///
/// One accumulator is scoped to a single frame and starts at zero, so the
/// same intensities always quantize to the same bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GoldenDither {
    offset: f64,
}

impl GoldenDither {
    /// Create an accumulator at zero
    pub const fn new() -> Self {
        Self { offset: 0.0 }
    }

    /// Current offset
    pub const fn offset(self) -> f64 {
        self.offset
    }

    /// Step to the offset for the next chip and return it
    pub fn advance(&mut self) -> f64 {
        self.offset -= GOLDEN_RATIO_FRACTION;
        if self.offset < 0.0 {
            self.offset += 1.0;
        }
        self.offset
    }
}

/// Map a normalized intensity to a byte, adding `dither` before truncation
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn quantize_value(value: f64, dither: f64) -> u8 {
    (255.0 * value + dither).clamp(0.0, 255.0) as u8
}

/// Quantize one logical triplet with a shared offset
#[inline]
pub fn quantize_triplet(values: [f64; 3], dither: f64) -> RGB8 {
    RGB8::new(
        quantize_value(values[0], dither),
        quantize_value(values[1], dither),
        quantize_value(values[2], dither),
    )
}

/// Converts filtered intensities to wire-ordered channel bytes
#[derive(Debug, Clone, Copy, Default)]
pub struct Quantizer {
    order: ColorOrder,
}

impl Quantizer {
    /// Create a quantizer for chips wired in `order`
    pub const fn new(order: ColorOrder) -> Self {
        Self { order }
    }

    /// Color order applied to every triplet
    pub const fn order(self) -> ColorOrder {
        self.order
    }

    /// Quantize a frame of intensities
    ///
    /// Values are processed per chip triplet; a trailing partial triplet is
    /// dropped. More than [`CHANNEL_COUNT`] values is an error.
    pub fn quantize(self, values: &[f64]) -> Result<ByteFrame, EncodeError> {
        EncodeError::check_capacity(values.len())?;

        let mut dither = GoldenDither::new();
        let mut frame = ByteFrame::new();
        for triplet in values.chunks_exact(3) {
            let offset = dither.advance();
            let color = quantize_triplet([triplet[0], triplet[1], triplet[2]], offset);
            frame.extend(self.order.arrange(color));
        }

        Ok(frame)
    }
}
