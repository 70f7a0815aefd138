//! Wire format
//!
//! Every three channel bytes `x, y, z` are spread over four bytes carrying
//! six payload bits each:
//!
//! ```text
//! 00xxxxxx 00xxyyyy 00yyyyzz e0zzzzzz
//! ```
//!
//! Bits 7 and 6 of every byte are reserved for framing. Bit 7 (`e`) is set
//! only on the last byte of a frame, so the receiver reads data bytes until
//! it sees the marker and needs no length prefix.

use thiserror::Error;

use crate::layout::{CHANNEL_COUNT, PACKED_LEN};

/// End-of-message marker bit
pub const END_OF_MESSAGE: u8 = 0x80;

/// Payload bits of a packed byte
pub const PAYLOAD_MASK: u8 = 0x3F;

/// Framing bits that must be clear on a data byte
const FRAMING_MASK: u8 = !PAYLOAD_MASK;

/// Packed bytes of one frame
pub type PackedStream = heapless::Vec<u8, PACKED_LEN>;

/// Error returned when a packed stream cannot be unpacked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("stream ended without an end-of-message marker")]
    MissingMarker,
    #[error("stream length {0} is not a whole number of 4-byte groups")]
    PartialGroup(usize),
    #[error("byte {0} has framing bits set")]
    Framing(usize),
    #[error("frame exceeds the channel capacity")]
    Overflow,
}

/// Error returned when channel data does not fit into one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("{len} channels exceed the frame capacity of {capacity}")]
    Overflow { len: usize, capacity: usize },
}

impl EncodeError {
    /// Fail with [`EncodeError::Overflow`] if `len` channels do not fit
    pub const fn check_capacity(len: usize) -> Result<(), Self> {
        if len > CHANNEL_COUNT {
            return Err(Self::Overflow {
                len,
                capacity: CHANNEL_COUNT,
            });
        }
        Ok(())
    }
}

/// Pack one channel triplet into four wire bytes
#[inline]
pub const fn pack_group(x: u8, y: u8, z: u8, last: bool) -> [u8; 4] {
    [
        (x >> 2) & 0x3F,
        ((x & 0x03) << 4) | ((y >> 4) & 0x0F),
        ((y & 0x0F) << 2) | ((z >> 6) & 0x03),
        (z & 0x3F) | if last { END_OF_MESSAGE } else { 0 },
    ]
}

/// Recover the channel triplet and the end flag from four wire bytes
#[inline]
pub const fn unpack_group(group: [u8; 4]) -> ([u8; 3], bool) {
    let [b0, b1, b2, b3] = group;
    let x = ((b0 & PAYLOAD_MASK) << 2) | ((b1 >> 4) & 0x03);
    let y = ((b1 & 0x0F) << 4) | ((b2 >> 2) & 0x0F);
    let z = ((b2 & 0x03) << 6) | (b3 & PAYLOAD_MASK);
    ([x, y, z], b3 & END_OF_MESSAGE != 0)
}

/// Encode wire-ordered channel bytes into a packed stream
///
/// The length of `bytes` must be a multiple of 3; trailing bytes of a
/// partial triplet are not sent. More than [`CHANNEL_COUNT`] bytes is an
/// error.
pub fn encode(bytes: &[u8]) -> Result<PackedStream, EncodeError> {
    EncodeError::check_capacity(bytes.len())?;

    let mut stream = PackedStream::new();
    let groups = bytes.len() / 3;
    for (index, triplet) in bytes.chunks_exact(3).enumerate() {
        let last = index + 1 == groups;
        stream.extend(pack_group(triplet[0], triplet[1], triplet[2], last));
    }

    Ok(stream)
}

/// Decode one packed frame back into channel bytes
///
/// Parses the way the receiver does: data bytes up to and including the
/// first byte with the end-of-message marker. Bytes after the marker are
/// ignored.
pub fn decode(stream: &[u8]) -> Result<heapless::Vec<u8, CHANNEL_COUNT>, DecodeError> {
    let Some(end) = stream.iter().position(|byte| byte & END_OF_MESSAGE != 0) else {
        return Err(DecodeError::MissingMarker);
    };
    let message = &stream[..=end];
    if !message.len().is_multiple_of(4) {
        return Err(DecodeError::PartialGroup(message.len()));
    }
    if let Some(index) = message[..end]
        .iter()
        .position(|byte| byte & FRAMING_MASK != 0)
    {
        return Err(DecodeError::Framing(index));
    }
    if message[end] & FRAMING_MASK != END_OF_MESSAGE {
        return Err(DecodeError::Framing(end));
    }

    let mut bytes = heapless::Vec::new();
    for group in message.chunks_exact(4) {
        let (triplet, _) = unpack_group([group[0], group[1], group[2], group[3]]);
        bytes
            .extend_from_slice(&triplet)
            .map_err(|()| DecodeError::Overflow)?;
    }

    Ok(bytes)
}
