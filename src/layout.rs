//! Fixed topology of the installation.
//!
//! The building's WS2811 chip is the first on the data line, the dome strip
//! is chained to its output. Every chip drives one color triplet.

/// Channels driven by the building chip (security, porch and main light)
pub const BUILDING_CHANNELS: usize = 3;

/// Rows of the dome strip
pub const DOME_ROWS: usize = 8;

/// Columns of the dome strip
pub const DOME_COLUMNS: usize = 6;

/// Number of chips on the dome strip
pub const DOME_ELEMENTS: usize = DOME_ROWS * DOME_COLUMNS;

/// Color channels per chip
pub const CHANNELS_PER_ELEMENT: usize = 3;

/// Total number of channels in one frame
pub const CHANNEL_COUNT: usize = BUILDING_CHANNELS + CHANNELS_PER_ELEMENT * DOME_ELEMENTS;

/// Bytes on the wire for one frame
pub const PACKED_LEN: usize = packed_len(CHANNEL_COUNT);

/// Wire length of a frame with `channels` channels
///
/// Every 3 channel bytes expand into 4 packed bytes. `channels` must be a
/// multiple of 3, a trailing partial triplet is not transmitted.
pub const fn packed_len(channels: usize) -> usize {
    4 * (channels / 3)
}

const _: () = assert!(CHANNEL_COUNT.is_multiple_of(3));
