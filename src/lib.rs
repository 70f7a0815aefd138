#![no_std]

pub mod clock;
pub mod codec;
pub mod color_order;
pub mod cycle;
pub mod dither;
pub mod filter;
pub mod illumination;
pub mod layout;
pub mod status;

pub use clock::SimulatedClock;
pub use codec::{DecodeError, EncodeError, PackedStream, decode, encode};
pub use color_order::ColorOrder;
pub use cycle::{CycleConfig, CycleDriver, CycleError, CyclePhase, FrameReport};
pub use dither::{ByteFrame, GoldenDither, Quantizer};
pub use filter::TemporalFilter;
pub use illumination::Intensities;
pub use layout::{CHANNEL_COUNT, PACKED_LEN};
pub use status::Status;

pub use embassy_time::{Duration, Instant};

/// Outcome of waiting for the receiver to acknowledge a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ack {
    /// The receiver answered with a byte
    Received(u8),
    /// Nothing arrived within the transport's read timeout.
    ///
    /// This is not an error: the next frame is sent on schedule anyway.
    TimedOut,
}

/// Byte link to the device that expands frames onto the LED chain
///
/// Implement this trait for the serial port (or a test double).
/// The cycle driver is generic over this trait.
pub trait Transport {
    /// Hard failure of the link, e.g. the device was unplugged
    type Error;

    /// Write a complete packed frame
    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Flush buffered bytes out to the device
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Block for a single acknowledgement byte, bounded by the transport timeout
    ///
    /// A soft timeout must be reported as `Ok(Ack::TimedOut)`, only connection
    /// loss is an `Err`.
    fn read_ack(&mut self) -> Result<Ack, Self::Error>;
}
