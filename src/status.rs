use core::fmt;

use crate::clock::SimulatedClock;

/// Human-readable one-line summary of a transmitted frame
///
/// Formats as ` Clock: HH:MM. Lights: | 0a 1b 2c. ...` with one group of
/// three hex bytes per chip, in wire order.
#[derive(Debug, Clone, Copy)]
pub struct Status<'a> {
    clock: SimulatedClock,
    bytes: &'a [u8],
}

impl<'a> Status<'a> {
    pub const fn new(clock: SimulatedClock, bytes: &'a [u8]) -> Self {
        Self { clock, bytes }
    }
}

impl fmt::Display for Status<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hours, minutes) = self.clock.hours_minutes();
        write!(f, " Clock: {hours:02}:{minutes:02}. Lights: |")?;
        for chip in self.bytes.chunks_exact(3) {
            write!(f, " {:02x} {:02x} {:02x}.", chip[0], chip[1], chip[2])?;
        }
        Ok(())
    }
}
