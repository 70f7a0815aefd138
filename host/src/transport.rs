//! Serial link to the microcontroller

use std::io::{self, Read, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use diorama_light_cycle::{Ack, Transport};
use serialport::SerialPort;

/// Baud rate the receiver firmware listens at
pub const BAUD_RATE: u32 = 115_200;

/// Read and write timeout of the port
pub const IO_TIMEOUT: Duration = Duration::from_millis(250);

/// [`Transport`] over a serial port
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
}

impl SerialTransport {
    /// Open `path` with the fixed baud rate and timeout
    pub fn open(path: &str) -> Result<Self> {
        let port = serialport::new(path, BAUD_RATE)
            .timeout(IO_TIMEOUT)
            .open()
            .with_context(|| format!("failed to open serial port {path}"))?;
        Ok(Self { port })
    }
}

impl Transport for SerialTransport {
    type Error = io::Error;

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.port.write_all(bytes)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.port.flush()
    }

    fn read_ack(&mut self) -> io::Result<Ack> {
        read_ack_from(&mut self.port)
    }
}

/// Read one acknowledgement byte
///
/// An empty read or `ErrorKind::TimedOut` is a soft timeout; any other
/// error means the link is gone.
pub fn read_ack_from(reader: &mut impl Read) -> io::Result<Ack> {
    let mut ack = [0u8; 1];
    match reader.read(&mut ack) {
        Ok(0) => Ok(Ack::TimedOut),
        Ok(_) => Ok(Ack::Received(ack[0])),
        Err(err) if err.kind() == io::ErrorKind::TimedOut => Ok(Ack::TimedOut),
        Err(err) => Err(err),
    }
}
