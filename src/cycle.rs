//! Day cycle driver
//!
//! Advances the simulated clock at a fixed tick rate and streams the
//! filtered lights to the transport. Portable: no async and no platform
//! timers. The caller passes in the current time and is responsible for
//! sleeping until the returned deadline.

use embassy_time::{Duration, Instant};
use thiserror::Error;

#[cfg(feature = "log")]
use log::{debug, trace};

use crate::clock::SimulatedClock;
use crate::codec::{EncodeError, encode};
use crate::color_order::ColorOrder;
use crate::dither::{ByteFrame, Quantizer};
use crate::filter::{TemporalFilter, filter_weight};
use crate::illumination;
use crate::{Ack, Transport};

/// Default tick rate (60 ticks per second).
pub const DEFAULT_REFRESH_RATE: u32 = 60;

/// Default real seconds per simulated hour.
pub const DEFAULT_SECONDS_PER_SIM_HOUR: f64 = 0.5;

/// Default real seconds for a light to fade halfway to its target.
pub const DEFAULT_FILTER_HALF_LIFE: f64 = 0.02;

const MICROS_PER_SECOND: u64 = 1_000_000;

/// Configuration for the day cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleConfig {
    /// Real seconds in which one simulated hour passes
    pub seconds_per_sim_hour: f64,
    /// Real seconds after which a light has faded halfway to its target
    pub filter_half_life_seconds: f64,
    /// Ticks per real second
    pub refresh_rate: u32,
    /// Wiring order of the chips
    pub color_order: ColorOrder,
    /// Simulated hour at startup
    pub start_hour: f64,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            seconds_per_sim_hour: DEFAULT_SECONDS_PER_SIM_HOUR,
            filter_half_life_seconds: DEFAULT_FILTER_HALF_LIFE,
            refresh_rate: DEFAULT_REFRESH_RATE,
            color_order: ColorOrder::default(),
            start_hour: 0.0,
        }
    }
}

impl CycleConfig {
    /// Simulated hours that pass in one tick
    pub fn sim_hours_per_tick(&self) -> f64 {
        1.0 / (f64::from(self.refresh_rate) * self.seconds_per_sim_hour)
    }

    /// Per-tick weight of the temporal filter
    pub fn filter_weight(&self) -> f64 {
        filter_weight(self.refresh_rate, self.filter_half_life_seconds)
    }

    /// Offset of the `tick`-th deadline from the start of the cycle
    ///
    /// Derived from the tick index so that rounding does not accumulate.
    pub fn deadline_offset(&self, tick: u64) -> Duration {
        let rate = u64::from(self.refresh_rate.max(1));
        Duration::from_micros(tick.saturating_mul(MICROS_PER_SECOND) / rate)
    }
}

/// Where the driver is within one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    /// Idle until the next deadline
    WaitingForDeadline,
    /// Simulating every deadline that has already passed
    CatchingUp,
    /// Quantizing, encoding and writing a frame
    Transmitting,
    /// Blocked on the acknowledgement byte
    AwaitingAck,
}

/// Failure during steady state
#[derive(Debug, Error)]
pub enum CycleError<E> {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error("failed to write frame: {0}")]
    Write(E),
    #[error("failed to flush frame: {0}")]
    Flush(E),
    #[error("failed to read acknowledgement: {0}")]
    Read(E),
}

/// Result of one driver tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// Ticks simulated to catch up with the current time
    pub ticks: u32,
    /// Acknowledgement of the transmitted frame, `None` if nothing was sent
    pub ack: Option<Ack>,
    /// Deadline of the next tick
    pub next_deadline: Instant,
}

impl FrameReport {
    /// Check if a frame went out in this tick
    pub const fn sent(&self) -> bool {
        self.ack.is_some()
    }
}

/// Running totals of the driver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleStats {
    /// Ticks simulated since start
    pub ticks: u64,
    /// Frames written to the transport
    pub frames_sent: u64,
    /// Frames the receiver did not acknowledge in time
    pub missed_acks: u64,
}

/// Fixed-rate day cycle driver
///
/// Each call to [`CycleDriver::tick`]:
/// 1. Simulates every tick whose deadline has been reached, coalescing
///    them if the caller fell behind; only the final filtered state is kept
/// 2. Quantizes and encodes the filtered lights
/// 3. Writes and flushes the frame, then waits for one acknowledgement byte
/// 4. Returns the deadline of the next tick
///
/// # Usage
///
/// ```ignore
/// let mut driver = CycleDriver::new(port, CycleConfig::default(), Instant::now());
///
/// loop {
///     let report = driver.tick(Instant::now())?;
///
///     // Platform-specific sleep
///     sleep_until(report.next_deadline);
/// }
/// ```
pub struct CycleDriver<T: Transport> {
    transport: T,
    config: CycleConfig,
    clock: SimulatedClock,
    filter: TemporalFilter,
    quantizer: Quantizer,
    origin: Instant,
    next_tick: u64,
    phase: CyclePhase,
    frame: ByteFrame,
    stats: CycleStats,
}

impl<T: Transport> CycleDriver<T> {
    /// Create a driver whose first deadline is `origin`
    pub fn new(transport: T, config: CycleConfig, origin: Instant) -> Self {
        Self {
            transport,
            clock: SimulatedClock::new(config.start_hour),
            filter: TemporalFilter::new(config.filter_weight()),
            quantizer: Quantizer::new(config.color_order),
            config,
            origin,
            next_tick: 0,
            phase: CyclePhase::WaitingForDeadline,
            frame: ByteFrame::new(),
            stats: CycleStats::default(),
        }
    }

    /// Run one cycle at time `now`
    ///
    /// Transport errors are returned as-is; a soft acknowledgement timeout
    /// is not an error and shows up as `Ack::TimedOut` in the report.
    pub fn tick(&mut self, now: Instant) -> Result<FrameReport, CycleError<T::Error>> {
        let ticks = self.catch_up(now);

        #[cfg(feature = "log")]
        if ticks > 1 {
            debug!("[CycleDriver.tick] coalesced {} ticks into one frame", ticks);
        }

        let ack = if self.filter.is_primed() {
            Some(self.transmit()?)
        } else {
            None
        };
        self.phase = CyclePhase::WaitingForDeadline;

        Ok(FrameReport {
            ticks,
            ack,
            next_deadline: self.next_deadline(),
        })
    }

    /// Simulate every tick whose deadline is at or before `now`
    ///
    /// Returns the number of ticks simulated.
    pub fn catch_up(&mut self, now: Instant) -> u32 {
        self.phase = CyclePhase::CatchingUp;
        let mut ticks: u32 = 0;
        while self.next_deadline() <= now {
            self.advance();
            ticks = ticks.saturating_add(1);
        }
        ticks
    }

    /// Deadline of the next tick to simulate
    pub fn next_deadline(&self) -> Instant {
        self.origin + self.config.deadline_offset(self.next_tick)
    }

    /// Time left until the next deadline, zero if it already passed
    pub fn sleep_duration(&self, now: Instant) -> Duration {
        self.next_deadline()
            .checked_duration_since(now)
            .unwrap_or(Duration::from_ticks(0))
    }

    /// Current simulated time
    pub const fn clock(&self) -> SimulatedClock {
        self.clock
    }

    /// Current phase of the cycle
    pub const fn phase(&self) -> CyclePhase {
        self.phase
    }

    /// Channel bytes of the most recently transmitted frame, in wire order
    pub fn last_frame(&self) -> &[u8] {
        &self.frame
    }

    /// Current filtered intensities
    pub fn filtered(&self) -> &[f64] {
        self.filter.values()
    }

    pub const fn stats(&self) -> CycleStats {
        self.stats
    }

    pub const fn config(&self) -> &CycleConfig {
        &self.config
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Simulate a single tick
    fn advance(&mut self) {
        self.next_tick += 1;
        self.clock.advance(self.config.sim_hours_per_tick());
        let target = illumination::compute(self.clock.hour());
        self.filter.step(&target);
        self.stats.ticks += 1;
    }

    /// Send the filtered state and wait for the receiver
    fn transmit(&mut self) -> Result<Ack, CycleError<T::Error>> {
        self.phase = CyclePhase::Transmitting;
        self.frame = self.quantizer.quantize(self.filter.values())?;
        let stream = encode(&self.frame)?;

        self.transport.write(&stream).map_err(CycleError::Write)?;
        self.transport.flush().map_err(CycleError::Flush)?;
        self.stats.frames_sent += 1;

        self.phase = CyclePhase::AwaitingAck;
        let ack = self.transport.read_ack().map_err(CycleError::Read)?;
        if ack == Ack::TimedOut {
            self.stats.missed_acks += 1;
            #[cfg(feature = "log")]
            debug!(
                "[CycleDriver.transmit] no acknowledgement for frame {}",
                self.stats.frames_sent
            );
        }
        #[cfg(feature = "log")]
        trace!(
            "[CycleDriver.transmit] sent {} bytes at {:.3}h",
            stream.len(),
            self.clock.hour()
        );

        Ok(ack)
    }
}
