/// Hours in a simulated day
pub const HOURS_PER_DAY: f64 = 24.0;

/// Simulated time of day, in hours within `[0, 24)`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimulatedClock {
    hour: f64,
}

impl SimulatedClock {
    /// Create a clock at the given hour, wrapped into the day
    pub fn new(hour: f64) -> Self {
        Self {
            hour: wrap_hour(hour),
        }
    }

    /// Current hour of the day
    pub const fn hour(self) -> f64 {
        self.hour
    }

    /// Advance the clock by `hours`, wrapping at midnight
    pub fn advance(&mut self, hours: f64) {
        self.hour = wrap_hour(self.hour + hours);
    }

    /// Whole hours and minutes, for display
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn hours_minutes(self) -> (u8, u8) {
        let hours = self.hour as u8;
        let minutes = ((self.hour - f64::from(hours)) * 60.0) as u8;
        (hours, minutes.min(59))
    }
}

fn wrap_hour(hour: f64) -> f64 {
    let wrapped = hour % HOURS_PER_DAY;
    if wrapped < 0.0 {
        wrapped + HOURS_PER_DAY
    } else {
        wrapped
    }
}
