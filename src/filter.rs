//! Temporal smoothing of channel intensities
//!
//! A one-pole exponential filter eases every channel towards its target,
//! giving the lights the slow on/off of an incandescent bulb.

use libm::pow;

#[cfg(feature = "log")]
use log::debug;

use crate::illumination::Intensities;

/// Fraction of the old value that remains after one tick
///
/// Calibrated so that after `half_life_seconds` of real time the filtered
/// value has covered half the distance to a held target.
pub fn filter_weight(refresh_rate: u32, half_life_seconds: f64) -> f64 {
    let ticks_per_half_life = f64::from(refresh_rate) * half_life_seconds;
    if ticks_per_half_life <= 0.0 {
        return 0.0;
    }
    pow(0.5, 1.0 / ticks_per_half_life)
}

/// Move `filtered` one tick towards `target`
///
/// If the two vectors differ in length (nothing filtered yet, or the channel
/// layout changed) `filtered` is reset to `target` before smoothing.
/// This reset keeps older single-layout callers working; it never reports
/// an error.
pub fn step(filtered: &mut Intensities, target: &Intensities, weight: f64) {
    if filtered.len() != target.len() {
        #[cfg(feature = "log")]
        debug!(
            "[filter] resetting state: {} -> {} channels",
            filtered.len(),
            target.len()
        );
        filtered.clone_from(target);
    }

    for (value, target) in filtered.iter_mut().zip(target.iter()) {
        *value = target + (*value - target) * weight;
    }
}

/// Exponential smoother that owns its state across ticks
#[derive(Debug, Clone)]
pub struct TemporalFilter {
    weight: f64,
    state: Intensities,
}

impl TemporalFilter {
    /// Create a filter with a precomputed per-tick weight
    pub const fn new(weight: f64) -> Self {
        Self {
            weight,
            state: Intensities::new(),
        }
    }

    /// Create a filter for the given refresh rate and half-life
    pub fn with_half_life(refresh_rate: u32, half_life_seconds: f64) -> Self {
        Self::new(filter_weight(refresh_rate, half_life_seconds))
    }

    /// Per-tick weight of the old value
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    /// Current filtered intensities
    pub fn values(&self) -> &[f64] {
        &self.state
    }

    /// Check if the filter has seen at least one target
    pub fn is_primed(&self) -> bool {
        !self.state.is_empty()
    }

    /// Apply one tick of smoothing towards `target`
    pub fn step(&mut self, target: &Intensities) -> &[f64] {
        step(&mut self.state, target, self.weight);
        &self.state
    }
}
