//! Sky dome
//!
//! The dome is a single strip laid out as a serpentine, so the strip passes
//! the same angle on the dome every 16 chips. Each chip mixes three light
//! sources: a constant star floor, a diffuse daylight glow and a directional
//! sun glow whose center moves across the dome with the hour.

use libm::fabs;

/// Constant star floor
const STARS: f64 = 0.01;

/// Share of the diffuse daylight glow in every channel
const SKY_MIX: f64 = 0.3;

/// Chips after which the serpentine returns to the same angle
const SERPENTINE_PERIOD: f64 = 16.0;

/// Per-channel contribution of the sun glow
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixWeights {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// Sun mix tuned for the installed strip
pub const SUN_MIX: MixWeights = MixWeights {
    a: -0.20,
    b: 0.60,
    c: 0.15,
};

/// Light sources at a given hour that do not depend on the chip position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomeLight {
    pub hour: f64,
    pub sky: f64,
}

impl DomeLight {
    /// Evaluate the position-independent part of the dome lighting
    pub fn at(hour: f64) -> Self {
        let sky = (0.15 * (9.5 - fabs(hour - 12.0))).clamp(0.0, 1.0);
        Self {
            hour,
            sky: sky * sky,
        }
    }

    /// Sun glow as seen from the given angle
    pub fn sun(self, angle: f64) -> f64 {
        let sun = (1.0 - 0.125 * fabs((12.0 - self.hour) + (angle - 3.0))).max(0.0);
        sun * sun
    }
}

/// Angular position of the dome chip at `index`
///
/// Runs 0.5, 1.5 .. 7.5 and then folds back 5.5 .. -1.5, a triangular wave
/// over 16 chips. The two values beyond each end of the ramp sit slightly
/// past the horizon on both sides.
#[allow(clippy::cast_precision_loss)]
pub fn dome_angle(index: usize) -> f64 {
    let angle = (index as f64 + 0.5) % SERPENTINE_PERIOD;
    if angle >= 8.0 { 14.0 - angle } else { angle }
}

/// Channel triplet of one dome chip, in logical order
pub fn dome_element(light: DomeLight, angle: f64) -> [f64; 3] {
    let sun = light.sun(angle);
    let base = STARS + SKY_MIX * light.sky;
    let channel = |weight: f64| {
        let value = (base + weight * sun).min(1.0);
        value * value
    };

    [channel(SUN_MIX.a), channel(SUN_MIX.b), channel(SUN_MIX.c)]
}
