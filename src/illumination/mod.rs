//! Illumination model
//!
//! Maps a simulated hour of the day to the target intensity of every channel.
//! The result is a pure function of the hour: no state, no randomness.
//! The starfield look only appears later, when the dither step spreads the
//! constant star floor over neighbouring byte values.

mod building;
mod dome;

pub use building::{MAIN_LIGHT, PORCH_LIGHT, SECURITY_LIGHT, building_lights};
pub use dome::{DomeLight, MixWeights, SUN_MIX, dome_angle, dome_element};

use crate::layout::{CHANNEL_COUNT, DOME_ELEMENTS};

/// Normalized channel intensities in `[0, 1]`, in physical chain order
pub type Intensities = heapless::Vec<f64, CHANNEL_COUNT>;

/// Compute the target intensities for the whole installation
///
/// `hour` must already be wrapped into `[0, 24)`.
pub fn compute(hour: f64) -> Intensities {
    let mut lights = Intensities::new();
    lights.extend(building_lights(hour));

    let light = DomeLight::at(hour);
    for index in 0..DOME_ELEMENTS {
        lights.extend(dome_element(light, dome_angle(index)));
    }

    lights
}
