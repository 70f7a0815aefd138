//! Building lights, driven by the first chip on the chain.

/// Intensity of the security light while it is on
pub const SECURITY_LIGHT: f64 = 0.25;

/// Intensity of the porch light while it is on
pub const PORCH_LIGHT: f64 = 0.25;

/// Intensity of the main light while it is on
pub const MAIN_LIGHT: f64 = 1.0;

/// Security, porch and main light for the given hour
pub fn building_lights(hour: f64) -> [f64; 3] {
    let security = hour > 15.0 || hour < 9.0;
    let porch = (hour > 17.0 && hour < 19.5) || (hour > 5.5 && hour < 8.0);
    let main = hour > 4.0 && hour < 21.0;

    [
        if security { SECURITY_LIGHT } else { 0.0 },
        if porch { PORCH_LIGHT } else { 0.0 },
        if main { MAIN_LIGHT } else { 0.0 },
    ]
}
