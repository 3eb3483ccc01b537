pub mod diverging;
pub mod grayscale;
pub mod ramp;

pub use diverging::DivergingPastelScale;
pub use grayscale::GrayscaleShareScale;
pub use ramp::{grayscale_ramp, grayscale_ramp_between, LinearRampScale};

use palette::{Mix, Srgba};

/// Interpolate over evenly spaced color stops for a normalized value in
/// [0, 1], mixing between the two adjacent stops.
pub(crate) fn interpolate_stops(stops: &[Srgba], t: f32) -> Srgba {
    let scale_factor = (stops.len() - 1) as f32;
    let continuous_index = (t * scale_factor).clamp(0.0, scale_factor);
    let lower_index = continuous_index.floor() as usize;
    let upper_index = continuous_index.ceil() as usize;

    if lower_index == upper_index {
        stops[lower_index]
    } else {
        let t = continuous_index - lower_index as f32;
        stops[lower_index].mix(stops[upper_index], t)
    }
}
