use tablero_common::color::RgbColor;

use crate::numeric::LinearNormalize;

/// Default endpoints for the year-intensity ramp: light blue to dark blue.
const LIGHT_BLUE: RgbColor = RgbColor::new(204, 229, 255);
const DARK_BLUE: RgbColor = RgbColor::new(0, 76, 153);

/// A two-point linear color ramp: each channel is interpolated
/// independently between a light and a dark endpoint, driven by an
/// intensity in [0, 1].
#[derive(Clone, Debug)]
pub struct LinearRampScale {
    light: RgbColor,
    dark: RgbColor,
}

impl Default for LinearRampScale {
    fn default() -> Self {
        Self {
            light: LIGHT_BLUE,
            dark: DARK_BLUE,
        }
    }
}

impl LinearRampScale {
    pub fn new(light: RgbColor, dark: RgbColor) -> Self {
        Self { light, dark }
    }

    /// The color at an intensity in [0, 1]: 0 is the light endpoint, 1 the
    /// dark one.
    pub fn at(&self, intensity: f64) -> RgbColor {
        let intensity = intensity.clamp(0.0, 1.0);
        let channel = |light: u8, dark: u8| {
            (light as f64 + (dark as f64 - light as f64) * intensity) as u8
        };
        RgbColor::new(
            channel(self.light.r, self.dark.r),
            channel(self.light.g, self.dark.g),
            channel(self.light.b, self.dark.b),
        )
    }

    /// The intensity of a value within its domain; a zero-range domain
    /// yields full intensity.
    pub fn intensity_for(value: f64, domain: (f64, f64)) -> f64 {
        let norm = LinearNormalize::new(domain).with_clamp(true);
        if norm.is_degenerate() {
            1.0
        } else {
            norm.normalize(value)
        }
    }

    /// Shorthand for `at(intensity_for(value, domain))`.
    pub fn scale_value(&self, value: f64, domain: (f64, f64)) -> RgbColor {
        self.at(Self::intensity_for(value, domain))
    }
}

/// `n` evenly spaced grays from light gray (211) down to black, as used
/// for the non-highlighted scatter series. A single requested color
/// returns the midpoint gray.
pub fn grayscale_ramp(n: usize) -> Vec<RgbColor> {
    grayscale_ramp_between(n, 211, 0)
}

pub fn grayscale_ramp_between(n: usize, start: u8, end: u8) -> Vec<RgbColor> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![RgbColor::gray(((start as u16 + end as u16) / 2) as u8)];
    }
    let step = (start as f64 - end as f64) / (n - 1) as f64;
    (0..n)
        .map(|i| {
            let level = (start as f64 - step * i as f64) as i64;
            RgbColor::gray(level.clamp(0, 255) as u8)
        })
        .collect()
}
