use palette::Srgba;
use tablero_common::color::RgbColor;

use crate::color::interpolate_stops;
use crate::error::TableroScaleError;
use crate::numeric::TwoSlopeNormalize;

/// ColorBrewer RdYlGn-11 control points, red through yellow to green. The
/// middle stop is the hue the diverging center lands on.
const RD_YL_GN: [(u8, u8, u8); 11] = [
    (0xa5, 0x00, 0x26),
    (0xd7, 0x30, 0x27),
    (0xf4, 0x6d, 0x43),
    (0xfd, 0xae, 0x61),
    (0xfe, 0xe0, 0x8b),
    (0xff, 0xff, 0xbf),
    (0xd9, 0xef, 0x8b),
    (0xa6, 0xd9, 0x6a),
    (0x66, 0xbd, 0x63),
    (0x1a, 0x98, 0x50),
    (0x00, 0x68, 0x37),
];

/// Fraction of white mixed into every output channel: `0.2 + 0.75 * c`.
const PASTEL_OFFSET: f32 = 0.2;
const PASTEL_FACTOR: f32 = 0.75;

/// The diverging pastel scale used for percentage table cells: a two-slope
/// normalization over `(min, center, max)`, a red/yellow/green colormap
/// lookup, and a pastel blend toward white. Missing values pass through
/// uncolored.
#[derive(Clone, Debug)]
pub struct DivergingPastelScale {
    norm: TwoSlopeNormalize,
    stops: Vec<Srgba>,
}

impl DivergingPastelScale {
    /// Errors when `center` lies outside `[min, max]`.
    pub fn try_new(min: f64, center: f64, max: f64) -> Result<Self, TableroScaleError> {
        Ok(Self {
            norm: TwoSlopeNormalize::try_new(min, center, max)?,
            stops: default_stops(),
        })
    }

    /// Snaps an out-of-range center onto the nearest domain endpoint, for
    /// columns whose observed values all sit on one side of the center.
    pub fn with_clamped_center(
        min: f64,
        center: f64,
        max: f64,
    ) -> Result<Self, TableroScaleError> {
        Ok(Self {
            norm: TwoSlopeNormalize::clamped(min, center, max)?,
            stops: default_stops(),
        })
    }

    /// Derive the domain from the non-missing values of a series. Returns
    /// `None` when the series has no values to derive a domain from.
    pub fn from_series(
        values: &[Option<f64>],
        center: f64,
    ) -> Result<Option<Self>, TableroScaleError> {
        let present = values.iter().filter_map(|v| *v);
        let min = present.clone().fold(f64::INFINITY, f64::min);
        let max = present.fold(f64::NEG_INFINITY, f64::max);
        if min > max {
            return Ok(None);
        }
        Ok(Some(Self::with_clamped_center(min, center, max)?))
    }

    pub fn domain(&self) -> (f64, f64, f64) {
        self.norm.domain()
    }

    pub fn scale_value(&self, value: Option<f64>) -> Option<RgbColor> {
        let value = value?;
        if value.is_nan() {
            return None;
        }
        let t = self.norm.normalize(value) as f32;
        let base = interpolate_stops(&self.stops, t);
        let pastel = |c: f32| PASTEL_OFFSET + PASTEL_FACTOR * c;
        Some(RgbColor::from_unit_rgb([
            pastel(base.red),
            pastel(base.green),
            pastel(base.blue),
        ]))
    }

    pub fn scale(&self, values: &[Option<f64>]) -> Vec<Option<RgbColor>> {
        values.iter().map(|v| self.scale_value(*v)).collect()
    }
}

fn default_stops() -> Vec<Srgba> {
    RD_YL_GN
        .iter()
        .map(|(r, g, b)| {
            Srgba::new(
                *r as f32 / 255.0,
                *g as f32 / 255.0,
                *b as f32 / 255.0,
                1.0,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pastel_of(stop: (u8, u8, u8)) -> RgbColor {
        let p = |c: u8| PASTEL_OFFSET + PASTEL_FACTOR * (c as f32 / 255.0);
        RgbColor::from_unit_rgb([p(stop.0), p(stop.1), p(stop.2)])
    }

    #[test]
    fn test_center_maps_to_center_hue() {
        let scale = DivergingPastelScale::try_new(10.0, 50.0, 90.0).unwrap();
        let center = scale.scale_value(Some(50.0)).unwrap();
        assert_eq!(center, pastel_of(RD_YL_GN[5]));
    }

    #[test]
    fn test_endpoints_map_to_colormap_ends() {
        let scale = DivergingPastelScale::try_new(10.0, 50.0, 90.0).unwrap();
        assert_eq!(scale.scale_value(Some(10.0)).unwrap(), pastel_of(RD_YL_GN[0]));
        assert_eq!(scale.scale_value(Some(90.0)).unwrap(), pastel_of(RD_YL_GN[10]));
    }

    #[test]
    fn test_channels_stay_in_pastel_band() {
        let scale = DivergingPastelScale::try_new(0.0, 50.0, 100.0).unwrap();
        let lo = (PASTEL_OFFSET * 255.0) as u8;
        let hi = ((PASTEL_OFFSET + PASTEL_FACTOR) * 255.0) as u8;
        for v in 0..=100 {
            let c = scale.scale_value(Some(v as f64)).unwrap();
            for channel in [c.r, c.g, c.b] {
                assert!(
                    (lo..=hi).contains(&channel),
                    "channel {} outside pastel band for value {}",
                    channel,
                    v
                );
            }
        }
    }

    #[test]
    fn test_missing_values_pass_through() {
        let scale = DivergingPastelScale::try_new(10.0, 50.0, 90.0).unwrap();
        assert_eq!(scale.scale_value(None), None);
        assert_eq!(scale.scale_value(Some(f64::NAN)), None);

        let colored = scale.scale(&[Some(10.0), None, Some(90.0)]);
        assert!(colored[0].is_some());
        assert!(colored[1].is_none());
        assert!(colored[2].is_some());
    }

    #[test]
    fn test_idempotent() {
        let scale = DivergingPastelScale::try_new(10.0, 50.0, 90.0).unwrap();
        let values: Vec<Option<f64>> = (0..100).map(|v| Some(v as f64)).collect();
        assert_eq!(scale.scale(&values), scale.scale(&values));
    }

    #[test]
    fn test_center_out_of_range_is_an_error() {
        assert_eq!(
            DivergingPastelScale::try_new(60.0, 50.0, 90.0).unwrap_err(),
            TableroScaleError::CenterOutOfRange {
                center: 50.0,
                min: 60.0,
                max: 90.0
            }
        );
        // The clamping constructor snaps the center onto the domain edge,
        // so the whole column reads as at-or-above center.
        let scale = DivergingPastelScale::with_clamped_center(60.0, 50.0, 90.0).unwrap();
        assert_eq!(scale.scale_value(Some(60.0)).unwrap(), pastel_of(RD_YL_GN[5]));
    }

    #[test]
    fn test_from_series() {
        let scale = DivergingPastelScale::from_series(&[Some(10.0), None, Some(90.0)], 50.0)
            .unwrap()
            .unwrap();
        assert_eq!(scale.domain(), (10.0, 50.0, 90.0));

        assert!(DivergingPastelScale::from_series(&[None, None], 50.0)
            .unwrap()
            .is_none());
    }
}
