use tablero_common::color::RgbColor;

use crate::numeric::LinearNormalize;

/// Gray level returned when the domain has zero range.
const DEGENERATE_GRAY: u8 = 169;

/// Default highlight for the dominant slice, a dark wine.
const DEFAULT_HIGHLIGHT: RgbColor = RgbColor::new(0x8d, 0x00, 0x2e);

/// The grayscale used for participation pie charts: larger values map to
/// darker grays over `gray = floor(255 * (1 - t) * 0.6) + 50`, and the
/// maximum of the series is called out with a fixed highlight color.
#[derive(Clone, Debug)]
pub struct GrayscaleShareScale {
    norm: LinearNormalize,
    highlight: RgbColor,
}

impl GrayscaleShareScale {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            norm: LinearNormalize::new((min, max)),
            highlight: DEFAULT_HIGHLIGHT,
        }
    }

    pub fn with_highlight(mut self, highlight: RgbColor) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn highlight(&self) -> RgbColor {
        self.highlight
    }

    /// The gray level for a value: within [50, 203], monotonically
    /// decreasing as the value grows, 169 for a zero-range domain.
    pub fn gray_level(&self, value: f64) -> u8 {
        if self.norm.is_degenerate() {
            return DEGENERATE_GRAY;
        }
        let t = self.norm.normalize(value);
        let level = (255.0 * (1.0 - t) * 0.6) as i64 + 50;
        level.clamp(50, 203) as u8
    }

    pub fn scale_value(&self, value: f64) -> RgbColor {
        RgbColor::gray(self.gray_level(value))
    }

    /// Color a whole series, deriving the domain from its values and
    /// highlighting the (first) maximum. Everything else gets a gray.
    pub fn scale_series(values: &[f64]) -> Vec<RgbColor> {
        Self::scale_series_with(values, DEFAULT_HIGHLIGHT)
    }

    /// Only the first occurrence of the maximum is highlighted; later
    /// values tied with it fall through to the gray mapping (the
    /// degenerate gray when the whole series is flat).
    pub fn scale_series_with(values: &[f64], highlight: RgbColor) -> Vec<RgbColor> {
        let Some(max) = values.iter().copied().reduce(f64::max) else {
            return Vec::new();
        };
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let scale = Self::new(min, max).with_highlight(highlight);
        let max_index = values
            .iter()
            .position(|v| *v == max)
            .unwrap_or_default();

        values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                if i == max_index {
                    scale.highlight
                } else {
                    scale.scale_value(*v)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_bounds_and_monotonicity() {
        let scale = GrayscaleShareScale::new(0.0, 100.0);
        let mut prev = u8::MAX;
        for v in 0..=100 {
            let level = scale.gray_level(v as f64);
            assert!((50..=203).contains(&level));
            assert!(level <= prev, "gray must darken as the value grows");
            prev = level;
        }
        assert_eq!(scale.gray_level(0.0), 203);
        assert_eq!(scale.gray_level(100.0), 50);
    }

    #[test]
    fn test_degenerate_domain() {
        let scale = GrayscaleShareScale::new(5.0, 5.0);
        assert_eq!(scale.gray_level(5.0), DEGENERATE_GRAY);
        assert_eq!(scale.scale_value(5.0), RgbColor::gray(169));
    }

    #[test]
    fn test_series_highlights_max() {
        let colors = GrayscaleShareScale::scale_series(&[30.0, 90.0, 10.0]);
        assert_eq!(colors[1], DEFAULT_HIGHLIGHT);
        assert!(colors[0].is_gray());
        assert!(colors[2].is_gray());
        // Larger share, darker gray
        assert!(colors[0].r < colors[2].r);
    }

    #[test]
    fn test_flat_series() {
        // All values equal: the tagged maximum keeps the highlight, the
        // rest fall back to the degenerate gray.
        let colors = GrayscaleShareScale::scale_series(&[5.0, 5.0, 5.0]);
        assert_eq!(colors[0], DEFAULT_HIGHLIGHT);
        assert_eq!(colors[1], RgbColor::gray(169));
        assert_eq!(colors[2], RgbColor::gray(169));
    }

    #[test]
    fn test_empty_series() {
        assert!(GrayscaleShareScale::scale_series(&[]).is_empty());
    }

    #[test]
    fn test_custom_highlight() {
        let teal = RgbColor::new(0, 128, 128);
        let colors = GrayscaleShareScale::scale_series_with(&[1.0, 2.0], teal);
        assert_eq!(colors[1], teal);
    }
}
