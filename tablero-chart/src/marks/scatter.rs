use serde::Serialize;
use tablero_common::color::RgbColor;

/// The growth-matrix (BCG) scatter: enrollment variation against income
/// variation, one series per semester, marker area scaled by enrollment,
/// dashed rules splitting the plane into quadrants.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthMatrix {
    pub x_title: String,
    pub y_title: String,
    pub series: Vec<ScatterSeries>,
    pub size_ref: f64,
    pub size_min: f64,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub rules: Vec<RuleLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterSeries {
    pub name: String,
    pub color: RgbColor,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    /// Marker sizing value (raw enrollment, not a pixel size).
    pub size: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleLine {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub dashed: bool,
}

impl GrowthMatrix {
    /// Assemble the matrix from finished series. `max_size_value` is the
    /// largest enrollment of the whole sheet (not just the filtered rows),
    /// so marker areas stay comparable across filter selections.
    pub fn assemble(
        x_title: impl Into<String>,
        y_title: impl Into<String>,
        series: Vec<ScatterSeries>,
        max_size_value: f64,
    ) -> Self {
        let xs = series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.x));
        let ys = series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.y));
        let x_range = padded_range(xs);
        let y_range = padded_range(ys);

        let rules = vec![
            // Vertical rule at x = 0
            RuleLine {
                x0: 0.0,
                y0: y_range.0,
                x1: 0.0,
                y1: y_range.1,
                dashed: true,
            },
            // Horizontal rule at y = 0
            RuleLine {
                x0: x_range.0,
                y0: 0.0,
                x1: x_range.1,
                y1: 0.0,
                dashed: true,
            },
        ];

        Self {
            x_title: x_title.into(),
            y_title: y_title.into(),
            series,
            size_ref: 2.0 * max_size_value / (40.0f64).powi(2),
            size_min: 4.0,
            x_range,
            y_range,
            rules,
        }
    }
}

/// Axis range with 10% padding on each side. A zero data range falls back
/// to `abs(max)`, or 1 when the values sit at zero.
pub fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if min > max {
        return (0.0, 1.0);
    }
    let mut span = max - min;
    if span == 0.0 {
        span = if max != 0.0 { max.abs() } else { 1.0 };
    }
    let padding = span * 0.1;
    (min - padding, max + padding)
}
