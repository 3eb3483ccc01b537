use serde::Serialize;
use tablero_common::color::RgbColor;
use tablero_scales::color::GrayscaleShareScale;

/// A participation pie (donut) chart: one slice per group, the dominant
/// group called out with the highlight color, the rest in grays that
/// darken with share.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PieChart {
    pub title: String,
    pub hole: f64,
    pub slices: Vec<PieSlice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub color: RgbColor,
}

impl PieChart {
    /// Build from grouped sums, e.g. the output of a group-by over
    /// `FACULTAD` or `CARRERA`.
    pub fn participation(title: impl Into<String>, groups: &[(String, f64)]) -> Self {
        let values: Vec<f64> = groups.iter().map(|(_, v)| *v).collect();
        let colors = GrayscaleShareScale::scale_series(&values);
        let slices = groups
            .iter()
            .zip(colors)
            .map(|((label, value), color)| PieSlice {
                label: label.clone(),
                value: *value,
                color,
            })
            .collect();
        Self {
            title: title.into(),
            hole: 0.3,
            slices,
        }
    }

    pub fn with_hole(mut self, hole: f64) -> Self {
        self.hole = hole;
        self
    }
}
