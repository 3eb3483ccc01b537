use serde::Serialize;
use tablero_common::color::RgbColor;

/// The marketshare chart: horizontal participation bars per university,
/// grouped by year, with the category axis ordered by ascending total
/// participation and the legend reversed so recent years read first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedBarChart {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub horizontal: bool,
    pub series: Vec<BarSeries>,
    pub category_order: Vec<String>,
    pub legend_reversed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarSeries {
    pub name: String,
    pub color: RgbColor,
    pub bars: Vec<BarPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarPoint {
    pub category: String,
    pub value: f64,
}

impl GroupedBarChart {
    pub fn grouped_horizontal(
        title: impl Into<String>,
        x_title: impl Into<String>,
        y_title: impl Into<String>,
        series: Vec<BarSeries>,
    ) -> Self {
        let category_order = order_by_total(&series);
        Self {
            title: title.into(),
            x_title: x_title.into(),
            y_title: y_title.into(),
            horizontal: true,
            series,
            category_order,
            legend_reversed: true,
        }
    }
}

/// Categories ordered by ascending total value across all series, so the
/// biggest bar group lands at the top of a horizontal layout.
fn order_by_total(series: &[BarSeries]) -> Vec<String> {
    let mut totals: indexmap::IndexMap<String, f64> = indexmap::IndexMap::new();
    for s in series {
        for bar in &s.bars {
            *totals.entry(bar.category.clone()).or_insert(0.0) += bar.value;
        }
    }
    let mut entries: Vec<(String, f64)> = totals.into_iter().collect();
    entries.sort_by(|a, b| a.1.total_cmp(&b.1));
    entries.into_iter().map(|(k, _)| k).collect()
}

/// The institutions-by-career chart: per year, stacked bars of distinct
/// institution counts per level, a total label above each stack, and
/// per-level enrollment lines on a secondary axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionsChart {
    pub years: Vec<i64>,
    pub y_title: String,
    pub y2_title: String,
    pub stacks: Vec<StackSeries>,
    pub totals: Vec<i64>,
    pub lines: Vec<LineSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackSeries {
    pub name: String,
    pub fill: RgbColor,
    pub line: RgbColor,
    pub values: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSeries {
    pub name: String,
    pub color: RgbColor,
    pub symbol: String,
    pub values: Vec<f64>,
    pub secondary_axis: bool,
}

impl InstitutionsChart {
    pub fn assemble(
        years: Vec<i64>,
        stacks: Vec<StackSeries>,
        lines: Vec<LineSeries>,
    ) -> Self {
        let totals = (0..years.len())
            .map(|i| {
                stacks
                    .iter()
                    .map(|s| s.values.get(i).copied().unwrap_or(0))
                    .sum()
            })
            .collect();
        Self {
            years,
            y_title: "Número de Instituciones".to_string(),
            y2_title: "Número de Matriculados".to_string(),
            stacks,
            totals,
            lines,
        }
    }
}
