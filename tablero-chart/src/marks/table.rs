use serde::Serialize;
use tablero_common::color::RgbColor;
use tablero_data::table::{DataTable, Series};
use tablero_scales::color::DivergingPastelScale;

use crate::error::TableroChartError;

/// Text color used on pastel cell backgrounds.
const CELL_TEXT_COLOR: &str = "#202122";

/// A rendered table where percentage cells carry a diverging pastel
/// background keyed to each column's own domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<StyledCell>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledCell {
    pub text: String,
    pub background: Option<RgbColor>,
}

impl StyledTable {
    /// Style the named percentage columns of a table with the diverging
    /// pastel scale, each column normalized over its own observed range
    /// with the given center. Other columns pass through unstyled.
    pub fn with_percent_styling(
        table: &DataTable,
        percent_columns: &[&str],
        center: f64,
    ) -> Result<Self, TableroChartError> {
        let columns: Vec<String> = table
            .column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut cells: Vec<Vec<StyledCell>> = Vec::with_capacity(columns.len());
        for name in &columns {
            let series = table.column(name)?;
            let is_percent = percent_columns.contains(&name.as_str());
            cells.push(match series {
                Series::Number(values) if is_percent => {
                    let scale = DivergingPastelScale::from_series(values, center)?;
                    values
                        .iter()
                        .map(|v| StyledCell {
                            text: v.map(|v| format!("{:.0}%", v)).unwrap_or_default(),
                            background: scale
                                .as_ref()
                                .and_then(|scale| scale.scale_value(*v)),
                        })
                        .collect()
                }
                Series::Number(values) => values
                    .iter()
                    .map(|v| StyledCell {
                        text: v.map(format_number).unwrap_or_default(),
                        background: None,
                    })
                    .collect(),
                Series::Text(values) => values
                    .iter()
                    .map(|v| StyledCell {
                        text: v.clone().unwrap_or_default(),
                        background: None,
                    })
                    .collect(),
            });
        }

        // Transpose column-major cells into display rows
        let nrows = table.nrows();
        let rows = (0..nrows)
            .map(|r| cells.iter().map(|col| col[r].clone()).collect())
            .collect();

        Ok(Self { columns, rows })
    }

    /// A self-contained HTML fragment with inline cell backgrounds.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str("<table class=\"tablero\">\n<thead><tr>");
        for column in &self.columns {
            html.push_str("<th>");
            html.push_str(&escape(column));
            html.push_str("</th>");
        }
        html.push_str("</tr></thead>\n<tbody>\n");
        for row in &self.rows {
            html.push_str("<tr>");
            for cell in row {
                match cell.background {
                    Some(bg) => {
                        html.push_str(&format!(
                            "<td style=\"background-color: {}; color: {}\">",
                            bg.to_css_rgb(),
                            CELL_TEXT_COLOR
                        ));
                    }
                    None => html.push_str("<td>"),
                }
                html.push_str(&escape(&cell.text));
                html.push_str("</td>");
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</tbody>\n</table>\n");
        html
    }
}

fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{:.2}", v)
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
