//! Market share: per-year participation of each university in total
//! enrollment, drawn as grouped horizontal bars with a blue ramp over the
//! years.

use std::path::Path;

use tablero_chart::marks::{BarPoint, BarSeries, GroupedBarChart};
use tablero_data::cache::WorkbookCache;
use tablero_data::table::{share_of_total, DataTable};
use tablero_scales::color::LinearRampScale;

use crate::error::TableroBoardError;
use crate::output::PageOutput;
use crate::schemas::market;

const NO_DATA: &str = "No hay datos con los filtros seleccionados.";

pub fn load(cache: &mut WorkbookCache, path: &Path) -> Result<DataTable, TableroBoardError> {
    Ok(cache.first_sheet(path, &market::schema())?)
}

pub fn year_options(table: &DataTable) -> Result<Vec<f64>, TableroBoardError> {
    Ok(table.distinct_numbers(market::YEAR)?)
}

pub fn region_options(table: &DataTable) -> Result<Vec<String>, TableroBoardError> {
    Ok(table.distinct_texts(market::REGION)?)
}

pub fn financing_options(table: &DataTable) -> Result<Vec<String>, TableroBoardError> {
    Ok(table.distinct_texts(market::FINANCING)?)
}

pub fn level_options(table: &DataTable) -> Result<Vec<String>, TableroBoardError> {
    Ok(table.distinct_texts(market::LEVEL)?)
}

pub fn faculty_options(table: &DataTable) -> Result<Vec<String>, TableroBoardError> {
    Ok(table.distinct_texts(market::FACULTY)?)
}

/// Careers on offer, scoped to one faculty when given.
pub fn career_options(
    table: &DataTable,
    faculty: Option<&str>,
) -> Result<Vec<String>, TableroBoardError> {
    match faculty {
        Some(faculty) => Ok(table
            .filter_eq(market::FACULTY, faculty)?
            .distinct_texts(market::CAREER)?),
        None => Ok(table.distinct_texts(market::CAREER)?),
    }
}

/// Filter selection; an empty list leaves that dimension unrestricted.
#[derive(Debug, Clone, Default)]
pub struct MarketshareSelection {
    pub years: Vec<i64>,
    pub regions: Vec<String>,
    pub financing: Vec<String>,
    pub levels: Vec<String>,
    pub faculty: Option<String>,
    pub careers: Vec<String>,
}

pub fn build(
    table: &DataTable,
    selection: &MarketshareSelection,
) -> Result<PageOutput<GroupedBarChart>, TableroBoardError> {
    let mut filtered = table.clone();
    if !selection.years.is_empty() {
        let years: Vec<f64> = selection.years.iter().map(|y| *y as f64).collect();
        filtered = filtered.filter_isin_numbers(market::YEAR, &years)?;
    }
    if !selection.regions.is_empty() {
        filtered = filtered.filter_isin(market::REGION, &selection.regions)?;
    }
    if !selection.financing.is_empty() {
        filtered = filtered.filter_isin(market::FINANCING, &selection.financing)?;
    }
    if !selection.levels.is_empty() {
        filtered = filtered.filter_isin(market::LEVEL, &selection.levels)?;
    }
    if let Some(faculty) = &selection.faculty {
        filtered = filtered.filter_eq(market::FACULTY, faculty)?;
    }
    if !selection.careers.is_empty() {
        filtered = filtered.filter_isin(market::CAREER, &selection.careers)?;
    }
    if filtered.is_empty() {
        return Ok(PageOutput::empty(NO_DATA));
    }

    let years = filtered.distinct_numbers(market::YEAR)?;
    let domain = match (years.first(), years.last()) {
        (Some(min), Some(max)) => (*min, *max),
        _ => return Ok(PageOutput::empty(NO_DATA)),
    };

    // Shares are computed within each year, so every year's bars sum to 1.
    let ramp = LinearRampScale::default();
    let mut series = Vec::with_capacity(years.len());
    for year in years {
        let of_year = filtered.filter_eq_number(market::YEAR, year)?;
        let groups = of_year.group_by_sum(market::UNIVERSITY, market::ENROLLED)?;
        let bars = share_of_total(&groups)
            .into_iter()
            .map(|(category, value)| BarPoint { category, value })
            .collect();
        series.push(BarSeries {
            name: format!("Año {}", year as i64),
            color: ramp.scale_value(year, domain),
            bars,
        });
    }

    Ok(PageOutput::Chart(GroupedBarChart::grouped_horizontal(
        "Participación por Universidad y Año",
        "Participación",
        "Universidades",
        series,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablero_common::color::RgbColor;
    use tablero_data::value::CellValue;

    fn sample() -> DataTable {
        let headers: Vec<String> = [
            "AÑO",
            "REGION",
            "FINANCIAMIENTO",
            "NIVEL",
            "FACULTAD",
            "CARRERA",
            "UNIVERSIDAD",
            "MATRICULADOS",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let row = |y: f64, u: &str, m: f64| {
            vec![
                CellValue::Number(y),
                "Sierra".into(),
                "Particular".into(),
                "TERCER NIVEL".into(),
                "Ciencias".into(),
                "Biología".into(),
                u.into(),
                CellValue::Number(m),
            ]
        };
        let rows = vec![
            row(2023.0, "U. Central", 600.0),
            row(2023.0, "U. Andina", 400.0),
            row(2024.0, "U. Central", 500.0),
            row(2024.0, "U. Andina", 500.0),
        ];
        DataTable::from_rows(&market::schema(), &headers, &rows, "test").unwrap()
    }

    #[test]
    fn test_shares_per_year() {
        let chart = build(&sample(), &MarketshareSelection::default())
            .unwrap()
            .chart()
            .unwrap();
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].name, "Año 2023");
        assert_eq!(chart.series[0].bars[0].value, 0.6);
        assert_eq!(chart.series[0].bars[1].value, 0.4);
        assert_eq!(chart.series[1].bars[0].value, 0.5);

        let total: f64 = chart.series[1].bars.iter().map(|b| b.value).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_year_ramp_endpoints() {
        let chart = build(&sample(), &MarketshareSelection::default())
            .unwrap()
            .chart()
            .unwrap();
        assert_eq!(chart.series[0].color, RgbColor::new(204, 229, 255));
        assert_eq!(chart.series[1].color, RgbColor::new(0, 76, 153));
    }

    #[test]
    fn test_category_order_ascending() {
        let chart = build(&sample(), &MarketshareSelection::default())
            .unwrap()
            .chart()
            .unwrap();
        // U. Andina totals 0.9, U. Central 1.1
        assert_eq!(
            chart.category_order,
            vec!["U. Andina".to_string(), "U. Central".to_string()]
        );
        assert!(chart.horizontal);
        assert!(chart.legend_reversed);
    }

    #[test]
    fn test_year_filter() {
        let selection = MarketshareSelection {
            years: vec![2024],
            ..Default::default()
        };
        let chart = build(&sample(), &selection).unwrap().chart().unwrap();
        assert_eq!(chart.series.len(), 1);
        // Single-year domain draws at full intensity
        assert_eq!(chart.series[0].color, RgbColor::new(0, 76, 153));
    }

    #[test]
    fn test_career_options_scoping() {
        let headers: Vec<String> = [
            "AÑO",
            "REGION",
            "FINANCIAMIENTO",
            "NIVEL",
            "FACULTAD",
            "CARRERA",
            "UNIVERSIDAD",
            "MATRICULADOS",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let row = |f: &str, c: &str| {
            vec![
                CellValue::Number(2024.0),
                "Sierra".into(),
                "Particular".into(),
                "TERCER NIVEL".into(),
                f.into(),
                c.into(),
                "U. Central".into(),
                CellValue::Number(100.0),
            ]
        };
        let rows = vec![
            row("Ciencias", "Biología"),
            row("Ciencias", "Química"),
            row("Derecho", "Derecho"),
        ];
        let table = DataTable::from_rows(&market::schema(), &headers, &rows, "test").unwrap();

        assert_eq!(
            career_options(&table, None).unwrap(),
            vec![
                "Biología".to_string(),
                "Derecho".to_string(),
                "Química".to_string()
            ]
        );
        assert_eq!(
            career_options(&table, Some("Ciencias")).unwrap(),
            vec!["Biología".to_string(), "Química".to_string()]
        );
    }

    #[test]
    fn test_unmatched_filters_warn() {
        let selection = MarketshareSelection {
            regions: vec!["Costa".to_string()],
            ..Default::default()
        };
        let output = build(&sample(), &selection).unwrap();
        assert_eq!(output, PageOutput::empty(NO_DATA));
    }
}
