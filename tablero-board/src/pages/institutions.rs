//! Institutions per year: stacked bars counting distinct institutions by
//! level, with enrollment lines per level on a secondary axis.

use std::path::Path;

use tablero_chart::marks::{InstitutionsChart, LineSeries, StackSeries};
use tablero_common::color::RgbColor;
use tablero_data::cache::WorkbookCache;
use tablero_data::table::DataTable;

use crate::error::TableroBoardError;
use crate::output::PageOutput;
use crate::schemas::market;

const NO_DATA: &str = "No hay datos para la selección actual.";

/// The two institution levels drawn, with their fixed styling.
struct LevelStyle {
    level: &'static str,
    stack_name: &'static str,
    line_name: &'static str,
    fill: RgbColor,
    line: RgbColor,
    symbol: &'static str,
}

const LEVELS: [LevelStyle; 2] = [
    LevelStyle {
        level: "TECNICO",
        stack_name: "Institutos Técnicos",
        line_name: "Matriculados Técnico",
        fill: RgbColor::new(0xe6, 0xe6, 0xe6),
        line: RgbColor::new(0x66, 0x66, 0x66),
        symbol: "circle",
    },
    LevelStyle {
        level: "TERCER NIVEL",
        stack_name: "Universidades",
        line_name: "Matriculados Universidad",
        fill: RgbColor::new(0xf2, 0xcc, 0xcc),
        line: RgbColor::new(0x99, 0x00, 0x00),
        symbol: "square",
    },
];

pub fn load(cache: &mut WorkbookCache, path: &Path) -> Result<DataTable, TableroBoardError> {
    Ok(cache.first_sheet(path, &market::schema())?)
}

pub fn level_options(table: &DataTable) -> Result<Vec<String>, TableroBoardError> {
    Ok(table.distinct_texts(market::LEVEL)?)
}

pub fn year_options(table: &DataTable) -> Result<Vec<i64>, TableroBoardError> {
    Ok(table
        .distinct_numbers(market::YEAR)?
        .into_iter()
        .map(|y| y as i64)
        .collect())
}

pub fn faculty_options(table: &DataTable) -> Result<Vec<String>, TableroBoardError> {
    Ok(table.distinct_texts(market::FACULTY)?)
}

/// Careers offered within the selected faculties; unrestricted when the
/// faculty selection is empty.
pub fn career_options(
    table: &DataTable,
    faculties: &[String],
) -> Result<Vec<String>, TableroBoardError> {
    if faculties.is_empty() {
        return Ok(table.distinct_texts(market::CAREER)?);
    }
    Ok(table
        .filter_isin(market::FACULTY, faculties)?
        .distinct_texts(market::CAREER)?)
}

#[derive(Debug, Clone, Default)]
pub struct InstitutionsSelection {
    pub levels: Vec<String>,
    pub years: Vec<i64>,
    pub faculties: Vec<String>,
    pub careers: Vec<String>,
}

pub fn build(
    table: &DataTable,
    selection: &InstitutionsSelection,
) -> Result<PageOutput<InstitutionsChart>, TableroBoardError> {
    let mut filtered = table.clone();
    if !selection.levels.is_empty() {
        filtered = filtered.filter_isin(market::LEVEL, &selection.levels)?;
    }
    if !selection.years.is_empty() {
        let years: Vec<f64> = selection.years.iter().map(|y| *y as f64).collect();
        filtered = filtered.filter_isin_numbers(market::YEAR, &years)?;
    }
    if !selection.faculties.is_empty() {
        filtered = filtered.filter_isin(market::FACULTY, &selection.faculties)?;
    }
    if !selection.careers.is_empty() {
        filtered = filtered.filter_isin(market::CAREER, &selection.careers)?;
    }
    if filtered.is_empty() {
        return Ok(PageOutput::empty(NO_DATA));
    }

    let years: Vec<i64> = filtered
        .distinct_numbers(market::YEAR)?
        .into_iter()
        .map(|y| y as i64)
        .collect();

    let mut stacks = Vec::with_capacity(LEVELS.len());
    let mut lines = Vec::with_capacity(LEVELS.len());
    for style in &LEVELS {
        let of_level = filtered.filter_eq(market::LEVEL, style.level)?;
        let mut counts = Vec::with_capacity(years.len());
        let mut enrolled = Vec::with_capacity(years.len());
        for year in &years {
            let of_year = of_level.filter_eq_number(market::YEAR, *year as f64)?;
            counts.push(of_year.unique_count(market::UNIVERSITY)? as i64);
            enrolled.push(of_year.sum(market::ENROLLED)?);
        }
        stacks.push(StackSeries {
            name: style.stack_name.to_string(),
            fill: style.fill,
            line: style.line,
            values: counts,
        });
        lines.push(LineSeries {
            name: style.line_name.to_string(),
            color: style.line,
            symbol: style.symbol.to_string(),
            values: enrolled,
            secondary_axis: true,
        });
    }

    Ok(PageOutput::Chart(InstitutionsChart::assemble(
        years, stacks, lines,
    )))
}
