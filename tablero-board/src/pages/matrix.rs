//! The growth matrix: enrollment variation against income variation per
//! career, one scatter series per semester, with the current semester in
//! the wine highlight and older ones on a gray ramp.

use std::path::Path;

use tablero_chart::marks::{GrowthMatrix, ScatterPoint, ScatterSeries};
use tablero_common::color::RgbColor;
use tablero_data::cache::WorkbookCache;
use tablero_data::table::DataTable;
use tablero_scales::color::grayscale_ramp;

use crate::error::TableroBoardError;
use crate::output::PageOutput;
use crate::schemas::enrollment;

/// The semester drawn in the highlight color.
pub const HIGHLIGHT_SEMESTER: &str = "202520";
const HIGHLIGHT_COLOR: RgbColor = RgbColor::new(0x80, 0x00, 0x20);

const NO_DATA: &str = "No hay datos disponibles para los filtros seleccionados.";

pub fn load(cache: &mut WorkbookCache, path: &Path) -> Result<DataTable, TableroBoardError> {
    Ok(cache.sheet(path, enrollment::SHEET, &enrollment::matrix_schema())?)
}

pub fn faculty_options(table: &DataTable) -> Result<Vec<String>, TableroBoardError> {
    Ok(table.distinct_texts(enrollment::FACULTY)?)
}

/// Careers offered by one faculty; the options for the career multiselect.
pub fn career_options(
    table: &DataTable,
    faculty: &str,
) -> Result<Vec<String>, TableroBoardError> {
    Ok(table
        .filter_eq(enrollment::FACULTY, faculty)?
        .distinct_texts(enrollment::CAREER)?)
}

pub fn semester_options(table: &DataTable) -> Result<Vec<String>, TableroBoardError> {
    Ok(table.distinct_texts(enrollment::SEMESTER)?)
}

#[derive(Debug, Clone, Default)]
pub struct MatrixSelection {
    pub faculty: String,
    pub careers: Vec<String>,
    pub semesters: Vec<String>,
}

/// Build the matrix for a faculty. The career and semester filters exist
/// only for faculties offering more than one career; there they apply
/// whenever non-empty, while a single-career faculty always shows whole.
pub fn build(
    table: &DataTable,
    selection: &MatrixSelection,
) -> Result<PageOutput<GrowthMatrix>, TableroBoardError> {
    let scoped = table.filter_eq(enrollment::FACULTY, &selection.faculty)?;
    let multi_career = scoped.distinct_texts(enrollment::CAREER)?.len() > 1;

    let filtered = if multi_career {
        let mut narrowed = scoped;
        if !selection.careers.is_empty() {
            narrowed = narrowed.filter_isin(enrollment::CAREER, &selection.careers)?;
        }
        if !selection.semesters.is_empty() {
            narrowed = narrowed.filter_isin(enrollment::SEMESTER, &selection.semesters)?;
        }
        narrowed
    } else {
        scoped
    };

    let filtered = filtered.drop_nulls(&[enrollment::VAR_ENROLLMENT, enrollment::VAR_INCOME])?;
    if filtered.is_empty() {
        return Ok(PageOutput::empty(NO_DATA));
    }

    // Marker sizing is anchored to the whole sheet's maximum so bubble
    // areas stay comparable across selections.
    let max_enrollment = table
        .numbers(enrollment::ENROLLMENT)?
        .iter()
        .flatten()
        .fold(0.0f64, |acc, v| acc.max(*v));

    let semesters = filtered.distinct_texts(enrollment::SEMESTER)?;
    let others = semesters
        .iter()
        .filter(|s| s.as_str() != HIGHLIGHT_SEMESTER)
        .count();
    let mut grays = grayscale_ramp(others).into_iter();

    let mut series = Vec::with_capacity(semesters.len());
    for semester in &semesters {
        let color = if semester == HIGHLIGHT_SEMESTER {
            HIGHLIGHT_COLOR
        } else {
            grays.next().unwrap_or(RgbColor::gray(105))
        };
        let rows = filtered.filter_eq(enrollment::SEMESTER, semester)?;
        let xs = rows.numbers(enrollment::VAR_ENROLLMENT)?;
        let ys = rows.numbers(enrollment::VAR_INCOME)?;
        let sizes = rows.numbers(enrollment::ENROLLMENT)?;
        let labels = rows.texts(enrollment::CAREER)?;

        let points = xs
            .iter()
            .zip(ys)
            .zip(sizes)
            .zip(labels)
            .filter_map(|(((x, y), size), label)| {
                let (x, y) = (x.as_ref()?, y.as_ref()?);
                Some(ScatterPoint {
                    x: x * 100.0,
                    y: y * 100.0,
                    size: size.unwrap_or(0.0),
                    label: label.clone().unwrap_or_default(),
                })
            })
            .collect();

        series.push(ScatterSeries {
            name: format!("Semestre {}", semester),
            color,
            points,
        });
    }

    Ok(PageOutput::Chart(GrowthMatrix::assemble(
        "Variación de Enrollment (%)",
        "Variación de Ingresos (%)",
        series,
        max_enrollment,
    )))
}
