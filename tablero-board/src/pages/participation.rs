//! Participation pies: enrollment shares by faculty or by career, scoped
//! by the user's semester (and faculty) selection.

use std::path::Path;

use tablero_chart::marks::PieChart;
use tablero_data::cache::WorkbookCache;
use tablero_data::table::DataTable;

use crate::error::TableroBoardError;
use crate::output::PageOutput;
use crate::schemas::enrollment;

const SELECT_SEMESTER: &str =
    "Por favor, selecciona al menos un semestre para visualizar los datos.";
const NO_DATA: &str = "No hay datos para los semestres seleccionados.";

pub fn load(cache: &mut WorkbookCache, path: &Path) -> Result<DataTable, TableroBoardError> {
    Ok(cache.sheet(path, enrollment::SHEET, &enrollment::participation_schema())?)
}

/// Options for the semester multiselect.
pub fn semester_options(table: &DataTable) -> Result<Vec<String>, TableroBoardError> {
    Ok(table.distinct_texts(enrollment::SEMESTER)?)
}

/// Options for the faculty select.
pub fn faculty_options(table: &DataTable) -> Result<Vec<String>, TableroBoardError> {
    Ok(table.distinct_texts(enrollment::FACULTY)?)
}

/// Semesters that actually occur within one faculty.
pub fn semester_options_for_faculty(
    table: &DataTable,
    faculty: &str,
) -> Result<Vec<String>, TableroBoardError> {
    Ok(table
        .filter_eq(enrollment::FACULTY, faculty)?
        .distinct_texts(enrollment::SEMESTER)?)
}

#[derive(Debug, Clone, Default)]
pub struct FacultySelection {
    pub semesters: Vec<String>,
}

/// Enrollment share per faculty over the selected semesters.
pub fn faculties(
    table: &DataTable,
    selection: &FacultySelection,
) -> Result<PageOutput<PieChart>, TableroBoardError> {
    if selection.semesters.is_empty() {
        return Ok(PageOutput::empty(SELECT_SEMESTER));
    }
    let filtered = table.filter_isin(enrollment::SEMESTER, &selection.semesters)?;
    if filtered.is_empty() {
        return Ok(PageOutput::empty(NO_DATA));
    }
    let groups = filtered.group_by_sum(enrollment::FACULTY, enrollment::ENROLLMENT)?;
    Ok(PageOutput::Chart(PieChart::participation(
        "Participación por Facultad",
        &groups,
    )))
}

#[derive(Debug, Clone, Default)]
pub struct CareerSelection {
    pub faculty: String,
    pub semesters: Vec<String>,
}

/// Enrollment share per career within one faculty, over the selected
/// semesters.
pub fn careers(
    table: &DataTable,
    selection: &CareerSelection,
) -> Result<PageOutput<PieChart>, TableroBoardError> {
    if selection.semesters.is_empty() {
        return Ok(PageOutput::empty(SELECT_SEMESTER));
    }
    let filtered = table
        .filter_eq(enrollment::FACULTY, &selection.faculty)?
        .filter_isin(enrollment::SEMESTER, &selection.semesters)?;
    if filtered.is_empty() {
        return Ok(PageOutput::empty(NO_DATA));
    }
    let groups = filtered.group_by_sum(enrollment::CAREER, enrollment::ENROLLMENT)?;
    Ok(PageOutput::Chart(PieChart::participation(
        "Participación por Carrera",
        &groups,
    )))
}
