//! Column-name contracts for the two source workbooks. Declaring them
//! here keeps the fail-fast schema checks in one place; pages only
//! declare the columns they actually read.

use tablero_data::schema::TableSchema;

/// The enrollment workbook (`baseEnrollment.xlsx`).
pub mod enrollment {
    use super::*;

    pub const SHEET: &str = "PREGRADO";
    pub const GROWTH_SHEET: &str = "Hoja1";

    pub const FACULTY: &str = "FACULTAD";
    pub const CAREER: &str = "CARRERA";
    pub const SEMESTER: &str = "SEMESTRE";
    pub const ENROLLMENT: &str = "ENROLLMENT";
    pub const VAR_ENROLLMENT: &str = "Variación Enrollment";
    pub const VAR_INCOME: &str = "Variación Ingresos";

    /// Columns needed by the participation pie pages.
    pub fn participation_schema() -> TableSchema {
        TableSchema::new()
            .text(FACULTY)
            .text(CAREER)
            .text(SEMESTER)
            .number(ENROLLMENT)
    }

    /// Columns needed by the growth-matrix page.
    pub fn matrix_schema() -> TableSchema {
        participation_schema()
            .number(VAR_ENROLLMENT)
            .number(VAR_INCOME)
    }
}

/// The market-share workbook (`baseMarketShare2.xlsx`); read from its
/// first sheet, like the source application's default-sheet read.
pub mod market {
    use super::*;

    pub const YEAR: &str = "AÑO";
    pub const REGION: &str = "REGION";
    pub const FINANCING: &str = "FINANCIAMIENTO";
    pub const LEVEL: &str = "NIVEL";
    pub const FACULTY: &str = "FACULTAD";
    pub const CAREER: &str = "CARRERA";
    pub const UNIVERSITY: &str = "UNIVERSIDAD";
    pub const ENROLLED: &str = "MATRICULADOS";

    pub fn schema() -> TableSchema {
        TableSchema::new()
            .number(YEAR)
            .text(REGION)
            .text(FINANCING)
            .text(LEVEL)
            .text(FACULTY)
            .text(CAREER)
            .text(UNIVERSITY)
            .number(ENROLLED)
    }
}
