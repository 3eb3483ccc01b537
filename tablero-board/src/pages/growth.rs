//! Growth tables: fixed-range reads of the semester growth blocks, with
//! the percentage columns styled on the diverging pastel scale.

use std::path::Path;

use tablero_chart::marks::StyledTable;
use tablero_data::cache::WorkbookCache;
use tablero_data::schema::TableSchema;
use tablero_data::table::DataTable;
use tablero_data::workbook::RangeSpec;

use crate::error::TableroBoardError;
use crate::output::PageOutput;
use crate::schemas::enrollment;

/// Center of the diverging scale: 100% means "same as last period".
pub const GROWTH_CENTER: f64 = 50.0;

const GROWTH_ROWS: usize = 74;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthPeriod {
    /// First-semester periods (202210, 202310, ...), columns I:O.
    Ten,
    /// Second-semester periods (202220, 202320, ...), columns R:X.
    Twenty,
}

impl GrowthPeriod {
    pub fn label(&self) -> &'static str {
        match self {
            GrowthPeriod::Ten => "Semestre 10",
            GrowthPeriod::Twenty => "Semestre 20",
        }
    }

    pub fn range_spec(&self) -> RangeSpec {
        RangeSpec {
            columns: match self {
                GrowthPeriod::Ten => "I:O".to_string(),
                GrowthPeriod::Twenty => "R:X".to_string(),
            },
            skip_rows: 0,
            rows: GROWTH_ROWS,
        }
    }

    pub fn percent_columns(&self) -> [&'static str; 4] {
        match self {
            GrowthPeriod::Ten => ["202210", "202310", "202410", "202510"],
            GrowthPeriod::Twenty => ["202220", "202320", "202420", "202520"],
        }
    }

    fn schema(&self) -> TableSchema {
        self.percent_columns()
            .iter()
            .fold(TableSchema::new(), |schema, col| schema.percentage(*col))
    }
}

pub fn load(
    cache: &mut WorkbookCache,
    path: &Path,
    period: GrowthPeriod,
) -> Result<DataTable, TableroBoardError> {
    Ok(cache.range(
        path,
        enrollment::GROWTH_SHEET,
        &period.range_spec(),
        &period.schema(),
    )?)
}

pub fn build(
    table: &DataTable,
    period: GrowthPeriod,
) -> Result<PageOutput<StyledTable>, TableroBoardError> {
    if table.is_empty() {
        return Ok(PageOutput::empty(format!(
            "No se pudieron cargar los datos del {}.",
            period.label()
        )));
    }
    let styled =
        StyledTable::with_percent_styling(table, &period.percent_columns(), GROWTH_CENTER)?;
    Ok(PageOutput::Chart(styled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablero_data::value::CellValue;

    #[test]
    fn test_range_specs() {
        assert_eq!(GrowthPeriod::Ten.range_spec().columns, "I:O");
        assert_eq!(GrowthPeriod::Twenty.range_spec().columns, "R:X");
        assert_eq!(GrowthPeriod::Ten.range_spec().rows, 74);
    }

    #[test]
    fn test_build_styles_percent_columns() {
        let headers: Vec<String> = ["CARRERA", "202210", "202310", "202410", "202510"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let rows = vec![
            vec![
                CellValue::from("Biología"),
                CellValue::Number(0.2),
                CellValue::Number(0.5),
                CellValue::Number(0.9),
                CellValue::Number(0.4),
            ],
            vec![
                CellValue::from("Derecho"),
                CellValue::Number(0.8),
                CellValue::Number(0.5),
                CellValue::Number(0.1),
                CellValue::Number(0.6),
            ],
        ];
        let table = DataTable::from_rows(
            &GrowthPeriod::Ten.schema(),
            &headers,
            &rows,
            "test",
        )
        .unwrap();

        let styled = build(&table, GrowthPeriod::Ten)
            .unwrap()
            .chart()
            .unwrap();
        assert_eq!(styled.rows[0][1].text, "20%");
        assert!(styled.rows[0][1].background.is_some());
        assert!(styled.rows[0][0].background.is_none());
    }

    #[test]
    fn test_empty_table_warns() {
        let table = DataTable::from_rows(&TableSchema::new(), &[], &[], "test").unwrap();
        let output = build(&table, GrowthPeriod::Twenty).unwrap();
        assert!(output.is_empty());
        match output {
            PageOutput::Empty { message } => assert!(message.contains("Semestre 20")),
            _ => unreachable!(),
        }
    }
}
