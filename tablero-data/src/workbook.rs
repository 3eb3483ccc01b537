use std::io::Read;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use lazy_static::lazy_static;
use log::info;
use regex::Regex;

use crate::error::TableroDataError;
use crate::schema::TableSchema;
use crate::table::DataTable;
use crate::value::CellValue;

lazy_static! {
    // pandas-style ".1"/".2" suffixes on duplicated headers
    static ref HEADER_SUFFIX_RE: Regex = Regex::new(r"\.\d+$").unwrap();
}

/// A fixed rectangular read: a spreadsheet column span like `I:O`, a
/// number of rows to skip above the header row, and a data row count.
#[derive(Debug, Clone)]
pub struct RangeSpec {
    pub columns: String,
    pub skip_rows: usize,
    pub rows: usize,
}

/// Load a whole worksheet, first row as headers, validated against the
/// schema.
pub fn load_sheet(
    path: &Path,
    sheet: &str,
    schema: &TableSchema,
) -> Result<DataTable, TableroDataError> {
    let range = open_range(path, sheet)?;
    let mut rows = range.rows();
    let header_cells = rows.next().ok_or_else(|| TableroDataError::EmptyRange {
        sheet: sheet.to_string(),
    })?;

    let headers: Vec<String> = header_cells
        .iter()
        .enumerate()
        .map(|(i, cell)| header_name(cell, i))
        .collect();

    let data: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(data_to_cell).collect())
        .collect();

    let source_name = format!("sheet '{}' of '{}'", sheet, path.display());
    let table = DataTable::from_rows(schema, &headers, &data, &source_name)?;
    info!(
        "loaded {} rows x {} columns from {}",
        table.nrows(),
        table.column_names().len(),
        source_name
    );
    Ok(table)
}

/// Load a fixed range from a worksheet. The header row sits right below
/// the skipped rows; pandas-style `.1`/`.2` suffixes left by duplicated
/// headers are stripped. Trailing all-empty rows are dropped.
pub fn load_range(
    path: &Path,
    sheet: &str,
    spec: &RangeSpec,
    schema: &TableSchema,
) -> Result<DataTable, TableroDataError> {
    let range = open_range(path, sheet)?;
    let span = column_span(&spec.columns)?;
    let header_row = spec.skip_rows as u32;

    let headers: Vec<String> = span
        .clone()
        .enumerate()
        .map(|(i, col)| {
            let cell = range
                .get_value((header_row, col))
                .cloned()
                .unwrap_or(Data::Empty);
            clean_header(&header_name(&cell, i))
        })
        .collect();

    let mut data: Vec<Vec<CellValue>> = (0..spec.rows)
        .map(|r| {
            let abs_row = header_row + 1 + r as u32;
            span.clone()
                .map(|col| {
                    range
                        .get_value((abs_row, col))
                        .map(data_to_cell)
                        .unwrap_or(CellValue::Empty)
                })
                .collect()
        })
        .collect();

    while data
        .last()
        .is_some_and(|row| row.iter().all(CellValue::is_empty))
    {
        data.pop();
    }

    let source_name = format!(
        "range {} of sheet '{}' of '{}'",
        spec.columns,
        sheet,
        path.display()
    );
    let table = DataTable::from_rows(schema, &headers, &data, &source_name)?;
    info!("loaded {} rows from {}", table.nrows(), source_name);
    Ok(table)
}

/// Load a CSV file, first record as headers.
pub fn load_csv(path: &Path, schema: &TableSchema) -> Result<DataTable, TableroDataError> {
    let file = std::fs::File::open(path)?;
    read_csv(file, schema, &format!("'{}'", path.display()))
}

/// Read CSV from any reader; the testable core of `load_csv`.
pub fn read_csv(
    reader: impl Read,
    schema: &TableSchema,
    source_name: &str,
) -> Result<DataTable, TableroDataError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        rows.push(record.iter().map(CellValue::from).collect());
    }

    DataTable::from_rows(schema, &headers, &rows, source_name)
}

/// Load the first worksheet of a workbook, for sources where the sheet
/// name is not part of the contract.
pub fn load_first_sheet(
    path: &Path,
    schema: &TableSchema,
) -> Result<DataTable, TableroDataError> {
    let workbook = open_workbook_auto(path)?;
    let first = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| TableroDataError::SheetNotFound {
            sheet: "<first>".to_string(),
            path: path.display().to_string(),
        })?;
    load_sheet(path, &first, schema)
}

fn open_range(path: &Path, sheet: &str) -> Result<Range<Data>, TableroDataError> {
    let mut workbook = open_workbook_auto(path)?;
    if !workbook.sheet_names().iter().any(|s| s == sheet) {
        return Err(TableroDataError::SheetNotFound {
            sheet: sheet.to_string(),
            path: path.display().to_string(),
        });
    }
    Ok(workbook.worksheet_range(sheet)?)
}

fn header_name(cell: &Data, index: usize) -> String {
    data_to_cell(cell)
        .as_text()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| format!("UNNAMED_{}", index))
}

pub(crate) fn clean_header(name: &str) -> String {
    HEADER_SUFFIX_RE.replace(name, "").to_string()
}

/// `I:O` -> zero-based column indices 8..=14.
pub(crate) fn column_span(
    span: &str,
) -> Result<std::ops::RangeInclusive<u32>, TableroDataError> {
    let invalid = || TableroDataError::InvalidColumnSpan(span.to_string());
    let (start, end) = span.split_once(':').ok_or_else(invalid)?;
    let start = column_index(start).ok_or_else(invalid)?;
    let end = column_index(end).ok_or_else(invalid)?;
    if start > end {
        return Err(invalid());
    }
    Ok(start..=end)
}

fn column_index(letters: &str) -> Option<u32> {
    let letters = letters.trim();
    if letters.is_empty() {
        return None;
    }
    let mut index: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        index = index * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
    }
    Some(index - 1)
}

fn data_to_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::from(s.as_str()),
        Data::Float(v) => CellValue::Number(*v),
        Data::Int(v) => CellValue::Number(*v as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) => CellValue::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_span() {
        assert_eq!(column_span("I:O").unwrap(), 8..=14);
        assert_eq!(column_span("R:X").unwrap(), 17..=23);
        assert_eq!(column_span("A:A").unwrap(), 0..=0);
        assert_eq!(column_span("AA:AB").unwrap(), 26..=27);
        assert!(column_span("O:I").is_err());
        assert!(column_span("I").is_err());
        assert!(column_span("1:3").is_err());
    }

    #[test]
    fn test_clean_header() {
        assert_eq!(clean_header("202210.1"), "202210");
        assert_eq!(clean_header("202210"), "202210");
        assert_eq!(clean_header("X.2.3"), "X.2");
    }

    #[test]
    fn test_read_csv() {
        let csv = "FACULTAD,ENROLLMENT\nCiencias,120\nDerecho,200\n";
        let schema = TableSchema::new().text("FACULTAD").number("ENROLLMENT");
        let table = read_csv(csv.as_bytes(), &schema, "test").unwrap();
        assert_eq!(table.nrows(), 2);
        assert_eq!(table.sum("ENROLLMENT").unwrap(), 320.0);
    }

    #[test]
    fn test_read_csv_missing_column() {
        let csv = "A,B\n1,2\n";
        let schema = TableSchema::new().number("C");
        assert!(matches!(
            read_csv(csv.as_bytes(), &schema, "test"),
            Err(TableroDataError::MissingColumn { .. })
        ));
    }
}
