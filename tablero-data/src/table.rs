use indexmap::IndexMap;

use crate::error::TableroDataError;
use crate::schema::{CoercionPolicy, ColumnType, TableSchema};
use crate::value::CellValue;

/// One column of a loaded table. Missing cells and failed coercions are
/// `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum Series {
    Number(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl Series {
    pub fn len(&self) -> usize {
        match self {
            Series::Number(v) => v.len(),
            Series::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn numbers(&self) -> Option<&[Option<f64>]> {
        match self {
            Series::Number(v) => Some(v),
            Series::Text(_) => None,
        }
    }

    pub fn texts(&self) -> Option<&[Option<String>]> {
        match self {
            Series::Text(v) => Some(v),
            Series::Number(_) => None,
        }
    }

    fn take(&self, keep: &[bool]) -> Series {
        match self {
            Series::Number(v) => Series::Number(
                v.iter()
                    .zip(keep)
                    .filter(|(_, k)| **k)
                    .map(|(v, _)| *v)
                    .collect(),
            ),
            Series::Text(v) => Series::Text(
                v.iter()
                    .zip(keep)
                    .filter(|(_, k)| **k)
                    .map(|(v, _)| v.clone())
                    .collect(),
            ),
        }
    }
}

/// A table of named, typed columns in source order.
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    columns: IndexMap<String, Series>,
    nrows: usize,
}

impl DataTable {
    /// Build a table from raw header/row data, validating it against the
    /// schema. Declared columns must exist and coerce per the schema's
    /// policy; undeclared columns are kept with an inferred type.
    pub fn from_rows(
        schema: &TableSchema,
        headers: &[String],
        rows: &[Vec<CellValue>],
        source_name: &str,
    ) -> Result<Self, TableroDataError> {
        for spec in schema.columns() {
            if !headers.contains(&spec.name) {
                return Err(TableroDataError::MissingColumn {
                    column: spec.name.clone(),
                    source_name: source_name.to_string(),
                });
            }
        }

        let mut columns: IndexMap<String, Series> = IndexMap::new();
        for (col_idx, name) in headers.iter().enumerate() {
            if columns.contains_key(name) {
                // Duplicate header after suffix cleanup: first wins.
                continue;
            }
            let cells: Vec<&CellValue> = rows
                .iter()
                .map(|row| row.get(col_idx).unwrap_or(&CellValue::Empty))
                .collect();

            let ty = schema
                .column_type(name)
                .unwrap_or_else(|| infer_type(&cells));

            let series = match ty {
                ColumnType::Text => {
                    Series::Text(cells.iter().map(|c| c.as_text()).collect())
                }
                ColumnType::Number | ColumnType::Percentage => {
                    let factor = if ty == ColumnType::Percentage { 100.0 } else { 1.0 };
                    let mut out = Vec::with_capacity(cells.len());
                    for (row_idx, cell) in cells.iter().enumerate() {
                        match cell.as_number() {
                            Some(v) => out.push(Some(v * factor)),
                            None if cell.is_empty() => out.push(None),
                            None => {
                                if schema.policy() == CoercionPolicy::Strict {
                                    return Err(TableroDataError::NonNumericCell {
                                        column: name.clone(),
                                        row: row_idx,
                                        value: cell.as_text().unwrap_or_default(),
                                    });
                                }
                                out.push(None);
                            }
                        }
                    }
                    Series::Number(out)
                }
            };
            columns.insert(name.clone(), series);
        }

        Ok(Self {
            nrows: rows.len(),
            columns,
        })
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn is_empty(&self) -> bool {
        self.nrows == 0
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(|s| s.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Result<&Series, TableroDataError> {
        self.columns
            .get(name)
            .ok_or_else(|| TableroDataError::MissingColumn {
                column: name.to_string(),
                source_name: "table".to_string(),
            })
    }

    pub fn numbers(&self, name: &str) -> Result<&[Option<f64>], TableroDataError> {
        self.column(name)?
            .numbers()
            .ok_or_else(|| TableroDataError::TypeMismatch {
                column: name.to_string(),
                expected: "numeric",
            })
    }

    pub fn texts(&self, name: &str) -> Result<&[Option<String>], TableroDataError> {
        self.column(name)?
            .texts()
            .ok_or_else(|| TableroDataError::TypeMismatch {
                column: name.to_string(),
                expected: "text",
            })
    }

    /// Keep only the rows whose mask entry is true.
    pub fn filter_rows(&self, keep: &[bool]) -> DataTable {
        let columns = self
            .columns
            .iter()
            .map(|(name, series)| (name.clone(), series.take(keep)))
            .collect();
        DataTable {
            columns,
            nrows: keep.iter().filter(|k| **k).count(),
        }
    }

    /// Rows whose text column value is one of `allowed`.
    pub fn filter_isin(
        &self,
        name: &str,
        allowed: &[String],
    ) -> Result<DataTable, TableroDataError> {
        let col = self.texts(name)?;
        let keep: Vec<bool> = col
            .iter()
            .map(|v| v.as_ref().is_some_and(|v| allowed.contains(v)))
            .collect();
        Ok(self.filter_rows(&keep))
    }

    pub fn filter_eq(&self, name: &str, value: &str) -> Result<DataTable, TableroDataError> {
        let col = self.texts(name)?;
        let keep: Vec<bool> = col
            .iter()
            .map(|v| v.as_deref() == Some(value))
            .collect();
        Ok(self.filter_rows(&keep))
    }

    /// Rows whose numeric column value is one of `allowed`.
    pub fn filter_isin_numbers(
        &self,
        name: &str,
        allowed: &[f64],
    ) -> Result<DataTable, TableroDataError> {
        let col = self.numbers(name)?;
        let keep: Vec<bool> = col
            .iter()
            .map(|v| v.is_some_and(|v| allowed.contains(&v)))
            .collect();
        Ok(self.filter_rows(&keep))
    }

    pub fn filter_eq_number(
        &self,
        name: &str,
        value: f64,
    ) -> Result<DataTable, TableroDataError> {
        let col = self.numbers(name)?;
        let keep: Vec<bool> = col.iter().map(|v| *v == Some(value)).collect();
        Ok(self.filter_rows(&keep))
    }

    /// Drop rows with a missing value in any of the given columns.
    pub fn drop_nulls(&self, names: &[&str]) -> Result<DataTable, TableroDataError> {
        let mut keep = vec![true; self.nrows];
        for name in names {
            match self.column(name)? {
                Series::Number(v) => {
                    for (i, cell) in v.iter().enumerate() {
                        if cell.is_none() || cell.is_some_and(f64::is_nan) {
                            keep[i] = false;
                        }
                    }
                }
                Series::Text(v) => {
                    for (i, cell) in v.iter().enumerate() {
                        if cell.is_none() {
                            keep[i] = false;
                        }
                    }
                }
            }
        }
        Ok(self.filter_rows(&keep))
    }

    /// Sorted distinct non-missing values of a text column; the source of
    /// filter-widget options.
    pub fn distinct_texts(&self, name: &str) -> Result<Vec<String>, TableroDataError> {
        let mut out: Vec<String> = self
            .texts(name)?
            .iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .cloned()
            .collect();
        out.sort();
        out.dedup();
        Ok(out)
    }

    pub fn distinct_numbers(&self, name: &str) -> Result<Vec<f64>, TableroDataError> {
        let mut out: Vec<f64> = self.numbers(name)?.iter().flatten().copied().collect();
        out.sort_by(f64::total_cmp);
        out.dedup();
        Ok(out)
    }

    /// Count of distinct non-missing values in a text column.
    pub fn unique_count(&self, name: &str) -> Result<usize, TableroDataError> {
        Ok(self.distinct_texts(name)?.len())
    }

    /// Sum of the non-missing values of a numeric column.
    pub fn sum(&self, name: &str) -> Result<f64, TableroDataError> {
        Ok(self.numbers(name)?.iter().flatten().sum())
    }

    /// Group by a text key column and sum a numeric value column. Missing
    /// keys are skipped, missing values contribute nothing, and groups
    /// come out in first-appearance order.
    pub fn group_by_sum(
        &self,
        key: &str,
        value: &str,
    ) -> Result<Vec<(String, f64)>, TableroDataError> {
        let keys = self.texts(key)?;
        let values = self.numbers(value)?;
        let mut groups: IndexMap<String, f64> = IndexMap::new();
        for (k, v) in keys.iter().zip(values) {
            let Some(k) = k else { continue };
            let entry = groups.entry(k.clone()).or_insert(0.0);
            if let Some(v) = v {
                *entry += v;
            }
        }
        Ok(groups.into_iter().collect())
    }
}

/// Turn grouped sums into fractions of the overall total; a zero total
/// yields zero shares.
pub fn share_of_total(groups: &[(String, f64)]) -> Vec<(String, f64)> {
    let total: f64 = groups.iter().map(|(_, v)| v).sum();
    groups
        .iter()
        .map(|(k, v)| {
            let share = if total == 0.0 { 0.0 } else { v / total };
            (k.clone(), share)
        })
        .collect()
}

fn infer_type(cells: &[&CellValue]) -> ColumnType {
    let mut saw_number = false;
    for cell in cells {
        if cell.is_empty() {
            continue;
        }
        if cell.as_number().is_some() {
            saw_number = true;
        } else {
            return ColumnType::Text;
        }
    }
    if saw_number {
        ColumnType::Number
    } else {
        ColumnType::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataTable {
        let headers: Vec<String> = ["FACULTAD", "CARRERA", "ENROLLMENT"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let rows = vec![
            vec!["Ciencias".into(), "Biología".into(), CellValue::Number(120.0)],
            vec!["Ciencias".into(), "Química".into(), CellValue::Number(80.0)],
            vec!["Derecho".into(), "Derecho".into(), CellValue::Number(200.0)],
            vec!["Derecho".into(), "Notariado".into(), CellValue::from("x")],
        ];
        let schema = TableSchema::new()
            .text("FACULTAD")
            .text("CARRERA")
            .number("ENROLLMENT");
        DataTable::from_rows(&schema, &headers, &rows, "test").unwrap()
    }

    #[test]
    fn test_missing_column_fails_fast() {
        let schema = TableSchema::new().text("NO_SUCH");
        let err = DataTable::from_rows(&schema, &["A".to_string()], &[], "sheet 'PREGRADO'")
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("NO_SUCH"));
        assert!(msg.contains("PREGRADO"));
    }

    #[test]
    fn test_lenient_coercion_yields_missing() {
        let table = sample();
        let enrollment = table.numbers("ENROLLMENT").unwrap();
        assert_eq!(enrollment[0], Some(120.0));
        assert_eq!(enrollment[3], None);
    }

    #[test]
    fn test_strict_coercion_errors() {
        let headers = vec!["N".to_string()];
        let rows = vec![vec![CellValue::Number(1.0)], vec!["oops".into()]];
        let schema = TableSchema::new().number("N").strict();
        let err = DataTable::from_rows(&schema, &headers, &rows, "test").unwrap_err();
        assert!(matches!(
            err,
            TableroDataError::NonNumericCell { row: 1, .. }
        ));
    }

    #[test]
    fn test_percentage_scaling() {
        let headers = vec!["P".to_string()];
        let rows = vec![vec![CellValue::Number(0.42)], vec![CellValue::Empty]];
        let schema = TableSchema::new().percentage("P");
        let table = DataTable::from_rows(&schema, &headers, &rows, "test").unwrap();
        assert_eq!(table.numbers("P").unwrap(), &[Some(42.0), None]);
    }

    #[test]
    fn test_inferred_types() {
        let headers: Vec<String> = ["LABEL", "VAL"].iter().map(|s| s.to_string()).collect();
        let rows = vec![
            vec!["a".into(), CellValue::Text("1".into())],
            vec!["b".into(), CellValue::Text("2.5".into())],
        ];
        let table = DataTable::from_rows(&TableSchema::new(), &headers, &rows, "test").unwrap();
        assert!(table.texts("LABEL").is_ok());
        assert_eq!(table.numbers("VAL").unwrap(), &[Some(1.0), Some(2.5)]);
    }

    #[test]
    fn test_filter_isin() {
        let table = sample();
        let filtered = table
            .filter_isin("FACULTAD", &["Ciencias".to_string()])
            .unwrap();
        assert_eq!(filtered.nrows(), 2);
        assert_eq!(
            filtered.distinct_texts("CARRERA").unwrap(),
            vec!["Biología".to_string(), "Química".to_string()]
        );
    }

    #[test]
    fn test_filter_preserves_all_columns() {
        let table = sample();
        let filtered = table.filter_eq("FACULTAD", "Derecho").unwrap();
        assert_eq!(filtered.column_names(), table.column_names());
        assert_eq!(filtered.nrows(), 2);
    }

    #[test]
    fn test_drop_nulls() {
        let table = sample();
        let clean = table.drop_nulls(&["ENROLLMENT"]).unwrap();
        assert_eq!(clean.nrows(), 3);
    }

    #[test]
    fn test_group_by_sum_order_and_totals() {
        let table = sample();
        let groups = table.group_by_sum("FACULTAD", "ENROLLMENT").unwrap();
        // First-appearance order, missing values contribute nothing
        assert_eq!(
            groups,
            vec![("Ciencias".to_string(), 200.0), ("Derecho".to_string(), 200.0)]
        );
    }

    #[test]
    fn test_share_of_total() {
        let shares = share_of_total(&[("a".to_string(), 30.0), ("b".to_string(), 10.0)]);
        assert_eq!(shares[0].1, 0.75);
        assert_eq!(shares[1].1, 0.25);
        let total: f64 = shares.iter().map(|(_, v)| v).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unique_count_and_sum() {
        let table = sample();
        assert_eq!(table.unique_count("FACULTAD").unwrap(), 2);
        assert_eq!(table.sum("ENROLLMENT").unwrap(), 400.0);
    }

    #[test]
    fn test_type_mismatch() {
        let table = sample();
        assert!(matches!(
            table.numbers("FACULTAD"),
            Err(TableroDataError::TypeMismatch { .. })
        ));
    }
}
