use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::debug;

use crate::error::TableroDataError;
use crate::schema::TableSchema;
use crate::table::DataTable;
use crate::workbook::{self, RangeSpec};

/// An explicit read-through cache of loaded tables, keyed by canonical
/// file path plus a load discriminator (sheet/range/schema). An entry is
/// only served while the file's modification time is unchanged; a
/// modified file reloads on the next access. Invalidation is explicit.
#[derive(Debug, Default)]
pub struct WorkbookCache {
    entries: HashMap<(PathBuf, String), CacheEntry>,
}

#[derive(Debug)]
struct CacheEntry {
    modified: SystemTime,
    table: DataTable,
}

impl WorkbookCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet(
        &mut self,
        path: &Path,
        sheet: &str,
        schema: &TableSchema,
    ) -> Result<DataTable, TableroDataError> {
        let key = format!("sheet:{}:{}", sheet, schema.fingerprint());
        self.get_or_load(path, key, |p| workbook::load_sheet(p, sheet, schema))
    }

    pub fn range(
        &mut self,
        path: &Path,
        sheet: &str,
        spec: &RangeSpec,
        schema: &TableSchema,
    ) -> Result<DataTable, TableroDataError> {
        let key = format!(
            "range:{}:{}:{}:{}:{}",
            sheet,
            spec.columns,
            spec.skip_rows,
            spec.rows,
            schema.fingerprint()
        );
        self.get_or_load(path, key, |p| workbook::load_range(p, sheet, spec, schema))
    }

    pub fn first_sheet(
        &mut self,
        path: &Path,
        schema: &TableSchema,
    ) -> Result<DataTable, TableroDataError> {
        let key = format!("sheet0:{}", schema.fingerprint());
        self.get_or_load(path, key, |p| workbook::load_first_sheet(p, schema))
    }

    pub fn csv(
        &mut self,
        path: &Path,
        schema: &TableSchema,
    ) -> Result<DataTable, TableroDataError> {
        let key = format!("csv:{}", schema.fingerprint());
        self.get_or_load(path, key, |p| workbook::load_csv(p, schema))
    }

    /// Serve from cache while the file is unchanged, otherwise run the
    /// loader and remember the result.
    pub fn get_or_load(
        &mut self,
        path: &Path,
        discriminator: String,
        loader: impl FnOnce(&Path) -> Result<DataTable, TableroDataError>,
    ) -> Result<DataTable, TableroDataError> {
        let canonical = std::fs::canonicalize(path)?;
        let modified = std::fs::metadata(&canonical)?.modified()?;
        let key = (canonical, discriminator);

        if let Some(entry) = self.entries.get(&key) {
            if entry.modified == modified {
                debug!("cache hit for {}", key.0.display());
                return Ok(entry.table.clone());
            }
            debug!("cache stale for {}", key.0.display());
        }

        let table = loader(&key.0)?;
        self.entries.insert(
            key,
            CacheEntry {
                modified,
                table: table.clone(),
            },
        );
        Ok(table)
    }

    /// Drop every cached table loaded from the given file.
    pub fn invalidate(&mut self, path: &Path) {
        if let Ok(canonical) = std::fs::canonicalize(path) {
            self.entries.retain(|(p, _), _| *p != canonical);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::io::Write;

    fn temp_csv(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "tablero-cache-test-{}-{}.csv",
            std::process::id(),
            name
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "FACULTAD,ENROLLMENT").unwrap();
        writeln!(file, "Ciencias,120").unwrap();
        path
    }

    #[test]
    fn test_hit_while_unchanged() {
        let path = temp_csv("hit");
        let schema = TableSchema::new().text("FACULTAD").number("ENROLLMENT");
        let mut cache = WorkbookCache::new();
        let loads = Cell::new(0);

        for _ in 0..3 {
            let table = cache
                .get_or_load(&path, "csv".to_string(), |p| {
                    loads.set(loads.get() + 1);
                    workbook::load_csv(p, &schema)
                })
                .unwrap();
            assert_eq!(table.nrows(), 1);
        }
        assert_eq!(loads.get(), 1);
        assert_eq!(cache.len(), 1);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_modified_file_reloads() {
        let path = temp_csv("stale");
        let schema = TableSchema::new().text("FACULTAD").number("ENROLLMENT");
        let mut cache = WorkbookCache::new();
        let loads = Cell::new(0);
        let mut load = |cache: &mut WorkbookCache| {
            cache
                .get_or_load(&path, "csv".to_string(), |p| {
                    loads.set(loads.get() + 1);
                    workbook::load_csv(p, &schema)
                })
                .unwrap()
        };

        load(&mut cache);
        load(&mut cache);
        assert_eq!(loads.get(), 1);

        // Bump the mtime without touching the contents; the entry is
        // stale and the next access must reload.
        let file = std::fs::File::options().write(true).open(&path).unwrap();
        file.set_modified(SystemTime::now() + std::time::Duration::from_secs(10))
            .unwrap();
        drop(file);

        load(&mut cache);
        assert_eq!(loads.get(), 2);
        assert_eq!(cache.len(), 1);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let path = temp_csv("invalidate");
        let schema = TableSchema::new().text("FACULTAD").number("ENROLLMENT");
        let mut cache = WorkbookCache::new();
        let loads = Cell::new(0);
        let mut load = |cache: &mut WorkbookCache| {
            cache
                .get_or_load(&path, "csv".to_string(), |p| {
                    loads.set(loads.get() + 1);
                    workbook::load_csv(p, &schema)
                })
                .unwrap()
        };

        load(&mut cache);
        cache.invalidate(&path);
        assert!(cache.is_empty());
        load(&mut cache);
        assert_eq!(loads.get(), 2);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_distinct_discriminators() {
        let path = temp_csv("discriminators");
        let schema = TableSchema::new();
        let mut cache = WorkbookCache::new();
        cache
            .get_or_load(&path, "a".to_string(), |p| workbook::load_csv(p, &schema))
            .unwrap();
        cache
            .get_or_load(&path, "b".to_string(), |p| workbook::load_csv(p, &schema))
            .unwrap();
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_errors() {
        let mut cache = WorkbookCache::new();
        let schema = TableSchema::new();
        let result = cache.csv(Path::new("/no/such/file.csv"), &schema);
        assert!(matches!(result, Err(TableroDataError::Io(_))));
    }
}
