/// Declared type of a schema column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Number,
    /// Numeric, multiplied by 100 at load (fractions stored in the
    /// spreadsheet, percentages displayed).
    Percentage,
}

/// What to do with a cell that fails numeric coercion: `Lenient` turns it
/// into a missing value, `Strict` fails the load with a row-indexed error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoercionPolicy {
    #[default]
    Lenient,
    Strict,
}

#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub name: String,
    pub ty: ColumnType,
}

/// The expected column-name-to-type mapping for a worksheet, checked at
/// load time. A declared column that is absent from the source fails the
/// load with a descriptive error. Columns present in the source but not
/// declared are kept with an inferred type, so label columns flow through
/// to display untouched.
#[derive(Debug, Clone, Default)]
pub struct TableSchema {
    columns: Vec<ColumnSpec>,
    policy: CoercionPolicy,
}

impl TableSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>) -> Self {
        self.columns.push(ColumnSpec {
            name: name.into(),
            ty: ColumnType::Text,
        });
        self
    }

    pub fn number(mut self, name: impl Into<String>) -> Self {
        self.columns.push(ColumnSpec {
            name: name.into(),
            ty: ColumnType::Number,
        });
        self
    }

    pub fn percentage(mut self, name: impl Into<String>) -> Self {
        self.columns.push(ColumnSpec {
            name: name.into(),
            ty: ColumnType::Percentage,
        });
        self
    }

    pub fn strict(mut self) -> Self {
        self.policy = CoercionPolicy::Strict;
        self
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn policy(&self) -> CoercionPolicy {
        self.policy
    }

    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.ty)
    }

    /// A stable fingerprint of the declaration, used as part of cache keys.
    pub fn fingerprint(&self) -> String {
        let mut parts: Vec<String> = self
            .columns
            .iter()
            .map(|c| format!("{}:{:?}", c.name, c.ty))
            .collect();
        parts.push(format!("{:?}", self.policy));
        parts.join(",")
    }
}
