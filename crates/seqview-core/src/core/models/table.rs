use super::dataset::DatasetError;
use super::record::SequenceRecord;
use std::fmt;

pub const NAME_COLUMN: &str = "Name";
pub const ID_COLUMN: &str = "ID";
pub const DESCRIPTION_COLUMN: &str = "Description";
pub const SEQUENCE_COLUMN: &str = "Sequence";

/// The four columns a table must carry to be convertible to sequence records.
pub const RECORD_COLUMNS: [&str; 4] = [NAME_COLUMN, ID_COLUMN, DESCRIPTION_COLUMN, SEQUENCE_COLUMN];

const DESCRIPTION_TAB_REPLACEMENT: &str = "; ";

/// A single table value. Every variant can be rendered as text.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Null,
    Text(String),
    Integer(i64),
    Float(f64),
}

impl Cell {
    /// Interprets raw text the way a CSV import does: empty text is missing,
    /// then integers, then floats, then plain text.
    pub fn infer(raw: &str) -> Self {
        if raw.is_empty() {
            return Cell::Null;
        }
        if let Ok(value) = raw.parse::<i64>() {
            return Cell::Integer(value);
        }
        // `f64::from_str` also accepts words like "inf" and "nan"; those stay text.
        if raw.bytes().any(|b| b.is_ascii_digit()) {
            if let Ok(value) = raw.parse::<f64>() {
                return Cell::Float(value);
            }
        }
        Cell::Text(raw.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Integer(v) => write!(f, "{}", v),
            Cell::Float(v) => write!(f, "{:?}", v),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Float(v)
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Integer(v)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub(crate) cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// An ordered list of named, equally long columns.
///
/// The row count is fixed at construction and every column is guaranteed to
/// hold exactly that many cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// Creates a table from columns.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::RaggedTable`] if the columns differ in length.
    pub fn new(columns: Vec<Column>) -> Result<Self, DatasetError> {
        let n_rows = columns.first().map_or(0, Column::len);
        if let Some(bad) = columns.iter().find(|c| c.len() != n_rows) {
            return Err(DatasetError::RaggedTable {
                column: bad.name.clone(),
                expected: n_rows,
                found: bad.len(),
            });
        }
        Ok(Self { columns, n_rows })
    }

    /// Creates a table from a header and row-major data.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::RaggedTable`] if any row's width differs from the header.
    pub fn from_rows(header: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self, DatasetError> {
        let mut columns: Vec<Column> = header
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(rows.len())))
            .collect();

        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != columns.len() {
                return Err(DatasetError::RaggedTable {
                    column: format!("row {}", row_idx + 1),
                    expected: columns.len(),
                    found: row.len(),
                });
            }
            for (column, cell) in columns.iter_mut().zip(row) {
                column.cells.push(cell);
            }
        }

        Self::new(columns)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Projects records onto the `Name`, `ID`, `Description` and `Sequence` columns.
    ///
    /// Tab characters in descriptions are replaced with `"; "` so the text stays
    /// safe for tab-delimited display and export.
    pub fn from_records(records: &[SequenceRecord]) -> Self {
        Self {
            columns: vec![
                text_column(NAME_COLUMN, records, |r| r.name.clone()),
                text_column(ID_COLUMN, records, |r| r.id.clone()),
                text_column(DESCRIPTION_COLUMN, records, |r| {
                    r.description.replace('\t', DESCRIPTION_TAB_REPLACEMENT)
                }),
                text_column(SEQUENCE_COLUMN, records, |r| r.sequence.clone()),
            ],
            n_rows: records.len(),
        }
    }

    /// Re-synthesizes one record per row from the current text of the
    /// `Name`, `ID`, `Description` and `Sequence` columns.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::MissingColumn`] naming the first absent column.
    pub fn to_records(&self) -> Result<Vec<SequenceRecord>, DatasetError> {
        let mut indices = [0usize; 4];
        for (slot, name) in indices.iter_mut().zip(RECORD_COLUMNS) {
            *slot = self
                .column_index(name)
                .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))?;
        }
        let [name, id, description, sequence] = indices;

        Ok((0..self.n_rows)
            .map(|row| {
                SequenceRecord::new(
                    self.columns[name].cells[row].to_string(),
                    self.columns[id].cells[row].to_string(),
                    self.columns[description].cells[row].to_string(),
                    self.columns[sequence].cells[row].to_string(),
                )
            })
            .collect())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0 || self.columns.is_empty()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.columns.get(column).and_then(|c| c.cells.get(row))
    }

    /// Returns the cells of one row in column order.
    pub fn row(&self, row: usize) -> Option<Vec<&Cell>> {
        if row >= self.n_rows {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.cells[row]).collect())
    }

    /// Builds a new table holding only the given rows, in the given order.
    ///
    /// Out-of-range indices are ignored.
    pub fn select_rows(&self, rows: &[usize]) -> Table {
        let rows: Vec<usize> = rows.iter().copied().filter(|&r| r < self.n_rows).collect();
        let columns = self
            .columns
            .iter()
            .map(|c| Column::new(c.name.clone(), rows.iter().map(|&r| c.cells[r].clone()).collect()))
            .collect();
        Table {
            columns,
            n_rows: rows.len(),
        }
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.columns.iter_mut().flat_map(|c| c.cells.iter_mut())
    }
}

fn text_column(
    name: &str,
    records: &[SequenceRecord],
    get: impl Fn(&SequenceRecord) -> String,
) -> Column {
    Column::new(name, records.iter().map(|r| Cell::Text(get(r))).collect())
}
