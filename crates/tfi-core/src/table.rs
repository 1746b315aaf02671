//! In-memory survey table.
//!
//! Every column carries an explicit [`ColumnValues`] variant decided once when
//! the table is built, so downstream heuristics never re-infer types.

use std::collections::HashSet;

use serde::Serialize;

/// A raw cell as produced by a loader, before column typing.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    /// Build a cell from delimited-text input: trimmed, empty → [`Cell::Empty`],
    /// finite numbers → [`Cell::Number`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Empty;
        }
        match parse_number(trimmed) {
            Some(n) => Cell::Number(n),
            None => Cell::Text(trimmed.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Text,
}

/// Column payload. `None` marks a missing cell.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    label: String,
    values: ColumnValues,
}

impl Column {
    #[must_use]
    pub fn numeric<I>(label: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        Self {
            label: label.into(),
            values: ColumnValues::Numeric(
                values
                    .into_iter()
                    .map(|v| v.filter(|n| n.is_finite()))
                    .collect(),
            ),
        }
    }

    /// Build a text column. Blank strings are stored as missing.
    #[must_use]
    pub fn text<I, S>(label: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            label: label.into(),
            values: ColumnValues::Text(
                values
                    .into_iter()
                    .map(|v| v.map(Into::<String>::into).filter(|s| !s.trim().is_empty()))
                    .collect(),
            ),
        }
    }

    /// Type a column from loader cells.
    ///
    /// The column is numeric when it has at least one non-empty cell and every
    /// non-empty cell is a number. Otherwise it is text, with numbers rendered
    /// in their shortest display form.
    #[must_use]
    pub fn from_cells(label: impl Into<String>, cells: Vec<Cell>) -> Self {
        let mut saw_value = false;
        let mut all_numeric = true;
        for cell in &cells {
            match cell {
                Cell::Number(_) => saw_value = true,
                Cell::Text(_) => {
                    saw_value = true;
                    all_numeric = false;
                }
                Cell::Empty => {}
            }
        }

        if saw_value && all_numeric {
            Self::numeric(
                label,
                cells.into_iter().map(|cell| match cell {
                    Cell::Number(n) => Some(n),
                    _ => None,
                }),
            )
        } else {
            Self::text(
                label,
                cells.into_iter().map(|cell| match cell {
                    Cell::Number(n) => Some(n.to_string()),
                    Cell::Text(s) => Some(s),
                    Cell::Empty => None,
                }),
            )
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn values(&self) -> &ColumnValues {
        &self.values
    }

    #[must_use]
    pub fn kind(&self) -> ColumnKind {
        match self.values {
            ColumnValues::Numeric(_) => ColumnKind::Numeric,
            ColumnValues::Text(_) => ColumnKind::Text,
        }
    }

    /// Number of cells, missing ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.values {
            ColumnValues::Numeric(v) => v.len(),
            ColumnValues::Text(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Best-effort numeric coercion: missing and non-numeric cells are dropped.
    #[must_use]
    pub fn numeric_values(&self) -> Vec<f64> {
        match &self.values {
            ColumnValues::Numeric(v) => v.iter().flatten().copied().collect(),
            ColumnValues::Text(v) => v.iter().flatten().filter_map(|s| parse_number(s)).collect(),
        }
    }

    /// Non-missing cells as strings, in row order.
    #[must_use]
    pub fn text_values(&self) -> Vec<String> {
        match &self.values {
            ColumnValues::Numeric(v) => v.iter().flatten().map(ToString::to_string).collect(),
            ColumnValues::Text(v) => v.iter().flatten().cloned().collect(),
        }
    }
}

/// Parse a trimmed string as a finite `f64`.
fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Build a table from already-typed columns. The row count is the length
    /// of the longest column.
    #[must_use]
    pub fn new(columns: Vec<Column>) -> Self {
        let row_count = columns.iter().map(Column::len).max().unwrap_or(0);
        Self { columns, row_count }
    }

    /// Build a table from a header row and raw cell rows.
    ///
    /// Ragged rows are padded with [`Cell::Empty`] or truncated to the header
    /// width. Blank headers become `Unnamed: <index>` and repeated headers are
    /// suffixed `.1`, `.2`, … so labels are unique.
    #[must_use]
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = headers.len();
        let labels = unique_labels(headers);

        let mut columns: Vec<Vec<Cell>> = (0..width)
            .map(|_| Vec::with_capacity(rows.len()))
            .collect();
        let row_count = rows.len();
        for row in rows {
            let mut cells = row.into_iter();
            for column in &mut columns {
                column.push(cells.next().unwrap_or(Cell::Empty));
            }
        }

        let columns = labels
            .into_iter()
            .zip(columns)
            .map(|(label, cells)| Column::from_cells(label, cells))
            .collect();

        Self { columns, row_count }
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub fn column(&self, label: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.label == label)
    }

    /// Number of response rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.row_count
    }
}

fn unique_labels(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut labels = Vec::with_capacity(headers.len());

    for (index, header) in headers.into_iter().enumerate() {
        let trimmed = header.trim();
        let base = if trimmed.is_empty() {
            format!("Unnamed: {index}")
        } else {
            trimmed.to_string()
        };

        let mut label = base.clone();
        let mut suffix = 1;
        while seen.contains(&label) {
            label = format!("{base}.{suffix}");
            suffix += 1;
        }
        seen.insert(label.clone());
        labels.push(label);
    }

    labels
}
