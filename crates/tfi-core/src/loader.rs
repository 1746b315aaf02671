//! Survey export loading: delimited text via `csv`, workbooks via `calamine`.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, DataType, Reader};
use thiserror::Error;

use crate::table::{Cell, Table};

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb", "ods"];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("{0}")]
    Empty(String),
}

/// Load a survey export from disk.
///
/// Workbook extensions (`xlsx`, `xlsm`, `xls`, `xlsb`, `ods`) are read from
/// their first worksheet; everything else is treated as delimited text.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be opened or parsed, or has no
/// header row.
pub fn load_table(path: &Path) -> Result<Table, LoadError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        read_workbook(path)
    } else {
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        read_delimited(file).map_err(|err| match err {
            LoadError::Io { source, .. } => LoadError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }
}

/// Read delimited text (comma, semicolon or tab, sniffed from the header line).
///
/// # Errors
///
/// Returns [`LoadError::Csv`] on malformed input and [`LoadError::Empty`] when
/// there is no header row.
pub fn read_delimited<R: Read>(mut reader: R) -> Result<Table, LoadError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|source| LoadError::Io {
            path: PathBuf::from("<input>"),
            source,
        })?;
    let text = String::from_utf8_lossy(&bytes);
    let text = text.trim_start_matches('\u{feff}');

    if text.trim().is_empty() {
        return Err(LoadError::Empty("the file is empty".to_string()));
    }

    let delimiter = detect_delimiter(text);
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|value| value.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let cells: Vec<Cell> = record.iter().map(Cell::parse).collect();
        if cells.iter().all(|cell| *cell == Cell::Empty) {
            continue;
        }
        rows.push(cells);
    }

    Ok(Table::from_rows(headers, rows))
}

fn read_workbook(path: &Path) -> Result<Table, LoadError> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| LoadError::Empty("the workbook does not contain any worksheets".into()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .ok_or_else(|| LoadError::Empty(format!("unable to read the worksheet '{sheet_name}'")))??;

    let mut rows_iter = range.rows();
    let header_row = rows_iter
        .next()
        .ok_or_else(|| LoadError::Empty(format!("the worksheet '{sheet_name}' is empty")))?;

    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| match cell {
            DataType::Empty => String::new(),
            other => other.to_string().trim().to_string(),
        })
        .collect();

    let mut rows = Vec::new();
    for row in rows_iter {
        let cells: Vec<Cell> = row.iter().map(workbook_cell).collect();
        if cells.iter().all(|cell| *cell == Cell::Empty) {
            continue;
        }
        rows.push(cells);
    }

    Ok(Table::from_rows(headers, rows))
}

/// Workbook cells keep their stored type: numbers stay numeric and strings
/// stay text even when they look numeric.
#[allow(clippy::cast_precision_loss)]
fn workbook_cell(cell: &DataType) -> Cell {
    match cell {
        DataType::Empty => Cell::Empty,
        DataType::Int(i) => Cell::Number(*i as f64),
        DataType::Float(f) if f.is_finite() => Cell::Number(*f),
        DataType::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Cell::Empty
            } else {
                Cell::Text(trimmed.to_string())
            }
        }
        other => {
            let rendered = other.to_string();
            let trimmed = rendered.trim();
            if trimmed.is_empty() {
                Cell::Empty
            } else {
                Cell::Text(trimmed.to_string())
            }
        }
    }
}

/// Pick the delimiter that occurs most often on the first non-blank line.
/// Ties and lines with no candidate fall back to a comma.
fn detect_delimiter(text: &str) -> u8 {
    let Some(line) = text.lines().find(|line| !line.trim().is_empty()) else {
        return b',';
    };

    let counts = [
        (b',', line.matches(',').count()),
        (b';', line.matches(';').count()),
        (b'\t', line.matches('\t').count()),
    ];

    let mut best = (b',', 0);
    for (delimiter, count) in counts {
        if count > best.1 {
            best = (delimiter, count);
        }
    }
    best.0
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod tests;
