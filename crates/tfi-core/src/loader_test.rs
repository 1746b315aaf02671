use std::path::Path;

use super::*;
use crate::table::ColumnKind;

#[test]
fn detect_delimiter_prefers_most_frequent() {
    assert_eq!(detect_delimiter("a;b;c\n1;2;3"), b';');
    assert_eq!(detect_delimiter("a\tb\tc"), b'\t');
    assert_eq!(detect_delimiter("a,b,c"), b',');
}

#[test]
fn detect_delimiter_defaults_to_comma() {
    assert_eq!(detect_delimiter("single"), b',');
    assert_eq!(detect_delimiter(""), b',');
}

#[test]
fn read_delimited_types_columns() {
    let csv = "Name,1. Was the training useful?,Comments\n\
               Asha,5,The trainer explained everything clearly\n\
               Ben,4,\n\
               Chen,,Too much content for one day\n";
    let table = read_delimited(csv.as_bytes()).expect("valid csv");

    assert_eq!(table.row_count(), 3);
    let labels: Vec<&str> = table.columns().iter().map(|c| c.label()).collect();
    assert_eq!(labels, vec!["Name", "1. Was the training useful?", "Comments"]);

    let rating = table.column("1. Was the training useful?").unwrap();
    assert_eq!(rating.kind(), ColumnKind::Numeric);
    assert_eq!(rating.numeric_values(), vec![5.0, 4.0]);

    let comments = table.column("Comments").unwrap();
    assert_eq!(comments.kind(), ColumnKind::Text);
    assert_eq!(comments.text_values().len(), 2);
}

#[test]
fn read_delimited_handles_semicolons_bom_and_quotes() {
    let csv = "\u{feff}Score;Feedback\n3;\"line one\nline two\"\n";
    let table = read_delimited(csv.as_bytes()).expect("valid csv");
    assert_eq!(table.columns()[0].label(), "Score");
    assert_eq!(
        table.column("Feedback").unwrap().text_values(),
        vec!["line one\nline two".to_string()]
    );
}

#[test]
fn read_delimited_skips_blank_rows() {
    let csv = "A,B\n1,2\n,\n3,4\n";
    let table = read_delimited(csv.as_bytes()).expect("valid csv");
    assert_eq!(table.row_count(), 2);
}

#[test]
fn read_delimited_rejects_empty_input() {
    let err = read_delimited("   \n".as_bytes()).unwrap_err();
    assert!(matches!(err, LoadError::Empty(_)), "got {err:?}");
}

#[test]
fn load_table_reports_missing_file() {
    let err = load_table(Path::new("/definitely/not/here.csv")).unwrap_err();
    assert!(
        matches!(err, LoadError::Io { ref path, .. } if path.ends_with("here.csv")),
        "got {err:?}"
    );
}

#[test]
fn workbook_cell_keeps_stored_types() {
    assert_eq!(workbook_cell(&DataType::Int(4)), Cell::Number(4.0));
    assert_eq!(workbook_cell(&DataType::Float(2.5)), Cell::Number(2.5));
    assert_eq!(
        workbook_cell(&DataType::String(" 4 ".into())),
        Cell::Text("4".into())
    );
    assert_eq!(workbook_cell(&DataType::String("  ".into())), Cell::Empty);
    assert_eq!(workbook_cell(&DataType::Empty), Cell::Empty);
}
