use std::path::Path;

use anyhow::{Context, Error};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use tracing::debug;

use crate::{Result, YEAR_COLUMN};

/// One row of the source table: the reporting year plus the raw cell text of
/// every source column, in header order. Values stay text until the analysis
/// stage attempts numeric parsing.
#[derive(Debug, Clone)]
pub struct Record {
    pub year: String,
    pub sources: Vec<(String, String)>,
}

pub fn load_records<P: AsRef<Path>>(file_path: P) -> Result<Vec<Record>> {
    let path = file_path.as_ref();
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("failed to open spreadsheet {}", path.display()))?;
    let Some(Ok(range)) = workbook.worksheet_range_at(0) else {
        return Err(Error::msg("missing or unreadable first sheet"));
    };
    records_from_range(&range)
}

pub fn records_from_range(range: &Range<Data>) -> Result<Vec<Record>> {
    let mut rows = range.rows();
    let header = rows.next().context("missing header row")?;
    let (year_index, source_columns) = header_columns(header)?;
    debug!(sources = source_columns.len(), "resolved header columns");

    let mut records = Vec::new();
    for row in rows {
        let year = cell_text(row, year_index);
        let sources = source_columns
            .iter()
            .map(|(pos, name)| (name.clone(), cell_text(row, *pos)))
            .collect();
        records.push(Record { year, sources });
    }
    Ok(records)
}

fn header_columns(header: &[Data]) -> Result<(usize, Vec<(usize, String)>)> {
    let mut year_index: Option<usize> = None;
    let mut source_columns: Vec<(usize, String)> = Vec::new();
    for (pos, cell) in header.iter().enumerate() {
        let name = cell.to_string().trim().to_string();
        if name.is_empty() {
            continue;
        }
        if name == YEAR_COLUMN {
            if year_index.is_none() {
                year_index = Some(pos);
            }
            continue;
        }
        // a repeated header keeps its first column
        if source_columns.iter().any(|(_, seen)| *seen == name) {
            continue;
        }
        source_columns.push((pos, name));
    }
    Ok((
        year_index.context("failed to find Year header")?,
        source_columns,
    ))
}

fn cell_text(row: &[Data], pos: usize) -> String {
    row.get(pos)
        .map(|cell| cell.to_string().trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(cells: &[(u32, u32, Data)]) -> Range<Data> {
        let max_row = cells.iter().map(|(r, _, _)| *r).max().unwrap_or(0);
        let max_col = cells.iter().map(|(_, c, _)| *c).max().unwrap_or(0);
        let mut range = Range::new((0, 0), (max_row, max_col));
        for (row, col, value) in cells {
            range.set_value((*row, *col), value.clone());
        }
        range
    }

    fn s(text: &str) -> Data {
        Data::String(text.to_string())
    }

    #[test]
    fn headers_resolve_and_rows_pair_in_column_order() {
        let range = sheet(&[
            (0, 0, s("Year")),
            (0, 1, s("Solar")),
            (0, 2, s("Wind")),
            (1, 0, s("2018")),
            (1, 1, s("10.00")),
            (1, 2, s("N/A")),
            (2, 0, s("2019")),
            (2, 1, s("12.50")),
            (2, 2, s("5.00")),
        ]);

        let records = records_from_range(&range).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].year, "2018");
        assert_eq!(
            records[0].sources,
            vec![
                ("Solar".to_string(), "10.00".to_string()),
                ("Wind".to_string(), "N/A".to_string()),
            ]
        );
        assert_eq!(records[1].year, "2019");
        assert_eq!(records[1].sources[1], ("Wind".to_string(), "5.00".to_string()));
    }

    #[test]
    fn header_and_cell_text_is_trimmed() {
        let range = sheet(&[
            (0, 0, s(" Year ")),
            (0, 1, s("  Solar ")),
            (1, 0, s(" 2018")),
            (1, 1, s(" 10.5 ")),
        ]);

        let records = records_from_range(&range).unwrap();
        assert_eq!(records[0].year, "2018");
        assert_eq!(records[0].sources, vec![("Solar".to_string(), "10.5".to_string())]);
    }

    #[test]
    fn empty_and_duplicate_headers_are_dropped() {
        let range = sheet(&[
            (0, 0, s("Year")),
            (0, 1, s("")),
            (0, 2, s("Solar")),
            (0, 3, s("Solar")),
            (1, 0, s("2018")),
            (1, 1, s("99")),
            (1, 2, s("1.0")),
            (1, 3, s("2.0")),
        ]);

        let records = records_from_range(&range).unwrap();
        // only the first Solar column survives; the unnamed column is gone
        assert_eq!(records[0].sources, vec![("Solar".to_string(), "1.0".to_string())]);
    }

    #[test]
    fn numeric_cells_are_kept_as_display_text() {
        let range = sheet(&[
            (0, 0, s("Year")),
            (0, 1, s("Hydro")),
            (1, 0, Data::Float(2018.0)),
            (1, 1, Data::Float(12.5)),
        ]);

        let records = records_from_range(&range).unwrap();
        assert_eq!(records[0].year, "2018");
        assert_eq!(records[0].sources, vec![("Hydro".to_string(), "12.5".to_string())]);
    }

    #[test]
    fn missing_cells_read_as_empty_text() {
        // row 1 has no cell under Wind; the range pads it with Data::Empty
        let range = sheet(&[
            (0, 0, s("Year")),
            (0, 1, s("Solar")),
            (0, 2, s("Wind")),
            (1, 0, s("2018")),
            (1, 1, s("3.5")),
        ]);

        let records = records_from_range(&range).unwrap();
        assert_eq!(records[0].sources[1], ("Wind".to_string(), String::new()));
    }

    #[test]
    fn header_row_alone_yields_no_records() {
        let range = sheet(&[(0, 0, s("Year")), (0, 1, s("Solar"))]);
        let records = records_from_range(&range).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn missing_year_header_is_an_error() {
        let range = sheet(&[(0, 0, s("Solar")), (0, 1, s("Wind")), (1, 0, s("1.0"))]);
        let err = records_from_range(&range).unwrap_err();
        assert!(err.to_string().contains("Year"));
    }
}
