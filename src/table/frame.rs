//! Header derivation and row cleanup on top of a built grid.

use std::collections::{HashMap, HashSet};

use super::CellGrid;

/// Separator between distinct header values stacked in one column.
pub const HEADER_JOINER: &str = " : ";

/// A table reduced to named columns and deduplicated data rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableFrame {
    /// Column names, unique within the frame
    pub columns: Vec<String>,

    /// Data rows, one entry per column
    pub rows: Vec<Vec<String>>,

    /// Whether column names came from header cells
    pub has_header: bool,
}

impl TableFrame {
    /// Build a frame from a grid whose first `header_rows` rows are headers.
    ///
    /// All-empty rows are dropped before header rows are taken, so the header
    /// count applies to the remaining rows.
    pub fn from_grid(grid: &CellGrid, header_rows: usize) -> Self {
        let rows = grid.non_empty_rows();
        if rows.is_empty() {
            return Self::default();
        }

        let col_count = grid.col_count();
        let split = header_rows.min(rows.len());
        let (header, body) = rows.split_at(split);

        let names: Vec<String> = if header_rows > 0 {
            (0..col_count).map(|col| header_text(header, col)).collect()
        } else {
            (0..col_count).map(|col| col.to_string()).collect()
        };

        Self {
            columns: make_unique(&names),
            rows: dedup_rows(body),
            has_header: header_rows > 0,
        }
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Check if the frame has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Distinct values of one column across header rows, in first-seen order.
fn header_text(header: &[Vec<String>], col: usize) -> String {
    let mut seen = HashSet::new();
    let values: Vec<&str> = header
        .iter()
        .map(|row| row[col].as_str())
        .filter(|value| seen.insert(*value))
        .collect();
    values.join(HEADER_JOINER)
}

/// Drop exact duplicate rows, keeping the first occurrence.
fn dedup_rows(rows: &[Vec<String>]) -> Vec<Vec<String>> {
    let mut seen: HashSet<&[String]> = HashSet::new();
    let mut unique = Vec::with_capacity(rows.len());
    for row in rows {
        if seen.insert(row.as_slice()) {
            unique.push(row.clone());
        }
    }
    unique
}

/// Make names unique by padding repeats with trailing spaces.
///
/// The first occurrence is unchanged, the second gets one trailing space,
/// the third two, and so on.
pub fn make_unique(names: &[String]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut taken: HashSet<String> = names.iter().cloned().collect();
    let mut first_seen: HashSet<&str> = HashSet::new();

    names
        .iter()
        .map(|name| {
            if first_seen.insert(name.as_str()) {
                return name.clone();
            }
            let count = counts.entry(name.as_str()).or_insert(0);
            loop {
                *count += 1;
                let candidate = format!("{}{}", name, " ".repeat(*count));
                if taken.insert(candidate.clone()) {
                    return candidate;
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cell;
    use crate::table::build_grid;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_positional_columns_without_header() {
        let grid = build_grid(1, 3, &[Cell::text(0, 0, "a")]).unwrap();
        let frame = TableFrame::from_grid(&grid, 0);

        assert_eq!(frame.columns, strings(&["0", "1", "2"]));
        assert_eq!(frame.rows, vec![strings(&["a", "", ""])]);
        assert!(!frame.has_header);
    }

    #[test]
    fn test_spanning_header_repeats_are_disambiguated() {
        let cells = vec![
            Cell::header(0, 0, "Name").colspan(2),
            Cell::header(0, 2, "Name"),
            Cell::text(1, 0, "Alice"),
            Cell::text(1, 1, "30"),
            Cell::text(1, 2, "NYC"),
        ];
        let grid = build_grid(2, 3, &cells).unwrap();
        let frame = TableFrame::from_grid(&grid, 1);

        assert_eq!(frame.columns, strings(&["Name", "Name ", "Name  "]));
        assert_eq!(frame.rows, vec![strings(&["Alice", "30", "NYC"])]);
    }

    #[test]
    fn test_stacked_header_values_are_joined_distinct() {
        let cells = vec![
            Cell::header(0, 0, "Region").rowspan(2),
            Cell::header(0, 1, "Sales").colspan(2),
            Cell::header(1, 1, "Q1"),
            Cell::header(1, 2, "Q2"),
            Cell::text(2, 0, "North"),
            Cell::text(2, 1, "10"),
            Cell::text(2, 2, "12"),
        ];
        let grid = build_grid(3, 3, &cells).unwrap();
        let frame = TableFrame::from_grid(&grid, 2);

        assert_eq!(frame.columns, strings(&["Region", "Sales : Q1", "Sales : Q2"]));
        assert_eq!(frame.rows.len(), 1);
    }

    #[test]
    fn test_empty_rows_dropped_before_header_split() {
        let cells = vec![Cell::header(1, 0, "H"), Cell::text(2, 0, "v")];
        let grid = build_grid(3, 1, &cells).unwrap();
        // Row 0 is empty, so the remaining first row becomes the header
        let frame = TableFrame::from_grid(&grid, 1);

        assert_eq!(frame.columns, strings(&["H"]));
        assert_eq!(frame.rows, vec![strings(&["v"])]);
    }

    #[test]
    fn test_duplicate_rows_removed() {
        let cells = vec![
            Cell::header(0, 0, "k"),
            Cell::text(1, 0, "same"),
            Cell::text(2, 0, "same"),
            Cell::text(3, 0, "other"),
        ];
        let grid = build_grid(4, 1, &cells).unwrap();
        let frame = TableFrame::from_grid(&grid, 1);
        assert_eq!(frame.rows, vec![strings(&["same"]), strings(&["other"])]);
    }

    #[test]
    fn test_all_empty_grid() {
        let grid = build_grid(2, 2, &[]).unwrap();
        let frame = TableFrame::from_grid(&grid, 1);
        assert!(frame.is_empty());
        assert!(frame.rows.is_empty());
    }

    #[test]
    fn test_header_larger_than_rows() {
        let grid = build_grid(1, 2, &[Cell::header(0, 0, "A").rowspan(1)]).unwrap();
        let frame = TableFrame::from_grid(&grid, 3);
        assert_eq!(frame.columns, strings(&["A", ""]));
        assert!(frame.rows.is_empty());
    }

    #[test]
    fn test_make_unique_trims_back_to_names() {
        let names = strings(&["x", "x", "y", "x", "y"]);
        let unique = make_unique(&names);

        assert_eq!(unique, strings(&["x", "x ", "y", "x  ", "y "]));
        let distinct: HashSet<&String> = unique.iter().collect();
        assert_eq!(distinct.len(), unique.len());
        let stripped: Vec<&str> = unique.iter().map(|n| n.trim_end_matches(' ')).collect();
        assert_eq!(stripped, vec!["x", "x", "y", "x", "y"]);
    }

    #[test]
    fn test_make_unique_avoids_existing_padded_names() {
        let names = strings(&["a", "a ", "a"]);
        let unique = make_unique(&names);
        assert_eq!(unique, strings(&["a", "a ", "a  "]));
    }
}
