use std::fmt::Formatter;

use super::{cell_position::CellPosition, cell_range::CellRange, column::Column, row::Row};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Notation(pub String);

impl std::fmt::Display for A1Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for A1Notation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub trait ToA1Notation {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation;
}

/// Quotes a sheet title for use as a range prefix. Embedded quotes are doubled.
fn sheet_prefix(sheet_name: &str) -> String {
    format!("'{}'!", sheet_name.replace('\'', "''"))
}

fn with_sheet(sheet_name: Option<&str>, local: String) -> A1Notation {
    match sheet_name {
        Some(sheet_name) => A1Notation(format!("{}{}", sheet_prefix(sheet_name), local)),
        None => A1Notation(local),
    }
}

impl ToA1Notation for CellPosition {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation {
        with_sheet(sheet_name, format!("{}{}", self.col, self.row))
    }
}

impl ToA1Notation for CellRange {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation {
        let start = self.start.to_a1_notation(None);
        let end = self.end.to_a1_notation(None);
        with_sheet(sheet_name, format!("{}:{}", start, end))
    }
}

/// Whole column, e.g. `A:A`.
impl ToA1Notation for Column {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation {
        with_sheet(sheet_name, format!("{}:{}", self, self))
    }
}

/// Whole row, e.g. `1:1`.
impl ToA1Notation for Row {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation {
        with_sheet(sheet_name, format!("{}:{}", self, self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_position_to_a1_notation() {
        let cell_position = CellPosition {
            col: Column::DATE,
            row: Row::HEADER,
        };
        assert_eq!(
            cell_position.to_a1_notation(None),
            A1Notation("A1".to_owned())
        );
    }

    #[test]
    fn test_cell_position_zz100_to_a1_notation() {
        let cell_position = CellPosition {
            col: Column::from(702u32),
            row: Row(100),
        };
        assert_eq!(
            cell_position.to_a1_notation(None),
            A1Notation("ZZ100".to_owned())
        );
    }

    #[test]
    fn test_cell_position_to_a1_notation_with_sheet_name() {
        let cell_position = CellPosition {
            col: Column::DATE,
            row: Row::HEADER,
        };
        assert_eq!(
            cell_position.to_a1_notation(Some("Sheet1")),
            A1Notation("'Sheet1'!A1".to_owned())
        );
    }

    #[test]
    fn test_cell_range_to_a1_notation_with_sheet_name() {
        let cell_range = CellRange::row_span(Row(3), 28);
        assert_eq!(
            cell_range.to_a1_notation(Some("Sheet1")),
            A1Notation("'Sheet1'!A3:AB3".to_owned())
        );
    }

    #[test]
    fn test_sheet_name_with_quote_is_escaped() {
        assert_eq!(
            Row::HEADER.to_a1_notation(Some("Bob's data")),
            A1Notation("'Bob''s data'!1:1".to_owned())
        );
    }

    #[test]
    fn test_whole_column_and_row() {
        assert_eq!(Column::DATE.to_a1_notation(None).0, "A:A");
        assert_eq!(Row(4).to_a1_notation(Some("Log")).0, "'Log'!4:4");
    }
}
