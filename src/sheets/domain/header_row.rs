use std::collections::HashMap;

use super::column::Column;

/// Name of the field every record carries and the marker the first header must contain.
pub const DATE_FIELD: &str = "Date";

pub fn is_date_header(header: &str) -> bool {
    header.contains(DATE_FIELD)
}

/// Ordered, non-empty header names of row 1 with a name -> position index.
///
/// The index keeps the first position of a name, so a duplicated header in
/// the sheet resolves to its leftmost column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderRow {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl HeaderRow {
    /// Builds the header row from raw row-1 cells, dropping empty cells.
    pub fn from_cells<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut header_row = HeaderRow::default();
        for cell in cells.into_iter().filter(|cell| !cell.is_empty()) {
            header_row.insert(cell);
        }
        header_row
    }

    fn insert(&mut self, name: String) {
        self.positions
            .entry(name.clone())
            .or_insert(self.names.len());
        self.names.push(name);
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn first(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn column_of(&self, name: &str) -> Option<Column> {
        self.positions.get(name).copied().and_then(Column::from_position)
    }

    /// Appends `name` unless it is already present. Returns whether it was added.
    pub fn push(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.insert(name.to_owned());
        true
    }

    /// Names from `keys` that have no column, in the order given.
    pub fn missing<'a, I>(&self, keys: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        keys.into_iter()
            .filter(|key| !self.contains(key))
            .map(str::to_owned)
            .collect()
    }
}
