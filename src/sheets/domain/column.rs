use std::fmt::Formatter;

/// 1-based column number. Column 1 is rendered as `A`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Column(u32);

impl Column {
    /// The column holding the date of every data row.
    pub const DATE: Column = Column(1);

    /// Column for the 0-based `position` of a header in the header row.
    /// `None` when the position lies past the last addressable column.
    pub fn from_position(position: usize) -> Option<Self> {
        u32::try_from(position)
            .ok()?
            .checked_add(1)
            .map(Column)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// 0-based offset of this column inside a row that starts at column `A`.
    pub fn offset(&self) -> usize {
        self.0.saturating_sub(1) as usize
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", number_to_letters(self.0))
    }
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Show both the numeric and letter representation
        write!(f, "Column(u32: {}, letters: {})", self.0, self)
    }
}

impl From<u32> for Column {
    fn from(value: u32) -> Self {
        Column(value)
    }
}

fn number_to_letters(number: u32) -> String {
    let mut number = number;
    let mut result = String::new();
    while number > 0 {
        let remainder = (number - 1) % 26;
        let letter = (remainder as u8 + b'A') as char;
        result.push(letter);
        number = (number - remainder) / 26;
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_to_letters() {
        assert_eq!(number_to_letters(1), "A");
        assert_eq!(number_to_letters(26), "Z");
        assert_eq!(number_to_letters(27), "AA");
        assert_eq!(number_to_letters(28), "AB");
        assert_eq!(number_to_letters(52), "AZ");
        assert_eq!(number_to_letters(53), "BA");
        assert_eq!(number_to_letters(702), "ZZ");
        assert_eq!(number_to_letters(703), "AAA");
    }

    #[test]
    fn test_column_display_zzy() {
        let col = Column(26 * 26 * 26 + 26 * 26 + 25);
        assert_eq!(col.to_string(), "ZZY");
    }

    #[test]
    fn test_column_from_position() {
        assert_eq!(Column::from_position(0), Some(Column::DATE));
        assert_eq!(Column::from_position(2).map(|col| col.to_string()).as_deref(), Some("C"));
    }

    #[test]
    fn test_column_offset() {
        assert_eq!(Column::DATE.offset(), 0);
        assert_eq!(Column(28).offset(), 27);
    }

    #[test]
    fn test_column_from_position_past_the_last_column() {
        assert_eq!(Column::from_position(u32::MAX as usize), None);
    }
}
