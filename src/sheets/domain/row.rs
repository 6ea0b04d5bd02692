use std::{fmt::Formatter, ops::Deref};

/// 1-based row number. Row 1 is the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Row(pub u32);

impl Row {
    pub const HEADER: Row = Row(1);

    /// 0-based offset of this row inside a grid that starts at row 1.
    pub fn offset(&self) -> usize {
        self.0.saturating_sub(1) as usize
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Deref for Row {
    type Target = u32;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_display() {
        assert_eq!(Row(42).to_string(), "42");
        assert_eq!(*Row(7), 7);
    }

    #[test]
    fn test_row_offset() {
        assert_eq!(Row::HEADER.offset(), 0);
        assert_eq!(Row(10).offset(), 9);
    }
}
