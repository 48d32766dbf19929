//! Source positions tracked by every cursor.

use std::fmt;

/// A place in the source: rune offset plus 1-indexed row and column.
///
/// `offset` counts decoded characters, not bytes, so the same text yields
/// the same positions whether it is read from memory or from a reader.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    /// Characters consumed since the start of the source.
    pub offset: usize,
    /// 1-indexed line number.
    pub row: usize,
    /// 1-indexed column, in characters.
    pub column: usize,
}

impl Position {
    /// Position of the first character of any source.
    pub const START: Self = Self {
        offset: 0,
        row: 1,
        column: 1,
    };

    /// Account for one consumed character.
    ///
    /// A `'\n'` starts a new row; every other character, including `'\r'`,
    /// moves one column right.
    #[inline]
    pub fn advance(&mut self, ch: char) {
        self.offset += 1;
        if ch == '\n' {
            self.row += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_one_one() {
        let pos = Position::default();
        assert_eq!(pos, Position::START);
        assert_eq!((pos.offset, pos.row, pos.column), (0, 1, 1));
    }

    #[test]
    fn newline_resets_column() {
        let mut pos = Position::START;
        for ch in "ab\ncd".chars() {
            pos.advance(ch);
        }
        assert_eq!((pos.offset, pos.row, pos.column), (5, 2, 3));
    }

    #[test]
    fn carriage_return_is_an_ordinary_column() {
        let mut pos = Position::START;
        pos.advance('\r');
        assert_eq!((pos.row, pos.column), (1, 2));
        pos.advance('\n');
        assert_eq!((pos.row, pos.column), (2, 1));
    }

    #[test]
    fn display_is_row_colon_column() {
        let pos = Position {
            offset: 10,
            row: 3,
            column: 7,
        };
        assert_eq!(pos.to_string(), "3:7");
    }
}
