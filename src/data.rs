//! Core data structures for ASCII frames.

/// Character separating rows in the flat cell representation.
pub const ROW_TERMINATOR: char = '\n';

/// Row and column count of a rectangular frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridShape {
    pub rows: usize,
    pub cols: usize,
}

impl GridShape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Length of the flat cell sequence, row terminators included.
    #[inline]
    pub fn flat_len(&self) -> usize {
        if self.rows == 0 {
            0
        } else {
            self.rows * self.cols + (self.rows - 1)
        }
    }
}

/// One ASCII-art frame: an ordered list of rows of characters.
///
/// Each `char` occupies exactly one grid cell. Raw frames may be ragged;
/// see [`crate::FrameSet`] for the normalized, rectangular form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextFrame {
    rows: Vec<Vec<char>>,
}

impl TextFrame {
    /// Build a frame from already-split lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            rows: lines
                .into_iter()
                .map(|line| line.as_ref().chars().collect())
                .collect(),
        }
    }

    /// Split raw text into rows.
    ///
    /// Accepts `\n` and `\r\n` line endings. A trailing line ending does not
    /// produce an extra empty row.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use cascii_morph::TextFrame;
    ///
    /// let frame = TextFrame::parse("ab\r\ncde\n");
    /// assert_eq!(frame.row_count(), 2);
    /// assert_eq!(frame.col_count(), 3);
    /// ```
    pub fn parse(text: &str) -> Self {
        Self::from_lines(text.lines())
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<Vec<char>> {
        &mut self.rows
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row.
    pub fn col_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Frame dimensions as (columns, rows).
    pub fn dimensions(&self) -> (usize, usize) {
        (self.col_count(), self.row_count())
    }

    /// Get a row by index.
    pub fn row(&self, index: usize) -> Option<&[char]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Get the character at the given position.
    ///
    /// Returns None if position is out of bounds.
    #[inline]
    pub fn char_at(&self, row: usize, col: usize) -> Option<char> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Whether every row has the same length.
    pub fn is_rectangular(&self) -> bool {
        let cols = self.col_count();
        self.rows.iter().all(|r| r.len() == cols)
    }

    /// Flat row-major cells with [`ROW_TERMINATOR`] between rows.
    ///
    /// There is no terminator after the last row, so for a rectangular frame
    /// the length is `rows * cols + rows - 1`.
    pub fn cells(&self) -> Vec<char> {
        let mut cells = Vec::with_capacity(self.rows.len() * (self.col_count() + 1));
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                cells.push(ROW_TERMINATOR);
            }
            cells.extend_from_slice(row);
        }
        cells
    }

    /// Rows joined with newlines.
    pub fn to_text(&self) -> String {
        self.cells().into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_dimensions() {
        let frame = TextFrame::parse("ABC\nDEF\nGHI");
        assert_eq!(frame.dimensions(), (3, 3));

        let frame2 = TextFrame::parse("ABCD\nEF");
        assert_eq!(frame2.dimensions(), (4, 2));
        assert!(!frame2.is_rectangular());
    }

    #[test]
    fn test_parse_line_endings() {
        let frame = TextFrame::parse("ab\r\ncd\n");
        assert_eq!(frame.row_count(), 2);
        assert_eq!(frame.row(0), Some(&['a', 'b'][..]));
        assert_eq!(frame.row(1), Some(&['c', 'd'][..]));

        // An interior blank line is kept
        let frame = TextFrame::parse("ab\n\ncd");
        assert_eq!(frame.row_count(), 3);
        assert_eq!(frame.row(1), Some(&[] as &[char]));
    }

    #[test]
    fn test_char_at() {
        let frame = TextFrame::from_lines(["AB", "C"]);
        assert_eq!(frame.char_at(0, 1), Some('B'));
        assert_eq!(frame.char_at(1, 0), Some('C'));
        assert_eq!(frame.char_at(1, 1), None);
        assert_eq!(frame.char_at(5, 0), None);
    }

    #[test]
    fn test_cells_insert_terminators_between_rows() {
        let frame = TextFrame::from_lines(["ab", "cd"]);
        assert_eq!(frame.cells(), vec!['a', 'b', '\n', 'c', 'd']);
        assert_eq!(frame.to_text(), "ab\ncd");
        assert_eq!(GridShape::new(2, 2).flat_len(), frame.cells().len());
    }

    #[test]
    fn test_empty_frame() {
        let frame = TextFrame::default();
        assert_eq!(frame.dimensions(), (0, 0));
        assert!(frame.cells().is_empty());
        assert_eq!(GridShape::default().flat_len(), 0);
    }
}
