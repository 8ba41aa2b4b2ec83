//! Line/encoding view over a window of buffer rows.
//!
//! Built once per batch from the minimal row window the batch touches. Every derived sequence is
//! indexed by the same logical row, so a row number from any edit can be looked up directly.

use crate::position::Encoding;
use crate::text::utf16_units_to_utf8_len;

/// Immutable snapshot of buffer rows with UTF-8 and UTF-16 views.
///
/// Rows outside the fetched window read as empty lines.
#[derive(Debug, Clone, Default)]
pub struct Lines {
    first_row: usize,
    lines: Vec<String>,
    lines16: Vec<Vec<u16>>,
    len8: Vec<usize>,
}

impl Lines {
    /// Build the view for `lines`, the first of which is buffer row `first_row`.
    pub fn new(first_row: usize, lines: Vec<String>) -> Self {
        let lines16 = lines.iter().map(|line| line.encode_utf16().collect()).collect();
        let len8 = lines.iter().map(String::len).collect();
        Self {
            first_row,
            lines,
            lines16,
            len8,
        }
    }

    fn index(&self, row: usize) -> Option<usize> {
        row.checked_sub(self.first_row)
            .filter(|idx| *idx < self.lines.len())
    }

    /// Text of `row`.
    pub fn line(&self, row: usize) -> &str {
        self.index(row).map_or("", |idx| self.lines[idx].as_str())
    }

    /// UTF-16 code units of `row`.
    pub fn units16(&self, row: usize) -> &[u16] {
        self.index(row)
            .map(|idx| self.lines16[idx].as_slice())
            .unwrap_or_default()
    }

    /// UTF-8 byte length of `row`.
    pub fn len8(&self, row: usize) -> usize {
        self.index(row).map_or(0, |idx| self.len8[idx])
    }

    /// Convert a column measured in `encoding` on `row` to a UTF-8 byte column.
    ///
    /// UTF-8 columns are clamped to the line. UTF-16 columns take the first `col` code units,
    /// drop anything undecodable (a surrogate pair cut in half) and measure the rest in bytes.
    pub fn utf8_col(&self, row: usize, col: usize, encoding: Encoding) -> usize {
        match encoding {
            Encoding::Utf8 => col.min(self.len8(row)),
            Encoding::Utf16 => {
                let units = self.units16(row);
                utf16_units_to_utf8_len(&units[..col.min(units.len())])
            }
        }
    }

    /// Convert a UTF-8 byte column on `row` to UTF-16 code units.
    pub fn utf16_col(&self, row: usize, col: usize) -> usize {
        let line = self.line(row);
        let mut col = col.min(line.len());
        while !line.is_char_boundary(col) {
            col -= 1;
        }
        line[..col].encode_utf16().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_outside_window_are_empty() {
        let lines = Lines::new(3, vec!["abc".to_string(), "de".to_string()]);
        assert_eq!(lines.line(3), "abc");
        assert_eq!(lines.len8(4), 2);
        assert_eq!(lines.line(0), "");
        assert_eq!(lines.len8(5), 0);
        assert!(lines.units16(2).is_empty());
    }

    #[test]
    fn test_utf16_columns_map_to_bytes() {
        // 日 (3 bytes, 1 unit), 😀 (4 bytes, 2 units), a (1 byte, 1 unit)
        let lines = Lines::new(0, vec!["日😀a".to_string()]);
        assert_eq!(lines.utf8_col(0, 0, Encoding::Utf16), 0);
        assert_eq!(lines.utf8_col(0, 1, Encoding::Utf16), 3);
        // Half a surrogate pair is dropped.
        assert_eq!(lines.utf8_col(0, 2, Encoding::Utf16), 3);
        assert_eq!(lines.utf8_col(0, 3, Encoding::Utf16), 7);
        assert_eq!(lines.utf8_col(0, 4, Encoding::Utf16), 8);
        assert_eq!(lines.utf8_col(0, 40, Encoding::Utf16), 8);
        assert_eq!(lines.utf8_col(0, 40, Encoding::Utf8), 8);
    }

    #[test]
    fn test_utf16_col_inverts_utf8_col() {
        let lines = Lines::new(0, vec!["aé日😀z".to_string()]);
        for units in 0..=lines.units16(0).len() {
            let bytes = lines.utf8_col(0, units, Encoding::Utf16);
            let back = lines.utf16_col(0, bytes);
            assert!(back <= units);
            assert_eq!(lines.utf8_col(0, back, Encoding::Utf16), bytes);
        }
    }
}
