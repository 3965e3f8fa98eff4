use crate::error::{XlsxError, XlsxErrorReport};

/// Converts a spreadsheet column letter to a 0-based index (`A` -> 0, `AA` -> 26).
///
/// Letters are case-insensitive and surrounding whitespace is ignored.
pub fn column_to_index(column: &str) -> Result<usize, XlsxErrorReport> {
    let column = column.trim();

    if column.is_empty() || !column.bytes().all(|b| b.is_ascii_alphabetic()) {
        Err(XlsxError::BadColumnLetter(column.to_string()))?;
    }

    let mut n: usize = 0;
    for b in column.bytes() {
        let digit = (b.to_ascii_uppercase() - b'A' + 1) as usize;

        n = n
            .checked_mul(26)
            .and_then(|n| n.checked_add(digit))
            .ok_or_else(|| XlsxError::BadColumnLetter(column.to_string()))?;
    }

    Ok(n - 1)
}

/// Inverse of [`column_to_index`], always in upper case.
pub fn index_to_column(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;

    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }

    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

#[inline]
pub(crate) fn fold_header(cell: &str) -> String { cell.trim().to_lowercase() }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_to_index() -> Result<(), XlsxErrorReport> {
        assert_eq!(column_to_index("A")?, 0);
        assert_eq!(column_to_index("B")?, 1);
        assert_eq!(column_to_index("Z")?, 25);
        assert_eq!(column_to_index("AA")?, 26);
        assert_eq!(column_to_index("AB")?, 27);
        assert_eq!(column_to_index("az")?, 51);
        assert_eq!(column_to_index(" c ")?, 2);
        assert_eq!(column_to_index("XFD")?, 16383);

        Ok(())
    }

    #[test]
    fn test_column_to_index_rejects_bad_input() {
        for bad in ["", "   ", "A1", "1", "A-B", "É"] {
            assert!(column_to_index(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_index_to_column_round_trip() -> Result<(), XlsxErrorReport> {
        for (index, column) in [(0, "A"), (25, "Z"), (26, "AA"), (27, "AB"), (701, "ZZ"), (702, "AAA")] {
            assert_eq!(index_to_column(index), column);
            assert_eq!(column_to_index(column)?, index);
        }

        Ok(())
    }

    #[test]
    fn test_fold_header() {
        assert_eq!(fold_header("  Test TITLE "), "test title");
    }
}
