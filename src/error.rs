//! Error types for table construction and mutation.
//!
//! Rendering itself never fails; every error comes from the call that tried
//! to put the table into an invalid state, and that call leaves the table
//! untouched.

use std::fmt;

/// Coarse classification of a [`TableError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input has the wrong shape (length mismatch against the column count).
    Shape,
    /// Input has an unacceptable value.
    Value,
    /// The referenced row, column or header does not exist.
    Lookup,
}

/// Error returned by validated table operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A row has a different number of cells than the table has columns.
    RowLength { expected: usize, found: usize },
    /// A column source yielded fewer values than the table has rows.
    ColumnLength { expected: usize, found: usize },
    /// A per-column metadata array does not match the column count.
    MetadataLength {
        field: &'static str,
        expected: usize,
        found: usize,
    },
    /// A value outside the accepted set.
    InvalidValue {
        field: &'static str,
        value: String,
        allowed: &'static str,
    },
    /// No column carries the given header.
    UnknownHeader(String),
    /// Index past the end of the rows or columns.
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },
    /// Removal from an empty collection.
    Empty(&'static str),
}

impl TableError {
    /// Classify the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::RowLength { .. } | Self::ColumnLength { .. } | Self::MetadataLength { .. } => {
                ErrorKind::Shape
            }
            Self::InvalidValue { .. } => ErrorKind::Value,
            Self::UnknownHeader(_) | Self::IndexOutOfRange { .. } | Self::Empty(_) => {
                ErrorKind::Lookup
            }
        }
    }
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowLength { expected, found } => {
                write!(f, "row has {found} cells, table has {expected} columns")
            }
            Self::ColumnLength { expected, found } => {
                write!(f, "length of column should be at least {expected}, got {found}")
            }
            Self::MetadataLength {
                field,
                expected,
                found,
            } => write!(f, "{field} needs {expected} values, got {found}"),
            Self::InvalidValue {
                field,
                value,
                allowed,
            } => write!(f, "invalid {field} '{value}', allowed values are: {allowed}"),
            Self::UnknownHeader(header) => write!(f, "no column with header '{header}'"),
            Self::IndexOutOfRange { what, index, len } => {
                write!(f, "{what} index {index} out of range for length {len}")
            }
            Self::Empty(what) => write!(f, "{what} is empty"),
        }
    }
}

impl std::error::Error for TableError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(
            TableError::RowLength {
                expected: 3,
                found: 2
            }
            .kind(),
            ErrorKind::Shape
        );
        assert_eq!(
            TableError::InvalidValue {
                field: "alignment",
                value: "middle".into(),
                allowed: "left, center, right",
            }
            .kind(),
            ErrorKind::Value
        );
        assert_eq!(
            TableError::UnknownHeader("age".into()).kind(),
            ErrorKind::Lookup
        );
        assert_eq!(TableError::Empty("rows").kind(), ErrorKind::Lookup);
    }

    #[test]
    fn test_display() {
        let err = TableError::ColumnLength {
            expected: 5,
            found: 3,
        };
        assert_eq!(err.to_string(), "length of column should be at least 5, got 3");

        let err = TableError::IndexOutOfRange {
            what: "row",
            index: 9,
            len: 2,
        };
        assert_eq!(err.to_string(), "row index 9 out of range for length 2");
    }
}
