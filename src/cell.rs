//! Cell values and fixed-width rendering.
//!
//! Everything that can sit in a table cell implements [`FixedWidth`]: given
//! the width available to it, it produces the lines it wants to display.
//! Scalars ignore the width (the row renderer wraps or clamps them later);
//! nested tables lay themselves out inside it.

use std::fmt;

use crate::cells::cell_len;
use crate::numeric::NumberFormat;
use crate::table::Table;

/// A single cell of a [`Table`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// No value. Renders as an empty string.
    #[default]
    Empty,
    /// Text. Numeric-looking text is re-formatted when detection is on.
    Text(String),
    /// An integer.
    Int(i64),
    /// A float, rounded to the table's precision when rendered.
    Float(f64),
    /// A table rendered inside the cell.
    Table(Box<Table>),
}

impl CellValue {
    /// Check whether the cell holds no value.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The text of a [`CellValue::Text`] cell.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Render content into lines for a column of a given width.
pub trait FixedWidth {
    /// Produce display lines for a cell whose content area is `width`
    /// cells wide, formatting numbers with `format`.
    ///
    /// Lines may still be wider than `width`; the caller applies the
    /// width-exceed policy.
    fn render_fixed(&self, width: usize, format: &NumberFormat) -> Vec<String>;

    /// Width of the widest line when nothing constrains the content.
    fn display_width(&self, format: &NumberFormat) -> usize;
}

fn widest(lines: &[String]) -> usize {
    lines.iter().map(|line| cell_len(line)).max().unwrap_or(0)
}

impl FixedWidth for CellValue {
    fn display_width(&self, format: &NumberFormat) -> usize {
        match self {
            Self::Table(table) => table.display_width(format),
            _ => widest(&self.render_fixed(0, format)),
        }
    }

    fn render_fixed(&self, width: usize, format: &NumberFormat) -> Vec<String> {
        match self {
            Self::Empty => vec![String::new()],
            Self::Int(value) => vec![format.format_int(*value)],
            Self::Float(value) => vec![format.format_float(*value)],
            Self::Text(text) => format
                .normalize_str(text)
                .split('\n')
                .map(|line| format.normalize_str(line))
                .collect(),
            Self::Table(table) => table.render_fixed(width, format),
        }
    }
}

impl FixedWidth for Table {
    fn render_fixed(&self, width: usize, _format: &NumberFormat) -> Vec<String> {
        // A nested table keeps its own number format.
        self.render_at(width).split('\n').map(str::to_string).collect()
    }

    fn display_width(&self, format: &NumberFormat) -> usize {
        widest(&self.render_fixed(self.max_table_width(), format))
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(text) => f.write_str(text),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => {
                let format = NumberFormat {
                    detect_numerics: false,
                    precision: usize::MAX,
                    ..NumberFormat::default()
                };
                f.write_str(&format.format_float(*value))
            }
            Self::Table(table) => fmt::Display::fmt(table, f),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for CellValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<char> for CellValue {
    fn from(value: char) -> Self {
        Self::Text(value.to_string())
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for CellValue {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<usize> for CellValue {
    fn from(value: usize) -> Self {
        i64::try_from(value).map_or_else(|_| Self::Text(value.to_string()), Self::Int)
    }
}

impl From<f32> for CellValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Table> for CellValue {
    fn from(value: Table) -> Self {
        Self::Table(Box::new(value))
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::SignMode;

    #[test]
    fn test_conversions() {
        assert_eq!(CellValue::from("boy"), CellValue::Text("boy".into()));
        assert_eq!(CellValue::from(3u8), CellValue::Int(3));
        assert_eq!(CellValue::from(2.5), CellValue::Float(2.5));
        assert_eq!(CellValue::from(None::<i32>), CellValue::Empty);
        assert_eq!(CellValue::from(Some("x")), CellValue::Text("x".into()));
        assert!(CellValue::default().is_empty());
    }

    #[test]
    fn test_render_scalars() {
        let format = NumberFormat {
            sign: SignMode::Plus,
            ..NumberFormat::default()
        };
        assert_eq!(CellValue::Int(4).render_fixed(10, &format), vec!["+4"]);
        assert_eq!(
            CellValue::Float(1.23456).render_fixed(10, &format),
            vec!["+1.235"]
        );
        assert_eq!(CellValue::Empty.render_fixed(10, &format), vec![""]);
    }

    #[test]
    fn test_render_text_lines_normalized() {
        let format = NumberFormat {
            sign: SignMode::Plus,
            ..NumberFormat::default()
        };
        let lines = CellValue::from("1\nabc\n2.0").render_fixed(10, &format);
        assert_eq!(lines, vec!["+1", "abc", "+2.0"]);
    }

    #[test]
    fn test_numbers_kept_as_text_without_detection() {
        let format = NumberFormat {
            detect_numerics: false,
            ..NumberFormat::default()
        };
        let lines = CellValue::from("3.14159").render_fixed(10, &format);
        assert_eq!(lines, vec!["3.14159"]);
        // Real floats are still rounded.
        assert_eq!(CellValue::Float(3.14159).render_fixed(10, &format), vec!["3.142"]);
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::from("a").to_string(), "a");
        assert_eq!(CellValue::Int(-7).to_string(), "-7");
        assert_eq!(CellValue::Float(2.0).to_string(), "2.0");
        assert_eq!(CellValue::Empty.to_string(), "");
    }
}
