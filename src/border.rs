//! Border characters and horizontal lines for tables.
//!
//! A [`BorderStyle`] holds the strings used to draw a table frame. Every
//! element is a string rather than a single character and any of them may be
//! empty, which turns that part of the frame off.

use std::borrow::Cow;
use std::fmt;

use crate::cells::{self, cell_len};
use crate::solver;

/// Horizontal line kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Above the first row.
    Top,
    /// Between the header row and the body.
    HeaderSeparator,
    /// Between two body rows.
    RowSeparator,
    /// Below the last row.
    Bottom,
}

/// Strings used to draw a table frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BorderStyle {
    /// Left edge of every content line.
    pub left: Cow<'static, str>,
    /// Right edge of every content line.
    pub right: Cow<'static, str>,
    /// Fill of the top border line.
    pub top: Cow<'static, str>,
    /// Fill of the bottom border line.
    pub bottom: Cow<'static, str>,
    /// Fill of the line under the header row.
    pub header_separator: Cow<'static, str>,
    /// Fill of the line between body rows.
    pub row_separator: Cow<'static, str>,
    /// Between two cells of a content line.
    pub column_separator: Cow<'static, str>,
    /// Drawn where a horizontal line crosses a vertical one.
    pub intersection: Cow<'static, str>,
}

impl BorderStyle {
    /// Create a style from its parts.
    #[must_use]
    #[expect(
        clippy::too_many_arguments,
        reason = "struct constructor needs all fields"
    )]
    pub const fn new(
        left: &'static str,
        right: &'static str,
        top: &'static str,
        bottom: &'static str,
        header_separator: &'static str,
        row_separator: &'static str,
        column_separator: &'static str,
        intersection: &'static str,
    ) -> Self {
        Self {
            left: Cow::Borrowed(left),
            right: Cow::Borrowed(right),
            top: Cow::Borrowed(top),
            bottom: Cow::Borrowed(bottom),
            header_separator: Cow::Borrowed(header_separator),
            row_separator: Cow::Borrowed(row_separator),
            column_separator: Cow::Borrowed(column_separator),
            intersection: Cow::Borrowed(intersection),
        }
    }

    /// Look up a built-in style by name (case insensitive).
    #[must_use]
    pub fn preset(name: &str) -> Option<Self> {
        let style = match name.trim().to_lowercase().replace('-', "_").as_str() {
            "default" => DEFAULT,
            "mysql" => MYSQL,
            "separated" => SEPARATED,
            "compact" => COMPACT,
            "dotted" => DOTTED,
            "markdown" => MARKDOWN,
            "restructured_text" | "rst" => RESTRUCTURED_TEXT,
            "none" => NONE,
            _ => return None,
        };
        Some(style)
    }

    /// Set the left border.
    #[must_use]
    pub fn with_left(mut self, left: impl Into<Cow<'static, str>>) -> Self {
        self.left = left.into();
        self
    }

    /// Set the right border.
    #[must_use]
    pub fn with_right(mut self, right: impl Into<Cow<'static, str>>) -> Self {
        self.right = right.into();
        self
    }

    /// Set the top border fill.
    #[must_use]
    pub fn with_top(mut self, top: impl Into<Cow<'static, str>>) -> Self {
        self.top = top.into();
        self
    }

    /// Set the bottom border fill.
    #[must_use]
    pub fn with_bottom(mut self, bottom: impl Into<Cow<'static, str>>) -> Self {
        self.bottom = bottom.into();
        self
    }

    /// Set the header separator fill.
    #[must_use]
    pub fn with_header_separator(mut self, fill: impl Into<Cow<'static, str>>) -> Self {
        self.header_separator = fill.into();
        self
    }

    /// Set the row separator fill.
    #[must_use]
    pub fn with_row_separator(mut self, fill: impl Into<Cow<'static, str>>) -> Self {
        self.row_separator = fill.into();
        self
    }

    /// Set the column separator.
    #[must_use]
    pub fn with_column_separator(mut self, separator: impl Into<Cow<'static, str>>) -> Self {
        self.column_separator = separator.into();
        self
    }

    /// Set the intersection.
    #[must_use]
    pub fn with_intersection(mut self, intersection: impl Into<Cow<'static, str>>) -> Self {
        self.intersection = intersection.into();
        self
    }

    /// Get the fill string for a line kind.
    #[must_use]
    pub fn fill(&self, kind: LineKind) -> &str {
        match kind {
            LineKind::Top => &self.top,
            LineKind::HeaderSeparator => &self.header_separator,
            LineKind::RowSeparator => &self.row_separator,
            LineKind::Bottom => &self.bottom,
        }
    }

    /// Display widths of the (left, right) borders.
    #[must_use]
    pub fn edge_widths(&self) -> (usize, usize) {
        (cell_len(&self.left), cell_len(&self.right))
    }

    /// Display width of the column separator.
    #[must_use]
    pub fn separator_width(&self) -> usize {
        cell_len(&self.column_separator)
    }

    /// Total width of a table with the given column widths.
    #[must_use]
    pub fn table_width(&self, widths: &[usize]) -> usize {
        solver::table_width(widths, self.separator_width(), self.edge_widths())
    }

    /// Build a horizontal line drawn with `fill` for the given column widths.
    ///
    /// The fill is tiled to the full table width. When the fill is visible,
    /// the intersection is overlaid at the left edge, the right edge and
    /// every column boundary, clipped to the width of the border or
    /// separator it crosses. Empty or blank fills yield a plain line.
    #[must_use]
    pub fn horizontal_line(&self, fill: &str, widths: &[usize]) -> String {
        let total = self.table_width(widths);
        if total == 0 {
            return String::new();
        }

        let tiled = cells::tile(fill, total);
        if fill.is_empty() || is_blank(fill) {
            return tiled;
        }

        let mut line = LineCells::new(&tiled);
        let junction_visible = !is_blank(&self.intersection);
        let (left_width, right_width) = self.edge_widths();
        let separator_width = self.separator_width();

        if left_width > 0 && !(is_blank(&self.left) && junction_visible) {
            line.put_str(0, cells::chop_cells(&self.intersection, left_width).0);
        }

        if right_width > 0 && !(is_blank(&self.right) && junction_visible) {
            let tail = tail_cells(&self.intersection, right_width);
            line.put_str(total - cell_len(tail), tail);
        }

        if separator_width > 0 && !(is_blank(&self.column_separator) && junction_visible) {
            let head = cells::chop_cells(&self.intersection, separator_width).0;
            let mut index = left_width;
            for width in widths.iter().take(widths.len().saturating_sub(1)) {
                index += width;
                line.put_str(index, head);
                index += separator_width;
            }
        }

        line.into_string()
    }

    /// Build the line of the given kind, or `None` when its fill is empty.
    #[must_use]
    pub fn line(&self, kind: LineKind, widths: &[usize]) -> Option<String> {
        let fill = self.fill(kind);
        if fill.is_empty() {
            None
        } else {
            Some(self.horizontal_line(fill, widths))
        }
    }

    /// Join rendered cells into a content line with borders and separators.
    #[must_use]
    pub fn content_line<S: AsRef<str>>(&self, cells: &[S]) -> String {
        let mut line = String::from(&*self.left);
        for (i, cell) in cells.iter().enumerate() {
            if i > 0 {
                line.push_str(&self.column_separator);
            }
            line.push_str(cell.as_ref());
        }
        line.push_str(&self.right);
        line
    }
}

impl Default for BorderStyle {
    fn default() -> Self {
        DEFAULT
    }
}

impl fmt::Display for BorderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display a sample 3x3 frame
        let widths = [3, 3, 3];
        let blank = ["   "; 3];
        let mut lines = Vec::new();
        lines.extend(self.line(LineKind::Top, &widths));
        lines.push(self.content_line(&blank));
        lines.extend(self.line(LineKind::HeaderSeparator, &widths));
        lines.push(self.content_line(&blank));
        lines.extend(self.line(LineKind::RowSeparator, &widths));
        lines.push(self.content_line(&blank));
        lines.extend(self.line(LineKind::Bottom, &widths));
        f.write_str(&lines.join("\n"))
    }
}

/// Non-empty and made of whitespace only.
fn is_blank(text: &str) -> bool {
    !text.is_empty() && text.chars().all(char::is_whitespace)
}

/// The longest suffix of `text` at most `max_size` cells wide.
fn tail_cells(text: &str, max_size: usize) -> &str {
    let mut width = 0;
    let mut start = text.len();
    for (index, c) in text.char_indices().rev() {
        width += cells::get_character_cell_size(c);
        if width > max_size {
            break;
        }
        start = index;
    }
    &text[start..]
}

/// A line addressed by cell position.
///
/// Wide characters take two slots; the second one is `None`. Overwriting
/// any cell of a wide character blanks the rest of it.
struct LineCells(Vec<Option<char>>);

impl LineCells {
    fn new(text: &str) -> Self {
        let mut slots = Vec::with_capacity(text.len());
        for c in text.chars() {
            slots.push(Some(c));
            for _ in 1..cells::get_character_cell_size(c) {
                slots.push(None);
            }
        }
        Self(slots)
    }

    /// Replace the character covering cell `index` with spaces.
    fn blank(&mut self, index: usize) {
        let Some(owner) = (0..=index).rev().find(|&i| self.0[i].is_some()) else {
            return;
        };
        let mut end = owner + 1;
        while end < self.0.len() && self.0[end].is_none() {
            end += 1;
        }
        for slot in &mut self.0[owner..end] {
            *slot = Some(' ');
        }
    }

    /// Write `text` from cell `index` on. Zero-width characters and
    /// characters running past the end are skipped.
    fn put_str(&mut self, mut index: usize, text: &str) {
        for c in text.chars() {
            let width = cells::get_character_cell_size(c);
            if width == 0 {
                continue;
            }
            if index + width > self.0.len() {
                return;
            }
            for cell in index..index + width {
                self.blank(cell);
            }
            self.0[index] = Some(c);
            for slot in &mut self.0[index + 1..index + width] {
                *slot = None;
            }
            index += width;
        }
    }

    fn into_string(self) -> String {
        self.0.into_iter().flatten().collect()
    }
}

// ============================================================================
// Built-in Styles
// ============================================================================

/// `+---+` corners, `|` edges. The default.
pub const DEFAULT: BorderStyle = BorderStyle::new("|", "|", "-", "-", "-", "-", "|", "+");

/// Same frame as [`DEFAULT`], as printed by the mysql client.
pub const MYSQL: BorderStyle = DEFAULT;

/// [`DEFAULT`] with `=` above and below the header row.
pub const SEPARATED: BorderStyle = BorderStyle::new("|", "|", "=", "-", "=", "-", "|", "+");

/// No outer frame, columns separated by a space, a dashed line under the
/// header.
pub const COMPACT: BorderStyle = BorderStyle::new("", "", "", "", "-", "", " ", " ");

/// Dotted lines with `:` edges and no row separators.
pub const DOTTED: BorderStyle = BorderStyle::new(":", ":", ".", ".", ".", "", ":", "");

/// Pipe table as understood by Markdown renderers.
pub const MARKDOWN: BorderStyle = BorderStyle::new("|", "|", "", "", "-", "", "|", "|");

/// reStructuredText simple table.
pub const RESTRUCTURED_TEXT: BorderStyle =
    BorderStyle::new("", "", "=", "=", "=", "", " ", " ");

/// No frame at all; columns are separated by a single space.
pub const NONE: BorderStyle = BorderStyle::new("", "", "", "", "", "", " ", "");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lines() {
        let widths = [10, 6, 8];
        assert_eq!(DEFAULT.table_width(&widths), 28);
        assert_eq!(
            DEFAULT.horizontal_line("-", &widths),
            "+----------+------+--------+"
        );
    }

    #[test]
    fn test_separated_header() {
        let line = SEPARATED.line(LineKind::HeaderSeparator, &[3, 2]);
        assert_eq!(line.as_deref(), Some("+===+==+"));
    }

    #[test]
    fn test_compact_lines() {
        let widths = [4, 3];
        assert_eq!(COMPACT.table_width(&widths), 8);
        assert_eq!(
            COMPACT.line(LineKind::HeaderSeparator, &widths).as_deref(),
            Some("---- ---")
        );
        assert_eq!(COMPACT.line(LineKind::Top, &widths), None);
    }

    #[test]
    fn test_markdown_lines() {
        let widths = [3, 3];
        assert_eq!(
            MARKDOWN.line(LineKind::HeaderSeparator, &widths).as_deref(),
            Some("|---|---|")
        );
        assert_eq!(MARKDOWN.line(LineKind::RowSeparator, &widths), None);
    }

    #[test]
    fn test_dotted_has_no_intersections() {
        assert_eq!(
            DOTTED.line(LineKind::Top, &[2, 2]).as_deref(),
            Some(".......")
        );
    }

    #[test]
    fn test_blank_fill_is_plain() {
        assert_eq!(DEFAULT.horizontal_line(" ", &[2, 2]), "       ");
        assert_eq!(DEFAULT.horizontal_line("", &[2, 2]), "       ");
    }

    #[test]
    fn test_multi_char_parts() {
        let style = DEFAULT
            .with_column_separator(" | ")
            .with_intersection("-+-")
            .with_left("||")
            .with_right("||");
        let widths = [3, 3];
        assert_eq!(style.table_width(&widths), 13);
        assert_eq!(style.horizontal_line("=", &widths), "-+===-+-===+-");
    }

    #[test]
    fn test_fill_pattern_tiled() {
        assert_eq!(DEFAULT.horizontal_line("-=", &[4]), "+=-=-+");
    }

    #[test]
    fn test_wide_fill_keeps_width() {
        let line = DEFAULT.horizontal_line("═", &[4]);
        assert_eq!(cell_len(&line), 6);
    }

    #[test]
    fn test_wide_junctions_keep_width() {
        let style = BorderStyle::new("│", "│", "─", "─", "─", "─", "│", "┼");
        let widths = [7, 6];
        assert_eq!(style.table_width(&widths), 19);
        let line = style.horizontal_line("─", &widths);
        assert_eq!(line, "┼─── ┼ ── ┼");
        assert_eq!(cell_len(&line), 19);
        assert!(line.starts_with('┼'));
        assert!(line.ends_with('┼'));
        assert_eq!(line.matches('┼').count(), 3);
    }

    #[test]
    fn test_wide_junction_clipped_to_narrow_separator() {
        let style = DEFAULT.with_intersection("┼");
        let line = style.horizontal_line("-", &[3, 3]);
        assert_eq!(line, "---------");
    }

    #[test]
    fn test_content_line() {
        assert_eq!(DEFAULT.content_line(&[" a ", " b "]), "| a | b |");
        assert_eq!(COMPACT.content_line(&["a", "b"]), "a b");
    }

    #[test]
    fn test_preset_lookup() {
        assert_eq!(BorderStyle::preset("Markdown"), Some(MARKDOWN));
        assert_eq!(BorderStyle::preset("restructured-text"), Some(RESTRUCTURED_TEXT));
        assert_eq!(BorderStyle::preset("rst"), Some(RESTRUCTURED_TEXT));
        assert!(BorderStyle::preset("fancy").is_none());
        assert_eq!(BorderStyle::default(), DEFAULT);
    }

    #[test]
    fn test_display_sample() {
        let sample = DEFAULT.to_string();
        assert!(sample.starts_with("+---+---+---+"));
        assert_eq!(sample.lines().count(), 7);
    }
}
