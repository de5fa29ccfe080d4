//! Row rendering.
//!
//! A row is turned into one or more physical lines:
//!
//! 1. every cell is rendered to lines through [`FixedWidth`],
//! 2. the per-cell lines are transposed so line `k` holds the `k`-th line of
//!    each cell (missing lines are empty),
//! 3. the [`WidthExceedPolicy`] fits each fragment into its column,
//!    wrapping may add lines,
//! 4. fragments are padded and aligned to the column width and joined with
//!    the border strings.

use std::fmt;
use std::str::FromStr;

use crate::border::BorderStyle;
use crate::cell::FixedWidth;
use crate::cells::cell_len;
use crate::error::TableError;
use crate::numeric::NumberFormat;
use crate::wrap;

/// Horizontal placement of text inside a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

impl Alignment {
    /// All alignments, in declaration order.
    pub const ALL: [Self; 3] = [Self::Left, Self::Center, Self::Right];

    /// The format glyph associated with the alignment.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Left => '<',
            Self::Center => '^',
            Self::Right => '>',
        }
    }

    /// Lowercase name of the alignment.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }

    /// Pad `text` with spaces to `width` cells.
    ///
    /// Centered text gets the odd space on its right. Text already wider
    /// than `width` is returned unchanged.
    #[must_use]
    pub fn pad(self, text: &str, width: usize) -> String {
        let space = width.saturating_sub(cell_len(text));
        let (left, right) = match self {
            Self::Left => (0, space),
            Self::Right => (space, 0),
            Self::Center => (space / 2, space - space / 2),
        };
        let mut padded = String::with_capacity(text.len() + space);
        padded.extend(std::iter::repeat_n(' ', left));
        padded.push_str(text);
        padded.extend(std::iter::repeat_n(' ', right));
        padded
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Alignment {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "<" => Ok(Self::Left),
            "center" | "centre" | "^" => Ok(Self::Center),
            "right" | ">" => Ok(Self::Right),
            _ => Err(TableError::InvalidValue {
                field: "alignment",
                value: s.to_string(),
                allowed: "left, center, right",
            }),
        }
    }
}

/// What to do with content wider than its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WidthExceedPolicy {
    /// Continue the content on additional lines.
    #[default]
    Wrap,
    /// Cut the content at the column edge.
    Strip,
    /// Cut the content and end it with `...`.
    Ellipsis,
}

impl WidthExceedPolicy {
    /// All policies, in declaration order.
    pub const ALL: [Self; 3] = [Self::Wrap, Self::Strip, Self::Ellipsis];

    /// Lowercase name of the policy.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wrap => "wrap",
            Self::Strip => "strip",
            Self::Ellipsis => "ellipsis",
        }
    }

    /// Fit one fragment into `width` cells, returning its lines.
    #[must_use]
    pub fn apply(self, fragment: &str, width: usize) -> Vec<String> {
        match self {
            Self::Wrap => wrap::wrap(fragment, width),
            Self::Strip => vec![wrap::truncate(fragment, width)],
            Self::Ellipsis => vec![wrap::ellipsis(fragment, width)],
        }
    }
}

impl fmt::Display for WidthExceedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WidthExceedPolicy {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wrap" => Ok(Self::Wrap),
            "strip" => Ok(Self::Strip),
            "ellipsis" => Ok(Self::Ellipsis),
            _ => Err(TableError::InvalidValue {
                field: "width exceed policy",
                value: s.to_string(),
                allowed: "wrap, strip, ellipsis",
            }),
        }
    }
}

/// Resolved layout of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Full width including padding.
    pub width: usize,
    pub alignment: Alignment,
    pub padding_left: usize,
    pub padding_right: usize,
}

impl ColumnLayout {
    /// Width left for content once padding is taken out.
    #[must_use]
    pub const fn content_width(&self) -> usize {
        self.width
            .saturating_sub(self.padding_left)
            .saturating_sub(self.padding_right)
    }

    fn finish(&self, fragment: &str) -> String {
        let mut padded = " ".repeat(self.padding_left);
        padded.push_str(fragment);
        padded.extend(std::iter::repeat_n(' ', self.padding_right));
        self.alignment.pad(&padded, self.width)
    }
}

/// Everything needed to render rows of one table.
#[derive(Debug, Clone, Copy)]
pub struct RowLayout<'a> {
    pub columns: &'a [ColumnLayout],
    pub policy: WidthExceedPolicy,
    pub format: &'a NumberFormat,
    pub border: &'a BorderStyle,
}

impl RowLayout<'_> {
    /// Render one row into its physical lines.
    ///
    /// `cells` must hold one value per column.
    #[must_use]
    pub fn render_lines<C: FixedWidth>(&self, cells: &[C]) -> Vec<String> {
        if self.columns.is_empty() {
            return Vec::new();
        }

        let per_cell: Vec<Vec<String>> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                cells.get(i).map_or_else(
                    || vec![String::new()],
                    |cell| cell.render_fixed(column.content_width(), self.format),
                )
            })
            .collect();
        let height = per_cell.iter().map(Vec::len).max().unwrap_or(0).max(1);

        let mut lines = Vec::with_capacity(height);
        for k in 0..height {
            let fitted: Vec<Vec<String>> = self
                .columns
                .iter()
                .zip(&per_cell)
                .map(|(column, cell_lines)| {
                    let fragment = cell_lines.get(k).map_or("", String::as_str);
                    self.fit(fragment, column.content_width())
                })
                .collect();
            let depth = fitted.iter().map(Vec::len).max().unwrap_or(0).max(1);

            for j in 0..depth {
                let finished: Vec<String> = self
                    .columns
                    .iter()
                    .zip(&fitted)
                    .map(|(column, pieces)| {
                        column.finish(pieces.get(j).map_or("", String::as_str))
                    })
                    .collect();
                lines.push(self.border.content_line(&finished));
            }
        }
        lines
    }

    /// Render one row, lines joined with `\n`.
    #[must_use]
    pub fn render<C: FixedWidth>(&self, cells: &[C]) -> String {
        self.render_lines(cells).join("\n")
    }

    fn fit(&self, fragment: &str, width: usize) -> Vec<String> {
        self.policy
            .apply(fragment, width)
            .into_iter()
            .map(|piece| {
                // A wide character cannot be split; drop it rather than
                // break the column grid.
                if cell_len(&piece) > width {
                    log::trace!("clamping overflowing fragment {piece:?} to {width} cells");
                    wrap::truncate(&piece, width)
                } else {
                    piece
                }
            })
            .collect()
    }
}

/// Render one row into a string, lines joined with `\n`.
#[must_use]
pub fn render_row<C: FixedWidth>(cells: &[C], layout: &RowLayout<'_>) -> String {
    layout.render(cells)
}
