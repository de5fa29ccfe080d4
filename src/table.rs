//! Table - rows of cells laid out in bordered, fixed-width columns.
//!
//! A [`Table`] owns its rows and one [`Column`] of metadata per column.
//! Every mutation validates its input first and leaves the table untouched
//! when it fails, so the row/column shape always stays rectangular.
//!
//! # Examples
//!
//! ```
//! use beautiful_table::prelude::*;
//!
//! let mut table = Table::new();
//! table.set_headers(["name", "rank", "gender"]).unwrap();
//! table.append_row([CellValue::from("Jacob"), 1.into(), "boy".into()]).unwrap();
//! table.append_row([CellValue::from("Isabella"), 1.into(), "girl".into()]).unwrap();
//!
//! let rendered = table.render();
//! assert_eq!(rendered.lines().next(), Some("+----------+------+--------+"));
//! ```
//!
//! # Width resolution
//!
//! Column widths are solved on every render from the widest header or cell
//! of each column, unless they were pinned with
//! [`Table::set_column_widths`]. [`Table::render`] stores the solved widths
//! on the columns; [`Table::render_at`] and the `Display` impl leave the
//! table untouched.

use std::collections::VecDeque;
use std::fmt;
use std::ops::{Bound, RangeBounds};

use crate::border::{BorderStyle, LineKind};
use crate::cell::{CellValue, FixedWidth};
use crate::error::TableError;
use crate::numeric::{NumberFormat, SignMode};
use crate::row::{Alignment, ColumnLayout, RowLayout, WidthExceedPolicy};
use crate::solver;

/// Maximum table width used by [`Table::new`].
pub const DEFAULT_MAX_WIDTH: usize = 80;

/// Left and right padding used for new columns by [`Table::new`].
pub const DEFAULT_PADDING: usize = 1;

/// Column metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Header text. A blank header counts as no header.
    pub header: String,
    /// Alignment of body cells.
    pub alignment: Alignment,
    /// Alignment of the header cell, when it differs from `alignment`.
    pub header_alignment: Option<Alignment>,
    /// Resolved width including padding. 0 until the first render.
    pub width: usize,
    /// Spaces before the content.
    pub padding_left: usize,
    /// Spaces after the content.
    pub padding_right: usize,
}

impl Default for Column {
    fn default() -> Self {
        Self {
            header: String::new(),
            alignment: Alignment::default(),
            header_alignment: None,
            width: 0,
            padding_left: DEFAULT_PADDING,
            padding_right: DEFAULT_PADDING,
        }
    }
}

impl Column {
    /// Create a column with a header and default settings.
    #[must_use]
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            ..Self::default()
        }
    }

    /// Set the alignment of body cells.
    #[must_use]
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set the alignment of the header cell.
    #[must_use]
    pub fn header_alignment(mut self, alignment: Alignment) -> Self {
        self.header_alignment = Some(alignment);
        self
    }

    /// Set left and right padding.
    #[must_use]
    pub fn padding(mut self, left: usize, right: usize) -> Self {
        self.padding_left = left;
        self.padding_right = right;
        self
    }

    /// Pin the width (including padding).
    #[must_use]
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    fn has_header(&self) -> bool {
        !self.header.trim().is_empty()
    }

    fn layout(&self, width: usize, header_row: bool) -> ColumnLayout {
        let alignment = if header_row {
            self.header_alignment.unwrap_or(self.alignment)
        } else {
            self.alignment
        };
        ColumnLayout {
            width,
            alignment,
            padding_left: self.padding_left,
            padding_right: self.padding_right,
        }
    }
}

/// A table of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<CellValue>>,
    max_width: usize,
    format: NumberFormat,
    policy: WidthExceedPolicy,
    border: BorderStyle,
    default_alignment: Alignment,
    default_padding: usize,
    auto_width: bool,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            max_width: DEFAULT_MAX_WIDTH,
            format: NumberFormat::default(),
            policy: WidthExceedPolicy::default(),
            border: BorderStyle::default(),
            default_alignment: Alignment::default(),
            default_padding: DEFAULT_PADDING,
            auto_width: true,
        }
    }
}

fn collect_row<C: Into<CellValue>>(row: impl IntoIterator<Item = C>) -> Vec<CellValue> {
    row.into_iter().map(Into::into).collect()
}

impl Table {
    /// Create a new empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Builders
    // ------------------------------------------------------------------

    /// Set the maximum total width.
    #[must_use]
    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set the alignment given to columns created later.
    #[must_use]
    pub fn default_alignment(mut self, alignment: Alignment) -> Self {
        self.default_alignment = alignment;
        self
    }

    /// Set the padding given to columns created later.
    #[must_use]
    pub fn default_padding(mut self, padding: usize) -> Self {
        self.default_padding = padding;
        self
    }

    /// Set the number of decimals kept for floats.
    #[must_use]
    pub fn precision(mut self, precision: usize) -> Self {
        self.format.precision = precision;
        self
    }

    /// Enable or disable parsing numeric-looking text.
    #[must_use]
    pub fn detect_numerics(mut self, detect: bool) -> Self {
        self.format.detect_numerics = detect;
        self
    }

    /// Set the sign mode for numbers.
    #[must_use]
    pub fn sign(mut self, sign: SignMode) -> Self {
        self.format.sign = sign;
        self
    }

    /// Set how content wider than its column is handled.
    #[must_use]
    pub fn width_exceed_policy(mut self, policy: WidthExceedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the border style.
    #[must_use]
    pub fn border_style(mut self, border: BorderStyle) -> Self {
        self.border = border;
        self
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    pub fn set_max_width(&mut self, width: usize) {
        self.max_width = width;
    }

    pub fn set_default_alignment(&mut self, alignment: Alignment) {
        self.default_alignment = alignment;
    }

    pub fn set_default_padding(&mut self, padding: usize) {
        self.default_padding = padding;
    }

    pub fn set_precision(&mut self, precision: usize) {
        self.format.precision = precision;
    }

    pub fn set_detect_numerics(&mut self, detect: bool) {
        self.format.detect_numerics = detect;
    }

    pub fn set_sign(&mut self, sign: SignMode) {
        self.format.sign = sign;
    }

    pub fn set_width_exceed_policy(&mut self, policy: WidthExceedPolicy) {
        self.policy = policy;
    }

    pub fn set_border_style(&mut self, border: BorderStyle) {
        self.border = border;
    }

    /// Re-enable (or disable) solving widths on every render.
    pub fn set_auto_width(&mut self, auto: bool) {
        self.auto_width = auto;
    }

    /// Mutable access to the border strings.
    pub fn border_mut(&mut self) -> &mut BorderStyle {
        &mut self.border
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub fn max_table_width(&self) -> usize {
        self.max_width
    }

    #[must_use]
    pub fn number_format(&self) -> &NumberFormat {
        &self.format
    }

    #[must_use]
    pub fn policy(&self) -> WidthExceedPolicy {
        self.policy
    }

    #[must_use]
    pub fn border(&self) -> &BorderStyle {
        &self.border
    }

    #[must_use]
    pub fn auto_width(&self) -> bool {
        self.auto_width
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check whether there is nothing to render.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    #[must_use]
    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.header.as_str()).collect()
    }

    /// Widths stored on the columns (0 before the first render).
    #[must_use]
    pub fn column_widths(&self) -> Vec<usize> {
        self.columns.iter().map(|c| c.width).collect()
    }

    /// Total width of the table with its stored widths.
    #[must_use]
    pub fn width(&self) -> usize {
        self.border.table_width(&self.column_widths())
    }

    /// Get a row.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::IndexOutOfRange`] if there is no such row.
    pub fn row(&self, index: usize) -> Result<&[CellValue], TableError> {
        self.check_row(index)?;
        Ok(&self.rows[index])
    }

    /// Get the values of one column.
    ///
    /// # Errors
    ///
    /// Returns a lookup error if there is no such column.
    pub fn column_values(&self, index: usize) -> Result<Vec<&CellValue>, TableError> {
        self.check_column(index)?;
        Ok(self.rows.iter().map(|row| &row[index]).collect())
    }

    /// Find the first column with the given header.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::UnknownHeader`] if no column has this header.
    pub fn column_index(&self, header: &str) -> Result<usize, TableError> {
        self.columns
            .iter()
            .position(|c| c.header == header)
            .ok_or_else(|| TableError::UnknownHeader(header.to_string()))
    }

    /// Get one cell.
    ///
    /// # Errors
    ///
    /// Returns a lookup error if the row or column does not exist.
    pub fn cell(&self, row: usize, column: usize) -> Result<&CellValue, TableError> {
        self.check_column(column)?;
        self.check_row(row)?;
        Ok(&self.rows[row][column])
    }

    // ------------------------------------------------------------------
    // Row mutation
    // ------------------------------------------------------------------

    fn check_column(&self, index: usize) -> Result<(), TableError> {
        if index < self.columns.len() {
            Ok(())
        } else {
            Err(TableError::IndexOutOfRange {
                what: "column",
                index,
                len: self.columns.len(),
            })
        }
    }

    fn check_row(&self, index: usize) -> Result<(), TableError> {
        if index < self.rows.len() {
            Ok(())
        } else {
            Err(TableError::IndexOutOfRange {
                what: "row",
                index,
                len: self.rows.len(),
            })
        }
    }

    fn check_row_shape(&self, row: &[CellValue]) -> Result<(), TableError> {
        if row.len() == self.columns.len() {
            Ok(())
        } else {
            Err(TableError::RowLength {
                expected: self.columns.len(),
                found: row.len(),
            })
        }
    }

    fn new_column(&self, header: impl Into<String>) -> Column {
        Column::new(header)
            .alignment(self.default_alignment)
            .padding(self.default_padding, self.default_padding)
    }

    /// Append a row.
    ///
    /// On a table without columns the row establishes the column count. An
    /// empty row added to such a table is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::RowLength`] if the row does not have one cell
    /// per column.
    pub fn append_row<C: Into<CellValue>>(
        &mut self,
        row: impl IntoIterator<Item = C>,
    ) -> Result<(), TableError> {
        let index = self.rows.len();
        self.insert_row(index, row)
    }

    /// Insert a row before `index`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::IndexOutOfRange`] if `index` is past the end
    /// and [`TableError::RowLength`] if the row has the wrong length.
    pub fn insert_row<C: Into<CellValue>>(
        &mut self,
        index: usize,
        row: impl IntoIterator<Item = C>,
    ) -> Result<(), TableError> {
        let row = collect_row(row);
        if index > self.rows.len() {
            return Err(TableError::IndexOutOfRange {
                what: "row",
                index,
                len: self.rows.len(),
            });
        }

        if self.columns.is_empty() {
            if row.is_empty() {
                log::debug!("ignoring empty row on a table without columns");
                return Ok(());
            }
            let fresh: Vec<Column> = (0..row.len()).map(|_| self.new_column("")).collect();
            self.columns = fresh;
        }
        self.check_row_shape(&row)?;
        self.rows.insert(index, row);
        Ok(())
    }

    /// Replace the row at `index`, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns a lookup error for a missing row and a shape error for a row
    /// of the wrong length.
    pub fn update_row<C: Into<CellValue>>(
        &mut self,
        index: usize,
        row: impl IntoIterator<Item = C>,
    ) -> Result<Vec<CellValue>, TableError> {
        let row = collect_row(row);
        self.check_row(index)?;
        self.check_row_shape(&row)?;
        Ok(std::mem::replace(&mut self.rows[index], row))
    }

    /// Remove and return the row at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Empty`] on a table without rows and
    /// [`TableError::IndexOutOfRange`] for a missing row.
    pub fn pop_row(&mut self, index: usize) -> Result<Vec<CellValue>, TableError> {
        if self.rows.is_empty() {
            return Err(TableError::Empty("table"));
        }
        self.check_row(index)?;
        Ok(self.rows.remove(index))
    }

    /// Remove every row, keeping the columns.
    pub fn clear_rows(&mut self) {
        self.rows.clear();
    }

    /// Remove every row and, with `reset_columns`, every column too.
    pub fn clear(&mut self, reset_columns: bool) {
        self.rows.clear();
        if reset_columns {
            self.columns.clear();
        }
    }

    /// Replace one cell, returning the previous value.
    ///
    /// # Errors
    ///
    /// Returns a lookup error if the row or column does not exist.
    pub fn set_cell(
        &mut self,
        row: usize,
        column: usize,
        value: impl Into<CellValue>,
    ) -> Result<CellValue, TableError> {
        self.check_column(column)?;
        self.check_row(row)?;
        Ok(std::mem::replace(&mut self.rows[row][column], value.into()))
    }

    /// Copy a range of rows into a new table with the same columns and
    /// settings.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::IndexOutOfRange`] if the range does not fit.
    pub fn slice_rows(&self, range: impl RangeBounds<usize>) -> Result<Self, TableError> {
        let len = self.rows.len();
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start + 1,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end + 1,
            Bound::Excluded(&end) => end,
            Bound::Unbounded => len,
        };
        let Some(rows) = self.rows.get(start..end) else {
            return Err(TableError::IndexOutOfRange {
                what: "row",
                index: end.max(start),
                len,
            });
        };

        Ok(Self {
            columns: self.columns.clone(),
            rows: rows.to_vec(),
            max_width: self.max_width,
            format: self.format,
            policy: self.policy,
            border: self.border.clone(),
            default_alignment: self.default_alignment,
            default_padding: self.default_padding,
            auto_width: self.auto_width,
        })
    }

    // ------------------------------------------------------------------
    // Column mutation
    // ------------------------------------------------------------------

    /// Append a column with the table's default alignment and padding.
    ///
    /// # Errors
    ///
    /// See [`Table::insert_column_with`].
    pub fn append_column<C: Into<CellValue>>(
        &mut self,
        header: impl Into<String>,
        values: impl IntoIterator<Item = C>,
    ) -> Result<(), TableError> {
        let column = self.new_column(header);
        self.insert_column_with(self.columns.len(), column, values)
    }

    /// Insert a column before `index` with the table's default alignment
    /// and padding.
    ///
    /// # Errors
    ///
    /// See [`Table::insert_column_with`].
    pub fn insert_column<C: Into<CellValue>>(
        &mut self,
        index: usize,
        header: impl Into<String>,
        values: impl IntoIterator<Item = C>,
    ) -> Result<(), TableError> {
        let column = self.new_column(header);
        self.insert_column_with(index, column, values)
    }

    /// Insert a column before `index`.
    ///
    /// On a table without columns, one row is created per value. Otherwise
    /// the values are placed into the existing rows in order; extra values
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::IndexOutOfRange`] if `index` is past the last
    /// column and [`TableError::ColumnLength`] if there are fewer values
    /// than rows. In both cases the table is left as it was.
    pub fn insert_column_with<C: Into<CellValue>>(
        &mut self,
        index: usize,
        mut column: Column,
        values: impl IntoIterator<Item = C>,
    ) -> Result<(), TableError> {
        if index > self.columns.len() {
            return Err(TableError::IndexOutOfRange {
                what: "column",
                index,
                len: self.columns.len(),
            });
        }
        column.width = 0;

        if self.columns.is_empty() {
            self.rows = values.into_iter().map(|value| vec![value.into()]).collect();
            self.columns.push(column);
            return Ok(());
        }

        let mut values = values.into_iter();
        let mut inserted = 0;
        for row in &mut self.rows {
            let Some(value) = values.next() else {
                break;
            };
            row.insert(index, value.into());
            inserted += 1;
        }

        if inserted < self.rows.len() {
            for row in &mut self.rows[..inserted] {
                row.remove(index);
            }
            log::debug!(
                "rolled back column insert at {index}: {inserted} of {} values",
                self.rows.len()
            );
            return Err(TableError::ColumnLength {
                expected: self.rows.len(),
                found: inserted,
            });
        }

        self.columns.insert(index, column);
        Ok(())
    }

    /// Replace the values of a column, returning the previous ones.
    ///
    /// # Errors
    ///
    /// Returns a lookup error for a missing column and
    /// [`TableError::ColumnLength`] if there are fewer values than rows.
    pub fn update_column<C: Into<CellValue>>(
        &mut self,
        index: usize,
        values: impl IntoIterator<Item = C>,
    ) -> Result<Vec<CellValue>, TableError> {
        self.check_column(index)?;
        let values: Vec<CellValue> = values
            .into_iter()
            .take(self.rows.len())
            .map(Into::into)
            .collect();
        if values.len() < self.rows.len() {
            return Err(TableError::ColumnLength {
                expected: self.rows.len(),
                found: values.len(),
            });
        }

        Ok(self
            .rows
            .iter_mut()
            .zip(values)
            .map(|(row, value)| std::mem::replace(&mut row[index], value))
            .collect())
    }

    /// Remove a column, returning its metadata and values.
    ///
    /// Removing the last column also removes every row.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Empty`] on a table without columns and a lookup
    /// error for a missing column.
    pub fn pop_column(&mut self, index: usize) -> Result<(Column, Vec<CellValue>), TableError> {
        if self.columns.is_empty() {
            return Err(TableError::Empty("table"));
        }
        self.check_column(index)?;
        let values = self.rows.iter_mut().map(|row| row.remove(index)).collect();
        let column = self.columns.remove(index);
        if self.columns.is_empty() {
            self.rows.clear();
        }
        Ok((column, values))
    }

    // ------------------------------------------------------------------
    // Column metadata
    // ------------------------------------------------------------------

    fn set_column_field<T>(
        &mut self,
        field: &'static str,
        values: Vec<T>,
        apply: impl Fn(&mut Column, T),
    ) -> Result<(), TableError> {
        if self.columns.is_empty() {
            if values.is_empty() {
                return Ok(());
            }
            let fresh: Vec<Column> = (0..values.len()).map(|_| self.new_column("")).collect();
            self.columns = fresh;
        } else if values.len() != self.columns.len() {
            return Err(TableError::MetadataLength {
                field,
                expected: self.columns.len(),
                found: values.len(),
            });
        }

        for (column, value) in self.columns.iter_mut().zip(values) {
            apply(column, value);
        }
        Ok(())
    }

    /// Set every header.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::MetadataLength`] unless there is one header per
    /// column. The first call on a table without columns creates them.
    pub fn set_headers<S: Into<String>>(
        &mut self,
        headers: impl IntoIterator<Item = S>,
    ) -> Result<(), TableError> {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        self.set_column_field("headers", headers, |column, header| column.header = header)
    }

    /// Set the alignment of every column.
    ///
    /// # Errors
    ///
    /// Same as [`Table::set_headers`].
    pub fn set_alignments(
        &mut self,
        alignments: impl IntoIterator<Item = Alignment>,
    ) -> Result<(), TableError> {
        let alignments = alignments.into_iter().collect();
        self.set_column_field("alignments", alignments, |column, alignment| {
            column.alignment = alignment;
        })
    }

    /// Set the header alignment of every column.
    ///
    /// # Errors
    ///
    /// Same as [`Table::set_headers`].
    pub fn set_header_alignments(
        &mut self,
        alignments: impl IntoIterator<Item = Alignment>,
    ) -> Result<(), TableError> {
        let alignments = alignments.into_iter().collect();
        self.set_column_field("header alignments", alignments, |column, alignment| {
            column.header_alignment = Some(alignment);
        })
    }

    /// Pin every column width and stop solving widths on render.
    ///
    /// Widths include padding. Pinned widths summing to 0 are solved anyway,
    /// and so are pinned widths left unusable by a later column insert or
    /// padding change.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidValue`] if a width is smaller than its
    /// column's padding (unless every width is 0). Otherwise same as
    /// [`Table::set_headers`].
    pub fn set_column_widths(
        &mut self,
        widths: impl IntoIterator<Item = usize>,
    ) -> Result<(), TableError> {
        let widths: Vec<usize> = widths.into_iter().collect();
        if widths.iter().any(|&w| w > 0) {
            let default_pad = 2 * self.default_padding;
            for (i, &width) in widths.iter().enumerate() {
                let pad = self
                    .columns
                    .get(i)
                    .map_or(default_pad, |c| c.padding_left + c.padding_right);
                if width < pad {
                    return Err(TableError::InvalidValue {
                        field: "column width",
                        value: width.to_string(),
                        allowed: "widths of at least the column's left plus right padding",
                    });
                }
            }
        }
        self.set_column_field("column widths", widths, |column, width| column.width = width)?;
        self.auto_width = false;
        Ok(())
    }

    /// Set the left padding of every column.
    ///
    /// # Errors
    ///
    /// Same as [`Table::set_headers`].
    pub fn set_padding_left(
        &mut self,
        padding: impl IntoIterator<Item = usize>,
    ) -> Result<(), TableError> {
        let padding = padding.into_iter().collect();
        self.set_column_field("left padding", padding, |column, pad| column.padding_left = pad)
    }

    /// Set the right padding of every column.
    ///
    /// # Errors
    ///
    /// Same as [`Table::set_headers`].
    pub fn set_padding_right(
        &mut self,
        padding: impl IntoIterator<Item = usize>,
    ) -> Result<(), TableError> {
        let padding = padding.into_iter().collect();
        self.set_column_field("right padding", padding, |column, pad| column.padding_right = pad)
    }

    /// Set both paddings of every column.
    ///
    /// # Errors
    ///
    /// Same as [`Table::set_headers`].
    pub fn set_padding(
        &mut self,
        padding: impl IntoIterator<Item = usize>,
    ) -> Result<(), TableError> {
        let padding = padding.into_iter().collect();
        self.set_column_field("padding", padding, |column, pad| {
            column.padding_left = pad;
            column.padding_right = pad;
        })
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    fn header_visible(&self) -> bool {
        self.columns.iter().any(Column::has_header)
    }

    fn header_cells(&self) -> Vec<CellValue> {
        self.columns
            .iter()
            .map(|c| CellValue::Text(c.header.clone()))
            .collect()
    }

    /// Widest rendered header or cell of each column, padding excluded.
    fn content_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let header = CellValue::Text(column.header.clone()).display_width(&self.format);
                self.rows
                    .iter()
                    .map(|row| row[i].display_width(&self.format))
                    .fold(header, usize::max)
            })
            .collect()
    }

    fn solve_widths(&self, max_width: usize) -> Vec<usize> {
        let padding: Vec<(usize, usize)> = self
            .columns
            .iter()
            .map(|c| (c.padding_left, c.padding_right))
            .collect();
        solver::solve(
            &self.content_widths(),
            &padding,
            max_width,
            self.border.separator_width(),
            self.border.edge_widths(),
        )
    }

    /// Stored widths, if every column has one that holds its padding.
    fn usable_widths(&self) -> Option<Vec<usize>> {
        let usable = !self.columns.is_empty()
            && self
                .columns
                .iter()
                .all(|c| c.width > 0 && c.width >= c.padding_left + c.padding_right);
        usable.then(|| self.column_widths())
    }

    fn resolved_widths(&self, max_width: usize) -> Vec<usize> {
        if !self.auto_width {
            if let Some(pinned) = self.usable_widths() {
                return pinned;
            }
            log::debug!(
                "pinned widths {:?} do not fit the columns, solving instead",
                self.column_widths()
            );
        }
        self.solve_widths(max_width)
    }

    fn store_widths(&mut self, widths: &[usize]) {
        for (column, &width) in self.columns.iter_mut().zip(widths) {
            column.width = width;
        }
    }

    fn ensure_widths(&mut self) {
        if self.usable_widths().is_none() {
            let widths = self.solve_widths(self.max_width);
            self.store_widths(&widths);
        }
    }

    fn layouts(&self, widths: &[usize], header_row: bool) -> Vec<ColumnLayout> {
        self.columns
            .iter()
            .zip(widths)
            .map(|(column, &width)| column.layout(width, header_row))
            .collect()
    }

    fn row_layout<'a>(&'a self, columns: &'a [ColumnLayout]) -> RowLayout<'a> {
        RowLayout {
            columns,
            policy: self.policy,
            format: &self.format,
            border: &self.border,
        }
    }

    /// Top border and header block.
    fn head_items(&self, widths: &[usize]) -> Vec<String> {
        let mut items = Vec::new();
        items.extend(self.border.line(LineKind::Top, widths));
        if self.header_visible() {
            let columns = self.layouts(widths, true);
            items.push(self.row_layout(&columns).render(&self.header_cells()));
            items.extend(self.border.line(LineKind::HeaderSeparator, widths));
        }
        items
    }

    fn body_items(&self, widths: &[usize], rows: &[Vec<CellValue>]) -> Vec<String> {
        let columns = self.layouts(widths, false);
        let layout = self.row_layout(&columns);
        let mut items = Vec::with_capacity(rows.len() * 2);
        for (i, row) in rows.iter().enumerate() {
            if i > 0 {
                items.extend(self.border.line(LineKind::RowSeparator, widths));
            }
            items.push(layout.render(row));
        }
        items
    }

    fn render_with(&self, widths: &[usize]) -> String {
        let mut items = self.head_items(widths);
        items.extend(self.body_items(widths, &self.rows));
        items.extend(self.border.line(LineKind::Bottom, widths));
        items.join("\n")
    }

    /// Render the table, storing the resolved widths on its columns.
    ///
    /// A table without rows or columns renders as an empty string.
    pub fn render(&mut self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let widths = self.resolved_widths(self.max_width);
        self.store_widths(&widths);
        log::debug!(
            "rendering {}x{} table, widths {widths:?}",
            self.rows.len(),
            self.columns.len()
        );
        self.render_with(&widths)
    }

    /// Render the table within `max_width` without modifying it.
    #[must_use]
    pub fn render_at(&self, max_width: usize) -> String {
        if self.is_empty() {
            return String::new();
        }
        self.render_with(&self.resolved_widths(max_width))
    }

    /// Render existing rows, then `rows` one at a time as they arrive.
    ///
    /// Widths are solved only if none are stored yet, so incoming rows are
    /// laid out with the widths in effect when the stream starts. With
    /// `append`, incoming rows are also added to the table.
    ///
    /// The stream yields the top border, the header block, each row (and
    /// row separator), and finally the bottom border. A malformed incoming
    /// row yields an error and ends the stream.
    pub fn stream<I, R, C>(&mut self, rows: I, append: bool) -> Stream<'_, I::IntoIter>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = C>,
        C: Into<CellValue>,
    {
        Stream {
            table: self,
            incoming: rows.into_iter(),
            append,
            queue: VecDeque::new(),
            body_rows: 0,
            started: false,
            finished: false,
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_at(self.max_width))
    }
}

/// Iterator returned by [`Table::stream`].
#[derive(Debug)]
pub struct Stream<'a, I> {
    table: &'a mut Table,
    incoming: I,
    append: bool,
    queue: VecDeque<String>,
    body_rows: usize,
    started: bool,
    finished: bool,
}

impl<I> Stream<'_, I> {
    /// Queue the head and the first `existing` rows of the table.
    fn start(&mut self, existing: usize) {
        self.table.ensure_widths();
        let widths = self.table.column_widths();
        let head = self.table.head_items(&widths);
        let body = self.table.body_items(&widths, &self.table.rows[..existing]);
        self.queue.extend(head);
        self.queue.extend(body);
        self.body_rows = existing;
        self.started = true;
    }

    fn push_row(&mut self, row: Vec<CellValue>) -> Result<(), TableError> {
        self.table.append_row(row)?;
        let last = self.table.rows.len() - 1;
        if !self.started {
            self.start(last);
        }

        let widths = self.table.column_widths();
        if self.body_rows > 0 {
            self.queue
                .extend(self.table.border.line(LineKind::RowSeparator, &widths));
        }
        let columns = self.table.layouts(&widths, false);
        let rendered = self.table.row_layout(&columns).render(&self.table.rows[last]);
        self.queue.push_back(rendered);
        self.body_rows += 1;

        if !self.append {
            self.table.rows.pop();
        }
        Ok(())
    }

    fn finish(&mut self) {
        if !self.started && !self.table.columns.is_empty() {
            self.start(self.table.rows.len());
        }
        if self.started {
            let widths = self.table.column_widths();
            self.queue
                .extend(self.table.border.line(LineKind::Bottom, &widths));
        }
        self.finished = true;
    }
}

impl<I, R, C> Iterator for Stream<'_, I>
where
    I: Iterator<Item = R>,
    R: IntoIterator<Item = C>,
    C: Into<CellValue>,
{
    type Item = Result<String, TableError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.queue.pop_front() {
                return Some(Ok(line));
            }
            if self.finished {
                return None;
            }
            if !self.started && !self.table.columns.is_empty() {
                self.start(self.table.rows.len());
                continue;
            }
            match self.incoming.next() {
                Some(row) => {
                    if let Err(err) = self.push_row(collect_row(row)) {
                        self.finished = true;
                        return Some(Err(err));
                    }
                }
                None => self.finish(),
            }
        }
    }
}
