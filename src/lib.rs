//! # beautiful_table
//!
//! Fixed-width, bordered text tables for the terminal.
//!
//! The crate lays out a grid of cells (text, numbers or nested tables) into
//! lines of equal display width. It understands ANSI color sequences and
//! East Asian wide characters, solves column widths against a maximum table
//! width, and wraps, strips or ellipsizes content that does not fit.
//!
//! ## Quick Start
//!
//! ```rust
//! use beautiful_table::prelude::*;
//!
//! let mut table = Table::new().border_style(border::COMPACT);
//! table.set_headers(["name", "rank"]).unwrap();
//! table.append_row([CellValue::from("Jacob"), 1.into()]).unwrap();
//! println!("{table}");
//! ```
//!
//! ## Core Concepts
//!
//! - **Table**: rows of [`CellValue`]s plus per-column metadata
//! - **BorderStyle**: the strings a table frame is drawn with
//! - **WidthExceedPolicy**: wrap, strip or ellipsize overlong content
//! - **SignMode**: how signs are shown in front of numbers
//! - **FixedWidth**: anything that renders into lines of a given width

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod ansi;
pub mod border;
pub mod cell;
pub mod cells;
pub mod error;
pub mod numeric;
pub mod row;
pub mod solver;
pub mod sync;
pub mod table;
pub mod wrap;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::border::{self, BorderStyle, LineKind};
    pub use crate::cell::{CellValue, FixedWidth};
    pub use crate::error::{ErrorKind, TableError};
    pub use crate::numeric::{NumberFormat, SignMode};
    pub use crate::row::{Alignment, WidthExceedPolicy};
    pub use crate::table::{Column, Stream, Table};
}

// Re-export key types at crate root
pub use border::BorderStyle;
pub use cell::{CellValue, FixedWidth};
pub use error::{ErrorKind, TableError};
pub use numeric::SignMode;
pub use row::{Alignment, WidthExceedPolicy};
pub use table::{Column, Table};
