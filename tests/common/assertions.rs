//! Logged assertion helpers for rendered tables.

#![allow(dead_code)]

use beautiful_table::ansi::strip_ansi;
use beautiful_table::cells::cell_len;

/// Assert every line of `rendered` is exactly `width` cells wide.
#[track_caller]
pub fn assert_uniform_width(context: &str, rendered: &str, width: usize) {
    for (index, line) in rendered.lines().enumerate() {
        let actual = cell_len(line);
        if actual != width {
            tracing::error!(
                context = context,
                line = index,
                expected = width,
                actual = actual,
                text = %strip_ansi(line),
                "line width mismatch"
            );
            panic!("{context}: line {index} is {actual} cells wide, expected {width}: {line:?}");
        }
    }
    tracing::trace!(context = context, "all lines {width} cells wide");
}

/// Assert all lines of `rendered` share one width and return it.
#[track_caller]
pub fn assert_rectangular(context: &str, rendered: &str) -> usize {
    let width = rendered.lines().next().map_or(0, cell_len);
    assert_uniform_width(context, rendered, width);
    width
}

/// Assert `haystack` contains `needle`, logging both on failure.
#[track_caller]
pub fn assert_contains_logged(context: &str, haystack: &str, needle: &str) {
    if !haystack.contains(needle) {
        tracing::error!(
            context = context,
            needle = needle,
            haystack = haystack,
            "assertion failed: needle not found"
        );
        panic!("{context}: {needle:?} not found in\n{haystack}");
    }
}
