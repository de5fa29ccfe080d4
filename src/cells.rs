//! Display width calculations.
//!
//! Widths are measured in terminal cells. ANSI escape sequences occupy no
//! cells, and characters whose East Asian Width is Fullwidth, Wide or
//! Ambiguous occupy two.

use std::num::NonZeroUsize;
use std::sync::{LazyLock, Mutex};

use lru::LruCache;
use unicode_width::UnicodeWidthChar;

use crate::ansi::{self, Token};
use crate::sync::lock_recover;

/// Minimum string length to cache (shorter strings have minimal overhead).
const CACHE_MIN_LEN: usize = 8;

static CELL_LEN_CACHE: LazyLock<Mutex<LruCache<String, usize>>> =
    LazyLock::new(|| Mutex::new(LruCache::new(NonZeroUsize::new(1024).expect("non-zero"))));

/// Get the cell width of a single character.
///
/// Control characters have 0 width, combining marks have 0 width.
#[must_use]
pub fn get_character_cell_size(c: char) -> usize {
    c.width_cjk().unwrap_or(0)
}

fn compute_cell_width(text: &str) -> usize {
    if !text.contains('\x1b') {
        return text.chars().map(get_character_cell_size).sum();
    }
    ansi::tokenize(text)
        .map(|token| match token {
            Token::Escape(_) => 0,
            Token::Char(c) => get_character_cell_size(c),
        })
        .sum()
}

/// Get the display width of a string.
///
/// Escape sequences are skipped. Results for strings of 8+ bytes are kept
/// in an LRU cache.
#[must_use]
pub fn cell_len(text: &str) -> usize {
    if text.len() < CACHE_MIN_LEN {
        return compute_cell_width(text);
    }

    if let Some(&cached) = lock_recover(&CELL_LEN_CACHE).get(text) {
        return cached;
    }

    let width = compute_cell_width(text);
    lock_recover(&CELL_LEN_CACHE).put(text.to_string(), width);
    width
}

/// Get the display width of a string without touching the cache.
#[must_use]
pub fn cell_len_uncached(text: &str) -> usize {
    compute_cell_width(text)
}

/// Split plain text (no escape sequences) at a cell position.
///
/// Returns (left, right) where left is at most `max_size` cells wide. A wide
/// character that would straddle the boundary goes to the right side.
#[must_use]
pub fn chop_cells(text: &str, max_size: usize) -> (&str, &str) {
    let mut width = 0;
    let mut byte_pos = 0;

    for (i, c) in text.char_indices() {
        let char_width = get_character_cell_size(c);
        if width + char_width > max_size {
            break;
        }
        width += char_width;
        byte_pos = i + c.len_utf8();
    }

    (&text[..byte_pos], &text[byte_pos..])
}

/// Repeat `pattern` until it is exactly `total` cells wide.
///
/// When the last repetition would split a wide character the gap is filled
/// with spaces. An empty or zero-width pattern yields `total` spaces.
#[must_use]
pub fn tile(pattern: &str, total: usize) -> String {
    let unit = cell_len(pattern);
    if unit == 0 {
        return " ".repeat(total);
    }

    let mut result = pattern.repeat(total / unit);
    let (rest, rest_width) = {
        let (left, _) = chop_cells(pattern, total % unit);
        (left, cell_len(left))
    };
    result.push_str(rest);
    result.push_str(&" ".repeat(total % unit - rest_width));
    result
}

/// Check if a string contains any wide (2-cell) characters.
#[must_use]
pub fn has_wide_chars(text: &str) -> bool {
    text.chars().any(|c| get_character_cell_size(c) > 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_width() {
        assert_eq!(cell_len("hello"), 5);
        assert_eq!(cell_len("Hello, World!"), 13);
    }

    #[test]
    fn test_empty_width() {
        assert_eq!(cell_len(""), 0);
    }

    #[test]
    fn test_cjk_width() {
        assert_eq!(cell_len("日本語"), 6);
        assert_eq!(cell_len("こんにちは"), 10);
    }

    #[test]
    fn test_mixed_width() {
        assert_eq!(cell_len("Hello日本"), 9);
    }

    #[test]
    fn test_ambiguous_is_wide() {
        // U+00B1 PLUS-MINUS SIGN has East Asian Width "A"
        assert_eq!(get_character_cell_size('±'), 2);
    }

    #[test]
    fn test_escape_sequences_have_no_width() {
        assert_eq!(cell_len("\x1b[31mAdam\x1b[0m"), 4);
        assert_eq!(cell_len("\x1b[31m\x1b[0m"), 0);
        assert_eq!(cell_len("\x1b[1;32m日本\x1b[0m"), 4);
    }

    #[test]
    fn test_control_characters() {
        assert_eq!(get_character_cell_size('\0'), 0);
        assert_eq!(get_character_cell_size('\x1b'), 0);
    }

    #[test]
    fn test_fullwidth_forms() {
        assert_eq!(get_character_cell_size('！'), 2);
        assert_eq!(cell_len("！Ａ"), 4);
    }

    #[test]
    fn test_additive() {
        let a = "abc日";
        let b = "\x1b[32mxyz\x1b[0m";
        assert_eq!(cell_len(&format!("{a}{b}")), cell_len(a) + cell_len(b));
    }

    #[test]
    fn test_chop_cells_cjk() {
        let (left, right) = chop_cells("日本語", 3);
        assert_eq!(left, "日");
        assert_eq!(right, "本語");

        let (left, right) = chop_cells("日本語", 4);
        assert_eq!(left, "日本");
        assert_eq!(right, "語");
    }

    #[test]
    fn test_chop_cells_zero() {
        let (left, right) = chop_cells("hello", 0);
        assert_eq!(left, "");
        assert_eq!(right, "hello");
    }

    #[test]
    fn test_tile() {
        assert_eq!(tile("-", 5), "-----");
        assert_eq!(tile("=-", 5), "=-=-=");
        assert_eq!(tile("", 3), "   ");
        assert_eq!(tile("日", 3), "日 ");
    }

    #[test]
    fn test_has_wide_chars() {
        assert!(!has_wide_chars("hello"));
        assert!(has_wide_chars("hello日本"));
    }

    #[test]
    fn test_cell_len_caching() {
        let long = "Hello, this is a longer string for testing";
        assert_eq!(cell_len(long), 42);
        assert_eq!(cell_len(long), 42);
        assert_eq!(cell_len_uncached(long), 42);
    }
}
