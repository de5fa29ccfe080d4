//! Width-constrained wrapping and truncation of ANSI-colored text.
//!
//! Lines are filled greedily, one character at a time. Escape sequences
//! travel with the next visible character, except a pure reset which stays
//! on the line it closes. When a line break happens while a color is open,
//! the line is closed with a reset and the open sequences are replayed at the
//! start of the next line, so each line renders with the intended colors on
//! its own.

use smallvec::SmallVec;

use crate::ansi::{self, RESET, Token};
use crate::cells::{self, cell_len};

/// Marker appended by [`ellipsis`].
pub const ELLIPSIS: &str = "...";

type SeqStack<'a> = SmallVec<[&'a str; 4]>;

fn apply_sgr<'a>(active: &mut SeqStack<'a>, seq: &'a str) {
    if !ansi::is_sgr(seq) {
        return;
    }
    if ansi::is_reset(seq) {
        active.clear();
        return;
    }
    if ansi::starts_with_reset(seq) {
        active.clear();
    }
    active.push(seq);
}

struct LineFiller<'a> {
    width: usize,
    lines: Vec<String>,
    current: String,
    current_width: usize,
    active: SeqStack<'a>,
    pending: SeqStack<'a>,
}

impl<'a> LineFiller<'a> {
    fn new(width: usize) -> Self {
        Self {
            width,
            lines: Vec::new(),
            current: String::new(),
            current_width: 0,
            active: SmallVec::new(),
            pending: SmallVec::new(),
        }
    }

    fn fits(&self, c: char) -> bool {
        self.current_width + cells::get_character_cell_size(c) <= self.width
    }

    fn push_escape(&mut self, seq: &'a str) {
        if ansi::is_reset(seq) && self.pending.is_empty() {
            self.current.push_str(seq);
            self.active.clear();
        } else {
            self.pending.push(seq);
        }
    }

    fn push_char(&mut self, c: char) {
        if !self.fits(c) && self.current_width > 0 {
            self.break_line();
        }
        self.flush_pending();
        self.current.push(c);
        self.current_width += cells::get_character_cell_size(c);
    }

    fn flush_pending(&mut self) {
        for seq in self.pending.drain(..) {
            self.current.push_str(seq);
            apply_sgr(&mut self.active, seq);
        }
    }

    fn close_line(&mut self) {
        if !self.active.is_empty() {
            self.current.push_str(RESET);
        }
    }

    fn break_line(&mut self) {
        self.close_line();
        let reopened = self.active.concat();
        self.lines.push(std::mem::replace(&mut self.current, reopened));
        self.current_width = 0;
    }

    fn push_token(&mut self, token: Token<'a>) {
        match token {
            Token::Escape(seq) => self.push_escape(seq),
            Token::Char(c) => self.push_char(c),
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.flush_pending();
        self.lines.push(self.current);
        self.lines
    }
}

/// Wrap `text` into lines at most `width` cells wide.
///
/// Embedded newlines always start a new line. A wide character never
/// straddles two lines; if it cannot fit even on an empty line it is placed
/// there alone. A `width` of 0 yields a single empty line.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }

    let mut filler = LineFiller::new(width);
    for (index, segment) in text.split('\n').enumerate() {
        if index > 0 {
            filler.break_line();
        }
        for token in ansi::tokenize(segment) {
            filler.push_token(token);
        }
    }
    let lines = filler.finish();
    log::trace!("wrapped {} cells into {} lines of width {width}", cell_len(text), lines.len());
    lines
}

/// Cut `text` to at most `width` cells, dropping the remainder.
///
/// Open colors are closed with a reset at the cut.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if cell_len(text) <= width {
        return text.to_string();
    }

    let mut filler = LineFiller::new(width);
    for token in ansi::tokenize(text) {
        match token {
            Token::Escape(seq) => filler.push_escape(seq),
            Token::Char(c) => {
                if !filler.fits(c) {
                    break;
                }
                filler.push_char(c);
            }
        }
    }
    filler.close_line();
    filler.current
}

/// Cut `text` to `width` cells, ending it with `marker` when it was cut.
///
/// If the marker itself is wider than `width`, the marker is cut instead.
#[must_use]
pub fn clamp(text: &str, width: usize, marker: &str) -> String {
    if cell_len(text) <= width {
        return text.to_string();
    }

    let marker_width = cell_len(marker);
    if width >= marker_width {
        let mut clamped = truncate(text, width - marker_width);
        clamped.push_str(marker);
        clamped
    } else {
        truncate(marker, width)
    }
}

/// Cut `text` to `width` cells with a trailing `...`.
#[must_use]
pub fn ellipsis(text: &str, width: usize) -> String {
    clamp(text, width, ELLIPSIS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::strip_ansi;

    #[test]
    fn test_wrap_fits() {
        assert_eq!(wrap("hello", 10), vec!["hello"]);
    }

    #[test]
    fn test_wrap_greedy() {
        assert_eq!(wrap("Isabella", 4), vec!["Isab", "ella"]);
        assert_eq!(wrap("gender", 1), vec!["g", "e", "n", "d", "e", "r"]);
    }

    #[test]
    fn test_wrap_empty() {
        assert_eq!(wrap("", 5), vec![""]);
        assert_eq!(wrap("abc", 0), vec![""]);
    }

    #[test]
    fn test_wrap_hard_newlines() {
        assert_eq!(wrap("a\nbcd", 2), vec!["a", "bc", "d"]);
    }

    #[test]
    fn test_wrap_wide_char_deferred() {
        assert_eq!(wrap("a日本", 2), vec!["a", "日", "本"]);
        assert_eq!(wrap("日本語", 5), vec!["日本", "語"]);
    }

    #[test]
    fn test_wrap_wide_char_alone_overflows() {
        assert_eq!(wrap("日本", 1), vec!["日", "本"]);
    }

    #[test]
    fn test_wrap_color_closed_at_reset() {
        let text = "\x1b[31mThis is a very \x1b[0m\x1b[32mlong name\x1b[0m";
        assert_eq!(
            wrap(text, 15),
            vec!["\x1b[31mThis is a very \x1b[0m", "\x1b[32mlong name\x1b[0m"]
        );
    }

    #[test]
    fn test_wrap_color_reopened() {
        let text = "\x1b[31mこれは非常に長い\x1b[0m\x1b[32m名前です\x1b[0m";
        assert_eq!(
            wrap(text, 15),
            vec![
                "\x1b[31mこれは非常に長\x1b[0m",
                "\x1b[31mい\x1b[0m\x1b[32m名前です\x1b[0m",
            ]
        );
    }

    #[test]
    fn test_wrap_color_carried_over_newline() {
        let lines = wrap("\x1b[1mab\ncd\x1b[0m", 5);
        assert_eq!(lines, vec!["\x1b[1mab\x1b[0m", "\x1b[1mcd\x1b[0m"]);
    }

    #[test]
    fn test_wrap_preserves_visible_text() {
        let text = "\x1b[33mwrap me \x1b[4mplease\x1b[0m now";
        let lines = wrap(text, 3);
        let joined: String = lines.iter().map(|l| strip_ansi(l).into_owned()).collect();
        assert_eq!(joined, strip_ansi(text));
        assert!(lines.iter().all(|l| cell_len(l) <= 3));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Jacob", 4), "Jaco");
        assert_eq!(truncate("Jacob", 10), "Jacob");
        assert_eq!(truncate("日本", 3), "日");
        assert_eq!(truncate("日本", 1), "");
    }

    #[test]
    fn test_truncate_colored() {
        let text = "\x1b[31mThis is a very \x1b[0m\x1b[32mlong name\x1b[0m";
        assert_eq!(truncate(text, 15), "\x1b[31mThis is a very \x1b[0m");
        assert_eq!(truncate(text, 12), "\x1b[31mThis is a ve\x1b[0m");
    }

    #[test]
    fn test_ellipsis() {
        assert_eq!(ellipsis("Jacob", 4), "J...");
        assert_eq!(ellipsis("Jacob", 3), "...");
        assert_eq!(ellipsis("name", 4), "name");
    }

    #[test]
    fn test_ellipsis_marker_cut() {
        assert_eq!(ellipsis("rank", 1), ".");
        assert_eq!(ellipsis("rank", 2), "..");
        assert_eq!(ellipsis("rank", 0), "");
    }

    #[test]
    fn test_ellipsis_colored_wide() {
        let text = "\x1b[31mこれは非常に長い\x1b[0m\x1b[32m名前です\x1b[0m";
        assert_eq!(ellipsis(text, 15), "\x1b[31mこれは非常に\x1b[0m...");
    }
}
