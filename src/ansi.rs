//! ANSI escape sequence scanning.
//!
//! Only CSI sequences (`ESC [ params intermediates final`) are recognised.
//! They carry no display width; SGR sequences (final byte `m`) additionally
//! change the color state that [`crate::wrap`] tracks across line breaks.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// SGR sequence that clears every attribute.
pub const RESET: &str = "\x1b[0m";

static ESCAPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-?]*[ -/]*[@-~]").expect("valid regex"));

/// A unit of scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A complete escape sequence, including the `ESC [` prefix.
    Escape(&'a str),
    /// A single visible (or control) character.
    Char(char),
}

/// Iterator over the [`Token`]s of a string.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    text: &'a str,
    pos: usize,
    next_escape: Option<(usize, usize)>,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.text.len() {
            return None;
        }

        if let Some((start, end)) = self.next_escape
            && start == self.pos
        {
            self.pos = end;
            self.next_escape = find_escape(self.text, end);
            return Some(Token::Escape(&self.text[start..end]));
        }

        let c = self.text[self.pos..].chars().next()?;
        self.pos += c.len_utf8();
        Some(Token::Char(c))
    }
}

fn find_escape(text: &str, from: usize) -> Option<(usize, usize)> {
    ESCAPE_RE.find_at(text, from).map(|m| (m.start(), m.end()))
}

/// Split `text` into escape sequences and characters, in order.
#[must_use]
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens {
        text,
        pos: 0,
        next_escape: find_escape(text, 0),
    }
}

/// Remove every escape sequence from `text`.
#[must_use]
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    ESCAPE_RE.replace_all(text, "")
}

/// Check whether `text` contains at least one escape sequence.
#[must_use]
pub fn has_escapes(text: &str) -> bool {
    text.contains('\x1b') && ESCAPE_RE.is_match(text)
}

fn sgr_params(seq: &str) -> Option<&str> {
    seq.strip_prefix("\x1b[")?.strip_suffix('m')
}

fn is_zero_param(param: &str) -> bool {
    param.bytes().all(|b| b == b'0')
}

/// Check whether `seq` is an SGR sequence that only resets attributes
/// (`ESC[m`, `ESC[0m`, `ESC[0;0m`, ...).
#[must_use]
pub fn is_reset(seq: &str) -> bool {
    sgr_params(seq).is_some_and(|params| params.split(';').all(is_zero_param))
}

/// Check whether `seq` is an SGR sequence whose first parameter resets
/// attributes before applying the rest (`ESC[0;31m`).
#[must_use]
pub fn starts_with_reset(seq: &str) -> bool {
    sgr_params(seq).is_some_and(|params| params.split(';').next().is_some_and(is_zero_param))
}

/// Check whether `seq` is an SGR (color/attribute) sequence.
#[must_use]
pub fn is_sgr(seq: &str) -> bool {
    sgr_params(seq).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_plain() {
        let tokens: Vec<Token<'_>> = tokenize("ab").collect();
        assert_eq!(tokens, vec![Token::Char('a'), Token::Char('b')]);
    }

    #[test]
    fn test_tokenize_escapes() {
        let tokens: Vec<Token<'_>> = tokenize("\x1b[31mA\x1b[0m").collect();
        assert_eq!(
            tokens,
            vec![
                Token::Escape("\x1b[31m"),
                Token::Char('A'),
                Token::Escape("\x1b[0m"),
            ]
        );
    }

    #[test]
    fn test_tokenize_wide_and_escape() {
        let tokens: Vec<Token<'_>> = tokenize("日\x1b[1;32m本").collect();
        assert_eq!(
            tokens,
            vec![
                Token::Char('日'),
                Token::Escape("\x1b[1;32m"),
                Token::Char('本'),
            ]
        );
    }

    #[test]
    fn test_lone_escape_is_a_char() {
        let tokens: Vec<Token<'_>> = tokenize("\x1bx").collect();
        assert_eq!(tokens, vec![Token::Char('\x1b'), Token::Char('x')]);
    }

    #[test]
    fn test_strip_ansi() {
        assert_eq!(strip_ansi("\x1b[31mThis\x1b[0m \x1b[2Kis"), "This is");
        assert_eq!(strip_ansi("plain"), "plain");
    }

    #[test]
    fn test_has_escapes() {
        assert!(has_escapes("\x1b[31mred"));
        assert!(!has_escapes("red"));
    }

    #[test]
    fn test_reset_detection() {
        assert!(is_reset("\x1b[0m"));
        assert!(is_reset("\x1b[m"));
        assert!(is_reset("\x1b[00;0m"));
        assert!(!is_reset("\x1b[31m"));
        assert!(!is_reset("\x1b[0;31m"));
        assert!(!is_reset("\x1b[2K"));

        assert!(starts_with_reset("\x1b[0;31m"));
        assert!(!starts_with_reset("\x1b[31;0m"));
        assert!(is_sgr("\x1b[1;4m"));
        assert!(!is_sgr("\x1b[2J"));
    }
}
