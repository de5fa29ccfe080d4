//! Numeric coercion and sign formatting.
//!
//! Cell text that parses as a number is re-rendered through [`NumberFormat`]:
//! integers are kept exact, floats are rounded to the configured precision,
//! and non-negative values get the glyph chosen by [`SignMode`].

use std::fmt;
use std::str::FromStr;

use crate::error::TableError;

/// How a sign is shown in front of numeric values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SignMode {
    /// `+` for non-negative values, `-` for negative ones.
    Plus,
    /// Only negative values carry a sign.
    #[default]
    Minus,
    /// A space for non-negative values, `-` for negative ones.
    Space,
}

impl SignMode {
    /// All sign modes, in declaration order.
    pub const ALL: [Self; 3] = [Self::Plus, Self::Minus, Self::Space];

    /// The format glyph associated with the mode.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
            Self::Space => ' ',
        }
    }

    /// Prefix placed in front of a non-negative value.
    #[must_use]
    pub const fn positive_prefix(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "",
            Self::Space => " ",
        }
    }

    /// Lowercase name of the mode.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Plus => "plus",
            Self::Minus => "minus",
            Self::Space => "space",
        }
    }
}

impl fmt::Display for SignMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SignMode {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plus" | "+" => Ok(Self::Plus),
            "minus" | "-" => Ok(Self::Minus),
            "space" | " " => Ok(Self::Space),
            _ => Err(TableError::InvalidValue {
                field: "sign",
                value: s.to_string(),
                allowed: "plus, minus, space",
            }),
        }
    }
}

/// A parsed numeric cell value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number<'a> {
    Int(i64),
    /// An integer too large for `i64`, kept exact as its significant digits.
    BigInt { negative: bool, digits: &'a str },
    Float(f64),
}

impl<'a> Number<'a> {
    /// Parse text as an integer, then as a float.
    #[must_use]
    pub fn parse(text: &'a str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Ok(int) = trimmed.parse::<i64>() {
            return Some(Self::Int(int));
        }
        if let Some(big) = Self::parse_big_int(trimmed) {
            return Some(big);
        }
        trimmed.parse::<f64>().ok().map(Self::Float)
    }

    fn parse_big_int(text: &'a str) -> Option<Self> {
        let (negative, digits) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let significant = digits.trim_start_matches('0');
        Some(Self::BigInt {
            negative,
            digits: if significant.is_empty() { "0" } else { significant },
        })
    }
}

fn round_to(value: f64, precision: usize) -> f64 {
    if value.fract() == 0.0 {
        return value;
    }
    let Ok(exponent) = i32::try_from(precision) else {
        return value;
    };
    let scale = 10f64.powi(exponent);
    let scaled = (value * scale).round() / scale;
    if scaled.is_finite() { scaled } else { value }
}

/// Render a float the way a decimal repr would: always with a fractional
/// part, `nan` and `inf` spelled in lowercase, and scientific notation with
/// a signed two-digit exponent outside `1e-4 <= |x| < 1e16`.
fn float_repr(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        return exponent_repr(value);
    }
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// `1e16` as `1e+16`, `1.5e-5` as `1.5e-05`.
fn exponent_repr(value: f64) -> String {
    let formatted = format!("{value:e}");
    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        return formatted;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

/// Numeric display settings shared by every cell of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    /// Parse numeric-looking text into numbers before display.
    pub detect_numerics: bool,
    /// Maximum digits kept after the decimal point of floats.
    pub precision: usize,
    /// Sign display rule.
    pub sign: SignMode,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            detect_numerics: true,
            precision: 3,
            sign: SignMode::Minus,
        }
    }
}

impl NumberFormat {
    /// Format an integer with the sign rule.
    #[must_use]
    pub fn format_int(&self, value: i64) -> String {
        if value < 0 {
            value.to_string()
        } else {
            format!("{}{value}", self.sign.positive_prefix())
        }
    }

    /// Round and format a float with the sign rule.
    #[must_use]
    pub fn format_float(&self, value: f64) -> String {
        let rounded = round_to(value, self.precision);
        let repr = float_repr(rounded);
        if repr.starts_with('-') {
            repr
        } else {
            format!("{}{repr}", self.sign.positive_prefix())
        }
    }

    /// Format a parsed number.
    #[must_use]
    pub fn format_number(&self, number: Number<'_>) -> String {
        match number {
            Number::Int(value) => self.format_int(value),
            Number::BigInt { negative, digits } => {
                if negative && digits != "0" {
                    format!("-{digits}")
                } else {
                    format!("{}{digits}", self.sign.positive_prefix())
                }
            }
            Number::Float(value) => self.format_float(value),
        }
    }

    /// Normalize cell text for display.
    ///
    /// With numeric detection on, text that parses as a number is
    /// re-formatted; anything else is returned unchanged.
    #[must_use]
    pub fn normalize_str(&self, text: &str) -> String {
        if self.detect_numerics
            && let Some(number) = Number::parse(text)
        {
            return self.format_number(number);
        }
        text.to_string()
    }
}
